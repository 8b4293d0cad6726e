//! TUI module: Terminal User Interface using Ratatui.
//!
//! Two screens:
//! - Assessment form (measurements, history, medications)
//! - Results with report preview and export

mod app;
mod styles;
mod ui;

pub use app::App;
pub use styles::MedicalTheme;
