//! # Adiposcope
//!
//! Adult overweight and obesity assessment for the terminal.
//!
//! This crate provides:
//! - BMI, waist-to-height and waist-to-hip computation
//! - Population-aware BMI classification and abdominal-obesity thresholds
//! - Risk aggregation with ordered clinical recommendations
//! - A plain-text downloadable report
//! - Terminal UI for local-only use
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Core assessment types and pure computations
//! - `ports`: Trait definitions for external operations
//! - `adapters`: Concrete implementations (file export, log sanitization)
//! - `application`: Use cases orchestrating domain and ports
//! - `tui`: Terminal user interface

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod tui;

pub use domain::{Assessment, AssessmentRequest, RiskCategory};

/// Result type for Adiposcope operations
pub type Result<T> = std::result::Result<T, AdiposcopeError>;

/// Main error type for Adiposcope
#[derive(Debug, thiserror::Error)]
pub enum AdiposcopeError {
    #[error("Invalid measurements: {0}")]
    Validation(String),

    /// Any `ReportSink` failure, whatever the adapter's own error type
    #[error("Report export failed: {0}")]
    Export(#[source] Box<dyn std::error::Error + Send + Sync>),
}
