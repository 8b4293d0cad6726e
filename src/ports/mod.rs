//! Ports layer: Trait definitions for external operations.
//!
//! Following Hexagonal Architecture, these traits define the boundaries
//! between the assessment core and the outside world.

mod report_sink;

pub use report_sink::{ReportArtifact, ReportSink};
