//! Application layer: Use cases and services.
//!
//! This module orchestrates domain logic with ports to implement
//! the assessment use case and its presentation.

mod assessment;
pub mod directives;

pub use assessment::AssessmentService;
pub use directives::{results_page, Directive};
