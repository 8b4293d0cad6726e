//! Domain layer: Core assessment types and logic.
//!
//! Pure functions and value types only; nothing here performs I/O.
//! Pipeline: metrics → classification → risk → recommendation → report.

mod assessment;
pub mod classification;
mod history;
mod measurement;
pub mod metrics;
pub mod recommendation;
pub mod report;
pub mod risk;

pub use assessment::{Assessment, AssessmentRequest};
pub use classification::{BmiClass, WaistThreshold};
pub use history::{Comorbidity, MedicalHistory, Medication};
pub use measurement::{MeasurementInput, PopulationGroup, Sex};
pub use metrics::ComputedMetrics;
pub use risk::{AlertLevel, ReferralIntensity, RiskCategory};
