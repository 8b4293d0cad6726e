//! Assessment service: Orchestrates one submission end to end.
//!
//! This service coordinates:
//! - Input validation
//! - The pure assessment pipeline
//! - Report formatting
//! - Report export through the sink port

use std::path::PathBuf;
use std::sync::Arc;

use chrono::{Local, NaiveDateTime};

use crate::domain::report::{format_report, REPORT_FILE_NAME};
use crate::domain::{Assessment, AssessmentRequest};
use crate::ports::{ReportArtifact, ReportSink};
use crate::{AdiposcopeError, Result};

/// Service for running assessments and exporting their reports.
///
/// Holds no per-request state; every call is independent.
pub struct AssessmentService<R>
where
    R: ReportSink,
{
    sink: Arc<R>,
}

impl<R> AssessmentService<R>
where
    R: ReportSink,
{
    /// Create a new assessment service.
    pub fn new(sink: Arc<R>) -> Self {
        Self { sink }
    }

    /// Validate a submission and run the assessment pipeline.
    ///
    /// # Errors
    /// Returns a validation error listing every out-of-range field.
    pub fn assess(&self, request: AssessmentRequest) -> Result<Assessment> {
        if let Err(errors) = request.measurements.validate() {
            tracing::warn!("Rejected submission with {} invalid field(s)", errors.len());
            return Err(AdiposcopeError::Validation(errors.join(", ")));
        }

        tracing::debug!("Computing metrics and classification...");
        let assessment = Assessment::evaluate(request);

        tracing::debug!(
            "Classification ordinal={:?}, abdominal_obesity={}",
            assessment.bmi_class.ordinal,
            assessment.has_abdominal_obesity
        );
        tracing::info!(
            "Assessment complete: risk={}, recommendations={}",
            assessment.risk,
            assessment.recommendations.len()
        );

        Ok(assessment)
    }

    /// Format the plain-text report stamped with the current local time.
    #[must_use]
    pub fn report(&self, assessment: &Assessment) -> String {
        self.report_at(assessment, Local::now().naive_local())
    }

    /// Format the plain-text report with an explicit timestamp.
    #[must_use]
    pub fn report_at(&self, assessment: &Assessment, generated_at: NaiveDateTime) -> String {
        format_report(
            assessment.request.name.as_deref(),
            &assessment.input_entries(),
            &assessment.result_entries(),
            &assessment.recommendations,
            generated_at,
        )
    }

    /// Export a formatted report through the sink.
    ///
    /// # Errors
    /// Returns error if the sink cannot write the artifact.
    pub fn export_report(&self, report_text: &str) -> Result<PathBuf> {
        let artifact = ReportArtifact::plain_text(REPORT_FILE_NAME, report_text);
        self.sink.export(&artifact).map_err(|e| {
            tracing::error!("Report export failed: {}", e);
            AdiposcopeError::Export(Box::new(e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::FileReportSink;
    use crate::domain::{Comorbidity, MeasurementInput, MedicalHistory, PopulationGroup, Sex};
    use chrono::NaiveDate;
    use std::sync::Mutex;
    use tempfile::{tempdir, TempDir};

    fn create_test_service() -> (AssessmentService<FileReportSink>, TempDir) {
        let dir = tempdir().expect("Should create temp dir");
        let sink = Arc::new(FileReportSink::new(dir.path()));
        (AssessmentService::new(sink), dir)
    }

    fn asian_male_request() -> AssessmentRequest {
        AssessmentRequest {
            name: Some("Reza".to_string()),
            measurements: MeasurementInput {
                weight_kg: 80.0,
                height_cm: 165.0,
                waist_cm: 95.0,
                hip_cm: 0.0,
                age: 62,
                sex: Sex::Male,
                population: PopulationGroup::Asian,
            },
            history: MedicalHistory {
                comorbidities: [Comorbidity::Hypertension].into_iter().collect(),
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_rejects_invalid_measurements() {
        let (service, _dir) = create_test_service();
        let request = AssessmentRequest {
            measurements: MeasurementInput {
                height_cm: 10.0,
                ..Default::default()
            },
            ..Default::default()
        };

        let err = service.assess(request).expect_err("Should reject");
        assert!(matches!(err, AdiposcopeError::Validation(msg) if msg.contains("Height")));
    }

    #[test]
    fn test_assess_and_export_pipeline() {
        let (service, dir) = create_test_service();

        let assessment = service.assess(asian_male_request()).expect("Should assess");
        assert_eq!(assessment.metrics.bmi, Some(29.38));

        let generated_at = NaiveDate::from_ymd_opt(2026, 10, 15)
            .and_then(|d| d.and_hms_opt(8, 30, 0))
            .expect("valid timestamp");
        let report = service.report_at(&assessment, generated_at);

        assert!(report.starts_with(
            "Name: Reza\nObesity assessment report, generated at 2026-10-15 08:30:00\n"
        ));
        assert!(report.contains("BMI: 29.38\n"));
        assert!(report.contains("BMI classification: Obesity I-II (Asian)\n"));
        assert!(report.contains("Waist-to-hip ratio: undefined\n"));
        assert!(report.contains("Comorbidities: hypertension\n"));
        assert!(report.contains("Overall risk category: Moderate"));

        let last = assessment.recommendations.len();
        assert!(report.contains(&format!("\n{last}. Important:")));

        let path = service.export_report(&report).expect("Should export");
        assert_eq!(path, dir.path().join("obesity_report.txt"));
        assert_eq!(std::fs::read_to_string(path).expect("Should read"), report);
    }

    #[test]
    fn test_export_failure_is_reported() {
        let dir = tempdir().expect("Should create temp dir");
        let sink = Arc::new(FileReportSink::new(dir.path().join("missing")));
        let service = AssessmentService::new(sink);

        let err = service.export_report("text").expect_err("Should fail");
        assert!(matches!(err, AdiposcopeError::Export(_)));
        assert!(err.to_string().starts_with("Report export failed: Export directory"));
    }

    /// In-memory sink with its own error type.
    #[derive(Default)]
    struct MemorySink {
        artifacts: Mutex<Vec<ReportArtifact>>,
        offline: bool,
    }

    #[derive(Debug, thiserror::Error)]
    #[error("sink offline")]
    struct SinkOffline;

    impl ReportSink for MemorySink {
        type Error = SinkOffline;

        fn export(&self, artifact: &ReportArtifact) -> std::result::Result<PathBuf, SinkOffline> {
            if self.offline {
                return Err(SinkOffline);
            }
            let mut artifacts = self.artifacts.lock().map_err(|_| SinkOffline)?;
            artifacts.push(artifact.clone());
            Ok(PathBuf::from(&artifact.file_name))
        }
    }

    #[test]
    fn test_any_sink_error_type_is_accepted() {
        let sink = Arc::new(MemorySink::default());
        let service = AssessmentService::new(sink.clone());
        let path = service.export_report("report body").expect("Should export");
        assert_eq!(path, PathBuf::from("obesity_report.txt"));
        let artifacts = sink.artifacts.lock().expect("lock");
        assert_eq!(artifacts[0].bytes, b"report body");
        drop(artifacts);

        let offline = AssessmentService::new(Arc::new(MemorySink {
            offline: true,
            ..Default::default()
        }));
        let err = offline.export_report("x").expect_err("Should fail");
        let AdiposcopeError::Export(source) = err else {
            panic!("expected export error");
        };
        assert!(source.downcast_ref::<SinkOffline>().is_some());
    }
}
