//! Display directives: the results page as a flat, UI-agnostic sequence.
//!
//! Any front end can render these in order; the TUI is one such renderer.

use crate::domain::recommendation::{display_value, LAB_TESTS};
use crate::domain::report::REPORT_FILE_NAME;
use crate::domain::{AlertLevel, Assessment};
use crate::ports::ReportArtifact;

/// One element of the results page.
#[derive(Debug, Clone, PartialEq)]
pub enum Directive {
    /// Section title
    Heading(String),
    /// Labelled headline metric
    Metric { label: String, value: String },
    /// Styled message block
    Message { level: AlertLevel, text: String },
    /// Plain text line
    Text(String),
    /// Downloadable artifact
    Download(ReportArtifact),
}

fn text(line: impl Into<String>) -> Directive {
    Directive::Text(line.into())
}

fn heading(title: &str) -> Directive {
    Directive::Heading(title.to_string())
}

/// Build the results page for an assessment and its formatted report.
#[must_use]
pub fn results_page(assessment: &Assessment, report_text: &str) -> Vec<Directive> {
    let m = &assessment.request.measurements;
    let metrics = &assessment.metrics;
    let mut page = Vec::new();

    page.push(heading("Overall results"));
    page.push(Directive::Metric {
        label: "BMI".to_string(),
        value: display_value(metrics.bmi),
    });
    page.push(text("BMI classification:"));
    page.push(Directive::Message {
        level: AlertLevel::Info,
        text: assessment.bmi_class.label.to_string(),
    });
    page.push(text(
        "Overall risk (based on BMI, central obesity and comorbidities):",
    ));
    page.push(Directive::Message {
        level: assessment.risk.alert_level(),
        text: assessment.risk.description().to_string(),
    });

    page.push(heading("Central measures"));
    let waist = m
        .waist()
        .map_or_else(|| "not entered".to_string(), |w| format!("{w}"));
    page.push(text(format!(
        "- Waist: {waist} cm (your reference threshold: {} cm)",
        assessment.threshold.cm
    )));
    page.push(text(format!(
        "- Waist-to-height ratio: {} (central risk indicated above 0.5)",
        display_value(metrics.waist_to_height)
    )));
    page.push(text(format!(
        "- Waist-to-hip ratio: {} (thresholds: male >= 0.90, female >= 0.85)",
        display_value(metrics.waist_to_hip)
    )));

    page.push(heading("Suggested tests and assessments"));
    if metrics.bmi.is_none() {
        page.push(text("BMI could not be computed; check the inputs."));
    } else if assessment.suggests_lab_tests() {
        page.push(text("- Suggested baseline tests:"));
        for test in LAB_TESTS {
            page.push(text(format!("  * {test}")));
        }
    } else {
        page.push(text(
            "- Given the current status, baseline tests may be needed depending on clinical history.",
        ));
    }

    page.push(heading("Practical recommendations (summary)"));
    for rec in &assessment.recommendations {
        page.push(text(format!("- {rec}")));
    }

    page.push(heading("Downloadable report"));
    page.push(Directive::Download(ReportArtifact::plain_text(
        REPORT_FILE_NAME,
        report_text,
    )));

    page.push(text("Source: UpToDate"));
    page
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AssessmentRequest, MeasurementInput, PopulationGroup, Sex};

    fn assessment(measurements: MeasurementInput) -> Assessment {
        Assessment::evaluate(AssessmentRequest {
            measurements,
            ..Default::default()
        })
    }

    fn texts(page: &[Directive]) -> Vec<&str> {
        page.iter()
            .filter_map(|d| match d {
                Directive::Text(t) => Some(t.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_low_risk_page() {
        let a = assessment(MeasurementInput::default());
        let page = results_page(&a, "report");

        assert_eq!(page[0], Directive::Heading("Overall results".to_string()));
        assert_eq!(
            page[1],
            Directive::Metric {
                label: "BMI".to_string(),
                value: "24.22".to_string()
            }
        );
        assert!(page.contains(&Directive::Message {
            level: AlertLevel::Success,
            text: a.risk.description().to_string(),
        }));

        let lines = texts(&page);
        assert!(lines.contains(&"- Waist: 85 cm (your reference threshold: 88 cm)"));
        assert!(lines
            .iter()
            .any(|l| l.starts_with("- Given the current status")));
        assert_eq!(lines.last(), Some(&"Source: UpToDate"));

        let download = page.iter().find_map(|d| match d {
            Directive::Download(artifact) => Some(artifact),
            _ => None,
        });
        let download = download.expect("page has a download");
        assert_eq!(download.file_name, "obesity_report.txt");
        assert_eq!(download.mime, "text/plain");
        assert_eq!(download.bytes, b"report");
    }

    #[test]
    fn test_high_risk_lists_lab_panel() {
        let a = assessment(MeasurementInput {
            weight_kg: 110.0,
            waist_cm: 110.0,
            sex: Sex::Male,
            population: PopulationGroup::Other,
            ..Default::default()
        });
        let page = results_page(&a, "");

        assert!(page.iter().any(|d| matches!(
            d,
            Directive::Message {
                level: AlertLevel::Error,
                ..
            }
        )));
        let lines = texts(&page);
        assert!(lines.contains(&"  * TSH"));
    }

    #[test]
    fn test_missing_measurements_render_markers() {
        let a = assessment(MeasurementInput {
            waist_cm: 0.0,
            hip_cm: 0.0,
            height_cm: 0.0,
            ..Default::default()
        });
        let page = results_page(&a, "");

        assert_eq!(
            page[1],
            Directive::Metric {
                label: "BMI".to_string(),
                value: "undefined".to_string()
            }
        );
        let lines = texts(&page);
        assert!(lines.contains(&"- Waist: not entered cm (your reference threshold: 88 cm)"));
        assert!(lines.contains(&"BMI could not be computed; check the inputs."));
    }
}
