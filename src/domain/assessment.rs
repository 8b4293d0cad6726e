//! Assessment request and result types.

use serde::{Deserialize, Serialize};

use super::classification::{classify_bmi, waist_threshold, BmiClass, WaistThreshold};
use super::recommendation::{
    display_value, generate_recommendations, lab_tests_indicated, RecommendationContext,
};
use super::report::ReportEntries;
use super::risk::{determine_risk_category, RiskCategory};
use super::{ComputedMetrics, MeasurementInput, MedicalHistory};

/// One form submission.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssessmentRequest {
    /// Optional display name (printed on the report only)
    pub name: Option<String>,

    pub measurements: MeasurementInput,

    pub history: MedicalHistory,
}

/// Everything computed from a request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assessment {
    pub request: AssessmentRequest,
    pub metrics: ComputedMetrics,
    pub bmi_class: BmiClass,
    pub threshold: WaistThreshold,
    pub has_abdominal_obesity: bool,
    pub risk: RiskCategory,
    pub recommendations: Vec<String>,
}

impl Assessment {
    /// Run the full computation for a request.
    #[must_use]
    pub fn evaluate(request: AssessmentRequest) -> Self {
        let m = &request.measurements;

        let metrics = ComputedMetrics::from_input(m);
        let bmi_class = classify_bmi(metrics.bmi, m.population);
        let threshold = waist_threshold(m.sex, m.population);
        let has_abdominal_obesity = m.waist().is_some_and(|w| threshold.is_exceeded_by(w));
        let risk = determine_risk_category(
            metrics.bmi,
            has_abdominal_obesity,
            request.history.has_comorbidities(),
        );

        let comorbidities = request.history.comorbidity_labels();
        let recommendations = generate_recommendations(&RecommendationContext {
            bmi: metrics.bmi,
            sex: m.sex,
            population: m.population,
            waist_cm: m.waist(),
            threshold,
            waist_to_height: metrics.waist_to_height,
            waist_to_hip: metrics.waist_to_hip,
            comorbidities: &comorbidities,
            takes_weight_promoting_medication: request.history.takes_weight_promoting_medication(),
            risk,
            age: m.age,
        });

        Self {
            request,
            metrics,
            bmi_class,
            threshold,
            has_abdominal_obesity,
            risk,
            recommendations,
        }
    }

    /// Whether the baseline lab panel is suggested.
    #[must_use]
    pub fn suggests_lab_tests(&self) -> bool {
        lab_tests_indicated(self.metrics.bmi, self.has_abdominal_obesity)
    }

    /// Input section of the report.
    #[must_use]
    pub fn input_entries(&self) -> ReportEntries {
        let m = &self.request.measurements;
        let history = &self.request.history;

        let comorbidities = history.comorbidity_labels();
        let medications: Vec<&str> = history
            .effective_medications()
            .iter()
            .map(|med| med.label())
            .collect();

        vec![
            ("Weight (kg)".to_string(), format!("{:.1}", m.weight_kg)),
            ("Height (cm)".to_string(), format!("{:.1}", m.height_cm)),
            ("Age".to_string(), m.age.to_string()),
            ("Sex".to_string(), m.sex.to_string()),
            ("Population group".to_string(), m.population.to_string()),
            ("Waist (cm)".to_string(), format!("{:.1}", m.waist_cm)),
            ("Hip (cm)".to_string(), format!("{:.1}", m.hip_cm)),
            (
                "Comorbidities".to_string(),
                join_or_none(&comorbidities),
            ),
            (
                "Weight-affecting medications".to_string(),
                join_or_none(&medications),
            ),
        ]
    }

    /// Results section of the report.
    #[must_use]
    pub fn result_entries(&self) -> ReportEntries {
        vec![
            ("BMI".to_string(), display_value(self.metrics.bmi)),
            ("BMI classification".to_string(), self.bmi_class.label.to_string()),
            (
                "Waist-to-height ratio".to_string(),
                display_value(self.metrics.waist_to_height),
            ),
            (
                "Waist-to-hip ratio".to_string(),
                display_value(self.metrics.waist_to_hip),
            ),
            (
                "Waist threshold (personal)".to_string(),
                format!("{} cm", self.threshold.cm),
            ),
            ("Overall risk category".to_string(), self.risk.description().to_string()),
        ]
    }
}

fn join_or_none<S: AsRef<str>>(items: &[S]) -> String {
    if items.is_empty() {
        "none".to_string()
    } else {
        items
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join(", ")
    }
}
