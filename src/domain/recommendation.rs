//! Advisory text generation.
//!
//! The output order is the presentation order and must stay fixed.

use super::classification::{WaistThreshold, UNDEFINED};
use super::risk::{ReferralIntensity, RiskCategory};
use super::{PopulationGroup, Sex};

/// BMI band (general cut-offs) in which Asian individuals get the lower-threshold note.
const ASIAN_CAVEAT_BMI: std::ops::Range<f64> = 25.0..30.0;

/// Waist-to-height ratio above which central adiposity is flagged.
pub const WAIST_TO_HEIGHT_CUTOFF: f64 = 0.5;

/// Baseline laboratory panel suggested for at-risk individuals.
pub const LAB_TESTS: [&str; 4] = [
    "Fasting glucose and/or HbA1c",
    "TSH",
    "Liver enzymes (ALT, AST)",
    "Fasting lipid panel",
];

/// Waist-to-hip ratio at or above which metabolic risk rises.
///
/// `Sex::Other` uses the female cutoff, matching the waist threshold policy.
#[must_use]
pub fn waist_to_hip_cutoff(sex: Sex) -> f64 {
    match sex {
        Sex::Male => 0.90,
        Sex::Female | Sex::Other => 0.85,
    }
}

/// Whether the baseline lab panel should be suggested.
///
/// An undefined BMI never triggers the panel.
#[must_use]
pub fn lab_tests_indicated(bmi: Option<f64>, has_abdominal_obesity: bool) -> bool {
    bmi.is_some_and(|bmi| bmi >= 25.0 || has_abdominal_obesity)
}

/// Render an optional metric, using the explicit undefined marker.
#[must_use]
pub fn display_value(value: Option<f64>) -> String {
    value.map_or_else(|| UNDEFINED.to_string(), |v| v.to_string())
}

/// Everything the generator needs, computed by the earlier stages.
#[derive(Debug, Clone)]
pub struct RecommendationContext<'a> {
    pub bmi: Option<f64>,
    pub sex: Sex,
    pub population: PopulationGroup,
    /// Waist in cm, `None` when not measured
    pub waist_cm: Option<f64>,
    pub threshold: WaistThreshold,
    pub waist_to_height: Option<f64>,
    pub waist_to_hip: Option<f64>,
    pub comorbidities: &'a [String],
    pub takes_weight_promoting_medication: bool,
    pub risk: RiskCategory,
    pub age: u32,
}

impl RecommendationContext<'_> {
    /// Waist measured and at or above the personal threshold.
    #[must_use]
    pub fn has_abdominal_obesity(&self) -> bool {
        self.waist_cm
            .is_some_and(|waist| self.threshold.is_exceeded_by(waist))
    }

    #[must_use]
    pub fn suggests_lab_tests(&self) -> bool {
        lab_tests_indicated(self.bmi, self.has_abdominal_obesity())
    }
}

/// Build the ordered list of recommendations.
#[must_use]
pub fn generate_recommendations(ctx: &RecommendationContext<'_>) -> Vec<String> {
    let mut recs = Vec::new();

    push_bmi_status(&mut recs, ctx);

    if let Some(waist) = ctx.waist_cm {
        if ctx.threshold.is_exceeded_by(waist) {
            recs.push(format!(
                "Waist circumference: {waist} cm is at or above the recommended threshold ({} cm) for your group, indicating increased metabolic risk.",
                ctx.threshold.cm
            ));
        } else {
            recs.push(format!(
                "Waist circumference: {waist} cm is below the {} cm threshold.",
                ctx.threshold.cm
            ));
        }
    }

    if let Some(ratio) = ctx.waist_to_height {
        if ratio > WAIST_TO_HEIGHT_CUTOFF {
            recs.push(format!(
                "Waist-to-height ratio = {ratio} (>0.5): indicates central obesity and increased risk."
            ));
        } else {
            recs.push(format!(
                "Waist-to-height ratio = {ratio} (<=0.5): central proportions are closer to normal."
            ));
        }
    }

    if let Some(ratio) = ctx.waist_to_hip {
        if ratio >= waist_to_hip_cutoff(ctx.sex) {
            recs.push(format!(
                "Waist-to-hip ratio = {ratio}: in the range where metabolic risk increases."
            ));
        } else {
            recs.push(format!(
                "Waist-to-hip ratio = {ratio}: below the general threshold."
            ));
        }
    }

    if ctx.suggests_lab_tests() {
        recs.push(format!(
            "Suggested initial tests: {}.",
            LAB_TESTS.join(", ")
        ));
    } else {
        recs.push(
            "At low risk, baseline tests should be decided from personal and clinical history."
                .to_string(),
        );
    }

    if !ctx.comorbidities.is_empty() {
        recs.push(format!(
            "Reported comorbidities: {}. These raise the overall risk and should be managed alongside weight.",
            ctx.comorbidities.join(", ")
        ));
    }

    if ctx.takes_weight_promoting_medication {
        recs.push(
            "Medications that can cause weight gain should be reviewed (e.g. insulin, sulfonylureas, thiazolidinediones, glucocorticoids, some antipsychotics). Discuss alternatives with the prescriber where possible."
                .to_string(),
        );
    }

    recs.push(referral_note(ctx.risk.referral_intensity(ctx.bmi)).to_string());

    if ctx.age >= 60 {
        recs.push(
            "Age 60 and over: BMI may under-represent body fat because of reduced muscle mass. Waist measurement and functional assessment matter more."
                .to_string(),
        );
    }

    recs.push(
        "Important: this output is guidance only and does not replace an in-person medical consultation. Consult your physician about any concerns or underlying conditions."
            .to_string(),
    );

    recs
}

fn push_bmi_status(recs: &mut Vec<String>, ctx: &RecommendationContext<'_>) {
    let Some(bmi) = ctx.bmi else {
        recs.push(format!("BMI is {UNDEFINED}. Check the entered weight and height."));
        return;
    };

    if ctx.population == PopulationGroup::Asian && ASIAN_CAVEAT_BMI.contains(&bmi) {
        recs.push(
            "Note: thresholds are lower for Asian individuals; a BMI in this range may carry more metabolic risk."
                .to_string(),
        );
    }

    let status = if bmi < 25.0 {
        "Status: BMI in the normal or underweight range. Advice: prevent weight gain with balanced nutrition and regular physical activity."
    } else if bmi < 30.0 {
        "Status: overweight. Advice: nutrition and activity counselling; if waist is high or related diseases are present, further evaluation and targeted treatment are needed."
    } else {
        "Status: obesity (BMI >= 30). Advice: active management including lifestyle change, behavioural interventions, consideration of anti-obesity medication and evaluation for surgical options where appropriate."
    };
    recs.push(status.to_string());
}

fn referral_note(intensity: ReferralIntensity) -> &'static str {
    match intensity {
        ReferralIntensity::Intensive => {
            "Referral: consider intensive management, with referral to a clinical dietitian, obesity clinic or metabolic surgeon where appropriate, and discussion of drug or surgical treatment if indicated."
        }
        ReferralIntensity::Structured => {
            "For moderate risk: a structured weight-loss programme with regular follow-up; medication or referral to a specialist programme may be appropriate."
        }
        ReferralIntensity::FollowUp => {
            "For lower risk: follow-up and prevention of weight gain, with lifestyle education."
        }
    }
}
