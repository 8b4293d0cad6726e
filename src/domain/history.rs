//! Medical and medication history.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Weight-related comorbidities offered as checkboxes on the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Comorbidity {
    Diabetes,
    Hypertension,
    Dyslipidemia,
    SleepApnea,
    HeartDisease,
    FattyLiver,
    Osteoarthritis,
}

impl Comorbidity {
    pub const ALL: [Comorbidity; 7] = [
        Comorbidity::Diabetes,
        Comorbidity::Hypertension,
        Comorbidity::Dyslipidemia,
        Comorbidity::SleepApnea,
        Comorbidity::HeartDisease,
        Comorbidity::FattyLiver,
        Comorbidity::Osteoarthritis,
    ];

    /// Checkbox caption shown on the form.
    #[must_use]
    pub fn form_label(&self) -> &'static str {
        match self {
            Self::Diabetes => "Type 2 diabetes (or high glucose/prediabetes)",
            Self::Hypertension => "High blood pressure",
            Self::Dyslipidemia => "Dyslipidemia (abnormal blood lipids)",
            Self::SleepApnea => "Obstructive sleep apnea",
            Self::HeartDisease => "Coronary heart disease (CHD)",
            Self::FattyLiver => "Fatty liver or raised liver enzymes",
            Self::Osteoarthritis => "Symptomatic osteoarthritis",
        }
    }

    /// Short name used in recommendations and the report.
    #[must_use]
    pub fn short_label(&self) -> &'static str {
        match self {
            Self::Diabetes => "diabetes/prediabetes",
            Self::Hypertension => "hypertension",
            Self::Dyslipidemia => "dyslipidemia",
            Self::SleepApnea => "sleep apnea",
            Self::HeartDisease => "heart disease",
            Self::FattyLiver => "fatty liver/raised enzymes",
            Self::Osteoarthritis => "osteoarthritis",
        }
    }
}

/// Medication classes known to promote weight gain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Medication {
    Insulin,
    Sulfonylureas,
    Thiazolidinediones,
    Glucocorticoids,
    Antipsychotics,
    /// "None / don't know"; exclusive with every other option
    NoneOrUnknown,
}

impl Medication {
    pub const ALL: [Medication; 6] = [
        Medication::Insulin,
        Medication::Sulfonylureas,
        Medication::Thiazolidinediones,
        Medication::Glucocorticoids,
        Medication::Antipsychotics,
        Medication::NoneOrUnknown,
    ];

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Insulin => "insulin",
            Self::Sulfonylureas => "sulfonylureas",
            Self::Thiazolidinediones => "thiazolidinediones (e.g. pioglitazone)",
            Self::Glucocorticoids => "glucocorticoids",
            Self::Antipsychotics => "some antipsychotics",
            Self::NoneOrUnknown => "none/don't know",
        }
    }
}

/// Reported comorbidities and medications.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicalHistory {
    /// Checked comorbidity boxes
    pub comorbidities: BTreeSet<Comorbidity>,

    /// Additional comorbidities typed in free text
    pub other_comorbidities: Vec<String>,

    /// Selected medications, in selection order
    pub medications: Vec<Medication>,
}

impl MedicalHistory {
    /// Split a comma-separated free-text list, dropping blank entries.
    #[must_use]
    pub fn parse_other_comorbidities(text: &str) -> Vec<String> {
        text.split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// All reported comorbidities: checkbox labels first, then free-text entries.
    #[must_use]
    pub fn comorbidity_labels(&self) -> Vec<String> {
        Comorbidity::ALL
            .iter()
            .filter(|c| self.comorbidities.contains(c))
            .map(|c| c.short_label().to_string())
            .chain(self.other_comorbidities.iter().cloned())
            .collect()
    }

    #[must_use]
    pub fn has_comorbidities(&self) -> bool {
        !self.comorbidities.is_empty() || !self.other_comorbidities.is_empty()
    }

    /// The selection after applying the "none/don't know" exclusivity rule.
    #[must_use]
    pub fn effective_medications(&self) -> Vec<Medication> {
        if self.medications.contains(&Medication::NoneOrUnknown) {
            vec![Medication::NoneOrUnknown]
        } else {
            self.medications.clone()
        }
    }

    /// Whether any actual weight-promoting medication is being taken.
    #[must_use]
    pub fn takes_weight_promoting_medication(&self) -> bool {
        self.effective_medications()
            .iter()
            .any(|m| *m != Medication::NoneOrUnknown)
    }
}
