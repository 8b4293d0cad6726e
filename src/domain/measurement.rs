//! Anthropometric input types.
//!
//! Values arrive already parsed from the form; `validate` reproduces the
//! input-layer bounds so the core never sees out-of-range numbers.

use serde::{Deserialize, Serialize};

/// Biological sex as selected on the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Sex {
    #[default]
    Female,
    Male,
    /// Other / prefer not to say
    Other,
}

impl Sex {
    pub const ALL: [Sex; 3] = [Sex::Female, Sex::Male, Sex::Other];
}

impl std::fmt::Display for Sex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Female => write!(f, "Female"),
            Self::Male => write!(f, "Male"),
            Self::Other => write!(f, "Other/prefer not to say"),
        }
    }
}

/// Population group used to pick BMI and waist thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PopulationGroup {
    Asian,
    /// White, Hispanic, Black and all other groups
    #[default]
    Other,
}

impl PopulationGroup {
    pub const ALL: [PopulationGroup; 2] = [PopulationGroup::Other, PopulationGroup::Asian];
}

impl std::fmt::Display for PopulationGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Asian => write!(f, "Asian"),
            Self::Other => write!(f, "White/Hispanic/Black/Other"),
        }
    }
}

/// Raw body measurements for one assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementInput {
    /// Body weight in kg
    pub weight_kg: f64,

    /// Standing height in cm
    pub height_cm: f64,

    /// Waist circumference in cm (0 = not measured)
    pub waist_cm: f64,

    /// Hip circumference in cm (0 = not measured)
    pub hip_cm: f64,

    /// Age in whole years
    pub age: u32,

    pub sex: Sex,

    pub population: PopulationGroup,
}

impl Default for MeasurementInput {
    fn default() -> Self {
        Self {
            weight_kg: 70.0,
            height_cm: 170.0,
            waist_cm: 85.0,
            hip_cm: 100.0,
            age: 35,
            sex: Sex::Female,
            population: PopulationGroup::Other,
        }
    }
}

impl MeasurementInput {
    /// Waist circumference, if one was entered.
    #[must_use]
    pub fn waist(&self) -> Option<f64> {
        (self.waist_cm > 0.0).then_some(self.waist_cm)
    }

    /// Hip circumference, if one was entered.
    #[must_use]
    pub fn hip(&self) -> Option<f64> {
        (self.hip_cm > 0.0).then_some(self.hip_cm)
    }

    /// Validate that all measurements are within the form's accepted ranges.
    ///
    /// # Errors
    /// Returns every violation found, one message per field.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.age > 120 {
            errors.push(format!("Age {} out of range [0, 120]", self.age));
        }
        if !(1.0..=500.0).contains(&self.weight_kg) {
            errors.push(format!("Weight {} out of range [1, 500]", self.weight_kg));
        }
        if !(30.0..=300.0).contains(&self.height_cm) {
            errors.push(format!("Height {} out of range [30, 300]", self.height_cm));
        }
        if !(0.0..=300.0).contains(&self.waist_cm) {
            errors.push(format!(
                "Waist circumference {} out of range [0, 300]",
                self.waist_cm
            ));
        }
        if !(0.0..=300.0).contains(&self.hip_cm) {
            errors.push(format!(
                "Hip circumference {} out of range [0, 300]",
                self.hip_cm
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
