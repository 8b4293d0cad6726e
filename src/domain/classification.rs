//! BMI classification and waist-circumference thresholds.
//!
//! WHO/NIH cut-offs, with the lowered thresholds used for Asian populations.

use serde::Serialize;

use super::{PopulationGroup, Sex};

/// Label used wherever a value could not be computed.
pub const UNDEFINED: &str = "undefined";

/// BMI band with its ordinal class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BmiClass {
    pub label: &'static str,

    /// Ordinal in `-1..=4`; `None` when BMI is undefined
    pub ordinal: Option<i8>,
}

impl BmiClass {
    const fn new(label: &'static str, ordinal: i8) -> Self {
        Self {
            label,
            ordinal: Some(ordinal),
        }
    }

    pub const UNDEFINED: BmiClass = BmiClass {
        label: UNDEFINED,
        ordinal: None,
    };
}

/// Classify a BMI value for the given population group.
///
/// Bands are closed on the lower edge and open on the upper edge.
#[must_use]
pub fn classify_bmi(bmi: Option<f64>, population: PopulationGroup) -> BmiClass {
    let Some(bmi) = bmi else {
        return BmiClass::UNDEFINED;
    };

    match population {
        PopulationGroup::Asian => {
            if bmi < 23.0 {
                BmiClass::new("Normal weight", 0)
            } else if bmi < 25.0 {
                BmiClass::new("Overweight (Asian)", 1)
            } else if bmi < 30.0 {
                BmiClass::new("Obesity I-II (Asian)", 2)
            } else {
                BmiClass::new("Severe obesity (Asian)", 3)
            }
        }
        PopulationGroup::Other => {
            if bmi < 18.5 {
                BmiClass::new("Underweight", -1)
            } else if bmi < 25.0 {
                BmiClass::new("Normal weight", 0)
            } else if bmi < 30.0 {
                BmiClass::new("Overweight", 1)
            } else if bmi < 35.0 {
                BmiClass::new("Obesity (Class I)", 2)
            } else if bmi < 40.0 {
                BmiClass::new("Obesity (Class II)", 3)
            } else {
                BmiClass::new("Severe obesity (Class III)", 4)
            }
        }
    }
}

/// Waist circumference at or above which abdominal obesity is flagged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WaistThreshold {
    pub cm: u32,
    pub label: &'static str,
}

impl WaistThreshold {
    /// Whether a measured waist meets the threshold.
    #[must_use]
    pub fn is_exceeded_by(&self, waist_cm: f64) -> bool {
        waist_cm >= f64::from(self.cm)
    }
}

/// Waist threshold for a sex and population group.
///
/// `Sex::Other` uses the female (lower, more sensitive) threshold.
#[must_use]
pub fn waist_threshold(sex: Sex, population: PopulationGroup) -> WaistThreshold {
    match (population, sex) {
        (PopulationGroup::Asian, Sex::Male) => WaistThreshold {
            cm: 90,
            label: "Increased risk (Asian, male)",
        },
        (PopulationGroup::Asian, Sex::Female | Sex::Other) => WaistThreshold {
            cm: 80,
            label: "Increased risk (Asian, female)",
        },
        (PopulationGroup::Other, Sex::Male) => WaistThreshold {
            cm: 102,
            label: "Increased risk (non-Asian, male)",
        },
        (PopulationGroup::Other, Sex::Female | Sex::Other) => WaistThreshold {
            cm: 88,
            label: "Increased risk (non-Asian, female)",
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ordinal(bmi: f64, population: PopulationGroup) -> i8 {
        classify_bmi(Some(bmi), population)
            .ordinal
            .expect("defined BMI has an ordinal")
    }

    #[test]
    fn test_other_boundaries() {
        let other = PopulationGroup::Other;
        assert_eq!(ordinal(18.49, other), -1);
        assert_eq!(ordinal(18.5, other), 0);
        assert_eq!(ordinal(24.99, other), 0);
        assert_eq!(classify_bmi(Some(25.0), other).label, "Overweight");
        assert_eq!(ordinal(30.0, other), 2);
        assert_eq!(ordinal(35.0, other), 3);
        assert_eq!(ordinal(40.0, other), 4);
        assert_eq!(ordinal(0.0, other), -1);
    }

    #[test]
    fn test_asian_boundaries() {
        let asian = PopulationGroup::Asian;
        assert_eq!(ordinal(10.0, asian), 0);
        assert_eq!(ordinal(22.99, asian), 0);
        assert_eq!(ordinal(23.0, asian), 1);
        assert_eq!(ordinal(25.0, asian), 2);
        assert_eq!(classify_bmi(Some(29.38), asian).label, "Obesity I-II (Asian)");
        assert_eq!(ordinal(30.0, asian), 3);
        assert_eq!(ordinal(55.0, asian), 3);
    }

    #[test]
    fn test_ordinal_is_monotonic() {
        for population in PopulationGroup::ALL {
            let mut previous = i8::MIN;
            for step in 0..=6000 {
                let bmi = f64::from(step) / 100.0;
                let current = ordinal(bmi, population);
                assert!(current >= previous, "{population:?} at {bmi}");
                previous = current;
            }
        }
    }

    #[test]
    fn test_undefined_bmi() {
        let class = classify_bmi(None, PopulationGroup::Other);
        assert_eq!(class, BmiClass::UNDEFINED);
    }

    #[test]
    fn test_waist_thresholds() {
        assert_eq!(waist_threshold(Sex::Male, PopulationGroup::Asian).cm, 90);
        assert_eq!(waist_threshold(Sex::Female, PopulationGroup::Asian).cm, 80);
        assert_eq!(waist_threshold(Sex::Male, PopulationGroup::Other).cm, 102);
        assert_eq!(waist_threshold(Sex::Female, PopulationGroup::Other).cm, 88);
    }

    #[test]
    fn test_other_sex_uses_lower_threshold() {
        for population in PopulationGroup::ALL {
            assert_eq!(
                waist_threshold(Sex::Other, population),
                waist_threshold(Sex::Female, population)
            );
        }
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let threshold = waist_threshold(Sex::Female, PopulationGroup::Other);
        assert!(threshold.is_exceeded_by(88.0));
        assert!(!threshold.is_exceeded_by(87.9));
    }
}
