//! Body-composition metrics: BMI and the two central-adiposity ratios.
//!
//! Every function is total. A metric that cannot be computed is `None`,
//! never a numeric placeholder.

use serde::{Deserialize, Serialize};

use super::MeasurementInput;

/// Round to two decimal places.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Body-mass index: weight (kg) / height (m)², rounded to 2 dp.
///
/// Returns `None` when `height_cm <= 0`.
#[must_use]
pub fn compute_bmi(weight_kg: f64, height_cm: f64) -> Option<f64> {
    let height_m = height_cm / 100.0;
    if height_m <= 0.0 {
        return None;
    }
    Some(round2(weight_kg / (height_m * height_m)))
}

/// Waist-to-height ratio (same units), rounded to 2 dp.
///
/// Returns `None` when height is not positive or no waist was measured.
#[must_use]
pub fn waist_to_height_ratio(waist_cm: f64, height_cm: f64) -> Option<f64> {
    if height_cm <= 0.0 || waist_cm <= 0.0 {
        return None;
    }
    Some(round2(waist_cm / height_cm))
}

/// Waist-to-hip ratio, rounded to 2 dp.
///
/// Returns `None` when hip or waist was not measured.
#[must_use]
pub fn waist_to_hip_ratio(waist_cm: f64, hip_cm: f64) -> Option<f64> {
    if hip_cm <= 0.0 || waist_cm <= 0.0 {
        return None;
    }
    Some(round2(waist_cm / hip_cm))
}

/// Metrics derived from one set of measurements.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComputedMetrics {
    pub bmi: Option<f64>,
    pub waist_to_height: Option<f64>,
    pub waist_to_hip: Option<f64>,
}

impl ComputedMetrics {
    #[must_use]
    pub fn from_input(input: &MeasurementInput) -> Self {
        Self {
            bmi: compute_bmi(input.weight_kg, input.height_cm),
            waist_to_height: input
                .waist()
                .and_then(|waist| waist_to_height_ratio(waist, input.height_cm)),
            waist_to_hip: input
                .waist()
                .zip(input.hip())
                .and_then(|(waist, hip)| waist_to_hip_ratio(waist, hip)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bmi_formula() {
        assert_eq!(compute_bmi(70.0, 170.0), Some(24.22));
        assert_eq!(compute_bmi(80.0, 165.0), Some(29.38));
        assert_eq!(compute_bmi(100.0, 200.0), Some(25.0));
    }

    #[test]
    fn test_bmi_matches_definition_across_inputs() {
        for weight in [1.0, 45.5, 70.0, 123.4, 500.0] {
            for height in [30.0, 150.0, 172.5, 210.0, 300.0] {
                let expected = weight / ((height / 100.0) * (height / 100.0));
                let bmi = compute_bmi(weight, height).expect("height is positive");
                assert!((bmi - expected).abs() <= 0.005 + 1e-9, "{weight}/{height}");
            }
        }
    }

    #[test]
    fn test_bmi_undefined_for_non_positive_height() {
        assert_eq!(compute_bmi(70.0, 0.0), None);
        assert_eq!(compute_bmi(70.0, -5.0), None);
    }

    #[test]
    fn test_ratios() {
        assert_eq!(waist_to_height_ratio(85.0, 170.0), Some(0.5));
        assert_eq!(waist_to_height_ratio(85.0, 0.0), None);
        assert_eq!(waist_to_height_ratio(0.0, 170.0), None);

        assert_eq!(waist_to_hip_ratio(85.0, 100.0), Some(0.85));
        assert_eq!(waist_to_hip_ratio(85.0, 0.0), None);
        assert_eq!(waist_to_hip_ratio(0.0, 100.0), None);
    }

    #[test]
    fn test_from_input_without_waist() {
        let input = MeasurementInput {
            waist_cm: 0.0,
            ..Default::default()
        };
        let metrics = ComputedMetrics::from_input(&input);
        assert_eq!(metrics.bmi, Some(24.22));
        assert!(metrics.waist_to_height.is_none());
        assert!(metrics.waist_to_hip.is_none());
    }
}
