//! Overall weight-related risk category.

use serde::{Deserialize, Serialize};

/// Risk category combining BMI, central adiposity and comorbidities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskCategory {
    /// BMI < 25
    Low,
    /// Overweight without abdominal obesity or comorbidities
    LowModerate,
    /// Overweight with abdominal obesity or comorbidities
    Moderate,
    /// Obese without abdominal obesity or comorbidities
    ModerateToHigh,
    /// Obese with abdominal obesity or comorbidities
    High,
    /// BMI could not be computed
    Undefined,
}

/// Display severity for a message block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlertLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// How intensive the suggested follow-up should be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReferralIntensity {
    /// Monitoring and prevention of weight gain
    FollowUp,
    /// Structured weight-loss programme
    Structured,
    /// Specialist referral, drug therapy or surgery
    Intensive,
}

impl RiskCategory {
    /// Get the management advice attached to the category.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::Low => "Low (advice: prevent weight gain)",
            Self::LowModerate => {
                "Low-moderate (advice: prevent weight gain and adjust lifestyle)"
            }
            Self::Moderate => {
                "Moderate (weight-loss counselling; medication or referral may be needed)"
            }
            Self::ModerateToHigh => {
                "Moderate-to-high (advice: active weight management, review risk factors)"
            }
            Self::High => {
                "High (intensive management: diet, activity, medication and possibly surgery)"
            }
            Self::Undefined => "undefined",
        }
    }

    /// Alert styling used when the category is displayed.
    #[must_use]
    pub fn alert_level(&self) -> AlertLevel {
        match self {
            Self::High | Self::ModerateToHigh => AlertLevel::Error,
            Self::Moderate | Self::LowModerate => AlertLevel::Warning,
            Self::Low | Self::Undefined => AlertLevel::Success,
        }
    }

    /// Referral intensity; any BMI of 35 or more is escalated to intensive.
    #[must_use]
    pub fn referral_intensity(&self, bmi: Option<f64>) -> ReferralIntensity {
        if bmi.is_some_and(|b| b >= 35.0) {
            return ReferralIntensity::Intensive;
        }
        match self {
            Self::High | Self::ModerateToHigh => ReferralIntensity::Intensive,
            Self::Moderate | Self::LowModerate => ReferralIntensity::Structured,
            Self::Low | Self::Undefined => ReferralIntensity::FollowUp,
        }
    }
}

impl std::fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "LOW"),
            Self::LowModerate => write!(f, "LOW-MODERATE"),
            Self::Moderate => write!(f, "MODERATE"),
            Self::ModerateToHigh => write!(f, "MODERATE-TO-HIGH"),
            Self::High => write!(f, "HIGH"),
            Self::Undefined => write!(f, "UNDEFINED"),
        }
    }
}

/// Determine the overall risk category. Rules are evaluated in order.
#[must_use]
pub fn determine_risk_category(
    bmi: Option<f64>,
    has_abdominal_obesity: bool,
    comorbidities_present: bool,
) -> RiskCategory {
    let Some(bmi) = bmi else {
        return RiskCategory::Undefined;
    };
    let aggravated = has_abdominal_obesity || comorbidities_present;

    if bmi < 25.0 {
        RiskCategory::Low
    } else if bmi < 30.0 {
        if aggravated {
            RiskCategory::Moderate
        } else {
            RiskCategory::LowModerate
        }
    } else if aggravated {
        RiskCategory::High
    } else {
        RiskCategory::ModerateToHigh
    }
}
