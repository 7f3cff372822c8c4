use serde::{Deserialize, Serialize};

/// Lending policy dials shared by the override gate and the reason tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyThresholds {
    /// EMI share of income (percent) above which approval is withheld outright.
    pub affordability_override_ratio: f64,
    /// EMI share (percent) cited as straining repayment on a model rejection.
    pub strained_ratio: f64,
    pub minimum_stable_income: f64,
    pub high_combined_income: f64,
    pub override_min_experience_years: f64,
    pub rejection_min_experience_years: f64,
    pub seasoned_experience_years: f64,
}

impl Default for PolicyThresholds {
    fn default() -> Self {
        Self {
            affordability_override_ratio: 80.0,
            strained_ratio: 60.0,
            minimum_stable_income: 25_000.0,
            high_combined_income: 60_000.0,
            override_min_experience_years: 1.0,
            rejection_min_experience_years: 2.0,
            seasoned_experience_years: 5.0,
        }
    }
}
