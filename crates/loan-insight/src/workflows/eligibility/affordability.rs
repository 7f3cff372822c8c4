use serde::{Deserialize, Serialize};

use super::domain::ApplicantProfile;

/// Equated monthly installment for an amortizing loan.
///
/// A zero periodic rate or a zero term yields `0.0` instead of dividing by zero.
/// Uses the discount form so very long terms converge to `principal * rate` rather
/// than overflowing. Extreme inputs can still produce a non-finite result; see
/// [`AffordabilityAssessment::is_finite`].
pub fn monthly_installment(principal: f64, annual_rate_percent: f64, term_months: u32) -> f64 {
    let rate = annual_rate_percent / (12.0 * 100.0);
    if rate == 0.0 || term_months == 0 {
        return 0.0;
    }

    let discount = (1.0 + rate).powf(-f64::from(term_months));
    principal * rate / (1.0 - discount)
}

/// Installment as a percentage of declared monthly income, flooring the income at 1.
pub fn affordability_ratio_percent(installment: f64, total_income: f64) -> f64 {
    100.0 * installment / total_income.max(1.0)
}

/// Installment and its share of the household's income.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AffordabilityAssessment {
    pub installment: f64,
    pub ratio_percent: f64,
    pub total_income: f64,
}

impl AffordabilityAssessment {
    pub fn for_profile(profile: &ApplicantProfile) -> Self {
        let installment = monthly_installment(
            profile.loan_amount,
            profile.interest_rate_percent,
            profile.loan_term_months,
        );
        let total_income = profile.total_income();

        Self {
            installment,
            ratio_percent: affordability_ratio_percent(installment, total_income),
            total_income,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.installment.is_finite() && self.ratio_percent.is_finite()
    }
}
