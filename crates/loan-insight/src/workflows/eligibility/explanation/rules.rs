use serde::{Deserialize, Serialize};

use super::super::affordability::AffordabilityAssessment;
use super::super::domain::ApplicantProfile;
use super::config::PolicyThresholds;
use super::format::{currency, currency_truncated, percent, years};
use super::policy::exceeds_override_ratio;

/// Stable identifier for every reason the explainer can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReasonCode {
    InstallmentBurden,
    ExceedsSafeRepayment,
    NoPriorCreditHistory,
    ExperienceBelowStableRange,
    SelfEmployedDocumentation,
    ManageableRatio,
    StrongCreditHistory,
    NoCreditButStrongIndicators,
    HighCombinedIncome,
    SeasonedExperience,
    SalariedStability,
    FavorableArea,
    RepaymentStrain,
    LimitedCreditHistory,
    IncomeBelowStability,
    LimitedExperience,
    SelfEmployedScrutiny,
    UnalignedParameters,
}

/// Inputs every predicate and template may read.
pub(crate) struct RuleContext<'a> {
    pub profile: &'a ApplicantProfile,
    pub affordability: &'a AffordabilityAssessment,
    pub thresholds: &'a PolicyThresholds,
}

/// One row of a branch table: when `applies`, emit `reason` and the paired improvement.
pub(crate) struct ReasonRule {
    pub code: ReasonCode,
    pub applies: for<'a> fn(&RuleContext<'a>) -> bool,
    pub reason: for<'a> fn(&RuleContext<'a>) -> String,
    pub improvement: Option<&'static str>,
}

/// Reason produced by a rule whose predicate held.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct FiredRule {
    pub code: ReasonCode,
    pub reason: String,
    pub improvement: Option<&'static str>,
}

/// Evaluates rows in table order, keeping the ones whose predicate holds.
pub(crate) fn evaluate(table: &[ReasonRule], context: &RuleContext<'_>) -> Vec<FiredRule> {
    table
        .iter()
        .filter(|rule| (rule.applies)(context))
        .map(|rule| FiredRule {
            code: rule.code,
            reason: (rule.reason)(context),
            improvement: rule.improvement,
        })
        .collect()
}

fn always(_: &RuleContext<'_>) -> bool {
    true
}

fn lacks_credit_history(context: &RuleContext<'_>) -> bool {
    !context.profile.credit_history.is_established()
}

fn is_self_employed(context: &RuleContext<'_>) -> bool {
    context.profile.employment_type.is_self_employed()
}

pub(crate) const OVERRIDE_SUMMARY: &str = "Loan not approved — estimated EMI exceeds safe affordability range as per your declared income and model risk profile.";

pub(crate) const OVERRIDE_RULES: &[ReasonRule] = &[
    ReasonRule {
        code: ReasonCode::InstallmentBurden,
        applies: always,
        reason: |ctx| {
            format!(
                "Estimated EMI is {}, forming {}% of your total monthly income {}.",
                currency(ctx.affordability.installment),
                percent(ctx.affordability.ratio_percent),
                currency(ctx.affordability.total_income)
            )
        },
        improvement: None,
    },
    ReasonRule {
        code: ReasonCode::ExceedsSafeRepayment,
        applies: |ctx| exceeds_override_ratio(ctx.affordability.ratio_percent, ctx.thresholds),
        reason: |ctx| {
            format!(
                "This exceeds the model’s safe repayment threshold ({}% of total income).",
                ctx.thresholds.affordability_override_ratio
            )
        },
        improvement: None,
    },
    ReasonRule {
        code: ReasonCode::NoPriorCreditHistory,
        applies: lacks_credit_history,
        reason: |_| "No prior credit history makes risk evaluation harder for the model.".to_string(),
        improvement: None,
    },
    ReasonRule {
        code: ReasonCode::ExperienceBelowStableRange,
        applies: |ctx| {
            ctx.profile.years_of_experience < ctx.thresholds.override_min_experience_years
        },
        reason: |ctx| {
            format!(
                "Work experience of {:.1} years is below the stable range typically seen in approvals.",
                ctx.profile.years_of_experience
            )
        },
        improvement: None,
    },
    ReasonRule {
        code: ReasonCode::SelfEmployedDocumentation,
        applies: is_self_employed,
        reason: |_| {
            "Self-employed applicants must provide verified, consistent income documentation."
                .to_string()
        },
        improvement: None,
    },
];

pub(crate) const OVERRIDE_IMPROVEMENTS: &[&str] = &[
    "Reduce loan amount or increase repayment tenure to lower EMI burden.",
    "Add a co-applicant with stable income to share repayment responsibility.",
    "Build credit score by maintaining consistent credit card or small loan repayments.",
    "Reapply after 12+ months of steady employment and income growth.",
];

pub(crate) const APPROVAL_SUMMARY: &str = "Congratulations — your loan is likely to be approved.";

/// Rows after `NoCreditButStrongIndicators` only apply without a credit history.
pub(crate) const APPROVAL_RULES: &[ReasonRule] = &[
    ReasonRule {
        code: ReasonCode::ManageableRatio,
        applies: always,
        reason: |ctx| {
            format!(
                "Your EMI-to-income ratio ({}%) is within a manageable range.",
                percent(ctx.affordability.ratio_percent)
            )
        },
        improvement: None,
    },
    ReasonRule {
        code: ReasonCode::StrongCreditHistory,
        applies: |ctx| ctx.profile.credit_history.is_established(),
        reason: |_| "Strong credit history shows reliable repayment behavior.".to_string(),
        improvement: None,
    },
    ReasonRule {
        code: ReasonCode::NoCreditButStrongIndicators,
        applies: lacks_credit_history,
        reason: |_| {
            "No established credit history, but other financial indicators are strong."
                .to_string()
        },
        improvement: None,
    },
    ReasonRule {
        code: ReasonCode::HighCombinedIncome,
        applies: |ctx| {
            lacks_credit_history(ctx)
                && ctx.affordability.total_income >= ctx.thresholds.high_combined_income
        },
        reason: |_| "High combined income supports repayment capacity.".to_string(),
        improvement: None,
    },
    ReasonRule {
        code: ReasonCode::SeasonedExperience,
        applies: |ctx| {
            lacks_credit_history(ctx)
                && ctx.profile.years_of_experience >= ctx.thresholds.seasoned_experience_years
        },
        reason: |ctx| {
            format!(
                "{} years of experience indicates long-term financial stability.",
                years(ctx.profile.years_of_experience)
            )
        },
        improvement: None,
    },
    ReasonRule {
        code: ReasonCode::SalariedStability,
        applies: |ctx| lacks_credit_history(ctx) && ctx.profile.employment_type.is_salaried(),
        reason: |_| "Salaried employment provides stable monthly income.".to_string(),
        improvement: None,
    },
    ReasonRule {
        code: ReasonCode::FavorableArea,
        applies: |ctx| lacks_credit_history(ctx) && ctx.profile.property_area.is_favorable(),
        reason: |ctx| {
            format!(
                "Property located in a favorable {} area improves loan security.",
                ctx.profile.property_area.label()
            )
        },
        improvement: None,
    },
];

pub(crate) const APPROVAL_IMPROVEMENTS: &[&str] = &[
    "Proceed with document verification and final loan offer discussion.",
    "Keep salary slips, ID proof, and bank statements ready for verification.",
    "Review EMI schedule and discuss flexible tenure options with your loan officer.",
];

pub(crate) const REJECTION_SUMMARY: &str =
    "Loan not approved — model identified risk factors affecting your eligibility.";

pub(crate) const REJECTION_RULES: &[ReasonRule] = &[
    ReasonRule {
        code: ReasonCode::RepaymentStrain,
        applies: |ctx| ctx.affordability.ratio_percent > ctx.thresholds.strained_ratio,
        reason: |ctx| {
            format!(
                "EMI forms {}% of your monthly income, which may strain repayment capacity.",
                percent(ctx.affordability.ratio_percent)
            )
        },
        improvement: Some("Reduce loan amount or extend tenure to lower monthly EMI."),
    },
    ReasonRule {
        code: ReasonCode::LimitedCreditHistory,
        applies: lacks_credit_history,
        reason: |_| "Credit history is limited or shows inconsistent repayment patterns.".to_string(),
        improvement: Some("Maintain consistent payments to build a positive credit history."),
    },
    ReasonRule {
        code: ReasonCode::IncomeBelowStability,
        applies: |ctx| ctx.profile.applicant_income < ctx.thresholds.minimum_stable_income,
        reason: |ctx| {
            format!(
                "Your monthly income {} is below the model’s preferred stability range.",
                currency_truncated(ctx.profile.applicant_income)
            )
        },
        improvement: Some("Increase income or add a co-applicant with steady income."),
    },
    ReasonRule {
        code: ReasonCode::LimitedExperience,
        applies: |ctx| {
            ctx.profile.years_of_experience < ctx.thresholds.rejection_min_experience_years
        },
        reason: |ctx| {
            format!(
                "Limited work experience ({} years) may lower confidence in repayment capacity.",
                years(ctx.profile.years_of_experience)
            )
        },
        improvement: Some("Gain more stable work experience before reapplying."),
    },
    ReasonRule {
        code: ReasonCode::SelfEmployedScrutiny,
        applies: is_self_employed,
        reason: |_| {
            "Self-employed applicants often face higher scrutiny due to variable income."
                .to_string()
        },
        improvement: Some("Provide tax filings or audited business income statements."),
    },
];

/// Emitted on a model rejection when no rejection rule fired.
pub(crate) const REJECTION_FALLBACK: ReasonRule = ReasonRule {
    code: ReasonCode::UnalignedParameters,
    applies: always,
    reason: |_| "Some parameters did not align with the model’s approval trends.".to_string(),
    improvement: Some("Consult your bank for tailored guidance or alternate loan schemes."),
};
