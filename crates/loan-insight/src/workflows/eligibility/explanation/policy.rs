use serde::{Deserialize, Serialize};

use super::super::domain::ClassifierSignal;
use super::config::PolicyThresholds;

/// Narrative path taken by the explainer. Exactly one applies per assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExplanationBranch {
    AffordabilityOverride,
    ModelApproval,
    ModelRejection,
}

/// Classifier signal after the affordability gate has been applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverrideDecision {
    pub effective_signal: ClassifierSignal,
    pub override_applied: bool,
}

/// Forces a rejection when the EMI share of income exceeds the override ratio,
/// whatever the classifier said.
pub fn apply_affordability_override(
    signal: ClassifierSignal,
    ratio_percent: f64,
    thresholds: &PolicyThresholds,
) -> OverrideDecision {
    let override_applied = exceeds_override_ratio(ratio_percent, thresholds);
    OverrideDecision {
        effective_signal: if override_applied {
            ClassifierSignal::Reject
        } else {
            signal
        },
        override_applied,
    }
}

/// Single comparison used by both the gate and the override reason table.
pub(crate) fn exceeds_override_ratio(ratio_percent: f64, thresholds: &PolicyThresholds) -> bool {
    ratio_percent > thresholds.affordability_override_ratio
}

pub(crate) fn select_branch(
    effective_signal: ClassifierSignal,
    override_applied: bool,
) -> ExplanationBranch {
    match (override_applied, effective_signal) {
        (true, _) => ExplanationBranch::AffordabilityOverride,
        (false, ClassifierSignal::Approve) => ExplanationBranch::ModelApproval,
        (false, ClassifierSignal::Reject) => ExplanationBranch::ModelRejection,
    }
}
