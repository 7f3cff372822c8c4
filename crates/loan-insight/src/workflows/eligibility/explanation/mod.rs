mod config;
mod format;
mod policy;
mod rules;

pub use config::PolicyThresholds;
pub use policy::{apply_affordability_override, ExplanationBranch, OverrideDecision};
pub use rules::ReasonCode;

use super::affordability::AffordabilityAssessment;
use super::domain::{ApplicantProfile, ClassifierSignal, Verdict};
use policy::select_branch;
use rules::{evaluate, FiredRule, RuleContext};
use serde::{Deserialize, Serialize};

/// Stateless explainer turning a decision into itemized, human-readable reasons.
#[derive(Debug, Clone, Default)]
pub struct DecisionExplainer {
    thresholds: PolicyThresholds,
}

impl DecisionExplainer {
    pub fn new(thresholds: PolicyThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &PolicyThresholds {
        &self.thresholds
    }

    pub fn explain(
        &self,
        profile: &ApplicantProfile,
        effective_signal: ClassifierSignal,
        affordability: &AffordabilityAssessment,
        override_applied: bool,
    ) -> DecisionOutcome {
        let context = RuleContext {
            profile,
            affordability,
            thresholds: &self.thresholds,
        };

        match select_branch(effective_signal, override_applied) {
            ExplanationBranch::AffordabilityOverride => DecisionOutcome::assemble(
                ExplanationBranch::AffordabilityOverride,
                Verdict::Rejected,
                rules::OVERRIDE_SUMMARY,
                evaluate(rules::OVERRIDE_RULES, &context),
                Some(rules::OVERRIDE_IMPROVEMENTS),
            ),
            ExplanationBranch::ModelApproval => DecisionOutcome::assemble(
                ExplanationBranch::ModelApproval,
                Verdict::Approved,
                rules::APPROVAL_SUMMARY,
                evaluate(rules::APPROVAL_RULES, &context),
                Some(rules::APPROVAL_IMPROVEMENTS),
            ),
            ExplanationBranch::ModelRejection => {
                let mut fired = evaluate(rules::REJECTION_RULES, &context);
                if fired.is_empty() {
                    fired = evaluate(std::slice::from_ref(&rules::REJECTION_FALLBACK), &context);
                }
                DecisionOutcome::assemble(
                    ExplanationBranch::ModelRejection,
                    Verdict::Rejected,
                    rules::REJECTION_SUMMARY,
                    fired,
                    None,
                )
            }
        }
    }
}

/// Verdict, one-line summary, ordered reasons and suggested improvements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionOutcome {
    pub verdict: Verdict,
    pub branch: ExplanationBranch,
    pub summary: String,
    pub reasons: Vec<String>,
    pub improvements: Vec<String>,
    pub reason_codes: Vec<ReasonCode>,
}

impl DecisionOutcome {
    /// `fixed_improvements` replaces the per-rule pairs when present.
    fn assemble(
        branch: ExplanationBranch,
        verdict: Verdict,
        summary: &str,
        fired: Vec<FiredRule>,
        fixed_improvements: Option<&[&str]>,
    ) -> Self {
        let improvements = match fixed_improvements {
            Some(items) => items.iter().map(|item| item.to_string()).collect(),
            None => fired
                .iter()
                .filter_map(|rule| rule.improvement.map(str::to_string))
                .collect(),
        };

        let (reason_codes, reasons) = fired
            .into_iter()
            .map(|rule| (rule.code, rule.reason))
            .unzip();

        Self {
            verdict,
            branch,
            summary: summary.to_string(),
            reasons,
            improvements,
            reason_codes,
        }
    }

    pub fn headline(&self) -> &'static str {
        self.verdict.headline()
    }

    pub fn fired(&self, code: ReasonCode) -> bool {
        self.reason_codes.contains(&code)
    }
}
