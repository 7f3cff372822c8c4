//! Loan eligibility assessment: intake, affordability, classification, and explanation.
//!
//! The classifier is injected into [`EligibilityService`] so the decision flow can be
//! exercised with stub models. Every assessment is request-local; the service holds no
//! mutable state and can be shared across handlers behind an `Arc`.

pub mod affordability;
pub mod batch;
pub mod classifier;
pub mod domain;
pub mod explanation;
pub mod intake;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use affordability::{affordability_ratio_percent, monthly_installment, AffordabilityAssessment};
pub use batch::{ApplicantBatchImporter, BatchImportError};
pub use classifier::{
    ClassifierError, DecisionStump, FeatureVector, ModelLoadError, RiskClassifier, StumpEnsemble,
};
pub use domain::{
    ApplicantProfile, ClassifierSignal, CreditHistory, EmploymentType, PropertyArea, Verdict,
};
pub use explanation::{
    apply_affordability_override, DecisionExplainer, DecisionOutcome, ExplanationBranch,
    OverrideDecision, PolicyThresholds, ReasonCode,
};
pub use intake::{IntakeError, RawApplication};
pub use router::{eligibility_router, PredictionView};
pub use service::{AssessmentError, EligibilityAssessment, EligibilityService};
