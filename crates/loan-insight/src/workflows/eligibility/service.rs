use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use super::affordability::AffordabilityAssessment;
use super::classifier::{ClassifierError, FeatureVector, RiskClassifier};
use super::domain::{ApplicantProfile, ClassifierSignal};
use super::explanation::{
    apply_affordability_override, DecisionExplainer, DecisionOutcome, PolicyThresholds,
};
use super::intake::{IntakeError, RawApplication};

/// Service composing the classifier, the affordability gate, and the explainer.
pub struct EligibilityService<C> {
    classifier: Arc<C>,
    explainer: DecisionExplainer,
}

impl<C> EligibilityService<C>
where
    C: RiskClassifier + 'static,
{
    pub fn new(classifier: Arc<C>, thresholds: PolicyThresholds) -> Self {
        Self {
            classifier,
            explainer: DecisionExplainer::new(thresholds),
        }
    }

    pub fn thresholds(&self) -> &PolicyThresholds {
        self.explainer.thresholds()
    }

    /// Validate a raw form payload, then assess it.
    pub fn assess_raw(
        &self,
        raw: RawApplication,
    ) -> Result<EligibilityAssessment, AssessmentError> {
        let profile = ApplicantProfile::try_from(raw).map_err(|err| {
            warn!(error = %err, "rejected eligibility request at intake");
            err
        })?;
        self.assess(&profile)
    }

    /// Run one applicant through classifier, affordability override, and explanation.
    pub fn assess(
        &self,
        profile: &ApplicantProfile,
    ) -> Result<EligibilityAssessment, AssessmentError> {
        let features = FeatureVector::from_profile(profile);
        let classifier_signal = self.classifier.predict(&features).map_err(|err| {
            warn!(model = self.classifier.name(), error = %err, "classifier failed");
            err
        })?;

        let affordability = AffordabilityAssessment::for_profile(profile);
        if !affordability.is_finite() {
            warn!(
                installment = affordability.installment,
                ratio_percent = affordability.ratio_percent,
                "loan terms produced a non-finite installment"
            );
            return Err(AssessmentError::NonFiniteInstallment);
        }
        let decision = apply_affordability_override(
            classifier_signal,
            affordability.ratio_percent,
            self.explainer.thresholds(),
        );

        if decision.override_applied && classifier_signal == ClassifierSignal::Approve {
            info!(
                ratio_percent = affordability.ratio_percent,
                "affordability override rejected a classifier approval"
            );
        }

        let outcome = self.explainer.explain(
            profile,
            decision.effective_signal,
            &affordability,
            decision.override_applied,
        );

        debug!(
            model = self.classifier.name(),
            signal = classifier_signal.label(),
            ratio_percent = affordability.ratio_percent,
            override_applied = decision.override_applied,
            verdict = ?outcome.verdict,
            "assessed applicant"
        );

        Ok(EligibilityAssessment {
            classifier_signal,
            effective_signal: decision.effective_signal,
            override_applied: decision.override_applied,
            installment: affordability.installment,
            ratio_percent: affordability.ratio_percent,
            outcome,
        })
    }
}

/// Everything computed for one applicant, including the raw classifier signal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EligibilityAssessment {
    pub classifier_signal: ClassifierSignal,
    pub effective_signal: ClassifierSignal,
    pub override_applied: bool,
    pub installment: f64,
    pub ratio_percent: f64,
    #[serde(flatten)]
    pub outcome: DecisionOutcome,
}

/// Error raised by the eligibility service. Every variant is a client error.
#[derive(Debug, thiserror::Error)]
pub enum AssessmentError {
    #[error(transparent)]
    Intake(#[from] IntakeError),
    #[error(transparent)]
    Classifier(#[from] ClassifierError),
    #[error("loan amount, interest rate and term do not produce a finite monthly installment")]
    NonFiniteInstallment,
}
