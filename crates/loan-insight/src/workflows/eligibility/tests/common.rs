use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::workflows::eligibility::affordability::AffordabilityAssessment;
use crate::workflows::eligibility::classifier::{ClassifierError, FeatureVector, RiskClassifier};
use crate::workflows::eligibility::domain::{
    ApplicantProfile, ClassifierSignal, CreditHistory, EmploymentType, PropertyArea,
};
use crate::workflows::eligibility::explanation::{
    apply_affordability_override, DecisionExplainer, DecisionOutcome, PolicyThresholds,
};
use crate::workflows::eligibility::service::EligibilityService;

/// Salaried urban applicant with an established credit record and a modest mortgage.
pub(super) fn salaried_profile() -> ApplicantProfile {
    ApplicantProfile {
        applicant_income: 50_000.0,
        coapplicant_income: 0.0,
        loan_amount: 500_000.0,
        loan_term_months: 360,
        interest_rate_percent: 8.5,
        credit_history: CreditHistory::Established,
        years_of_experience: 3.0,
        employment_type: EmploymentType::Salaried,
        property_area: PropertyArea::Urban,
    }
}

/// Same applicant asking for a loan whose EMI consumes over 90% of income.
pub(super) fn overextended_profile() -> ApplicantProfile {
    ApplicantProfile {
        loan_amount: 6_000_000.0,
        ..salaried_profile()
    }
}

/// No credit record, but strong on every compensating indicator.
pub(super) fn thin_file_profile() -> ApplicantProfile {
    ApplicantProfile {
        applicant_income: 70_000.0,
        credit_history: CreditHistory::None,
        years_of_experience: 6.0,
        property_area: PropertyArea::Semiurban,
        ..salaried_profile()
    }
}

pub(super) fn thresholds() -> PolicyThresholds {
    PolicyThresholds::default()
}

/// Runs the override gate and the explainer without a classifier in the loop.
pub(super) fn explain(profile: &ApplicantProfile, signal: ClassifierSignal) -> DecisionOutcome {
    let affordability = AffordabilityAssessment::for_profile(profile);
    explain_with(profile, signal, &affordability)
}

pub(super) fn explain_with(
    profile: &ApplicantProfile,
    signal: ClassifierSignal,
    affordability: &AffordabilityAssessment,
) -> DecisionOutcome {
    let thresholds = thresholds();
    let decision = apply_affordability_override(signal, affordability.ratio_percent, &thresholds);
    DecisionExplainer::new(thresholds).explain(
        profile,
        decision.effective_signal,
        affordability,
        decision.override_applied,
    )
}

/// Classifier stub returning a fixed signal and counting calls.
#[derive(Debug)]
pub(super) struct FixedClassifier {
    signal: ClassifierSignal,
    calls: AtomicUsize,
}

impl FixedClassifier {
    pub(super) fn new(signal: ClassifierSignal) -> Self {
        Self {
            signal,
            calls: AtomicUsize::new(0),
        }
    }

    pub(super) fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

impl RiskClassifier for FixedClassifier {
    fn predict(&self, _features: &FeatureVector) -> Result<ClassifierSignal, ClassifierError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        Ok(self.signal)
    }

    fn name(&self) -> &str {
        "fixed"
    }
}

/// Classifier stub simulating a model fitted against a different feature layout.
#[derive(Debug, Default)]
pub(super) struct IncompatibleClassifier;

impl RiskClassifier for IncompatibleClassifier {
    fn predict(&self, _features: &FeatureVector) -> Result<ClassifierSignal, ClassifierError> {
        Err(ClassifierError::MissingFeature {
            model: "legacy".to_string(),
            feature: "Dependents".to_string(),
        })
    }

    fn name(&self) -> &str {
        "legacy"
    }
}

pub(super) fn build_service(
    signal: ClassifierSignal,
) -> (EligibilityService<FixedClassifier>, Arc<FixedClassifier>) {
    let classifier = Arc::new(FixedClassifier::new(signal));
    let service = EligibilityService::new(classifier.clone(), thresholds());
    (service, classifier)
}
