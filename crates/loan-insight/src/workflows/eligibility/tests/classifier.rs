use super::common::*;
use crate::workflows::eligibility::classifier::{
    ClassifierError, DecisionStump, FeatureVector, ModelLoadError, RiskClassifier, StumpEnsemble,
};
use crate::workflows::eligibility::domain::{
    ApplicantProfile, ClassifierSignal, CreditHistory, EmploymentType,
};

#[test]
fn feature_vector_one_hot_encodes_categories() {
    let features = FeatureVector::from_profile(&salaried_profile());

    assert_eq!(features.get("ApplicantIncome"), Some(50_000.0));
    assert_eq!(features.get("Loan_Amount_Term"), Some(360.0));
    assert_eq!(features.get("Credit_History"), Some(1.0));
    assert_eq!(features.get("Employment_Type=salaried"), Some(1.0));
    assert_eq!(features.get("Employment_Type=self-employed"), Some(0.0));
    assert_eq!(features.get("Employment_Type=other"), Some(0.0));
    assert_eq!(features.get("Property_Area=urban"), Some(1.0));
    assert_eq!(features.get("Property_Area=rural"), Some(0.0));
    assert_eq!(features.len(), 14);
}

#[test]
fn feature_shape_is_stable_across_profiles() {
    let baseline = FeatureVector::from_profile(&salaried_profile());
    let other = FeatureVector::from_profile(&ApplicantProfile::default());
    assert_eq!(baseline.len(), other.len());
    assert_eq!(other.get("Employment_Type=other"), Some(1.0));
    assert_eq!(other.get("Property_Area=other"), Some(1.0));
}

#[test]
fn baseline_ensemble_approves_a_strong_applicant() {
    let ensemble = StumpEnsemble::baseline();
    let features = FeatureVector::from_profile(&salaried_profile());

    assert_eq!(ensemble.predict(&features), Ok(ClassifierSignal::Approve));
}

#[test]
fn baseline_ensemble_rejects_a_weak_applicant() {
    let ensemble = StumpEnsemble::baseline();
    let profile = ApplicantProfile {
        applicant_income: 12_000.0,
        credit_history: CreditHistory::None,
        years_of_experience: 0.5,
        employment_type: EmploymentType::SelfEmployed,
        ..salaried_profile()
    };

    let score = ensemble
        .score(&FeatureVector::from_profile(&profile))
        .expect("features complete");

    assert!(score < 0.0, "score {score}");
    assert_eq!(
        ensemble.predict(&FeatureVector::from_profile(&profile)),
        Ok(ClassifierSignal::Reject)
    );
}

#[test]
fn missing_feature_reports_incompatible_shape() {
    let ensemble = StumpEnsemble::baseline();
    let mut features = FeatureVector::from_profile(&salaried_profile());
    features.remove("Credit_History");

    assert_eq!(
        ensemble.predict(&features),
        Err(ClassifierError::MissingFeature {
            model: "baseline-stump-ensemble".to_string(),
            feature: "Credit_History".to_string(),
        })
    );
}

#[test]
fn tied_vote_rejects() {
    let ensemble = StumpEnsemble::new(
        "tie",
        "1",
        vec![
            DecisionStump {
                feature: "Credit_History".to_string(),
                threshold: 0.5,
                weight: 1.0,
                above: ClassifierSignal::Approve,
            },
            DecisionStump {
                feature: "LoanAmount".to_string(),
                threshold: 100_000.0,
                weight: 1.0,
                above: ClassifierSignal::Reject,
            },
        ],
    )
    .expect("valid ensemble");

    let features = FeatureVector::from_profile(&salaried_profile());

    assert_eq!(ensemble.score(&features), Ok(0.0));
    assert_eq!(ensemble.predict(&features), Ok(ClassifierSignal::Reject));
}

#[test]
fn loads_ensemble_from_json_artifact() {
    let artifact = r#"{
        "name": "fitted-adaboost",
        "version": "2024-11",
        "stumps": [
            { "feature": "Credit_History", "threshold": 0.5, "weight": 0.9, "above": "approve" },
            { "feature": "ApplicantIncome", "threshold": 60000, "weight": 0.4, "above": "approve" }
        ]
    }"#;

    let ensemble = StumpEnsemble::from_reader(artifact.as_bytes()).expect("artifact loads");

    assert_eq!(ensemble.name(), "fitted-adaboost");
    assert_eq!(ensemble.stumps.len(), 2);
    let features = FeatureVector::from_profile(&salaried_profile());
    assert_eq!(ensemble.predict(&features), Ok(ClassifierSignal::Approve));
}

#[test]
fn rejects_empty_or_malformed_artifacts() {
    let empty = r#"{ "name": "empty", "stumps": [] }"#;
    assert!(matches!(
        StumpEnsemble::from_reader(empty.as_bytes()),
        Err(ModelLoadError::Invalid(_))
    ));

    let negative = r#"{ "name": "neg", "stumps": [
        { "feature": "LoanAmount", "threshold": 1, "weight": -0.5, "above": "reject" }
    ] }"#;
    assert!(matches!(
        StumpEnsemble::from_reader(negative.as_bytes()),
        Err(ModelLoadError::Invalid(_))
    ));

    assert!(matches!(
        StumpEnsemble::from_reader("not json".as_bytes()),
        Err(ModelLoadError::Json(_))
    ));
}

#[test]
fn missing_artifact_surfaces_io_error() {
    let result = StumpEnsemble::from_path("/nonexistent/loan-insight/model.json");
    assert!(matches!(result, Err(ModelLoadError::Io(_))));
}
