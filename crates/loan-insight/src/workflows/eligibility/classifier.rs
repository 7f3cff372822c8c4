use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::domain::{ApplicantProfile, ClassifierSignal, EmploymentType, PropertyArea};
use super::intake::{
    APPLICANT_INCOME, COAPPLICANT_INCOME, CREDIT_HISTORY, EMPLOYMENT_TYPE, INTEREST_RATE,
    LOAN_AMOUNT, LOAN_AMOUNT_TERM, PROPERTY_AREA, YEARS_OF_EXPERIENCE,
};

/// Named model inputs. Categorical fields are one-hot encoded as `Field=category`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FeatureVector {
    values: BTreeMap<String, f64>,
}

impl FeatureVector {
    pub fn from_profile(profile: &ApplicantProfile) -> Self {
        let mut features = Self::default();
        features.insert(APPLICANT_INCOME, profile.applicant_income);
        features.insert(COAPPLICANT_INCOME, profile.coapplicant_income);
        features.insert(LOAN_AMOUNT, profile.loan_amount);
        features.insert(LOAN_AMOUNT_TERM, f64::from(profile.loan_term_months));
        features.insert(INTEREST_RATE, profile.interest_rate_percent);
        features.insert(
            CREDIT_HISTORY,
            f64::from(profile.credit_history.as_flag()),
        );
        features.insert(YEARS_OF_EXPERIENCE, profile.years_of_experience);

        let employment = profile.employment_type.key();
        for category in [
            EmploymentType::Salaried.key(),
            EmploymentType::SelfEmployed.key(),
            EmploymentType::default().key(),
        ] {
            features.insert(
                format!("{EMPLOYMENT_TYPE}={category}"),
                indicator(category == employment),
            );
        }

        let area = profile.property_area.key();
        for category in [
            PropertyArea::Urban.key(),
            PropertyArea::Semiurban.key(),
            PropertyArea::Rural.key(),
            PropertyArea::default().key(),
        ] {
            features.insert(
                format!("{PROPERTY_AREA}={category}"),
                indicator(category == area),
            );
        }

        features
    }

    pub fn insert(&mut self, name: impl Into<String>, value: f64) {
        self.values.insert(name.into(), value);
    }

    pub fn remove(&mut self, name: &str) -> Option<f64> {
        self.values.remove(name)
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

fn indicator(flag: bool) -> f64 {
    if flag {
        1.0
    } else {
        0.0
    }
}

/// Fitted risk model consulted once per assessment.
pub trait RiskClassifier: Send + Sync {
    fn predict(&self, features: &FeatureVector) -> Result<ClassifierSignal, ClassifierError>;

    fn name(&self) -> &str;
}

/// Failures raised while scoring a feature vector.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ClassifierError {
    #[error("model {model} expects feature {feature} which the request did not provide")]
    MissingFeature { model: String, feature: String },
    #[error("feature {0} is not a finite number")]
    NonFiniteFeature(String),
}

/// Failures raised while loading a model artifact.
#[derive(Debug, thiserror::Error)]
pub enum ModelLoadError {
    #[error("failed to read model artifact: {0}")]
    Io(#[from] std::io::Error),
    #[error("model artifact is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("model artifact rejected: {0}")]
    Invalid(String),
}

/// Single-feature threshold vote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionStump {
    pub feature: String,
    pub threshold: f64,
    pub weight: f64,
    /// Signal voted when the feature value exceeds the threshold.
    pub above: ClassifierSignal,
}

impl DecisionStump {
    fn vote(&self, value: f64) -> ClassifierSignal {
        if value > self.threshold {
            self.above
        } else {
            self.above.opposite()
        }
    }
}

/// Boosted ensemble of decision stumps; approves when the weighted vote is positive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StumpEnsemble {
    pub name: String,
    #[serde(default)]
    pub version: String,
    pub stumps: Vec<DecisionStump>,
}

impl StumpEnsemble {
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        stumps: Vec<DecisionStump>,
    ) -> Result<Self, ModelLoadError> {
        let ensemble = Self {
            name: name.into(),
            version: version.into(),
            stumps,
        };
        ensemble.validate()?;
        Ok(ensemble)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ModelLoadError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ModelLoadError> {
        let ensemble: Self = serde_json::from_reader(reader)?;
        ensemble.validate()?;
        Ok(ensemble)
    }

    /// Built-in ensemble used when no fitted artifact is configured.
    pub fn baseline() -> Self {
        let stump = |feature: &str, threshold: f64, weight: f64, above: ClassifierSignal| {
            DecisionStump {
                feature: feature.to_string(),
                threshold,
                weight,
                above,
            }
        };

        Self {
            name: "baseline-stump-ensemble".to_string(),
            version: "1".to_string(),
            stumps: vec![
                stump(CREDIT_HISTORY, 0.5, 1.2, ClassifierSignal::Approve),
                stump(APPLICANT_INCOME, 25_000.0, 0.5, ClassifierSignal::Approve),
                stump(YEARS_OF_EXPERIENCE, 2.0, 0.4, ClassifierSignal::Approve),
                stump(LOAN_AMOUNT, 5_000_000.0, 0.6, ClassifierSignal::Reject),
                stump(
                    "Employment_Type=self-employed",
                    0.5,
                    0.3,
                    ClassifierSignal::Reject,
                ),
                stump("Property_Area=semiurban", 0.5, 0.2, ClassifierSignal::Approve),
            ],
        }
    }

    /// Signed weighted vote; positive favors approval.
    pub fn score(&self, features: &FeatureVector) -> Result<f64, ClassifierError> {
        self.stumps.iter().try_fold(0.0, |total, stump| {
            let value =
                features
                    .get(&stump.feature)
                    .ok_or_else(|| ClassifierError::MissingFeature {
                        model: self.name.clone(),
                        feature: stump.feature.clone(),
                    })?;
            if !value.is_finite() {
                return Err(ClassifierError::NonFiniteFeature(stump.feature.clone()));
            }
            Ok(total + stump.weight * stump.vote(value).vote())
        })
    }

    fn validate(&self) -> Result<(), ModelLoadError> {
        if self.stumps.is_empty() {
            return Err(ModelLoadError::Invalid(format!(
                "ensemble {} has no stumps",
                self.name
            )));
        }

        for stump in &self.stumps {
            if stump.feature.trim().is_empty() {
                return Err(ModelLoadError::Invalid(
                    "stump is missing a feature name".to_string(),
                ));
            }
            if !stump.threshold.is_finite() || !stump.weight.is_finite() || stump.weight < 0.0 {
                return Err(ModelLoadError::Invalid(format!(
                    "stump on {} needs a finite threshold and a non-negative weight",
                    stump.feature
                )));
            }
        }

        Ok(())
    }
}

impl RiskClassifier for StumpEnsemble {
    fn predict(&self, features: &FeatureVector) -> Result<ClassifierSignal, ClassifierError> {
        let score = self.score(features)?;
        // Ties go to rejection.
        if score > 0.0 {
            Ok(ClassifierSignal::Approve)
        } else {
            Ok(ClassifierSignal::Reject)
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}
