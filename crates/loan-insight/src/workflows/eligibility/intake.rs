//! Boundary coercion from the loosely-typed form payload into an [`ApplicantProfile`].
//!
//! Browser forms post numbers either as JSON numbers or as strings, and omit fields the
//! applicant skipped. Absent and `null` fields default to zero; anything present that does
//! not coerce is rejected as a whole so no partial profile is ever assessed.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::domain::{ApplicantProfile, CreditHistory, EmploymentType, PropertyArea};

pub const APPLICANT_INCOME: &str = "ApplicantIncome";
pub const COAPPLICANT_INCOME: &str = "CoapplicantIncome";
pub const LOAN_AMOUNT: &str = "LoanAmount";
pub const LOAN_AMOUNT_TERM: &str = "Loan_Amount_Term";
pub const INTEREST_RATE: &str = "Interest_Rate";
pub const CREDIT_HISTORY: &str = "Credit_History";
pub const YEARS_OF_EXPERIENCE: &str = "Years_of_Experience";
pub const EMPLOYMENT_TYPE: &str = "Employment_Type";
pub const PROPERTY_AREA: &str = "Property_Area";

/// Wire representation of an eligibility request prior to validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawApplication {
    #[serde(rename = "ApplicantIncome", default)]
    pub applicant_income: Option<Value>,
    #[serde(rename = "CoapplicantIncome", default)]
    pub coapplicant_income: Option<Value>,
    #[serde(rename = "LoanAmount", default)]
    pub loan_amount: Option<Value>,
    #[serde(rename = "Loan_Amount_Term", default)]
    pub loan_amount_term: Option<Value>,
    #[serde(rename = "Interest_Rate", default)]
    pub interest_rate: Option<Value>,
    #[serde(rename = "Credit_History", default)]
    pub credit_history: Option<Value>,
    #[serde(rename = "Years_of_Experience", default)]
    pub years_of_experience: Option<Value>,
    #[serde(rename = "Employment_Type", default)]
    pub employment_type: Option<Value>,
    #[serde(rename = "Property_Area", default)]
    pub property_area: Option<Value>,
}

/// Rejections raised while coercing request fields.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum IntakeError {
    #[error("could not convert {field} value {value} to a number")]
    InvalidNumber { field: &'static str, value: String },
    #[error("{field} must be a finite number")]
    NonFinite { field: &'static str },
    #[error("Loan_Amount_Term must not be negative (found {0})")]
    NegativeTerm(i64),
    #[error("Loan_Amount_Term of {0} months exceeds the supported range")]
    TermOutOfRange(i64),
    #[error("Credit_History must be 0 or 1 (found {0})")]
    CreditHistoryOutOfRange(i64),
}

impl TryFrom<RawApplication> for ApplicantProfile {
    type Error = IntakeError;

    fn try_from(raw: RawApplication) -> Result<Self, Self::Error> {
        let term = coerce_integer(LOAN_AMOUNT_TERM, raw.loan_amount_term.as_ref())?;
        if term < 0 {
            return Err(IntakeError::NegativeTerm(term));
        }
        let loan_term_months =
            u32::try_from(term).map_err(|_| IntakeError::TermOutOfRange(term))?;

        let credit_history = match coerce_integer(CREDIT_HISTORY, raw.credit_history.as_ref())? {
            0 => CreditHistory::None,
            1 => CreditHistory::Established,
            other => return Err(IntakeError::CreditHistoryOutOfRange(other)),
        };

        Ok(Self {
            applicant_income: coerce_number(APPLICANT_INCOME, raw.applicant_income.as_ref())?,
            coapplicant_income: coerce_number(
                COAPPLICANT_INCOME,
                raw.coapplicant_income.as_ref(),
            )?,
            loan_amount: coerce_number(LOAN_AMOUNT, raw.loan_amount.as_ref())?,
            loan_term_months,
            interest_rate_percent: coerce_number(INTEREST_RATE, raw.interest_rate.as_ref())?,
            credit_history,
            years_of_experience: coerce_number(
                YEARS_OF_EXPERIENCE,
                raw.years_of_experience.as_ref(),
            )?,
            employment_type: EmploymentType::normalize(&coerce_text(
                raw.employment_type.as_ref(),
            )),
            property_area: PropertyArea::normalize(&coerce_text(raw.property_area.as_ref())),
        })
    }
}

fn coerce_number(field: &'static str, value: Option<&Value>) -> Result<f64, IntakeError> {
    let number = match value {
        None | Some(Value::Null) => return Ok(0.0),
        Some(Value::Number(number)) => number.as_f64(),
        Some(Value::String(text)) => text.trim().parse::<f64>().ok(),
        Some(_) => None,
    };

    let number = number.ok_or_else(|| invalid(field, value))?;
    if number.is_finite() {
        Ok(number)
    } else {
        Err(IntakeError::NonFinite { field })
    }
}

fn coerce_integer(field: &'static str, value: Option<&Value>) -> Result<i64, IntakeError> {
    match value {
        None | Some(Value::Null) => Ok(0),
        Some(Value::Number(number)) => {
            if let Some(integer) = number.as_i64() {
                return Ok(integer);
            }
            let float = number.as_f64().ok_or_else(|| invalid(field, value))?;
            if !float.is_finite() || float.abs() > i64::MAX as f64 {
                return Err(invalid(field, value));
            }
            Ok(float.trunc() as i64)
        }
        Some(Value::String(text)) => text.trim().parse::<i64>().map_err(|_| invalid(field, value)),
        Some(_) => Err(invalid(field, value)),
    }
}

fn coerce_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}

fn invalid(field: &'static str, value: Option<&Value>) -> IntakeError {
    IntakeError::InvalidNumber {
        field,
        value: value.map(Value::to_string).unwrap_or_default(),
    }
}
