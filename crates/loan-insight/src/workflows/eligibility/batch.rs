use serde::Deserialize;
use serde_json::Value;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::domain::ApplicantProfile;
use super::intake::{IntakeError, RawApplication};

#[derive(Debug)]
pub enum BatchImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    Intake { row: usize, source: IntakeError },
}

impl std::fmt::Display for BatchImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BatchImportError::Io(err) => write!(f, "failed to read applicant file: {}", err),
            BatchImportError::Csv(err) => write!(f, "invalid applicant CSV data: {}", err),
            BatchImportError::Intake { row, source } => {
                write!(f, "applicant row {} rejected: {}", row, source)
            }
        }
    }
}

impl std::error::Error for BatchImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BatchImportError::Io(err) => Some(err),
            BatchImportError::Csv(err) => Some(err),
            BatchImportError::Intake { source, .. } => Some(source),
        }
    }
}

impl From<std::io::Error> for BatchImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for BatchImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// CSV row using the same column names as the JSON form payload.
#[derive(Debug, Deserialize)]
struct ApplicantRow {
    #[serde(rename = "ApplicantIncome", default)]
    applicant_income: Option<String>,
    #[serde(rename = "CoapplicantIncome", default)]
    coapplicant_income: Option<String>,
    #[serde(rename = "LoanAmount", default)]
    loan_amount: Option<String>,
    #[serde(rename = "Loan_Amount_Term", default)]
    loan_amount_term: Option<String>,
    #[serde(rename = "Interest_Rate", default)]
    interest_rate: Option<String>,
    #[serde(rename = "Credit_History", default)]
    credit_history: Option<String>,
    #[serde(rename = "Years_of_Experience", default)]
    years_of_experience: Option<String>,
    #[serde(rename = "Employment_Type", default)]
    employment_type: Option<String>,
    #[serde(rename = "Property_Area", default)]
    property_area: Option<String>,
}

impl From<ApplicantRow> for RawApplication {
    fn from(row: ApplicantRow) -> Self {
        Self {
            applicant_income: cell(row.applicant_income),
            coapplicant_income: cell(row.coapplicant_income),
            loan_amount: cell(row.loan_amount),
            loan_amount_term: cell(row.loan_amount_term),
            interest_rate: cell(row.interest_rate),
            credit_history: cell(row.credit_history),
            years_of_experience: cell(row.years_of_experience),
            employment_type: cell(row.employment_type),
            property_area: cell(row.property_area),
        }
    }
}

// Blank cells behave like absent JSON fields.
fn cell(value: Option<String>) -> Option<Value> {
    value
        .map(|raw| raw.trim().to_string())
        .filter(|raw| !raw.is_empty())
        .map(Value::String)
}

/// Loads applicant profiles from a CSV export for offline assessment.
pub struct ApplicantBatchImporter;

impl ApplicantBatchImporter {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Vec<ApplicantProfile>, BatchImportError> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    /// Row numbers in errors are 1-based and exclude the header.
    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<ApplicantProfile>, BatchImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        let mut profiles = Vec::new();
        for (index, record) in csv_reader.deserialize::<ApplicantRow>().enumerate() {
            let raw = RawApplication::from(record?);
            let profile = ApplicantProfile::try_from(raw).map_err(|source| {
                BatchImportError::Intake {
                    row: index + 1,
                    source,
                }
            })?;
            profiles.push(profile);
        }

        Ok(profiles)
    }
}
