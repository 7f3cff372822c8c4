use crate::workflows::eligibility::batch::{ApplicantBatchImporter, BatchImportError};
use crate::workflows::eligibility::domain::{CreditHistory, EmploymentType, PropertyArea};
use crate::workflows::eligibility::intake::IntakeError;

const HEADER: &str = "ApplicantIncome,CoapplicantIncome,LoanAmount,Loan_Amount_Term,Interest_Rate,Credit_History,Years_of_Experience,Employment_Type,Property_Area";

#[test]
fn imports_rows_using_form_column_names() {
    let data = format!(
        "{HEADER}\n50000,0,500000,360,8.5,1,3,Salaried,Urban\n70000,5000,800000,240,9.1,0,6,Self-Employed,Semiurban\n"
    );

    let profiles = ApplicantBatchImporter::from_reader(data.as_bytes()).expect("csv imports");

    assert_eq!(profiles.len(), 2);
    assert_eq!(profiles[0].loan_term_months, 360);
    assert_eq!(profiles[0].employment_type, EmploymentType::Salaried);
    assert_eq!(profiles[1].total_income(), 75_000.0);
    assert_eq!(profiles[1].credit_history, CreditHistory::None);
    assert_eq!(profiles[1].employment_type, EmploymentType::SelfEmployed);
    assert_eq!(profiles[1].property_area, PropertyArea::Semiurban);
}

#[test]
fn blank_cells_and_missing_columns_default_to_zero() {
    let data = "ApplicantIncome,LoanAmount,Credit_History\n42000,,1\n";

    let profiles = ApplicantBatchImporter::from_reader(data.as_bytes()).expect("csv imports");

    assert_eq!(profiles[0].applicant_income, 42_000.0);
    assert_eq!(profiles[0].loan_amount, 0.0);
    assert_eq!(profiles[0].loan_term_months, 0);
    assert_eq!(profiles[0].credit_history, CreditHistory::Established);
}

#[test]
fn reports_the_offending_row() {
    let data = format!(
        "{HEADER}\n50000,0,500000,360,8.5,1,3,Salaried,Urban\n50000,0,500000,thirty years,8.5,1,3,Salaried,Urban\n"
    );

    let err = ApplicantBatchImporter::from_reader(data.as_bytes()).expect_err("row 2 is invalid");

    match err {
        BatchImportError::Intake { row, source } => {
            assert_eq!(row, 2);
            assert!(matches!(
                source,
                IntakeError::InvalidNumber {
                    field: "Loan_Amount_Term",
                    ..
                }
            ));
        }
        other => panic!("expected intake error, got {other:?}"),
    }
}
