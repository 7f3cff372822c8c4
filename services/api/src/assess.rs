use crate::infra::load_classifier;
use clap::Args;
use loan_insight::error::AppError;
use loan_insight::workflows::eligibility::{
    ApplicantBatchImporter, EligibilityAssessment, EligibilityService, PolicyThresholds,
    RawApplication, StumpEnsemble, Verdict,
};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct AssessArgs {
    /// Monthly income of the primary applicant
    #[arg(long, default_value_t = 0.0)]
    pub(crate) applicant_income: f64,
    /// Monthly income of the co-applicant
    #[arg(long, default_value_t = 0.0)]
    pub(crate) coapplicant_income: f64,
    /// Requested principal
    #[arg(long, default_value_t = 0.0)]
    pub(crate) loan_amount: f64,
    /// Loan term in months
    #[arg(long, default_value_t = 0)]
    pub(crate) loan_term: u32,
    /// Annual interest rate in percent
    #[arg(long, default_value_t = 0.0)]
    pub(crate) interest_rate: f64,
    /// 1 when the applicant has a credit history, otherwise 0
    #[arg(long, default_value_t = 0)]
    pub(crate) credit_history: i64,
    /// Years of professional experience
    #[arg(long, default_value_t = 0.0)]
    pub(crate) years_of_experience: f64,
    /// salaried, self-employed, or another label
    #[arg(long, default_value = "")]
    pub(crate) employment_type: String,
    /// urban, semiurban, rural, or another label
    #[arg(long, default_value = "")]
    pub(crate) property_area: String,
    /// Stump ensemble artifact to use instead of the baseline
    #[arg(long)]
    pub(crate) model: Option<PathBuf>,
}

impl From<&AssessArgs> for RawApplication {
    fn from(args: &AssessArgs) -> Self {
        Self {
            applicant_income: Some(Value::from(args.applicant_income)),
            coapplicant_income: Some(Value::from(args.coapplicant_income)),
            loan_amount: Some(Value::from(args.loan_amount)),
            loan_amount_term: Some(Value::from(args.loan_term)),
            interest_rate: Some(Value::from(args.interest_rate)),
            credit_history: Some(Value::from(args.credit_history)),
            years_of_experience: Some(Value::from(args.years_of_experience)),
            employment_type: Some(Value::from(args.employment_type.as_str())),
            property_area: Some(Value::from(args.property_area.as_str())),
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct BatchArgs {
    /// CSV export using the form field names as headers
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// Stump ensemble artifact to use instead of the baseline
    #[arg(long)]
    pub(crate) model: Option<PathBuf>,
}

fn service_for(model: Option<&Path>) -> Result<EligibilityService<StumpEnsemble>, AppError> {
    let classifier = load_classifier(model)?;
    Ok(EligibilityService::new(
        Arc::new(classifier),
        PolicyThresholds::default(),
    ))
}

pub(crate) fn run_assess(args: AssessArgs) -> Result<(), AppError> {
    let service = service_for(args.model.as_deref())?;
    let assessment = service.assess_raw(RawApplication::from(&args))?;
    print_assessment(&assessment);
    Ok(())
}

pub(crate) fn run_batch(args: BatchArgs) -> Result<(), AppError> {
    let service = service_for(args.model.as_deref())?;
    let profiles = ApplicantBatchImporter::from_path(&args.csv)?;

    let mut approved = 0usize;
    let mut overridden = 0usize;
    println!("Assessing {} applicant(s) from {}", profiles.len(), args.csv.display());
    for (index, profile) in profiles.iter().enumerate() {
        let assessment = service.assess(profile)?;
        if assessment.outcome.verdict == Verdict::Approved {
            approved += 1;
        }
        if assessment.override_applied {
            overridden += 1;
        }
        println!(
            "  #{:<4} {:<22} EMI {:>12.2}  ratio {:>6.1}%  model {}",
            index + 1,
            assessment.outcome.headline(),
            assessment.installment,
            assessment.ratio_percent,
            assessment.classifier_signal.label(),
        );
    }

    println!(
        "Approved {} of {} ({} affordability override(s))",
        approved,
        profiles.len(),
        overridden
    );
    Ok(())
}

fn print_assessment(assessment: &EligibilityAssessment) {
    let outcome = &assessment.outcome;
    println!("{}", outcome.headline());
    println!(
        "EMI {:.2} ({:.1}% of monthly income)",
        assessment.installment, assessment.ratio_percent
    );
    println!("\n{}", outcome.summary);
    for reason in &outcome.reasons {
        println!("  - {}", reason);
    }
    if !outcome.improvements.is_empty() {
        println!("\nHow to improve:");
        for improvement in &outcome.improvements {
            println!("  - {}", improvement);
        }
    }
}
