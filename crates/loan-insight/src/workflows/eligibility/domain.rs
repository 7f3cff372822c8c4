use serde::{Deserialize, Serialize};

/// Whether the applicant has a positive repayment record on file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreditHistory {
    #[default]
    None,
    Established,
}

impl CreditHistory {
    pub const fn from_flag(flag: bool) -> Self {
        if flag {
            Self::Established
        } else {
            Self::None
        }
    }

    pub const fn as_flag(self) -> u8 {
        match self {
            Self::None => 0,
            Self::Established => 1,
        }
    }

    pub const fn is_established(self) -> bool {
        matches!(self, Self::Established)
    }
}

/// Employment category normalised at intake. Unrecognised text lands in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentType {
    Salaried,
    SelfEmployed,
    Other(String),
}

impl EmploymentType {
    pub fn normalize(raw: &str) -> Self {
        match compact_token(raw).as_str() {
            "salaried" | "salary" | "salaryearner" => Self::Salaried,
            "selfemployed" | "self" | "business" | "businessowner" => Self::SelfEmployed,
            _ => Self::Other(raw.trim().to_string()),
        }
    }

    /// Category token used for one-hot feature names.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Salaried => "salaried",
            Self::SelfEmployed => "self-employed",
            Self::Other(_) => "other",
        }
    }

    pub const fn is_salaried(&self) -> bool {
        matches!(self, Self::Salaried)
    }

    pub const fn is_self_employed(&self) -> bool {
        matches!(self, Self::SelfEmployed)
    }
}

impl Default for EmploymentType {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

/// Location class of the property securing the loan.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyArea {
    Urban,
    Semiurban,
    Rural,
    Other(String),
}

impl PropertyArea {
    pub fn normalize(raw: &str) -> Self {
        match compact_token(raw).as_str() {
            "urban" => Self::Urban,
            "semiurban" => Self::Semiurban,
            "rural" => Self::Rural,
            _ => Self::Other(raw.trim().to_string()),
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Self::Urban => "urban",
            Self::Semiurban => "semiurban",
            Self::Rural => "rural",
            Self::Other(_) => "other",
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Urban => "Urban",
            Self::Semiurban => "Semiurban",
            Self::Rural => "Rural",
            Self::Other(raw) => raw.as_str(),
        }
    }

    /// Areas whose collateral the lender treats as favorable.
    pub const fn is_favorable(&self) -> bool {
        matches!(self, Self::Urban | Self::Semiurban)
    }
}

impl Default for PropertyArea {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

fn compact_token(raw: &str) -> String {
    raw.trim()
        .chars()
        .filter(|ch| !matches!(ch, '-' | '_' | ' '))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Validated applicant attributes for a single assessment request.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ApplicantProfile {
    pub applicant_income: f64,
    pub coapplicant_income: f64,
    pub loan_amount: f64,
    pub loan_term_months: u32,
    pub interest_rate_percent: f64,
    pub credit_history: CreditHistory,
    pub years_of_experience: f64,
    pub employment_type: EmploymentType,
    pub property_area: PropertyArea,
}

impl ApplicantProfile {
    pub fn total_income(&self) -> f64 {
        self.applicant_income + self.coapplicant_income
    }
}

/// Binary output of the risk classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassifierSignal {
    Approve,
    Reject,
}

impl ClassifierSignal {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Approve => "approve",
            Self::Reject => "reject",
        }
    }

    pub(crate) const fn vote(self) -> f64 {
        match self {
            Self::Approve => 1.0,
            Self::Reject => -1.0,
        }
    }

    pub(crate) const fn opposite(self) -> Self {
        match self {
            Self::Approve => Self::Reject,
            Self::Reject => Self::Approve,
        }
    }
}

/// Final lending decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Approved,
    Rejected,
}

impl Verdict {
    /// Headline shown at the top of the result card.
    pub const fn headline(self) -> &'static str {
        match self {
            Self::Approved => "✅ Loan Approved",
            Self::Rejected => "❌ Loan Not Approved",
        }
    }
}
