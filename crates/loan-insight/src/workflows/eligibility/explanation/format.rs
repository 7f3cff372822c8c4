//! Display helpers for reason text.

const CURRENCY_SYMBOL: char = '₹';

/// Rounds to whole currency units (ties to even) and groups thousands, e.g. `₹3,845`.
pub(crate) fn currency(amount: f64) -> String {
    format!("{CURRENCY_SYMBOL}{}", group_thousands(amount))
}

/// Drops the fractional part instead of rounding, e.g. `₹24,999` for 24999.9.
pub(crate) fn currency_truncated(amount: f64) -> String {
    format!("{CURRENCY_SYMBOL}{}", group_thousands(amount.trunc()))
}

pub(crate) fn percent(value: f64) -> String {
    format!("{value:.1}")
}

/// Whole years keep one decimal (`6.0`); fractional years print as entered (`1.25`).
pub(crate) fn years(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

fn group_thousands(amount: f64) -> String {
    let digits = format!("{:.0}", amount.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if amount < 0.0 && digits != "0" {
        grouped.push('-');
    }

    let lead = digits.len() % 3;
    for (index, digit) in digits.chars().enumerate() {
        if index != 0 && (index + 3 - lead) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}
