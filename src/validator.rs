// 🛡️ Input Validator - range gate in front of every calculator
// Parses raw field text the way a browser form does and checks closed ranges

use crate::error::{CalcError, Result};
use serde::Serialize;

// ============================================================================
// PARSING
// ============================================================================

/// Parse the longest numeric prefix of `raw`, mirroring JavaScript's `parseFloat`.
///
/// Leading whitespace is skipped, `"12abc"` parses as `12`, `"Infinity"` is
/// accepted with an optional sign. Returns `None` when no numeric prefix exists.
pub fn parse_float(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }

    if s[end..].starts_with("Infinity") {
        let negative = bytes.first() == Some(&b'-');
        return Some(if negative { f64::NEG_INFINITY } else { f64::INFINITY });
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }

    if digits == 0 {
        return None;
    }

    // Exponent only counts when at least one digit follows it
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok()
}

/// `parseFloat(raw) || 0` for optional fields: blank or garbage becomes zero.
pub fn lenient(raw: &str) -> f64 {
    match parse_float(raw) {
        Some(v) if !v.is_nan() => v,
        _ => 0.0,
    }
}

/// True iff `raw` parses and lies within `[min, max]` inclusive.
pub fn validate(raw: &str, min: f64, max: f64) -> bool {
    match parse_float(raw) {
        Some(v) => in_range(v, min, max),
        None => false,
    }
}

fn in_range(value: f64, min: f64, max: f64) -> bool {
    !value.is_nan() && value >= min && value <= max
}

// ============================================================================
// VALIDATED NUMBER
// ============================================================================

/// A number that passed a [`FieldRange`] check
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ValidatedNumber(f64);

impl ValidatedNumber {
    pub fn value(self) -> f64 {
        self.0
    }
}

// ============================================================================
// FIELD RANGES
// ============================================================================

/// Closed interval for one input field, with the message shown on rejection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldRange {
    pub field: &'static str,
    pub min: f64,
    pub max: f64,
    pub message: &'static str,
}

impl FieldRange {
    pub const fn new(field: &'static str, min: f64, max: f64, message: &'static str) -> Self {
        FieldRange {
            field,
            min,
            max,
            message,
        }
    }

    /// Gate an already-parsed value; infinities never pass, even below an unbounded `max`
    pub fn check(&self, value: f64) -> Result<ValidatedNumber> {
        if self.contains(value) {
            Ok(ValidatedNumber(value))
        } else {
            tracing::debug!(field = self.field, value, "rejected out-of-range input");
            Err(CalcError::validation(self.field, self.message))
        }
    }

    /// Gate raw field text
    pub fn check_raw(&self, raw: &str) -> Result<ValidatedNumber> {
        self.check(parse_float(raw).unwrap_or(f64::NAN))
    }

    pub fn contains(&self, value: f64) -> bool {
        value.is_finite() && in_range(value, self.min, self.max)
    }
}

// EMI
pub const LOAN_AMOUNT: FieldRange = FieldRange::new(
    "loan_amount",
    1_000.0,
    100_000_000.0,
    "Please enter a valid loan amount between ₹1,000 and ₹10,00,00,000",
);
pub const LOAN_RATE: FieldRange = FieldRange::new(
    "interest_rate",
    1.0,
    30.0,
    "Please enter a valid interest rate between 1% and 30%",
);
pub const LOAN_TENURE: FieldRange = FieldRange::new(
    "loan_tenure",
    1.0,
    30.0,
    "Please enter a valid loan tenure between 1 and 30 years",
);

// SIP
pub const SIP_MONTHLY: FieldRange = FieldRange::new(
    "monthly_investment",
    100.0,
    1_000_000.0,
    "Please enter a valid monthly investment between ₹100 and ₹10,00,000",
);
pub const SIP_RETURN: FieldRange = FieldRange::new(
    "expected_return",
    1.0,
    30.0,
    "Please enter a valid expected return between 1% and 30%",
);
pub const SIP_PERIOD: FieldRange = FieldRange::new(
    "investment_period",
    1.0,
    50.0,
    "Please enter a valid investment period between 1 and 50 years",
);

// Income tax
pub const TAX_INCOME: FieldRange = FieldRange::new(
    "annual_income",
    0.0,
    100_000_000.0,
    "Please enter a valid annual income",
);
pub const TAX_DEDUCTIONS: FieldRange = FieldRange::new(
    "deductions",
    0.0,
    10_000_000.0,
    "Please enter valid deductions",
);

// Currency
pub const CURRENCY_AMOUNT: FieldRange = FieldRange::new(
    "amount",
    0.0,
    f64::INFINITY,
    "Please enter a valid amount",
);

// Savings goal
pub const SAVINGS_GOAL: FieldRange = FieldRange::new(
    "goal_amount",
    1_000.0,
    f64::INFINITY,
    "Please enter a valid goal amount",
);
pub const SAVINGS_MONTHLY: FieldRange = FieldRange::new(
    "monthly_savings",
    100.0,
    f64::INFINITY,
    "Please enter a valid monthly savings amount",
);
pub const SAVINGS_INTEREST: FieldRange = FieldRange::new(
    "savings_interest",
    0.0,
    20.0,
    "Please enter a valid interest rate between 0% and 20%",
);

// ============================================================================
// TESTS
// ============================================================================


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_validate_matches_bounds(
            value in -1.0e9f64..1.0e9,
            min in -1.0e6f64..1.0e6,
            width in 0.0f64..1.0e6,
        ) {
            let max = min + width;
            let raw = value.to_string();
            let parsed = parse_float(&raw).unwrap();
            prop_assert_eq!(validate(&raw, min, max), min <= parsed && parsed <= max);
        }

        #[test]
        fn prop_parse_float_roundtrips_display(value in -1.0e12f64..1.0e12) {
            prop_assert_eq!(parse_float(&value.to_string()), Some(value));
        }
    }
}
