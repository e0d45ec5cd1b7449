// 🏠 EMI - Equated Monthly Installment for an amortizing loan

use super::monthly_rate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmiResult {
    pub principal: f64,
    pub months: f64,
    pub emi: f64,
    pub total_payment: f64,
    pub total_interest: f64,
}

/// `emi = P*r*(1+r)^n / ((1+r)^n - 1)` with `r` monthly and `n` in months.
///
/// A zero rate is not special-cased: `(1+0)^n - 1 == 0` and the result is NaN.
pub fn compute_emi(principal: f64, annual_rate_percent: f64, years: f64) -> EmiResult {
    let r = monthly_rate(annual_rate_percent);
    let n = years * 12.0;

    let growth = (1.0 + r).powf(n);
    let emi = principal * r * growth / (growth - 1.0);

    let total_payment = emi * n;
    let total_interest = total_payment - principal;

    EmiResult {
        principal,
        months: n,
        emi,
        total_payment,
        total_interest,
    }
}
