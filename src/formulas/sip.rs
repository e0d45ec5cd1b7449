// 📈 SIP - Systematic Investment Plan maturity value

use super::monthly_rate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SipResult {
    pub monthly_investment: f64,
    pub years: f64,
    pub future_value: f64,
    pub total_investment: f64,
    pub total_returns: f64,
}

/// Future value of an annuity-due: contributions at the start of each month.
pub fn compute_sip(monthly_investment: f64, annual_return_percent: f64, years: f64) -> SipResult {
    let r = monthly_rate(annual_return_percent);
    let n = years * 12.0;

    let future_value = monthly_investment * (((1.0 + r).powf(n) - 1.0) / r) * (1.0 + r);
    let total_investment = monthly_investment * n;
    let total_returns = future_value - total_investment;

    SipResult {
        monthly_investment,
        years,
        future_value,
        total_investment,
        total_returns,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ten_year_sip() {
        let result = compute_sip(5_000.0, 12.0, 10.0);
        assert_eq!(result.total_investment, 600_000.0);
        assert!((result.future_value - 1_161_695.38).abs() < 0.01, "fv was {}", result.future_value);
        assert!((result.total_returns - (result.future_value - 600_000.0)).abs() < 1e-9);
    }

    #[test]
    fn test_single_year_growth() {
        let result = compute_sip(1_000.0, 12.0, 1.0);
        // 1% monthly, annuity-due over 12 months
        assert!((result.future_value - 12_809.33).abs() < 0.01, "fv was {}", result.future_value);
    }
}
