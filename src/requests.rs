// 📝 Calculator Requests - shell inputs validated before any formula runs
// Raw form text (TUI/CLI) or JSON numbers (API) both pass through the same gates

use crate::error::{CalcError, Result};
use crate::formulas::{
    compute_emi, compute_savings_goal, compute_sip, compute_tax, compute_zakat, Conversion,
    EmiResult, ExchangeRateTable, RateQuote, SavingsOutcome, SipResult, TaxRegime, TaxResult,
    ZakatResult,
};
use crate::validator::{
    lenient, parse_float, CURRENCY_AMOUNT, LOAN_AMOUNT, LOAN_RATE, LOAN_TENURE, SAVINGS_GOAL,
    SAVINGS_INTEREST, SAVINGS_MONTHLY, SIP_MONTHLY, SIP_PERIOD, SIP_RETURN, TAX_DEDUCTIONS,
    TAX_INCOME,
};
use serde::{Deserialize, Serialize};

/// Required field: unparseable text becomes NaN so the range check rejects it
fn required(raw: &str) -> f64 {
    parse_float(raw).unwrap_or(f64::NAN)
}

/// Optional field: blank text is treated as absent
fn optional(raw: &str) -> Option<f64> {
    if raw.trim().is_empty() {
        None
    } else {
        Some(lenient(raw))
    }
}

// ============================================================================
// EMI
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmiRequest {
    pub loan_amount: f64,
    pub interest_rate: f64,
    pub tenure_years: f64,
}

impl EmiRequest {
    pub fn from_raw(loan_amount: &str, interest_rate: &str, tenure_years: &str) -> Self {
        EmiRequest {
            loan_amount: required(loan_amount),
            interest_rate: required(interest_rate),
            tenure_years: required(tenure_years),
        }
    }

    pub fn calculate(&self) -> Result<EmiResult> {
        let amount = LOAN_AMOUNT.check(self.loan_amount)?;
        let rate = LOAN_RATE.check(self.interest_rate)?;
        let tenure = LOAN_TENURE.check(self.tenure_years)?;
        Ok(compute_emi(amount.value(), rate.value(), tenure.value()))
    }
}

// ============================================================================
// SIP
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SipRequest {
    pub monthly_investment: f64,
    pub expected_return: f64,
    pub period_years: f64,
}

impl SipRequest {
    pub fn from_raw(monthly_investment: &str, expected_return: &str, period_years: &str) -> Self {
        SipRequest {
            monthly_investment: required(monthly_investment),
            expected_return: required(expected_return),
            period_years: required(period_years),
        }
    }

    pub fn calculate(&self) -> Result<SipResult> {
        let monthly = SIP_MONTHLY.check(self.monthly_investment)?;
        let rate = SIP_RETURN.check(self.expected_return)?;
        let period = SIP_PERIOD.check(self.period_years)?;
        Ok(compute_sip(monthly.value(), rate.value(), period.value()))
    }
}

// ============================================================================
// INCOME TAX
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxRequest {
    pub annual_income: f64,
    pub regime: String,
    #[serde(default)]
    pub deductions: Option<f64>,
}

impl TaxRequest {
    pub fn from_raw(annual_income: &str, regime: &str, deductions: &str) -> Self {
        TaxRequest {
            annual_income: required(annual_income),
            regime: regime.to_string(),
            deductions: optional(deductions),
        }
    }

    pub fn calculate(&self) -> Result<TaxResult> {
        let income = TAX_INCOME.check(self.annual_income)?;
        let deductions = TAX_DEDUCTIONS.check(self.deductions.unwrap_or(0.0))?;
        let regime: TaxRegime = self.regime.parse()?;
        Ok(compute_tax(income.value(), regime, deductions.value()))
    }
}

// ============================================================================
// CURRENCY
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyRequest {
    pub amount: f64,
    pub from: String,
    pub to: String,
    /// Ask the shell to try the live rate service first
    #[serde(default)]
    pub live: bool,
}

impl CurrencyRequest {
    pub fn from_raw(amount: &str, from: &str, to: &str) -> Self {
        CurrencyRequest {
            amount: required(amount),
            from: from.trim().to_ascii_uppercase(),
            to: to.trim().to_ascii_uppercase(),
            live: false,
        }
    }

    /// Amount and pair checks shared by static and live conversion
    pub fn validate(&self) -> Result<f64> {
        let amount = CURRENCY_AMOUNT.check(self.amount)?;
        if self.from == self.to {
            return Err(CalcError::SameCurrency);
        }
        Ok(amount.value())
    }

    /// Convert with the static table
    pub fn calculate(&self) -> Result<Conversion> {
        let amount = self.validate()?;
        let quote = ExchangeRateTable::fallback().quote(&self.from, &self.to)?;
        Ok(Conversion::with_quote(amount, quote))
    }

    /// Convert with a quote obtained elsewhere (e.g. the live service)
    pub fn calculate_with(&self, quote: RateQuote) -> Result<Conversion> {
        let amount = self.validate()?;
        Ok(Conversion::with_quote(amount, quote))
    }
}

// ============================================================================
// ZAKAT
// ============================================================================

/// Every field is optional and defaults to zero
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ZakatRequest {
    #[serde(default)]
    pub cash: Option<f64>,
    #[serde(default)]
    pub gold: Option<f64>,
    #[serde(default)]
    pub silver: Option<f64>,
    #[serde(default)]
    pub investments: Option<f64>,
    #[serde(default)]
    pub debts: Option<f64>,
}

impl ZakatRequest {
    pub fn from_raw(cash: &str, gold: &str, silver: &str, investments: &str, debts: &str) -> Self {
        ZakatRequest {
            cash: optional(cash),
            gold: optional(gold),
            silver: optional(silver),
            investments: optional(investments),
            debts: optional(debts),
        }
    }

    pub fn calculate(&self) -> Result<ZakatResult> {
        let or_zero = |v: Option<f64>| v.filter(|x| !x.is_nan()).unwrap_or(0.0);
        Ok(compute_zakat(
            or_zero(self.cash),
            or_zero(self.gold),
            or_zero(self.silver),
            or_zero(self.investments),
            or_zero(self.debts),
        ))
    }
}

// ============================================================================
// SAVINGS GOAL
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsRequest {
    pub goal_amount: f64,
    #[serde(default)]
    pub current_savings: Option<f64>,
    pub monthly_savings: f64,
    #[serde(default)]
    pub interest_rate: Option<f64>,
}

impl SavingsRequest {
    pub fn from_raw(goal_amount: &str, current_savings: &str, monthly_savings: &str, interest_rate: &str) -> Self {
        SavingsRequest {
            goal_amount: required(goal_amount),
            current_savings: optional(current_savings),
            monthly_savings: required(monthly_savings),
            interest_rate: optional(interest_rate),
        }
    }

    pub fn calculate(&self) -> Result<SavingsOutcome> {
        let goal = SAVINGS_GOAL.check(self.goal_amount)?;
        let monthly = SAVINGS_MONTHLY.check(self.monthly_savings)?;
        let interest = SAVINGS_INTEREST.check(self.interest_rate.unwrap_or(0.0))?;
        let current = self.current_savings.unwrap_or(0.0);
        Ok(compute_savings_goal(goal.value(), current, monthly.value(), interest.value()))
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formulas::RateSource;

    #[test]
    fn test_emi_request_validates_each_field() {
        let ok = EmiRequest::from_raw("1000000", "10", "20").calculate().unwrap();
        assert!((ok.emi - 9650.22).abs() < 0.01);

        let err = EmiRequest::from_raw("500", "10", "20").calculate().unwrap_err();
        assert_eq!(err, CalcError::validation("loan_amount", LOAN_AMOUNT.message));

        let err = EmiRequest::from_raw("100000", "abc", "20").calculate().unwrap_err();
        assert_eq!(err, CalcError::validation("interest_rate", LOAN_RATE.message));

        let err = EmiRequest::from_raw("100000", "10", "31").calculate().unwrap_err();
        assert_eq!(err, CalcError::validation("loan_tenure", LOAN_TENURE.message));
    }

    #[test]
    fn test_sip_request_bounds() {
        assert!(SipRequest::from_raw("100", "1", "1").calculate().is_ok());
        assert!(SipRequest::from_raw("99", "12", "10").calculate().is_err());
        assert!(SipRequest::from_raw("5000", "12", "51").calculate().is_err());
    }

    #[test]
    fn test_tax_request_blank_deductions() {
        let result = TaxRequest::from_raw("1200000", "new", "").calculate().unwrap();
        assert!((result.total_tax - 85_800.0).abs() < 1e-9);

        let err = TaxRequest::from_raw("1200000", "old", "20000000").calculate().unwrap_err();
        assert_eq!(err, CalcError::validation("deductions", TAX_DEDUCTIONS.message));

        assert!(TaxRequest::from_raw("1200000", "flat", "").calculate().is_err());
    }

    #[test]
    fn test_currency_request() {
        let conversion = CurrencyRequest::from_raw("100", "usd", "inr").calculate().unwrap();
        assert_eq!(conversion.converted, 8300.0);

        let err = CurrencyRequest::from_raw("10", "USD", "USD").calculate().unwrap_err();
        assert_eq!(err, CalcError::SameCurrency);

        let err = CurrencyRequest::from_raw("-1", "USD", "INR").calculate().unwrap_err();
        assert_eq!(err, CalcError::validation("amount", CURRENCY_AMOUNT.message));
    }

    #[test]
    fn test_currency_with_external_quote() {
        let request = CurrencyRequest::from_raw("10", "USD", "INR");
        let quote = RateQuote {
            from: "USD".to_string(),
            to: "INR".to_string(),
            rate: 84.5,
            source: RateSource::Live,
            as_of: None,
        };
        let conversion = request.calculate_with(quote).unwrap();
        assert_eq!(conversion.converted, 845.0);
        assert!(!conversion.quote.is_approximate());
    }

    #[test]
    fn test_zakat_request_defaults_to_zero() {
        let result = ZakatRequest::from_raw("500000", "", "", "n/a", "").calculate().unwrap();
        assert_eq!(result.net_wealth, 500_000.0);
        assert!(result.eligible);

        let empty = ZakatRequest::default().calculate().unwrap();
        assert_eq!(empty.net_wealth, 0.0);
        assert!(!empty.eligible);
    }

    #[test]
    fn test_savings_request() {
        let outcome = SavingsRequest::from_raw("100000", "25000", "5000", "").calculate().unwrap();
        match outcome {
            SavingsOutcome::Plan(plan) => assert_eq!(plan.months_to_goal(), Some(15)),
            SavingsOutcome::AlreadyMet => panic!("goal is not met yet"),
        }

        let met = SavingsRequest::from_raw("1000", "5000", "100", "0").calculate().unwrap();
        assert_eq!(met, SavingsOutcome::AlreadyMet);

        assert!(SavingsRequest::from_raw("999", "", "100", "").calculate().is_err());
        assert!(SavingsRequest::from_raw("5000", "", "99", "").calculate().is_err());
        assert!(SavingsRequest::from_raw("5000", "", "100", "21").calculate().is_err());
        assert!(SavingsRequest::from_raw("Infinity", "", "100", "").calculate().is_err());
    }

    #[test]
    fn test_requests_deserialize_from_json() {
        let request: SavingsRequest =
            serde_json::from_str(r#"{"goal_amount": 50000, "monthly_savings": 2000}"#).unwrap();
        assert_eq!(request.current_savings, None);
        assert!(request.calculate().is_ok());

        let request: CurrencyRequest =
            serde_json::from_str(r#"{"amount": 5, "from": "EUR", "to": "JPY"}"#).unwrap();
        assert!(!request.live);
        assert_eq!(request.calculate().unwrap().converted, 805.0);
    }
}
