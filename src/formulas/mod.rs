// 🧮 Formula Bank - one pure function per financial product
// No state, no I/O: identical inputs always give bitwise-identical results

pub mod currency;
pub mod emi;
pub mod savings;
pub mod sip;
pub mod tax;
pub mod zakat;

pub use currency::{convert_currency, Conversion, ExchangeRateTable, RateQuote, RateSource};
pub use emi::{compute_emi, EmiResult};
pub use savings::{compute_savings_goal, SavingsOutcome, SavingsPlan};
pub use sip::{compute_sip, SipResult};
pub use tax::{compute_tax, TaxRegime, TaxResult};
pub use zakat::{compute_zakat, ZakatResult, NISAB_THRESHOLD, ZAKAT_RATE};

/// Monthly rate from an annual percentage: `pct / 12 / 100`
pub(crate) fn monthly_rate(annual_percent: f64) -> f64 {
    annual_percent / 12.0 / 100.0
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_emi_totals_are_consistent(
            amount in 1_000.0f64..1.0e8,
            rate in 1.0f64..30.0,
            years in 1u32..=30,
        ) {
            let result = compute_emi(amount, rate, years as f64);
            let months = (years * 12) as f64;
            prop_assert!((result.total_payment - result.emi * months).abs() < 1e-6);
            prop_assert!((result.total_interest - (result.total_payment - amount)).abs() < 1e-6);
            prop_assert!(result.total_interest > 0.0);
        }

        #[test]
        fn prop_formulas_are_idempotent(
            amount in 1_000.0f64..1.0e8,
            rate in 1.0f64..30.0,
            years in 1.0f64..30.0,
        ) {
            let a = compute_emi(amount, rate, years);
            let b = compute_emi(amount, rate, years);
            prop_assert_eq!(a.emi.to_bits(), b.emi.to_bits());
            prop_assert_eq!(a.total_interest.to_bits(), b.total_interest.to_bits());

            let s1 = compute_sip(amount / 100.0, rate, years);
            let s2 = compute_sip(amount / 100.0, rate, years);
            prop_assert_eq!(s1.future_value.to_bits(), s2.future_value.to_bits());

            let t1 = compute_tax(amount, TaxRegime::New, 0.0);
            let t2 = compute_tax(amount, TaxRegime::New, 0.0);
            prop_assert_eq!(t1.total_tax.to_bits(), t2.total_tax.to_bits());
        }

        #[test]
        fn prop_sip_returns_are_positive(
            monthly in 100.0f64..1.0e6,
            rate in 1.0f64..30.0,
            years in 1u32..=50,
        ) {
            let result = compute_sip(monthly, rate, years as f64);
            prop_assert!(result.future_value > result.total_investment);
            prop_assert!((result.total_returns - (result.future_value - result.total_investment)).abs() < 1e-6);
        }

        #[test]
        fn prop_tax_never_exceeds_income(
            income in 0.0f64..1.0e8,
            deductions in 0.0f64..1.0e7,
        ) {
            for regime in [TaxRegime::Old, TaxRegime::New] {
                let result = compute_tax(income, regime, deductions);
                prop_assert!(result.taxable_income >= 0.0);
                prop_assert!(result.total_tax >= 0.0);
                prop_assert!(result.total_tax <= income);
                prop_assert!((result.total_tax - result.tax * 1.04).abs() < 1e-6);
            }
        }
    }
}
