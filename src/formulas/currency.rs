// 💱 Currency Conversion - static fallback rate table
// Live rates are an optional collaborator (see `live_rates`); this table is always available

use crate::error::{CalcError, Result};
use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Currencies offered by the converter, in menu order
pub const SUPPORTED_CURRENCIES: &[&str] = &["USD", "INR", "EUR", "GBP", "JPY", "AUD", "CAD"];

const FALLBACK_RATES: &[(&str, &[(&str, f64)])] = &[
    ("USD", &[("INR", 83.00), ("EUR", 0.92), ("GBP", 0.79), ("JPY", 149.00), ("AUD", 1.52), ("CAD", 1.36)]),
    ("INR", &[("USD", 0.012), ("EUR", 0.011), ("GBP", 0.0095), ("JPY", 1.79), ("AUD", 0.018), ("CAD", 0.016)]),
    ("EUR", &[("USD", 1.08), ("INR", 90.00), ("GBP", 0.86), ("JPY", 161.00), ("AUD", 1.65), ("CAD", 1.47)]),
    ("GBP", &[("USD", 1.26), ("INR", 105.00), ("EUR", 1.16), ("JPY", 187.00), ("AUD", 1.92), ("CAD", 1.71)]),
    ("JPY", &[("USD", 0.0067), ("INR", 0.56), ("EUR", 0.0062), ("GBP", 0.0053), ("AUD", 0.010), ("CAD", 0.0091)]),
    ("AUD", &[("USD", 0.66), ("INR", 54.60), ("EUR", 0.61), ("GBP", 0.52), ("JPY", 98.00), ("CAD", 0.89)]),
    ("CAD", &[("USD", 0.74), ("INR", 61.20), ("EUR", 0.68), ("GBP", 0.58), ("JPY", 110.00), ("AUD", 1.12)]),
];

lazy_static! {
    static ref STATIC_TABLE: ExchangeRateTable = ExchangeRateTable::from_pairs(FALLBACK_RATES);
}

// ============================================================================
// RATE QUOTE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RateSource {
    /// Built-in approximate table
    Static,
    /// Fetched from the live rate service
    Live,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateQuote {
    pub from: String,
    pub to: String,
    pub rate: f64,
    pub source: RateSource,
    /// When the provider last refreshed the rate (live quotes only)
    pub as_of: Option<DateTime<Utc>>,
}

impl RateQuote {
    pub fn is_approximate(&self) -> bool {
        self.source == RateSource::Static
    }
}

// ============================================================================
// EXCHANGE RATE TABLE
// ============================================================================

/// Read-only `from -> (to -> rate)` mapping
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExchangeRateTable {
    rates: BTreeMap<String, BTreeMap<String, f64>>,
}

impl ExchangeRateTable {
    fn from_pairs(pairs: &[(&str, &[(&str, f64)])]) -> Self {
        let rates = pairs
            .iter()
            .map(|(from, targets)| {
                let row = targets
                    .iter()
                    .map(|(to, rate)| (to.to_string(), *rate))
                    .collect();
                (from.to_string(), row)
            })
            .collect();
        ExchangeRateTable { rates }
    }

    /// The process-wide fallback table
    pub fn fallback() -> &'static ExchangeRateTable {
        &STATIC_TABLE
    }

    pub fn rate(&self, from: &str, to: &str) -> Option<f64> {
        self.rates.get(from).and_then(|row| row.get(to)).copied()
    }

    pub fn contains(&self, code: &str) -> bool {
        self.rates.contains_key(code)
    }

    pub fn currencies(&self) -> impl Iterator<Item = &str> {
        self.rates.keys().map(String::as_str)
    }

    pub fn targets(&self, from: &str) -> Option<&BTreeMap<String, f64>> {
        self.rates.get(from)
    }

    /// Look up a static quote, rejecting same-currency and unknown pairs
    pub fn quote(&self, from: &str, to: &str) -> Result<RateQuote> {
        if from == to {
            return Err(CalcError::SameCurrency);
        }
        let rate = self
            .rate(from, to)
            .ok_or_else(|| CalcError::UnsupportedCurrencyPair {
                from: from.to_string(),
                to: to.to_string(),
            })?;

        Ok(RateQuote {
            from: from.to_string(),
            to: to.to_string(),
            rate,
            source: RateSource::Static,
            as_of: None,
        })
    }
}

// ============================================================================
// CONVERSION
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversion {
    pub amount: f64,
    pub quote: RateQuote,
    pub converted: f64,
}

impl Conversion {
    pub fn with_quote(amount: f64, quote: RateQuote) -> Self {
        Conversion {
            amount,
            converted: amount * quote.rate,
            quote,
        }
    }

    pub fn rate(&self) -> f64 {
        self.quote.rate
    }
}

/// Convert `amount` using the static table.
pub fn convert_currency(amount: f64, from: &str, to: &str) -> Result<Conversion> {
    let quote = ExchangeRateTable::fallback().quote(from, to)?;
    Ok(Conversion::with_quote(amount, quote))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usd_to_inr() {
        let conversion = convert_currency(100.0, "USD", "INR").unwrap();
        assert_eq!(conversion.rate(), 83.0);
        assert_eq!(conversion.converted, 8300.0);
        assert!(conversion.quote.is_approximate());
        assert_eq!(conversion.quote.as_of, None);
    }

    #[test]
    fn test_same_currency_rejected() {
        assert_eq!(convert_currency(10.0, "USD", "USD"), Err(CalcError::SameCurrency));
    }

    #[test]
    fn test_unknown_currency_rejected() {
        let err = convert_currency(10.0, "USD", "XYZ").unwrap_err();
        assert_eq!(
            err,
            CalcError::UnsupportedCurrencyPair {
                from: "USD".to_string(),
                to: "XYZ".to_string()
            }
        );
        assert!(convert_currency(10.0, "BTC", "INR").is_err());
    }

    #[test]
    fn test_table_covers_every_supported_pair() {
        let table = ExchangeRateTable::fallback();
        for from in SUPPORTED_CURRENCIES {
            assert!(table.contains(from));
            for to in SUPPORTED_CURRENCIES {
                if from != to {
                    let rate = table.rate(from, to).unwrap();
                    assert!(rate > 0.0, "{} -> {} must be positive", from, to);
                }
            }
        }
        assert_eq!(table.currencies().count(), SUPPORTED_CURRENCIES.len());
    }

    #[test]
    fn test_zero_amount_converts_to_zero() {
        let conversion = convert_currency(0.0, "EUR", "GBP").unwrap();
        assert_eq!(conversion.converted, 0.0);
        assert_eq!(conversion.rate(), 0.86);
    }
}
