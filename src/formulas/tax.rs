// 🧾 Income Tax - Indian slab schedule, old and new regimes

use crate::error::{CalcError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Standard deduction applied in both regimes
pub const STANDARD_DEDUCTION: f64 = 50_000.0;

/// Health & Education cess on computed tax
pub const CESS_RATE: f64 = 0.04;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaxRegime {
    /// Allows deductions, four slabs
    Old,
    /// Standard deduction only, six slabs
    New,
}

impl TaxRegime {
    pub fn code(&self) -> &str {
        match self {
            TaxRegime::Old => "old",
            TaxRegime::New => "new",
        }
    }

    pub fn name(&self) -> &str {
        match self {
            TaxRegime::Old => "OLD",
            TaxRegime::New => "NEW",
        }
    }
}

impl fmt::Display for TaxRegime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for TaxRegime {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "old" => Ok(TaxRegime::Old),
            "new" => Ok(TaxRegime::New),
            _ => Err(CalcError::validation(
                "tax_regime",
                "Please select the old or new tax regime",
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TaxResult {
    pub regime: TaxRegime,
    pub annual_income: f64,
    pub taxable_income: f64,
    pub tax: f64,
    pub cess: f64,
    pub total_tax: f64,
    pub net_income: f64,
}

fn old_regime_tax(taxable: f64) -> f64 {
    if taxable <= 250_000.0 {
        0.0
    } else if taxable <= 500_000.0 {
        (taxable - 250_000.0) * 0.05
    } else if taxable <= 1_000_000.0 {
        12_500.0 + (taxable - 500_000.0) * 0.20
    } else {
        12_500.0 + 100_000.0 + (taxable - 1_000_000.0) * 0.30
    }
}

fn new_regime_tax(taxable: f64) -> f64 {
    if taxable <= 300_000.0 {
        0.0
    } else if taxable <= 600_000.0 {
        (taxable - 300_000.0) * 0.05
    } else if taxable <= 900_000.0 {
        15_000.0 + (taxable - 600_000.0) * 0.10
    } else if taxable <= 1_200_000.0 {
        45_000.0 + (taxable - 900_000.0) * 0.15
    } else if taxable <= 1_500_000.0 {
        90_000.0 + (taxable - 1_200_000.0) * 0.20
    } else {
        150_000.0 + (taxable - 1_500_000.0) * 0.30
    }
}

/// Deductions only count under the old regime.
pub fn compute_tax(annual_income: f64, regime: TaxRegime, deductions: f64) -> TaxResult {
    let (taxable_income, tax) = match regime {
        TaxRegime::Old => {
            let taxable = (annual_income - deductions - STANDARD_DEDUCTION).max(0.0);
            (taxable, old_regime_tax(taxable))
        }
        TaxRegime::New => {
            let taxable = (annual_income - STANDARD_DEDUCTION).max(0.0);
            (taxable, new_regime_tax(taxable))
        }
    };

    let cess = tax * CESS_RATE;
    let total_tax = tax + cess;

    TaxResult {
        regime,
        annual_income,
        taxable_income,
        tax,
        cess,
        total_tax,
        net_income: annual_income - total_tax,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_regime_reference_case() {
        let result = compute_tax(1_200_000.0, TaxRegime::New, 0.0);
        assert_eq!(result.taxable_income, 1_150_000.0);
        assert!((result.tax - 82_500.0).abs() < 1e-9);
        assert!((result.cess - 3_300.0).abs() < 1e-9);
        assert!((result.total_tax - 85_800.0).abs() < 1e-9);
        assert!((result.net_income - 1_114_200.0).abs() < 1e-9);
    }

    #[test]
    fn test_new_regime_ignores_deductions() {
        let with = compute_tax(1_200_000.0, TaxRegime::New, 150_000.0);
        let without = compute_tax(1_200_000.0, TaxRegime::New, 0.0);
        assert_eq!(with, without);
    }

    #[test]
    fn test_old_regime_slabs() {
        // taxable = 1,000,000 - 150,000 - 50,000 = 800,000
        let result = compute_tax(1_000_000.0, TaxRegime::Old, 150_000.0);
        assert_eq!(result.taxable_income, 800_000.0);
        assert!((result.tax - 72_500.0).abs() < 1e-9);

        // top slab: 12,500 + 100,000 + 30% of 500,000
        let top = compute_tax(1_550_000.0, TaxRegime::Old, 0.0);
        assert_eq!(top.taxable_income, 1_500_000.0);
        assert!((top.tax - 262_500.0).abs() < 1e-9);
    }

    #[test]
    fn test_slab_boundaries_are_inclusive() {
        assert_eq!(old_regime_tax(250_000.0), 0.0);
        assert!((old_regime_tax(500_000.0) - 12_500.0).abs() < 1e-9);
        assert_eq!(new_regime_tax(300_000.0), 0.0);
        assert!((new_regime_tax(1_500_000.0) - 150_000.0).abs() < 1e-9);
    }

    #[test]
    fn test_taxable_income_floors_at_zero() {
        let result = compute_tax(30_000.0, TaxRegime::Old, 100_000.0);
        assert_eq!(result.taxable_income, 0.0);
        assert_eq!(result.total_tax, 0.0);
        assert_eq!(result.net_income, 30_000.0);
    }

    #[test]
    fn test_regime_parsing() {
        assert_eq!("old".parse::<TaxRegime>().unwrap(), TaxRegime::Old);
        assert_eq!(" NEW ".parse::<TaxRegime>().unwrap(), TaxRegime::New);
        assert!("flat".parse::<TaxRegime>().is_err());
    }
}
