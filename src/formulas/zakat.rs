// 🕌 Zakat - 2.5% levy on net wealth at or above the Nisab

use serde::{Deserialize, Serialize};

/// Fixed Nisab threshold in rupees
pub const NISAB_THRESHOLD: f64 = 450_000.0;

pub const ZAKAT_RATE: f64 = 0.025;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZakatResult {
    pub cash: f64,
    pub gold: f64,
    pub silver: f64,
    pub investments: f64,
    pub debts: f64,
    pub net_wealth: f64,
    pub nisab: f64,
    pub due: f64,
    pub eligible: bool,
}

pub fn compute_zakat(cash: f64, gold: f64, silver: f64, investments: f64, debts: f64) -> ZakatResult {
    let net_wealth = cash + gold + silver + investments - debts;
    let eligible = net_wealth >= NISAB_THRESHOLD;
    let due = if eligible { net_wealth * ZAKAT_RATE } else { 0.0 };

    ZakatResult {
        cash,
        gold,
        silver,
        investments,
        debts,
        net_wealth,
        nisab: NISAB_THRESHOLD,
        due,
        eligible,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_above_nisab() {
        let result = compute_zakat(500_000.0, 0.0, 0.0, 0.0, 0.0);
        assert!(result.eligible);
        assert_eq!(result.due, 12_500.0);
    }

    #[test]
    fn test_below_nisab() {
        let result = compute_zakat(100_000.0, 0.0, 0.0, 0.0, 0.0);
        assert!(!result.eligible);
        assert_eq!(result.due, 0.0);
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let result = compute_zakat(200_000.0, 150_000.0, 50_000.0, 50_000.0, 0.0);
        assert_eq!(result.net_wealth, NISAB_THRESHOLD);
        assert!(result.eligible);
        assert_eq!(result.due, 11_250.0);
    }

    #[test]
    fn test_debts_reduce_wealth() {
        let result = compute_zakat(300_000.0, 200_000.0, 0.0, 100_000.0, 200_000.0);
        assert_eq!(result.net_wealth, 400_000.0);
        assert!(!result.eligible);
    }
}
