// 🎯 Savings Goal - months needed to reach a target

use super::monthly_rate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SavingsPlan {
    pub goal: f64,
    pub current: f64,
    pub monthly_saving: f64,
    pub remaining: f64,
    /// Unrounded month estimate
    pub months: f64,
    pub years: f64,
    pub total_saved: f64,
    pub progress_pct: f64,
}

impl SavingsPlan {
    /// Whole months shown to the user, `None` when the estimate is not a finite count
    pub fn months_to_goal(&self) -> Option<u64> {
        if !self.months.is_finite() || self.months < 0.0 || self.months >= u64::MAX as f64 {
            return None;
        }
        Some(self.months.ceil() as u64)
    }

    /// Progress clamped for a progress bar
    pub fn progress_ratio(&self) -> f64 {
        (self.progress_pct / 100.0).clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SavingsOutcome {
    AlreadyMet,
    Plan(SavingsPlan),
}

/// With interest the estimate is `ln(goal*r/monthly + 1) / ln(1+r)`; a negative
/// or non-finite estimate falls back to the linear `remaining / monthly`.
pub fn compute_savings_goal(
    goal: f64,
    current: f64,
    monthly_saving: f64,
    interest_percent: f64,
) -> SavingsOutcome {
    let remaining = goal - current;
    if remaining <= 0.0 {
        return SavingsOutcome::AlreadyMet;
    }

    let linear = remaining / monthly_saving;
    let months = if interest_percent > 0.0 {
        let r = monthly_rate(interest_percent);
        let estimate = (goal * r / monthly_saving + 1.0).ln() / (1.0 + r).ln();
        if estimate < 0.0 || !estimate.is_finite() {
            linear
        } else {
            estimate
        }
    } else {
        linear
    };

    SavingsOutcome::Plan(SavingsPlan {
        goal,
        current,
        monthly_saving,
        remaining,
        months,
        years: months / 12.0,
        total_saved: monthly_saving * months,
        progress_pct: current / goal * 100.0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan(outcome: SavingsOutcome) -> SavingsPlan {
        match outcome {
            SavingsOutcome::Plan(plan) => plan,
            SavingsOutcome::AlreadyMet => panic!("expected a plan"),
        }
    }

    #[test]
    fn test_goal_already_met() {
        assert_eq!(compute_savings_goal(50_000.0, 50_000.0, 1_000.0, 5.0), SavingsOutcome::AlreadyMet);
        assert_eq!(compute_savings_goal(50_000.0, 60_000.0, 1_000.0, 0.0), SavingsOutcome::AlreadyMet);
    }

    #[test]
    fn test_without_interest() {
        let p = plan(compute_savings_goal(100_000.0, 25_000.0, 5_000.0, 0.0));
        assert_eq!(p.months, 15.0);
        assert_eq!(p.months_to_goal(), Some(15));
        assert_eq!(p.years, 1.25);
        assert_eq!(p.total_saved, 75_000.0);
        assert_eq!(p.progress_pct, 25.0);
    }

    #[test]
    fn test_with_interest_uses_log_formula() {
        let p = plan(compute_savings_goal(120_000.0, 0.0, 10_000.0, 12.0));
        let expected = (120_000.0 * 0.01 / 10_000.0 + 1.0f64).ln() / 1.01f64.ln();
        assert!((p.months - expected).abs() < 1e-12);
        assert_eq!(p.months_to_goal(), Some(12));
    }

    #[test]
    fn test_fractional_months_round_up() {
        let p = plan(compute_savings_goal(10_000.0, 0.0, 3_000.0, 0.0));
        assert_eq!(p.months_to_goal(), Some(4));
    }

    #[test]
    fn test_unbounded_estimate_has_no_month_count() {
        let p = plan(compute_savings_goal(f64::INFINITY, 0.0, 1_000.0, 0.0));
        assert!(p.months.is_infinite());
        assert_eq!(p.months_to_goal(), None);
    }

    #[test]
    fn test_progress_ratio_clamps() {
        let p = plan(compute_savings_goal(10_000.0, -500.0, 1_000.0, 0.0));
        assert_eq!(p.progress_ratio(), 0.0);
    }
}
