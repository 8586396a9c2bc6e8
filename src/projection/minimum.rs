//! Minimum payment rules
//!
//! The engine only asks a rule for the amount due on a post-interest
//! balance and caps the answer at that balance. Card issuers differ on the
//! formula, so the rule is a trait and the common variants ship as an enum.

use crate::debt::DebtAccount;
use serde::{Deserialize, Serialize};

/// Computes the minimum payment due for one account in one month
pub trait MinimumPayment: Send + Sync {
    /// Amount due on `balance` (already including this month's interest)
    fn minimum_due(&self, account: &DebtAccount, balance: f64) -> f64;
}

/// Built-in minimum payment formulas
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub enum MinimumPaymentRule {
    /// `balance * min_pct`
    #[default]
    PercentOfBalance,
    /// `max(floor, balance * min_pct)`, e.g. "2% or $25, whichever is greater"
    FlatFloor { floor: f64 },
}

impl MinimumPayment for MinimumPaymentRule {
    fn minimum_due(&self, account: &DebtAccount, balance: f64) -> f64 {
        let pct_due = balance * account.min_pct;
        match *self {
            MinimumPaymentRule::PercentOfBalance => pct_due,
            MinimumPaymentRule::FlatFloor { floor } => pct_due.max(floor),
        }
    }
}

impl<F> MinimumPayment for F
where
    F: Fn(&DebtAccount, f64) -> f64 + Send + Sync,
{
    fn minimum_due(&self, account: &DebtAccount, balance: f64) -> f64 {
        self(account, balance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_percent_of_balance() {
        let account = DebtAccount::new("CardA", 1000.0, 0.20, 0.02);
        let due = MinimumPaymentRule::PercentOfBalance.minimum_due(&account, 1016.666_666_7);
        assert_abs_diff_eq!(due, 20.333_333, epsilon = 1e-6);
    }

    #[test]
    fn test_flat_floor_applies_on_small_balances() {
        let account = DebtAccount::new("CardA", 1000.0, 0.20, 0.02);
        let rule = MinimumPaymentRule::FlatFloor { floor: 25.0 };

        assert_eq!(rule.minimum_due(&account, 500.0), 25.0);
        assert_abs_diff_eq!(rule.minimum_due(&account, 5000.0), 100.0, epsilon = 1e-9);
    }

    #[test]
    fn test_closure_rule() {
        let account = DebtAccount::new("Loan", 10_000.0, 0.06, 0.0);
        let fixed_installment = |_: &DebtAccount, _: f64| 350.0;
        assert_eq!(fixed_installment.minimum_due(&account, 9000.0), 350.0);
    }
}
