//! Working balances for a single simulation run

use crate::debt::DebtAccount;
use chrono::NaiveDate;

/// Balances being rolled forward by one run
///
/// `balances` is parallel to the run's account slice and keeps one entry
/// per account for the whole run, including accounts already paid off.
#[derive(Debug, Clone)]
pub struct SimulationState {
    /// Month currently being processed (first of month)
    pub current_month: NaiveDate,

    /// Number of months processed so far
    pub months_processed: u32,

    /// Current balance per account, never negative
    pub balances: Vec<f64>,
}

impl SimulationState {
    /// Initialize from account starting balances
    pub fn from_accounts(accounts: &[DebtAccount], start_month: NaiveDate) -> Self {
        Self {
            current_month: start_month,
            months_processed: 0,
            balances: accounts.iter().map(|a| a.start_balance).collect(),
        }
    }

    /// Move to the next month to process
    pub fn advance_to(&mut self, month: NaiveDate) {
        debug_assert!(self.months_processed == 0 || month > self.current_month);
        self.current_month = month;
        self.months_processed += 1;
    }

    /// Add accrued interest to an account
    pub fn accrue(&mut self, index: usize, interest: f64) {
        self.balances[index] += interest;
    }

    /// Pay up to `amount` toward an account and return what was applied
    ///
    /// The payment is capped at the balance, so balances never go negative.
    pub fn pay(&mut self, index: usize, amount: f64) -> f64 {
        let applied = amount.min(self.balances[index]).max(0.0);
        self.balances[index] -= applied;
        applied
    }

    pub fn total_balance(&self) -> f64 {
        self.balances.iter().sum()
    }

    pub fn is_paid_off(&self) -> bool {
        self.balances.iter().all(|&b| b <= 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pay_caps_at_balance() {
        let accounts = vec![DebtAccount::new("CardA", 100.0, 0.2, 0.02)];
        let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let mut state = SimulationState::from_accounts(&accounts, start);

        assert_eq!(state.pay(0, 40.0), 40.0);
        assert_eq!(state.pay(0, 500.0), 60.0);
        assert_eq!(state.balances[0], 0.0);
        assert!(state.is_paid_off());
        assert_eq!(state.pay(0, 10.0), 0.0);
    }

    #[test]
    fn test_advance_counts_months() {
        let accounts = vec![DebtAccount::new("CardA", 100.0, 0.2, 0.02)];
        let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let mut state = SimulationState::from_accounts(&accounts, start);
        assert!(!state.is_paid_off());

        state.advance_to(start);
        state.advance_to(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());

        assert_eq!(state.months_processed, 2);
        assert_eq!(state.current_month, NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
    }
}
