//! Debt account data structures matching the debts.csv format

use crate::error::ConfigError;
use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A single debt account (credit card, loan, line of credit)
///
/// Everything except the balance is fixed for the whole projection. The
/// balance itself lives in the simulation state, never on the account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtAccount {
    /// Unique account name, also used as the output column name
    pub name: String,

    /// Balance owed at the start of the projection
    pub start_balance: f64,

    /// Standard nominal APR as a decimal (0.249 = 24.9%)
    pub apr: f64,

    /// Minimum payment as a fraction of the post-interest balance
    pub min_pct: f64,

    /// Reduced APR in effect through `promo_end`
    #[serde(default)]
    pub promo_apr: Option<f64>,

    /// Last date on which `promo_apr` applies
    #[serde(default)]
    pub promo_end: Option<NaiveDate>,
}

impl DebtAccount {
    /// Create an account with no promotional rate
    pub fn new(name: impl Into<String>, start_balance: f64, apr: f64, min_pct: f64) -> Self {
        Self {
            name: name.into(),
            start_balance,
            apr,
            min_pct,
            promo_apr: None,
            promo_end: None,
        }
    }

    /// Attach a promotional rate window
    pub fn with_promo(mut self, promo_apr: f64, promo_end: NaiveDate) -> Self {
        self.promo_apr = Some(promo_apr);
        self.promo_end = Some(promo_end);
        self
    }

    /// Promo rate and end date, only when both are defined
    pub fn promo(&self) -> Option<(f64, NaiveDate)> {
        match (self.promo_apr, self.promo_end) {
            (Some(rate), Some(end)) => Some((rate, end)),
            _ => None,
        }
    }

    /// Whether the promotional rate applies in `month` (inclusive of the end date)
    pub fn promo_active(&self, month: NaiveDate) -> bool {
        self.promo().is_some_and(|(_, end)| month <= end)
    }

    /// The APR actually charged in `month`
    pub fn effective_apr(&self, month: NaiveDate) -> f64 {
        match self.promo() {
            Some((rate, end)) if month <= end => rate,
            _ => self.apr,
        }
    }

    /// One month of simple interest on `balance` at the effective APR
    pub fn monthly_interest(&self, balance: f64, month: NaiveDate) -> f64 {
        if balance <= 0.0 {
            return 0.0;
        }
        balance * self.effective_apr(month) / 12.0
    }

    /// Whether an active promo expires within `lookahead_months` of `month`
    pub fn promo_expires_within(&self, month: NaiveDate, lookahead_months: u32) -> bool {
        let Some((_, end)) = self.promo() else {
            return false;
        };
        if month > end {
            return false;
        }
        match month.checked_add_months(Months::new(lookahead_months)) {
            Some(horizon) => end <= horizon,
            None => true,
        }
    }

    /// Check balances and rates are finite and non-negative
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut fields = vec![
            ("start_balance", self.start_balance),
            ("apr", self.apr),
            ("min_pct", self.min_pct),
        ];
        if let Some(rate) = self.promo_apr {
            fields.push(("promo_apr", rate));
        }

        for (field, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidValue {
                    account: self.name.clone(),
                    field,
                    value,
                });
            }
        }
        Ok(())
    }
}

/// Validate every account and reject duplicate names
pub fn validate_accounts(accounts: &[DebtAccount]) -> Result<(), ConfigError> {
    let mut seen = HashSet::with_capacity(accounts.len());
    for account in accounts {
        account.validate()?;
        if !seen.insert(account.name.as_str()) {
            return Err(ConfigError::DuplicateName(account.name.clone()));
        }
    }
    Ok(())
}
