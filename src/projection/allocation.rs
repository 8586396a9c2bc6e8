//! Snowball methods and the payment priority they induce

use crate::debt::DebtAccount;
use crate::error::ConfigError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Policy for ordering accounts to receive cash beyond the minimums
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SnowballMethod {
    /// Most expensive debt first ("avalanche")
    HighestApr,
    /// Smallest balance first (classic snowball)
    SmallestBalance,
    /// Highest APR first, but debt sitting in an active promo window waits
    CustomPromoAware,
}

impl SnowballMethod {
    pub const ALL: [SnowballMethod; 3] = [
        SnowballMethod::HighestApr,
        SnowballMethod::SmallestBalance,
        SnowballMethod::CustomPromoAware,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SnowballMethod::HighestApr => "highest_apr",
            SnowballMethod::SmallestBalance => "smallest_balance",
            SnowballMethod::CustomPromoAware => "custom_promo_aware",
        }
    }
}

impl fmt::Display for SnowballMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SnowballMethod {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "highest_apr" => Ok(SnowballMethod::HighestApr),
            "smallest_balance" => Ok(SnowballMethod::SmallestBalance),
            "custom_promo_aware" => Ok(SnowballMethod::CustomPromoAware),
            other => Err(ConfigError::UnknownMethod(other.to_string())),
        }
    }
}

/// Ranking inputs for one account in one month
struct Candidate<'a> {
    index: usize,
    name: &'a str,
    balance: f64,
    apr: f64,
    /// Promo end date when the account is deferred behind non-promo debt
    deferred_until: Option<NaiveDate>,
}

fn by_highest_apr(a: &Candidate, b: &Candidate) -> Ordering {
    b.apr
        .total_cmp(&a.apr)
        .then_with(|| b.balance.total_cmp(&a.balance))
        .then_with(|| a.name.cmp(b.name))
}

fn by_smallest_balance(a: &Candidate, b: &Candidate) -> Ordering {
    a.balance
        .total_cmp(&b.balance)
        .then_with(|| b.apr.total_cmp(&a.apr))
        .then_with(|| a.name.cmp(b.name))
}

fn by_promo_awareness(a: &Candidate, b: &Candidate) -> Ordering {
    match (a.deferred_until, b.deferred_until) {
        (None, None) => by_highest_apr(a, b),
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(end_a), Some(end_b)) => end_a.cmp(&end_b).then_with(|| a.name.cmp(b.name)),
    }
}

/// Indices of accounts with a positive balance, highest priority first
///
/// `balances` is parallel to `accounts`. Ties are fully broken by name, so
/// the order never depends on input order. Under `CustomPromoAware`, an
/// active promo whose end falls within `promo_lookahead_months` of `month`
/// is no longer deferred and competes at its standard APR.
pub fn rank_accounts(
    accounts: &[DebtAccount],
    balances: &[f64],
    month: NaiveDate,
    method: SnowballMethod,
    promo_lookahead_months: Option<u32>,
) -> Vec<usize> {
    let mut candidates: Vec<Candidate> = accounts
        .iter()
        .zip(balances)
        .enumerate()
        .filter(|(_, (_, balance))| **balance > 0.0)
        .map(|(index, (account, &balance))| {
            let mut apr = account.effective_apr(month);
            let mut deferred_until = None;

            if method == SnowballMethod::CustomPromoAware && account.promo_active(month) {
                let expiring = promo_lookahead_months
                    .is_some_and(|lookahead| account.promo_expires_within(month, lookahead));
                if expiring {
                    apr = account.apr;
                } else {
                    deferred_until = account.promo_end;
                }
            }

            Candidate {
                index,
                name: &account.name,
                balance,
                apr,
                deferred_until,
            }
        })
        .collect();

    match method {
        SnowballMethod::HighestApr => candidates.sort_by(by_highest_apr),
        SnowballMethod::SmallestBalance => candidates.sort_by(by_smallest_balance),
        SnowballMethod::CustomPromoAware => candidates.sort_by(by_promo_awareness),
    }

    candidates.into_iter().map(|c| c.index).collect()
}
