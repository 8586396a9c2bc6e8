//! Monthly cash pool available for debt service
//!
//! The pool is a plain ordered series of (month, amount). The simulator does
//! not care how it was built; the builders here cover the usual sources:
//! a flat monthly amount, or recorded `withdraw_to_debt` cashflows plus a
//! flat extra payment.

mod cashflows;

pub use cashflows::{
    load_cashflows, load_cashflows_from_reader, CashflowRecord, DEFAULT_CASHFLOWS_PATH,
    WITHDRAW_TO_DEBT,
};

use crate::calendar::{month_range, month_start};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Cash available for debt service, keyed by first-of-month date
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MonthlyPool {
    amounts: BTreeMap<NaiveDate, f64>,
}

impl MonthlyPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Same amount in every month from `start` through `end`
    pub fn flat(start: NaiveDate, end: NaiveDate, amount: f64) -> Self {
        month_range(start, end)
            .into_iter()
            .map(|month| (month, amount))
            .collect()
    }

    /// Sum `withdraw_to_debt` cashflows per month and add `extra` to each month
    ///
    /// Only months with at least one debt payment appear in the pool.
    pub fn from_cashflows(records: &[CashflowRecord], extra: f64) -> Self {
        let mut by_month: BTreeMap<NaiveDate, f64> = BTreeMap::new();
        for record in records.iter().filter(|r| r.is_debt_payment()) {
            *by_month.entry(month_start(record.date)).or_insert(0.0) += record.amount;
        }

        by_month
            .into_iter()
            .map(|(month, amount)| (month, amount + extra))
            .collect()
    }

    /// Cashflow-derived pool when debt payments were recorded, otherwise a
    /// flat `extra` for every month from `start` through `end`
    pub fn build(records: &[CashflowRecord], extra: f64, start: NaiveDate, end: NaiveDate) -> Self {
        let pool = Self::from_cashflows(records, extra);
        if pool.is_empty() {
            Self::flat(start, end, extra)
        } else {
            pool
        }
    }

    /// Add `amount` to the month containing `date`
    pub fn insert(&mut self, date: NaiveDate, amount: f64) {
        *self.amounts.entry(month_start(date)).or_insert(0.0) += amount;
    }

    pub fn get(&self, date: NaiveDate) -> Option<f64> {
        self.amounts.get(&month_start(date)).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.amounts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.amounts.len()
    }

    pub fn first_month(&self) -> Option<NaiveDate> {
        self.amounts.keys().next().copied()
    }

    pub fn last_month(&self) -> Option<NaiveDate> {
        self.amounts.keys().next_back().copied()
    }

    /// All months in chronological order
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
        self.amounts.iter().map(|(month, amount)| (*month, *amount))
    }

    /// Months on or after the month containing `start`, in chronological order
    pub fn months_from(&self, start: NaiveDate) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
        self.amounts
            .range(month_start(start)..)
            .map(|(month, amount)| (*month, *amount))
    }
}

impl FromIterator<(NaiveDate, f64)> for MonthlyPool {
    fn from_iter<I: IntoIterator<Item = (NaiveDate, f64)>>(iter: I) -> Self {
        let mut pool = Self::new();
        for (date, amount) in iter {
            pool.insert(date, amount);
        }
        pool
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn cashflow(date: NaiveDate, kind: &str, amount: f64) -> CashflowRecord {
        CashflowRecord {
            date,
            kind: kind.to_string(),
            ticker: None,
            amount,
            notes: None,
        }
    }

    #[test]
    fn test_insert_normalizes_and_accumulates() {
        let mut pool = MonthlyPool::new();
        pool.insert(date(2025, 1, 15), 100.0);
        pool.insert(date(2025, 1, 31), 50.0);

        assert_eq!(pool.len(), 1);
        assert_eq!(pool.get(date(2025, 1, 1)), Some(150.0));
        assert_eq!(pool.first_month(), Some(date(2025, 1, 1)));
    }

    #[test]
    fn test_flat_pool() {
        let pool = MonthlyPool::flat(date(2025, 1, 1), date(2025, 6, 1), 300.0);
        assert_eq!(pool.len(), 6);
        assert!(pool.iter().all(|(_, amount)| amount == 300.0));
        assert_eq!(pool.last_month(), Some(date(2025, 6, 1)));
    }

    #[test]
    fn test_from_cashflows_keeps_only_payment_months() {
        let records = vec![
            cashflow(date(2025, 1, 10), WITHDRAW_TO_DEBT, 200.0),
            cashflow(date(2025, 1, 25), WITHDRAW_TO_DEBT, 50.0),
            cashflow(date(2025, 2, 1), "deposit", 5000.0),
            cashflow(date(2025, 3, 3), WITHDRAW_TO_DEBT, 100.0),
        ];
        let pool = MonthlyPool::from_cashflows(&records, 25.0);

        let months: Vec<_> = pool.iter().collect();
        assert_eq!(
            months,
            vec![
                (date(2025, 1, 1), 275.0),
                (date(2025, 3, 1), 125.0),
            ]
        );
    }

    #[test]
    fn test_from_cashflows_skips_months_without_payments() {
        let records = vec![
            cashflow(date(2025, 1, 5), WITHDRAW_TO_DEBT, 400.0),
            cashflow(date(2025, 6, 5), WITHDRAW_TO_DEBT, 400.0),
        ];
        let pool = MonthlyPool::from_cashflows(&records, 100.0);

        assert_eq!(pool.len(), 2);
        assert_eq!(pool.get(date(2025, 1, 1)), Some(500.0));
        assert_eq!(pool.get(date(2025, 3, 1)), None);
        assert_eq!(pool.get(date(2025, 6, 1)), Some(500.0));
    }

    #[test]
    fn test_build_falls_back_to_flat() {
        let records = vec![cashflow(date(2025, 1, 10), "deposit", 1000.0)];
        let pool = MonthlyPool::build(&records, 400.0, date(2025, 1, 1), date(2025, 3, 1));
        assert_eq!(pool.len(), 3);
        assert_eq!(pool.get(date(2025, 2, 1)), Some(400.0));
    }

    #[test]
    fn test_months_from_skips_earlier_months() {
        let pool = MonthlyPool::flat(date(2024, 11, 1), date(2025, 2, 1), 10.0);
        let months: Vec<_> = pool.months_from(date(2025, 1, 20)).map(|(m, _)| m).collect();
        assert_eq!(months, vec![date(2025, 1, 1), date(2025, 2, 1)]);
    }
}
