//! Command-line input handling shared by the binaries

use crate::calendar::{month_start, parse_date};
use crate::debt::{load_debts, DebtAccount};
use crate::pool::{load_cashflows, MonthlyPool, DEFAULT_CASHFLOWS_PATH};
use crate::projection::{MinimumPaymentRule, SimulationConfig, SnowballMethod};
use anyhow::{Context, Result};
use chrono::{Local, Months, NaiveDate};
use clap::Args;
use log::info;
use std::path::PathBuf;

/// Months of flat pool generated when no end month is given
pub const DEFAULT_HORIZON_MONTHS: u32 = 120;

/// Inputs common to every simulation command
#[derive(Debug, Clone, Args)]
pub struct InputArgs {
    /// Debt accounts CSV (name,start_balance,apr,min_pct,promo_apr,promo_end)
    #[arg(long, default_value = crate::debt::loader::DEFAULT_DEBTS_PATH)]
    pub debts: PathBuf,

    /// Cashflows CSV; `withdraw_to_debt` rows feed the monthly pool
    #[arg(long, default_value = DEFAULT_CASHFLOWS_PATH)]
    pub cashflows: PathBuf,

    /// Extra dollars per month applied to debts
    #[arg(long, default_value_t = 0.0)]
    pub extra: f64,

    /// First month to simulate (YYYY-MM or YYYY-MM-DD)
    #[arg(long, value_parser = parse_month)]
    pub start: Option<NaiveDate>,

    /// Last month of the flat pool when no debt cashflows are recorded
    #[arg(long, value_parser = parse_month)]
    pub end: Option<NaiveDate>,

    /// Minimum payment floor in dollars: max(floor, balance * min_pct)
    #[arg(long)]
    pub min_floor: Option<f64>,

    /// Promo-aware method: stop deferring promos this many months before expiry
    #[arg(long)]
    pub promo_lookahead: Option<u32>,
}

/// Loaded and ready-to-run simulation inputs
#[derive(Debug, Clone)]
pub struct Inputs {
    pub accounts: Vec<DebtAccount>,
    pub pool: MonthlyPool,
    pub start: NaiveDate,
}

impl InputArgs {
    /// Load accounts and cashflows and build the monthly pool
    pub fn load(&self) -> Result<Inputs> {
        let accounts = load_debts(&self.debts)
            .with_context(|| format!("loading debts from {}", self.debts.display()))?;
        let cashflows = load_cashflows(&self.cashflows)
            .with_context(|| format!("loading cashflows from {}", self.cashflows.display()))?;

        let default_start = self.start.unwrap_or_else(|| month_start(Local::now().date_naive()));
        let end = match self.end {
            Some(end) => end,
            None => default_start
                .checked_add_months(Months::new(DEFAULT_HORIZON_MONTHS - 1))
                .context("simulation horizon overflows the calendar")?,
        };
        let pool = MonthlyPool::build(&cashflows, self.extra, default_start, end);

        // The pool's own first month is the natural start when none was asked for
        let start = self
            .start
            .or_else(|| pool.first_month())
            .unwrap_or(default_start);

        info!(
            "Loaded {} accounts, {} pool months starting {}",
            accounts.len(),
            pool.len(),
            start
        );
        Ok(Inputs { accounts, pool, start })
    }

    /// Simulation settings for `method` from the optional flags
    pub fn config(&self, method: SnowballMethod) -> SimulationConfig {
        SimulationConfig {
            method,
            minimum_payment: match self.min_floor {
                Some(floor) => MinimumPaymentRule::FlatFloor { floor },
                None => MinimumPaymentRule::PercentOfBalance,
            },
            promo_lookahead_months: self.promo_lookahead,
        }
    }
}

/// Parse `YYYY-MM` or a full date into the first of that month
pub fn parse_month(value: &str) -> Result<NaiveDate, String> {
    let value = value.trim();
    parse_date(value)
        .or_else(|| parse_date(&format!("{}-01", value)))
        .map(month_start)
        .ok_or_else(|| format!("invalid month {:?}, expected YYYY-MM", value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_month() {
        let jan = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        assert_eq!(parse_month("2025-01"), Ok(jan));
        assert_eq!(parse_month("2025-01-17"), Ok(jan));
        assert!(parse_month("January").is_err());
    }

    #[test]
    fn test_config_from_flags() {
        let args = InputArgs {
            debts: PathBuf::from("debts.csv"),
            cashflows: PathBuf::from("cashflows.csv"),
            extra: 0.0,
            start: None,
            end: None,
            min_floor: Some(25.0),
            promo_lookahead: Some(2),
        };
        let config = args.config(SnowballMethod::CustomPromoAware);
        assert_eq!(config.minimum_payment, MinimumPaymentRule::FlatFloor { floor: 25.0 });
        assert_eq!(config.promo_lookahead_months, Some(2));
    }

    #[test]
    fn test_load_with_missing_files_gives_flat_pool() {
        let args = InputArgs {
            debts: PathBuf::from("missing/debts.csv"),
            cashflows: PathBuf::from("missing/cashflows.csv"),
            extra: 200.0,
            start: parse_month("2025-01").ok(),
            end: parse_month("2025-12").ok(),
            min_floor: None,
            promo_lookahead: None,
        };
        let inputs = args.load().unwrap();
        assert!(inputs.accounts.is_empty());
        assert_eq!(inputs.pool.len(), 12);
        assert_eq!(inputs.start, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
    }
}
