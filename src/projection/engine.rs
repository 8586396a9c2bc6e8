//! Core simulation engine for month-by-month debt payoff projections

use super::allocation::{rank_accounts, SnowballMethod};
use super::minimum::{MinimumPayment, MinimumPaymentRule};
use super::results::{DebtProjection, MonthRow};
use super::state::SimulationState;
use crate::calendar::month_start;
use crate::debt::{validate_accounts, DebtAccount};
use crate::error::ConfigError;
use crate::pool::MonthlyPool;
use chrono::NaiveDate;
use log::{debug, info, trace, warn};
use serde::{Deserialize, Serialize};

/// Configuration for a simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Allocation policy for cash beyond the minimums
    pub method: SnowballMethod,

    /// Minimum payment formula
    pub minimum_payment: MinimumPaymentRule,

    /// Under `CustomPromoAware`, stop deferring a promo account once its
    /// promo ends within this many months. None defers for the whole window.
    pub promo_lookahead_months: Option<u32>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            method: SnowballMethod::HighestApr,
            minimum_payment: MinimumPaymentRule::PercentOfBalance,
            promo_lookahead_months: None,
        }
    }
}

impl SimulationConfig {
    pub fn with_method(method: SnowballMethod) -> Self {
        Self {
            method,
            ..Default::default()
        }
    }
}

/// Main simulation engine
///
/// Holds no balances itself: every call to [`DebtSimulator::simulate`] works
/// on a private [`SimulationState`], so one simulator can serve many runs.
pub struct DebtSimulator<M: MinimumPayment = MinimumPaymentRule> {
    config: SimulationConfig,
    minimum_rule: M,
}

impl DebtSimulator<MinimumPaymentRule> {
    /// Create a simulator using the config's built-in minimum payment rule
    pub fn new(config: SimulationConfig) -> Self {
        let minimum_rule = config.minimum_payment;
        Self { config, minimum_rule }
    }
}

impl<M: MinimumPayment> DebtSimulator<M> {
    /// Create a simulator with a custom minimum payment formula
    ///
    /// `config.minimum_payment` is ignored in favour of `minimum_rule`.
    pub fn with_minimum_rule(config: SimulationConfig, minimum_rule: M) -> Self {
        Self { config, minimum_rule }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Project balances for every pool month on or after `start_date`
    ///
    /// Fails only on invalid accounts, before any month is processed. No
    /// accounts or no months in range gives an empty series.
    pub fn simulate(
        &self,
        accounts: &[DebtAccount],
        pool: &MonthlyPool,
        start_date: NaiveDate,
    ) -> Result<DebtProjection, ConfigError> {
        validate_accounts(accounts)?;
        Ok(self.project(accounts, pool, start_date))
    }

    /// Same as [`DebtSimulator::simulate`] for accounts already validated
    pub(crate) fn project(
        &self,
        accounts: &[DebtAccount],
        pool: &MonthlyPool,
        start_date: NaiveDate,
    ) -> DebtProjection {
        let names = accounts.iter().map(|a| a.name.clone()).collect();
        let mut result = DebtProjection::new(self.config.method, names);
        if accounts.is_empty() {
            debug!("No debt accounts, nothing to simulate");
            return result;
        }

        let start_month = month_start(start_date);
        let mut state = SimulationState::from_accounts(accounts, start_month);
        info!(
            "Simulating {} accounts from {} with method {}",
            accounts.len(),
            start_month,
            self.config.method
        );

        let mut paid_off = state.is_paid_off();
        for (month, amount) in pool.months_from(start_month) {
            state.advance_to(month);
            let row = self.calculate_month(accounts, &mut state, amount);
            result.add_row(row);

            if !paid_off && state.is_paid_off() {
                paid_off = true;
                info!("All debts paid off in {} after {} months", month, state.months_processed);
            }
        }

        if state.months_processed > 0 {
            info!(
                "Simulated {} months, ending total balance {:.2}",
                state.months_processed,
                state.total_balance()
            );
        }
        result
    }

    /// Roll every balance forward through one month
    fn calculate_month(
        &self,
        accounts: &[DebtAccount],
        state: &mut SimulationState,
        amount: f64,
    ) -> MonthRow {
        let month = state.current_month;
        let pool = if amount.is_finite() && amount >= 0.0 {
            amount
        } else {
            warn!("Pool for {} is {}, treating as 0", month, amount);
            0.0
        };
        let mut row = MonthRow::new(month, pool);
        let mut available = pool;

        // Interest accrual on post-prior-month balances
        for (index, account) in accounts.iter().enumerate() {
            let interest = account.monthly_interest(state.balances[index], month);
            state.accrue(index, interest);
            row.interest += interest;
        }

        // Minimum payments, in priority order so a short pool covers the
        // most urgent accounts first
        let priority = self.rank(accounts, state);
        let dues: Vec<f64> = accounts
            .iter()
            .zip(&state.balances)
            .map(|(account, &balance)| {
                if balance > 0.0 {
                    self.minimum_rule.minimum_due(account, balance).clamp(0.0, balance)
                } else {
                    0.0
                }
            })
            .collect();
        let total_due: f64 = dues.iter().sum();

        for &index in &priority {
            let paid = state.pay(index, dues[index].min(available));
            available -= paid;
            row.minimum_paid += paid;
        }

        if row.minimum_paid < total_due {
            row.shortfall = total_due - row.minimum_paid;
            debug!(
                "{}: pool {:.2} short of minimums {:.2} by {:.2}",
                month, pool, total_due, row.shortfall
            );
        }

        // Extra payment cascades down a fresh ranking of post-minimum balances
        let priority = self.rank(accounts, state);
        for &index in &priority {
            if available <= 0.0 {
                break;
            }
            let paid = state.pay(index, available);
            available -= paid;
            row.extra_paid += paid;
            trace!("{}: extra {:.2} to {}", month, paid, accounts[index].name);
        }

        row.unapplied = available;
        row.balances = state.balances.clone();
        row.total_balance = state.total_balance();
        row
    }

    fn rank(&self, accounts: &[DebtAccount], state: &SimulationState) -> Vec<usize> {
        rank_accounts(
            accounts,
            &state.balances,
            state.current_month,
            self.config.method,
            self.config.promo_lookahead_months,
        )
    }
}

/// Run a simulation with a method given by name
///
/// The method name is checked before anything else, so an unknown name
/// fails without processing a single month.
pub fn simulate_debts(
    accounts: &[DebtAccount],
    pool: &MonthlyPool,
    start_date: NaiveDate,
    method: &str,
) -> Result<DebtProjection, ConfigError> {
    let method: SnowballMethod = method.parse()?;
    DebtSimulator::new(SimulationConfig::with_method(method)).simulate(accounts, pool, start_date)
}
