//! Scenario runner for side-by-side method comparisons
//!
//! Validates accounts once, then runs any number of configurations against
//! the same read-only accounts and pool. Comparisons run in parallel; each
//! run owns its own balances.

use crate::debt::{validate_accounts, DebtAccount};
use crate::error::ConfigError;
use crate::pool::MonthlyPool;
use crate::projection::{
    DebtProjection, DebtSimulator, ProjectionSummary, SimulationConfig, SnowballMethod,
};
use chrono::NaiveDate;
use rayon::prelude::*;

/// Pre-validated inputs for repeated simulations
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new(accounts, pool, start)?;
/// for projection in runner.compare(&SnowballMethod::ALL, &SimulationConfig::default()) {
///     println!("{}: {:?}", projection.method, projection.summary().months_to_payoff);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    accounts: Vec<DebtAccount>,
    pool: MonthlyPool,
    start_date: NaiveDate,
}

impl ScenarioRunner {
    /// Create a runner, rejecting invalid accounts up front
    pub fn new(
        accounts: Vec<DebtAccount>,
        pool: MonthlyPool,
        start_date: NaiveDate,
    ) -> Result<Self, ConfigError> {
        validate_accounts(&accounts)?;
        Ok(Self {
            accounts,
            pool,
            start_date,
        })
    }

    /// Run with default settings and the given method
    pub fn run(&self, method: SnowballMethod) -> DebtProjection {
        self.run_with(SimulationConfig::with_method(method))
    }

    /// Run a single simulation with the given config
    pub fn run_with(&self, config: SimulationConfig) -> DebtProjection {
        DebtSimulator::new(config).project(&self.accounts, &self.pool, self.start_date)
    }

    /// Run each method in parallel on top of `base`, results in `methods` order
    pub fn compare(&self, methods: &[SnowballMethod], base: &SimulationConfig) -> Vec<DebtProjection> {
        methods
            .par_iter()
            .map(|&method| {
                self.run_with(SimulationConfig {
                    method,
                    ..base.clone()
                })
            })
            .collect()
    }

    /// Summaries of [`ScenarioRunner::compare`]
    pub fn compare_summaries(
        &self,
        methods: &[SnowballMethod],
        base: &SimulationConfig,
    ) -> Vec<ProjectionSummary> {
        self.compare(methods, base)
            .iter()
            .map(DebtProjection::summary)
            .collect()
    }

    pub fn accounts(&self) -> &[DebtAccount] {
        &self.accounts
    }

    pub fn pool(&self) -> &MonthlyPool {
        &self.pool
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, 1).unwrap()
    }

    fn runner() -> ScenarioRunner {
        let accounts = vec![
            DebtAccount::new("Visa", 4000.0, 0.24, 0.02),
            DebtAccount::new("Store", 600.0, 0.18, 0.03),
            DebtAccount::new("Promo", 2500.0, 0.27, 0.02).with_promo(0.0, date(2025, 9)),
        ];
        let pool = MonthlyPool::flat(date(2025, 1), date(2029, 12), 400.0);
        ScenarioRunner::new(accounts, pool, date(2025, 1)).unwrap()
    }

    #[test]
    fn test_scenario_runner_rejects_duplicates() {
        let accounts = vec![
            DebtAccount::new("A", 1.0, 0.1, 0.02),
            DebtAccount::new("A", 1.0, 0.1, 0.02),
        ];
        let result = ScenarioRunner::new(accounts, MonthlyPool::new(), date(2025, 1));
        assert!(matches!(result, Err(ConfigError::DuplicateName(_))));
    }

    #[test]
    fn test_compare_preserves_method_order() {
        let runner = runner();
        let results = runner.compare(&SnowballMethod::ALL, &SimulationConfig::default());

        assert_eq!(results.len(), 3);
        for (result, method) in results.iter().zip(SnowballMethod::ALL) {
            assert_eq!(result.method, method);
            assert_eq!(result.rows.len(), 60);
        }
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let runner = runner();
        let parallel = runner.compare(&SnowballMethod::ALL, &SimulationConfig::default());
        for (result, method) in parallel.iter().zip(SnowballMethod::ALL) {
            assert_eq!(*result, runner.run(method));
        }
    }

    #[test]
    fn test_all_methods_pay_off() {
        let summaries = runner().compare_summaries(&SnowballMethod::ALL, &SimulationConfig::default());
        for summary in summaries {
            assert!(summary.months_to_payoff.is_some(), "{} never paid off", summary.method);
            assert_eq!(summary.final_balance, 0.0);
        }
    }
}
