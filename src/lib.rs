//! Debt Snowball - multi-account debt payoff projection engine
//!
//! This library provides:
//! - Debt account model and debts.csv loading
//! - Monthly cash pool construction from cashflow records
//! - Month-by-month simulation of interest, minimums, and extra payments
//! - Snowball allocation methods (highest APR, smallest balance, promo-aware)
//! - Parallel side-by-side method comparisons

pub mod calendar;
pub mod cli;
pub mod debt;
pub mod error;
pub mod pool;
pub mod projection;
pub mod scenario;

// Re-export commonly used types
pub use debt::DebtAccount;
pub use error::{ConfigError, LoadError};
pub use pool::{CashflowRecord, MonthlyPool};
pub use projection::{
    simulate_debts, DebtProjection, DebtSimulator, MinimumPaymentRule, MonthRow,
    SimulationConfig, SnowballMethod,
};
pub use scenario::ScenarioRunner;
