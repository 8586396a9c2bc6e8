//! Error types for account validation and data loading

use thiserror::Error;

/// Malformed or contradictory simulation inputs
///
/// Raised before any month is processed. A run that fails with this error
/// has not touched any balance.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Two accounts share the same name
    #[error("duplicate debt account name: {0}")]
    DuplicateName(String),

    /// A balance or rate is negative or not a finite number
    #[error("account {account}: {field} must be a non-negative number, got {value}")]
    InvalidValue {
        account: String,
        field: &'static str,
        value: f64,
    },

    /// Allocation method string is not recognised
    #[error("unknown snowball method: {0:?} (expected highest_apr, smallest_balance or custom_promo_aware)")]
    UnknownMethod(String),
}

/// Failure while reading debts or cashflows from CSV
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("row {row}: invalid date {value:?} (expected YYYY-MM-DD)")]
    InvalidDate { row: usize, value: String },

    #[error(transparent)]
    Config(#[from] ConfigError),
}
