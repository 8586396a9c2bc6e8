//! Debt account data structures and debts.csv loading

mod data;
pub mod loader;

pub use data::{validate_accounts, DebtAccount};
pub use loader::{load_debts, load_debts_from_reader, load_default_debts};
