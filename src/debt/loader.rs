//! Load debt accounts from debts.csv

use super::{validate_accounts, DebtAccount};
use crate::calendar::parse_date;
use crate::error::LoadError;
use csv::{ReaderBuilder, Trim};
use log::{debug, info};
use std::fs::File;
use std::path::Path;

/// Default location of the debts file, relative to the working directory
pub const DEFAULT_DEBTS_PATH: &str = "data/debts.csv";

/// Raw CSV row matching debts.csv columns
///
/// Promo columns may be blank, which means "no promo".
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    name: String,
    start_balance: f64,
    apr: f64,
    min_pct: f64,
    #[serde(default)]
    promo_apr: Option<f64>,
    #[serde(default)]
    promo_end: Option<String>,
}

impl CsvRow {
    fn into_account(self, row: usize) -> Result<DebtAccount, LoadError> {
        let promo_end = match self.promo_end.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(parse_date(raw).ok_or_else(|| LoadError::InvalidDate {
                row,
                value: raw.to_string(),
            })?),
        };

        Ok(DebtAccount {
            name: self.name,
            start_balance: self.start_balance,
            apr: self.apr,
            min_pct: self.min_pct,
            promo_apr: self.promo_apr,
            promo_end,
        })
    }
}

/// Load and validate all accounts from a CSV file
///
/// A missing file is not an error: it yields no accounts, so the caller can
/// show an empty state.
pub fn load_debts<P: AsRef<Path>>(path: P) -> Result<Vec<DebtAccount>, LoadError> {
    let path = path.as_ref();
    if !path.exists() {
        info!("No debts file at {}, starting with no accounts", path.display());
        return Ok(Vec::new());
    }
    load_debts_from_reader(File::open(path)?)
}

/// Load and validate accounts from any reader (e.g., string buffer, upload)
pub fn load_debts_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<DebtAccount>, LoadError> {
    let mut csv_reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
    let mut accounts = Vec::new();

    for (index, result) in csv_reader.deserialize().enumerate() {
        let row: CsvRow = result?;
        accounts.push(row.into_account(index + 1)?);
    }

    validate_accounts(&accounts)?;
    debug!("Loaded {} debt accounts", accounts.len());
    Ok(accounts)
}

/// Load accounts from the default data/debts.csv location
pub fn load_default_debts() -> Result<Vec<DebtAccount>, LoadError> {
    load_debts(DEFAULT_DEBTS_PATH)
}
