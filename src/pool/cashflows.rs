//! Cashflow records from cashflows.csv

use crate::calendar::parse_date;
use crate::error::LoadError;
use chrono::NaiveDate;
use csv::{ReaderBuilder, Trim};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;

/// Cashflow type whose amounts are routed to debt service
pub const WITHDRAW_TO_DEBT: &str = "withdraw_to_debt";

/// Default location of the cashflows file, relative to the working directory
pub const DEFAULT_CASHFLOWS_PATH: &str = "data/cashflows.csv";

/// One recorded cashflow (deposit, dividend, withdrawal, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashflowRecord {
    pub date: NaiveDate,
    pub kind: String,
    pub ticker: Option<String>,
    pub amount: f64,
    pub notes: Option<String>,
}

impl CashflowRecord {
    pub fn is_debt_payment(&self) -> bool {
        self.kind == WITHDRAW_TO_DEBT
    }
}

#[derive(Debug, Deserialize)]
struct CsvRow {
    date: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    ticker: Option<String>,
    amount: f64,
    #[serde(default)]
    notes: Option<String>,
}

/// Load cashflows from a CSV file; a missing file yields no records
pub fn load_cashflows<P: AsRef<Path>>(path: P) -> Result<Vec<CashflowRecord>, LoadError> {
    let path = path.as_ref();
    if !path.exists() {
        info!("No cashflows file at {}", path.display());
        return Ok(Vec::new());
    }
    load_cashflows_from_reader(File::open(path)?)
}

/// Load cashflows from any reader
pub fn load_cashflows_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<CashflowRecord>, LoadError> {
    let mut csv_reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
    let mut records = Vec::new();

    for (index, result) in csv_reader.deserialize().enumerate() {
        let row: CsvRow = result?;
        let date = parse_date(&row.date).ok_or_else(|| LoadError::InvalidDate {
            row: index + 1,
            value: row.date.clone(),
        })?;
        records.push(CashflowRecord {
            date,
            kind: row.kind,
            ticker: row.ticker,
            amount: row.amount,
            notes: row.notes,
        });
    }

    debug!("Loaded {} cashflow records", records.len());
    Ok(records)
}
