//! Result series produced by a simulation run

use super::allocation::SnowballMethod;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::io::Write;

/// One simulated month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthRow {
    /// First day of the simulated month
    pub date: NaiveDate,

    /// Sum of all account balances at month end
    pub total_balance: f64,

    /// Month-end balance per account, in account input order
    pub balances: Vec<f64>,

    // Flows for the month
    pub pool: f64,
    pub interest: f64,
    pub minimum_paid: f64,
    pub extra_paid: f64,

    /// Minimums due that the pool could not cover
    pub shortfall: f64,

    /// Pool left over because every account reached zero
    pub unapplied: f64,
}

impl MonthRow {
    pub fn new(date: NaiveDate, pool: f64) -> Self {
        Self {
            date,
            total_balance: 0.0,
            balances: Vec::new(),
            pool,
            interest: 0.0,
            minimum_paid: 0.0,
            extra_paid: 0.0,
            shortfall: 0.0,
            unapplied: 0.0,
        }
    }

    /// Minimums plus extra applied this month
    pub fn total_paid(&self) -> f64 {
        self.minimum_paid + self.extra_paid
    }

    pub fn is_shortfall(&self) -> bool {
        self.shortfall > 0.0
    }
}

/// Complete result series for one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtProjection {
    /// Method the run allocated extra payments with
    pub method: SnowballMethod,

    /// Account names, in the order of every row's `balances`
    pub account_names: Vec<String>,

    /// Monthly rows in chronological order
    pub rows: Vec<MonthRow>,
}

impl DebtProjection {
    pub fn new(method: SnowballMethod, account_names: Vec<String>) -> Self {
        Self {
            method,
            account_names,
            rows: Vec::new(),
        }
    }

    pub fn add_row(&mut self, row: MonthRow) {
        self.rows.push(row);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Month-end balances of one account, or None for an unknown name
    pub fn balance_series(&self, name: &str) -> Option<Vec<(NaiveDate, f64)>> {
        let column = self.account_names.iter().position(|n| n == name)?;
        Some(
            self.rows
                .iter()
                .map(|row| (row.date, row.balances[column]))
                .collect(),
        )
    }

    /// Get summary statistics
    pub fn summary(&self) -> ProjectionSummary {
        let total_interest: f64 = self.rows.iter().map(|r| r.interest).sum();
        let total_paid: f64 = self.rows.iter().map(MonthRow::total_paid).sum();
        let shortfall_months = self.rows.iter().filter(|r| r.is_shortfall()).count() as u32;

        let payoff = self
            .rows
            .iter()
            .position(|r| r.total_balance <= 0.0)
            .map(|idx| (idx as u32 + 1, self.rows[idx].date));

        ProjectionSummary {
            method: self.method,
            total_months: self.rows.len() as u32,
            months_to_payoff: payoff.map(|(months, _)| months),
            payoff_date: payoff.map(|(_, date)| date),
            total_interest,
            total_paid,
            shortfall_months,
            final_balance: self.rows.last().map(|r| r.total_balance).unwrap_or(0.0),
        }
    }

    /// Write the series as `date,total_balance,<one column per account>`
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), csv::Error> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        let mut header = vec!["date".to_string(), "total_balance".to_string()];
        header.extend(self.account_names.iter().cloned());
        csv_writer.write_record(&header)?;

        for row in &self.rows {
            let mut record = Vec::with_capacity(row.balances.len() + 2);
            record.push(row.date.format("%Y-%m-%d").to_string());
            record.push(format!("{:.2}", row.total_balance));
            record.extend(row.balances.iter().map(|b| format!("{:.2}", b)));
            csv_writer.write_record(&record)?;
        }

        csv_writer.flush()?;
        Ok(())
    }
}

/// Summary statistics for a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionSummary {
    pub method: SnowballMethod,
    pub total_months: u32,
    /// Months until every balance first reached zero
    pub months_to_payoff: Option<u32>,
    pub payoff_date: Option<NaiveDate>,
    pub total_interest: f64,
    pub total_paid: f64,
    pub shortfall_months: u32,
    pub final_balance: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, 1).unwrap()
    }

    fn projection() -> DebtProjection {
        let mut projection = DebtProjection::new(
            SnowballMethod::HighestApr,
            vec!["CardA".to_string(), "Car Loan".to_string()],
        );
        let mut row = MonthRow::new(date(2025, 1), 100.0);
        row.balances = vec![50.0, 25.5];
        row.total_balance = 75.5;
        row.interest = 2.0;
        row.minimum_paid = 40.0;
        row.extra_paid = 60.0;
        projection.add_row(row);

        let mut row = MonthRow::new(date(2025, 2), 100.0);
        row.balances = vec![0.0, 0.0];
        row.interest = 1.0;
        row.minimum_paid = 76.5;
        row.unapplied = 23.5;
        projection.add_row(row);
        projection
    }

    #[test]
    fn test_summary() {
        let summary = projection().summary();
        assert_eq!(summary.total_months, 2);
        assert_eq!(summary.months_to_payoff, Some(2));
        assert_eq!(summary.payoff_date, Some(date(2025, 2)));
        assert_eq!(summary.total_interest, 3.0);
        assert_eq!(summary.total_paid, 176.5);
        assert_eq!(summary.shortfall_months, 0);
        assert_eq!(summary.final_balance, 0.0);
    }

    #[test]
    fn test_balance_series() {
        let projection = projection();
        let series = projection.balance_series("Car Loan").unwrap();
        assert_eq!(series, vec![(date(2025, 1), 25.5), (date(2025, 2), 0.0)]);
        assert!(projection.balance_series("Nope").is_none());
    }

    #[test]
    fn test_write_csv() {
        let mut buffer = Vec::new();
        projection().write_csv(&mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "date,total_balance,CardA,Car Loan");
        assert_eq!(lines[1], "2025-01-01,75.50,50.00,25.50");
        assert_eq!(lines[2], "2025-02-01,0.00,0.00,0.00");
    }
}
