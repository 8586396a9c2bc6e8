//! Debt Snowball CLI
//!
//! Runs one payoff projection and prints or writes the monthly series

use anyhow::{Context, Result};
use clap::Parser;
use debt_snowball::cli::InputArgs;
use debt_snowball::{DebtSimulator, SnowballMethod};
use std::fs::File;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "debt_snowball", version, about = "Project multi-account debt payoff month by month")]
struct Cli {
    #[command(flatten)]
    inputs: InputArgs,

    /// Allocation method: highest_apr, smallest_balance or custom_promo_aware
    #[arg(long, default_value = "highest_apr")]
    method: String,

    /// Write the full series as CSV to this path
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    // Reject a bad method before touching any file
    let method: SnowballMethod = cli.method.parse()?;

    let inputs = cli.inputs.load()?;
    if inputs.accounts.is_empty() {
        println!("No debts defined in {} yet.", cli.inputs.debts.display());
        return Ok(());
    }

    let simulator = DebtSimulator::new(cli.inputs.config(method));
    let result = simulator.simulate(&inputs.accounts, &inputs.pool, inputs.start)?;
    if result.is_empty() {
        println!("No simulated debt data yet.");
        return Ok(());
    }

    println!("Debt payoff projection ({}, {} months):", method, result.rows.len());
    print!("{:>10} {:>14}", "Month", "Total");
    for name in &result.account_names {
        print!(" {:>12}", name);
    }
    println!();
    println!("{}", "-".repeat(26 + 13 * result.account_names.len()));

    for row in result.rows.iter().take(24) {
        print!("{:>10} {:>14.2}", row.date.format("%Y-%m"), row.total_balance);
        for balance in &row.balances {
            print!(" {:>12.2}", balance);
        }
        println!();
    }
    if result.rows.len() > 24 {
        println!("... ({} more months)", result.rows.len() - 24);
    }

    if let Some(path) = &cli.output {
        let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
        result.write_csv(file)?;
        println!("\nFull results written to: {}", path.display());
    }

    let summary = result.summary();
    println!("\nSummary:");
    println!("  Months simulated: {}", summary.total_months);
    match (summary.months_to_payoff, summary.payoff_date) {
        (Some(months), Some(date)) => println!("  Debt free in {} months ({})", months, date.format("%Y-%m")),
        _ => println!("  Not paid off; ending balance ${:.2}", summary.final_balance),
    }
    println!("  Total interest: ${:.2}", summary.total_interest);
    println!("  Total paid: ${:.2}", summary.total_paid);
    if summary.shortfall_months > 0 {
        println!("  Months short of minimums: {}", summary.shortfall_months);
    }

    Ok(())
}
