//! Compare all snowball methods on the same debts and pool
//!
//! Usage: cargo run --bin compare_methods -- --extra 500

use anyhow::Result;
use clap::Parser;
use debt_snowball::cli::InputArgs;
use debt_snowball::{ScenarioRunner, SnowballMethod};
use std::time::Instant;

#[derive(Debug, Parser)]
#[command(name = "compare_methods", about = "Run every snowball method side by side")]
struct Cli {
    #[command(flatten)]
    inputs: InputArgs,

    /// Print summaries as JSON instead of a table
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let inputs = cli.inputs.load()?;
    let runner = ScenarioRunner::new(inputs.accounts, inputs.pool, inputs.start)?;

    let start = Instant::now();
    // Method choice is overridden per run
    let base = cli.inputs.config(SnowballMethod::HighestApr);
    let summaries = runner.compare_summaries(&SnowballMethod::ALL, &base);
    log::info!("Compared {} methods in {:?}", summaries.len(), start.elapsed());

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
        return Ok(());
    }

    println!(
        "{:<20} {:>8} {:>10} {:>14} {:>14} {:>10}",
        "Method", "Months", "Debt free", "Interest", "Total paid", "Shortfall"
    );
    println!("{}", "-".repeat(81));
    for summary in &summaries {
        let debt_free = summary
            .payoff_date
            .map(|d| d.format("%Y-%m").to_string())
            .unwrap_or_else(|| "never".to_string());
        println!(
            "{:<20} {:>8} {:>10} {:>14.2} {:>14.2} {:>10}",
            summary.method.as_str(),
            summary
                .months_to_payoff
                .map(|m| m.to_string())
                .unwrap_or_else(|| "-".to_string()),
            debt_free,
            summary.total_interest,
            summary.total_paid,
            summary.shortfall_months,
        );
    }

    if let Some(best) = summaries
        .iter()
        .min_by(|a, b| a.total_interest.total_cmp(&b.total_interest))
    {
        println!("\nLeast interest: {} (${:.2})", best.method, best.total_interest);
    }

    Ok(())
}
