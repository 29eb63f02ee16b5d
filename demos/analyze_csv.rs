//! Runs the full analysis pipeline on a financial CSV and prints the report:
//! KPIs, profit/loss verdict, the tail of the profit forecast, and the
//! per-category profit sensitivity.
//!
//! Usage: cargo run --example analyze_csv <data.csv> [horizon_days]

use anyhow::{bail, Context, Result};
use profit_forecaster::{analyze, RawTable};

fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let Some(path) = args.next() else {
        bail!("usage: analyze_csv <data.csv> [horizon_days]");
    };
    let horizon_days = match args.next() {
        Some(raw) => raw.parse().context("horizon_days must be an integer")?,
        None => 90,
    };

    let table = read_table(&path)?;
    let report = analyze(&table, horizon_days)
        .with_context(|| format!("analysis of {} failed", path))?;

    if report.dropped_rows > 0 {
        println!(
            "note: {} rows dropped for unparseable values\n",
            report.dropped_rows
        );
    }

    println!("== Key Performance Indicators ==");
    println!("Total Revenue: {:>14.2}", report.kpis.total_revenue);
    println!("Total Cost:    {:>14.2}", report.kpis.total_cost);
    println!("Total Profit:  {:>14.2}", report.kpis.total_profit);
    if report.kpis.is_profitable {
        println!(
            "The business is profitable with a total profit of {:.2}.",
            report.kpis.total_profit
        );
    } else {
        println!(
            "The business is incurring a loss of {:.2}.",
            report.kpis.total_profit.abs()
        );
    }

    println!("\n== Profit Forecast (last 10 of {} days) ==", horizon_days);
    for point in report.forecast.points.iter().rev().take(10).rev() {
        println!("{}: {:>12.2}", point.date, point.predicted_profit);
    }

    println!("\n== Feature Impact on Profit ==");
    for impact in &report.attribution.impacts {
        println!("{:<22} {:>8.4}", impact.feature, impact.impact_on_profit);
    }

    Ok(())
}

fn read_table(path: &str) -> Result<RawTable> {
    let mut reader =
        csv::Reader::from_path(path).with_context(|| format!("failed to open {}", path))?;
    let headers = reader.headers()?.clone();
    let mut table = RawTable::new(headers.iter());
    for record in reader.records() {
        let record = record?;
        table.push_row(record.iter());
    }
    Ok(table)
}
