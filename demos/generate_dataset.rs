//! Writes a synthetic daily financial dataset to a CSV file, in the schema
//! the analyzer expects.
//!
//! Usage: cargo run --example generate_dataset [output.csv] [days]

use anyhow::{Context, Result};
use profit_forecaster::{generate_table, SyntheticConfig};

fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let path = args
        .next()
        .unwrap_or_else(|| "company_financial_data.csv".to_string());
    let days = match args.next() {
        Some(raw) => raw.parse().context("days must be an integer")?,
        None => 730,
    };

    let table = generate_table(&SyntheticConfig {
        days,
        ..SyntheticConfig::default()
    });

    let mut writer = csv::Writer::from_path(&path)
        .with_context(|| format!("failed to create {}", path))?;
    writer.write_record(table.columns())?;
    for row in table.rows() {
        writer.write_record(row)?;
    }
    writer.flush()?;

    println!("Wrote {} rows to {}", table.len(), path);
    Ok(())
}
