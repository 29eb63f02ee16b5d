use crate::error::{AnalysisError, Result};
use crate::schema::{FinancialRecord, FinancialSeries, DATE_FORMAT};
use crate::table::RawTable;
use chrono::NaiveDate;
use log::{debug, warn};

/// Canonical input schema, in presentation order.
pub const REQUIRED_COLUMNS: [&str; 5] = [
    "date",
    "revenue",
    "cost",
    "operating_expenses",
    "marketing_expenses",
];

// Header variations seen in real uploads, folded into canonical names.
// "marketring_expenses" is a recurring misspelling in source exports.
const COLUMN_SYNONYMS: [(&str, &str); 4] = [
    ("cost_of_goods_sold", "cost"),
    ("cogs", "cost"),
    ("marketing", "marketing_expenses"),
    ("marketring_expenses", "marketing_expenses"),
];

/// Trims whitespace from column names and maps known synonyms to the
/// canonical schema. Unknown columns pass through untouched.
pub fn normalize_columns(table: &mut RawTable) {
    table.rename_columns(|name| {
        let trimmed = name.trim();
        match COLUMN_SYNONYMS.iter().find(|(from, _)| *from == trimmed) {
            Some((_, canonical)) => (*canonical).to_string(),
            None => trimmed.to_string(),
        }
    });
}

/// Turns a raw table into a validated `FinancialSeries`.
///
/// Column names are normalized first, then the schema check runs before any
/// row is touched: every absent required column is reported at once. Rows
/// whose date (format `DD-MM-YYYY`) or amounts fail to parse are dropped and
/// counted, never errored. Surviving rows are sorted by date; duplicate
/// dates and an empty result are fatal.
pub fn validate(raw: &RawTable) -> Result<FinancialSeries> {
    let mut table = raw.clone();
    normalize_columns(&mut table);

    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|name| table.column_index(name).is_none())
        .map(|name| (*name).to_string())
        .collect();
    if !missing.is_empty() {
        return Err(AnalysisError::MissingColumns(missing));
    }

    let date_idx = table.column_index("date").unwrap_or_default();
    let revenue_idx = table.column_index("revenue").unwrap_or_default();
    let cost_idx = table.column_index("cost").unwrap_or_default();
    let operating_idx = table.column_index("operating_expenses").unwrap_or_default();
    let marketing_idx = table.column_index("marketing_expenses").unwrap_or_default();

    let mut records = Vec::with_capacity(table.len());
    let mut dropped = 0usize;

    for row in table.rows() {
        match parse_record(
            row,
            date_idx,
            revenue_idx,
            cost_idx,
            operating_idx,
            marketing_idx,
        ) {
            Some(record) => records.push(record),
            None => dropped += 1,
        }
    }

    if dropped > 0 {
        warn!(
            "Dropped {} of {} rows with unparseable date or amount cells",
            dropped,
            table.len()
        );
    }
    debug!("Validated {} financial records", records.len());

    FinancialSeries::new(records, dropped)
}

fn parse_record(
    row: &[String],
    date_idx: usize,
    revenue_idx: usize,
    cost_idx: usize,
    operating_idx: usize,
    marketing_idx: usize,
) -> Option<FinancialRecord> {
    let date = NaiveDate::parse_from_str(row[date_idx].trim(), DATE_FORMAT).ok()?;
    let revenue = parse_amount(&row[revenue_idx])?;
    let cost = parse_amount(&row[cost_idx])?;
    let operating_expenses = parse_amount(&row[operating_idx])?;
    let marketing_expenses = parse_amount(&row[marketing_idx])?;

    Some(FinancialRecord::new(
        date,
        revenue,
        cost,
        operating_expenses,
        marketing_expenses,
    ))
}

fn parse_amount(cell: &str) -> Option<f64> {
    cell.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}
