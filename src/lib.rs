//! # Profit Forecaster
//!
//! A library for analyzing daily profit & loss data: it validates a raw
//! uploaded table, aggregates headline KPIs, projects profit forward with a
//! deterministic additive trend + seasonality model, and attributes profit
//! sensitivity to each expense category via least-squares regression.
//!
//! ## Core Concepts
//!
//! - **Raw table**: untyped rows of named string cells, as they arrive from
//!   a CSV upload. The host owns all file and chart I/O.
//! - **Financial series**: the validated, date-ordered history with profit
//!   derived per row (`revenue - cost - operating_expenses - marketing_expenses`).
//! - **Forecast**: one joint least-squares fit of a piecewise-linear trend
//!   plus weekly/yearly Fourier seasonality, extended a caller-chosen number
//!   of days (30-365) past the last observation.
//! - **Attribution**: OLS coefficients giving each input category's marginal
//!   effect on profit, holding the others fixed.
//!
//! ## Example
//!
//! ```rust,ignore
//! use profit_forecaster::{analyze, RawTable};
//!
//! let mut table = RawTable::new(["date", "revenue", "cogs", "operating_expenses", "marketing"]);
//! table.push_row(["01-01-2024", "10000", "4000", "3000", "1000"]);
//! // ... one row per day ...
//!
//! let report = analyze(&table, 90)?;
//! println!("total profit: {}", report.kpis.total_profit);
//! for point in &report.forecast.points {
//!     println!("{}: {:.2}", point.date, point.predicted_profit);
//! }
//! ```
//!
//! The three analytical stages are independent over the validated series and
//! can also be called separately: [`validate`], [`summarize`], [`forecast`],
//! [`attribute`].

pub mod attribution;
pub mod error;
pub mod forecast;
pub mod ingestion;
pub mod kpi;
mod linalg;
pub mod schema;
pub mod synthetic;
pub mod table;

pub use attribution::{attribute, FEATURE_COLUMNS};
pub use error::{AnalysisError, Result};
pub use forecast::{forecast, MAX_HORIZON_DAYS, MIN_HORIZON_DAYS, MIN_OBSERVATIONS};
pub use ingestion::{normalize_columns, validate, REQUIRED_COLUMNS};
pub use kpi::summarize;
pub use schema::{
    AttributionResult, FeatureImpact, FinancialRecord, FinancialSeries, ForecastPoint,
    ForecastResult, KpiSummary, DATE_FORMAT,
};
pub use synthetic::{generate_table, SyntheticConfig};
pub use table::RawTable;

use log::info;
use serde::Serialize;

/// Everything one analysis run produces, bundled for the host to render.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub kpis: KpiSummary,
    pub forecast: ForecastResult,
    pub attribution: AttributionResult,
    /// Rows discarded during validation for unparseable cells.
    pub dropped_rows: usize,
}

/// Runs the full pipeline on one raw table: validate, then KPIs, forecast,
/// and attribution over the same immutable series.
pub fn analyze(raw: &RawTable, horizon_days: u32) -> Result<AnalysisReport> {
    let series = validate(raw)?;
    info!(
        "Analyzing {} records from {} to {} (horizon {} days)",
        series.len(),
        series.first_date(),
        series.last_date(),
        horizon_days
    );

    let kpis = summarize(&series);
    let forecast = forecast::forecast(&series, horizon_days)?;
    let attribution = attribution::attribute(&series)?;

    Ok(AnalysisReport {
        kpis,
        forecast,
        attribution,
        dropped_rows: series.dropped_rows(),
    })
}
