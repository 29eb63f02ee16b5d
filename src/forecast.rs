//! Profit forecasting via additive trend + seasonality decomposition.
//!
//! The profit series is modeled as `trend(t) + seasonal(t) + noise(t)` and
//! fit in one joint least-squares solve over a combined design matrix:
//!
//! - trend: continuous piecewise-linear in the day index, with changepoints
//!   at equal splits of the date range; the changepoint count is grid-searched
//!   up to a small bound and a larger count is only kept when it buys a real
//!   residual improvement
//! - seasonality: truncated Fourier series at yearly (365.25d) and weekly
//!   (7d) periods, each enabled only once the history spans enough days to
//!   identify it
//!
//! The solve is closed-form, so identical input and horizon reproduce the
//! forecast bit-for-bit.

use crate::error::{AnalysisError, Result};
use crate::linalg;
use crate::schema::{FinancialSeries, ForecastPoint, ForecastResult};
use chrono::{Days, NaiveDate};
use log::debug;
use std::f64::consts::TAU;

pub const MIN_HORIZON_DAYS: u32 = 30;
pub const MAX_HORIZON_DAYS: u32 = 365;

/// Seasonal fitting is meaningless below this many observations.
pub const MIN_OBSERVATIONS: usize = 14;

const MAX_CHANGEPOINTS: usize = 5;

const YEARLY_PERIOD_DAYS: f64 = 365.25;
const WEEKLY_PERIOD_DAYS: f64 = 7.0;
const YEARLY_HARMONICS: usize = 3;
const WEEKLY_HARMONICS: usize = 2;

// A periodic term is only identifiable once the history spans it.
const MIN_YEARLY_SPAN_DAYS: f64 = 365.0;
const MIN_WEEKLY_SPAN_DAYS: f64 = 14.0;

/// Extra changepoints must cut the residual sum of squares by at least this
/// relative margin to be kept; otherwise the simpler trend wins.
const RSS_IMPROVEMENT_MARGIN: f64 = 0.01;

/// Projects the profit series `horizon_days` past the last observed date.
///
/// The result covers both regimes in one ordered sequence: the fitted curve
/// evaluated at every historical date, then one point per future day.
pub fn forecast(series: &FinancialSeries, horizon_days: u32) -> Result<ForecastResult> {
    if !(MIN_HORIZON_DAYS..=MAX_HORIZON_DAYS).contains(&horizon_days) {
        return Err(AnalysisError::InvalidHorizon(horizon_days));
    }
    if series.len() < MIN_OBSERVATIONS {
        return Err(AnalysisError::InsufficientHistory {
            observed: series.len(),
            required: MIN_OBSERVATIONS,
        });
    }

    let model = TrendSeasonModel::fit(series)?;
    debug!(
        "Fitted profit model: {} changepoints, rss {:.4}, yearly={}, weekly={}",
        model.basis.changepoints.len(),
        model.rss,
        model.basis.yearly,
        model.basis.weekly
    );

    let mut points =
        Vec::with_capacity(series.len() + horizon_days as usize);
    for record in series.records() {
        points.push(ForecastPoint {
            date: record.date(),
            predicted_profit: model.predict(record.date()),
        });
    }
    let last = series.last_date();
    for day in 1..=u64::from(horizon_days) {
        let date = last
            .checked_add_days(Days::new(day))
            .ok_or(AnalysisError::InvalidHorizon(horizon_days))?;
        points.push(ForecastPoint {
            date,
            predicted_profit: model.predict(date),
        });
    }

    Ok(ForecastResult {
        points,
        horizon_days,
        changepoints: model.basis.changepoints.len(),
    })
}

/// The combined trend + Fourier basis. The day index is centered on the
/// middle of the observed range and scaled to roughly [-1, 1] so the normal
/// equations stay well conditioned on long histories.
struct Basis {
    start: NaiveDate,
    mid: f64,
    half_span: f64,
    /// Changepoint positions in scaled-time units.
    changepoints: Vec<f64>,
    weekly: bool,
    yearly: bool,
}

impl Basis {
    fn new(series: &FinancialSeries, n_changepoints: usize) -> Self {
        let span = (series.last_date() - series.first_date()).num_days() as f64;
        let segments = (n_changepoints + 1) as f64;
        let changepoints = (1..=n_changepoints)
            .map(|j| -1.0 + 2.0 * j as f64 / segments)
            .collect();

        Self {
            start: series.first_date(),
            mid: span / 2.0,
            half_span: (span / 2.0).max(1.0),
            changepoints,
            weekly: span >= MIN_WEEKLY_SPAN_DAYS,
            yearly: span >= MIN_YEARLY_SPAN_DAYS,
        }
    }

    fn row(&self, date: NaiveDate) -> Vec<f64> {
        let t = (date - self.start).num_days() as f64;
        let x = (t - self.mid) / self.half_span;

        let mut row = vec![1.0, x];
        for &cp in &self.changepoints {
            row.push((x - cp).max(0.0));
        }
        if self.weekly {
            push_harmonics(&mut row, t, WEEKLY_PERIOD_DAYS, WEEKLY_HARMONICS);
        }
        if self.yearly {
            push_harmonics(&mut row, t, YEARLY_PERIOD_DAYS, YEARLY_HARMONICS);
        }
        row
    }
}

fn push_harmonics(row: &mut Vec<f64>, t: f64, period: f64, order: usize) {
    for harmonic in 1..=order {
        let angle = TAU * harmonic as f64 * t / period;
        row.push(angle.sin());
        row.push(angle.cos());
    }
}

struct TrendSeasonModel {
    basis: Basis,
    coefficients: Vec<f64>,
    rss: f64,
}

impl TrendSeasonModel {
    /// Grid-searches the changepoint count and keeps the fit with the lowest
    /// residual sum of squares, preferring fewer changepoints when the
    /// improvement is marginal. Candidates whose design matrix turns out
    /// singular are skipped.
    fn fit(series: &FinancialSeries) -> Result<Self> {
        let targets: Vec<f64> = series.records().iter().map(|r| r.profit()).collect();

        let mut best: Option<TrendSeasonModel> = None;
        for n_changepoints in 0..=MAX_CHANGEPOINTS {
            let basis = Basis::new(series, n_changepoints);
            let design: Vec<Vec<f64>> = series
                .records()
                .iter()
                .map(|r| basis.row(r.date()))
                .collect();

            let coefficients = match linalg::least_squares(&design, &targets) {
                Some(c) => c,
                None => continue,
            };
            let rss = linalg::residual_sum_of_squares(&design, &targets, &coefficients);

            let improves = match &best {
                None => true,
                Some(current) => rss < current.rss * (1.0 - RSS_IMPROVEMENT_MARGIN),
            };
            if improves {
                best = Some(TrendSeasonModel {
                    basis,
                    coefficients,
                    rss,
                });
            }
        }

        best.ok_or_else(|| {
            AnalysisError::SingularDesign(
                "trend/seasonality design matrix was singular for every changepoint candidate"
                    .to_string(),
            )
        })
    }

    fn predict(&self, date: NaiveDate) -> f64 {
        linalg::dot(&self.basis.row(date), &self.coefficients)
    }
}
