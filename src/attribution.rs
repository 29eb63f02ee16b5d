//! Profit attribution: ordinary least squares of profit on the four input
//! categories. Coefficients are marginal effects in input units (currency
//! per currency), holding the other categories fixed.
//!
//! Because profit is itself a linear combination of these columns, a series
//! with independent variation in all four yields exactly +1 for revenue and
//! -1 for each expense category with zero residual. That is the expected
//! outcome, not a degenerate fit. What *is* degenerate is input without
//! enough variation (a constant column, or two proportional columns): the
//! normal equations lose rank and the fit is rejected.

use crate::error::{AnalysisError, Result};
use crate::linalg;
use crate::schema::{AttributionResult, FeatureImpact, FinancialSeries};

/// Regression features, in input-schema order.
pub const FEATURE_COLUMNS: [&str; 4] = [
    "revenue",
    "cost",
    "operating_expenses",
    "marketing_expenses",
];

/// Fits `profit ~ revenue + cost + operating_expenses + marketing_expenses`
/// with a bias term and reports the four slope coefficients. The columns are
/// centered before the solve, which fits the bias implicitly and keeps the
/// normal equations well conditioned at currency scale.
pub fn attribute(series: &FinancialSeries) -> Result<AttributionResult> {
    let n = series.len() as f64;

    let features: Vec<[f64; 4]> = series
        .records()
        .iter()
        .map(|r| {
            [
                r.revenue(),
                r.cost(),
                r.operating_expenses(),
                r.marketing_expenses(),
            ]
        })
        .collect();
    let profits: Vec<f64> = series.records().iter().map(|r| r.profit()).collect();

    let mut feature_means = [0.0; 4];
    for row in &features {
        for (mean, value) in feature_means.iter_mut().zip(row) {
            *mean += value / n;
        }
    }
    let profit_mean = profits.iter().sum::<f64>() / n;

    let design: Vec<Vec<f64>> = features
        .iter()
        .map(|row| {
            row.iter()
                .zip(&feature_means)
                .map(|(value, mean)| value - mean)
                .collect()
        })
        .collect();
    let targets: Vec<f64> = profits.iter().map(|p| p - profit_mean).collect();

    let coefficients = linalg::least_squares(&design, &targets).ok_or_else(|| {
        AnalysisError::SingularDesign(format!(
            "input columns {} are collinear or lack variation, so marginal \
             effects cannot be separated",
            FEATURE_COLUMNS.join(", ")
        ))
    })?;

    let impacts = FEATURE_COLUMNS
        .iter()
        .zip(coefficients)
        .map(|(feature, impact_on_profit)| FeatureImpact {
            feature: (*feature).to_string(),
            impact_on_profit,
        })
        .collect();

    Ok(AttributionResult { impacts })
}
