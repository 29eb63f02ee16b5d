use crate::schema::{FinancialSeries, KpiSummary};

/// Computes the aggregate view over a series. Pure accumulation over all
/// rows; the non-empty precondition is guaranteed by `FinancialSeries`
/// construction.
pub fn summarize(series: &FinancialSeries) -> KpiSummary {
    let mut total_revenue = 0.0;
    let mut total_cost = 0.0;
    let mut total_profit = 0.0;

    for record in series.records() {
        total_revenue += record.revenue();
        total_cost += record.cost();
        total_profit += record.profit();
    }

    KpiSummary {
        total_revenue,
        total_cost,
        total_profit,
        is_profitable: total_profit >= 0.0,
    }
}
