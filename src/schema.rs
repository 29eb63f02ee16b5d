use crate::error::{AnalysisError, Result};
use crate::table::RawTable;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Wire format for the `date` column: day-month-year, e.g. `31-01-2024`.
pub const DATE_FORMAT: &str = "%d-%m-%Y";

/// One day of financial activity. `profit` is always derived from the other
/// four amounts; it can never be supplied externally (deserialization
/// recomputes it and ignores any incoming `profit` field).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "RecordFields")]
pub struct FinancialRecord {
    date: NaiveDate,
    revenue: f64,
    cost: f64,
    operating_expenses: f64,
    marketing_expenses: f64,
    profit: f64,
}

#[derive(Deserialize)]
struct RecordFields {
    date: NaiveDate,
    revenue: f64,
    cost: f64,
    operating_expenses: f64,
    marketing_expenses: f64,
}

impl From<RecordFields> for FinancialRecord {
    fn from(fields: RecordFields) -> Self {
        Self::new(
            fields.date,
            fields.revenue,
            fields.cost,
            fields.operating_expenses,
            fields.marketing_expenses,
        )
    }
}

impl FinancialRecord {
    pub fn new(
        date: NaiveDate,
        revenue: f64,
        cost: f64,
        operating_expenses: f64,
        marketing_expenses: f64,
    ) -> Self {
        Self {
            date,
            revenue,
            cost,
            operating_expenses,
            marketing_expenses,
            profit: revenue - cost - operating_expenses - marketing_expenses,
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn revenue(&self) -> f64 {
        self.revenue
    }

    pub fn cost(&self) -> f64 {
        self.cost
    }

    pub fn operating_expenses(&self) -> f64 {
        self.operating_expenses
    }

    pub fn marketing_expenses(&self) -> f64 {
        self.marketing_expenses
    }

    pub fn profit(&self) -> f64 {
        self.profit
    }
}

/// A validated financial history: non-empty, strictly increasing by date.
/// Built once per ingestion call and immutable afterwards. `dropped_rows`
/// carries the count of rows discarded during cleaning so the host can
/// surface it next to the results.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinancialSeries {
    records: Vec<FinancialRecord>,
    dropped_rows: usize,
}

impl FinancialSeries {
    pub(crate) fn new(mut records: Vec<FinancialRecord>, dropped_rows: usize) -> Result<Self> {
        if records.is_empty() {
            return Err(AnalysisError::EmptySeries {
                dropped: dropped_rows,
            });
        }

        records.sort_by_key(|r| r.date());

        for pair in records.windows(2) {
            if pair[0].date() == pair[1].date() {
                return Err(AnalysisError::DuplicateDate(pair[0].date()));
            }
        }

        Ok(Self {
            records,
            dropped_rows,
        })
    }

    /// Builds a series from already-typed records, applying the same ordering
    /// and duplicate-date rules as `validate`.
    pub fn from_records(records: Vec<FinancialRecord>) -> Result<Self> {
        Self::new(records, 0)
    }

    pub fn records(&self) -> &[FinancialRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        // A constructed series is never empty; kept for API symmetry.
        self.records.is_empty()
    }

    pub fn dropped_rows(&self) -> usize {
        self.dropped_rows
    }

    pub fn first_date(&self) -> NaiveDate {
        self.records[0].date()
    }

    pub fn last_date(&self) -> NaiveDate {
        self.records[self.records.len() - 1].date()
    }

    /// Renders the series back into the raw boundary format, dates in
    /// `DD-MM-YYYY`. Feeding the result through `validate` again yields an
    /// identical series.
    pub fn to_raw_table(&self) -> RawTable {
        let mut table = RawTable::new([
            "date",
            "revenue",
            "cost",
            "operating_expenses",
            "marketing_expenses",
        ]);
        for record in &self.records {
            table.push_row([
                record.date().format(DATE_FORMAT).to_string(),
                record.revenue().to_string(),
                record.cost().to_string(),
                record.operating_expenses().to_string(),
                record.marketing_expenses().to_string(),
            ]);
        }
        table
    }
}

/// Aggregate view over a series, regenerated on each request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KpiSummary {
    pub total_revenue: f64,
    pub total_cost: f64,
    pub total_profit: f64,
    pub is_profitable: bool,
}

/// One projected (or fitted) value of the profit series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub date: NaiveDate,
    pub predicted_profit: f64,
}

/// Model output covering the historical fit followed by the projected
/// horizon, one point per date in ascending order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    pub points: Vec<ForecastPoint>,
    pub horizon_days: u32,
    /// Number of trend changepoints the grid search settled on.
    pub changepoints: usize,
}

impl ForecastResult {
    /// The projected portion: every point strictly after the last observed
    /// date.
    pub fn future_points(&self, last_observed: NaiveDate) -> &[ForecastPoint] {
        let start = self
            .points
            .partition_point(|p| p.date <= last_observed);
        &self.points[start..]
    }
}

/// Marginal effect of one input category on profit, in currency-per-currency
/// terms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureImpact {
    pub feature: String,
    pub impact_on_profit: f64,
}

/// Profit sensitivity per input category, ordered as the columns appear in
/// the input schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributionResult {
    pub impacts: Vec<FeatureImpact>,
}

impl AttributionResult {
    pub fn coefficient(&self, feature: &str) -> Option<f64> {
        self.impacts
            .iter()
            .find(|i| i.feature == feature)
            .map(|i| i.impact_on_profit)
    }
}
