//! Seeded synthetic dataset generation, in the exact raw schema the
//! validator accepts. Useful for demos and for exercising the pipeline on
//! data with a known trend and seasonality shape: daily revenue follows a
//! base level plus a linear trend, a November/December holiday boost, and
//! Gaussian noise; expenses are drawn from fixed uniform ranges.

use crate::schema::DATE_FORMAT;
use crate::table::RawTable;
use chrono::{Datelike, Days, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};

#[derive(Debug, Clone)]
pub struct SyntheticConfig {
    pub start_date: NaiveDate,
    pub days: usize,
    pub base_revenue: f64,
    /// Linear revenue growth per elapsed day.
    pub daily_trend: f64,
    /// Extra revenue on November and December days.
    pub holiday_boost: f64,
    pub noise_std: f64,
    pub seed: u64,
}

impl Default for SyntheticConfig {
    fn default() -> Self {
        Self {
            start_date: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            days: 730,
            base_revenue: 10_000.0,
            daily_trend: 5.0,
            holiday_boost: 3_000.0,
            noise_std: 1_000.0,
            seed: 42,
        }
    }
}

/// Generates a raw daily table. The same config (seed included) always
/// produces the same table.
pub fn generate_table(config: &SyntheticConfig) -> RawTable {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let noise = Normal::new(0.0, config.noise_std.max(0.0)).unwrap();

    let mut table = RawTable::new([
        "date",
        "revenue",
        "cost",
        "operating_expenses",
        "marketing_expenses",
    ]);

    for day in 0..config.days {
        let date = match config.start_date.checked_add_days(Days::new(day as u64)) {
            Some(d) => d,
            None => break,
        };

        let trend = config.daily_trend * day as f64;
        let boost = if date.month() == 11 || date.month() == 12 {
            config.holiday_boost
        } else {
            0.0
        };
        let revenue =
            (config.base_revenue + trend + boost + noise.sample(&mut rng)).max(2_000.0);

        // Cost tracks revenue as a 40-60% share; overheads are independent.
        let cost = revenue * rng.gen_range(0.4..0.6);
        let operating_expenses = rng.gen_range(2_000.0..5_000.0);
        let marketing_expenses = rng.gen_range(500.0..1_500.0);

        table.push_row([
            date.format(DATE_FORMAT).to_string(),
            to_cents(revenue),
            to_cents(cost),
            to_cents(operating_expenses),
            to_cents(marketing_expenses),
        ]);
    }

    table
}

fn to_cents(value: f64) -> String {
    format!("{:.2}", value)
}
