use chrono::{Days, NaiveDate};
use profit_forecaster::{
    analyze, attribute, forecast, generate_table, summarize, validate, AnalysisError, RawTable,
    SyntheticConfig,
};

fn constant_table(days: u64) -> RawTable {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let mut table = RawTable::new([
        "date",
        "revenue",
        "cost",
        "operating_expenses",
        "marketing_expenses",
    ]);
    for day in 0..days {
        let date = start.checked_add_days(Days::new(day)).unwrap();
        table.push_row([
            date.format("%d-%m-%Y").to_string(),
            "10000".to_string(),
            "4000".to_string(),
            "3000".to_string(),
            "1000".to_string(),
        ]);
    }
    table
}

#[test]
fn profit_is_derived_for_every_record() {
    let table = generate_table(&SyntheticConfig {
        days: 200,
        ..SyntheticConfig::default()
    });
    let series = validate(&table).unwrap();

    for record in series.records() {
        let expected = record.revenue()
            - record.cost()
            - record.operating_expenses()
            - record.marketing_expenses();
        assert_eq!(record.profit(), expected);
    }
}

#[test]
fn summarize_matches_row_sums_regardless_of_input_order() {
    let table = constant_table(60);
    let mut shuffled = RawTable::new(table.columns().to_vec());
    for row in table.rows().iter().rev() {
        shuffled.push_row(row.clone());
    }

    let summary = summarize(&validate(&table).unwrap());
    let summary_shuffled = summarize(&validate(&shuffled).unwrap());

    assert_eq!(summary, summary_shuffled);
    assert_eq!(summary.total_profit, 60.0 * 2000.0);
}

#[test]
fn validate_is_idempotent_on_canonical_input() {
    let table = generate_table(&SyntheticConfig {
        days: 90,
        ..SyntheticConfig::default()
    });
    let first = validate(&table).unwrap();
    let second = validate(&first.to_raw_table()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn synonym_headers_fold_to_canonical_schema() {
    let mut table = RawTable::new([
        " date",
        "revenue ",
        "cogs",
        "operating_expenses",
        "marketing",
    ]);
    table.push_row(["01-01-2024", "100", "20", "30", "10"]);
    table.push_row(["02-01-2024", "110", "25", "30", "10"]);

    let series = validate(&table).unwrap();
    assert_eq!(series.len(), 2);
    assert_eq!(series.records()[0].profit(), 40.0);
}

#[test]
fn missing_column_is_named_exactly() {
    let mut table = RawTable::new(["date", "revenue", "cost", "marketing_expenses"]);
    table.push_row(["01-01-2024", "100", "20", "10"]);

    match validate(&table) {
        Err(AnalysisError::MissingColumns(missing)) => {
            assert_eq!(missing, ["operating_expenses"]);
        }
        other => panic!("expected MissingColumns, got {:?}", other),
    }
}

#[test]
fn duplicate_date_is_named() {
    let mut table = constant_table(5);
    table.push_row(["01-01-2024", "9000", "4000", "3000", "1000"]);

    match validate(&table) {
        Err(AnalysisError::DuplicateDate(date)) => {
            assert_eq!(date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        }
        other => panic!("expected DuplicateDate, got {:?}", other),
    }
}

#[test]
fn unparseable_rows_are_dropped_and_counted() {
    let mut table = constant_table(30);
    table.push_row(["2024-02-01", "100", "10", "10", "10"]);
    table.push_row(["not a date", "100", "10", "10", "10"]);

    let series = validate(&table).unwrap();
    assert_eq!(series.len(), 30);
    assert_eq!(series.dropped_rows(), 2);
}

#[test]
fn all_rows_dropped_is_an_empty_series_error() {
    let mut table = RawTable::new([
        "date",
        "revenue",
        "cost",
        "operating_expenses",
        "marketing_expenses",
    ]);
    table.push_row(["??", "1", "1", "1", "1"]);
    table.push_row(["??", "2", "2", "2", "2"]);

    assert!(matches!(
        validate(&table),
        Err(AnalysisError::EmptySeries { dropped: 2 })
    ));
}

#[test]
fn horizon_bounds_are_enforced() {
    let series = validate(&constant_table(60)).unwrap();

    assert!(matches!(
        forecast(&series, 29),
        Err(AnalysisError::InvalidHorizon(29))
    ));
    assert!(matches!(
        forecast(&series, 366),
        Err(AnalysisError::InvalidHorizon(366))
    ));
    assert!(forecast(&series, 30).is_ok());
    assert!(forecast(&series, 365).is_ok());
}

#[test]
fn short_history_is_rejected() {
    let series = validate(&constant_table(10)).unwrap();
    assert!(matches!(
        forecast(&series, 30),
        Err(AnalysisError::InsufficientHistory {
            observed: 10,
            ..
        })
    ));
}

#[test]
fn forecast_is_reproducible() {
    let series = validate(&generate_table(&SyntheticConfig::default())).unwrap();
    assert_eq!(
        forecast(&series, 120).unwrap(),
        forecast(&series, 120).unwrap()
    );
}

#[test]
fn historical_fit_tracks_observed_profit() {
    // Two years of synthetic data with known trend, holiday seasonality and
    // noise; the fitted overlay should stay within a few noise widths of the
    // actuals on average.
    let series = validate(&generate_table(&SyntheticConfig::default())).unwrap();
    let result = forecast(&series, 90).unwrap();

    let n = series.len();
    let mean_abs_residual: f64 = series
        .records()
        .iter()
        .zip(&result.points[..n])
        .map(|(record, point)| {
            assert_eq!(record.date(), point.date);
            (record.profit() - point.predicted_profit).abs()
        })
        .sum::<f64>()
        / n as f64;

    assert!(
        mean_abs_residual < 2_500.0,
        "mean absolute residual too large: {mean_abs_residual}"
    );
}

#[test]
fn constant_sixty_day_scenario() {
    let table = constant_table(60);
    let series = validate(&table).unwrap();

    for record in series.records() {
        assert_eq!(record.profit(), 2000.0);
    }

    let summary = summarize(&series);
    assert_eq!(summary.total_revenue, 600_000.0);
    assert_eq!(summary.total_profit, 120_000.0);
    assert!(summary.is_profitable);

    let result = forecast(&series, 30).unwrap();
    assert_eq!(result.points.len(), 90);
    for point in result.future_points(series.last_date()) {
        assert!(
            (point.predicted_profit - 2000.0).abs() < 1e-6,
            "flat series should forecast flat, got {} on {}",
            point.predicted_profit,
            point.date
        );
    }

    // With zero variation in every input column the regression design is
    // rank deficient, so attribution refuses the fit rather than invent
    // coefficients.
    assert!(matches!(
        attribute(&series),
        Err(AnalysisError::SingularDesign(_))
    ));
}

#[test]
fn attribution_recovers_unit_coefficients_on_varying_data() {
    let series = validate(&generate_table(&SyntheticConfig::default())).unwrap();
    let result = attribute(&series).unwrap();

    assert!((result.coefficient("revenue").unwrap() - 1.0).abs() < 1e-6);
    for expense in ["cost", "operating_expenses", "marketing_expenses"] {
        assert!((result.coefficient(expense).unwrap() + 1.0).abs() < 1e-6);
    }
}

#[test]
fn analyze_bundles_all_outputs() {
    let mut table = generate_table(&SyntheticConfig {
        days: 365,
        ..SyntheticConfig::default()
    });
    table.push_row(["bad row", "x", "y", "z", "w"]);

    let report = analyze(&table, 60).unwrap();
    assert_eq!(report.dropped_rows, 1);
    assert_eq!(report.forecast.points.len(), 365 + 60);
    assert_eq!(report.attribution.impacts.len(), 4);
    assert_eq!(
        report.kpis.is_profitable,
        report.kpis.total_profit >= 0.0
    );
}
