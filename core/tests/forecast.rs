//! Sales forecast tests — monthly table, horizon and input rejection.

use chrono::Weekday;
use std::collections::HashMap;
use storecast_core::{
    EngineConfig, EngineError, ForecastEngine, ForecastInputs, OperatingProfile,
};

fn inputs(traffic: i64, competitors: u32) -> ForecastInputs {
    ForecastInputs {
        traffic_count: traffic,
        average_sale: 10.0,
        operating: OperatingProfile {
            days_open_per_week: 6,
            open_hour: 7,
            close_hour: 17,
            competitor_count: competitors,
        },
        first_year: 1,
        horizon_years: 3,
        hourly_rates: HashMap::new(),
    }
}

fn engine() -> ForecastEngine {
    ForecastEngine::new(EngineConfig::default_test()).expect("canonical config")
}

/// 1500 × (0.0062 × 0.90) × $10 × 6 days × 4.3 weeks.
#[test]
fn year_one_january_matches_formula() {
    let _ = env_logger::builder().is_test(true).try_init();

    let report = engine().run(&inputs(1500, 2)).unwrap();
    let sales = report.sales.value(1, 1).unwrap();

    let expected = 1500.0 * (0.0062 * 0.90) * 10.0 * 6.0 * 4.3;
    assert!((sales - expected).abs() < 1e-9, "sales={sales} expected={expected}");
    assert!((sales - 2159.46).abs() < 1e-6);
}

#[test]
fn horizon_produces_three_years_of_months() {
    let report = engine().run(&inputs(1500, 0)).unwrap();

    assert_eq!(report.plans.len(), 36);
    assert_eq!(report.sales.rows.len(), 3);
    for row in &report.sales.rows {
        assert_eq!(row.months.len(), 12);
        let sum: f64 = row.months.iter().sum();
        assert!((row.total - sum).abs() < 1e-9);
    }
    // Year-two capture rates are roughly double year one.
    assert!(report.sales.row(2).unwrap().total > report.sales.row(1).unwrap().total);
}

#[test]
fn zero_traffic_gives_zero_sales_and_zero_percentage() {
    let report = engine().run(&inputs(0, 0)).unwrap();

    for plan in &report.plans {
        assert_eq!(plan.sales, 0.0);
        assert_eq!(plan.labor_cost_pct, 0.0);
    }
    for row in &report.labor_cost_pct.rows {
        assert_eq!(row.total, 0.0);
    }
}

#[test]
fn more_competitors_never_raise_sales() {
    let e = engine();
    let mut prev = f64::INFINITY;
    for competitors in 0..15 {
        let total = e.run(&inputs(1500, competitors)).unwrap().total_sales();
        assert!(total <= prev, "sales rose at {competitors} competitors");
        prev = total;
    }
}

#[test]
fn horizon_past_table_is_lookup_error() {
    let mut i = inputs(1500, 0);
    i.first_year = 3;
    i.horizon_years = 2;

    let err = engine().run(&i).unwrap_err();
    assert!(matches!(err, EngineError::Lookup { year: 4, month: 1 }), "{err}");
}

#[test]
fn negative_traffic_rejected_before_computation() {
    let err = engine().run(&inputs(-5, 0)).unwrap_err();
    assert!(matches!(err, EngineError::InvalidInput(_)));
}

#[test]
fn zero_hour_span_rejected() {
    let mut i = inputs(1500, 0);
    i.operating.close_hour = 7;
    assert!(matches!(engine().run(&i), Err(EngineError::InvalidInput(_))));
}

#[test]
fn year_past_u32_range_is_lookup_error() {
    let mut i = inputs(1500, 0);
    i.first_year = u32::MAX;
    i.horizon_years = 1;

    let err = engine().run(&i).unwrap_err();
    assert!(matches!(err, EngineError::Lookup { year: u32::MAX, month: 1 }), "{err}");
}

#[test]
fn overflowing_horizon_rejected_before_computation() {
    let mut i = inputs(1500, 0);
    i.horizon_years = u32::MAX / 12 + 1;
    assert!(matches!(engine().run(&i), Err(EngineError::InvalidInput(_))));

    i.first_year = 2;
    i.horizon_years = u32::MAX;
    assert!(matches!(engine().run(&i), Err(EngineError::InvalidInput(_))));
}

/// A long horizon fails on its first missing year without building plans.
#[test]
fn long_horizon_stops_at_first_missing_year() {
    let mut i = inputs(1500, 0);
    i.horizon_years = 1_000_000;

    let err = engine().run(&i).unwrap_err();
    assert!(matches!(err, EngineError::Lookup { year: 4, month: 1 }), "{err}");
}

#[test]
fn seven_day_week_is_forecast_and_staffed() {
    let mut i = inputs(1500, 0);
    i.operating.days_open_per_week = 7;

    let report = engine().run(&i).unwrap();
    let expected = 1500.0 * 0.0062 * 10.0 * 7.0 * 4.3;
    assert!((report.sales.value(1, 1).unwrap() - expected).abs() < 1e-9);

    let week = &report.plan(1, 1).unwrap().week;
    assert_eq!(week.rows.len(), 70);
    assert_eq!(week.rows_for(Weekday::Sun).count(), 10);
}

#[test]
fn five_day_week_is_forecast_and_staffed() {
    let mut i = inputs(1500, 0);
    i.operating.days_open_per_week = 5;

    let report = engine().run(&i).unwrap();
    let week = &report.plan(2, 3).unwrap().week;
    assert_eq!(week.rows.len(), 50);
    assert_eq!(week.rows_for(Weekday::Sat).count(), 0);
    assert_eq!(week.rows_for(Weekday::Fri).count(), 10);
}

#[test]
fn shorter_trading_day_gets_hourly_blocks() {
    let mut i = inputs(1500, 0);
    i.operating.open_hour = 8;
    i.operating.close_hour = 16;

    let report = engine().run(&i).unwrap();
    let week = &report.plan(1, 1).unwrap().week;
    assert_eq!(week.rows.len(), 6 * 8);
    assert_eq!(week.rows[0].block, "08:00-09:00");
    assert_eq!(week.rows[7].block, "15:00-16:00");
    assert_eq!(week.total_hours(), 6.0 * 8.0 * 2.0);
}
