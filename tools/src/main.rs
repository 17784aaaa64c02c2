//! forecast-runner: headless front end for the sales-to-staffing engine.
//!
//! Usage:
//!   forecast-runner --traffic 1500 --avg-sale 10 --days-open 6 --open 7 --close 17
//!   forecast-runner --traffic 1500 --rate Manager=25 --rate Barista=14 --json
//!   forecast-runner --data-dir ./data --competitors 2 --staffing 2-7

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::env;
use std::path::Path;
use storecast_core::{
    report::{ForecastReport, MonthlyTable, StaffingWeek},
    EngineConfig, ForecastEngine, ForecastInputs, OperatingProfile,
};

#[derive(serde::Serialize)]
struct RunOutput<'a> {
    run_id: String,
    inputs: &'a ForecastInputs,
    report: &'a ForecastReport,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let json_mode = args.iter().any(|a| a == "--json");
    let data_dir = args
        .windows(2)
        .find(|w| w[0] == "--data-dir")
        .map(|w| w[1].as_str())
        .unwrap_or("./data");
    let (staff_year, staff_month) = args
        .windows(2)
        .find(|w| w[0] == "--staffing")
        .and_then(|w| parse_year_month(&w[1]))
        .unwrap_or((1, 1));

    let inputs = ForecastInputs {
        traffic_count: parse_arg(&args, "--traffic", 0i64),
        average_sale: parse_arg(&args, "--avg-sale", 0.0f64),
        operating: OperatingProfile {
            days_open_per_week: parse_arg(&args, "--days-open", 6u8),
            open_hour: parse_arg(&args, "--open", 7u8),
            close_hour: parse_arg(&args, "--close", 17u8),
            competitor_count: parse_arg(&args, "--competitors", 0u32),
        },
        first_year: parse_arg(&args, "--first-year", 1u32),
        horizon_years: parse_arg(&args, "--years", 3u32),
        hourly_rates: parse_rates(&args)?,
    };

    let run_id = uuid::Uuid::new_v4().to_string();
    log::info!("run {run_id}: data_dir={data_dir}");

    let config = if Path::new(data_dir).is_dir() {
        EngineConfig::load(data_dir).with_context(|| format!("loading {data_dir}"))?
    } else {
        log::warn!("{data_dir} not found, using built-in reference tables");
        EngineConfig::default_test()
    };
    let engine = ForecastEngine::new(config)?;
    let report = engine.run(&inputs)?;

    if json_mode {
        let out = RunOutput { run_id, inputs: &inputs, report: &report };
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("Storefront sales, labor and staffing forecast");
    println!("  run_id:      {run_id}");
    println!("  traffic:     {}", inputs.traffic_count);
    println!("  avg sale:    ${:.2}", inputs.average_sale);
    println!("  days open:   {}", inputs.operating.days_open_per_week);
    println!("  hours:       {}..{}", inputs.operating.open_hour, inputs.operating.close_hour);
    println!("  competitors: {}", inputs.operating.competitor_count);
    println!();

    print_table("SALES FORECAST", &report.sales, "$");
    print_table("LABOR COST FORECAST", &report.labor_cost, "$");
    print_table("LABOR COST % OF SALES", &report.labor_cost_pct, "%");

    match report.plan(staff_year, staff_month) {
        Some(plan) => print_staffing(staff_year, staff_month, &plan.week),
        None => log::warn!("no plan for Y{staff_year} M{staff_month}"),
    }
    Ok(())
}

fn print_table(title: &str, table: &MonthlyTable, unit: &str) {
    println!("=== {title} ===");
    let header: String = (1..=12).map(|m| format!("{:>10}", format!("M{m}"))).collect();
    println!("{:<8}{header}{:>12}", "", "Total");
    for row in &table.rows {
        let cells: String = row.months.iter().map(|v| format!("{v:>10.2}")).collect();
        println!("{:<8}{cells}{:>11.2}{unit}", format!("Year {}", row.year), row.total);
    }
    println!();
}

fn print_staffing(year: u32, month: u32, week: &StaffingWeek) {
    println!("=== STAFFING REQUIREMENTS (Y{year} M{month}, one week) ===");
    println!("  {:<18}{:>14}{:>13}{:>13}", "Role", "Weekly Hours", "Hourly Rate", "Weekly Cost");
    for r in &week.role_summary {
        println!(
            "  {:<18}{:>14.1}{:>13.2}{:>13.2}",
            r.role, r.weekly_hours, r.hourly_rate, r.weekly_wages
        );
    }
    println!("  peak headcount: {}", week.peak_headcount());
    println!("  weekly wages:   ${:.2}", week.weekly_wages);
    println!("  weekly cost:    ${:.2} (with overhead)", week.weekly_cost);
    println!();

    println!("  {:<5}{:<14}{:>10}{:>10}{:>6}", "Day", "Block", "Sales", "Per hour", "Staff");
    for row in &week.rows {
        println!(
            "  {:<5}{:<14}{:>10.2}{:>10.2}{:>6}",
            row.day.to_string(),
            row.block,
            row.block_sales,
            row.hourly_sales,
            row.required_headcount
        );
    }
}

/// Collect every `--rate NAME=VALUE` pair.
fn parse_rates(args: &[String]) -> Result<HashMap<String, f64>> {
    args.windows(2)
        .filter(|w| w[0] == "--rate")
        .map(|w| -> Result<(String, f64)> {
            let (name, value) = w[1]
                .split_once('=')
                .with_context(|| format!("--rate expects NAME=VALUE, got {}", w[1]))?;
            let rate = value
                .parse::<f64>()
                .with_context(|| format!("bad rate for {name}: {value}"))?;
            Ok((name.to_string(), rate))
        })
        .collect()
}

/// "2-7" → (2, 7)
fn parse_year_month(s: &str) -> Option<(u32, u32)> {
    let (y, m) = s.split_once('-')?;
    Some((y.parse().ok()?, m.parse().ok()?))
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    match args.windows(2).find(|w| w[0] == flag) {
        Some(w) => w[1].parse().unwrap_or_else(|_| {
            log::warn!("{flag}: cannot parse {:?}, using the default", w[1]);
            default
        }),
        None => default,
    }
}
