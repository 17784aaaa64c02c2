//! The forecast engine — sales to staffing to labor cost.
//!
//! EXECUTION ORDER (fixed, per forecast month):
//!   1. Sales forecast     (capture rate × competition × traffic × sale)
//!   2. Weekly sales       (monthly / weeks per month)
//!   3. Distribution       (week → day type → time block)
//!   4. Threshold policy   (hourly sales rate → headcount)
//!   5. Role allocation    (headcount × duration → role hours, weekly ledger)
//!   6. Labor cost         (role hours × rate, overhead, monthly scaling)
//!
//! RULES:
//!   - Inputs are validated before step 1; a rejected run returns no tables.
//!   - Every horizon year must be in the capture-rate table before step 1.
//!   - The distribution profile is fitted to the run's operating week once,
//!     before the month loop.
//!   - The weekly ledger is created per month and dropped with it.
//!   - The engine holds only read-only config, so one engine may serve
//!     many runs on many threads.

use crate::{
    config::EngineConfig,
    distribution::SalesDistributionProfile,
    error::{EngineError, EngineResult},
    inputs::ForecastInputs,
    labor_cost::{labor_cost_percentage, LaborCostCalculator},
    report::{ForecastReport, MonthPlan, RoleSummary, StaffingRow, StaffingWeek},
    role_allocator::{RoleAllocator, RoleHierarchy, WeeklyHoursLedger},
    sales_forecaster::{SalesDrivers, SalesForecaster},
    types::{minutes_to_hours, Money, MONTHS_PER_YEAR},
};
use std::sync::Arc;

pub const OPEN_CLOSE_LABEL: &str = "open/close";

#[derive(Debug, Clone)]
pub struct ForecastEngine {
    config: Arc<EngineConfig>,
}

impl ForecastEngine {
    /// Validate `config` and wrap it for sharing.
    pub fn new(config: EngineConfig) -> EngineResult<Self> {
        Self::shared(Arc::new(config))
    }

    pub fn shared(config: Arc<EngineConfig>) -> EngineResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Run the full chain for every month of the input horizon.
    pub fn run(&self, inputs: &ForecastInputs) -> EngineResult<ForecastReport> {
        inputs.validate()?;
        let op = &inputs.operating;
        if let Some(year) = inputs.years().find(|y| !self.config.capture_rates.contains_year(*y)) {
            return Err(EngineError::Lookup { year, month: 1 });
        }
        let dist = self.config.distribution.for_operating_week(
            op.days_open_per_week,
            op.open_hour,
            op.span_hours(),
        )?;
        let roles = self.config.roles.with_rates(&inputs.hourly_rates)?;

        let forecaster = SalesForecaster::new(
            &self.config.capture_rates,
            &self.config.competition,
            self.config.weeks_per_month,
        )?;
        let drivers = SalesDrivers {
            traffic: inputs.traffic_count as f64,
            average_sale: inputs.average_sale,
            days_open_per_week: op.days_open_per_week,
            competitor_count: op.competitor_count,
        };

        if self.config.competition.is_floored(op.competitor_count) {
            log::warn!(
                "{} competitors: capture rate held at the {:.0}% floor",
                op.competitor_count,
                self.config.competition.floor_fraction * 100.0
            );
        }
        log::info!(
            "Forecast run: traffic={} avg_sale={:.2} days_open={} hours={}..{} years {}..{}",
            inputs.traffic_count,
            inputs.average_sale,
            op.days_open_per_week,
            op.open_hour,
            op.close_hour,
            inputs.first_year,
            inputs.last_year().unwrap_or(inputs.first_year)
        );

        let calc = LaborCostCalculator::new(&roles, &self.config.overhead, self.config.weeks_per_month);
        let mut plans = Vec::with_capacity(inputs.horizon_months().unwrap_or(0) as usize);

        for year in inputs.years() {
            for month in 1..=MONTHS_PER_YEAR {
                let sales = forecaster.forecast_monthly_sales(&drivers, year, month)?;
                let weekly_sales = forecaster.weekly_from_monthly(sales);
                let week = self.staff_week(&dist, weekly_sales, &roles, &calc);
                let labor_cost = calc.monthly_cost(week.weekly_cost);
                let labor_cost_pct = labor_cost_percentage(labor_cost, sales);

                log::debug!(
                    "Y{year} M{month:02}: sales={sales:.2} peak_headcount={} hours={:.1} labor={labor_cost:.2} ({labor_cost_pct:.1}%)",
                    week.peak_headcount(),
                    week.total_hours()
                );

                plans.push(MonthPlan {
                    year,
                    month,
                    sales,
                    weekly_sales,
                    labor_cost,
                    labor_cost_pct,
                    week,
                });
            }
        }

        let report = ForecastReport::assemble(plans);
        log::info!(
            "Forecast complete: {} months, sales={:.2} labor={:.2}",
            report.plans.len(),
            report.total_sales(),
            report.total_labor_cost()
        );
        Ok(report)
    }

    /// Staff one representative week carrying `weekly_sales` over `dist`.
    /// The hours ledger lives only for the duration of this call.
    pub fn staff_week(
        &self,
        dist: &SalesDistributionProfile,
        weekly_sales: Money,
        roles: &RoleHierarchy,
        calc: &LaborCostCalculator<'_>,
    ) -> StaffingWeek {
        let allocator = RoleAllocator::new(roles);
        let mut ledger = WeeklyHoursLedger::new(roles);
        let mut rows = Vec::new();
        let mut weekly_wages = 0.0;

        for day in dist.day_types() {
            if let Some(cover) = &self.config.open_close {
                let alloc = allocator.allocate(cover.headcount, cover.duration_minutes(), &mut ledger);
                weekly_wages += calc.block_wages(&alloc);
                rows.push(StaffingRow {
                    day: day.day,
                    block: OPEN_CLOSE_LABEL.to_string(),
                    duration_hours: cover.hours_per_day,
                    block_sales: 0.0,
                    hourly_sales: 0.0,
                    required_headcount: cover.headcount,
                    labor_cost: calc.block_cost(&alloc),
                    role_hours: alloc.roles,
                });
            }

            let daily_sales = dist.daily_sales(weekly_sales, day);
            for block in dist.time_blocks() {
                let block_sales = dist.time_block_sales(daily_sales, block);
                let hourly_sales = block_sales / block.duration_hours;
                let headcount = self.config.thresholds.required_headcount(hourly_sales);
                let alloc = allocator.allocate(headcount, block.duration_minutes(), &mut ledger);
                weekly_wages += calc.block_wages(&alloc);
                rows.push(StaffingRow {
                    day: day.day,
                    block: block.label.clone(),
                    duration_hours: block.duration_hours,
                    block_sales,
                    hourly_sales,
                    required_headcount: headcount,
                    labor_cost: calc.block_cost(&alloc),
                    role_hours: alloc.roles,
                });
            }
        }

        let role_summary = roles
            .roles()
            .iter()
            .enumerate()
            .map(|(i, spec)| {
                let weekly_hours = minutes_to_hours(ledger.allocated_minutes(i));
                RoleSummary {
                    role: spec.name.clone(),
                    weekly_hours,
                    hourly_rate: spec.hourly_rate,
                    weekly_wages: weekly_hours * spec.hourly_rate,
                }
            })
            .collect();

        let priced = calc.weekly_cost(rows.iter().map(|r| r.labor_cost));
        StaffingWeek {
            rows,
            role_summary,
            weekly_wages,
            weekly_cost: calc.effective_cost(priced),
        }
    }
}
