//! Output tables. Plain row/column structures, serialisable so a
//! collaborator can render or export them.

use crate::{
    labor_cost::labor_cost_percentage,
    role_allocator::RoleHours,
    types::{Money, Month, Year},
};
use chrono::Weekday;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearRow {
    pub year: Year,
    /// Index 0 = month 1.
    pub months: Vec<f64>,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct MonthlyTable {
    pub rows: Vec<YearRow>,
}

impl MonthlyTable {
    pub fn row(&self, year: Year) -> Option<&YearRow> {
        self.rows.iter().find(|r| r.year == year)
    }

    pub fn value(&self, year: Year, month: Month) -> Option<f64> {
        let idx = (month as usize).checked_sub(1)?;
        self.row(year)?.months.get(idx).copied()
    }

    /// Group plan values by year; the yearly total is the sum of months.
    fn summed(plans: &[MonthPlan], value: impl Fn(&MonthPlan) -> f64) -> Self {
        let mut rows: Vec<YearRow> = Vec::new();
        for plan in plans {
            let v = value(plan);
            match rows.last_mut() {
                Some(row) if row.year == plan.year => {
                    row.months.push(v);
                    row.total += v;
                }
                _ => rows.push(YearRow { year: plan.year, months: vec![v], total: v }),
            }
        }
        Self { rows }
    }
}

/// One (day, time block) line of the staffing table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StaffingRow {
    pub day: Weekday,
    pub block: String,
    pub duration_hours: f64,
    pub block_sales: Money,
    pub hourly_sales: Money,
    pub required_headcount: u32,
    pub role_hours: Vec<RoleHours>,
    pub labor_cost: Money,
}

/// Weekly hours and wages per role.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoleSummary {
    pub role: String,
    pub weekly_hours: f64,
    pub hourly_rate: Money,
    pub weekly_wages: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StaffingWeek {
    pub rows: Vec<StaffingRow>,
    pub role_summary: Vec<RoleSummary>,
    pub weekly_wages: Money,
    /// Weekly cost including overhead.
    pub weekly_cost: Money,
}

impl StaffingWeek {
    pub fn peak_headcount(&self) -> u32 {
        self.rows.iter().map(|r| r.required_headcount).max().unwrap_or(0)
    }

    pub fn total_hours(&self) -> f64 {
        self.role_summary.iter().map(|r| r.weekly_hours).sum()
    }

    pub fn rows_for(&self, day: Weekday) -> impl Iterator<Item = &StaffingRow> {
        self.rows.iter().filter(move |r| r.day == day)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthPlan {
    pub year: Year,
    pub month: Month,
    pub sales: Money,
    pub weekly_sales: Money,
    pub labor_cost: Money,
    pub labor_cost_pct: f64,
    pub week: StaffingWeek,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastReport {
    pub sales: MonthlyTable,
    pub labor_cost: MonthlyTable,
    pub labor_cost_pct: MonthlyTable,
    pub plans: Vec<MonthPlan>,
}

impl ForecastReport {
    /// Build the year × month tables from plans in (year, month) order.
    pub fn assemble(plans: Vec<MonthPlan>) -> Self {
        let sales = MonthlyTable::summed(&plans, |p| p.sales);
        let labor_cost = MonthlyTable::summed(&plans, |p| p.labor_cost);

        // Yearly percentage is yearly labor over yearly sales, not a sum.
        let mut labor_cost_pct = MonthlyTable::summed(&plans, |p| p.labor_cost_pct);
        for (row, (s, l)) in labor_cost_pct
            .rows
            .iter_mut()
            .zip(sales.rows.iter().zip(&labor_cost.rows))
        {
            row.total = labor_cost_percentage(l.total, s.total);
        }

        Self { sales, labor_cost, labor_cost_pct, plans }
    }

    pub fn plan(&self, year: Year, month: Month) -> Option<&MonthPlan> {
        self.plans.iter().find(|p| p.year == year && p.month == month)
    }

    pub fn total_sales(&self) -> Money {
        self.sales.rows.iter().map(|r| r.total).sum()
    }

    pub fn total_labor_cost(&self) -> Money {
        self.labor_cost.rows.iter().map(|r| r.total).sum()
    }
}
