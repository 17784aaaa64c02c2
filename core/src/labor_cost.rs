//! Labor cost calculator — prices allocated role hours and applies
//! payroll overhead.
//!
//! Two overhead placements are supported and kept distinct:
//!   - `RateLevel`:      each role's rate is loaded by the payroll tax
//!                       before blocks are priced; benefits are added
//!                       once per week.
//!   - `AggregateLevel`: blocks are priced at bare wages; the weekly
//!                       total is loaded by the tax and benefits added.
//! The weekly effective cost is the same either way. Block-level costs
//! differ: they carry the tax only under `RateLevel`.

use crate::{
    error::{EngineError, EngineResult},
    role_allocator::{BlockAllocation, RoleHierarchy},
    types::Money,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverheadMode {
    /// Bare wages, no tax or benefits.
    None,
    RateLevel,
    AggregateLevel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverheadPolicy {
    pub mode: OverheadMode,
    pub payroll_tax_rate: f64,
    pub weekly_benefits_per_employee: Money,
    /// Employees the benefits amount is paid for.
    pub benefits_headcount: u32,
    /// Wages + benefits are taxed when true, wages only when false.
    #[serde(default)]
    pub tax_applies_to_benefits: bool,
}

impl Default for OverheadPolicy {
    fn default() -> Self {
        Self {
            mode: OverheadMode::AggregateLevel,
            payroll_tax_rate: 0.18,
            weekly_benefits_per_employee: 50.0,
            benefits_headcount: 3,
            tax_applies_to_benefits: false,
        }
    }
}

impl OverheadPolicy {
    pub fn validate(&self) -> EngineResult<()> {
        if !self.payroll_tax_rate.is_finite() || self.payroll_tax_rate < 0.0 {
            return Err(EngineError::config(format!(
                "payroll tax rate must be >= 0, got {}",
                self.payroll_tax_rate
            )));
        }
        if !self.weekly_benefits_per_employee.is_finite() || self.weekly_benefits_per_employee < 0.0 {
            return Err(EngineError::config(format!(
                "benefits per employee must be >= 0, got {}",
                self.weekly_benefits_per_employee
            )));
        }
        Ok(())
    }

    fn tax_factor(&self) -> f64 {
        1.0 + self.payroll_tax_rate
    }

    fn weekly_benefits(&self) -> Money {
        let benefits = self.weekly_benefits_per_employee * f64::from(self.benefits_headcount);
        if self.tax_applies_to_benefits {
            benefits * self.tax_factor()
        } else {
            benefits
        }
    }
}

pub struct LaborCostCalculator<'a> {
    hierarchy: &'a RoleHierarchy,
    overhead: &'a OverheadPolicy,
    weeks_per_month: f64,
}

impl<'a> LaborCostCalculator<'a> {
    pub fn new(hierarchy: &'a RoleHierarchy, overhead: &'a OverheadPolicy, weeks_per_month: f64) -> Self {
        Self { hierarchy, overhead, weeks_per_month }
    }

    /// Rate used to price one hour of `role`. Loaded by the payroll tax in
    /// `RateLevel` mode.
    pub fn effective_rate(&self, role: usize) -> Money {
        let base = self
            .hierarchy
            .roles()
            .get(role)
            .map(|r| r.hourly_rate)
            .unwrap_or(0.0);
        match self.overhead.mode {
            OverheadMode::RateLevel => base * self.overhead.tax_factor(),
            OverheadMode::None | OverheadMode::AggregateLevel => base,
        }
    }

    /// Σ hours × rate over the roles of one block.
    pub fn block_cost(&self, allocation: &BlockAllocation) -> Money {
        allocation
            .roles
            .iter()
            .enumerate()
            .map(|(i, r)| r.hours * self.effective_rate(i))
            .sum()
    }

    /// Bare wages for one block, whatever the overhead mode.
    pub fn block_wages(&self, allocation: &BlockAllocation) -> Money {
        allocation
            .roles
            .iter()
            .zip(self.hierarchy.roles())
            .map(|(r, spec)| r.hours * spec.hourly_rate)
            .sum()
    }

    pub fn weekly_cost(&self, block_costs: impl IntoIterator<Item = Money>) -> Money {
        block_costs.into_iter().sum()
    }

    /// Weekly cost after overhead. `priced_week` is the sum of
    /// `block_cost` over the week.
    pub fn effective_cost(&self, priced_week: Money) -> Money {
        match self.overhead.mode {
            OverheadMode::None => priced_week,
            OverheadMode::RateLevel => priced_week + self.overhead.weekly_benefits(),
            OverheadMode::AggregateLevel => {
                priced_week * self.overhead.tax_factor() + self.overhead.weekly_benefits()
            }
        }
    }

    pub fn monthly_cost(&self, weekly_cost: Money) -> Money {
        weekly_cost * self.weeks_per_month
    }
}

/// Labor cost as a percentage of sales. Zero sales give 0, not an error.
pub fn labor_cost_percentage(labor_cost: Money, sales: Money) -> f64 {
    if sales == 0.0 {
        return 0.0;
    }
    labor_cost / sales * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::role_allocator::{RoleAllocator, WeeklyHoursLedger};
    use std::collections::HashMap;

    fn priced_hierarchy() -> RoleHierarchy {
        let rates: HashMap<String, Money> = [
            ("Manager".to_string(), 25.0),
            ("Shift Supervisor".to_string(), 18.0),
            ("Barista".to_string(), 14.0),
        ]
        .into();
        RoleHierarchy::default().with_rates(&rates).unwrap()
    }

    #[test]
    fn block_cost_sums_hours_times_rate() {
        let h = priced_hierarchy();
        let overhead = OverheadPolicy { mode: OverheadMode::None, ..OverheadPolicy::default() };
        let calc = LaborCostCalculator::new(&h, &overhead, 4.3);

        let mut ledger = WeeklyHoursLedger::new(&h);
        ledger.commit(0, 36 * 60);
        ledger.commit(1, 22 * 60);
        let block = RoleAllocator::new(&h).allocate(5, 180, &mut ledger);

        // 2h supervisor + 13h barista
        assert!((calc.block_cost(&block) - (2.0 * 18.0 + 13.0 * 14.0)).abs() < 1e-9);
    }

    #[test]
    fn modes_agree_on_weekly_total() {
        let h = priced_hierarchy();
        let rate = OverheadPolicy { mode: OverheadMode::RateLevel, ..OverheadPolicy::default() };
        let agg = OverheadPolicy::default();

        let mut ledger = WeeklyHoursLedger::new(&h);
        let block = RoleAllocator::new(&h).allocate(3, 600, &mut ledger);

        let by_rate = LaborCostCalculator::new(&h, &rate, 4.3);
        let by_agg = LaborCostCalculator::new(&h, &agg, 4.3);

        let w_rate = by_rate.effective_cost(by_rate.block_cost(&block));
        let w_agg = by_agg.effective_cost(by_agg.block_cost(&block));
        assert!((w_rate - w_agg).abs() < 1e-9);
        assert!(by_rate.block_cost(&block) > by_agg.block_cost(&block));
    }

    #[test]
    fn aggregate_overhead_formula() {
        let h = priced_hierarchy();
        let overhead = OverheadPolicy::default();
        let calc = LaborCostCalculator::new(&h, &overhead, 4.3);
        assert!((calc.effective_cost(1000.0) - (1180.0 + 150.0)).abs() < 1e-9);
        assert!((calc.monthly_cost(100.0) - 430.0).abs() < 1e-9);
    }

    #[test]
    fn taxed_benefits() {
        let h = priced_hierarchy();
        let overhead = OverheadPolicy { tax_applies_to_benefits: true, ..OverheadPolicy::default() };
        let calc = LaborCostCalculator::new(&h, &overhead, 4.3);
        assert!((calc.effective_cost(1000.0) - (1000.0 + 150.0) * 1.18).abs() < 1e-9);
    }

    #[test]
    fn percentage_of_zero_sales_is_zero() {
        assert_eq!(labor_cost_percentage(1234.0, 0.0), 0.0);
        assert!((labor_cost_percentage(25.0, 100.0) - 25.0).abs() < 1e-12);
    }
}
