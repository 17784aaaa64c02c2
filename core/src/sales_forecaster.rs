//! Sales forecaster — traffic × capture rate × average sale, expanded
//! from a daily figure to weekly and monthly.
//!
//! Every conversion here is the exact algebraic inverse of its
//! counterpart, so monthly → weekly → daily and back reproduces the
//! original figure up to floating-point rounding.

use crate::{
    capture_rate::CaptureRateTable,
    competition::CompetitionAdjuster,
    error::{EngineError, EngineResult},
    types::{Money, Month, Year},
};

/// Scalar inputs for one monthly forecast point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SalesDrivers {
    pub traffic: f64,
    pub average_sale: Money,
    pub days_open_per_week: u8,
    pub competitor_count: u32,
}

pub struct SalesForecaster<'a> {
    capture_rates: &'a CaptureRateTable,
    competition: &'a CompetitionAdjuster,
    weeks_per_month: f64,
}

impl<'a> SalesForecaster<'a> {
    pub fn new(
        capture_rates: &'a CaptureRateTable,
        competition: &'a CompetitionAdjuster,
        weeks_per_month: f64,
    ) -> EngineResult<Self> {
        if !weeks_per_month.is_finite() || weeks_per_month <= 0.0 {
            return Err(EngineError::config(format!(
                "weeks_per_month must be > 0, got {weeks_per_month}"
            )));
        }
        Ok(Self {
            capture_rates,
            competition,
            weeks_per_month,
        })
    }

    pub fn weeks_per_month(&self) -> f64 {
        self.weeks_per_month
    }

    /// Capture rate for the point after the competition adjustment.
    pub fn adjusted_rate(&self, year: Year, month: Month, competitors: u32) -> EngineResult<f64> {
        let base = self.capture_rates.rate(year, month)?;
        Ok(self.competition.adjust(base, competitors))
    }

    /// `traffic × adjusted rate × average sale × days open × weeks per month`.
    pub fn forecast_monthly_sales(
        &self,
        drivers: &SalesDrivers,
        year: Year,
        month: Month,
    ) -> EngineResult<Money> {
        let rate = self.adjusted_rate(year, month, drivers.competitor_count)?;
        let daily = drivers.traffic * rate * drivers.average_sale;
        Ok(daily * f64::from(drivers.days_open_per_week) * self.weeks_per_month)
    }

    /// Average sales for one open day of the month.
    pub fn forecast_daily_sales(&self, monthly_sales: Money, days_open_per_week: u8) -> Money {
        monthly_sales / f64::from(days_open_per_week) / self.weeks_per_month
    }

    pub fn weekly_from_monthly(&self, monthly_sales: Money) -> Money {
        monthly_sales / self.weeks_per_month
    }

    pub fn monthly_from_weekly(&self, weekly_sales: Money) -> Money {
        weekly_sales * self.weeks_per_month
    }
}
