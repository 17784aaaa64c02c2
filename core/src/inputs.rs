//! Caller-supplied scalar inputs for one forecast run.
//!
//! Everything is checked by `validate()` before the engine does any work;
//! a rejected input never yields a partial report.

use crate::{
    error::{EngineError, EngineResult},
    types::{Money, Year, MONTHS_PER_YEAR},
};
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, ops::RangeInclusive};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperatingProfile {
    pub days_open_per_week: u8,
    /// Hour of day, 0..=24.
    pub open_hour: u8,
    /// Hour of day, 0..=24. May be earlier than `open_hour` for overnight trading.
    pub close_hour: u8,
    pub competitor_count: u32,
}

impl OperatingProfile {
    /// Open duration in hours after normalising overnight wraparound.
    /// 0 when open and close coincide.
    pub fn span_hours(&self) -> u8 {
        let (open, close) = (i32::from(self.open_hour), i32::from(self.close_hour));
        let span = if close > open { close - open } else { (close + 24 - open).rem_euclid(24) };
        span.min(24) as u8
    }

    pub fn validate(&self) -> EngineResult<()> {
        if !(1..=7).contains(&self.days_open_per_week) {
            return Err(EngineError::input(format!(
                "days open per week must be within 1..=7, got {}",
                self.days_open_per_week
            )));
        }
        if self.open_hour > 24 || self.close_hour > 24 {
            return Err(EngineError::input(format!(
                "operating hours {}..{} outside 0..=24",
                self.open_hour, self.close_hour
            )));
        }
        if self.span_hours() == 0 {
            return Err(EngineError::input(format!(
                "operating hours {}..{} span zero hours",
                self.open_hour, self.close_hour
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastInputs {
    pub traffic_count: i64,
    pub average_sale: Money,
    pub operating: OperatingProfile,
    pub first_year: Year,
    pub horizon_years: u32,
    /// Overrides for the configured role rates, keyed by role name.
    #[serde(default)]
    pub hourly_rates: HashMap<String, Money>,
}

impl ForecastInputs {
    pub fn validate(&self) -> EngineResult<()> {
        if self.traffic_count < 0 {
            return Err(EngineError::input(format!(
                "traffic count must be >= 0, got {}",
                self.traffic_count
            )));
        }
        if !self.average_sale.is_finite() || self.average_sale < 0.0 {
            return Err(EngineError::input(format!(
                "average sale must be >= 0, got {}",
                self.average_sale
            )));
        }
        if self.first_year == 0 {
            return Err(EngineError::input("operating years start at 1"));
        }
        if self.horizon_years == 0 {
            return Err(EngineError::input("forecast horizon must cover at least one year"));
        }
        if self.last_year().is_none() || self.horizon_months().is_none() {
            return Err(EngineError::input(format!(
                "forecast horizon of {} years from year {} is out of range",
                self.horizon_years, self.first_year
            )));
        }
        self.operating.validate()
    }

    /// Final forecast year, `None` when the horizon is empty or overflows.
    pub fn last_year(&self) -> Option<Year> {
        self.first_year.checked_add(self.horizon_years.checked_sub(1)?)
    }

    pub fn horizon_months(&self) -> Option<u32> {
        self.horizon_years.checked_mul(MONTHS_PER_YEAR)
    }

    /// Forecast years in order. Empty for inputs that fail `validate()`.
    pub fn years(&self) -> RangeInclusive<Year> {
        match self.last_year() {
            Some(last) => self.first_year..=last,
            None => RangeInclusive::new(1, 0),
        }
    }
}
