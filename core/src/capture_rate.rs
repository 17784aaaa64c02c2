//! Capture-rate reference table.
//!
//! Monthly capture rate per unit of daily foot traffic, indexed by
//! operating year (1..N) and calendar month (1..12). Loaded once,
//! validated, then only read.

use crate::{
    error::{EngineError, EngineResult},
    types::{Month, Year, MONTHS_PER_YEAR},
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One operating year's worth of rates, as stored in `capture_rates.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureRateYear {
    pub year: Year,
    pub monthly_rates: Vec<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct CaptureRateFile {
    pub(crate) years: Vec<CaptureRateYear>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CaptureRateTable {
    rates: BTreeMap<Year, [f64; 12]>,
}

impl CaptureRateTable {
    /// Build and validate a table. Every year must carry exactly 12
    /// finite, non-negative rates and appear once.
    pub fn new(years: Vec<CaptureRateYear>) -> EngineResult<Self> {
        if years.is_empty() {
            return Err(EngineError::config("capture-rate table has no years"));
        }

        let mut rates = BTreeMap::new();
        for entry in years {
            if entry.year == 0 {
                return Err(EngineError::config("capture-rate years start at 1"));
            }
            let months: [f64; 12] = entry.monthly_rates.as_slice().try_into().map_err(|_| {
                EngineError::config(format!(
                    "capture-rate year {} has {} months, expected {MONTHS_PER_YEAR}",
                    entry.year,
                    entry.monthly_rates.len()
                ))
            })?;
            if let Some(bad) = months.iter().find(|r| !r.is_finite() || **r < 0.0) {
                return Err(EngineError::config(format!(
                    "capture-rate year {} has invalid rate {bad}",
                    entry.year
                )));
            }
            if rates.insert(entry.year, months).is_some() {
                return Err(EngineError::config(format!(
                    "capture-rate year {} defined twice",
                    entry.year
                )));
            }
        }

        Ok(Self { rates })
    }

    /// Rate for (year, month). Undefined points are a `Lookup` error,
    /// never a silent zero.
    pub fn rate(&self, year: Year, month: Month) -> EngineResult<f64> {
        if !(1..=MONTHS_PER_YEAR).contains(&month) {
            return Err(EngineError::Lookup { year, month });
        }
        self.rates
            .get(&year)
            .map(|months| months[(month - 1) as usize])
            .ok_or(EngineError::Lookup { year, month })
    }

    pub fn contains_year(&self, year: Year) -> bool {
        self.rates.contains_key(&year)
    }

    pub fn years(&self) -> impl Iterator<Item = Year> + '_ {
        self.rates.keys().copied()
    }
}

impl Default for CaptureRateTable {
    fn default() -> Self {
        let rows: [(Year, [f64; 12]); 3] = [
            (1, [0.0062, 0.0057, 0.0070, 0.0068, 0.0071, 0.0074, 0.0075, 0.0084, 0.0080, 0.0084, 0.0080, 0.0077]),
            (2, [0.0130, 0.0119, 0.0147, 0.0143, 0.0148, 0.0155, 0.0158, 0.0176, 0.0167, 0.0177, 0.0168, 0.0163]),
            (3, [0.0167, 0.0152, 0.0188, 0.0183, 0.0190, 0.0199, 0.0202, 0.0225, 0.0214, 0.0227, 0.0215, 0.0208]),
        ];
        Self { rates: rows.into_iter().collect() }
    }
}
