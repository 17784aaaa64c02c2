//! Nearby-competitor adjustment applied to capture rates.

use crate::error::{EngineError, EngineResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetitionAdjuster {
    /// Fraction of the base rate lost per competitor.
    pub penalty_per_competitor: f64,
    /// The adjusted rate never drops below this fraction of the base rate.
    pub floor_fraction: f64,
}

impl Default for CompetitionAdjuster {
    fn default() -> Self {
        Self {
            penalty_per_competitor: 0.05,
            floor_fraction: 0.50,
        }
    }
}

impl CompetitionAdjuster {
    pub fn validate(&self) -> EngineResult<()> {
        if !self.penalty_per_competitor.is_finite() || self.penalty_per_competitor < 0.0 {
            return Err(EngineError::config(format!(
                "competition penalty must be >= 0, got {}",
                self.penalty_per_competitor
            )));
        }
        if !(0.0..=1.0).contains(&self.floor_fraction) {
            return Err(EngineError::config(format!(
                "competition floor must be within [0, 1], got {}",
                self.floor_fraction
            )));
        }
        Ok(())
    }

    /// Multiplier applied to the base rate for `competitors` nearby stores.
    /// Linear decrease, clamped at the floor. Non-increasing in `competitors`.
    pub fn multiplier(&self, competitors: u32) -> f64 {
        let linear = 1.0 - self.penalty_per_competitor * f64::from(competitors);
        linear.max(self.floor_fraction)
    }

    pub fn adjust(&self, rate: f64, competitors: u32) -> f64 {
        rate * self.multiplier(competitors)
    }

    /// True when the floor, not the linear penalty, decides the multiplier.
    pub fn is_floored(&self, competitors: u32) -> bool {
        1.0 - self.penalty_per_competitor * f64::from(competitors) < self.floor_fraction
    }
}
