//! Staffing threshold policy: hourly sales rate → minimum staff on duty.

use crate::{
    error::{EngineError, EngineResult},
    types::Money,
};
use serde::{Deserialize, Serialize};

/// Nobody works a block alone.
pub const MIN_ON_DUTY: u32 = 2;

/// Inclusive upper bound on hourly sales and the headcount it requires.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdTier {
    pub up_to: Money,
    pub headcount: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffingThresholdPolicy {
    /// Ascending by `up_to`.
    pub tiers: Vec<ThresholdTier>,
    /// Headcount once hourly sales exceed every finite bound.
    pub above_all: u32,
    pub minimum_headcount: u32,
}

impl Default for StaffingThresholdPolicy {
    fn default() -> Self {
        Self {
            tiers: vec![
                ThresholdTier { up_to: 200.0, headcount: 2 },
                ThresholdTier { up_to: 500.0, headcount: 3 },
                ThresholdTier { up_to: 700.0, headcount: 4 },
            ],
            above_all: 5,
            minimum_headcount: MIN_ON_DUTY,
        }
    }
}

impl StaffingThresholdPolicy {
    /// Bounds must be finite and strictly ascending, headcounts
    /// non-decreasing (including `above_all`), so the step function is
    /// monotone.
    pub fn validate(&self) -> EngineResult<()> {
        if self.minimum_headcount < MIN_ON_DUTY {
            return Err(EngineError::config(format!(
                "minimum headcount must be at least {MIN_ON_DUTY}, got {}",
                self.minimum_headcount
            )));
        }
        let mut prev: Option<&ThresholdTier> = None;
        for tier in &self.tiers {
            if !tier.up_to.is_finite() {
                return Err(EngineError::config(format!(
                    "threshold bound {} is not finite",
                    tier.up_to
                )));
            }
            if let Some(p) = prev {
                if tier.up_to <= p.up_to {
                    return Err(EngineError::config(format!(
                        "threshold bounds not ascending: {} after {}",
                        tier.up_to, p.up_to
                    )));
                }
                if tier.headcount < p.headcount {
                    return Err(EngineError::config(format!(
                        "headcount drops from {} to {} at bound {}",
                        p.headcount, tier.headcount, tier.up_to
                    )));
                }
            }
            prev = Some(tier);
        }
        if let Some(last) = prev {
            if self.above_all < last.headcount {
                return Err(EngineError::config(format!(
                    "top-tier headcount {} below last bounded tier {}",
                    self.above_all, last.headcount
                )));
            }
        }
        Ok(())
    }

    /// Headcount of the first bound the rate does not exceed, the top tier
    /// when it exceeds them all, never below the configured minimum.
    pub fn required_headcount(&self, hourly_sales: Money) -> u32 {
        let tier = self
            .tiers
            .iter()
            .find(|t| hourly_sales <= t.up_to)
            .map(|t| t.headcount)
            .unwrap_or(self.above_all);
        tier.max(self.minimum_headcount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_steps() {
        let p = StaffingThresholdPolicy::default();
        assert_eq!(p.required_headcount(0.0), 2);
        assert_eq!(p.required_headcount(200.0), 2);
        assert_eq!(p.required_headcount(200.01), 3);
        assert_eq!(p.required_headcount(500.0), 3);
        assert_eq!(p.required_headcount(700.0), 4);
        assert_eq!(p.required_headcount(700.5), 5);
        assert_eq!(p.required_headcount(1e9), 5);
    }

    #[test]
    fn minimum_applies_to_negative_sales() {
        let p = StaffingThresholdPolicy {
            tiers: vec![ThresholdTier { up_to: 100.0, headcount: 1 }],
            above_all: 3,
            minimum_headcount: 2,
        };
        assert_eq!(p.required_headcount(-50.0), 2);
    }

    #[test]
    fn descending_bounds_rejected() {
        let p = StaffingThresholdPolicy {
            tiers: vec![
                ThresholdTier { up_to: 500.0, headcount: 3 },
                ThresholdTier { up_to: 200.0, headcount: 4 },
            ],
            above_all: 5,
            minimum_headcount: 2,
        };
        assert!(matches!(p.validate(), Err(EngineError::Configuration(_))));
    }

    #[test]
    fn shrinking_headcount_rejected() {
        let p = StaffingThresholdPolicy {
            tiers: vec![ThresholdTier { up_to: 500.0, headcount: 4 }],
            above_all: 3,
            minimum_headcount: 2,
        };
        assert!(p.validate().is_err());
    }

    #[test]
    fn lone_minimum_rejected() {
        let p = StaffingThresholdPolicy { minimum_headcount: 1, ..StaffingThresholdPolicy::default() };
        assert!(matches!(p.validate(), Err(EngineError::Configuration(_))));
        assert!(StaffingThresholdPolicy::default().validate().is_ok());
    }
}
