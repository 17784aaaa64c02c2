//! Reference configuration: capture rates, distribution curves,
//! staffing thresholds, role hierarchy and overhead policy.
//!
//! Loaded once from the data/ directory (or built from the canonical
//! defaults), validated, and then only read. An `EngineConfig` is an
//! ordinary value: two engines may run side by side on different
//! configs.

use crate::{
    capture_rate::{CaptureRateFile, CaptureRateTable},
    competition::CompetitionAdjuster,
    distribution::{DistributionFile, SalesDistributionProfile},
    error::{EngineError, EngineResult},
    labor_cost::OverheadPolicy,
    role_allocator::{RoleHierarchy, RoleSpec},
    staffing_policy::StaffingThresholdPolicy,
    types::{hours_to_minutes, Minutes, DEFAULT_WEEKS_PER_MONTH},
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::path::Path;

/// Non-selling preparation time staffed on every open day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenCloseCoverage {
    pub hours_per_day: f64,
    pub headcount: u32,
}

impl OpenCloseCoverage {
    pub fn duration_minutes(&self) -> Minutes {
        hours_to_minutes(self.hours_per_day).unwrap_or(0)
    }
}

#[derive(Debug, Clone, Deserialize)]
struct ForecastPolicyFile {
    #[serde(default = "default_weeks_per_month")]
    weeks_per_month: f64,
    competition: CompetitionAdjuster,
}

#[derive(Debug, Clone, Deserialize)]
struct LaborPolicyFile {
    roles: Vec<RoleSpec>,
    overhead: OverheadPolicy,
    #[serde(default)]
    open_close: Option<OpenCloseCoverage>,
}

fn default_weeks_per_month() -> f64 {
    DEFAULT_WEEKS_PER_MONTH
}

#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub capture_rates: CaptureRateTable,
    pub competition: CompetitionAdjuster,
    pub weeks_per_month: f64,
    pub distribution: SalesDistributionProfile,
    pub thresholds: StaffingThresholdPolicy,
    pub roles: RoleHierarchy,
    pub overhead: OverheadPolicy,
    pub open_close: Option<OpenCloseCoverage>,
}

impl EngineConfig {
    /// Load from the data/ directory.
    /// In tests, use EngineConfig::default_test().
    pub fn load(data_dir: impl AsRef<Path>) -> EngineResult<Self> {
        let data_dir = data_dir.as_ref();

        let rates_file: CaptureRateFile = read_json(data_dir, "capture_rates.json")?;
        let capture_rates = CaptureRateTable::new(rates_file.years)?;

        let forecast_file: ForecastPolicyFile = read_json(data_dir, "forecast_policy.json")?;

        let dist_file: DistributionFile = read_json(data_dir, "distribution.json")?;
        let distribution = SalesDistributionProfile::new(dist_file.day_types, dist_file.time_blocks)?;

        let thresholds: StaffingThresholdPolicy = read_json(data_dir, "staffing_thresholds.json")?;

        let labor_file: LaborPolicyFile = read_json(data_dir, "labor_policy.json")?;
        let roles = RoleHierarchy::new(labor_file.roles)?;

        let config = Self {
            capture_rates,
            competition: forecast_file.competition,
            weeks_per_month: forecast_file.weeks_per_month,
            distribution,
            thresholds,
            roles,
            overhead: labor_file.overhead,
            open_close: labor_file.open_close,
        };
        config.validate()?;

        log::info!(
            "Loaded reference config from {}: {} capture-rate years, {} day types, {} time blocks, {} roles",
            data_dir.display(),
            config.capture_rates.years().count(),
            config.distribution.day_types().len(),
            config.distribution.time_blocks().len(),
            config.roles.len()
        );
        Ok(config)
    }

    /// Checks that span several tables. The tables themselves validate on
    /// construction.
    pub fn validate(&self) -> EngineResult<()> {
        if !self.weeks_per_month.is_finite() || self.weeks_per_month <= 0.0 {
            return Err(EngineError::config(format!(
                "weeks_per_month must be > 0, got {}",
                self.weeks_per_month
            )));
        }
        self.competition.validate()?;
        self.thresholds.validate()?;
        self.overhead.validate()?;

        if let Some(cover) = &self.open_close {
            match hours_to_minutes(cover.hours_per_day) {
                Some(m) if m > 0 => {}
                _ => {
                    return Err(EngineError::config(format!(
                        "open/close coverage {}h must be a positive whole number of minutes",
                        cover.hours_per_day
                    )))
                }
            }
            if cover.headcount < self.thresholds.minimum_headcount {
                return Err(EngineError::config(format!(
                    "open/close headcount {} below staffing minimum {}",
                    cover.headcount, self.thresholds.minimum_headcount
                )));
            }
        }
        Ok(())
    }

    /// Config with the canonical reference values, for unit tests and for
    /// runs without a data directory.
    pub fn default_test() -> Self {
        Self {
            capture_rates: CaptureRateTable::default(),
            competition: CompetitionAdjuster::default(),
            weeks_per_month: DEFAULT_WEEKS_PER_MONTH,
            distribution: SalesDistributionProfile::default(),
            thresholds: StaffingThresholdPolicy::default(),
            roles: RoleHierarchy::default(),
            overhead: OverheadPolicy::default(),
            open_close: None,
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::default_test()
    }
}

fn read_json<T: DeserializeOwned>(data_dir: &Path, file: &str) -> EngineResult<T> {
    let path = data_dir.join(file);
    let content = std::fs::read_to_string(&path)
        .map_err(|e| anyhow::anyhow!("Cannot read {}: {e}", path.display()))?;
    serde_json::from_str(&content).map_err(|e| EngineError::config(format!("{}: {e}", path.display())))
}
