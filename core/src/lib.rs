//! Storefront sales-to-staffing engine.
//!
//! Forecasts monthly sales from traffic and capture-rate curves, spreads
//! them over the week and the trading day, derives staff on duty per time
//! block, allocates those hours across the role hierarchy and prices them.
//! Pure computation over caller inputs and injected reference config.

pub mod capture_rate;
pub mod competition;
pub mod config;
pub mod distribution;
pub mod engine;
pub mod error;
pub mod inputs;
pub mod labor_cost;
pub mod report;
pub mod role_allocator;
pub mod sales_forecaster;
pub mod staffing_policy;
pub mod types;

pub use config::EngineConfig;
pub use engine::ForecastEngine;
pub use error::{EngineError, EngineResult};
pub use inputs::{ForecastInputs, OperatingProfile};
pub use report::ForecastReport;
