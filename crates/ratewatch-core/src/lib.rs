//! Shared domain types and configuration for ratewatch.
//!
//! Holds the per-hotel signal produced by the extraction engine, the
//! per-date record the orchestrator assembles from those signals, the
//! tunable extraction thresholds, and env/YAML configuration loading.

pub mod app_config;
pub mod compare;
pub mod config;
pub mod hotels;
pub mod records;
pub mod thresholds;

pub use app_config::{AppConfig, Environment};
pub use compare::{compare_rates, has_opportunity, RateComparison};
pub use config::{load_app_config, load_app_config_from_env};
pub use hotels::{load_hotels, parse_hotels, HotelConfig, HotelsFile, Relationship};
pub use records::{Availability, AvailabilityStatus, HotelRateRecord, HotelSignal, SignalOutput};
pub use thresholds::ExtractionThresholds;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read hotels file {path}: {source}")]
    HotelsFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse hotels file: {0}")]
    HotelsFileParse(#[from] serde_yaml::Error),

    #[error("hotels validation failed: {0}")]
    Validation(String),
}
