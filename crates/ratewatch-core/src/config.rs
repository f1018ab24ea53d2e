use std::str::FromStr;

use crate::app_config::{AppConfig, Environment};
use crate::compare::OPPORTUNITY_MARGIN_USD;
use crate::thresholds::{ExtractionThresholds, LOW_STOCK_BEDS_MAX, LOW_STOCK_ROOMS_MAX};
use crate::ConfigError;

const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a variable holds an invalid value.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a variable holds an invalid value.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let env = parse_environment(&or_default("RATEWATCH_ENV", "development"))?;
    let log_level = or_default("RATEWATCH_LOG_LEVEL", "info");
    let hotels_path = PathBuf::from(or_default(
        "RATEWATCH_HOTELS_PATH",
        "./config/hotels.yaml",
    ));
    let fetch_user_agent = or_default("RATEWATCH_USER_AGENT", DEFAULT_USER_AGENT);

    let fetch_timeout_secs: u64 = parse_or(&lookup, "RATEWATCH_FETCH_TIMEOUT_SECS", "30")?;
    let hotel_delay_ms: u64 = parse_or(&lookup, "RATEWATCH_HOTEL_DELAY_MS", "2000")?;
    let date_delay_ms: u64 = parse_or(&lookup, "RATEWATCH_DATE_DELAY_MS", "1000")?;
    let days_ahead: u32 = parse_or(&lookup, "RATEWATCH_DAYS_AHEAD", "3")?;
    let min_content_chars: usize = parse_or(&lookup, "RATEWATCH_MIN_CONTENT_CHARS", "100")?;

    let low_stock_rooms_max: u32 = parse_or(
        &lookup,
        "RATEWATCH_LOW_STOCK_ROOMS_MAX",
        &LOW_STOCK_ROOMS_MAX.to_string(),
    )?;
    let low_stock_beds_max: u32 = parse_or(
        &lookup,
        "RATEWATCH_LOW_STOCK_BEDS_MAX",
        &LOW_STOCK_BEDS_MAX.to_string(),
    )?;
    let opportunity_margin_usd: u32 = parse_or(
        &lookup,
        "RATEWATCH_OPPORTUNITY_MARGIN_USD",
        &OPPORTUNITY_MARGIN_USD.to_string(),
    )?;

    if days_ahead == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "RATEWATCH_DAYS_AHEAD".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }

    Ok(AppConfig {
        env,
        log_level,
        hotels_path,
        fetch_timeout_secs,
        fetch_user_agent,
        hotel_delay_ms,
        date_delay_ms,
        days_ahead,
        min_content_chars,
        opportunity_margin_usd,
        thresholds: ExtractionThresholds {
            low_stock_rooms_max,
            low_stock_beds_max,
            ..ExtractionThresholds::default()
        },
    })
}

/// Reads `var` through `lookup` (falling back to `default`) and parses it.
fn parse_or<T, F>(lookup: &F, var: &str, default: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let raw = lookup(var).unwrap_or_else(|_| default.to_string());
    raw.trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` for unrecognized values.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "production" => Ok(Environment::Production),
        "test" => Ok(Environment::Test),
        other => Err(ConfigError::InvalidEnvVar {
            var: "RATEWATCH_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
