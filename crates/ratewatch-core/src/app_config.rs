use std::path::PathBuf;

use crate::thresholds::ExtractionThresholds;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub hotels_path: PathBuf,
    pub fetch_timeout_secs: u64,
    pub fetch_user_agent: String,
    /// Pause between consecutive hotel fetches within one date.
    pub hotel_delay_ms: u64,
    /// Pause between consecutive stay dates.
    pub date_delay_ms: u64,
    pub days_ahead: u32,
    /// Bodies shorter than this are treated as a failed fetch.
    pub min_content_chars: usize,
    pub opportunity_margin_usd: u32,
    pub thresholds: ExtractionThresholds,
}
