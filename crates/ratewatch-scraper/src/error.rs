use thiserror::Error;

/// Unexpected failures inside the extraction engine.
///
/// Finding no rate or no availability signal is never an error; those
/// outcomes are `None` and `Available` respectively.
#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("failed to build name pattern for \"{token}\": {source}")]
    Pattern {
        token: String,
        #[source]
        source: regex::Error,
    },

    #[error("invalid extraction thresholds: {field} is empty")]
    InvalidThresholds { field: &'static str },
}
