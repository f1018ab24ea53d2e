use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Relationship {
    /// The hotel whose rates are being managed.
    Subject,
    Competitor,
}

impl std::fmt::Display for Relationship {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Relationship::Subject => write!(f, "subject"),
            Relationship::Competitor => write!(f, "competitor"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HotelConfig {
    /// Display name, also used as the name-proximity hint during extraction.
    pub name: String,
    /// Short column key, e.g. `"hampton"`.
    pub key: String,
    pub relationship: Relationship,
    /// Property page URL without stay-date parameters.
    pub base_url: String,
}

#[derive(Debug, Deserialize)]
pub struct HotelsFile {
    pub hotels: Vec<HotelConfig>,
}

impl HotelsFile {
    /// Returns the subject hotel. Validation guarantees exactly one exists.
    #[must_use]
    pub fn subject(&self) -> Option<&HotelConfig> {
        self.hotels
            .iter()
            .find(|h| h.relationship == Relationship::Subject)
    }

    /// Returns every competitor in roster order.
    pub fn competitors(&self) -> impl Iterator<Item = &HotelConfig> {
        self.hotels
            .iter()
            .filter(|h| h.relationship == Relationship::Competitor)
    }
}

/// Load and validate the hotel roster from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_hotels(path: &Path) -> Result<HotelsFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::HotelsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_hotels(&content)
}

/// Parse and validate a hotel roster from YAML text.
///
/// # Errors
///
/// Returns `ConfigError` if the YAML is malformed or fails validation.
pub fn parse_hotels(yaml: &str) -> Result<HotelsFile, ConfigError> {
    let hotels_file: HotelsFile = serde_yaml::from_str(yaml)?;
    validate_hotels(&hotels_file)?;
    Ok(hotels_file)
}

fn validate_hotels(hotels_file: &HotelsFile) -> Result<(), ConfigError> {
    let mut seen_keys = HashSet::new();
    let mut subjects = 0usize;

    for hotel in &hotels_file.hotels {
        if hotel.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "hotel name must be non-empty".to_string(),
            ));
        }

        let key = hotel.key.trim();
        if key.is_empty() || !key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(ConfigError::Validation(format!(
                "hotel '{}' has invalid key '{}'; use ASCII letters, digits, or '_'",
                hotel.name, hotel.key
            )));
        }

        if !seen_keys.insert(key.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate hotel key: '{}'",
                hotel.key
            )));
        }

        if !(hotel.base_url.starts_with("https://") || hotel.base_url.starts_with("http://")) {
            return Err(ConfigError::Validation(format!(
                "hotel '{}' base_url must start with http:// or https://",
                hotel.name
            )));
        }

        if hotel.relationship == Relationship::Subject {
            subjects += 1;
        }
    }

    if subjects != 1 {
        return Err(ConfigError::Validation(format!(
            "exactly one subject hotel is required, found {subjects}"
        )));
    }

    Ok(())
}

#[cfg(test)]
#[path = "hotels_test.rs"]
mod tests;
