//! Scraper configuration
//!
//! The config file is a JSON document with a `scraper_config` object holding
//! five parallel string lists. All five are required and must be non-empty.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

/// Keys that must be present under `scraper_config`, in positional order.
pub const REQUIRED_KEYS: [&str; 5] = [
    "site_names",
    "search_terms",
    "google_search_terms",
    "locations",
    "countries_indeed",
];

/// Search dimensions for one scraper run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    pub site_names: Vec<String>,
    pub search_terms: Vec<String>,
    pub google_search_terms: Vec<String>,
    pub locations: Vec<String>,
    pub countries_indeed: Vec<String>,
}

#[derive(Deserialize)]
struct ConfigDocument {
    scraper_config: Configuration,
}

impl Configuration {
    /// Build a configuration in code, applying the same checks as [`validate`].
    pub fn new(
        site_names: Vec<String>,
        search_terms: Vec<String>,
        google_search_terms: Vec<String>,
        locations: Vec<String>,
        countries_indeed: Vec<String>,
    ) -> Result<Self> {
        let config = Self {
            site_names,
            search_terms,
            google_search_terms,
            locations,
            countries_indeed,
        };
        config.check_non_empty()?;
        Ok(config)
    }

    /// Read, parse, and validate a config file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::error!("The file {} was not found.", path.display());
            return Err(Error::NotFound(path.to_path_buf()));
        }

        let contents = std::fs::read_to_string(path)?;
        let document: Value = serde_json::from_str(&contents).map_err(|source| {
            tracing::error!("Failed to decode JSON from the file {}.", path.display());
            Error::Parse {
                path: path.to_path_buf(),
                source,
            }
        })?;
        tracing::info!("Config parsed successfully.");

        validate(&document)?;

        let parsed: ConfigDocument = serde_json::from_value(document).map_err(|e| {
            tracing::error!("Config shape rejected: {}", e);
            Error::InvalidConfig(e.to_string())
        })?;
        Ok(parsed.scraper_config)
    }

    /// The five lists in positional order.
    pub fn lists(&self) -> [&[String]; 5] {
        [
            &self.site_names,
            &self.search_terms,
            &self.google_search_terms,
            &self.locations,
            &self.countries_indeed,
        ]
    }

    /// Length of the longest list.
    pub fn max_len(&self) -> usize {
        self.lists().iter().map(|l| l.len()).max().unwrap_or(0)
    }

    fn check_non_empty(&self) -> Result<()> {
        for (key, list) in REQUIRED_KEYS.iter().zip(self.lists()) {
            if list.is_empty() {
                tracing::error!("'{}' in 'scraper_config' is empty.", key);
                return Err(Error::InvalidConfig(format!("{key} must not be empty")));
            }
        }
        Ok(())
    }
}

/// Validate a raw config document.
///
/// Fails with [`Error::InvalidConfig`] if `scraper_config` is missing, or if
/// any required key is absent, not an array of strings, or empty.
pub fn validate(document: &Value) -> Result<()> {
    let Some(scraper_config) = document.get("scraper_config").and_then(Value::as_object) else {
        tracing::error!("Missing 'scraper_config' in configuration file.");
        return Err(Error::InvalidConfig("'scraper_config' is missing".to_string()));
    };

    for key in REQUIRED_KEYS {
        let Some(value) = scraper_config.get(key) else {
            tracing::error!("Missing key '{}' in 'scraper_config'.", key);
            return Err(Error::InvalidConfig(format!(
                "'{key}' is missing in 'scraper_config'"
            )));
        };

        let Some(items) = value.as_array() else {
            tracing::error!("Key '{}' in 'scraper_config' is not a list.", key);
            return Err(Error::InvalidConfig(format!("{key} must be a list")));
        };

        if items.is_empty() {
            tracing::error!("'{}' in 'scraper_config' is empty.", key);
            return Err(Error::InvalidConfig(format!("{key} must not be empty")));
        }

        if !items.iter().all(Value::is_string) {
            tracing::error!("Key '{}' in 'scraper_config' holds non-string values.", key);
            return Err(Error::InvalidConfig(format!("{key} must be a list of strings")));
        }
    }

    Ok(())
}

/// Create the parent directory of a file path if it is missing.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
