//! Query planning
//!
//! Turns the configured lists into an ordered sequence of concrete queries.
//! For `n` = the longest list length, `n - 1` queries are produced. The site
//! and search term always come from the head of their lists; the remaining
//! three dimensions are taken positionally and are `None` past the end of a
//! shorter list.

use crate::config::Configuration;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// One concrete combination of search dimensions sent to a source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    pub site_name: String,
    pub search_term: String,
    pub google_search_term: Option<String>,
    pub location: Option<String>,
    pub country_indeed: Option<String>,
}

impl std::fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: '{}'", self.site_name, self.search_term)?;
        if let Some(location) = &self.location {
            write!(f, " in {location}")?;
        }
        if let Some(country) = &self.country_indeed {
            write!(f, " ({country})")?;
        }
        Ok(())
    }
}

/// Build the query sequence for a configuration.
pub fn plan(config: &Configuration) -> Result<Vec<SearchQuery>> {
    let param_size = config.max_len();
    if param_size == 0 {
        tracing::error!("No search parameters found in 'scraper_config'.");
        return Err(Error::InvalidConfig("No search parameters found".to_string()));
    }

    let (Some(site_name), Some(search_term)) =
        (config.site_names.first(), config.search_terms.first())
    else {
        tracing::error!("'site_names' and 'search_terms' need at least one entry.");
        return Err(Error::InvalidConfig(
            "site_names and search_terms must not be empty".to_string(),
        ));
    };

    let queries: Vec<SearchQuery> = (0..param_size - 1)
        .map(|i| SearchQuery {
            site_name: site_name.clone(),
            search_term: search_term.clone(),
            google_search_term: config.google_search_terms.get(i).cloned(),
            location: config.locations.get(i).cloned(),
            country_indeed: config.countries_indeed.get(i).cloned(),
        })
        .collect();

    tracing::info!("Search query sequence parsed successfully ({} queries).", queries.len());
    Ok(queries)
}
