//! Job row types
//!
//! - `RawJob`: a row as a source returned it, any field may be missing
//! - `JobRecord`: a validated, sanitized row ready for storage

use serde::{Deserialize, Serialize};

/// A job row as returned by a source.
///
/// Sources may emit extra columns; only the four stored fields are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct RawJob {
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
}

impl RawJob {
    /// Create a fully populated row
    pub fn new(
        title: impl Into<String>,
        company: impl Into<String>,
        location: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            title: Some(title.into()),
            company: Some(company.into()),
            location: Some(location.into()),
            description: Some(description.into()),
        }
    }

    /// Whether every field of the uniqueness key is present
    pub fn has_key(&self) -> bool {
        self.title.is_some() && self.company.is_some() && self.location.is_some()
    }
}

/// A job row that passed validation.
///
/// Uniqueness in the store is keyed on `(title, company, location)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobRecord {
    pub title: String,
    pub company: String,
    pub location: String,
    pub description: Option<String>,
}

impl JobRecord {
    pub fn new(
        title: impl Into<String>,
        company: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            company: company.into(),
            location: location.into(),
            description: None,
        }
    }

    /// Builder: attach a description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// The uniqueness key
    pub fn key(&self) -> (&str, &str, &str) {
        (&self.title, &self.company, &self.location)
    }
}

impl TryFrom<RawJob> for JobRecord {
    type Error = RawJob;

    /// Fails with the original row when any key field is missing.
    fn try_from(raw: RawJob) -> std::result::Result<Self, Self::Error> {
        match raw {
            RawJob {
                title: Some(title),
                company: Some(company),
                location: Some(location),
                description,
            } => Ok(JobRecord {
                title,
                company,
                location,
                description,
            }),
            other => Err(other),
        }
    }
}
