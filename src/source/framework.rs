//! Core source framework
//!
//! Defines the request shape and the trait every source implements.

use crate::Result;
use crate::job::RawJob;
use crate::planner::SearchQuery;
use serde::{Deserialize, Serialize};

/// Default look-back window for postings, in hours
pub const DEFAULT_HOURS_OLD: u32 = 24;

/// Default number of results requested per query
pub const DEFAULT_RESULTS_WANTED: u32 = 20;

/// Everything a source needs to run one search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchRequest {
    pub site_name: String,
    pub search_term: String,
    pub google_search_term: Option<String>,
    pub location: Option<String>,
    pub country_indeed: Option<String>,
    pub results_wanted: u32,
    pub hours_old: u32,
}

impl FetchRequest {
    /// Build a request from a planned query and fetch limits
    pub fn from_query(query: &SearchQuery, hours_old: u32, results_wanted: u32) -> Self {
        Self {
            site_name: query.site_name.clone(),
            search_term: query.search_term.clone(),
            google_search_term: query.google_search_term.clone(),
            location: query.location.clone(),
            country_indeed: query.country_indeed.clone(),
            results_wanted,
            hours_old,
        }
    }
}

/// Trait for job sources
///
/// Implementations may fail for any reason (network, parsing, rate limits);
/// callers decide whether a failure is fatal.
pub trait JobSource {
    /// Source name (for display)
    fn name(&self) -> &str;

    /// Run one search and return the rows found
    fn fetch(&self, request: &FetchRequest) -> Result<Vec<RawJob>>;
}

impl<S: JobSource + ?Sized> JobSource for &S {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn fetch(&self, request: &FetchRequest) -> Result<Vec<RawJob>> {
        (**self).fetch(request)
    }
}

impl<S: JobSource + ?Sized> JobSource for Box<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn fetch(&self, request: &FetchRequest) -> Result<Vec<RawJob>> {
        (**self).fetch(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestSource;

    impl JobSource for TestSource {
        fn name(&self) -> &str { "test" }
        fn fetch(&self, request: &FetchRequest) -> Result<Vec<RawJob>> {
            Ok(vec![RawJob::new("Dev", "Acme", request.location.clone().unwrap_or_default(), "x")])
        }
    }

    #[test]
    fn test_request_from_query() {
        let query = SearchQuery {
            site_name: "indeed".into(),
            search_term: "rust".into(),
            google_search_term: Some("rust jobs".into()),
            location: Some("London".into()),
            country_indeed: None,
        };
        let request = FetchRequest::from_query(&query, DEFAULT_HOURS_OLD, DEFAULT_RESULTS_WANTED);
        assert_eq!(request.site_name, "indeed");
        assert_eq!(request.hours_old, 24);
        assert_eq!(request.results_wanted, 20);
        assert_eq!(request.country_indeed, None);
    }

    #[test]
    fn test_boxed_source_delegates() {
        let source: Box<dyn JobSource> = Box::new(TestSource);
        let query = SearchQuery {
            site_name: "indeed".into(),
            search_term: "rust".into(),
            google_search_term: None,
            location: Some("Paris".into()),
            country_indeed: None,
        };
        let rows = source.fetch(&FetchRequest::from_query(&query, 1, 1)).unwrap();
        assert_eq!(source.name(), "test");
        assert_eq!(rows[0].location.as_deref(), Some("Paris"));
    }
}
