//! Fetch orchestration
//!
//! Runs every planned query against a source, strictly in order. A failing
//! query is logged and contributes an empty batch; it never aborts the run.

use std::time::Duration;

use crate::job::RawJob;
use crate::planner::SearchQuery;
use crate::source::framework::{DEFAULT_HOURS_OLD, DEFAULT_RESULTS_WANTED};
use crate::source::{FetchRequest, JobSource};
use crate::ui::QueryProgress;

/// Pause after each source call
pub const DEFAULT_PAUSE: Duration = Duration::from_secs(1);

/// Result of one query, for reporting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutcome {
    pub query: SearchQuery,
    pub rows: usize,
    pub succeeded: bool,
}

/// Sequential executor over a job source
pub struct FetchExecutor<S> {
    source: S,
    pause: Duration,
    hours_old: u32,
    results_wanted: u32,
    show_progress: bool,
}

impl<S: JobSource> FetchExecutor<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            pause: DEFAULT_PAUSE,
            hours_old: DEFAULT_HOURS_OLD,
            results_wanted: DEFAULT_RESULTS_WANTED,
            show_progress: true,
        }
    }

    /// Builder: override the pause after each fetch
    pub fn with_pause(mut self, pause: Duration) -> Self {
        self.pause = pause;
        self
    }

    /// Builder: override the fetch limits used by [`fetch_all`](Self::fetch_all)
    pub fn with_limits(mut self, hours_old: u32, results_wanted: u32) -> Self {
        self.hours_old = hours_old;
        self.results_wanted = results_wanted;
        self
    }

    /// Builder: toggle the terminal progress bar
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Fetch every query, one batch per query in input order.
    pub fn fetch_all(&self, queries: &[SearchQuery]) -> Vec<Vec<RawJob>> {
        self.fetch_all_with_outcomes(queries).0
    }

    /// Like [`fetch_all`](Self::fetch_all), also reporting per-query outcomes.
    pub fn fetch_all_with_outcomes(
        &self,
        queries: &[SearchQuery],
    ) -> (Vec<Vec<RawJob>>, Vec<FetchOutcome>) {
        let progress = if self.show_progress {
            QueryProgress::new(queries.len())
        } else {
            QueryProgress::hidden()
        };

        let mut batches = Vec::with_capacity(queries.len());
        let mut outcomes = Vec::with_capacity(queries.len());

        for query in queries {
            let label = query.to_string();
            progress.start_query(&label);

            let (batch, succeeded) = self.try_fetch(query, self.hours_old, self.results_wanted);
            if !succeeded {
                progress.note_failure(&label);
            }
            outcomes.push(FetchOutcome {
                query: query.clone(),
                rows: batch.len(),
                succeeded,
            });
            batches.push(batch);
            progress.finish_query();
        }

        progress.finish();
        (batches, outcomes)
    }

    /// Fetch a single query. Source failures are logged and yield an empty batch.
    pub fn fetch_one(&self, query: &SearchQuery, hours_old: u32, results_wanted: u32) -> Vec<RawJob> {
        self.try_fetch(query, hours_old, results_wanted).0
    }

    fn try_fetch(&self, query: &SearchQuery, hours_old: u32, results_wanted: u32) -> (Vec<RawJob>, bool) {
        let request = FetchRequest::from_query(query, hours_old, results_wanted);
        let result = self.source.fetch(&request);

        if !self.pause.is_zero() {
            std::thread::sleep(self.pause);
        }

        match result {
            Ok(rows) => {
                tracing::debug!("Fetched {} rows for {}", rows.len(), query);
                (rows, true)
            }
            Err(e) => {
                tracing::error!("Failed to scrape jobs for {}: {}", query, e);
                (Vec::new(), false)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Error, Result};
    use std::cell::RefCell;
    use std::time::Instant;

    /// Records each request; fails for locations listed in `failing`.
    struct ScriptedSource {
        failing: Vec<&'static str>,
        seen: RefCell<Vec<FetchRequest>>,
    }

    impl ScriptedSource {
        fn new(failing: Vec<&'static str>) -> Self {
            Self { failing, seen: RefCell::new(Vec::new()) }
        }
    }

    impl JobSource for ScriptedSource {
        fn name(&self) -> &str { "scripted" }

        fn fetch(&self, request: &FetchRequest) -> Result<Vec<RawJob>> {
            self.seen.borrow_mut().push(request.clone());
            let location = request.location.clone().unwrap_or_default();
            if self.failing.iter().any(|f| *f == location) {
                return Err(Error::Source(format!("blocked in {location}")));
            }
            Ok(vec![RawJob::new("Dev", "Acme", location, "x")])
        }
    }

    fn query(location: &str) -> SearchQuery {
        SearchQuery {
            site_name: "indeed".into(),
            search_term: "rust".into(),
            google_search_term: None,
            location: Some(location.into()),
            country_indeed: None,
        }
    }

    fn executor(source: ScriptedSource) -> FetchExecutor<ScriptedSource> {
        FetchExecutor::new(source)
            .with_pause(Duration::ZERO)
            .with_progress(false)
    }

    #[test]
    fn test_fetch_all_preserves_order() {
        let exec = executor(ScriptedSource::new(vec![]));
        let batches = exec.fetch_all(&[query("London"), query("Paris"), query("Berlin")]);

        let locations: Vec<_> = batches
            .iter()
            .map(|b| b[0].location.clone().unwrap())
            .collect();
        assert_eq!(locations, vec!["London", "Paris", "Berlin"]);
    }

    #[test]
    fn test_failure_is_absorbed() {
        let exec = executor(ScriptedSource::new(vec!["Paris"]));
        let (batches, outcomes) =
            exec.fetch_all_with_outcomes(&[query("London"), query("Paris"), query("Berlin")]);

        assert_eq!(batches.len(), 3);
        assert!(batches[1].is_empty());
        assert_eq!(batches[2].len(), 1);
        assert!(!outcomes[1].succeeded);
        assert!(outcomes[2].succeeded);
        assert_eq!(exec.source().seen.borrow().len(), 3);
    }

    #[test]
    fn test_fetch_one_passes_limits() {
        let exec = executor(ScriptedSource::new(vec![]));
        exec.fetch_one(&query("London"), 48, 5);

        let seen = exec.source().seen.borrow();
        assert_eq!(seen[0].hours_old, 48);
        assert_eq!(seen[0].results_wanted, 5);
    }

    #[test]
    fn test_fetch_all_uses_default_limits() {
        let exec = executor(ScriptedSource::new(vec![]));
        exec.fetch_all(&[query("London")]);

        let seen = exec.source().seen.borrow();
        assert_eq!(seen[0].hours_old, 24);
        assert_eq!(seen[0].results_wanted, 20);
    }

    #[test]
    fn test_pause_follows_each_fetch() {
        let exec = FetchExecutor::new(ScriptedSource::new(vec!["Paris"]))
            .with_pause(Duration::from_millis(20))
            .with_progress(false);

        let started = Instant::now();
        exec.fetch_all(&[query("London"), query("Paris")]);
        assert!(started.elapsed() >= Duration::from_millis(40));
    }

    #[test]
    fn test_empty_queries() {
        let exec = executor(ScriptedSource::new(vec![]));
        assert!(exec.fetch_all(&[]).is_empty());
    }
}
