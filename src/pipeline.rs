//! Ingestion pipeline
//!
//! Wires planning, fetching, normalization, and storage together. The
//! configuration is passed in explicitly; nothing is read from the
//! environment here.

use crate::config::Configuration;
use crate::fetch::{FetchExecutor, FetchOutcome};
use crate::job::JobRecord;
use crate::normalize;
use crate::planner::{self, SearchQuery};
use crate::source::JobSource;
use crate::storage::{JobStore, SaveReport};
use crate::Result;

/// Output of one fetch-and-normalize pass
#[derive(Debug, Clone, Default)]
pub struct RunOutput {
    pub records: Vec<JobRecord>,
    pub outcomes: Vec<FetchOutcome>,
    /// Rows fetched before validation
    pub fetched: usize,
}

/// Totals for a complete run
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub queries: usize,
    pub failed_queries: usize,
    pub fetched: usize,
    pub valid: usize,
    pub saved: SaveReport,
    pub outcomes: Vec<FetchOutcome>,
}

pub struct JobAggregator<S> {
    config: Configuration,
    queries: Vec<SearchQuery>,
    store: JobStore,
    executor: FetchExecutor<S>,
}

impl<S: JobSource> JobAggregator<S> {
    /// Plan the query sequence and make sure the store schema exists.
    pub fn new(config: Configuration, store: JobStore, executor: FetchExecutor<S>) -> Result<Self> {
        let queries = planner::plan(&config)?;
        store.init_schema()?;
        Ok(Self {
            config,
            queries,
            store,
            executor,
        })
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    pub fn queries(&self) -> &[SearchQuery] {
        &self.queries
    }

    pub fn store(&self) -> &JobStore {
        &self.store
    }

    /// Back up the store before any writes.
    pub fn backup(&self) -> Result<std::path::PathBuf> {
        self.store.backup()
    }

    /// Fetch every planned query and return the validated rows.
    pub fn run(&self) -> Vec<JobRecord> {
        self.run_with_outcomes().records
    }

    pub fn run_with_outcomes(&self) -> RunOutput {
        let (batches, outcomes) = self.executor.fetch_all_with_outcomes(&self.queries);
        let combined = normalize::combine(batches);
        let fetched = combined.len();
        let records = normalize::validate(combined);
        RunOutput {
            records,
            outcomes,
            fetched,
        }
    }

    pub fn save(&self, records: &[JobRecord]) -> Result<SaveReport> {
        self.store.save(records)
    }

    /// Backup, fetch, normalize, and save, in that order.
    ///
    /// A backup failure aborts before any source is contacted.
    pub fn execute(&self) -> Result<RunSummary> {
        self.backup()?;

        let output = self.run_with_outcomes();
        let saved = self.save(&output.records)?;

        let summary = RunSummary {
            queries: self.queries.len(),
            failed_queries: output.outcomes.iter().filter(|o| !o.succeeded).count(),
            fetched: output.fetched,
            valid: output.records.len(),
            saved,
            outcomes: output.outcomes,
        };
        tracing::info!(
            "Run complete: {} queries ({} failed), {} fetched, {} valid, {} new",
            summary.queries,
            summary.failed_queries,
            summary.fetched,
            summary.valid,
            summary.saved.inserted
        );
        Ok(summary)
    }
}
