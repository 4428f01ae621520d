//! # Jobscrape - Job Posting Aggregator
//!
//! Linear batch pipeline that collects job postings from external listing
//! sources and persists them into a local SQLite store.
//!
//! Jobscrape provides:
//! - Validated JSON configuration of search dimensions
//! - Query planning over the configured sources, terms, and locations
//! - Failure-tolerant fetching through a pluggable source capability
//! - Row validation, deduplication, and sanitization
//! - Idempotent, batched SQLite persistence with pre-run backups

pub mod config;
pub mod job;
pub mod planner;
pub mod source;
pub mod fetch;
pub mod normalize;
pub mod storage;
pub mod pipeline;
pub mod logging;
pub mod ui;

// Re-exports for convenient access
pub use config::Configuration;
pub use job::{JobRecord, RawJob};
pub use planner::SearchQuery;
pub use source::{JobSource, FetchRequest, CommandSource};
pub use fetch::FetchExecutor;
pub use storage::{JobStore, SaveReport};
pub use pipeline::JobAggregator;

use std::path::PathBuf;

/// Result type alias for Jobscrape operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Jobscrape operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to parse config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("Source error: {0}")]
    Source(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Logging error: {0}")]
    Logging(#[from] tracing_appender::rolling::InitError),
}
