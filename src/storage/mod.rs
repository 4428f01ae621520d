//! Storage Layer - SQLite-backed persistence
//!
//! System of record is a single SQLite file with one table:
//! - job_scraper(id, title, company, location, description, created_at)
//!
//! Every unit of work (schema init, backup, one insert batch, one read) opens
//! its own connection and drops it when done.

pub mod schema;
pub mod sqlite;

pub use sqlite::{JobStore, SaveReport, StoredJob, BATCH_SIZE};
