//! SQLite storage implementation

use std::path::{Path, PathBuf};
use rusqlite::{Connection, DatabaseName, params};
use crate::Result;
use crate::job::JobRecord;
use super::schema;

/// Rows written per scoped connection
pub const BATCH_SIZE: usize = 1000;

/// SQLite-backed store for job postings.
///
/// Holds only the file path; each operation opens and drops its own
/// connection, so a failed batch never leaves a handle behind.
#[derive(Debug, Clone)]
pub struct JobStore {
    path: PathBuf,
}

impl JobStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sibling file written by [`backup`](Self::backup)
    pub fn backup_path(&self) -> PathBuf {
        let mut path = self.path.clone().into_os_string();
        path.push(".backup");
        PathBuf::from(path)
    }

    /// Open a scoped connection (creates the file if it doesn't exist)
    fn open(&self) -> Result<Connection> {
        Ok(Connection::open(&self.path)?)
    }

    /// Create the table and indexes if they are missing
    pub fn init_schema(&self) -> Result<()> {
        let conn = self.open()?;
        for stmt in schema::all_schema_statements() {
            conn.execute(stmt, [])?;
        }
        tracing::debug!("Schema ready at {}", self.path.display());
        Ok(())
    }

    /// Copy the whole database to the `.backup` sibling.
    pub fn backup(&self) -> Result<PathBuf> {
        let backup_path = self.backup_path();
        let conn = self.open().inspect_err(|e| {
            tracing::error!("Backup of {} failed: {}", self.path.display(), e);
        })?;
        conn.backup(DatabaseName::Main, &backup_path, None)
            .inspect_err(|e| {
                tracing::error!("Backup of {} failed: {}", self.path.display(), e);
            })?;
        tracing::info!("Database backed up to {}", backup_path.display());
        Ok(backup_path)
    }

    // ========== Write Operations ==========

    /// Insert records in batches of [`BATCH_SIZE`], skipping existing keys.
    ///
    /// Each batch commits on its own connection. An error in one batch leaves
    /// earlier batches committed and stops before later ones.
    pub fn save(&self, records: &[JobRecord]) -> Result<SaveReport> {
        let mut report = SaveReport::default();
        if records.is_empty() {
            tracing::info!("No new jobs to save to database");
            return Ok(report);
        }

        for batch in records.chunks(BATCH_SIZE) {
            let inserted = self.insert_batch(batch).inspect_err(|e| {
                tracing::error!("Failed to save batch {}: {}", report.batches + 1, e);
            })?;
            report.batches += 1;
            report.inserted += inserted;
            report.ignored += batch.len() - inserted;
            tracing::info!("Saved batch of {} jobs to database ({} new)", batch.len(), inserted);
        }

        Ok(report)
    }

    fn insert_batch(&self, batch: &[JobRecord]) -> Result<usize> {
        let mut conn = self.open()?;
        let tx = conn.transaction()?;
        let mut inserted = 0;
        {
            let mut stmt = tx.prepare(schema::INSERT_JOB)?;
            for record in batch {
                inserted += stmt.execute(params![
                    record.title,
                    record.company,
                    record.location,
                    record.description,
                ])?;
            }
        }
        tx.commit()?;
        Ok(inserted)
    }

    // ========== Read Operations ==========

    /// Count stored jobs
    pub fn count(&self) -> Result<usize> {
        let conn = self.open()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM job_scraper", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Jobs created at or after `since` (`YYYY-MM-DD HH:MM:SS`, UTC), oldest first
    pub fn jobs_since(&self, since: &str) -> Result<Vec<StoredJob>> {
        let conn = self.open()?;
        let mut stmt = conn.prepare(
            "SELECT id, title, company, location, description, created_at
             FROM job_scraper WHERE created_at >= ?1 ORDER BY created_at, id",
        )?;

        let jobs = stmt
            .query_map([since], Self::row_to_job)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(jobs)
    }

    fn row_to_job(row: &rusqlite::Row) -> rusqlite::Result<StoredJob> {
        Ok(StoredJob {
            id: row.get(0)?,
            record: JobRecord {
                title: row.get(1)?,
                company: row.get(2)?,
                location: row.get(3)?,
                description: row.get(4)?,
            },
            created_at: row.get(5)?,
        })
    }
}

/// Outcome of [`JobStore::save`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SaveReport {
    /// Scoped connection/insert cycles run
    pub batches: usize,
    /// Rows actually written
    pub inserted: usize,
    /// Rows skipped by the uniqueness constraint
    pub ignored: usize,
}

impl std::fmt::Display for SaveReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Save Report:")?;
        writeln!(f, "  Batches: {}", self.batches)?;
        writeln!(f, "  Inserted: {}", self.inserted)?;
        writeln!(f, "  Already stored: {}", self.ignored)
    }
}

/// A persisted job row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredJob {
    pub id: i64,
    pub record: JobRecord,
    pub created_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    fn scratch_store() -> (tempfile::TempDir, JobStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = JobStore::new(dir.path().join("job_scraper.db"));
        store.init_schema().unwrap();
        (dir, store)
    }

    fn sample_job(title: &str) -> JobRecord {
        JobRecord::new(title, "Acme", "NY").with_description("x")
    }

    #[test]
    fn test_init_schema_is_idempotent() {
        let (_dir, store) = scratch_store();
        store.init_schema().unwrap();
        assert!(store.path().exists());
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn test_save_is_idempotent() {
        let (_dir, store) = scratch_store();
        let jobs = vec![sample_job("Dev"), sample_job("Ops")];

        let first = store.save(&jobs).unwrap();
        let second = store.save(&jobs).unwrap();

        assert_eq!(first.inserted, 2);
        assert_eq!(second.inserted, 0);
        assert_eq!(second.ignored, 2);
        assert_eq!(store.count().unwrap(), 2);
    }

    #[test]
    fn test_save_dedupes_on_key_only() {
        let (_dir, store) = scratch_store();
        let jobs = vec![
            JobRecord::new("Dev", "Acme", "NY").with_description("first"),
            JobRecord::new("Dev", "Acme", "NY").with_description("second"),
            JobRecord::new("Dev", "Acme", "SF"),
        ];

        store.save(&jobs).unwrap();
        let stored = store.jobs_since("1970-01-01 00:00:00").unwrap();
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[0].record.description.as_deref(), Some("first"));
        assert_eq!(stored[1].record.description, None);
    }

    #[test]
    fn test_save_batches() {
        let (_dir, store) = scratch_store();
        let jobs: Vec<_> = (0..2500).map(|i| sample_job(&format!("Job {i}"))).collect();

        let report = store.save(&jobs).unwrap();
        assert_eq!(report.batches, 3);
        assert_eq!(report.inserted, 2500);
        assert_eq!(store.count().unwrap(), 2500);
    }

    #[test]
    fn test_save_empty_is_noop() {
        let (_dir, store) = scratch_store();
        let report = store.save(&[]).unwrap();
        assert_eq!(report, SaveReport::default());
    }

    #[test]
    fn test_failed_batch_keeps_earlier_batches() {
        let (_dir, store) = scratch_store();
        Connection::open(store.path())
            .unwrap()
            .execute_batch(
                "CREATE TRIGGER reject_poison BEFORE INSERT ON job_scraper
                 WHEN NEW.title = 'poison'
                 BEGIN SELECT RAISE(ABORT, 'poisoned row'); END;",
            )
            .unwrap();

        let mut jobs: Vec<_> = (0..2500).map(|i| sample_job(&format!("Job {i}"))).collect();
        jobs[1500] = sample_job("poison");

        let err = store.save(&jobs).unwrap_err();
        assert!(matches!(err, Error::Storage(_)));
        assert_eq!(store.count().unwrap(), BATCH_SIZE);
    }

    #[test]
    fn test_backup_copies_rows() {
        let (_dir, store) = scratch_store();
        store.save(&[sample_job("Dev")]).unwrap();

        let backup_path = store.backup().unwrap();
        assert_eq!(backup_path, store.backup_path());
        assert!(backup_path.to_string_lossy().ends_with("job_scraper.db.backup"));

        let backup = JobStore::new(backup_path);
        assert_eq!(backup.count().unwrap(), 1);
    }

    #[test]
    fn test_backup_failure_propagates() {
        let dir = tempfile::tempdir().unwrap();
        let store = JobStore::new(dir.path().join("missing").join("job_scraper.db"));
        let err = store.backup().unwrap_err();
        assert!(matches!(err, Error::Storage(_)));
    }

    #[test]
    fn test_jobs_since_filters_by_created_at() {
        let (_dir, store) = scratch_store();
        store.save(&[sample_job("Dev")]).unwrap();

        assert_eq!(store.jobs_since("1970-01-01 00:00:00").unwrap().len(), 1);
        assert!(store.jobs_since("9999-01-01 00:00:00").unwrap().is_empty());
    }
}
