//! Database schema definitions

/// SQL to create the job table
pub const CREATE_JOBS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS job_scraper (
    id INTEGER PRIMARY KEY,
    title TEXT,
    company TEXT,
    location TEXT,
    description TEXT,
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
)
"#;

/// SQL to create indexes
pub const CREATE_INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_job_date ON job_scraper(created_at)",
    "CREATE UNIQUE INDEX IF NOT EXISTS idx_unique_job ON job_scraper(title, company, location)",
];

/// Insert that skips rows violating `idx_unique_job`
pub const INSERT_JOB: &str = r#"
INSERT OR IGNORE INTO job_scraper (title, company, location, description)
VALUES (?1, ?2, ?3, ?4)
"#;

/// All schema creation statements
pub fn all_schema_statements() -> Vec<&'static str> {
    let mut stmts = vec![CREATE_JOBS_TABLE];
    stmts.extend(CREATE_INDEXES.iter().copied());
    stmts
}
