//! Row normalization
//!
//! Pure functions over fetched rows:
//! - `combine`: flatten per-query batches in order
//! - `validate`: drop keyless rows, drop exact duplicates, sanitize text

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;

use crate::job::{JobRecord, RawJob};

static DISALLOWED: OnceLock<Regex> = OnceLock::new();

/// Characters other than word characters, whitespace, and hyphens
fn disallowed() -> &'static Regex {
    DISALLOWED.get_or_init(|| Regex::new(r"[^\w\s-]").expect("static pattern is valid"))
}

/// Concatenate batches in input order.
pub fn combine(batches: Vec<Vec<RawJob>>) -> Vec<RawJob> {
    batches.into_iter().flatten().collect()
}

/// Keep rows with a full uniqueness key, first occurrence of each exact
/// duplicate, and strip disallowed characters from every field.
pub fn validate(rows: Vec<RawJob>) -> Vec<JobRecord> {
    let total = rows.len();
    let mut seen = HashSet::new();

    let records: Vec<JobRecord> = rows
        .into_iter()
        .filter(RawJob::has_key)
        .filter(|row| seen.insert(row.clone()))
        .filter_map(|row| JobRecord::try_from(row).ok())
        .map(sanitize)
        .collect();

    tracing::info!("Validated {} of {} fetched rows", records.len(), total);
    records
}

/// Strip disallowed characters from a single field.
pub fn sanitize_text(text: &str) -> String {
    disallowed().replace_all(text, "").into_owned()
}

fn sanitize(record: JobRecord) -> JobRecord {
    JobRecord {
        title: sanitize_text(&record.title),
        company: sanitize_text(&record.company),
        location: sanitize_text(&record.location),
        description: record.description.as_deref().map(sanitize_text),
    }
}
