//! Batch removal of matched directories with partial-failure handling.

use crate::scanner::MatchRecord;

use std::fs;
use std::path::PathBuf;

/// One directory that could not be removed.
#[derive(Debug)]
pub struct DeletionFailure {
    pub name: String,
    pub path: PathBuf,
    pub reason: String,
}

/// Outcome of a deletion batch.
#[derive(Debug, Default)]
pub struct DeletionReport {
    /// Bytes reclaimed by successful removals, per the pre-computed sizes.
    pub freed_bytes: u64,
    pub failures: Vec<DeletionFailure>,
}

/// Remove every matched directory, sequentially. A failed removal is
/// recorded and the batch continues; one bad entry never aborts the rest.
pub fn delete_all(records: &[MatchRecord]) -> DeletionReport {
    let mut report = DeletionReport::default();

    for record in records {
        match fs::remove_dir_all(&record.path) {
            Ok(()) => report.freed_bytes += record.size_bytes,
            Err(err) => report.failures.push(DeletionFailure {
                name: record.name.clone(),
                path: record.path.clone(),
                reason: err.to_string(),
            }),
        }
    }

    report
}
