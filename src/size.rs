//! Size accounting for matched directories.
//!
//! Two strategies: a fast native `du` aggregate with a bounded timeout, and a
//! manual recursive walk used whenever the fast path cannot produce a number.
//! Sizing never fails outward; worst case a directory reports zero bytes.

use crate::scanner::MatchRecord;

use std::io::Read;
use std::path::Path;
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};
use walkdir::WalkDir;

const DU_TIMEOUT: Duration = Duration::from_secs(30);
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// A way of measuring a directory's on-disk size. Returns `None` when this
/// strategy cannot produce a trustworthy number, letting the accountant fall
/// back.
pub trait SizeStrategy {
    fn measure(&self, path: &Path) -> Option<u64>;
}

/// Fast path: `du -sk`, killed if it exceeds the timeout.
pub struct DuCommand {
    timeout: Duration,
}

impl DuCommand {
    pub fn new(timeout: Duration) -> Self {
        DuCommand { timeout }
    }
}

impl Default for DuCommand {
    fn default() -> Self {
        DuCommand::new(DU_TIMEOUT)
    }
}

impl SizeStrategy for DuCommand {
    fn measure(&self, path: &Path) -> Option<u64> {
        let mut child = Command::new("du")
            .arg("-sk")
            .arg(path)
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .ok()?;

        let deadline = Instant::now() + self.timeout;
        loop {
            match child.try_wait() {
                Ok(Some(status)) => {
                    if !status.success() {
                        return None;
                    }
                    break;
                }
                Ok(None) => {
                    if Instant::now() >= deadline {
                        let _ = child.kill();
                        let _ = child.wait();
                        return None;
                    }
                    thread::sleep(POLL_INTERVAL);
                }
                Err(_) => {
                    let _ = child.kill();
                    return None;
                }
            }
        }

        let mut output = String::new();
        child.stdout.take()?.read_to_string(&mut output).ok()?;

        // "12345\t/path" in 1 KiB blocks
        let kib: u64 = output.split_whitespace().next()?.parse().ok()?;
        Some(kib * 1024)
    }
}

/// Fallback: recurse manually, summing file sizes. Symlinks are skipped
/// (neither followed nor counted) and unreadable entries contribute zero
/// without aborting their siblings.
pub fn walk_size(path: &Path) -> u64 {
    WalkDir::new(path)
        .follow_links(false)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| entry.metadata().ok())
        .map(|metadata| metadata.len())
        .sum()
}

/// Annotates match records with byte counts, preferring the fast strategy
/// and falling back to the manual walk.
pub struct SizeAccountant {
    primary: Box<dyn SizeStrategy>,
}

impl SizeAccountant {
    pub fn new(primary: Box<dyn SizeStrategy>) -> Self {
        SizeAccountant { primary }
    }

    pub fn size_of(&self, path: &Path) -> u64 {
        self.primary
            .measure(path)
            .unwrap_or_else(|| walk_size(path))
    }

    /// Write each record's size exactly once.
    pub fn annotate(&self, records: &mut [MatchRecord]) {
        for record in records {
            record.size_bytes = self.size_of(&record.path);
        }
    }
}

impl Default for SizeAccountant {
    fn default() -> Self {
        SizeAccountant::new(Box::new(DuCommand::default()))
    }
}
