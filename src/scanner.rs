//! Directory traversal: applies the rule table while pruning subtrees that
//! must never be descended into.

use crate::matcher;
use crate::registry::Registry;

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Version-control metadata; never recorded, never traversed.
pub const SKIP_DIRS: &[&str] = &[".git", ".jj", ".svn", ".hg", ".bzr", "_darcs", "CVS"];

/// A directory confirmed as a deletion target during scanning.
///
/// Created once per match; `size_bytes` starts at zero and is written exactly
/// once by the size accountant, read-only afterward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRecord {
    /// Matched basename.
    pub name: String,
    /// Absolute path to the matched directory.
    pub path: PathBuf,
    /// On-disk size; populated after scanning.
    pub size_bytes: u64,
}

/// Walk every directory reachable from `root` and collect confirmed targets.
///
/// Pruning policy, per subdirectory entry:
/// - VCS metadata: skipped entirely.
/// - Confirmed match: recorded, contents never traversed (opaque; typically
///   enormous and irrelevant).
/// - Known target name that failed its safety check (e.g. `target` with no
///   `Cargo.toml` sibling): not recorded, but still opaque. A probable
///   artifact that cannot be confirmed is neither deleted nor worth scanning
///   inside.
/// - Anything else: descended into.
///
/// Unreadable directories are skipped silently; that only reduces cleanup
/// completeness, never causes an incorrect deletion. Symlinks are not
/// followed. Entries are visited in file-name order so results are stable.
pub fn scan(root: &Path, registry: &Registry) -> Vec<MatchRecord> {
    let mut records = Vec::new();

    let mut walker = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter();

    while let Some(entry) = walker.next() {
        let entry = match entry {
            Ok(entry) => entry,
            // Permission or I/O failure: abort that subtree only
            Err(_) => continue,
        };

        // The root itself is never a candidate; only entries below it are
        if entry.depth() == 0 || !entry.file_type().is_dir() {
            continue;
        }

        let name = entry.file_name().to_string_lossy().into_owned();

        if SKIP_DIRS.contains(&name.as_str()) {
            walker.skip_current_dir();
            continue;
        }

        let rules = registry.rules_for(&name);
        if rules.is_empty() {
            continue;
        }

        if rules.iter().any(|rule| matcher::matches(rule, entry.path())) {
            records.push(MatchRecord {
                name,
                path: entry.path().to_path_buf(),
                size_bytes: 0,
            });
        }

        // Matched or look-alike, the subtree is opaque either way
        walker.skip_current_dir();
    }

    records
}
