//! Reclaim - regenerable build-artifact cleaner
//!
//! Reclaim finds directories that a build tool or package manager can
//! recreate (node_modules, target, Pods, ...) and deletes them to free disk
//! space. Ambiguous names are only matched with corroborating context: a
//! `target` directory needs a `Cargo.toml` next to it, `build` must sit under
//! `android/app`, `vendor` needs a `Gemfile` sibling. Unconfirmed look-alikes
//! are neither deleted nor traversed.
//!
//! Pipeline: [`scanner::scan`] produces match records, [`size::SizeAccountant`]
//! annotates them with byte counts, [`deleter::delete_all`] removes them and
//! reports freed bytes plus per-item failures.

pub mod deleter;
pub mod matcher;
pub mod registry;
pub mod scanner;
pub mod size;

// Re-export commonly used items
pub use deleter::{delete_all, DeletionFailure, DeletionReport};
pub use matcher::matches;
pub use registry::{Registry, Strategy, TargetRule};
pub use scanner::{scan, MatchRecord, SKIP_DIRS};
pub use size::{DuCommand, SizeAccountant, SizeStrategy};
