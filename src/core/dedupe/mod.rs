//! Cross-folder duplicate removal.
//!
//! Finds files in folder A whose content also exists in folder B and moves
//! the folder-A copies to the recycle bin.

mod types;
mod planner;
mod executor;

pub use types::*;
pub use planner::DedupePlanner;
pub use executor::{delete_files, DedupeExecutor, SystemTrash, Trasher};
