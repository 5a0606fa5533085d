//! # Core Module
//!
//! The UI-agnostic engine behind both commands.
//!
//! ## Modules
//! - `scanner` - Discovers media files in directories
//! - `hasher` - Computes SHA-256 content hashes
//! - `comparator` - Pairs folder-A files with same-content folder-B files
//! - `dedupe` - Plans and executes cross-folder duplicate removal
//! - `metadata` - Reads EXIF capture dates and modification times
//! - `organize` - Plans and executes date-based sorting

pub mod comparator;
pub mod dedupe;
pub mod hasher;
pub mod metadata;
pub mod organize;
pub mod scanner;

// Re-export commonly used types
pub use comparator::DuplicatePair;
pub use hasher::{ContentHash, HashIndex};
pub use organize::{DateGranularity, PlannedMove};
pub use scanner::{MediaFile, MediaKind};
