//! Media organization module.
//!
//! Sorts the top-level photos and videos of one folder into a date-based
//! folder hierarchy, dated by EXIF capture time or modification time.

mod types;
mod scanner;
mod planner;
mod executor;

pub use types::*;
pub use scanner::OrganizeScanner;
pub use planner::{target_dir, unique_path, DestinationRegistry, OrganizePlanner};
pub use executor::{move_file, OrganizeExecutor};
