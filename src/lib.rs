//! # media-tidy
//!
//! Two careful batch tools for photo folders.
//!
//! ## Core Philosophy
//! - **Preview first** - every change is listed before anything happens
//! - **Explicit consent** - nothing is touched without a typed confirmation
//! - **Recoverable** - duplicates go to the recycle bin, never straight to oblivion
//!
//! ## Architecture
//! The library is split into a core engine (UI-agnostic) and presentation layers:
//! - `core` - Scanning, hashing, dating, planning and executing
//! - `events` - Progress reporting through callbacks
//! - `error` - Error types
//! - `cli` (binary only) - Command-line interface

pub mod core;
pub mod error;
pub mod events;

// Re-export commonly used types at the crate root
pub use error::{MediaTidyError, Result};

use tracing_subscriber::EnvFilter;

/// Initialize tracing for the library
///
/// This should be called by the application entry point. `RUST_LOG`
/// takes precedence; otherwise `verbose` selects `debug` over `warn`.
pub fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // A subscriber may already be installed (e.g. by a test harness).
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
