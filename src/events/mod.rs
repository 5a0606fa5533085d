//! # Events Module
//!
//! Progress events emitted by the scan, hash and execute phases.
//!
//! ## Design
//! Pipelines are synchronous and single-threaded, so events are delivered
//! through a caller-supplied `FnMut(&Event)` on the same thread. The CLI
//! turns them into progress bars; tests usually pass `|_| {}`.
//!
//! ## Example
//! ```rust,ignore
//! let index = hash_files(&paths, |event| {
//!     if let Event::Hash(HashEvent::Progress(p)) = event {
//!         println!("{}/{} processed", p.completed, p.total);
//!     }
//! });
//! ```

mod types;

pub use types::*;

/// An event callback that ignores everything
pub fn ignore(_: &Event) {}
