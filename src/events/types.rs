//! Event type definitions for progress reporting.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// All events emitted by the dedupe and organize pipelines
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    /// File discovery events
    Scan(ScanEvent),
    /// Content hashing events
    Hash(HashEvent),
    /// Execute-phase events (trash or move)
    Action(ActionEvent),
}

/// Events during file discovery
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ScanEvent {
    /// Scanning of one root has started
    Started {
        root: PathBuf,
        exclude: Option<PathBuf>,
    },
    /// A candidate file was found
    FileFound { path: PathBuf },
    /// An entry could not be read, scanning continues
    Error { path: PathBuf, message: String },
    /// Scanning of one root completed
    Completed { root: PathBuf, total_files: usize },
}

/// Events during content hashing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum HashEvent {
    /// Hashing has started
    Started { total_files: usize },
    /// Emitted after every file, hashed or not
    Progress(HashProgress),
    /// A file could not be read and is excluded
    Error { path: PathBuf, message: String },
    /// Hashing completed
    Completed { total_hashed: usize, failures: usize },
}

/// Progress information during hashing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HashProgress {
    /// Number of files processed so far
    pub completed: usize,
    /// Total number of files to process
    pub total: usize,
    /// File that was just processed
    pub current_path: PathBuf,
}

impl HashProgress {
    /// Completion as a percentage (100 when there is nothing to do)
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            100.0
        } else {
            self.completed as f64 / self.total as f64 * 100.0
        }
    }
}

/// Events during the execute phase
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ActionEvent {
    /// Execution has started
    Started { total: usize },
    /// A file was trashed (`destination` is None) or moved
    Succeeded {
        source: PathBuf,
        destination: Option<PathBuf>,
    },
    /// A file could not be trashed or moved, execution continues
    Failed { path: PathBuf, message: String },
    /// Execution completed
    Completed { succeeded: usize, failed: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_are_serializable() {
        let event = Event::Hash(HashEvent::Progress(HashProgress {
            completed: 3,
            total: 12,
            current_path: PathBuf::from("/photos/a.jpg"),
        }));

        let json = serde_json::to_string(&event).unwrap();
        let deserialized: Event = serde_json::from_str(&json).unwrap();

        match deserialized {
            Event::Hash(HashEvent::Progress(p)) => {
                assert_eq!(p.completed, 3);
                assert_eq!(p.total, 12);
            }
            _ => panic!("Wrong event type"),
        }
    }

    #[test]
    fn percent_of_progress() {
        let progress = HashProgress {
            completed: 1,
            total: 4,
            current_path: PathBuf::new(),
        };
        assert!((progress.percent() - 25.0).abs() < f64::EPSILON);
    }

    #[test]
    fn percent_with_nothing_to_do_is_complete() {
        let progress = HashProgress {
            completed: 0,
            total: 0,
            current_path: PathBuf::new(),
        };
        assert_eq!(progress.percent(), 100.0);
    }
}
