//! # Error Module
//!
//! Error types for media-tidy.
//!
//! ## Design Principles
//! - **Never panic** on user data - return errors instead
//! - **Include context** - paths, file names, what went wrong
//! - **Per-file errors are collected**, not propagated; only setup problems
//!   (missing folders, unreadable stdin) abort a run

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error
#[derive(Error, Debug)]
pub enum MediaTidyError {
    #[error("Scanning error: {0}")]
    Scan(#[from] ScanError),

    #[error("Failed to read confirmation: {0}")]
    Prompt(#[source] std::io::Error),

    #[error("Failed to render output: {0}")]
    Output(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Errors that occur while discovering files
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    #[error("Permission denied accessing: {path}")]
    PermissionDenied { path: PathBuf },

    #[error("Failed to read {path}: {source}")]
    ReadDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ScanError {
    /// Path the error refers to
    pub fn path(&self) -> &PathBuf {
        match self {
            ScanError::DirectoryNotFound { path }
            | ScanError::PermissionDenied { path }
            | ScanError::ReadDirectory { path, .. } => path,
        }
    }
}

/// Errors that occur while hashing file content.
///
/// Never fatal: the file is reported and left out of matching.
#[derive(Error, Debug)]
pub enum HashError {
    #[error("Failed to hash {path}: {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl HashError {
    /// Path of the file that could not be hashed
    pub fn path(&self) -> &PathBuf {
        match self {
            HashError::IoError { path, .. } => path,
        }
    }
}

/// Errors from the execute phase (trashing or moving a single file)
#[derive(Error, Debug)]
pub enum ActionError {
    #[error("Failed to move to recycle bin {path}: {reason}")]
    Trash { path: PathBuf, reason: String },

    #[error("Failed to move {source_path} -> {destination}: {source}")]
    Move {
        source_path: PathBuf,
        destination: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Source file not found: {path}")]
    SourceMissing { path: PathBuf },

    #[error("Destination already exists, refusing to overwrite: {path}")]
    DestinationExists { path: PathBuf },

    #[error("Failed to create directory {path}: {source}")]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A per-file failure recorded during a run that kept going
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileFailure {
    pub path: PathBuf,
    pub message: String,
}

impl FileFailure {
    pub fn new(path: impl Into<PathBuf>, error: &impl std::fmt::Display) -> Self {
        Self {
            path: path.into(),
            message: error.to_string(),
        }
    }
}

/// Convenience Result type alias
pub type Result<T> = std::result::Result<T, MediaTidyError>;
