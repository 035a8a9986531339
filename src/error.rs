//! Error types for notebridge
//!
//! The body decoder itself never errors — malformed blobs degrade to empty
//! or partial text. Errors here come from the data-access and automation
//! layers only.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during notebridge operations
#[derive(Error, Debug)]
pub enum NotebridgeError {
    /// The store file could not be opened. Usually a missing file or a
    /// permission grant that has not happened yet; retrying without
    /// out-of-band remediation will not help.
    #[error("notes store unavailable at {path:?}: {reason}")]
    StoreUnavailable { path: PathBuf, reason: String },

    #[error("home directory could not be determined")]
    NoHomeDir,

    #[error("automation call failed (exit {code}): {message}")]
    Automation { code: i32, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for notebridge operations
pub type Result<T> = std::result::Result<T, NotebridgeError>;
