//! Note and Folder records projected to companion apps
//!
//! Instances are built fresh per query from the read-only store and never
//! mutated afterwards; the numeric row key is the only durable identity.

use serde::{Deserialize, Serialize};

/// A single note
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    /// Row key in the store, stable across reads
    pub id: i64,
    pub title: String,
    /// Short preview stored alongside the note, not derived from the body
    pub snippet: String,
    /// Decoded plain-text body. Left empty in listings; populated only by
    /// the single-note fetch.
    #[serde(default)]
    pub body: String,
    /// Display name of the containing folder ("Notes" when unset)
    pub folder: String,
    /// ISO 8601, empty when the row carries no timestamp
    pub created: String,
    pub modified: String,
    pub is_pinned: bool,
    pub has_checklist: bool,
}

/// A folder with its live note count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Folder {
    pub id: i64,
    pub name: String,
    /// Count of non-deleted, titled notes in the folder
    pub note_count: i64,
}
