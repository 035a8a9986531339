//! Notebridge
//!
//! Read-only access to the local Apple Notes store for companion apps.
//!
//! The store keeps note bodies as gzipped blobs of an undocumented,
//! CRDT-oriented record format; the [`codec`] module decodes them to plain
//! text and never fails — malformed or version-skewed blobs degrade to
//! empty or partial text instead of breaking the rest of the collection.
//! [`store::NoteStore`] maps database rows into [`Note`]/[`Folder`]
//! records, and [`automation`] covers the write path through the
//! application's scripting interface.

pub mod automation;
pub mod codec;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod store;
pub mod time;

pub use error::{NotebridgeError, Result};
pub use model::{Folder, Note};
pub use store::NoteStore;
