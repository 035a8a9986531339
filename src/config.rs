//! Store location configuration
//!
//! The notes database lives inside the host application's group container.
//! The path can be overridden with the `NOTEBRIDGE_STORE` environment
//! variable, which is useful for tests and for reading a copied store.

use std::env;
use std::path::PathBuf;

use crate::error::{NotebridgeError, Result};

/// Store path relative to the user's home directory
pub const DEFAULT_STORE_PATH: &str =
    "Library/Group Containers/group.com.apple.notes/NoteStore.sqlite";

/// Environment variable overriding the store location
pub const STORE_ENV_VAR: &str = "NOTEBRIDGE_STORE";

/// Resolve the path of the notes database
pub fn store_path() -> Result<PathBuf> {
    if let Some(path) = env::var_os(STORE_ENV_VAR) {
        return Ok(PathBuf::from(path));
    }

    dirs::home_dir()
        .map(|home| home.join(DEFAULT_STORE_PATH))
        .ok_or(NotebridgeError::NoHomeDir)
}
