//! Write-side bridge to the notes application
//!
//! Notes are written through the application's scripting interface
//! (`osascript` running JavaScript for Automation), never by encoding the
//! binary body format. The automation host cannot process overlapping
//! invocations, so every call is serialized through a process-wide mutex.
//!
//! Editing a note that has attachments replaces the whole body and loses
//! the attachments.

use std::path::Path;
use std::process::Command;
use std::sync::{Mutex, OnceLock};

use rusqlite::{Connection, OpenFlags};
use serde::Deserialize;

use crate::error::{NotebridgeError, Result};

/// Store identifier, immutable for the life of the process
static STORE_UUID: OnceLock<String> = OnceLock::new();

/// At most one osascript invocation in flight at a time
static OSASCRIPT_GUARD: Mutex<()> = Mutex::new(());

/// Result of creating a note through the scripting interface
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedNote {
    pub id: String,
    pub name: String,
}

/// The store's own unique identifier, read once and cached
pub fn store_uuid(db_path: &Path) -> Result<String> {
    if let Some(uuid) = STORE_UUID.get() {
        return Ok(uuid.clone());
    }

    let conn = Connection::open_with_flags(
        db_path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
    .map_err(|e| NotebridgeError::StoreUnavailable {
        path: db_path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let uuid: String = conn
        .query_row("SELECT Z_UUID FROM Z_METADATA", [], |row| row.get(0))
        .map_err(|e| NotebridgeError::Other(format!("failed to read store UUID: {}", e)))?;

    Ok(STORE_UUID.get_or_init(|| uuid).clone())
}

/// Scripting-interface identifier for a raw note row key
///
/// The application addresses notes as
/// `x-coredata://<store-uuid>/ICNote/p<row-id>`; the row key must match the
/// one the read side surfaces.
pub fn note_automation_id(store_uuid: &str, note_id: i64) -> String {
    format!("x-coredata://{}/ICNote/p{}", store_uuid, note_id)
}

/// Create a note, returning the identifier and name the application assigned
pub fn create_note(title: &str, body: &str, folder: &str) -> Result<CreatedNote> {
    let full_html = format!("<div><b>{}</b></div>{}", escape_html(title), body_to_html(body));
    let script = format!(
        r#"
        var app = Application("Notes");
        var folder;
        var folders = app.folders.whose({{name: "{folder}"}});
        if (folders.length > 0) {{
            folder = folders[0];
        }} else {{
            folder = app.defaultAccount().folders.whose({{name: "Notes"}})[0];
        }}
        var note = app.Note({{body: "{body}"}});
        folder.notes.push(note);
        JSON.stringify({{id: note.id(), name: note.name()}});
        "#,
        folder = escape_js(folder),
        body = escape_js(&full_html),
    );

    let output = run_jxa(&script)?;
    Ok(serde_json::from_str(&output)?)
}

/// Replace a note's body with plain text (newlines become paragraphs)
pub fn edit_note(db_path: &Path, note_id: i64, body: &str) -> Result<()> {
    let target = note_automation_id(&store_uuid(db_path)?, note_id);
    let script = format!(
        r#"
        var app = Application("Notes");
        var note = app.notes.byId("{id}");
        note.body = "{body}";
        "ok";
        "#,
        id = escape_js(&target),
        body = escape_js(&body_to_html(body)),
    );

    run_jxa(&script).map(|_| ())
}

/// Move a note to the application's deleted-items folder
pub fn delete_note(db_path: &Path, note_id: i64) -> Result<()> {
    let target = note_automation_id(&store_uuid(db_path)?, note_id);
    let script = format!(
        r#"
        var app = Application("Notes");
        var note = app.notes.byId("{id}");
        app.delete(note);
        "ok";
        "#,
        id = escape_js(&target),
    );

    run_jxa(&script).map(|_| ())
}

/// Run a JXA script and return its stdout
fn run_jxa(script: &str) -> Result<String> {
    let _guard = OSASCRIPT_GUARD
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());

    let output = Command::new("osascript")
        .args(["-l", "JavaScript", "-e", script])
        .output()?;

    if !output.status.success() {
        return Err(NotebridgeError::Automation {
            code: output.status.code().unwrap_or(-1),
            message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// Plain text to the application's paragraph markup, one `<div>` per line
fn body_to_html(body: &str) -> String {
    body.split('\n')
        .map(|line| {
            let escaped = escape_html(line);
            if escaped.is_empty() {
                "<div><br></div>".to_string()
            } else {
                format!("<div>{}</div>", escaped)
            }
        })
        .collect()
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Escape for embedding in a double-quoted JS string literal
fn escape_js(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}
