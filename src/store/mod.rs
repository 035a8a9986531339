//! Read-only access to the notes SQLite store
//!
//! Every query opens and closes its own read-only connection; a
//! [`NoteStore`] holds nothing but the database path, so handles can be
//! cloned and used from any number of threads without coordination. No
//! writes ever originate here — the write path goes through the
//! [`automation`](crate::automation) module.
//!
//! The queries target the host application's actual schema: notes and
//! folders share the `ZICCLOUDSYNCINGOBJECT` table (notes carry `ZTITLE1`,
//! folders `ZTITLE2`), body blobs live in `ZICNOTEDATA`. A row is live
//! while `ZMARKEDFORDELETION` is NULL or 0; any other value means deleted.

use std::path::{Path, PathBuf};

use rusqlite::{params, Connection, OpenFlags};

use crate::codec;
use crate::config;
use crate::error::{NotebridgeError, Result};
use crate::model::{Folder, Note};
use crate::time::store_timestamp_to_iso;

/// Read-only handle to the notes database
#[derive(Debug, Clone)]
pub struct NoteStore {
    db_path: PathBuf,
}

impl NoteStore {
    /// Handle for a store at an explicit path
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        NoteStore {
            db_path: db_path.into(),
        }
    }

    /// Handle for the store at the configured location
    pub fn open_default() -> Result<Self> {
        Ok(NoteStore {
            db_path: config::store_path()?,
        })
    }

    pub fn path(&self) -> &Path {
        &self.db_path
    }

    fn connect(&self) -> Result<Connection> {
        Connection::open_with_flags(
            &self.db_path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|e| NotebridgeError::StoreUnavailable {
            path: self.db_path.clone(),
            reason: e.to_string(),
        })
    }

    /// All named, non-deleted folders with their live note counts,
    /// ordered by name
    pub fn folders(&self) -> Result<Vec<Folder>> {
        let conn = self.connect()?;
        let mut stmt = conn
            .prepare(
                r#"
                SELECT
                    f.Z_PK AS id,
                    f.ZTITLE2 AS name,
                    COUNT(n.Z_PK) AS note_count
                FROM ZICCLOUDSYNCINGOBJECT f
                LEFT JOIN ZICCLOUDSYNCINGOBJECT n
                    ON n.ZFOLDER = f.Z_PK
                    AND n.ZTITLE1 IS NOT NULL
                    AND (n.ZMARKEDFORDELETION IS NULL OR n.ZMARKEDFORDELETION = 0)
                WHERE f.ZTITLE2 IS NOT NULL
                  AND (f.ZMARKEDFORDELETION IS NULL OR f.ZMARKEDFORDELETION = 0)
                GROUP BY f.Z_PK
                ORDER BY f.ZTITLE2
            "#,
            )
            .map_err(|e| NotebridgeError::Other(format!("failed to prepare folder query: {}", e)))?;

        let rows = stmt
            .query_map([], |row| {
                Ok(Folder {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    note_count: row.get(2)?,
                })
            })
            .map_err(|e| NotebridgeError::Other(format!("failed to query folders: {}", e)))?;

        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(|e| NotebridgeError::Other(format!("failed to read folder row: {}", e)))
    }

    /// All non-deleted, titled notes, optionally restricted to one folder
    ///
    /// Pinned notes come first, then notes by modification time descending.
    /// Bodies are left empty here; [`NoteStore::note`] populates them.
    pub fn notes(&self, folder_id: Option<i64>) -> Result<Vec<Note>> {
        let conn = self.connect()?;

        let mut sql = String::from(
            r#"
            SELECT
                n.Z_PK AS id,
                n.ZTITLE1 AS title,
                n.ZSNIPPET AS snippet,
                n.ZCREATIONDATE3 AS created,
                n.ZMODIFICATIONDATE1 AS modified,
                n.ZISPINNED AS is_pinned,
                n.ZHASCHECKLIST AS has_checklist,
                f.ZTITLE2 AS folder_name
            FROM ZICCLOUDSYNCINGOBJECT n
            LEFT JOIN ZICCLOUDSYNCINGOBJECT f ON n.ZFOLDER = f.Z_PK
            WHERE n.ZTITLE1 IS NOT NULL
              AND (n.ZMARKEDFORDELETION IS NULL OR n.ZMARKEDFORDELETION = 0)
        "#,
        );

        let mut params: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();
        if let Some(folder_id) = folder_id {
            sql.push_str(" AND n.ZFOLDER = ?");
            params.push(Box::new(folder_id));
        }
        sql.push_str(" ORDER BY n.ZISPINNED DESC, n.ZMODIFICATIONDATE1 DESC");

        let mut stmt = conn
            .prepare(&sql)
            .map_err(|e| NotebridgeError::Other(format!("failed to prepare note query: {}", e)))?;

        let param_refs: Vec<&dyn rusqlite::ToSql> = params.iter().map(|p| p.as_ref()).collect();
        let rows = stmt
            .query_map(param_refs.as_slice(), |row| {
                Ok(Note {
                    id: row.get(0)?,
                    title: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
                    snippet: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
                    body: String::new(),
                    folder: row
                        .get::<_, Option<String>>(7)?
                        .unwrap_or_else(|| "Notes".to_string()),
                    created: store_timestamp_to_iso(row.get(3)?).unwrap_or_default(),
                    modified: store_timestamp_to_iso(row.get(4)?).unwrap_or_default(),
                    is_pinned: row.get::<_, Option<i64>>(5)?.unwrap_or(0) != 0,
                    has_checklist: row.get::<_, Option<i64>>(6)?.unwrap_or(0) != 0,
                })
            })
            .map_err(|e| NotebridgeError::Other(format!("failed to query notes: {}", e)))?;

        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(|e| NotebridgeError::Other(format!("failed to read note row: {}", e)))
    }

    /// A single note with its body decoded, or `None` when the row does not
    /// exist or is deleted
    pub fn note(&self, note_id: i64) -> Result<Option<Note>> {
        let conn = self.connect()?;
        let mut stmt = conn
            .prepare(
                r#"
                SELECT
                    n.Z_PK AS id,
                    n.ZTITLE1 AS title,
                    n.ZSNIPPET AS snippet,
                    n.ZCREATIONDATE3 AS created,
                    n.ZMODIFICATIONDATE1 AS modified,
                    n.ZISPINNED AS is_pinned,
                    n.ZHASCHECKLIST AS has_checklist,
                    f.ZTITLE2 AS folder_name,
                    nd.ZDATA AS body_data
                FROM ZICCLOUDSYNCINGOBJECT n
                LEFT JOIN ZICCLOUDSYNCINGOBJECT f ON n.ZFOLDER = f.Z_PK
                LEFT JOIN ZICNOTEDATA nd ON nd.ZNOTE = n.Z_PK
                WHERE n.Z_PK = ?1
                  AND (n.ZMARKEDFORDELETION IS NULL OR n.ZMARKEDFORDELETION = 0)
            "#,
            )
            .map_err(|e| NotebridgeError::Other(format!("failed to prepare note query: {}", e)))?;

        let result = stmt.query_row(params![note_id], |row| {
            let body = row
                .get::<_, Option<Vec<u8>>>(8)?
                .map(|blob| codec::decode_body(&blob))
                .unwrap_or_default();

            Ok(Note {
                id: row.get(0)?,
                title: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
                snippet: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
                body,
                folder: row
                    .get::<_, Option<String>>(7)?
                    .unwrap_or_else(|| "Notes".to_string()),
                created: store_timestamp_to_iso(row.get(3)?).unwrap_or_default(),
                modified: store_timestamp_to_iso(row.get(4)?).unwrap_or_default(),
                is_pinned: row.get::<_, Option<i64>>(5)?.unwrap_or(0) != 0,
                has_checklist: row.get::<_, Option<i64>>(6)?.unwrap_or(0) != 0,
            })
        });

        match result {
            Ok(note) => {
                tracing::debug!(note_id, body_len = note.body.len(), "fetched note");
                Ok(Some(note))
            }
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(NotebridgeError::Other(format!(
                "failed to fetch note {}: {}",
                note_id, e
            ))),
        }
    }
}
