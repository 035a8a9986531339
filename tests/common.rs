//! Shared fixtures for integration tests
//!
//! Builds an on-disk SQLite store with the same table shapes notebridge
//! reads in production, plus synthetic body blobs in the store's wire
//! encoding.

use std::io::Write;
use std::path::{Path, PathBuf};

use flate2::write::GzEncoder;
use flate2::Compression;
use rusqlite::{params, Connection};

#[allow(dead_code)]
pub const FIXTURE_UUID: &str = "11111111-2222-3333-4444-555555555555";

/// Create an empty fixture store and return its path
#[allow(dead_code)]
pub fn create_store(dir: &Path) -> PathBuf {
    let db_path = dir.join("NoteStore.sqlite");
    let conn = Connection::open(&db_path).unwrap();
    conn.execute_batch(
        r#"
        CREATE TABLE ZICCLOUDSYNCINGOBJECT (
            Z_PK INTEGER PRIMARY KEY,
            ZTITLE1 TEXT,
            ZTITLE2 TEXT,
            ZSNIPPET TEXT,
            ZCREATIONDATE3 REAL,
            ZMODIFICATIONDATE1 REAL,
            ZFOLDER INTEGER,
            ZISPINNED INTEGER,
            ZHASCHECKLIST INTEGER,
            ZMARKEDFORDELETION INTEGER
        );
        CREATE TABLE ZICNOTEDATA (
            Z_PK INTEGER PRIMARY KEY,
            ZNOTE INTEGER,
            ZDATA BLOB
        );
        CREATE TABLE Z_METADATA (
            Z_UUID TEXT
        );
        "#,
    )
    .unwrap();
    conn.execute(
        "INSERT INTO Z_METADATA (Z_UUID) VALUES (?1)",
        params![FIXTURE_UUID],
    )
    .unwrap();
    db_path
}

#[allow(dead_code)]
pub fn insert_folder(conn: &Connection, pk: i64, name: Option<&str>, deleted: Option<i64>) {
    conn.execute(
        "INSERT INTO ZICCLOUDSYNCINGOBJECT (Z_PK, ZTITLE2, ZMARKEDFORDELETION) VALUES (?1, ?2, ?3)",
        params![pk, name, deleted],
    )
    .unwrap();
}

#[allow(dead_code)]
pub struct NoteRow<'a> {
    pub pk: i64,
    pub title: Option<&'a str>,
    pub snippet: Option<&'a str>,
    pub folder: Option<i64>,
    pub pinned: i64,
    pub created: f64,
    pub modified: f64,
    pub deleted: Option<i64>,
}

#[allow(dead_code)]
impl<'a> NoteRow<'a> {
    pub fn titled(pk: i64, title: &'a str) -> Self {
        NoteRow {
            pk,
            title: Some(title),
            snippet: None,
            folder: None,
            pinned: 0,
            created: 0.0,
            modified: 0.0,
            deleted: None,
        }
    }
}

#[allow(dead_code)]
pub fn insert_note(conn: &Connection, row: &NoteRow) {
    conn.execute(
        "INSERT INTO ZICCLOUDSYNCINGOBJECT
            (Z_PK, ZTITLE1, ZSNIPPET, ZCREATIONDATE3, ZMODIFICATIONDATE1,
             ZFOLDER, ZISPINNED, ZHASCHECKLIST, ZMARKEDFORDELETION)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, 0, ?8)",
        params![
            row.pk,
            row.title,
            row.snippet,
            row.created,
            row.modified,
            row.folder,
            row.pinned,
            row.deleted,
        ],
    )
    .unwrap();
}

#[allow(dead_code)]
pub fn insert_body(conn: &Connection, pk: i64, note_pk: i64, data: Option<&[u8]>) {
    conn.execute(
        "INSERT INTO ZICNOTEDATA (Z_PK, ZNOTE, ZDATA) VALUES (?1, ?2, ?3)",
        params![pk, note_pk, data],
    )
    .unwrap();
}

#[allow(dead_code)]
pub fn varint(mut value: u64) -> Vec<u8> {
    let mut out = Vec::new();
    loop {
        let byte = (value & 0x7f) as u8;
        value >>= 7;
        if value == 0 {
            out.push(byte);
            return out;
        }
        out.push(byte | 0x80);
    }
}

#[allow(dead_code)]
pub fn field_bytes(field: u64, payload: &[u8]) -> Vec<u8> {
    let mut out = varint(field << 3 | 2);
    out.extend(varint(payload.len() as u64));
    out.extend_from_slice(payload);
    out
}

/// Synthetic note record: root → container (2) → runs (3) → text (2)
#[allow(dead_code)]
pub fn note_message(runs: &[&str]) -> Vec<u8> {
    let mut container = Vec::new();
    for run in runs {
        container.extend(field_bytes(3, &field_bytes(2, run.as_bytes())));
    }
    field_bytes(2, &container)
}

#[allow(dead_code)]
pub fn gzip(data: &[u8]) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}
