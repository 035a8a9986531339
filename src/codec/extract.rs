//! Structured text extraction
//!
//! The text path through the record tree was reverse engineered, not read
//! from a schema: the root's field 2 holds the note data container, whose
//! field 3 holds one sub-message per paragraph or text run, whose field 2
//! holds the run's UTF-8 bytes. A schema revision in the host application
//! moves these constants and nothing else.

use crate::codec::wire;

/// Root field holding the note data container
const CONTAINER_FIELD: u64 = 2;
/// Container field holding one sub-message per paragraph/run
const RUN_FIELD: u64 = 3;
/// Run field holding the UTF-8 text payload
const TEXT_FIELD: u64 = 2;

/// Walk the fixed field path and join the recovered runs with newlines
///
/// Returns an empty string when the path is absent, which signals the
/// caller to fall back to the raw scanner. Individual runs that are not
/// valid UTF-8 are skipped without failing the rest of the note.
pub fn structured_text(data: &[u8]) -> String {
    let root = wire::parse(data);
    let Some(container) = root.first(CONTAINER_FIELD) else {
        return String::new();
    };

    let container = wire::parse(container);
    let runs: Vec<wire::ParsedMessage> = container
        .values(RUN_FIELD)
        .iter()
        .map(|run| wire::parse(run))
        .collect();

    let mut parts: Vec<&str> = Vec::new();
    for run in &runs {
        for text in run.values(TEXT_FIELD) {
            match std::str::from_utf8(text) {
                Ok(part) => parts.push(part),
                Err(_) => tracing::trace!(len = text.len(), "skipping non-UTF-8 text run"),
            }
        }
    }

    parts.join("\n")
}
