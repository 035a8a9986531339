//! Note body decoding
//!
//! The store keeps each note's body as a compressed blob of the host
//! application's undocumented CRDT record format. This module recovers the
//! plain text: decompress, walk the structured record path, fall back to a
//! raw printable-run scan when that path yields nothing, then sanitize.
//!
//! Decoding never fails. A blob this module cannot read — wrong compression,
//! truncated records, a future schema — degrades to an empty or partial
//! body so that one odd note cannot break reading the rest of the
//! collection.

mod extract;
mod scan;
#[cfg(test)]
pub(crate) mod testutil;
pub mod wire;

use std::io::Read;

use flate2::read::{GzDecoder, ZlibDecoder};

/// Decode a stored body blob to plain text
///
/// Always returns a string; empty means the blob carried no recoverable
/// text (for instance a drawing or table-only note).
pub fn decode_body(blob: &[u8]) -> String {
    let Some(plain) = decompress(blob) else {
        return String::new();
    };

    let mut text = extract::structured_text(&plain);
    if text.is_empty() {
        tracing::debug!(len = plain.len(), "structured parse empty, scanning raw bytes");
        text = scan::scan_text(&plain);
    }

    sanitize(&text)
}

/// Reverse the blob's generic compression
///
/// Tries gzip first, then a bare zlib stream. `None` is a policy result,
/// not an error: an unreadable blob may simply be a note type that carries
/// no appended text stream.
fn decompress(blob: &[u8]) -> Option<Vec<u8>> {
    let mut plain = Vec::new();
    if GzDecoder::new(blob).read_to_end(&mut plain).is_ok() {
        return Some(plain);
    }

    let mut plain = Vec::new();
    if ZlibDecoder::new(blob).read_to_end(&mut plain).is_ok() {
        return Some(plain);
    }

    None
}

/// Normalize whichever text the structured or fallback path produced
///
/// The Line Separator becomes a newline; the Object Replacement Character
/// marks embedded attachments and has no plain-text rendering, so it is
/// dropped.
fn sanitize(text: &str) -> String {
    text.replace('\u{2028}', "\n")
        .replace('\u{FFFC}', "")
        .trim()
        .to_string()
}
