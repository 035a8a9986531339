//! Fallback text scanner
//!
//! Last resort for blobs the structured path cannot interpret: styled text
//! variants, embedded metadata, newer schema revisions. Decodes the whole
//! buffer lossily and keeps maximal runs of characters that look like
//! prose. Lossy on purpose; recovering fragments beats dropping the note.

use regex::Regex;
use std::sync::OnceLock;

/// Runs of at least four word, whitespace, common-punctuation, or
/// non-Latin-1 characters
static PRINTABLE_RUNS: OnceLock<Regex> = OnceLock::new();

fn printable_runs() -> &'static Regex {
    PRINTABLE_RUNS.get_or_init(|| {
        Regex::new(r#"[-\w\s.,;:!?'"()\x{00C0}-\x{10FFFF}]{4,}"#).unwrap()
    })
}

/// Extract readable fragments from raw decompressed bytes
pub fn scan_text(data: &[u8]) -> String {
    let lossy = String::from_utf8_lossy(data);
    let parts: Vec<&str> = printable_runs()
        .find_iter(&lossy)
        .map(|m| m.as_str())
        .collect();
    parts.join(" ")
}
