//! Schema-less reader for the note data's tagged/varint wire format
//!
//! The host application stores note bodies in an undocumented, CRDT-oriented
//! record encoding. There is no schema to compile against, so this reader
//! recovers only the generic shape: a mapping from field number to the raw
//! length-delimited values observed for it, in parse order. Length-delimited
//! values that are themselves sub-messages are re-fed to [`parse`] by the
//! caller.
//!
//! Parsing never fails. Truncated varints, lengths that overrun the buffer
//! and unrecognized wire kinds all stop the pass at that point and return
//! whatever was recovered before it.

use std::collections::HashMap;

/// Wire kind, the low 3 bits of each entry's tag varint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WireKind {
    /// Single varint value
    Varint,
    /// Fixed 8-byte value
    Fixed64,
    /// Length-prefixed byte run: string, bytes, or sub-message
    LengthDelimited,
    /// Fixed 4-byte value
    Fixed32,
}

impl WireKind {
    fn from_tag(tag: u64) -> Option<Self> {
        match tag & 0x07 {
            0 => Some(WireKind::Varint),
            1 => Some(WireKind::Fixed64),
            2 => Some(WireKind::LengthDelimited),
            5 => Some(WireKind::Fixed32),
            _ => None,
        }
    }
}

/// Result of one parsing pass over a buffer
///
/// Holds each field number's length-delimited values in the order they were
/// observed. Varint and fixed-width values are skipped during parsing; the
/// note text path never needs them.
#[derive(Debug, Clone, Default)]
pub struct ParsedMessage {
    fields: HashMap<u64, Vec<Vec<u8>>>,
    truncated: bool,
}

impl ParsedMessage {
    /// All values observed for a field number, in parse order
    pub fn values(&self, field: u64) -> &[Vec<u8>] {
        self.fields.get(&field).map(Vec::as_slice).unwrap_or(&[])
    }

    /// First value observed for a field number
    pub fn first(&self, field: u64) -> Option<&[u8]> {
        self.values(field).first().map(Vec::as_slice)
    }

    pub fn has(&self, field: u64) -> bool {
        self.fields.contains_key(&field)
    }

    /// True when the pass stopped before consuming the whole buffer
    pub fn truncated(&self) -> bool {
        self.truncated
    }
}

/// Read one varint starting at `pos`
///
/// Returns the decoded value and the position after it, or `None` when the
/// buffer ends while the continuation bit is still set. Payload bits beyond
/// the 64th are discarded; the values read here are tags and lengths, and an
/// over-long encoding of either already means the buffer is not trustworthy.
fn read_varint(data: &[u8], mut pos: usize) -> Option<(u64, usize)> {
    let mut result: u64 = 0;
    let mut shift: u32 = 0;

    loop {
        let byte = *data.get(pos)?;
        pos += 1;
        if shift < u64::BITS {
            result |= u64::from(byte & 0x7f) << shift;
        }
        if byte & 0x80 == 0 {
            return Some((result, pos));
        }
        shift = shift.saturating_add(7);
    }
}

/// Parse one message's worth of buffer into a [`ParsedMessage`]
pub fn parse(data: &[u8]) -> ParsedMessage {
    let mut message = ParsedMessage::default();
    let mut pos = 0;

    while pos < data.len() {
        let Some((tag, next)) = read_varint(data, pos) else {
            message.truncated = true;
            break;
        };
        pos = next;
        let field = tag >> 3;

        match WireKind::from_tag(tag) {
            Some(WireKind::Varint) => {
                let Some((_, next)) = read_varint(data, pos) else {
                    message.truncated = true;
                    break;
                };
                pos = next;
            }
            Some(WireKind::Fixed64) => {
                if data.len() - pos < 8 {
                    message.truncated = true;
                    break;
                }
                pos += 8;
            }
            Some(WireKind::Fixed32) => {
                if data.len() - pos < 4 {
                    message.truncated = true;
                    break;
                }
                pos += 4;
            }
            Some(WireKind::LengthDelimited) => {
                let Some((length, next)) = read_varint(data, pos) else {
                    message.truncated = true;
                    break;
                };
                pos = next;
                if length > (data.len() - pos) as u64 {
                    message.truncated = true;
                    break;
                }
                let end = pos + length as usize;
                message
                    .fields
                    .entry(field)
                    .or_default()
                    .push(data[pos..end].to_vec());
                pos = end;
            }
            None => {
                message.truncated = true;
                break;
            }
        }
    }

    message
}
