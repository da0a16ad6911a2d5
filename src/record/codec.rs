//! Record codec
//!
//! Encoding and decoding of the fixed-width record layout.

use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::config::TextPolicy;
use crate::error::{Result, TreasureError};

use super::{
    Treasure, CLUE_CAPACITY, CLUE_OFFSET, ID_OFFSET, LATITUDE_OFFSET, LONGITUDE_OFFSET,
    OWNER_CAPACITY, OWNER_OFFSET, RECORD_SIZE, VALUE_OFFSET,
};

// =============================================================================
// Encoding
// =============================================================================

/// The treasure exactly as `encode` will store it
///
/// Text is cut at an embedded NUL and at the field capacity, or rejected,
/// according to `policy`.
pub fn fit(treasure: &Treasure, policy: TextPolicy) -> Result<Treasure> {
    let owner = fit_text("owner", &treasure.owner, OWNER_CAPACITY, policy)?;
    let clue = fit_text("clue", &treasure.clue, CLUE_CAPACITY, policy)?;

    Ok(Treasure {
        owner: owner.to_string(),
        clue: clue.to_string(),
        ..treasure.clone()
    })
}

/// Encode a treasure into exactly `RECORD_SIZE` bytes
///
/// Text is fitted to its field first, see [`fit`].
pub fn encode(treasure: &Treasure, policy: TextPolicy) -> Result<Bytes> {
    let owner = fit_text("owner", &treasure.owner, OWNER_CAPACITY, policy)?;
    let clue = fit_text("clue", &treasure.clue, CLUE_CAPACITY, policy)?;

    let mut buf = BytesMut::with_capacity(RECORD_SIZE);

    buf.put_i32_le(treasure.id);
    put_text(&mut buf, owner.as_bytes(), OWNER_CAPACITY);
    pad_to(&mut buf, LATITUDE_OFFSET);
    buf.put_f64_le(treasure.latitude);
    buf.put_f64_le(treasure.longitude);
    put_text(&mut buf, clue.as_bytes(), CLUE_CAPACITY);
    buf.put_i32_le(treasure.value);
    pad_to(&mut buf, RECORD_SIZE);

    debug_assert_eq!(buf.len(), RECORD_SIZE);
    Ok(buf.freeze())
}

/// Apply the text policy, returning the text that will be stored
///
/// A NUL would end the field early on read, so it counts as the end of the
/// text (`Truncate`) or as invalid text (`Reject`).
fn fit_text<'a>(
    field: &'static str,
    text: &'a str,
    capacity: usize,
    policy: TextPolicy,
) -> Result<&'a str> {
    let text = match (text.find('\0'), policy) {
        (None, _) => text,
        (Some(offset), TextPolicy::Reject) => {
            return Err(TreasureError::EmbeddedNul { field, offset });
        }
        (Some(offset), TextPolicy::Truncate) => {
            tracing::debug!(field, offset, "Cutting text field at embedded NUL");
            &text[..offset]
        }
    };

    let max = capacity - 1;
    if text.len() <= max {
        return Ok(text);
    }

    match policy {
        TextPolicy::Reject => Err(TreasureError::FieldTooLong {
            field,
            len: text.len(),
            max,
        }),
        TextPolicy::Truncate => {
            let mut end = max;
            while !text.is_char_boundary(end) {
                end -= 1;
            }
            tracing::debug!(field, from = text.len(), to = end, "Truncating text field");
            Ok(&text[..end])
        }
    }
}

/// Write text followed by zero padding up to the field width
fn put_text(buf: &mut BytesMut, text: &[u8], capacity: usize) {
    buf.put_slice(text);
    buf.put_bytes(0, capacity - text.len());
}

fn pad_to(buf: &mut BytesMut, offset: usize) {
    buf.put_bytes(0, offset - buf.len());
}

// =============================================================================
// Decoding
// =============================================================================

/// Decode one record
///
/// Text stops at the first NUL; bytes after it are ignored. Invalid UTF-8 is
/// replaced rather than rejected.
pub fn decode(chunk: &[u8; RECORD_SIZE]) -> Treasure {
    Treasure {
        id: (&chunk[ID_OFFSET..]).get_i32_le(),
        owner: get_text(&chunk[OWNER_OFFSET..OWNER_OFFSET + OWNER_CAPACITY]),
        latitude: (&chunk[LATITUDE_OFFSET..]).get_f64_le(),
        longitude: (&chunk[LONGITUDE_OFFSET..]).get_f64_le(),
        clue: get_text(&chunk[CLUE_OFFSET..CLUE_OFFSET + CLUE_CAPACITY]),
        value: (&chunk[VALUE_OFFSET..]).get_i32_le(),
    }
}

fn get_text(field: &[u8]) -> String {
    let end = field.iter().position(|&b| b == 0).unwrap_or(field.len());
    String::from_utf8_lossy(&field[..end]).into_owned()
}

// =============================================================================
// Unit Tests
// =============================================================================
