//! Record Module
//!
//! The treasure record and its fixed-width binary encoding.
//!
//! ## Record Format (336 bytes, little-endian)
//! ```text
//! ┌────────┬──────────────┬─────┬──────────┬───────────┬───────────────┬───────────┬─────┐
//! │ ID (4) │  Owner (50)  │ (2) │ Lat (8)  │  Lon (8)  │  Clue (256)   │ Value (4) │ (4) │
//! └────────┴──────────────┴─────┴──────────┴───────────┴───────────────┴───────────┴─────┘
//!   0        4              54    56         64          72              328         332
//! ```
//!
//! - Integers are `i32`, coordinates are IEEE-754 `f64`.
//! - Text fields are NUL-terminated and zero padded; at most `capacity - 1`
//!   content bytes are stored so the terminator always fits.
//! - Padding bytes are written as zero and ignored on read.
//!
//! This matches the natural layout of the record on 64-bit little-endian
//! hosts, so existing `treasures` files stay readable.

mod codec;

pub use codec::{decode, encode, fit};

// =============================================================================
// Layout Constants
// =============================================================================

/// Size of one encoded record
pub const RECORD_SIZE: usize = 336;

/// Width of the owner field, terminator included
pub const OWNER_CAPACITY: usize = 50;

/// Width of the clue field, terminator included
pub const CLUE_CAPACITY: usize = 256;

pub(crate) const ID_OFFSET: usize = 0;
pub(crate) const OWNER_OFFSET: usize = 4;
pub(crate) const LATITUDE_OFFSET: usize = 56;
pub(crate) const LONGITUDE_OFFSET: usize = 64;
pub(crate) const CLUE_OFFSET: usize = 72;
pub(crate) const VALUE_OFFSET: usize = 328;

// =============================================================================
// Treasure
// =============================================================================

/// A single treasure entry
#[derive(Debug, Clone, PartialEq)]
pub struct Treasure {
    /// Identifier, meant to be unique within a hunt (not enforced)
    pub id: i32,

    /// Name of the user who hid the treasure
    pub owner: String,

    pub latitude: f64,
    pub longitude: f64,

    /// Free-text hint
    pub clue: String,

    pub value: i32,
}

impl Treasure {
    pub fn new(
        id: i32,
        owner: impl Into<String>,
        latitude: f64,
        longitude: f64,
        clue: impl Into<String>,
        value: i32,
    ) -> Self {
        Self {
            id,
            owner: owner.into(),
            latitude,
            longitude,
            clue: clue.into(),
            value,
        }
    }
}
