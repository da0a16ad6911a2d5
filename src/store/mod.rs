//! Store Module
//!
//! Persistent record storage for one hunt.
//!
//! ## Responsibilities
//! - Append fixed-width records to `<hunt>/treasures`
//! - Sequential scans that stop at the first short chunk
//! - Filter-and-rename deletion (`treasures.tmp` → `treasures`)
//!
//! ## File Format
//! ```text
//! ┌────────────────────────┐
//! │ Record 1 (336 bytes)   │
//! ├────────────────────────┤
//! │ Record 2 (336 bytes)   │
//! ├────────────────────────┤
//! │ ...                    │
//! ├────────────────────────┤
//! │ partial tail (ignored) │
//! └────────────────────────┘
//! ```
//!
//! There are no headers, delimiters or checksums; see [`crate::record`] for
//! the record layout.

mod iterator;
mod record_store;

use std::fs::OpenOptions;

pub use iterator::RecordIter;
pub use record_store::{RecordStore, StoreMetadata};

/// Options for opening a file in append mode, creating it with `mode`
pub(crate) fn append_options(mode: u32) -> OpenOptions {
    let mut options = OpenOptions::new();
    options.append(true).create(true);
    set_mode(&mut options, mode);
    options
}

/// Options for creating (or truncating) a file for writing with `mode`
pub(crate) fn create_options(mode: u32) -> OpenOptions {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    set_mode(&mut options, mode);
    options
}

#[cfg(unix)]
fn set_mode(options: &mut OpenOptions, mode: u32) {
    use std::os::unix::fs::OpenOptionsExt;
    options.mode(mode);
}

#[cfg(not(unix))]
fn set_mode(_options: &mut OpenOptions, _mode: u32) {}
