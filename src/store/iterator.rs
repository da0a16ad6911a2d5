//! Record Iterator
//!
//! Sequential iteration over the records of a `treasures` file.

use std::fs::File;
use std::io::{BufReader, ErrorKind, Read};

use crate::error::{Result, StepContext};
use crate::record::{self, Treasure, RECORD_SIZE};

/// Lazy iterator over records, in file order
///
/// Reads `RECORD_SIZE` chunks until a read comes up short. A short tail is
/// the clean end of the stream, not an error. Restart by opening a new one.
pub struct RecordIter {
    reader: BufReader<File>,
    /// Set once the end (or an error) has been reached
    finished: bool,
}

impl RecordIter {
    pub(super) fn new(file: File) -> Self {
        Self {
            reader: BufReader::new(file),
            finished: false,
        }
    }

    /// Read the next raw record, exactly as stored
    pub fn next_chunk(&mut self) -> Result<Option<[u8; RECORD_SIZE]>> {
        if self.finished {
            return Ok(None);
        }

        let mut chunk = [0u8; RECORD_SIZE];
        let filled = match read_full(&mut self.reader, &mut chunk) {
            Ok(n) => n,
            Err(e) => {
                self.finished = true;
                return Err(e).step("Failed to read treasures file");
            }
        };

        if filled < RECORD_SIZE {
            if filled > 0 {
                tracing::debug!(bytes = filled, "Ignoring partial record at end of file");
            }
            self.finished = true;
            return Ok(None);
        }

        Ok(Some(chunk))
    }
}

impl Iterator for RecordIter {
    type Item = Result<Treasure>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_chunk() {
            Ok(Some(chunk)) => Some(Ok(record::decode(&chunk))),
            Ok(None) => None,
            Err(e) => Some(Err(e)),
        }
    }
}

/// Fill `buf` as far as the reader allows, returning the byte count
fn read_full(reader: &mut impl Read, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
