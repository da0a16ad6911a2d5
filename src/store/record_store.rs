//! Record Store
//!
//! Appends, scans and rewrites the `treasures` file of one hunt.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::config::{Config, TextPolicy};
use crate::error::{Result, StepContext, TreasureError};
use crate::record::{self, Treasure, RECORD_SIZE};

use super::{append_options, create_options, RecordIter};

/// File statistics shown by listings
#[derive(Debug, Clone, Copy)]
pub struct StoreMetadata {
    /// Size of the record file in bytes
    pub size: u64,
    /// Last modification time
    pub modified: SystemTime,
}

/// Record file of a single hunt
#[derive(Debug, Clone)]
pub struct RecordStore {
    /// `<hunt_dir>/treasures`
    path: PathBuf,
    /// `<hunt_dir>/treasures.tmp`, only present during a rewrite
    temp_path: PathBuf,
    file_mode: u32,
    text_policy: TextPolicy,
}

impl RecordStore {
    // =========================================================================
    // Internal Path Constants
    // =========================================================================
    pub const FILENAME: &'static str = "treasures";
    pub const TEMP_FILENAME: &'static str = "treasures.tmp";

    /// Create a handle for the record file inside `hunt_dir`
    ///
    /// Nothing is touched on disk until an operation runs.
    pub fn new(hunt_dir: &Path, config: &Config) -> Self {
        Self {
            path: hunt_dir.join(Self::FILENAME),
            temp_path: hunt_dir.join(Self::TEMP_FILENAME),
            file_mode: config.file_mode,
            text_policy: config.text_policy,
        }
    }

    /// Append one record
    ///
    /// The encoding is handed to a single write call; anything short of
    /// `RECORD_SIZE` bytes is an error and is not repaired.
    pub fn append(&self, treasure: &Treasure) -> Result<()> {
        let encoded = record::encode(treasure, self.text_policy)?;

        let mut file = append_options(self.file_mode)
            .open(&self.path)
            .step("Failed to open treasures file")?;

        let written = file
            .write(&encoded)
            .step("Failed to write treasure to file")?;
        if written != RECORD_SIZE {
            return Err(TreasureError::ShortWrite {
                written,
                expected: RECORD_SIZE,
            });
        }

        tracing::debug!(path = %self.path.display(), id = treasure.id, "Appended record");
        Ok(())
    }

    /// Scan every record in file order
    ///
    /// Fails if the file cannot be opened, including when it does not exist.
    pub fn scan(&self) -> Result<RecordIter> {
        let file = File::open(&self.path).step("Failed to open treasures file")?;
        Ok(RecordIter::new(file))
    }

    /// First record whose identifier equals `id`
    pub fn find(&self, id: i32) -> Result<Option<Treasure>> {
        for treasure in self.scan()? {
            let treasure = treasure?;
            if treasure.id == id {
                return Ok(Some(treasure));
            }
        }
        Ok(None)
    }

    /// Rewrite the file without the records matching `predicate`
    ///
    /// Survivors are streamed, byte for byte, into `treasures.tmp`, which then
    /// replaces the original with one rename. When nothing matches, the temp
    /// file is discarded and the original is left untouched.
    ///
    /// Returns the number of records removed.
    pub fn remove_matching<F>(&self, mut predicate: F) -> Result<usize>
    where
        F: FnMut(&Treasure) -> bool,
    {
        let mut records = self.scan()?;

        let temp = create_options(self.file_mode)
            .open(&self.temp_path)
            .step("Failed to create temporary file")?;
        let mut writer = BufWriter::new(temp);

        let mut removed = 0;
        while let Some(chunk) = records.next_chunk()? {
            if predicate(&record::decode(&chunk)) {
                removed += 1;
                continue;
            }
            writer
                .write_all(&chunk)
                .step("Failed to write to temporary file")?;
        }

        let temp = writer
            .into_inner()
            .map_err(|e| e.into_error())
            .step("Failed to write to temporary file")?;
        temp.sync_all().step("Failed to write to temporary file")?;
        drop(temp);

        if removed == 0 {
            if let Err(e) = fs::remove_file(&self.temp_path) {
                tracing::warn!(path = %self.temp_path.display(), "Could not discard temp file: {}", e);
            }
            return Ok(0);
        }

        fs::rename(&self.temp_path, &self.path).step("Failed to replace treasures file")?;

        tracing::debug!(path = %self.path.display(), removed, "Rewrote record file");
        Ok(removed)
    }

    /// Remove every record with identifier `id`; true if any was removed
    pub fn remove(&self, id: i32) -> Result<bool> {
        Ok(self.remove_matching(|t| t.id == id)? > 0)
    }

    /// Size and modification time of the record file
    pub fn metadata(&self) -> Result<StoreMetadata> {
        let meta = fs::metadata(&self.path).step("Failed to get file information")?;
        let modified = meta.modified().step("Failed to get file information")?;
        Ok(StoreMetadata {
            size: meta.len(),
            modified,
        })
    }

    /// Whether the record file exists
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Path of the record file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path used while rewriting
    pub fn temp_path(&self) -> &Path {
        &self.temp_path
    }
}
