//! Hunt Module
//!
//! Lifecycle of a hunt directory and the artifacts that belong to it.
//!
//! ## State Machine
//! ```text
//!  nonexistent ──ensure_directory──► existing ──remove──► nonexistent
//!                                     │    ▲
//!                                     └────┘ add / list / view / remove treasure
//! ```

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::audit::AuditLog;
use crate::config::Config;
use crate::error::{Result, StepContext};
use crate::store::RecordStore;

/// A named hunt under the base directory
///
/// The identifier is used verbatim as a directory name.
#[derive(Debug, Clone)]
pub struct Hunt {
    id: String,
    dir: PathBuf,
    dir_mode: u32,
    store: RecordStore,
    audit: AuditLog,
}

impl Hunt {
    pub fn new(id: &str, config: &Config) -> Self {
        let dir = config.base_dir.join(id);
        Self {
            id: id.to_string(),
            store: RecordStore::new(&dir, config),
            audit: AuditLog::new(id, config),
            dir,
            dir_mode: config.dir_mode,
        }
    }

    /// Create the hunt directory if it is missing
    ///
    /// Idempotent: an existing directory and its contents are left alone.
    pub fn ensure_directory(&self) -> Result<()> {
        if self.dir.exists() {
            return Ok(());
        }

        create_dir(&self.dir, self.dir_mode).step("Failed to create hunt directory")?;
        tracing::info!(hunt = %self.id, dir = %self.dir.display(), "Created hunt directory");
        Ok(())
    }

    /// Delete the record file, the log, the link and finally the directory
    ///
    /// The removal is logged first, so that entry disappears with the log
    /// file. Only the final directory removal can fail the operation.
    pub fn remove(&self) -> Result<()> {
        self.audit.append(&format!("Removing hunt {}", self.id))?;

        for path in [
            self.store.path(),
            self.audit.log_path(),
            self.audit.link_path(),
        ] {
            if let Err(e) = fs::remove_file(path) {
                if e.kind() != ErrorKind::NotFound {
                    tracing::warn!(path = %path.display(), "Could not remove hunt file: {}", e);
                }
            }
        }

        fs::remove_dir(&self.dir).step("Failed to remove hunt directory")?;

        tracing::info!(hunt = %self.id, "Removed hunt and its audit log");
        Ok(())
    }

    /// Whether the hunt directory exists
    pub fn exists(&self) -> bool {
        self.dir.is_dir()
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn audit(&self) -> &AuditLog {
        &self.audit
    }
}

#[cfg(unix)]
fn create_dir(path: &Path, mode: u32) -> std::io::Result<()> {
    use std::os::unix::fs::DirBuilderExt;
    fs::DirBuilder::new().mode(mode).create(path)
}

#[cfg(not(unix))]
fn create_dir(path: &Path, _mode: u32) -> std::io::Result<()> {
    fs::create_dir(path)
}
