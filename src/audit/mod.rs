//! Audit Log Module
//!
//! Append-only text history of the operations run against a hunt.
//!
//! ## Responsibilities
//! - Append one `[timestamp] description` line per operation
//! - Refresh the `logged_hunt-<hunt>` symlink after every append
//!
//! ## Layout
//! ```text
//! {base_dir}/
//!   ├── {hunt}/logged_hunt        [2026-10-18 09:15:02] Added treasure 1 by ann
//!   └── logged_hunt-{hunt}  ───►  {hunt}/logged_hunt
//! ```
//!
//! The link target is relative to the link's own directory and is never
//! canonicalized.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use crate::config::Config;
use crate::error::{Result, StepContext};
use crate::store::append_options;

/// Timestamp format used in log lines and listings
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Audit log of a single hunt
#[derive(Debug, Clone)]
pub struct AuditLog {
    /// `<base>/<hunt>/logged_hunt`
    log_path: PathBuf,
    /// `<base>/logged_hunt-<hunt>`
    link_path: PathBuf,
    /// What the link points at: `<hunt>/logged_hunt`
    link_target: PathBuf,
    file_mode: u32,
}

impl AuditLog {
    pub const FILENAME: &'static str = "logged_hunt";
    pub const LINK_PREFIX: &'static str = "logged_hunt-";

    pub fn new(hunt_id: &str, config: &Config) -> Self {
        let link_target = Path::new(hunt_id).join(Self::FILENAME);
        Self {
            log_path: config.base_dir.join(&link_target),
            link_path: config
                .base_dir
                .join(format!("{}{}", Self::LINK_PREFIX, hunt_id)),
            link_target,
            file_mode: config.file_mode,
        }
    }

    /// Append a line stamped with the current local time, then refresh the link
    pub fn append(&self, description: &str) -> Result<()> {
        let line = Self::format_entry(Local::now(), description);

        let mut file = append_options(self.file_mode)
            .open(&self.log_path)
            .step("Failed to open log file")?;
        file.write_all(line.as_bytes())
            .step("Failed to write log entry")?;
        drop(file);

        tracing::debug!(log = %self.log_path.display(), "{}", description);

        self.refresh_link()
    }

    /// Replace the link with a fresh one pointing at the log file
    ///
    /// A missing link is fine; any other failure is an error.
    pub fn refresh_link(&self) -> Result<()> {
        match fs::remove_file(&self.link_path) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(e).step("Failed to remove symbolic link"),
        }

        symlink(&self.link_target, &self.link_path).step("Failed to create symbolic link")
    }

    /// Render one log line, newline included
    pub fn format_entry(timestamp: DateTime<Local>, description: &str) -> String {
        format!("[{}] {}\n", timestamp.format(TIMESTAMP_FORMAT), description)
    }

    /// Path of the log file
    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    /// Path of the external symlink
    pub fn link_path(&self) -> &Path {
        &self.link_path
    }

    /// Target stored in the symlink
    pub fn link_target(&self) -> &Path {
        &self.link_target
    }
}

#[cfg(unix)]
fn symlink(target: &Path, link: &Path) -> std::io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(windows)]
fn symlink(target: &Path, link: &Path) -> std::io::Result<()> {
    std::os::windows::fs::symlink_file(target, link)
}

// =============================================================================
// Unit Tests
// =============================================================================
