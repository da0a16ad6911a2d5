//! Configuration for the treasure manager
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

use crate::error::{Result, TreasureError};

/// Main configuration for a treasure manager instance
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// Directory that holds every hunt directory and the log links
    /// Internal structure:
    ///   {base_dir}/
    ///     ├── {hunt}/
    ///     │     ├── treasures      (fixed-width records)
    ///     │     └── logged_hunt    (audit log)
    ///     └── logged_hunt-{hunt}   (symlink to the audit log)
    pub base_dir: PathBuf,

    /// Permission bits for newly created hunt directories (unix only)
    pub dir_mode: u32,

    /// Permission bits for newly created record and log files (unix only)
    pub file_mode: u32,

    // -------------------------------------------------------------------------
    // Record Configuration
    // -------------------------------------------------------------------------
    /// What to do with text longer than its fixed field
    pub text_policy: TextPolicy,
}

/// Handling of owner/clue text that does not fit its fixed-width field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextPolicy {
    /// Cut the text at the last UTF-8 boundary that fits
    #[default]
    Truncate,

    /// Fail the encode with `FieldTooLong`
    Reject,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("."),
            dir_mode: 0o700,
            file_mode: 0o600,
            text_policy: TextPolicy::Truncate,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Check that the configuration can be used
    pub fn validate(&self) -> Result<()> {
        if self.base_dir.as_os_str().is_empty() {
            return Err(TreasureError::Config("base directory is empty".to_string()));
        }
        if self.dir_mode & 0o700 != 0o700 {
            return Err(TreasureError::Config(format!(
                "directory mode {:o} must grant the owner rwx",
                self.dir_mode
            )));
        }
        if self.file_mode & 0o600 != 0o600 {
            return Err(TreasureError::Config(format!(
                "file mode {:o} must grant the owner rw",
                self.file_mode
            )));
        }
        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the base directory (parent of all hunts)
    pub fn base_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.base_dir = path.into();
        self
    }

    /// Set the mode for new hunt directories
    pub fn dir_mode(mut self, mode: u32) -> Self {
        self.config.dir_mode = mode;
        self
    }

    /// Set the mode for new record and log files
    pub fn file_mode(mut self, mode: u32) -> Self {
        self.config.file_mode = mode;
        self
    }

    /// Set the oversized-text policy
    pub fn text_policy(mut self, policy: TextPolicy) -> Self {
        self.config.text_policy = policy;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
