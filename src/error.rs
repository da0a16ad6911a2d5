//! Error types for the treasure manager
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using TreasureError
pub type Result<T> = std::result::Result<T, TreasureError>;

/// Unified error type for treasure manager operations
#[derive(Debug, Error)]
pub enum TreasureError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    /// A system call failed; `step` names what was being attempted
    #[error("{step}: {source}")]
    SystemCall {
        step: &'static str,
        #[source]
        source: std::io::Error,
    },

    // -------------------------------------------------------------------------
    // Record Store Errors
    // -------------------------------------------------------------------------
    #[error("Failed to write treasure to file: wrote {written} of {expected} bytes")]
    ShortWrite { written: usize, expected: usize },

    #[error("{field} is {len} bytes, at most {max} bytes fit in a record")]
    FieldTooLong {
        field: &'static str,
        len: usize,
        max: usize,
    },

    #[error("{field} contains a NUL byte at offset {offset}")]
    EmbeddedNul { field: &'static str, offset: usize },

    // -------------------------------------------------------------------------
    // Input Errors
    // -------------------------------------------------------------------------
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Attach the name of the failed step to an I/O result
pub(crate) trait StepContext<T> {
    fn step(self, step: &'static str) -> Result<T>;
}

impl<T> StepContext<T> for std::result::Result<T, std::io::Error> {
    fn step(self, step: &'static str) -> Result<T> {
        self.map_err(|source| TreasureError::SystemCall { step, source })
    }
}
