//! # Treasure Manager
//!
//! A record manager for treasure hunts:
//! - Fixed-width binary records in a flat per-hunt file
//! - Filter-and-rename deletion with all-or-nothing visibility
//! - Append-only audit log with a maintained symlink
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        CLI binary                            │
//! │             (--add / --list / --view / --remove_*)           │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                   TreasureManager                            │
//! └──────┬──────────────────────┬─────────────────────┬─────────┘
//!        │                      │                     │
//!        ▼                      ▼                     ▼
//!  ┌───────────┐         ┌─────────────┐       ┌─────────────┐
//!  │   Hunt    │         │ RecordStore │       │  AuditLog   │
//!  │ (mkdir,   │         │ (treasures) │       │(logged_hunt │
//!  │  rmdir)   │         │             │       │  + symlink) │
//!  └───────────┘         └─────────────┘       └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod record;
pub mod store;
pub mod audit;
pub mod hunt;
pub mod manager;
pub mod report;
pub mod prompt;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{TreasureError, Result};
pub use config::{Config, TextPolicy};
pub use record::Treasure;
pub use manager::TreasureManager;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of the treasure manager
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
