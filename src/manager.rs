//! Manager Module
//!
//! Coordinates one operation across the hunt components.
//!
//! ## Responsibilities
//! - Make sure the hunt directory exists before adding
//! - Run the record store operation
//! - Write the audit entry (which refreshes the log link)

use crate::config::Config;
use crate::error::Result;
use crate::hunt::Hunt;
use crate::record::{self, Treasure};
use crate::store::StoreMetadata;

/// An operation requested by the user
#[derive(Debug, Clone)]
pub enum Operation {
    /// Append a treasure, creating the hunt if needed
    Add { hunt: String, treasure: Treasure },

    /// Show every treasure of a hunt
    List { hunt: String },

    /// Show one treasure by identifier
    View { hunt: String, id: i32 },

    /// Delete a treasure by identifier
    RemoveTreasure { hunt: String, id: i32 },

    /// Delete the whole hunt
    RemoveHunt { hunt: String },
}

/// What an operation produced
///
/// Not-found results are outcomes, not errors.
#[derive(Debug, Clone)]
pub enum Outcome {
    Added { hunt: String, id: i32 },
    Listed(Listing),
    NoTreasures { hunt: String },
    Viewed(Treasure),
    TreasureRemoved { hunt: String, id: i32 },
    TreasureNotFound { hunt: String, id: i32 },
    HuntRemoved { hunt: String },
    HuntNotFound { hunt: String },
}

/// Contents of a hunt as shown by `--list`
#[derive(Debug, Clone)]
pub struct Listing {
    pub hunt: String,
    pub metadata: StoreMetadata,
    pub treasures: Vec<Treasure>,
}

/// Entry point for all hunt operations
pub struct TreasureManager {
    config: Config,
}

impl TreasureManager {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Execute an operation
    ///
    /// Routes operations to the matching method
    pub fn execute(&self, operation: Operation) -> Result<Outcome> {
        match operation {
            Operation::Add { hunt, treasure } => {
                self.add(&hunt, &treasure)?;
                Ok(Outcome::Added { hunt, id: treasure.id })
            }
            Operation::List { hunt } => Ok(match self.list(&hunt)? {
                Some(listing) => Outcome::Listed(listing),
                None => Outcome::NoTreasures { hunt },
            }),
            Operation::View { hunt, id } => Ok(match self.view(&hunt, id)? {
                Some(treasure) => Outcome::Viewed(treasure),
                None => Outcome::TreasureNotFound { hunt, id },
            }),
            Operation::RemoveTreasure { hunt, id } => Ok(if self.remove_treasure(&hunt, id)? {
                Outcome::TreasureRemoved { hunt, id }
            } else {
                Outcome::TreasureNotFound { hunt, id }
            }),
            Operation::RemoveHunt { hunt } => Ok(if self.remove_hunt(&hunt)? {
                Outcome::HuntRemoved { hunt }
            } else {
                Outcome::HuntNotFound { hunt }
            }),
        }
    }

    /// Add a treasure to a hunt
    ///
    /// Steps:
    /// 1. Create the hunt directory if missing
    /// 2. Append the record
    /// 3. Log `Added treasure <id> by <owner>`, with the owner as stored
    pub fn add(&self, hunt_id: &str, treasure: &Treasure) -> Result<()> {
        let hunt = self.hunt(hunt_id);
        let stored = record::fit(treasure, self.config.text_policy)?;

        hunt.ensure_directory()?;
        hunt.store().append(&stored)?;
        hunt.audit()
            .append(&format!("Added treasure {} by {}", stored.id, stored.owner))?;

        tracing::info!(hunt = hunt_id, id = treasure.id, "Treasure added");
        Ok(())
    }

    /// List a hunt; `None` when it has no record file
    pub fn list(&self, hunt_id: &str) -> Result<Option<Listing>> {
        let hunt = self.hunt(hunt_id);
        let store = hunt.store();

        if !store.exists() {
            return Ok(None);
        }

        let metadata = store.metadata()?;
        let treasures = store.scan()?.collect::<Result<Vec<_>>>()?;

        hunt.audit()
            .append(&format!("Listed treasures for hunt {}", hunt_id))?;

        Ok(Some(Listing {
            hunt: hunt_id.to_string(),
            metadata,
            treasures,
        }))
    }

    /// Find a treasure by identifier
    ///
    /// Only a successful lookup is logged. A hunt without a record file has
    /// no treasures to find.
    pub fn view(&self, hunt_id: &str, id: i32) -> Result<Option<Treasure>> {
        let hunt = self.hunt(hunt_id);

        if !hunt.store().exists() {
            return Ok(None);
        }

        let found = hunt.store().find(id)?;
        if found.is_some() {
            hunt.audit()
                .append(&format!("Viewed treasure {} in hunt {}", id, hunt_id))?;
        }

        Ok(found)
    }

    /// Remove a treasure by identifier; false if there was none
    pub fn remove_treasure(&self, hunt_id: &str, id: i32) -> Result<bool> {
        let hunt = self.hunt(hunt_id);

        if !hunt.store().exists() {
            return Ok(false);
        }

        if !hunt.store().remove(id)? {
            return Ok(false);
        }

        hunt.audit()
            .append(&format!("Removed treasure {} from hunt {}", id, hunt_id))?;

        tracing::info!(hunt = hunt_id, id, "Treasure removed");
        Ok(true)
    }

    /// Remove a hunt and all of its artifacts; false if it does not exist
    pub fn remove_hunt(&self, hunt_id: &str) -> Result<bool> {
        let hunt = self.hunt(hunt_id);

        if !hunt.exists() {
            return Ok(false);
        }

        hunt.remove()?;
        Ok(true)
    }

    /// Handle for a hunt under the configured base directory
    pub fn hunt(&self, hunt_id: &str) -> Hunt {
        Hunt::new(hunt_id, &self.config)
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}
