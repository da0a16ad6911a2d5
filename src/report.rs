//! Report rendering
//!
//! Turns operation outcomes into the text printed by the CLI.

use std::fmt::Write;

use chrono::{DateTime, Local};

use crate::audit::TIMESTAMP_FORMAT;
use crate::manager::{Listing, Outcome};
use crate::record::Treasure;

const RULE_WIDTH: usize = 66;

/// Render any outcome, trailing newline included
pub fn render(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Added { .. } => "Treasure added successfully!\n".to_string(),
        Outcome::Listed(listing) => render_listing(listing),
        Outcome::NoTreasures { hunt } => {
            format!("Hunt {} does not exist or has no treasures.\n", hunt)
        }
        Outcome::Viewed(treasure) => render_treasure(treasure),
        Outcome::TreasureRemoved { id, .. } => format!("Treasure {} removed successfully!\n", id),
        Outcome::TreasureNotFound { hunt, id } => {
            format!("Treasure {} not found in hunt {}.\n", id, hunt)
        }
        Outcome::HuntRemoved { hunt } => format!("Hunt {} removed successfully!\n", hunt),
        Outcome::HuntNotFound { hunt } => format!("Hunt {} does not exist.\n", hunt),
    }
}

/// File details followed by one tab-separated row per treasure
pub fn render_listing(listing: &Listing) -> String {
    let modified: DateTime<Local> = listing.metadata.modified.into();

    let mut out = String::new();
    let _ = writeln!(out, "Hunt: {}", listing.hunt);
    let _ = writeln!(out, "Treasures file size: {} bytes", listing.metadata.size);
    let _ = writeln!(out, "Last modified: {}", modified.format(TIMESTAMP_FORMAT));
    out.push('\n');

    out.push_str("Treasures:\n");
    out.push_str("ID\tUser\t\tCoordinates\t\tValue\tClue\n");
    out.push_str(&"-".repeat(RULE_WIDTH));
    out.push('\n');

    for t in &listing.treasures {
        let _ = writeln!(
            out,
            "{}\t{:<10}\t({:.6}, {:.6})\t{}\t{}",
            t.id, t.owner, t.latitude, t.longitude, t.value, t.clue
        );
    }

    out
}

/// All fields of a single treasure, one per line
pub fn render_treasure(t: &Treasure) -> String {
    format!(
        "Treasure ID: {}\nUser: {}\nCoordinates: ({:.6}, {:.6})\nValue: {}\nClue: {}\n",
        t.id, t.owner, t.latitude, t.longitude, t.value, t.clue
    )
}
