//! Load rosters exported by the list builder

use std::fs;
use std::path::Path;

use crate::core::error::Result;
use crate::roster::army_list::{RawRoster, RosterEntry};

/// Parse a roster from the list builder's JSON export
pub fn parse_roster(content: &str) -> Result<RawRoster> {
    let roster: RawRoster = serde_json::from_str(content)?;

    let malformed = roster
        .units
        .iter()
        .filter(|e| matches!(e, RosterEntry::Malformed { .. }))
        .count();
    if malformed > 0 {
        tracing::warn!(
            roster = %roster.id,
            malformed,
            "Roster contains units that could not be read"
        );
    }

    Ok(roster)
}

/// Load a roster from a JSON file
pub fn load_roster(path: &Path) -> Result<RawRoster> {
    let content = fs::read_to_string(path)?;
    parse_roster(&content)
}
