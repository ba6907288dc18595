//! Core type definitions used throughout the codebase

use std::fmt;

use serde::{Deserialize, Serialize};

/// A rule rating or attack value as authored by the list builder
///
/// The list builder emits these either as JSON numbers or as strings
/// (`"2"`, `"+1"`, `"D3"`), so both forms are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Rating {
    Number(i64),
    Text(String),
}

impl Rating {
    /// Numeric value, if the rating is a non-negative whole number
    pub fn value(&self) -> Option<u32> {
        match self {
            Rating::Number(n) => u32::try_from(*n).ok(),
            Rating::Text(s) => s.trim().trim_start_matches('+').parse().ok(),
        }
    }
}

impl Default for Rating {
    fn default() -> Self {
        Rating::Number(0)
    }
}

impl From<u32> for Rating {
    fn from(value: u32) -> Self {
        Rating::Number(i64::from(value))
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rating::Number(n) => write!(f, "{}", n),
            Rating::Text(s) => f.write_str(s),
        }
    }
}

/// Campaign level reached with the given experience
pub fn campaign_level(xp: u32, xp_per_level: u32) -> u32 {
    if xp_per_level == 0 {
        return 0;
    }
    xp / xp_per_level
}
