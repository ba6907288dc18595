//! Conversion configuration with documented constants
//!
//! Every tunable the engine consults lives here. Values default to the
//! campaign rules of the list-building service and can be overridden from a
//! TOML file.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{MusterError, Result};

/// Configuration for a conversion run
///
/// Passed explicitly to [`crate::convert::convert`]; the engine never reads
/// configuration from global state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionConfig {
    // === CAMPAIGN COSTS ===
    /// Experience points needed for one campaign level
    ///
    /// Level is `xp / xp_per_level`, rounded down.
    pub xp_per_level: u32,

    /// Point cost per campaign level for units with the hero rule
    pub hero_level_cost: u32,

    /// Point cost per campaign level for every other unit
    pub unit_level_cost: u32,

    // === VALIDATION ===
    /// Allowed absolute difference between declared and calculated list points
    ///
    /// Costs are whole points, so the default accepts only an exact match.
    pub points_tolerance: u32,

    /// Army points per command point
    ///
    /// An army always has at least one command point.
    pub points_per_command_point: u32,

    // === MERGING ===
    /// Fold combined squads into a single unit
    pub allow_combined: bool,

    /// Attach joined heroes to their target unit
    pub allow_joined: bool,

    /// Use the list's custom names for display and single-model naming
    pub preserve_custom_names: bool,

    // === RULE VOCABULARY ===
    /// Rule whose rating sets model toughness
    pub tough_rule_name: String,

    /// Rule that marks a unit as a hero
    pub hero_rule_name: String,

    /// Rule that marks a unit as a caster; its rating is the caster rating
    pub caster_rule_name: String,

    /// Item content rule that improves quality by its rating
    pub quality_rule_name: String,

    /// Item content rule that improves defense by its rating
    pub defense_rule_name: String,

    /// Weapon special rule whose rating is armor piercing
    pub ap_rule_name: String,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            // 5 XP per level; heroes pay more per level
            xp_per_level: 5,
            hero_level_cost: 55,
            unit_level_cost: 25,

            points_tolerance: 0,
            points_per_command_point: 100,

            allow_combined: true,
            allow_joined: true,
            preserve_custom_names: true,

            tough_rule_name: "Tough".into(),
            hero_rule_name: "Hero".into(),
            caster_rule_name: "Caster".into(),
            quality_rule_name: "Quality".into(),
            defense_rule_name: "Defense".into(),
            ap_rule_name: "AP".into(),
        }
    }
}

impl ConversionConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML; missing keys keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: ConversionConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.xp_per_level == 0 {
            return Err(MusterError::InvalidConfig(
                "xp_per_level must be positive".into(),
            ));
        }

        if self.points_per_command_point == 0 {
            return Err(MusterError::InvalidConfig(
                "points_per_command_point must be positive".into(),
            ));
        }

        if self.tough_rule_name.trim().is_empty() || self.hero_rule_name.trim().is_empty() {
            return Err(MusterError::InvalidConfig(
                "rule names must not be empty".into(),
            ));
        }

        Ok(())
    }

    /// Point cost of one campaign level
    pub fn level_cost(&self, is_hero: bool) -> u32 {
        if is_hero {
            self.hero_level_cost
        } else {
            self.unit_level_cost
        }
    }
}

/// Load a conversion config from a TOML file
pub fn load_config(path: &Path) -> Result<ConversionConfig> {
    let content = fs::read_to_string(path)?;
    ConversionConfig::from_toml_str(&content)
}
