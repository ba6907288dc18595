//! Raw units as authored by the list builder
//!
//! These types mirror the list builder's JSON and are never mutated by the
//! engine. Builder methods exist so fixtures and tools can assemble units
//! without going through JSON.

use serde::{Deserialize, Serialize};

use crate::core::types::Rating;
use crate::roster::upgrades::SelectedUpgrade;

fn default_count() -> u32 {
    1
}

fn default_true() -> bool {
    true
}

/// A named rule, optionally rated (`Tough(3)`, `AP(1)`, `Fearless`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRule {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub rating: Option<Rating>,
    #[serde(default)]
    pub label: String,
}

impl RawRule {
    /// An unrated rule
    pub fn named(name: &str) -> Self {
        Self {
            id: None,
            name: name.to_string(),
            rating: None,
            label: name.to_string(),
        }
    }

    /// A rule with a numeric rating
    pub fn rated(name: &str, rating: u32) -> Self {
        Self {
            id: None,
            name: name.to_string(),
            rating: Some(Rating::from(rating)),
            label: format!("{}({})", name, rating),
        }
    }

    pub fn rating_value(&self) -> Option<u32> {
        self.rating.as_ref().and_then(Rating::value)
    }
}

/// Link from a piece of equipment to an upgrade allowed to replace it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dependency {
    pub upgrade_instance_id: String,
    #[serde(default = "default_count")]
    pub count: u32,
    #[serde(default)]
    pub variant: Option<String>,
}

/// A weapon in a base loadout, an item's content, or an upgrade's gains
///
/// `id` identifies the equipment instance; `weapon_id` is the catalog id and
/// is the only identity some upgrade-granted weapons carry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawWeapon {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub weapon_id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub label: String,
    pub range: u32,
    pub attacks: Rating,
    #[serde(default = "default_count")]
    pub count: u32,
    #[serde(default)]
    pub special_rules: Vec<RawRule>,
    #[serde(default)]
    pub dependencies: Vec<Dependency>,
}

impl RawWeapon {
    pub fn new(id: &str, name: &str, range: u32, attacks: u32) -> Self {
        Self {
            id: Some(id.to_string()),
            weapon_id: None,
            name: name.to_string(),
            label: name.to_string(),
            range,
            attacks: Rating::from(attacks),
            count: 1,
            special_rules: Vec::new(),
            dependencies: Vec::new(),
        }
    }

    /// Weapon known only by its catalog id, as upgrade gains often are
    pub fn catalog(weapon_id: &str, name: &str, range: u32, attacks: u32) -> Self {
        Self {
            id: None,
            weapon_id: Some(weapon_id.to_string()),
            ..Self::new("", name, range, attacks)
        }
    }

    pub fn with_count(mut self, count: u32) -> Self {
        self.count = count;
        self
    }

    pub fn with_rule(mut self, rule: RawRule) -> Self {
        self.special_rules.push(rule);
        self
    }

    /// Declare that the upgrade instance may replace this weapon
    pub fn replaceable_by(mut self, upgrade_instance_id: &str) -> Self {
        self.dependencies.push(Dependency {
            upgrade_instance_id: upgrade_instance_id.to_string(),
            count: 1,
            variant: Some("replace".into()),
        });
        self
    }
}

/// Entry nested inside an item: either a weapon or a rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemContent {
    Weapon(RawWeapon),
    Rule(RawRule),
}

/// An item bundling rules (and sometimes weapons)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawItem {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub content: Vec<ItemContent>,
    #[serde(default = "default_count")]
    pub count: u32,
    #[serde(default)]
    pub dependencies: Vec<Dependency>,
}

impl RawItem {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: Some(id.to_string()),
            name: name.to_string(),
            label: name.to_string(),
            content: Vec::new(),
            count: 1,
            dependencies: Vec::new(),
        }
    }

    pub fn with_rule(mut self, rule: RawRule) -> Self {
        self.content.push(ItemContent::Rule(rule));
        self
    }

    pub fn with_weapon(mut self, weapon: RawWeapon) -> Self {
        self.content.push(ItemContent::Weapon(weapon));
        self
    }

    pub fn replaceable_by(mut self, upgrade_instance_id: &str) -> Self {
        self.dependencies.push(Dependency {
            upgrade_instance_id: upgrade_instance_id.to_string(),
            count: 1,
            variant: Some("replace".into()),
        });
        self
    }

    pub fn rules(&self) -> impl Iterator<Item = &RawRule> {
        self.content.iter().filter_map(|c| match c {
            ItemContent::Rule(rule) => Some(rule),
            ItemContent::Weapon(_) => None,
        })
    }

    pub fn weapons(&self) -> impl Iterator<Item = &RawWeapon> {
        self.content.iter().filter_map(|c| match c {
            ItemContent::Weapon(weapon) => Some(weapon),
            ItemContent::Rule(_) => None,
        })
    }
}

/// A unit selection from the list builder
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawUnit {
    /// Catalog id of the unit profile; shared by combined squads
    pub id: String,
    /// Id of this selection, unique within the roster
    pub selection_id: String,
    pub name: String,
    #[serde(default)]
    pub custom_name: Option<String>,
    pub size: u32,
    pub quality: u8,
    pub defense: u8,
    pub cost: i32,
    #[serde(default)]
    pub xp: u32,
    #[serde(default)]
    pub weapons: Vec<RawWeapon>,
    #[serde(default)]
    pub items: Vec<RawItem>,
    #[serde(default)]
    pub rules: Vec<RawRule>,
    #[serde(default)]
    pub combined: bool,
    #[serde(default)]
    pub join_to_unit: Option<String>,
    #[serde(default)]
    pub selected_upgrades: Vec<SelectedUpgrade>,
    #[serde(default = "default_true")]
    pub valid: bool,
    #[serde(default)]
    pub has_balance_invalid: bool,
    #[serde(default)]
    pub disabled_sections: Vec<String>,
    #[serde(default)]
    pub disabled_upgrade_sections: Vec<String>,
    #[serde(default)]
    pub traits: Vec<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl RawUnit {
    pub fn new(id: &str, selection_id: &str, name: &str, size: u32, cost: i32) -> Self {
        Self {
            id: id.to_string(),
            selection_id: selection_id.to_string(),
            name: name.to_string(),
            custom_name: None,
            size,
            quality: 4,
            defense: 4,
            cost,
            xp: 0,
            weapons: Vec::new(),
            items: Vec::new(),
            rules: Vec::new(),
            combined: false,
            join_to_unit: None,
            selected_upgrades: Vec::new(),
            valid: true,
            has_balance_invalid: false,
            disabled_sections: Vec::new(),
            disabled_upgrade_sections: Vec::new(),
            traits: Vec::new(),
            notes: None,
        }
    }

    pub fn with_stats(mut self, quality: u8, defense: u8) -> Self {
        self.quality = quality;
        self.defense = defense;
        self
    }

    pub fn with_custom_name(mut self, name: &str) -> Self {
        self.custom_name = Some(name.to_string());
        self
    }

    pub fn with_xp(mut self, xp: u32) -> Self {
        self.xp = xp;
        self
    }

    pub fn with_rule(mut self, rule: RawRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn with_weapon(mut self, weapon: RawWeapon) -> Self {
        self.weapons.push(weapon);
        self
    }

    pub fn with_item(mut self, item: RawItem) -> Self {
        self.items.push(item);
        self
    }

    pub fn with_upgrade(mut self, upgrade: SelectedUpgrade) -> Self {
        self.selected_upgrades.push(upgrade);
        self
    }

    pub fn combined(mut self) -> Self {
        self.combined = true;
        self
    }

    pub fn joined_to(mut self, selection_id: &str) -> Self {
        self.join_to_unit = Some(selection_id.to_string());
        self
    }

    /// Name shown to players: the custom name when present
    pub fn display_name(&self) -> &str {
        self.custom_name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(&self.name)
    }

    pub fn has_rule(&self, name: &str) -> bool {
        self.rules.iter().any(|r| r.name == name)
    }

    /// Whether the list builder flagged this selection as not legal
    pub fn has_validation_issues(&self) -> bool {
        !self.valid
            || self.has_balance_invalid
            || !self.disabled_sections.is_empty()
            || !self.disabled_upgrade_sections.is_empty()
    }
}
