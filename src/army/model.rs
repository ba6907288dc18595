//! Individual models and the upgrades applied to them

use serde::{Deserialize, Serialize};

use crate::army::weapons::{EquipmentKey, ResolvedRule, ResolvedWeapon};

/// Where a model upgrade came from, for the UI's reassignment controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UpgradeSource {
    /// A weapon bundled with extra toughness (a crewed weapon)
    WeaponTeam,
    /// Picked for one particular model
    ChooseModel,
    /// Applies to every model in the unit
    UnitWide,
}

/// An upgrade record attached to one model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelUpgrade {
    pub label: String,
    pub rules: Vec<ResolvedRule>,
    /// Whether the player may move this upgrade to another model
    pub reassignable: bool,
    pub source: UpgradeSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upgrade_instance_id: Option<String>,
    /// Item instance this record stands for, when it came from an item
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equipment: Option<EquipmentKey>,
}

/// A single model with its resolved loadout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedModel {
    pub model_id: String,
    /// Creation order within the source unit; target selection uses this
    pub ordinal: u32,
    /// Display name, assigned by the naming pass after merging
    pub name: Option<String>,
    pub is_hero: bool,
    pub max_tough: u32,
    pub current_tough: u32,
    pub weapons: Vec<ResolvedWeapon>,
    pub upgrades: Vec<ModelUpgrade>,
}

impl ResolvedModel {
    pub fn new(selection_id: &str, ordinal: u32, tough: u32, is_hero: bool) -> Self {
        Self {
            model_id: format!("{}-{}", selection_id, ordinal + 1),
            ordinal,
            name: None,
            is_hero,
            max_tough: tough,
            current_tough: tough,
            weapons: Vec::new(),
            upgrades: Vec::new(),
        }
    }

    /// Whether this model carries the equipment instance
    pub fn carries(&self, target: &EquipmentKey) -> bool {
        self.weapons.iter().any(|w| w.key.matches(target))
            || self
                .upgrades
                .iter()
                .any(|u| u.equipment.as_ref().is_some_and(|e| e.matches(target)))
    }

    /// Remove the equipment instance, returns how many entries were removed
    ///
    /// Removing an item also removes the weapons unpacked from it.
    pub fn remove_equipment(&mut self, target: &EquipmentKey) -> usize {
        let before = self.weapons.len() + self.upgrades.len();

        self.weapons.retain(|w| {
            !w.key.matches(target) && !w.from_item.as_ref().is_some_and(|i| i.matches(target))
        });
        self.upgrades
            .retain(|u| !u.equipment.as_ref().is_some_and(|e| e.matches(target)));

        before - (self.weapons.len() + self.upgrades.len())
    }

    /// Replace semantics: toughness becomes the rating
    pub fn set_toughness(&mut self, value: u32) {
        self.max_tough = value.max(1);
        self.current_tough = self.max_tough;
    }

    /// Add semantics: toughness grows by the rating
    pub fn add_toughness(&mut self, value: u32) {
        self.max_tough += value;
        self.current_tough += value;
    }

    pub fn has_weapon(&self, name: &str) -> bool {
        self.weapons.iter().any(|w| w.name == name)
    }

    /// All rules granted through upgrades
    pub fn upgrade_rules(&self) -> impl Iterator<Item = &ResolvedRule> {
        self.upgrades.iter().flat_map(|u| u.rules.iter())
    }
}
