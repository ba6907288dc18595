//! Dependency index: which upgrade may replace which equipment instance
//!
//! Built in two directions from the `dependencies` lists on weapons and
//! items. Equipment granted by an upgrade is registered once that upgrade has
//! been applied, so later upgrades in the chain can find it. Names are never
//! consulted.

use ahash::AHashMap;

use crate::army::EquipmentKey;
use crate::roster::{Dependency, Gain, ItemContent, RawItem, RawUnit, RawWeapon};

/// An equipment instance an upgrade is entitled to replace
#[derive(Debug, Clone, PartialEq)]
pub struct ReplaceTarget {
    pub key: EquipmentKey,
    pub name: String,
    /// Copies the dependency covers
    pub count: u32,
}

#[derive(Debug, Clone, Default)]
pub struct DependencyIndex {
    /// Equipment instance -> upgrade instances permitted to replace it
    permitted: AHashMap<EquipmentKey, Vec<String>>,
    /// Upgrade instance -> equipment instances it replaces
    targets: AHashMap<String, Vec<ReplaceTarget>>,
}

impl DependencyIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index the base loadout of a unit
    pub fn for_unit(unit: &RawUnit) -> Self {
        let mut index = Self::new();
        for weapon in &unit.weapons {
            index.register_weapon(weapon);
        }
        for item in &unit.items {
            index.register_item(item);
        }
        index
    }

    pub fn register_weapon(&mut self, weapon: &RawWeapon) {
        self.register(EquipmentKey::of_weapon(weapon), &weapon.name, &weapon.dependencies);
    }

    pub fn register_item(&mut self, item: &RawItem) {
        self.register(EquipmentKey::of_item(item), &item.name, &item.dependencies);
        for content in &item.content {
            if let ItemContent::Weapon(weapon) = content {
                self.register_weapon(weapon);
            }
        }
    }

    /// Index equipment granted by an applied upgrade option
    pub fn register_gains(&mut self, gains: &[Gain]) {
        for gain in gains {
            match gain {
                Gain::Weapon(weapon) => self.register_weapon(weapon),
                Gain::Item(item) => self.register_item(item),
                Gain::Rule(_) => {}
            }
        }
    }

    fn register(&mut self, key: EquipmentKey, name: &str, dependencies: &[Dependency]) {
        if !key.is_identifiable() {
            if !dependencies.is_empty() {
                tracing::debug!(
                    equipment = name,
                    "Equipment without id cannot be a replace target"
                );
            }
            return;
        }

        for dep in dependencies {
            let permitted = self.permitted.entry(key.clone()).or_default();
            if !permitted.contains(&dep.upgrade_instance_id) {
                permitted.push(dep.upgrade_instance_id.clone());
            }

            let targets = self.targets.entry(dep.upgrade_instance_id.clone()).or_default();
            if !targets.iter().any(|t| t.key == key) {
                targets.push(ReplaceTarget {
                    key: key.clone(),
                    name: name.to_string(),
                    count: dep.count.max(1),
                });
            }
        }
    }

    /// Equipment the upgrade instance replaces, in registration order
    pub fn targets_of(&self, upgrade_instance_id: &str) -> &[ReplaceTarget] {
        self.targets
            .get(upgrade_instance_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Upgrade instances permitted to replace the equipment
    pub fn permitted_upgrades(&self, key: &EquipmentKey) -> &[String] {
        self.permitted.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Total copies the upgrade instance replaces across its targets
    pub fn replaced_copies(&self, upgrade_instance_id: &str) -> u32 {
        self.targets_of(upgrade_instance_id)
            .iter()
            .map(|t| t.count)
            .sum()
    }
}
