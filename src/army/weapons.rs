//! Resolved weapons, rules and equipment identity

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::types::Rating;
use crate::roster::{RawItem, RawRule, RawWeapon};

/// A rule attached to a model, weapon or unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedRule {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<Rating>,
    pub label: String,
}

impl ResolvedRule {
    pub fn rating_value(&self) -> Option<u32> {
        self.rating.as_ref().and_then(Rating::value)
    }
}

impl From<&RawRule> for ResolvedRule {
    fn from(rule: &RawRule) -> Self {
        let label = if rule.label.is_empty() {
            match &rule.rating {
                Some(r) => format!("{}({})", rule.name, r),
                None => rule.name.clone(),
            }
        } else {
            rule.label.clone()
        };
        Self {
            name: rule.name.clone(),
            rating: rule.rating.clone(),
            label,
        }
    }
}

fn non_empty(id: &Option<String>) -> Option<String> {
    id.as_ref().filter(|s| !s.trim().is_empty()).cloned()
}

/// Identity of one equipment instance
///
/// `id` is the instance id. `weapon_id` is the catalog id, shared by every
/// copy of the same weapon profile, and only consulted when neither side of a
/// comparison has an instance id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EquipmentKey {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weapon_id: Option<String>,
}

impl EquipmentKey {
    pub fn of_weapon(weapon: &RawWeapon) -> Self {
        Self {
            id: non_empty(&weapon.id),
            weapon_id: non_empty(&weapon.weapon_id),
        }
    }

    pub fn of_item(item: &RawItem) -> Self {
        Self {
            id: non_empty(&item.id),
            weapon_id: None,
        }
    }

    /// Keys without any id can never be matched
    pub fn is_identifiable(&self) -> bool {
        self.id.is_some() || self.weapon_id.is_some()
    }

    /// Whether `self` (equipment on a model) is the instance `target` names
    pub fn matches(&self, target: &EquipmentKey) -> bool {
        match (&target.id, &self.id) {
            (Some(t), Some(s)) => t == s,
            // An instance never stands in for another copy of its profile
            (Some(_), None) | (None, Some(_)) => false,
            (None, None) => self.same_catalog(target),
        }
    }

    fn same_catalog(&self, target: &EquipmentKey) -> bool {
        target.weapon_id.is_some() && self.weapon_id == target.weapon_id
    }
}

/// A weapon carried by a model, or a unit-level summary line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedWeapon {
    pub key: EquipmentKey,
    pub name: String,
    pub label: String,
    pub count: u32,
    pub range: u32,
    pub attacks: Rating,
    pub ap: u32,
    pub special_rules: Vec<ResolvedRule>,
    /// Item this weapon was unpacked from, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_item: Option<EquipmentKey>,
}

impl ResolvedWeapon {
    pub fn from_raw(weapon: &RawWeapon, count: u32, ap_rule_name: &str) -> Self {
        let ap = weapon
            .special_rules
            .iter()
            .find(|r| r.name == ap_rule_name)
            .and_then(RawRule::rating_value)
            .unwrap_or(0);

        Self {
            key: EquipmentKey::of_weapon(weapon),
            name: weapon.name.clone(),
            label: if weapon.label.is_empty() {
                weapon.name.clone()
            } else {
                weapon.label.clone()
            },
            count,
            range: weapon.range,
            attacks: weapon.attacks.clone(),
            ap,
            special_rules: weapon.special_rules.iter().map(ResolvedRule::from).collect(),
            from_item: None,
        }
    }

    pub fn summary_key(&self) -> WeaponKey {
        WeaponKey {
            name: self.name.clone(),
            range: self.range,
            attacks: self.attacks.to_string(),
            ap: self.ap,
        }
    }
}

/// Profile key used to fold identical weapons into one summary line
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WeaponKey {
    pub name: String,
    pub range: u32,
    pub attacks: String,
    pub ap: u32,
}

/// Fold weapons with the same profile, summing their counts
///
/// Lines keep the order in which each profile first appears.
pub fn summarize_weapons<'a>(
    weapons: impl IntoIterator<Item = &'a ResolvedWeapon>,
) -> Vec<ResolvedWeapon> {
    let mut summary: Vec<ResolvedWeapon> = Vec::new();
    let mut index: AHashMap<WeaponKey, usize> = AHashMap::new();

    for weapon in weapons {
        let key = weapon.summary_key();
        match index.get(&key) {
            Some(&pos) => summary[pos].count += weapon.count,
            None => {
                index.insert(key, summary.len());
                let mut line = weapon.clone();
                line.from_item = None;
                summary.push(line);
            }
        }
    }

    summary
}
