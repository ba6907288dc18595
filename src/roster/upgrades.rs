//! Selected upgrades: sections, options and gains

use serde::{Deserialize, Serialize};

use crate::roster::units::{RawItem, RawRule, RawWeapon};

/// Whether a section swaps equipment out or only adds to it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SectionVariant {
    #[serde(rename = "replace")]
    Replace,
    #[default]
    #[serde(rename = "upgrade", alias = "add")]
    Add,
}

/// How many models a section touches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Affects {
    Exactly { value: u32 },
    Any,
    All,
}

/// Selection constraint on a section (`select exactly 1`, `up to 2`, ...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Select {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub value: u32,
}

impl Select {
    pub fn is_exactly_one(&self) -> bool {
        self.kind.eq_ignore_ascii_case("exactly") && self.value == 1
    }
}

/// An upgrade section ("Replace any Rifle", "Upgrade all models with")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpgradeSection {
    #[serde(default)]
    pub id: Option<String>,
    pub uid: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub variant: SectionVariant,
    #[serde(default)]
    pub affects: Option<Affects>,
    #[serde(default)]
    pub select: Option<Select>,
    /// Equipment names the section talks about; informational only
    #[serde(default)]
    pub targets: Vec<String>,
}

impl UpgradeSection {
    pub fn replace(uid: &str, label: &str) -> Self {
        Self {
            id: None,
            uid: uid.to_string(),
            label: label.to_string(),
            variant: SectionVariant::Replace,
            affects: None,
            select: None,
            targets: Vec::new(),
        }
    }

    pub fn add(uid: &str, label: &str) -> Self {
        Self {
            variant: SectionVariant::Add,
            ..Self::replace(uid, label)
        }
    }

    pub fn affecting(mut self, affects: Affects) -> Self {
        self.affects = Some(affects);
        self
    }

    pub fn selecting_exactly(mut self, value: u32) -> Self {
        self.select = Some(Select {
            kind: "exactly".into(),
            value,
        });
        self
    }

    /// Sections that must spread distinct options over distinct models
    pub fn is_grouped(&self) -> bool {
        matches!(self.affects, Some(Affects::Exactly { value }) if value > 1)
    }
}

/// Per-unit cost of an option
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionCost {
    pub cost: i32,
    pub unit_id: String,
}

/// Something an option grants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Gain {
    #[serde(rename = "ArmyBookWeapon")]
    Weapon(RawWeapon),
    #[serde(rename = "ArmyBookItem")]
    Item(RawItem),
    #[serde(rename = "ArmyBookRule")]
    Rule(RawRule),
}

/// The option chosen within a section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpgradeOption {
    pub uid: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub cost: Option<i32>,
    #[serde(default)]
    pub costs: Vec<OptionCost>,
    #[serde(default)]
    pub gains: Vec<Gain>,
}

impl UpgradeOption {
    pub fn new(uid: &str, label: &str) -> Self {
        Self {
            uid: uid.to_string(),
            id: None,
            label: label.to_string(),
            cost: None,
            costs: Vec::new(),
            gains: Vec::new(),
        }
    }

    pub fn costing(mut self, unit_id: &str, cost: i32) -> Self {
        self.costs.push(OptionCost {
            cost,
            unit_id: unit_id.to_string(),
        });
        self
    }

    pub fn gaining(mut self, gain: Gain) -> Self {
        self.gains.push(gain);
        self
    }

    /// Cost of this option when taken by the given unit profile
    ///
    /// The per-unit `costs` list wins; the flat `cost` only applies when the
    /// list is empty. A list without an entry for the unit costs nothing.
    pub fn cost_for(&self, unit_id: &str) -> i32 {
        if self.costs.is_empty() {
            return self.cost.unwrap_or(0);
        }
        self.costs
            .iter()
            .find(|c| c.unit_id == unit_id)
            .map(|c| c.cost)
            .unwrap_or(0)
    }
}

/// One application of an upgrade to a unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedUpgrade {
    pub instance_id: String,
    pub upgrade: UpgradeSection,
    pub option: UpgradeOption,
}

impl SelectedUpgrade {
    pub fn new(instance_id: &str, upgrade: UpgradeSection, option: UpgradeOption) -> Self {
        Self {
            instance_id: instance_id.to_string(),
            upgrade,
            option,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_accepts_upgrade_and_add() {
        let a: SectionVariant = serde_json::from_str("\"upgrade\"").unwrap();
        let b: SectionVariant = serde_json::from_str("\"add\"").unwrap();
        let c: SectionVariant = serde_json::from_str("\"replace\"").unwrap();
        assert_eq!(a, SectionVariant::Add);
        assert_eq!(b, SectionVariant::Add);
        assert_eq!(c, SectionVariant::Replace);
    }

    #[test]
    fn test_affects_forms() {
        let exactly: Affects = serde_json::from_str(r#"{"type":"exactly","value":2}"#).unwrap();
        let any: Affects = serde_json::from_str(r#"{"type":"any"}"#).unwrap();
        let all: Affects = serde_json::from_str(r#"{"type":"all"}"#).unwrap();
        assert_eq!(exactly, Affects::Exactly { value: 2 });
        assert_eq!(any, Affects::Any);
        assert_eq!(all, Affects::All);
    }

    #[test]
    fn test_grouped_only_for_exactly_more_than_one() {
        let base = UpgradeSection::replace("sec", "Replace Rifles");
        assert!(!base.is_grouped());
        assert!(!base.clone().affecting(Affects::Exactly { value: 1 }).is_grouped());
        assert!(base.clone().affecting(Affects::Exactly { value: 2 }).is_grouped());
        assert!(!base.affecting(Affects::All).is_grouped());
    }

    #[test]
    fn test_option_cost_prefers_unit_entry() {
        let mut option =
            UpgradeOption::new("o1", "Rapid Heavy Mining Laser").costing("q6fx4lG", 35);
        option.cost = Some(25);
        assert_eq!(option.cost_for("q6fx4lG"), 35);
        assert_eq!(option.cost_for("other"), 0);

        let flat = UpgradeOption {
            cost: Some(10),
            ..UpgradeOption::new("o2", "Flat")
        };
        assert_eq!(flat.cost_for("anything"), 10);
    }

    #[test]
    fn test_gain_tagged_by_type() {
        let json = r#"[
            { "type": "ArmyBookWeapon", "name": "Energy Fist", "range": 0, "attacks": 3 },
            {
                "type": "ArmyBookItem", "name": "Great Grinder",
                "content": [ { "name": "Impact", "rating": 5 } ]
            },
            { "type": "ArmyBookRule", "name": "Tough", "rating": 3 }
        ]"#;
        let gains: Vec<Gain> = serde_json::from_str(json).unwrap();
        assert!(matches!(gains[0], Gain::Weapon(_)));
        assert!(matches!(gains[1], Gain::Item(_)));
        assert!(matches!(gains[2], Gain::Rule(_)));
    }

    #[test]
    fn test_select_exactly_one() {
        let section = UpgradeSection::replace("s", "Replace one").selecting_exactly(1);
        assert!(section.select.unwrap().is_exactly_one());
    }
}
