//! The roster as a whole

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::roster::units::RawUnit;

/// A unit slot in the roster
///
/// Units are read one at a time so that a single malformed unit does not
/// reject the whole roster; it is kept with its parse error and reported as a
/// structural error during conversion.
#[derive(Debug, Clone)]
pub enum RosterEntry {
    Unit(Box<RawUnit>),
    Malformed {
        raw: serde_json::Value,
        reason: String,
    },
}

impl RosterEntry {
    pub fn as_unit(&self) -> Option<&RawUnit> {
        match self {
            RosterEntry::Unit(unit) => Some(unit),
            RosterEntry::Malformed { .. } => None,
        }
    }
}

impl From<RawUnit> for RosterEntry {
    fn from(unit: RawUnit) -> Self {
        RosterEntry::Unit(Box::new(unit))
    }
}

impl<'de> Deserialize<'de> for RosterEntry {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = serde_json::Value::deserialize(deserializer)?;
        Ok(match serde_json::from_value::<RawUnit>(raw.clone()) {
            Ok(unit) => RosterEntry::Unit(Box::new(unit)),
            Err(e) => RosterEntry::Malformed {
                raw,
                reason: e.to_string(),
            },
        })
    }
}

impl Serialize for RosterEntry {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            RosterEntry::Unit(unit) => unit.serialize(serializer),
            RosterEntry::Malformed { raw, .. } => raw.serialize(serializer),
        }
    }
}

/// A roster exported by the list builder
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRoster {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub game_system: String,
    #[serde(default)]
    pub points_limit: i32,
    /// List points as the list builder computed them
    #[serde(default)]
    pub list_points: Option<i32>,
    #[serde(default)]
    pub model_count: Option<u32>,
    #[serde(default)]
    pub campaign_mode: bool,
    #[serde(default)]
    pub force_org_errors: Vec<String>,
    #[serde(default)]
    pub units: Vec<RosterEntry>,
}

impl RawRoster {
    pub fn new(id: &str, name: &str, points_limit: i32) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: None,
            game_system: String::new(),
            points_limit,
            list_points: None,
            model_count: None,
            campaign_mode: false,
            force_org_errors: Vec::new(),
            units: Vec::new(),
        }
    }

    pub fn with_unit(mut self, unit: RawUnit) -> Self {
        self.units.push(unit.into());
        self
    }

    pub fn with_list_points(mut self, points: i32) -> Self {
        self.list_points = Some(points);
        self
    }

    pub fn with_model_count(mut self, count: u32) -> Self {
        self.model_count = Some(count);
        self
    }

    /// Well-formed units, in roster order
    pub fn units(&self) -> impl Iterator<Item = &RawUnit> {
        self.units.iter().filter_map(RosterEntry::as_unit)
    }

    /// Find a unit by its selection id
    pub fn find_selection(&self, selection_id: &str) -> Option<&RawUnit> {
        self.units().find(|u| u.selection_id == selection_id)
    }
}
