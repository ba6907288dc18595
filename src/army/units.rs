//! Unit hierarchy: Model → SubUnit → ContainerUnit → Army
//!
//! A subunit is the resolution of one roster selection (or of a combined
//! group of them). A container unit is one activation on the table: a single
//! subunit, or a regular subunit with a hero joined to it.

use serde::{Deserialize, Serialize};

use crate::army::model::ResolvedModel;
use crate::army::weapons::{ResolvedRule, ResolvedWeapon};

/// Resolution of a roster selection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvedSubUnit {
    /// Selection id of the (first) source unit
    pub id: String,
    pub source_unit_ids: Vec<String>,
    pub source_selection_ids: Vec<String>,
    pub name: String,
    pub custom_name: Option<String>,
    pub quality: u8,
    pub defense: u8,
    pub size: u32,
    pub cost: i32,
    pub is_hero: bool,
    pub is_caster: bool,
    pub caster_rating: Option<u32>,
    pub xp: u32,
    pub traits: Vec<String>,
    /// Unit-level weapon summary folded by profile
    pub weapons: Vec<ResolvedWeapon>,
    pub rules: Vec<ResolvedRule>,
    /// Rules carried by the base items
    pub items: Vec<ResolvedRule>,
    pub models: Vec<ResolvedModel>,
    pub total_tough: u32,
    pub notes: Vec<String>,
}

impl ResolvedSubUnit {
    /// Name shown to players
    pub fn display_name(&self) -> &str {
        self.custom_name.as_deref().unwrap_or(&self.name)
    }

    pub fn model_count(&self) -> u32 {
        self.models.len() as u32
    }
}

/// Quality of a joined unit: the hero leads, so the hero's quality applies
pub fn joined_quality(_regular: &ResolvedSubUnit, hero: &ResolvedSubUnit) -> u8 {
    hero.quality
}

/// Defense of a joined unit: the hero hides in the squad, so the squad's
/// defense applies
pub fn joined_defense(regular: &ResolvedSubUnit, _hero: &ResolvedSubUnit) -> u8 {
    regular.defense
}

/// One activation on the table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvedContainerUnit {
    pub id: String,
    pub source_unit_ids: Vec<String>,
    pub name: String,
    pub custom_name: Option<String>,
    pub quality: u8,
    pub defense: u8,
    pub cost: i32,
    pub model_count: u32,
    pub is_combined: bool,
    pub is_joined: bool,
    pub has_hero: bool,
    pub has_caster: bool,
    pub sub_units: Vec<ResolvedSubUnit>,
    pub notes: Vec<String>,
}

impl ResolvedContainerUnit {
    /// A container holding a single subunit
    pub fn standalone(sub_unit: ResolvedSubUnit, is_combined: bool) -> Self {
        Self {
            id: sub_unit.id.clone(),
            source_unit_ids: sub_unit.source_unit_ids.clone(),
            name: sub_unit.display_name().to_string(),
            custom_name: sub_unit.custom_name.clone(),
            quality: sub_unit.quality,
            defense: sub_unit.defense,
            cost: sub_unit.cost,
            model_count: sub_unit.model_count(),
            is_combined,
            is_joined: false,
            has_hero: sub_unit.is_hero,
            has_caster: sub_unit.is_caster,
            notes: sub_unit.notes.clone(),
            sub_units: vec![sub_unit],
        }
    }

    /// A hero joined to a regular unit; the regular unit comes first
    ///
    /// `is_combined` is always false here. When the regular unit is a combined
    /// squad its parts stay visible through `source_selection_ids`, and the
    /// merger keeps the `_combined` container id.
    pub fn joined(regular: ResolvedSubUnit, hero: ResolvedSubUnit) -> Self {
        let name = format!("{} with {}", hero.display_name(), regular.display_name());
        let mut source_unit_ids = regular.source_unit_ids.clone();
        source_unit_ids.extend(hero.source_unit_ids.iter().cloned());
        let mut notes = regular.notes.clone();
        notes.extend(hero.notes.iter().cloned());

        Self {
            id: regular.id.clone(),
            source_unit_ids,
            custom_name: Some(name.clone()),
            name,
            quality: joined_quality(&regular, &hero),
            defense: joined_defense(&regular, &hero),
            cost: regular.cost + hero.cost,
            model_count: regular.model_count() + hero.model_count(),
            is_combined: false,
            is_joined: true,
            has_hero: true,
            has_caster: regular.is_caster || hero.is_caster,
            notes,
            sub_units: vec![regular, hero],
        }
    }

    pub fn hero_sub_unit(&self) -> Option<&ResolvedSubUnit> {
        self.sub_units.iter().find(|s| s.is_hero)
    }

    pub fn models(&self) -> impl Iterator<Item = &ResolvedModel> {
        self.sub_units.iter().flat_map(|s| s.models.iter())
    }
}

/// A converted army, ready for battle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvedArmy {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub game_system: String,
    pub points_limit: i32,
    /// Sum of container costs
    pub list_points: i32,
    /// List points as the list builder reported them
    pub declared_list_points: Option<i32>,
    pub model_count: u32,
    pub activation_count: u32,
    pub campaign_mode: bool,
    pub command_points: u32,
    pub units: Vec<ResolvedContainerUnit>,
}

impl ResolvedArmy {
    pub fn models(&self) -> impl Iterator<Item = &ResolvedModel> {
        self.units.iter().flat_map(|u| u.models())
    }

    /// Find the container holding the given source selection
    pub fn find_selection(&self, selection_id: &str) -> Option<&ResolvedContainerUnit> {
        self.units.iter().find(|u| {
            u.sub_units
                .iter()
                .any(|s| s.source_selection_ids.iter().any(|id| id == selection_id))
        })
    }
}
