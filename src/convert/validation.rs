//! Battle-readiness checks on the finished army

use crate::army::{ResolvedArmy, ResolvedSubUnit};
use crate::convert::diagnostics::Diagnostics;

const STAT_RANGE: std::ops::RangeInclusive<u8> = 1..=6;

fn check_sub_unit(sub_unit: &ResolvedSubUnit, diagnostics: &mut Diagnostics) {
    let name = sub_unit.display_name();

    if sub_unit.models.is_empty() {
        diagnostics.notice(Some(sub_unit.id.as_str()), format!("{} has no models", name));
    }
    if !STAT_RANGE.contains(&sub_unit.quality) {
        diagnostics.notice(
            Some(sub_unit.id.as_str()),
            format!("{} has quality {} outside 1-6", name, sub_unit.quality),
        );
    }
    if !STAT_RANGE.contains(&sub_unit.defense) {
        diagnostics.notice(
            Some(sub_unit.id.as_str()),
            format!("{} has defense {} outside 1-6", name, sub_unit.defense),
        );
    }
    for model in sub_unit.models.iter().filter(|m| m.max_tough == 0) {
        diagnostics.notice(
            Some(sub_unit.id.as_str()),
            format!("Model {} has no toughness", model.model_id),
        );
    }
}

/// Flag anything the battle layer could not field
pub fn check_battle_readiness(army: &ResolvedArmy, diagnostics: &mut Diagnostics) {
    for unit in &army.units {
        if unit.sub_units.is_empty() {
            diagnostics.notice(Some(unit.id.as_str()), format!("{} has no subunits", unit.name));
        }
        for sub_unit in &unit.sub_units {
            check_sub_unit(sub_unit, diagnostics);
        }
    }
}
