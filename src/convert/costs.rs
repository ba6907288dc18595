//! Points costs and army totals

use crate::army::ResolvedContainerUnit;
use crate::convert::diagnostics::Diagnostics;
use crate::core::config::ConversionConfig;
use crate::core::types::campaign_level;
use crate::roster::{RawRoster, RawUnit};

/// Sum of the chosen options' costs for this unit profile
pub fn upgrade_cost(unit: &RawUnit) -> i32 {
    unit.selected_upgrades
        .iter()
        .map(|u| u.option.cost_for(&unit.id))
        .sum()
}

/// Campaign level surcharge
pub fn level_cost(unit: &RawUnit, is_hero: bool, config: &ConversionConfig) -> i32 {
    let levels = campaign_level(unit.xp, config.xp_per_level);
    (levels * config.level_cost(is_hero)) as i32
}

/// Base cost plus upgrade costs plus campaign levels
pub fn unit_cost(unit: &RawUnit, is_hero: bool, config: &ConversionConfig) -> i32 {
    let upgrades = upgrade_cost(unit);
    let levels = level_cost(unit, is_hero, config);
    tracing::trace!(
        unit = %unit.selection_id,
        base = unit.cost,
        upgrades,
        levels,
        "Unit cost"
    );
    unit.cost + upgrades + levels
}

/// Army-level counts derived from the containers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArmyTotals {
    pub list_points: i32,
    pub model_count: u32,
    pub activation_count: u32,
    pub command_points: u32,
}

pub fn command_points(list_points: i32, config: &ConversionConfig) -> u32 {
    let per = config.points_per_command_point.max(1) as i32;
    (list_points.max(0) / per).max(1) as u32
}

pub fn army_totals(units: &[ResolvedContainerUnit], config: &ConversionConfig) -> ArmyTotals {
    let list_points = units.iter().map(|u| u.cost).sum();
    ArmyTotals {
        list_points,
        model_count: units.iter().map(|u| u.model_count).sum(),
        activation_count: units.len() as u32,
        command_points: command_points(list_points, config),
    }
}

/// Compare the computed totals with the roster's limit and declared values
pub fn check_totals(
    roster: &RawRoster,
    totals: &ArmyTotals,
    config: &ConversionConfig,
    diagnostics: &mut Diagnostics,
) {
    if roster.points_limit > 0 && totals.list_points > roster.points_limit {
        diagnostics.invalid(
            None,
            format!(
                "Army costs {} points, over the {} point limit",
                totals.list_points, roster.points_limit
            ),
        );
    }

    if let Some(declared) = roster.list_points {
        let difference = (declared - totals.list_points).unsigned_abs();
        if difference > config.points_tolerance {
            diagnostics.invalid(
                None,
                format!(
                    "Calculated {} points but the list declares {}",
                    totals.list_points, declared
                ),
            );
        }
    }

    if let Some(declared) = roster.model_count {
        if declared != totals.model_count {
            diagnostics.invalid(
                None,
                format!(
                    "Resolved {} models but the list declares {}",
                    totals.model_count, declared
                ),
            );
        }
    }
}
