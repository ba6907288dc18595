//! Roster conversion engine
//!
//! Data flows forward only: each well-formed unit is resolved into models,
//! the resolved units are merged into activations, costs and totals are
//! computed over the merged units, and finally every model is named.
//!
//! A run never aborts. Units that cannot be read are skipped with a
//! structural error; broken links and rule violations are reported as
//! diagnostics next to the army.

pub mod costs;
pub mod dependency;
pub mod diagnostics;
pub mod gains;
pub mod merger;
pub mod naming;
pub mod resolver;
pub mod validation;

use rayon::prelude::*;
use serde::Serialize;

use crate::army::ResolvedArmy;
use crate::core::config::ConversionConfig;
use crate::core::error::MusterError;
use crate::roster::{RawRoster, RawUnit, RosterEntry};

pub use costs::{army_totals, command_points, unit_cost, ArmyTotals};
pub use dependency::{DependencyIndex, ReplaceTarget};
pub use diagnostics::{Diagnostic, DiagnosticKind, Diagnostics, Severity};
pub use merger::{merge_units, UnitResolution};
pub use naming::name_models;
pub use resolver::{check_structure, resolve_unit};

/// Outcome of converting one roster
#[derive(Debug, Clone, Serialize)]
pub struct ConversionReport {
    pub army: ResolvedArmy,
    pub diagnostics: Diagnostics,
}

impl ConversionReport {
    pub fn warnings(&self) -> Vec<String> {
        self.diagnostics.warnings()
    }

    pub fn errors(&self) -> Vec<String> {
        self.diagnostics.errors()
    }

    /// False when any unit had to be skipped
    pub fn is_success(&self) -> bool {
        !self.diagnostics.has_structural_errors()
    }
}

fn describe(roster: &RawRoster, diagnostics: &mut Diagnostics) -> Option<String> {
    if roster.force_org_errors.is_empty() {
        return roster.description.clone();
    }

    for error in &roster.force_org_errors {
        diagnostics.notice(None, format!("Army validation: {}", error));
    }
    let note = format!("ARMY VALIDATION: {}", roster.force_org_errors.join("; "));
    Some(match roster.description.as_deref().filter(|d| !d.trim().is_empty()) {
        Some(description) => format!("{}\n\n{}", description, note),
        None => note,
    })
}

/// Convert a roster into a battle-ready army
pub fn convert(roster: &RawRoster, config: &ConversionConfig) -> ConversionReport {
    tracing::debug!(roster = %roster.id, units = roster.units.len(), "Converting roster");
    let mut diagnostics = Diagnostics::new();

    let mut resolved = Vec::with_capacity(roster.units.len());
    for (index, entry) in roster.units.iter().enumerate() {
        match entry {
            RosterEntry::Malformed { reason, .. } => {
                diagnostics.structural(&MusterError::MalformedUnit {
                    index,
                    reason: reason.clone(),
                });
            }
            RosterEntry::Unit(raw) => {
                let raw: &RawUnit = raw;
                match check_structure(raw) {
                    Ok(()) => resolved.push(UnitResolution {
                        raw,
                        sub_unit: resolve_unit(raw, config, &mut diagnostics),
                    }),
                    Err(e) => diagnostics.structural(&e),
                }
            }
        }
    }

    let mut units = merge_units(resolved, config, &mut diagnostics);
    let totals = army_totals(&units, config);
    costs::check_totals(roster, &totals, config, &mut diagnostics);

    for unit in &mut units {
        name_models(unit);
    }

    let army = ResolvedArmy {
        id: roster.id.clone(),
        name: roster.name.clone(),
        description: describe(roster, &mut diagnostics),
        game_system: roster.game_system.clone(),
        points_limit: roster.points_limit,
        list_points: totals.list_points,
        declared_list_points: roster.list_points,
        model_count: totals.model_count,
        activation_count: totals.activation_count,
        campaign_mode: roster.campaign_mode,
        command_points: totals.command_points,
        units,
    };
    validation::check_battle_readiness(&army, &mut diagnostics);

    tracing::info!(
        roster = %army.id,
        units = army.units.len(),
        models = army.model_count,
        points = army.list_points,
        warnings = diagnostics.warnings().len(),
        errors = diagnostics.errors().len(),
        "Roster converted"
    );

    ConversionReport { army, diagnostics }
}

/// Convert many rosters in parallel; results keep the input order
pub fn convert_all(rosters: &[RawRoster], config: &ConversionConfig) -> Vec<ConversionReport> {
    rosters.par_iter().map(|roster| convert(roster, config)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_unit_skipped_with_structural_error() {
        let json = r#"{
            "id": "army",
            "name": "Test Army",
            "pointsLimit": 1000,
            "units": [
                {
                    "id": "u1", "selectionId": "s1", "name": "Squad",
                    "size": 5, "quality": 4, "defense": 4, "cost": 100
                },
                {
                    "id": "u2", "selectionId": "s2", "name": "Broken",
                    "size": "many", "quality": 4, "defense": 4, "cost": 100
                }
            ]
        }"#;
        let roster: RawRoster = serde_json::from_str(json).unwrap();
        let report = convert(&roster, &ConversionConfig::default());

        assert!(!report.is_success());
        assert_eq!(report.army.units.len(), 1);
        assert_eq!(report.errors().len(), 1);
    }

    #[test]
    fn test_force_org_errors_annotate_description() {
        let mut roster =
            RawRoster::new("a", "Army", 1000).with_unit(RawUnit::new("u", "s", "Squad", 5, 100));
        roster.description = Some("Bring snacks".into());
        roster.force_org_errors = vec!["Too many heroes".into()];

        let report = convert(&roster, &ConversionConfig::default());
        let description = report.army.description.clone().unwrap_or_default();
        assert!(description.starts_with("Bring snacks"));
        assert!(description.contains("ARMY VALIDATION: Too many heroes"));
        assert_eq!(report.warnings().len(), 1);
        assert!(report.is_success());
    }

    #[test]
    fn test_names_assigned_after_merge() {
        let roster = RawRoster::new("a", "Army", 1000)
            .with_unit(RawUnit::new("sq", "s1", "Squad", 2, 50).combined())
            .with_unit(RawUnit::new("sq", "s2", "Squad", 2, 50).combined());
        let report = convert(&roster, &ConversionConfig::default());

        let names: Vec<_> = report.army.models().filter_map(|m| m.name.clone()).collect();
        assert_eq!(names, ["Squad 1", "Squad 2", "Squad 3", "Squad 4"]);
    }

    #[test]
    fn test_convert_all_keeps_order() {
        let rosters: Vec<RawRoster> = (0..4)
            .map(|i| {
                RawRoster::new(&format!("r{}", i), "Army", 1000)
                    .with_unit(RawUnit::new("u", "s", "Squad", 5, 100))
            })
            .collect();
        let reports = convert_all(&rosters, &ConversionConfig::default());
        let ids: Vec<_> = reports.iter().map(|r| r.army.id.as_str()).collect();
        assert_eq!(ids, ["r0", "r1", "r2", "r3"]);
    }
}
