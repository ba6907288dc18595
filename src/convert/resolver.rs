//! Resolving one roster selection into individual models
//!
//! Models are created from the profile, given their share of the base
//! loadout, then every selected upgrade is applied: ordinary upgrades in list
//! order, then grouped sections, which hand out one distinct option per model.

use crate::army::{summarize_weapons, ResolvedModel, ResolvedRule, ResolvedSubUnit};
use crate::convert::costs::unit_cost;
use crate::convert::dependency::{DependencyIndex, ReplaceTarget};
use crate::convert::diagnostics::Diagnostics;
use crate::convert::gains::{
    apply_base_item, apply_base_weapon, apply_option, item_rule_total, GainContext,
};
use crate::core::config::ConversionConfig;
use crate::core::error::{MusterError, Result};
use crate::roster::{
    Affects, RawItem, RawRule, RawUnit, SectionVariant, SelectedUpgrade, UpgradeSection,
};

/// Reject units the engine cannot resolve at all
pub fn check_structure(unit: &RawUnit) -> Result<()> {
    let label = if unit.name.trim().is_empty() {
        unit.selection_id.clone()
    } else {
        unit.name.clone()
    };

    if unit.id.trim().is_empty() {
        return Err(MusterError::MissingField { unit: label, field: "id" });
    }
    if unit.selection_id.trim().is_empty() {
        return Err(MusterError::MissingField {
            unit: label,
            field: "selectionId",
        });
    }
    if unit.name.trim().is_empty() {
        return Err(MusterError::MissingField { unit: label, field: "name" });
    }
    if unit.size == 0 {
        return Err(MusterError::InvalidSize {
            unit: label,
            size: unit.size,
        });
    }
    if unit.cost < 0 {
        return Err(MusterError::NegativeCost {
            unit: label,
            cost: unit.cost,
        });
    }
    Ok(())
}

/// Toughness from the profile's own Tough rules; 1 when there are none
pub fn base_toughness(unit: &RawUnit, config: &ConversionConfig) -> u32 {
    unit.rules
        .iter()
        .filter(|r| r.name == config.tough_rule_name)
        .filter_map(RawRule::rating_value)
        .max()
        .unwrap_or(1)
        .max(1)
}

/// How many models a section reaches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Reach {
    Count(usize),
    All,
}

impl Reach {
    fn of(section: &UpgradeSection, index: &DependencyIndex, instance_id: &str) -> Self {
        match section.affects {
            Some(Affects::Exactly { value }) => Reach::Count(value as usize),
            Some(Affects::Any) => Reach::Count(1),
            Some(Affects::All) => Reach::All,
            // Unspecified: as many models as the links name for a replace,
            // one model for an add
            None => match section.variant {
                SectionVariant::Replace => {
                    Reach::Count(index.replaced_copies(instance_id).max(1) as usize)
                }
                SectionVariant::Add => Reach::Count(1),
            },
        }
    }
}

struct UnitResolver<'a> {
    unit: &'a RawUnit,
    config: &'a ConversionConfig,
    models: Vec<ResolvedModel>,
    index: DependencyIndex,
}

impl<'a> UnitResolver<'a> {
    fn new(unit: &'a RawUnit, config: &'a ConversionConfig) -> Self {
        let is_hero = unit.has_rule(&config.hero_rule_name);
        let tough = base_toughness(unit, config);

        let mut models: Vec<ResolvedModel> = (0..unit.size)
            .map(|i| ResolvedModel::new(&unit.selection_id, i, tough, is_hero && unit.size == 1))
            .collect();

        for weapon in &unit.weapons {
            let per_model = (weapon.count / unit.size).max(1);
            for model in &mut models {
                apply_base_weapon(model, weapon, per_model, config);
            }
        }
        for item in &unit.items {
            for model in &mut models {
                apply_base_item(model, item, config);
            }
        }

        Self {
            unit,
            config,
            models,
            index: DependencyIndex::for_unit(unit),
        }
    }

    fn selection(&self) -> &str {
        &self.unit.selection_id
    }

    /// Model indices satisfying `pred`, in ordinal order, capped by reach
    fn select(&self, reach: Reach, pred: impl Fn(&ResolvedModel) -> bool) -> Vec<usize> {
        let mut chosen: Vec<usize> = (0..self.models.len())
            .filter(|&i| pred(&self.models[i]))
            .collect();
        chosen.sort_by_key(|&i| self.models[i].ordinal);
        if let Reach::Count(n) = reach {
            chosen.truncate(n);
        }
        chosen
    }

    fn apply_individual(&mut self, upgrade: &SelectedUpgrade, diagnostics: &mut Diagnostics) {
        let section = &upgrade.upgrade;
        let reach = Reach::of(section, &self.index, &upgrade.instance_id);

        let chosen = match section.variant {
            SectionVariant::Add => self.select(reach, |_| true),
            SectionVariant::Replace => {
                let targets: Vec<ReplaceTarget> =
                    self.index.targets_of(&upgrade.instance_id).to_vec();
                let carrying = self.select(reach, |m| targets.iter().any(|t| m.carries(&t.key)));

                if targets.is_empty() {
                    diagnostics.link(
                        self.unit.selection_id.as_str(),
                        format!(
                            "Upgrade '{}' ({}) is not linked to any equipment; gains applied without removal",
                            section.label, upgrade.instance_id
                        ),
                    );
                    self.select(reach, |_| true)
                } else if carrying.is_empty() {
                    diagnostics.link(
                        self.unit.selection_id.as_str(),
                        format!(
                            "No model still carries the equipment replaced by '{}' ({}); gains applied without removal",
                            section.label, upgrade.instance_id
                        ),
                    );
                    self.select(reach, |_| true)
                } else {
                    for &i in &carrying {
                        for target in &targets {
                            self.models[i].remove_equipment(&target.key);
                        }
                    }
                    carrying
                }
            }
        };

        tracing::debug!(
            unit = %self.selection(),
            upgrade = %upgrade.instance_id,
            option = %upgrade.option.label,
            models = chosen.len(),
            "Applying upgrade"
        );

        let ctx = GainContext::for_section(section, &upgrade.instance_id, self.config);
        for &i in &chosen {
            apply_option(&mut self.models[i], &upgrade.option, &ctx);
        }
        self.index.register_gains(&upgrade.option.gains);
    }

    /// Distinct options of one section go to distinct models, by ordinal
    fn apply_grouped(&mut self, members: &[&SelectedUpgrade], diagnostics: &mut Diagnostics) {
        let Some(first) = members.first() else {
            return;
        };
        let section = &first.upgrade;
        let wanted = match section.affects {
            Some(Affects::Exactly { value }) => value as usize,
            _ => 1,
        };

        if members.len() > wanted {
            diagnostics.link(
                self.unit.selection_id.as_str(),
                format!(
                    "Section '{}' affects {} models but {} options were chosen; the extra options were ignored",
                    section.label,
                    wanted,
                    members.len()
                ),
            );
        }

        let slots = self.select(Reach::Count(wanted), |_| true);
        for (position, upgrade) in members.iter().take(wanted).enumerate() {
            let Some(&model) = slots.get(position) else {
                diagnostics.link(
                    self.unit.selection_id.as_str(),
                    format!(
                        "No model left for option '{}' of section '{}'",
                        upgrade.option.label, section.label
                    ),
                );
                break;
            };

            if upgrade.upgrade.variant == SectionVariant::Replace {
                let targets: Vec<ReplaceTarget> =
                    self.index.targets_of(&upgrade.instance_id).to_vec();
                let removed: usize = targets
                    .iter()
                    .map(|t| self.models[model].remove_equipment(&t.key))
                    .sum();
                if removed == 0 {
                    diagnostics.link(
                        self.unit.selection_id.as_str(),
                        format!(
                            "Model {} carries nothing replaced by '{}' ({}); gains applied without removal",
                            self.models[model].model_id, upgrade.option.label, upgrade.instance_id
                        ),
                    );
                }
            }

            tracing::debug!(
                unit = %self.selection(),
                upgrade = %upgrade.instance_id,
                model = %self.models[model].model_id,
                "Applying grouped option"
            );

            let ctx = GainContext::for_section(&upgrade.upgrade, &upgrade.instance_id, self.config);
            apply_option(&mut self.models[model], &upgrade.option, &ctx);
            self.index.register_gains(&upgrade.option.gains);
        }
    }

    fn apply_upgrades(&mut self, diagnostics: &mut Diagnostics) {
        let unit = self.unit;
        let mut grouped: Vec<(&str, Vec<&SelectedUpgrade>)> = Vec::new();

        for upgrade in &unit.selected_upgrades {
            if upgrade.upgrade.is_grouped() {
                let uid = upgrade.upgrade.uid.as_str();
                match grouped.iter_mut().find(|(u, _)| *u == uid) {
                    Some((_, members)) => members.push(upgrade),
                    None => grouped.push((uid, vec![upgrade])),
                }
            } else {
                self.apply_individual(upgrade, diagnostics);
            }
        }

        for (_, members) in &grouped {
            self.apply_grouped(members, diagnostics);
        }
    }

    fn finish(self, diagnostics: &mut Diagnostics) -> ResolvedSubUnit {
        let unit = self.unit;
        let config = self.config;
        let is_hero = unit.has_rule(&config.hero_rule_name);

        let quality_bonus = item_rule_total(&unit.items, &config.quality_rule_name);
        let defense_bonus = item_rule_total(&unit.items, &config.defense_rule_name);
        let quality = unit.quality.saturating_sub(u8::try_from(quality_bonus).unwrap_or(u8::MAX));
        let defense = unit.defense.saturating_sub(u8::try_from(defense_bonus).unwrap_or(u8::MAX));

        let caster = unit
            .rules
            .iter()
            .find(|r| r.name == config.caster_rule_name)
            .map(RawRule::rating_value)
            .or_else(|| {
                self.models
                    .iter()
                    .flat_map(ResolvedModel::upgrade_rules)
                    .find(|r| r.name == config.caster_rule_name)
                    .map(ResolvedRule::rating_value)
            });

        let mut notes = Vec::new();
        if let Some(note) = unit.notes.as_ref().filter(|n| !n.trim().is_empty()) {
            notes.push(note.clone());
        }
        if unit.has_validation_issues() {
            let note = validation_note(unit);
            diagnostics.notice(
                Some(unit.selection_id.as_str()),
                format!("{}: {}", unit.display_name(), note),
            );
            notes.push(note);
        }

        let custom_name = if config.preserve_custom_names {
            unit.custom_name.clone().filter(|n| !n.trim().is_empty())
        } else {
            None
        };

        ResolvedSubUnit {
            id: unit.selection_id.clone(),
            source_unit_ids: vec![unit.id.clone()],
            source_selection_ids: vec![unit.selection_id.clone()],
            name: unit.name.clone(),
            custom_name,
            quality,
            defense,
            size: unit.size,
            cost: unit_cost(unit, is_hero, config),
            is_hero,
            is_caster: caster.is_some(),
            caster_rating: caster.flatten(),
            xp: unit.xp,
            traits: unit.traits.clone(),
            weapons: summarize_weapons(self.models.iter().flat_map(|m| m.weapons.iter())),
            rules: unit.rules.iter().map(ResolvedRule::from).collect(),
            items: unit.items.iter().flat_map(RawItem::rules).map(ResolvedRule::from).collect(),
            total_tough: self.models.iter().map(|m| m.max_tough).sum(),
            models: self.models,
            notes,
        }
    }
}

fn validation_note(unit: &RawUnit) -> String {
    let mut reasons = Vec::new();
    if !unit.valid {
        reasons.push("marked invalid by the list builder".to_string());
    }
    if unit.has_balance_invalid {
        reasons.push("balance invalid".to_string());
    }
    let disabled: Vec<&str> = unit
        .disabled_sections
        .iter()
        .chain(&unit.disabled_upgrade_sections)
        .map(String::as_str)
        .collect();
    if !disabled.is_empty() {
        reasons.push(format!("disabled sections: {}", disabled.join(", ")));
    }
    format!("VALIDATION: {}", reasons.join("; "))
}

/// Resolve one structurally sound unit
pub fn resolve_unit(
    unit: &RawUnit,
    config: &ConversionConfig,
    diagnostics: &mut Diagnostics,
) -> ResolvedSubUnit {
    tracing::debug!(
        unit = %unit.selection_id,
        name = %unit.name,
        size = unit.size,
        upgrades = unit.selected_upgrades.len(),
        "Resolving unit"
    );

    let mut resolver = UnitResolver::new(unit, config);
    resolver.apply_upgrades(diagnostics);
    resolver.finish(diagnostics)
}
