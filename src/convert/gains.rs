//! Applying base equipment and upgrade gains to a single model

use crate::army::{
    EquipmentKey, ModelUpgrade, ResolvedModel, ResolvedRule, ResolvedWeapon, UpgradeSource,
};
use crate::core::config::ConversionConfig;
use crate::roster::{
    Affects, Gain, RawItem, RawRule, RawWeapon, SectionVariant, UpgradeOption, UpgradeSection,
};

/// How a section's gains land on a model
#[derive(Debug, Clone, Copy)]
pub struct GainContext<'a> {
    pub variant: SectionVariant,
    pub affects: Option<Affects>,
    pub reassignable: bool,
    pub instance_id: &'a str,
    pub config: &'a ConversionConfig,
}

impl<'a> GainContext<'a> {
    pub fn for_section(
        section: &UpgradeSection,
        instance_id: &'a str,
        config: &'a ConversionConfig,
    ) -> Self {
        Self {
            variant: section.variant,
            affects: section.affects,
            reassignable: is_reassignable(section),
            instance_id,
            config,
        }
    }

    fn source(&self, bundles_weapon: bool, rules: &[ResolvedRule]) -> UpgradeSource {
        classify_source(
            bundles_weapon,
            rules.iter().any(|r| r.name == self.config.tough_rule_name),
            self.affects,
        )
    }

    fn adjust_toughness(&self, model: &mut ResolvedModel, rules: &[ResolvedRule]) {
        for rule in rules.iter().filter(|r| r.name == self.config.tough_rule_name) {
            let Some(value) = rule.rating_value() else {
                continue;
            };
            match self.variant {
                SectionVariant::Replace => model.set_toughness(value),
                SectionVariant::Add => model.add_toughness(value),
            }
        }
    }
}

/// A player may move the upgrade when it picks exactly one model, or when it
/// replaces equipment on any model
pub fn is_reassignable(section: &UpgradeSection) -> bool {
    let exactly_one = section.select.as_ref().is_some_and(|s| s.is_exactly_one());
    let replace_any =
        section.variant == SectionVariant::Replace && section.affects == Some(Affects::Any);
    exactly_one || replace_any
}

/// Weapon plus toughness is a crewed weapon; a unit-wide section is
/// unit-wide; anything else was picked for one model
pub fn classify_source(
    bundles_weapon: bool,
    grants_tough: bool,
    affects: Option<Affects>,
) -> UpgradeSource {
    if bundles_weapon && grants_tough {
        UpgradeSource::WeaponTeam
    } else if affects == Some(Affects::All) {
        UpgradeSource::UnitWide
    } else {
        UpgradeSource::ChooseModel
    }
}

fn item_label(item: &RawItem) -> String {
    if item.label.is_empty() {
        item.name.clone()
    } else {
        item.label.clone()
    }
}

fn unpack_item_weapons(model: &mut ResolvedModel, item: &RawItem, config: &ConversionConfig) {
    let item_key = EquipmentKey::of_item(item);
    for weapon in item.weapons() {
        let mut resolved =
            ResolvedWeapon::from_raw(weapon, weapon.count.max(1), &config.ap_rule_name);
        resolved.from_item = Some(item_key.clone());
        model.weapons.push(resolved);
    }
}

/// Give a model its share of a base weapon
pub fn apply_base_weapon(
    model: &mut ResolvedModel,
    weapon: &RawWeapon,
    per_model: u32,
    config: &ConversionConfig,
) {
    model
        .weapons
        .push(ResolvedWeapon::from_raw(weapon, per_model, &config.ap_rule_name));
}

/// Give a model a base item
///
/// Base items are part of the profile: they are recorded unit-wide, cannot be
/// moved, and never change toughness (the profile's own Tough rule already
/// accounts for them).
pub fn apply_base_item(model: &mut ResolvedModel, item: &RawItem, config: &ConversionConfig) {
    unpack_item_weapons(model, item, config);
    model.upgrades.push(ModelUpgrade {
        label: item_label(item),
        rules: item.rules().map(ResolvedRule::from).collect(),
        reassignable: false,
        source: UpgradeSource::UnitWide,
        upgrade_instance_id: None,
        equipment: Some(EquipmentKey::of_item(item)).filter(EquipmentKey::is_identifiable),
    });
}

/// Apply every gain of an option to one model
///
/// Each item gain becomes its own upgrade record. Direct weapon and rule gains
/// are gathered into one record labelled after the option.
pub fn apply_option(model: &mut ResolvedModel, option: &UpgradeOption, ctx: &GainContext) {
    let mut direct_rules: Vec<ResolvedRule> = Vec::new();
    let mut direct_weapon = false;

    for gain in &option.gains {
        match gain {
            Gain::Weapon(weapon) => {
                direct_weapon = true;
                model.weapons.push(ResolvedWeapon::from_raw(
                    weapon,
                    weapon.count.max(1),
                    &ctx.config.ap_rule_name,
                ));
            }
            Gain::Rule(rule) => direct_rules.push(ResolvedRule::from(rule)),
            Gain::Item(item) => apply_item_gain(model, item, ctx),
        }
    }

    if direct_weapon || !direct_rules.is_empty() {
        ctx.adjust_toughness(model, &direct_rules);
        model.upgrades.push(ModelUpgrade {
            label: option.label.clone(),
            source: ctx.source(direct_weapon, &direct_rules),
            rules: direct_rules,
            reassignable: ctx.reassignable,
            upgrade_instance_id: Some(ctx.instance_id.to_string()),
            equipment: None,
        });
    }
}

fn apply_item_gain(model: &mut ResolvedModel, item: &RawItem, ctx: &GainContext) {
    unpack_item_weapons(model, item, ctx.config);

    let rules: Vec<ResolvedRule> = item.rules().map(ResolvedRule::from).collect();
    ctx.adjust_toughness(model, &rules);

    model.upgrades.push(ModelUpgrade {
        label: item_label(item),
        source: ctx.source(item.weapons().next().is_some(), &rules),
        rules,
        reassignable: ctx.reassignable,
        upgrade_instance_id: Some(ctx.instance_id.to_string()),
        equipment: Some(EquipmentKey::of_item(item)).filter(EquipmentKey::is_identifiable),
    });
}

/// Rules that name a stat adjustment inside base item content
pub fn item_rule_total<'a>(items: impl IntoIterator<Item = &'a RawItem>, rule_name: &str) -> u32 {
    items
        .into_iter()
        .flat_map(RawItem::rules)
        .filter(|r| r.name == rule_name)
        .filter_map(RawRule::rating_value)
        .sum()
}
