//! Folding combined squads and attaching joined heroes
//!
//! Two passes over the resolved units, in roster order. The first folds every
//! combined selection of the same profile into the first of them. The second
//! attaches each hero to the unit its join link names, looking the target up
//! by any selection id it was built from, so a hero can join a combined unit.

use ahash::AHashMap;

use crate::army::{summarize_weapons, ResolvedContainerUnit, ResolvedSubUnit};
use crate::convert::diagnostics::Diagnostics;
use crate::core::config::ConversionConfig;
use crate::roster::RawUnit;

/// A resolved selection paired with its source
#[derive(Debug, Clone)]
pub struct UnitResolution<'a> {
    pub raw: &'a RawUnit,
    pub sub_unit: ResolvedSubUnit,
}

/// A unit after the combine pass
#[derive(Debug)]
struct Slot<'a> {
    members: Vec<&'a RawUnit>,
    sub_unit: ResolvedSubUnit,
    is_combined: bool,
}

impl<'a> Slot<'a> {
    fn join_target(&self) -> Option<&'a str> {
        self.members.iter().find_map(|m| m.join_to_unit.as_deref())
    }

    /// Combined squads keep the `_combined` id even when a hero joins them
    fn container_id(&self) -> String {
        if self.is_combined {
            format!("{}_combined", self.sub_unit.id)
        } else {
            self.sub_unit.id.clone()
        }
    }

    fn into_container(self) -> ResolvedContainerUnit {
        let id = self.container_id();
        let mut container = ResolvedContainerUnit::standalone(self.sub_unit, self.is_combined);
        container.id = id;
        container
    }

    fn with_hero(self, hero: Slot) -> ResolvedContainerUnit {
        let id = self.container_id();
        let mut container = ResolvedContainerUnit::joined(self.sub_unit, hero.sub_unit);
        container.id = id;
        container
    }
}

/// Fold `rest` into `first`; models are concatenated in roster order
pub fn combine_sub_units(first: ResolvedSubUnit, rest: Vec<ResolvedSubUnit>) -> ResolvedSubUnit {
    let mut merged = first;

    for part in rest {
        merged.source_unit_ids.extend(part.source_unit_ids);
        merged.source_selection_ids.extend(part.source_selection_ids);
        merged.size += part.size;
        merged.cost += part.cost;
        merged.xp += part.xp;
        merged.total_tough += part.total_tough;
        merged.is_caster |= part.is_caster;
        merged.caster_rating = merged.caster_rating.or(part.caster_rating);
        merged.weapons = summarize_weapons(merged.weapons.iter().chain(part.weapons.iter()));
        for t in part.traits {
            if !merged.traits.contains(&t) {
                merged.traits.push(t);
            }
        }
        merged.notes.extend(part.notes);
        merged.models.extend(part.models);
    }

    merged
}

fn combine<'a>(
    resolved: Vec<UnitResolution<'a>>,
    config: &ConversionConfig,
    diagnostics: &mut Diagnostics,
) -> Vec<Slot<'a>> {
    let mut groups: Vec<(Vec<&'a RawUnit>, Vec<ResolvedSubUnit>)> = Vec::new();
    let mut by_profile: AHashMap<&'a str, usize> = AHashMap::new();

    for r in resolved {
        if config.allow_combined && r.raw.combined {
            if let Some(&g) = by_profile.get(r.raw.id.as_str()) {
                groups[g].0.push(r.raw);
                groups[g].1.push(r.sub_unit);
                continue;
            }
            by_profile.insert(r.raw.id.as_str(), groups.len());
        }
        groups.push((vec![r.raw], vec![r.sub_unit]));
    }

    let mut slots = Vec::with_capacity(groups.len());
    for (members, parts) in groups {
        let mut parts = parts.into_iter();
        let Some(first) = parts.next() else {
            continue;
        };
        let rest: Vec<ResolvedSubUnit> = parts.collect();
        let is_combined = !rest.is_empty();

        if is_combined {
            tracing::debug!(
                unit = %first.id,
                parts = rest.len() + 1,
                "Combining squads"
            );
        } else if config.allow_combined && members[0].combined {
            diagnostics.link(
                members[0].selection_id.as_str(),
                format!(
                    "{} is marked combined but no other selection of the same profile was found; fielded on its own",
                    members[0].display_name()
                ),
            );
        }

        slots.push(Slot {
            sub_unit: combine_sub_units(first, rest),
            members,
            is_combined,
        });
    }
    slots
}

fn join(
    slots: Vec<Slot>,
    config: &ConversionConfig,
    diagnostics: &mut Diagnostics,
) -> Vec<ResolvedContainerUnit> {
    let count = slots.len();
    let mut hero_for: Vec<Option<usize>> = vec![None; count];
    let mut attached = vec![false; count];

    if config.allow_joined {
        let mut by_selection: AHashMap<&str, usize> = AHashMap::new();
        for (i, slot) in slots.iter().enumerate() {
            for member in &slot.members {
                let selection = member.selection_id.as_str();
                if let Some(&first) = by_selection.get(selection) {
                    diagnostics.link(
                        selection,
                        format!(
                            "Selection id {} is used by more than one unit; joins resolve to {}",
                            selection,
                            slots[first].sub_unit.display_name()
                        ),
                    );
                    continue;
                }
                by_selection.insert(selection, i);
            }
        }

        for (i, slot) in slots.iter().enumerate() {
            let Some(target) = slot.join_target() else {
                continue;
            };
            let source = slot.sub_unit.id.as_str();
            let name = slot.sub_unit.display_name();

            if !slot.sub_unit.is_hero {
                diagnostics.link(
                    source,
                    format!("{} joins {} but is not a hero; fielded on its own", name, target),
                );
                continue;
            }

            match by_selection.get(target).copied() {
                None => diagnostics.link(
                    source,
                    format!("{} joins unknown unit {}; fielded on its own", name, target),
                ),
                Some(t) if t == i => diagnostics.link(
                    source,
                    format!("{} cannot join itself; fielded on its own", name),
                ),
                Some(t) if slots[t].join_target().is_some() => diagnostics.link(
                    source,
                    format!(
                        "{} joins {}, which is itself joining another unit; fielded on its own",
                        name,
                        slots[t].sub_unit.display_name()
                    ),
                ),
                Some(t) if hero_for[t].is_some() => diagnostics.link(
                    source,
                    format!(
                        "{} already has a hero joined; {} fielded on its own",
                        slots[t].sub_unit.display_name(),
                        name
                    ),
                ),
                Some(t) => {
                    tracing::debug!(hero = %source, target = %slots[t].sub_unit.id, "Joining hero");
                    hero_for[t] = Some(i);
                    attached[i] = true;
                }
            }
        }
    }

    let mut slots: Vec<Option<Slot>> = slots.into_iter().map(Some).collect();
    let mut containers = Vec::with_capacity(count);

    for i in 0..count {
        if attached[i] {
            continue;
        }
        let Some(slot) = slots[i].take() else {
            continue;
        };
        let hero = hero_for[i].and_then(|h| slots[h].take());
        containers.push(match hero {
            Some(hero) => slot.with_hero(hero),
            None => slot.into_container(),
        });
    }

    containers
}

/// Merge resolved selections into the army's activations
pub fn merge_units(
    resolved: Vec<UnitResolution>,
    config: &ConversionConfig,
    diagnostics: &mut Diagnostics,
) -> Vec<ResolvedContainerUnit> {
    let slots = combine(resolved, config, diagnostics);
    join(slots, config, diagnostics)
}
