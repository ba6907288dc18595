//! Final model names, assigned once the units are merged

use crate::army::ResolvedContainerUnit;

/// Name every model by its position in its final subunit
///
/// A lone model with a custom name takes that name; everything else is
/// `"<display name> <n>"`, counting from 1.
pub fn name_models(container: &mut ResolvedContainerUnit) {
    for sub_unit in &mut container.sub_units {
        let display = sub_unit.display_name().to_string();
        let lone_named = sub_unit.models.len() == 1 && sub_unit.custom_name.is_some();

        for (i, model) in sub_unit.models.iter_mut().enumerate() {
            model.name = Some(if lone_named {
                display.clone()
            } else {
                format!("{} {}", display, i + 1)
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::army::{ResolvedModel, ResolvedSubUnit};

    fn sub_unit(name: &str, custom: Option<&str>, models: u32) -> ResolvedSubUnit {
        ResolvedSubUnit {
            id: "s".into(),
            source_unit_ids: vec!["u".into()],
            source_selection_ids: vec!["s".into()],
            name: name.into(),
            custom_name: custom.map(str::to_string),
            quality: 4,
            defense: 4,
            size: models,
            cost: 100,
            is_hero: false,
            is_caster: false,
            caster_rating: None,
            xp: 0,
            traits: Vec::new(),
            weapons: Vec::new(),
            rules: Vec::new(),
            items: Vec::new(),
            models: (0..models).map(|i| ResolvedModel::new("s", i, 1, false)).collect(),
            total_tough: models,
            notes: Vec::new(),
        }
    }

    #[test]
    fn test_lone_custom_named_model() {
        let truck = sub_unit("Grinder Truck", Some("Grindr Love Truck"), 1);
        let mut container = ResolvedContainerUnit::standalone(truck, false);
        name_models(&mut container);
        assert_eq!(
            container.sub_units[0].models[0].name.as_deref(),
            Some("Grindr Love Truck")
        );
    }

    #[test]
    fn test_numbered_names() {
        let mut container =
            ResolvedContainerUnit::standalone(sub_unit("Squad", Some("Red Squad"), 3), false);
        name_models(&mut container);
        let names: Vec<_> = container.sub_units[0]
            .models
            .iter()
            .filter_map(|m| m.name.clone())
            .collect();
        assert_eq!(names, ["Red Squad 1", "Red Squad 2", "Red Squad 3"]);

        let mut plain = ResolvedContainerUnit::standalone(sub_unit("Captain", None, 1), false);
        name_models(&mut plain);
        assert_eq!(plain.sub_units[0].models[0].name.as_deref(), Some("Captain 1"));
    }
}
