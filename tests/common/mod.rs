//! Shared roster fixtures

#![allow(dead_code)]

use muster::roster::{
    parse_roster, Affects, Gain, RawItem, RawRoster, RawRule, RawUnit, RawWeapon, SelectedUpgrade,
    UpgradeOption, UpgradeSection,
};

/// Grinder Truck with a custom name, one campaign level, an added item and a
/// replaced cannon, as exported by the list builder
pub const GRINDER_TRUCK_ROSTER: &str = r#"{
    "id": "IJ1JM_m-jmka",
    "name": "Dev Testerson's Army",
    "description": "An army full of odd units.",
    "pointsLimit": 2997,
    "listPoints": 370,
    "modelCount": 1,
    "gameSystem": "gf",
    "campaignMode": true,
    "forceOrgErrors": [],
    "units": [{
        "id": "q6fx4lG",
        "selectionId": "Ym0TT",
        "name": "Grinder Truck",
        "customName": "Grindr Love Truck",
        "size": 1,
        "quality": 4,
        "defense": 2,
        "cost": 285,
        "xp": 5,
        "traits": ["Agile", "Elite"],
        "combined": false,
        "joinToUnit": null,
        "rules": [
            { "id": "KdgwlPb8LuD2", "name": "Fast", "label": "Fast" },
            { "id": "62-mYKVM9MLd", "name": "Impact", "rating": 3, "label": "Impact(3)" },
            { "id": "a0YtInGiUDd6", "name": "Tough", "rating": 9, "label": "Tough(9)" }
        ],
        "weapons": [
            {
                "id": "_OuuPXyd",
                "name": "Heavy Machinegun",
                "type": "ArmyBookWeapon",
                "range": 30,
                "attacks": 3,
                "weaponId": "_OuuPXyd",
                "specialRules": [{ "type": "ArmyBookRule", "name": "AP", "rating": 1, "label": "AP(1)" }],
                "label": "Heavy Machinegun (30\", A3, AP(1))",
                "count": 1
            },
            {
                "id": "b15ZGemJ",
                "name": "Heavy Quake Cannon",
                "type": "ArmyBookWeapon",
                "count": 1,
                "range": 24,
                "attacks": 2,
                "weaponId": "uWZ7nsBU",
                "specialRules": [
                    { "type": "ArmyBookRule", "name": "Blast", "rating": 3, "label": "Blast(3)" },
                    { "type": "ArmyBookRule", "name": "Rending", "label": "Rending" }
                ],
                "label": "Heavy Quake Cannon (24\", A2, Blast(3), Rending)",
                "dependencies": [{ "upgradeInstanceId": "0hciRfLyY", "count": 1, "variant": "replace" }]
            }
        ],
        "items": [],
        "selectedUpgrades": [
            {
                "instanceId": "5aNRiO6Rx",
                "upgrade": { "id": "UoIEmD9", "uid": "Q9Msl", "label": "Upgrade with", "variant": "upgrade" },
                "option": {
                    "uid": "sPtME",
                    "cost": 25,
                    "costs": [{ "cost": 25, "unitId": "q6fx4lG" }],
                    "gains": [{
                        "name": "Great Grinder",
                        "type": "ArmyBookItem",
                        "label": "Great Grinder (Impact(5))",
                        "content": [{ "id": "62-mYKVM9MLd", "name": "Impact", "type": "ArmyBookRule", "rating": 5 }],
                        "count": 1,
                        "dependencies": []
                    }],
                    "label": "Great Grinder (Impact(5))"
                }
            },
            {
                "instanceId": "0hciRfLyY",
                "upgrade": {
                    "id": "hC0oFvN",
                    "uid": "lkbv4rH",
                    "label": "Replace Heavy Quake Cannon",
                    "variant": "replace",
                    "targets": ["Heavy Quake Cannon"]
                },
                "option": {
                    "uid": "Ijpb1fK",
                    "cost": 25,
                    "costs": [{ "cost": 35, "unitId": "q6fx4lG" }],
                    "gains": [{
                        "name": "Rapid Heavy Mining Laser",
                        "type": "ArmyBookWeapon",
                        "count": 1,
                        "range": 24,
                        "attacks": "2",
                        "weaponId": "usxbIqqy",
                        "specialRules": [
                            { "name": "AP", "type": "ArmyBookRule", "rating": 3 },
                            { "name": "Deadly", "type": "ArmyBookRule", "rating": 3 }
                        ],
                        "label": "Rapid Heavy Mining Laser (24\", A2, AP(3), Deadly(3))",
                        "dependencies": []
                    }],
                    "label": "Rapid Heavy Mining Laser (24\", A2, AP(3), Deadly(3))"
                }
            }
        ],
        "valid": true,
        "disabledSections": [],
        "hasBalanceInvalid": false,
        "disabledUpgradeSections": []
    }]
}"#;

pub fn grinder_truck_roster() -> RawRoster {
    parse_roster(GRINDER_TRUCK_ROSTER).expect("fixture parses")
}

fn energy_fist_swap(instance_id: &str) -> SelectedUpgrade {
    let mut fist =
        RawWeapon::new("kuBk4Uc4", "Energy Fist", 0, 3).with_rule(RawRule::rated("AP", 4));
    fist.weapon_id = Some("p2SC0q9O".into());
    fist.label = "Energy Fist (A3, AP(4))".into();

    SelectedUpgrade::new(
        instance_id,
        UpgradeSection::replace("TNUc16_", "Replace any CCW").affecting(Affects::Any),
        UpgradeOption::new("0vd07Zg", "Energy Fist (A3, AP(4))")
            .costing("1oucreF", 20)
            .gaining(Gain::Weapon(fist)),
    )
}

/// Three sisters with CCWs, two of which are swapped for Energy Fists
pub fn wall_of_shame_sisters() -> RawUnit {
    let mut ccw = RawWeapon::new("1GVQ5U_c", "CCW", 0, 3)
        .with_count(3)
        .replaceable_by("D3rT6zU1R")
        .replaceable_by("Z5YQiM-27")
        .replaceable_by("7z8kB7RR9");
    ccw.weapon_id = Some("tO5jEqMO".into());

    RawUnit::new("1oucreF", "GRN0e", "Destroyer Sisters", 3, 135)
        .with_custom_name("Wall of Shame Sisters")
        .with_rule(RawRule::named("Ambush"))
        .with_rule(RawRule::rated("Tough", 3))
        .with_weapon(ccw)
        .with_item(RawItem::new("Q8WK1", "Combat Shield").with_rule(RawRule::named("Shield Wall")))
        .with_upgrade(energy_fist_swap("D3rT6zU1R"))
        .with_upgrade(energy_fist_swap("Z5YQiM-27"))
}

/// Regular squad whose rifles may be replaced by any of `upgrade_ids`
pub fn rifle_squad(
    id: &str,
    selection_id: &str,
    size: u32,
    cost: i32,
    upgrade_ids: &[&str],
) -> RawUnit {
    let mut rifle =
        RawWeapon::new(&format!("{}-rifle", selection_id), "Rifle", 24, 1).with_count(size);
    for upgrade in upgrade_ids {
        rifle = rifle.replaceable_by(upgrade);
    }
    RawUnit::new(id, selection_id, "Infantry Squad", size, cost)
        .with_stats(5, 4)
        .with_weapon(rifle)
        .with_weapon(RawWeapon::new(&format!("{}-ccw", selection_id), "CCW", 0, 1).with_count(size))
}

pub fn captain(selection_id: &str, cost: i32) -> RawUnit {
    RawUnit::new("cpt", selection_id, "Captain", 1, cost)
        .with_stats(3, 3)
        .with_rule(RawRule::named("Hero"))
        .with_rule(RawRule::rated("Tough", 3))
        .with_weapon(RawWeapon::new(&format!("{}-pistol", selection_id), "Pistol", 12, 1))
}

/// Weapon swap gaining a catalog-only weapon
pub fn weapon_swap(
    instance_id: &str,
    section: UpgradeSection,
    weapon: &str,
    cost: i32,
    unit_id: &str,
) -> SelectedUpgrade {
    let catalog_id = weapon.to_lowercase().replace(' ', "-");
    SelectedUpgrade::new(
        instance_id,
        section,
        UpgradeOption::new(&format!("{}-option", instance_id), weapon)
            .costing(unit_id, cost)
            .gaining(Gain::Weapon(RawWeapon::catalog(&catalog_id, weapon, 24, 1))),
    )
}

/// Option gaining a heavy weapon crewed by an extra Tough(3)
pub fn weapon_team(instance_id: &str, section: UpgradeSection) -> SelectedUpgrade {
    SelectedUpgrade::new(
        instance_id,
        section,
        UpgradeOption::new(&format!("{}-option", instance_id), "Mortar Team").gaining(Gain::Item(
            RawItem::new(&format!("{}-team", instance_id), "Mortar Team")
                .with_weapon(RawWeapon::new(&format!("{}-mortar", instance_id), "Mortar", 30, 1))
                .with_rule(RawRule::rated("Tough", 3)),
        )),
    )
}

pub fn roster_of(units: Vec<RawUnit>) -> RawRoster {
    units
        .into_iter()
        .fold(RawRoster::new("army", "Test Army", 2000), RawRoster::with_unit)
}
