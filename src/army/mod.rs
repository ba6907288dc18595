//! Battle-ready army produced by conversion
//!
//! Everything here is created fresh by each conversion run and handed to the
//! battle-state and persistence layers as-is.

pub mod model;
pub mod units;
pub mod weapons;

pub use model::{ModelUpgrade, ResolvedModel, UpgradeSource};
pub use units::{
    joined_defense, joined_quality, ResolvedArmy, ResolvedContainerUnit, ResolvedSubUnit,
};
pub use weapons::{summarize_weapons, EquipmentKey, ResolvedRule, ResolvedWeapon, WeaponKey};
