//! Raw roster model - the list builder's export, read-only

pub mod army_list;
mod loader;
pub mod units;
pub mod upgrades;

pub use army_list::{RawRoster, RosterEntry};
pub use loader::{load_roster, parse_roster};
pub use units::{Dependency, ItemContent, RawItem, RawRule, RawUnit, RawWeapon};
pub use upgrades::{
    Affects, Gain, OptionCost, SectionVariant, Select, SelectedUpgrade, UpgradeOption,
    UpgradeSection,
};
