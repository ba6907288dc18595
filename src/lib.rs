//! Muster - roster conversion and upgrade resolution for tabletop wargames

pub mod army;
pub mod convert;
pub mod core;
pub mod roster;
