//! Immutable content catalog for the Waypoint simulation.
//!
//! The catalog is static configuration data: skills, items, perks and the
//! ordered zones with their tasks. The engine depends only on the shapes of
//! these records, never on specific entries. A catalog is built once,
//! validated, and shared behind an `Arc` for the rest of the process.
//!
//! # Modules
//!
//! - [`catalog`] -- The validated [`Catalog`] and its global task index
//! - [`definitions`] -- Record shapes for skills, tasks, items, perks and zones
//! - [`error`] -- Catalog validation and loading errors
//! - [`standard`] -- The built-in content

pub mod catalog;
pub mod definitions;
pub mod error;
pub mod standard;

pub use catalog::Catalog;
pub use definitions::{
    CatalogSource, ConsumeEffect, ItemDefinition, PerkDefinition, SkillDefinition,
    TaskDefinition, ZoneDefinition, ZoneSource,
};
pub use error::CatalogError;
pub use standard::standard_source;
