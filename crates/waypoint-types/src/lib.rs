//! Shared type definitions for the Waypoint simulation.
//!
//! This crate holds the identities shared by the catalog, the engine and
//! the renderer. Types flow downstream to `TypeScript` via `ts-rs` so the
//! renderer can decode render events and enum values without duplicating
//! them by hand.
//!
//! # Modules
//!
//! - [`ids`] -- Integer identifier newtypes for catalog records
//! - [`enums`] -- Skill, task, item, perk and automation enumerations
//! - [`events`] -- Render events queued for the renderer

pub mod enums;
pub mod events;
pub mod ids;

// Re-export all public types at crate root for convenience.
pub use enums::{AutomationMode, ItemType, PerkType, SkillType, TaskType};
pub use events::RenderEvent;
pub use ids::TaskId;
