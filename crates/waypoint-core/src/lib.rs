//! Tick cycle, skill ledger and progression rules for the Waypoint
//! simulation.
//!
//! This crate owns the mutable [`Gamestate`] and every rule that changes
//! it. Engine functions take the state and the shared catalog explicitly;
//! [`GameSession`] bundles both with a save sink for drivers and renderers.
//!
//! # Modules
//!
//! - [`automation`] -- Per-zone priority lists and the automation pick
//! - [`config`] -- Configuration loading from `waypoint-config.yaml`
//! - [`energy`] -- The energy gauge
//! - [`error`] -- Rejected player actions
//! - [`events`] -- The render event queue
//! - [`gamestate`] -- The root aggregate, skill entries and task instances
//! - [`items`] -- Granting, consuming and auto-using items
//! - [`modifiers`] -- Speed, cost, drain and experience resolution
//! - [`prestige`] -- Energy depletion, the energy reset and its report
//! - [`session`] -- [`GameSession`] and the [`SaveSink`] seam
//! - [`skills`] -- Experience curves, levels, Power and Attunement
//! - [`tasks`] -- Task selection, progress and completion
//! - [`tick`] -- The per-tick cycle
//! - [`zones`] -- Zone travel and task set initialization
//!
//! [`GameSession`]: session::GameSession
//! [`SaveSink`]: session::SaveSink
//! [`Gamestate`]: gamestate::Gamestate

pub mod automation;
pub mod config;
pub mod energy;
pub mod error;
pub mod events;
pub mod gamestate;
pub mod items;
pub mod modifiers;
pub mod prestige;
pub mod session;
pub mod skills;
pub mod tasks;
pub mod tick;
pub mod zones;

pub use config::{ConfigError, EngineConfig};
pub use energy::EnergyGauge;
pub use error::ActionError;
pub use gamestate::{Gamestate, SkillState, TaskState};
pub use prestige::ResetReport;
pub use session::{GameSession, NullSink, SaveSink, SinkError};
pub use tick::TickSummary;
