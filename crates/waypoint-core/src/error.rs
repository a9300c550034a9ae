//! Errors for rejected user intents.
//!
//! The simulation itself has no fatal errors. An [`ActionError`] means a
//! renderer call was refused and the state was left untouched.

use waypoint_types::{ItemType, PerkType, TaskId};

/// A user intent that could not be applied.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    /// The task is not part of the live task set, or not in the catalog.
    #[error("task {0} is not available")]
    TaskNotFound(TaskId),

    /// The task is live but disabled: finished, or gated behind an
    /// unfinished Mandatory task.
    #[error("task {0} is disabled")]
    TaskDisabled(TaskId),

    /// The item is not held.
    #[error("item {0:?} is not held")]
    ItemNotHeld(ItemType),

    /// The item is held but the catalog has no definition for it.
    #[error("item {0:?} has no catalog definition")]
    ItemNotDefined(ItemType),

    /// The action requires a perk the player does not own.
    #[error("requires the {0:?} perk")]
    PerkRequired(PerkType),
}
