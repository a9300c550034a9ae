//! Render events: notable occurrences queued by the engine for the renderer.
//!
//! The engine appends events as they happen; the renderer drains the queue
//! once per frame and decides how (or whether) to present each one. Events
//! carry plain values only, never references into engine state.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{ItemType, PerkType, SkillType};
use crate::ids::TaskId;

/// A single notable occurrence in the simulation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(tag = "type")]
pub enum RenderEvent {
    /// A skill gained one or more levels from a single XP award.
    SkillUp {
        /// The skill that leveled.
        skill: SkillType,
        /// Net number of levels gained by the award.
        levels_gained: u32,
        /// The skill's level after the award.
        new_level: u32,
    },
    /// A perk was granted for the first time.
    GainedPerk {
        /// The perk now owned.
        perk: PerkType,
    },
    /// The player consumed held items.
    UsedItem {
        /// The item consumed.
        item: ItemType,
        /// How many units were consumed.
        count: u32,
    },
    /// A hidden task was unlocked and added to the live task set.
    UnlockedTask {
        /// The unlocked task.
        task_id: TaskId,
        /// Display name of the unlocked task.
        name: String,
    },
    /// A skill was revealed for the first time.
    UnlockedSkill {
        /// The revealed skill.
        skill: SkillType,
    },
    /// The first Power was earned.
    UnlockedPower,
    /// A task finished one repetition.
    TaskCompleted {
        /// The finished task.
        task_id: TaskId,
        /// Repetitions completed so far, including this one.
        reps: u32,
        /// Whether the task has no repetitions left.
        fully_finished: bool,
    },
    /// The player traveled into a new zone.
    ZoneEntered {
        /// Index of the zone entered.
        zone: u32,
    },
    /// There are no further zones or the prestige task was completed.
    EndOfContent,
    /// Energy ran out; the game is over until an energy reset.
    EnergyDepleted,
}
