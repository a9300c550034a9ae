//! Error types for the `waypoint-catalog` crate.
//!
//! A catalog either validates completely or is rejected; the engine never
//! runs against a partially valid catalog.

use waypoint_types::{ItemType, PerkType, SkillType, TaskId};

/// Errors that can occur while building or loading a catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Failed to read a catalog file from disk.
    #[error("failed to read catalog file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse catalog YAML.
    #[error("failed to parse catalog YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// The catalog has no zones.
    #[error("catalog must contain at least one zone")]
    NoZones,

    /// Two tasks share the same id.
    #[error("duplicate task id: {0}")]
    DuplicateTaskId(TaskId),

    /// A task lists no skills.
    #[error("task {0} must use at least one skill")]
    EmptySkillList(TaskId),

    /// A task can never be completed.
    #[error("task {0} must allow at least one repetition")]
    ZeroMaxReps(TaskId),

    /// A task has a zero, negative or non-finite cost multiplier.
    #[error("task {task} has invalid cost multiplier {value}")]
    InvalidCostMultiplier {
        /// The offending task.
        task: TaskId,
        /// The rejected multiplier.
        value: f64,
    },

    /// A task unlocks a task id that does not exist.
    #[error("task {task} unlocks unknown task {target}")]
    UnknownUnlock {
        /// The task carrying the unlock.
        task: TaskId,
        /// The id that failed to resolve.
        target: TaskId,
    },

    /// A skill has no definition.
    #[error("missing definition for skill {0:?}")]
    MissingSkillDefinition(SkillType),

    /// A skill has more than one definition.
    #[error("duplicate definition for skill {0:?}")]
    DuplicateSkillDefinition(SkillType),

    /// A task grants an item that has no definition.
    #[error("missing definition for item {0:?}")]
    MissingItemDefinition(ItemType),

    /// A task grants a perk that has no definition.
    #[error("missing definition for perk {0:?}")]
    MissingPerkDefinition(PerkType),
}

impl From<serde_yml::Error> for CatalogError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}
