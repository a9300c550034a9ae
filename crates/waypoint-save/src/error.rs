//! Error types for the save layer.
//!
//! Any of these on load means the save is unusable as a whole; callers
//! fall back to a fresh game rather than repairing partial state.

use waypoint_types::TaskId;

/// Errors that can occur while reading, writing or decoding a save.
#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    /// The backing store could not be read or written.
    #[error("save I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The save is not valid JSON for the expected shape.
    #[error("save serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// The save references a task the catalog does not define.
    #[error("save references unknown task {0}")]
    UnknownTask(TaskId),

    /// The save was written by an incompatible format revision.
    #[error("save format version {found} is not supported (expected {expected})")]
    VersionMismatch {
        /// Version recorded in the save.
        found: u32,
        /// Version this build reads.
        expected: u32,
    },

    /// The skill ledger does not cover every skill in order.
    #[error("save skill ledger is malformed: {reason}")]
    SkillLedgerMismatch {
        /// What was wrong with the ledger.
        reason: String,
    },

    /// The save places the player in a zone the catalog lacks.
    #[error("save zone {zone} is out of range ({zones} zones in catalog)")]
    ZoneOutOfRange {
        /// Zone recorded in the save.
        zone: u32,
        /// Number of zones in the catalog.
        zones: usize,
    },
}
