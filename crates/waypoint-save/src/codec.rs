//! The save document and its two-phase codec.
//!
//! [`SaveData::from_state`] projects a [`Gamestate`] onto plain data:
//! task instances keep only their definition's id, and map-valued fields
//! become lists of `[key, value]` pairs. [`SaveData::rehydrate`] reverses
//! the projection against a catalog, resolving every id through the
//! catalog's task index so restored instances share the catalog's `Arc`s.
//!
//! Transient fields are not saved: the selected task, queued render events,
//! the debug throughput multiplier and any pending save request.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use waypoint_catalog::{Catalog, TaskDefinition};
use waypoint_core::{EnergyGauge, Gamestate, SkillState, TaskState};
use waypoint_types::{AutomationMode, ItemType, PerkType, SkillType, TaskId};

use crate::error::SaveError;

/// Format revision written by this build.
pub const SAVE_VERSION: u32 = 1;

/// A saved task instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskStateData {
    /// Id of the task's catalog definition.
    pub task_definition: TaskId,
    /// Progress toward the current repetition.
    pub progress: f64,
    /// Completed repetitions.
    pub reps: u32,
    /// Whether the task could be selected.
    pub enabled: bool,
    /// Whether a haste charge was applied.
    pub hasted: bool,
}

impl From<&TaskState> for TaskStateData {
    fn from(task: &TaskState) -> Self {
        Self {
            task_definition: task.id(),
            progress: task.progress,
            reps: task.reps,
            enabled: task.enabled,
            hasted: task.hasted,
        }
    }
}

/// The persisted document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveData {
    /// Format revision.
    pub version: u32,
    /// When the save was written.
    pub saved_at: DateTime<Utc>,

    /// Live task instances.
    pub tasks: Vec<TaskStateData>,
    /// Revealed hidden tasks.
    pub unlocked_tasks: Vec<TaskId>,
    /// Current zone index.
    pub current_zone: u32,
    /// Furthest zone reached.
    pub highest_zone: u32,

    /// Keep tasks selected after a repetition.
    pub repeat_tasks: bool,
    /// Automation scope.
    #[serde(default)]
    pub automation_mode: AutomationMode,
    /// Per-zone automation priorities as `[zone, ids]` pairs.
    pub automation_prios: Vec<(u32, Vec<TaskId>)>,
    /// Automatic item use.
    pub auto_use_items: bool,

    /// Skill levels at the start of the epoch.
    pub skills_at_start_of_reset: Vec<u32>,
    /// Power at the start of the epoch.
    pub power_at_start_of_reset: u32,
    /// Attunement at the start of the epoch.
    pub attunement_at_start_of_reset: u32,

    /// Skill ledger in [`SkillType::ALL`] order.
    pub skills: Vec<SkillState>,
    /// Revealed skills.
    pub unlocked_skills: Vec<SkillType>,
    /// Owned perks as `[perk, owned]` pairs.
    pub perks: Vec<(PerkType, bool)>,
    /// Held items as `[item, count]` pairs.
    pub items: Vec<(ItemType, u32)>,
    /// Haste charges waiting for a selection.
    pub queued_scrolls_of_haste: u32,

    /// The run had ended.
    pub is_in_game_over: bool,
    /// No further content was reachable.
    pub is_at_end_of_content: bool,

    /// Energy gauge.
    pub energy: EnergyGauge,
    /// Energy resets performed.
    pub energy_reset_count: u32,

    /// Power.
    pub power: u32,
    /// Whether Power was ever gained.
    pub has_unlocked_power: bool,
    /// Attunement.
    pub attunement: u32,
}

impl SaveData {
    /// Project a state onto the save document.
    pub fn from_state(state: &Gamestate, saved_at: DateTime<Utc>) -> Self {
        Self {
            version: SAVE_VERSION,
            saved_at,
            tasks: state.tasks.iter().map(TaskStateData::from).collect(),
            unlocked_tasks: state.unlocked_tasks.iter().copied().collect(),
            current_zone: state.current_zone,
            highest_zone: state.highest_zone,
            repeat_tasks: state.repeat_tasks,
            automation_mode: state.automation_mode,
            automation_prios: state
                .automation_prios
                .iter()
                .map(|(zone, ids)| (*zone, ids.clone()))
                .collect(),
            auto_use_items: state.auto_use_items,
            skills_at_start_of_reset: state.skills_at_start_of_reset.clone(),
            power_at_start_of_reset: state.power_at_start_of_reset,
            attunement_at_start_of_reset: state.attunement_at_start_of_reset,
            skills: state.skills.clone(),
            unlocked_skills: state.unlocked_skills.iter().copied().collect(),
            perks: state.perks.iter().map(|perk| (*perk, true)).collect(),
            items: state
                .items
                .iter()
                .map(|(item, count)| (*item, *count))
                .collect(),
            queued_scrolls_of_haste: state.queued_scrolls_of_haste,
            is_in_game_over: state.is_in_game_over,
            is_at_end_of_content: state.is_at_end_of_content,
            energy: state.energy,
            energy_reset_count: state.energy_reset_count,
            power: state.power,
            has_unlocked_power: state.has_unlocked_power,
            attunement: state.attunement,
        }
    }

    /// Rebuild a state, resolving task ids through the catalog.
    ///
    /// # Errors
    ///
    /// Returns [`SaveError::VersionMismatch`] for a foreign format revision,
    /// [`SaveError::SkillLedgerMismatch`] if the ledger does not list every
    /// skill in order, [`SaveError::ZoneOutOfRange`] for a zone the catalog
    /// lacks, and [`SaveError::UnknownTask`] for any unresolved task id.
    pub fn rehydrate(self, catalog: &Catalog) -> Result<Gamestate, SaveError> {
        if self.version != SAVE_VERSION {
            return Err(SaveError::VersionMismatch {
                found: self.version,
                expected: SAVE_VERSION,
            });
        }
        check_ledger(&self.skills, &self.skills_at_start_of_reset)?;
        for zone in [self.current_zone, self.highest_zone] {
            if catalog.zone(zone).is_none() {
                return Err(SaveError::ZoneOutOfRange {
                    zone,
                    zones: catalog.zone_count(),
                });
            }
        }

        let tasks = self
            .tasks
            .iter()
            .map(|saved| {
                Ok(TaskState {
                    definition: Arc::clone(resolve(catalog, saved.task_definition)?),
                    progress: saved.progress,
                    reps: saved.reps,
                    enabled: saved.enabled,
                    hasted: saved.hasted,
                })
            })
            .collect::<Result<Vec<_>, SaveError>>()?;

        let mut unlocked_tasks = BTreeSet::new();
        for id in self.unlocked_tasks {
            resolve(catalog, id)?;
            unlocked_tasks.insert(id);
        }

        let mut automation_prios = BTreeMap::new();
        for (zone, ids) in self.automation_prios {
            for id in &ids {
                resolve(catalog, *id)?;
            }
            automation_prios.insert(zone, ids);
        }

        Ok(Gamestate {
            tasks,
            unlocked_tasks,
            current_zone: self.current_zone,
            highest_zone: self.highest_zone,
            repeat_tasks: self.repeat_tasks,
            automation_mode: self.automation_mode,
            automation_prios,
            auto_use_items: self.auto_use_items,
            skills_at_start_of_reset: self.skills_at_start_of_reset,
            power_at_start_of_reset: self.power_at_start_of_reset,
            attunement_at_start_of_reset: self.attunement_at_start_of_reset,
            skills: self.skills,
            unlocked_skills: self.unlocked_skills.into_iter().collect(),
            perks: self
                .perks
                .into_iter()
                .filter_map(|(perk, owned)| owned.then_some(perk))
                .collect(),
            items: self.items.into_iter().collect(),
            queued_scrolls_of_haste: self.queued_scrolls_of_haste,
            is_in_game_over: self.is_in_game_over,
            is_at_end_of_content: self.is_at_end_of_content,
            energy: self.energy,
            energy_reset_count: self.energy_reset_count,
            power: self.power,
            has_unlocked_power: self.has_unlocked_power,
            attunement: self.attunement,
            ..Gamestate::default()
        })
    }
}

fn resolve(catalog: &Catalog, id: TaskId) -> Result<&Arc<TaskDefinition>, SaveError> {
    catalog.task(id).ok_or(SaveError::UnknownTask(id))
}

fn check_ledger(skills: &[SkillState], snapshot: &[u32]) -> Result<(), SaveError> {
    if skills.len() != SkillType::COUNT {
        return Err(SaveError::SkillLedgerMismatch {
            reason: format!("{} entries, expected {}", skills.len(), SkillType::COUNT),
        });
    }
    if snapshot.len() != SkillType::COUNT {
        return Err(SaveError::SkillLedgerMismatch {
            reason: format!(
                "{} epoch snapshot entries, expected {}",
                snapshot.len(),
                SkillType::COUNT
            ),
        });
    }
    if let Some((entry, expected)) = skills
        .iter()
        .zip(SkillType::ALL)
        .find(|(entry, expected)| entry.skill_type != *expected)
    {
        return Err(SaveError::SkillLedgerMismatch {
            reason: format!("found {:?} where {expected:?} belongs", entry.skill_type),
        });
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use waypoint_core::tasks;

    use super::*;

    fn catalog() -> Catalog {
        Catalog::standard().unwrap()
    }

    #[test]
    fn maps_serialize_as_pairs() {
        let catalog = catalog();
        let mut state = Gamestate::new(&catalog);
        state.items.insert(ItemType::Coin, 3);
        state.perks.insert(PerkType::Reading);
        state.automation_prios.insert(0, vec![TaskId(4), TaskId(0)]);

        let json = serde_json::to_value(SaveData::from_state(&state, Utc::now())).unwrap();
        assert_eq!(json["items"], serde_json::json!([["Coin", 3]]));
        assert_eq!(json["perks"], serde_json::json!([["Reading", true]]));
        assert_eq!(json["automation_prios"], serde_json::json!([[0, [4, 0]]]));
        assert_eq!(json["tasks"][0]["task_definition"], serde_json::json!(0));
    }

    #[test]
    fn transient_fields_are_dropped() {
        let catalog = catalog();
        let mut state = Gamestate::new(&catalog);
        state.perks.insert(PerkType::DeepTrance);
        tasks::click_task(&mut state, TaskId(4)).unwrap();
        state.automation_mode = AutomationMode::All;
        state.progress_multiplier = 10.0;
        state.save_requested = true;

        let restored = SaveData::from_state(&state, Utc::now())
            .rehydrate(&catalog)
            .unwrap();
        assert_eq!(restored.active_task, None);
        assert_eq!(restored.automation_mode, AutomationMode::All);
        assert!(restored.pending_render_events.is_empty());
        assert!(!restored.save_requested);
        assert!((restored.progress_multiplier - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn unowned_perk_pairs_are_skipped() {
        let catalog = catalog();
        let mut data = SaveData::from_state(&Gamestate::new(&catalog), Utc::now());
        data.perks = vec![(PerkType::Reading, false), (PerkType::Writing, true)];
        let restored = data.rehydrate(&catalog).unwrap();
        assert!(!restored.has_perk(PerkType::Reading));
        assert!(restored.has_perk(PerkType::Writing));
    }

    #[test]
    fn rejects_foreign_version() {
        let catalog = catalog();
        let mut data = SaveData::from_state(&Gamestate::new(&catalog), Utc::now());
        data.version = 99;
        assert!(matches!(
            data.rehydrate(&catalog),
            Err(SaveError::VersionMismatch {
                found: 99,
                expected: SAVE_VERSION
            })
        ));
    }

    #[test]
    fn rejects_unknown_task_ids() {
        let catalog = catalog();
        let state = Gamestate::new(&catalog);

        let mut data = SaveData::from_state(&state, Utc::now());
        data.tasks[0].task_definition = TaskId(9999);
        assert!(matches!(
            data.rehydrate(&catalog),
            Err(SaveError::UnknownTask(TaskId(9999)))
        ));

        let mut data = SaveData::from_state(&state, Utc::now());
        data.automation_prios = vec![(0, vec![TaskId(4242)])];
        assert!(matches!(
            data.rehydrate(&catalog),
            Err(SaveError::UnknownTask(TaskId(4242)))
        ));
    }

    #[test]
    fn rejects_malformed_ledger_and_zone() {
        let catalog = catalog();
        let state = Gamestate::new(&catalog);

        let mut data = SaveData::from_state(&state, Utc::now());
        data.skills.pop();
        assert!(matches!(
            data.rehydrate(&catalog),
            Err(SaveError::SkillLedgerMismatch { .. })
        ));

        let mut data = SaveData::from_state(&state, Utc::now());
        data.skills.swap(0, 1);
        assert!(matches!(
            data.rehydrate(&catalog),
            Err(SaveError::SkillLedgerMismatch { .. })
        ));

        let mut data = SaveData::from_state(&state, Utc::now());
        data.current_zone = 500;
        assert!(matches!(
            data.rehydrate(&catalog),
            Err(SaveError::ZoneOutOfRange { zone: 500, .. })
        ));
    }
}
