//! The root mutable aggregate.
//!
//! A [`Gamestate`] is explicitly constructed and passed by reference into
//! every engine function; there is no ambient global. Task instances hold
//! `Arc`s into the catalog's task index and never own definition data.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::warn;
use waypoint_catalog::{Catalog, TaskDefinition};
use waypoint_types::{AutomationMode, ItemType, PerkType, RenderEvent, SkillType, TaskId};

use crate::config::RulesConfig;
use crate::energy::EnergyGauge;
use crate::events::EventQueue;
use crate::zones;

// ---------------------------------------------------------------------------
// Skill ledger entries
// ---------------------------------------------------------------------------

/// Per-skill level and experience.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SkillState {
    /// The skill this entry tracks.
    pub skill_type: SkillType,
    /// Current level. Never decreases.
    pub level: u32,
    /// Experience toward the next level.
    pub progress: f64,
    /// Additive bonus from consumed items. Reset to 1 on every energy reset.
    pub speed_modifier: f64,
}

impl SkillState {
    /// A level 0 entry with no bonuses.
    pub const fn new(skill_type: SkillType) -> Self {
        Self {
            skill_type,
            level: 0,
            progress: 0.0,
            speed_modifier: 1.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Task instances
// ---------------------------------------------------------------------------

/// A live task instance in the current zone.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskState {
    /// Shared catalog definition.
    pub definition: Arc<TaskDefinition>,
    /// Progress toward the current repetition.
    pub progress: f64,
    /// Completed repetitions.
    pub reps: u32,
    /// Whether the task may be selected.
    pub enabled: bool,
    /// Whether a haste charge is applied to this instance.
    pub hasted: bool,
}

impl TaskState {
    /// A fresh, idle instance of a definition.
    pub const fn new(definition: Arc<TaskDefinition>) -> Self {
        Self {
            definition,
            progress: 0.0,
            reps: 0,
            enabled: true,
            hasted: false,
        }
    }

    /// The definition's id.
    pub fn id(&self) -> TaskId {
        self.definition.id
    }

    /// Whether every repetition has been completed.
    pub fn is_finished(&self) -> bool {
        self.reps >= self.definition.max_reps
    }
}

// ---------------------------------------------------------------------------
// Gamestate
// ---------------------------------------------------------------------------

/// All mutable simulation state for one play session.
#[derive(Debug, Clone, PartialEq)]
pub struct Gamestate {
    /// Live task instances for the current zone plus unlocked extras.
    pub tasks: Vec<TaskState>,
    /// The manually selected task, if any. Always a member of `tasks`.
    pub active_task: Option<TaskId>,
    /// Hidden tasks revealed so far. Survives resets.
    pub unlocked_tasks: BTreeSet<TaskId>,
    /// Index of the current zone.
    pub current_zone: u32,
    /// Furthest zone ever reached.
    pub highest_zone: u32,

    /// Keep a task selected after a repetition completes.
    pub repeat_tasks: bool,
    /// Automation scope.
    pub automation_mode: AutomationMode,
    /// Per-zone automation priority lists.
    pub automation_prios: BTreeMap<u32, Vec<TaskId>>,
    /// Consume held items automatically every tick.
    pub auto_use_items: bool,

    /// Skill levels when the current reset epoch started.
    pub skills_at_start_of_reset: Vec<u32>,
    /// Power when the current reset epoch started.
    pub power_at_start_of_reset: u32,
    /// Attunement when the current reset epoch started.
    pub attunement_at_start_of_reset: u32,

    /// Dense skill ledger indexed by [`SkillType::index`].
    pub skills: Vec<SkillState>,
    /// Skills revealed so far.
    pub unlocked_skills: BTreeSet<SkillType>,
    /// Owned perks. Never shrinks.
    pub perks: BTreeSet<PerkType>,
    /// Held item counts.
    pub items: BTreeMap<ItemType, u32>,
    /// Haste charges waiting for the next task selection.
    pub queued_scrolls_of_haste: u32,

    /// Energy ran out; ticks are no-ops until an energy reset.
    pub is_in_game_over: bool,
    /// No further content is reachable this run.
    pub is_at_end_of_content: bool,

    /// Energy gauge.
    pub energy: EnergyGauge,
    /// Number of energy resets performed.
    pub energy_reset_count: u32,

    /// Never-reset stat boosting Combat and Fortitude.
    pub power: u32,
    /// Whether Power has ever been gained.
    pub has_unlocked_power: bool,
    /// Never-reset stat boosting Study, Magic and Druid.
    pub attunement: u32,

    /// Events waiting for the renderer.
    pub pending_render_events: EventQueue,

    /// Global throughput multiplier for debugging. Not persisted.
    pub progress_multiplier: f64,
    /// Set when something worth persisting happened. Not persisted.
    pub save_requested: bool,
}

impl Default for Gamestate {
    /// A blank state with a full skill ledger and no live tasks.
    fn default() -> Self {
        Self {
            tasks: Vec::new(),
            active_task: None,
            unlocked_tasks: BTreeSet::new(),
            current_zone: 0,
            highest_zone: 0,
            repeat_tasks: true,
            automation_mode: AutomationMode::Off,
            automation_prios: BTreeMap::new(),
            auto_use_items: false,
            skills_at_start_of_reset: vec![0; SkillType::COUNT],
            power_at_start_of_reset: 0,
            attunement_at_start_of_reset: 0,
            skills: SkillType::ALL.iter().copied().map(SkillState::new).collect(),
            unlocked_skills: BTreeSet::new(),
            perks: BTreeSet::new(),
            items: BTreeMap::new(),
            queued_scrolls_of_haste: 0,
            is_in_game_over: false,
            is_at_end_of_content: false,
            energy: EnergyGauge::default(),
            energy_reset_count: 0,
            power: 0,
            has_unlocked_power: false,
            attunement: 0,
            pending_render_events: EventQueue::new(),
            progress_multiplier: 1.0,
            save_requested: false,
        }
    }
}

impl Gamestate {
    /// A fresh game at zone 0 with default rules.
    pub fn new(catalog: &Catalog) -> Self {
        Self::with_rules(catalog, &RulesConfig::default())
    }

    /// A fresh game at zone 0.
    pub fn with_rules(catalog: &Catalog, rules: &RulesConfig) -> Self {
        let mut state = Self {
            energy: EnergyGauge::full(rules.starting_energy),
            progress_multiplier: rules.progress_multiplier,
            repeat_tasks: rules.repeat_tasks,
            auto_use_items: rules.auto_use_items,
            ..Self::default()
        };
        zones::reset_tasks(&mut state, catalog);
        state
    }

    /// Whether a perk is owned.
    pub fn has_perk(&self, perk: PerkType) -> bool {
        self.perks.contains(&perk)
    }

    /// A copy of a skill's ledger entry.
    ///
    /// A ledger missing the skill is an invariant violation; it is logged
    /// and a level 0 entry is returned so the tick can continue.
    pub fn skill(&self, skill: SkillType) -> SkillState {
        self.skills.get(skill.index()).copied().unwrap_or_else(|| {
            warn!(?skill, "Skill missing from ledger, using a blank entry");
            SkillState::new(skill)
        })
    }

    /// Mutable access to a skill's ledger entry.
    pub fn skill_mut(&mut self, skill: SkillType) -> Option<&mut SkillState> {
        let entry = self.skills.get_mut(skill.index());
        if entry.is_none() {
            warn!(?skill, "Skill missing from ledger, update dropped");
        }
        entry
    }

    /// Position of a task in the live set.
    pub fn task_index(&self, id: TaskId) -> Option<usize> {
        self.tasks.iter().position(|task| task.id() == id)
    }

    /// A live task instance.
    pub fn task(&self, id: TaskId) -> Option<&TaskState> {
        self.tasks.iter().find(|task| task.id() == id)
    }

    /// The manually selected task instance.
    pub fn active(&self) -> Option<&TaskState> {
        self.active_task.and_then(|id| self.task(id))
    }

    /// Held count of an item.
    pub fn item_count(&self, item: ItemType) -> u32 {
        self.items.get(&item).copied().unwrap_or(0)
    }

    /// Queue an event for the renderer.
    pub fn queue_render_event(&mut self, event: RenderEvent) {
        self.pending_render_events.push(event);
    }

    /// Take every pending render event.
    pub fn pop_render_events(&mut self) -> Vec<RenderEvent> {
        self.pending_render_events.drain()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn default_ledger_covers_every_skill() {
        let state = Gamestate::default();
        assert_eq!(state.skills.len(), SkillType::COUNT);
        for skill in SkillType::ALL {
            assert_eq!(state.skill(skill).skill_type, skill);
            assert_eq!(state.skill(skill).speed_modifier, 1.0);
        }
    }

    #[test]
    fn missing_skill_yields_blank_entry() {
        let mut state = Gamestate::default();
        state.skills.clear();
        let entry = state.skill(SkillType::Magic);
        assert_eq!(entry.level, 0);
        assert_eq!(entry.progress, 0.0);
        assert!(state.skill_mut(SkillType::Magic).is_none());
    }

    #[test]
    fn fresh_game_starts_in_first_zone() {
        let catalog = Catalog::standard().unwrap();
        let rules = RulesConfig {
            starting_energy: 80.0,
            ..RulesConfig::default()
        };
        let state = Gamestate::with_rules(&catalog, &rules);
        assert_eq!(state.current_zone, 0);
        assert_eq!(state.energy.current, 80.0);
        assert_eq!(state.energy.max, 80.0);
        assert!(!state.tasks.is_empty());
        assert!(state.active_task.is_none());
        assert!(state.tasks.iter().all(|t| t.definition.zone_id == 0));
    }
}
