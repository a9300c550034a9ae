//! Task engine: selection, per-tick progress and completion side effects.
//!
//! A task instance moves Idle -> Active -> completed repetition, looping
//! back to Idle while repetitions remain, and ends Fully-Completed. Only
//! one instance advances per tick: the selected one. With nothing selected,
//! the automation pick is selected as if clicked.

use std::sync::Arc;

use tracing::{debug, info, warn};
use waypoint_catalog::Catalog;
use waypoint_types::{PerkType, RenderEvent, TaskId, TaskType};

use crate::automation;
use crate::error::ActionError;
use crate::gamestate::{Gamestate, TaskState};
use crate::items;
use crate::modifiers::{energy_drain_per_tick, skill_xp_gain, task_cost, task_throughput_multiplier};
use crate::skills;
use crate::zones;

/// Maximum energy granted by the `EnergySpell` perk.
pub const ENERGY_SPELL_BONUS: f64 = 50.0;

/// Toggle a task's selection.
///
/// Selecting a task that is not hasted while haste charges are queued
/// consumes one charge and hastes that instance. Deselecting is always
/// allowed.
///
/// # Errors
///
/// Returns [`ActionError::TaskNotFound`] if the task is not live, or
/// [`ActionError::TaskDisabled`] when selecting a disabled task.
pub fn click_task(state: &mut Gamestate, id: TaskId) -> Result<(), ActionError> {
    let index = state.task_index(id).ok_or(ActionError::TaskNotFound(id))?;

    if state.active_task == Some(id) {
        state.active_task = None;
        debug!(task = %id, "Task deselected");
        return Ok(());
    }

    let scrolls = state.queued_scrolls_of_haste;
    let Some(task) = state.tasks.get_mut(index) else {
        return Err(ActionError::TaskNotFound(id));
    };
    if !task.enabled {
        return Err(ActionError::TaskDisabled(id));
    }
    if !task.hasted && scrolls > 0 {
        task.hasted = true;
        state.queued_scrolls_of_haste = scrolls.saturating_sub(1);
        debug!(task = %id, remaining = state.queued_scrolls_of_haste, "Haste applied");
    }
    state.active_task = Some(id);
    debug!(task = %id, "Task selected");
    Ok(())
}

/// Select the automation pick when nothing is selected.
fn select_automation_pick(state: &mut Gamestate) {
    if state.active_task.is_some() {
        return;
    }
    let Some(id) = automation::pick_next_task(state) else {
        return;
    };
    match click_task(state, id) {
        Ok(()) => debug!(task = %id, "Automation selected task"),
        Err(error) => warn!(task = %id, %error, "Automation pick rejected"),
    }
}

/// Advance the selected task by one tick, selecting the automation pick
/// first when nothing is selected.
///
/// Returns the id of the task that ran, if any.
pub fn update_active_task(state: &mut Gamestate, catalog: &Catalog) -> Option<TaskId> {
    select_automation_pick(state);
    let id = state.active_task?;
    let Some(index) = state.task_index(id) else {
        warn!(task = %id, "Active task is not live, clearing selection");
        state.active_task = None;
        return None;
    };

    let task = state.tasks.get(index)?;
    if !task.enabled {
        debug!(task = %id, "Active task is disabled, clearing selection");
        state.active_task = None;
        return None;
    }
    let definition = Arc::clone(&task.definition);
    let cost = task_cost(&definition);
    let progress_before = task.progress;
    if progress_before >= cost {
        return None;
    }

    let delta = task_throughput_multiplier(state, task);
    let single_tick = delta >= cost - progress_before;
    let drain = energy_drain_per_tick(state, &definition, single_tick);
    let xp = skill_xp_gain(state, &definition, delta);

    let progress = progress_before + delta;
    if let Some(task) = state.tasks.get_mut(index) {
        task.progress = progress;
    }
    state.energy.drain(drain);
    for skill in &definition.skills {
        skills::add_xp(state, catalog, *skill, xp);
    }

    if progress >= cost {
        finish_task(state, catalog, index);
    }
    Some(id)
}

/// Apply the completion of one repetition of the task at `index`.
pub fn finish_task(state: &mut Gamestate, catalog: &Catalog, index: usize) {
    let Some(task) = state.tasks.get_mut(index) else {
        warn!(index, "Finish requested for a task that is not live");
        return;
    };
    let definition = Arc::clone(&task.definition);

    task.reps = task.reps.saturating_add(1);
    if task.reps < definition.max_reps {
        task.progress = 0.0;
    }
    task.hasted = false;
    let reps = task.reps;
    let fully_finished = task.is_finished();

    debug!(task = %definition.id, reps, fully_finished, "Task repetition finished");
    state.queue_render_event(RenderEvent::TaskCompleted {
        task_id: definition.id,
        reps,
        fully_finished,
    });

    if let Some(item) = definition.item {
        items::add_item(state, item, 1);
    }

    if fully_finished {
        if let Some(perk) = definition.perk {
            add_perk(state, perk);
        }
        if let Some(target) = definition.unlocks_task {
            unlock_task(state, catalog, target);
        }
    }

    // Rewards belong to the zone the task was finished in.
    if definition.task_type == TaskType::Travel {
        zones::advance_zone(state, catalog);
    }

    skills::add_power(state, skills::power_gain(&definition));
    let attunement = skills::attunement_gain(state, &definition);
    skills::add_attunement(state, attunement);

    if !state.repeat_tasks || fully_finished {
        state.active_task = None;
    }

    if definition.task_type == TaskType::Prestige {
        info!(task = %definition.id, "Prestige task completed");
        state.is_at_end_of_content = true;
        state.queue_render_event(RenderEvent::EndOfContent);
    }

    update_enabled_tasks(state);
    state.save_requested = true;
}

/// Recompute every live task's `enabled` flag.
///
/// A task is disabled once all repetitions are done. While any Mandatory
/// task is unfinished, every Travel task is disabled too.
pub fn update_enabled_tasks(state: &mut Gamestate) {
    let mut has_unfinished_mandatory = false;
    for task in &mut state.tasks {
        let finished = task.is_finished();
        task.enabled = !finished;
        has_unfinished_mandatory |= task.definition.task_type == TaskType::Mandatory && !finished;
    }

    if has_unfinished_mandatory {
        for task in &mut state.tasks {
            if task.definition.task_type == TaskType::Travel {
                task.enabled = false;
            }
        }
    }
}

/// Flip whether finished repetitions keep the task selected.
pub const fn toggle_repeat_tasks(state: &mut Gamestate) {
    state.repeat_tasks = !state.repeat_tasks;
}

/// Reveal a hidden task.
///
/// A task of the current zone joins the live set right away and reveals its
/// skills; a task of another zone appears the next time that zone's tasks
/// are initialized. Idempotent: a task already in `unlocked_tasks` is left
/// alone.
pub fn unlock_task(state: &mut Gamestate, catalog: &Catalog, id: TaskId) {
    if state.unlocked_tasks.contains(&id) {
        return;
    }
    let Some(definition) = catalog.task(id) else {
        warn!(task = %id, "Unlock target missing from catalog");
        return;
    };

    state.unlocked_tasks.insert(id);
    if definition.zone_id == state.current_zone {
        state.tasks.push(TaskState::new(Arc::clone(definition)));
        for skill in &definition.skills {
            skills::unlock_skill(state, *skill);
        }
    }
    info!(task = %id, name = %definition.name, "Task unlocked");
    state.queue_render_event(RenderEvent::UnlockedTask {
        task_id: id,
        name: definition.name.clone(),
    });
}

/// Grant a perk. Returns `false` if it was already owned.
pub fn add_perk(state: &mut Gamestate, perk: PerkType) -> bool {
    if state.has_perk(perk) {
        return false;
    }
    if perk == PerkType::EnergySpell {
        state.energy.raise_max(ENERGY_SPELL_BONUS);
    }
    state.perks.insert(perk);
    info!(?perk, "Perk gained");
    state.queue_render_event(RenderEvent::GainedPerk { perk });
    true
}
