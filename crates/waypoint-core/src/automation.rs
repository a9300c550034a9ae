//! Automation selector.
//!
//! Once the `DeepTrance` perk is owned the player can keep a priority list
//! of tasks per zone. When no task is manually selected and automation is
//! on, the first listed task that is live and enabled is selected as if
//! clicked: it stays selected like a manual choice and takes a queued haste
//! charge.

use tracing::debug;
use waypoint_catalog::Catalog;
use waypoint_types::{AutomationMode, PerkType, TaskId, TaskType};

use crate::error::ActionError;
use crate::gamestate::Gamestate;

/// The perk that enables automation.
pub const AUTOMATION_PERK: PerkType = PerkType::DeepTrance;

/// Whether automation may pick tasks this tick.
pub fn is_automation_active(state: &Gamestate) -> bool {
    state.automation_mode != AutomationMode::Off && state.has_perk(AUTOMATION_PERK)
}

/// Change the automation scope.
///
/// # Errors
///
/// Returns [`ActionError::PerkRequired`] when enabling automation without
/// the `DeepTrance` perk. Switching off is always allowed.
pub fn set_automation_mode(state: &mut Gamestate, mode: AutomationMode) -> Result<(), ActionError> {
    if mode != AutomationMode::Off && !state.has_perk(AUTOMATION_PERK) {
        return Err(ActionError::PerkRequired(AUTOMATION_PERK));
    }
    debug!(?mode, "Automation mode changed");
    state.automation_mode = mode;
    Ok(())
}

/// Add a task to its zone's priority list, or remove it if present.
///
/// Travel tasks are kept at the end of the list regardless of the order
/// they were added in; the relative order of everything else is preserved.
///
/// # Errors
///
/// Returns [`ActionError::PerkRequired`] without the `DeepTrance` perk, or
/// [`ActionError::TaskNotFound`] if the task is not in the catalog.
pub fn toggle_automation_priority(
    state: &mut Gamestate,
    catalog: &Catalog,
    id: TaskId,
) -> Result<(), ActionError> {
    if !state.has_perk(AUTOMATION_PERK) {
        return Err(ActionError::PerkRequired(AUTOMATION_PERK));
    }
    let definition = catalog.task(id).ok_or(ActionError::TaskNotFound(id))?;

    let prios = state.automation_prios.entry(definition.zone_id).or_default();
    if let Some(position) = prios.iter().position(|listed| *listed == id) {
        prios.remove(position);
        debug!(task = %id, "Removed from automation");
    } else {
        prios.push(id);
        prios.sort_by_key(|listed| {
            catalog
                .task(*listed)
                .is_some_and(|task| task.task_type == TaskType::Travel)
        });
        debug!(task = %id, "Added to automation");
    }
    Ok(())
}

/// The task automation would select this tick, if any.
pub fn pick_next_task(state: &Gamestate) -> Option<TaskId> {
    if !is_automation_active(state) {
        return None;
    }
    state
        .automation_prios
        .get(&state.current_zone)?
        .iter()
        .copied()
        .find(|id| state.task(*id).is_some_and(|task| task.enabled))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn with_trance(catalog: &Catalog) -> Gamestate {
        let mut state = Gamestate::new(catalog);
        state.perks.insert(PerkType::DeepTrance);
        state
    }

    #[test]
    fn requires_deep_trance() {
        let catalog = Catalog::standard().unwrap();
        let mut state = Gamestate::new(&catalog);
        assert_eq!(
            toggle_automation_priority(&mut state, &catalog, TaskId(3)),
            Err(ActionError::PerkRequired(PerkType::DeepTrance))
        );
        assert_eq!(
            set_automation_mode(&mut state, AutomationMode::All),
            Err(ActionError::PerkRequired(PerkType::DeepTrance))
        );
        assert!(set_automation_mode(&mut state, AutomationMode::Off).is_ok());
        assert!(state.automation_prios.is_empty());
    }

    #[test]
    fn travel_always_sorts_last() {
        let catalog = Catalog::standard().unwrap();
        let mut state = with_trance(&catalog);
        for id in [0, 4, 1, 6] {
            toggle_automation_priority(&mut state, &catalog, TaskId(id)).unwrap();
        }
        assert_eq!(
            state.automation_prios.get(&0).unwrap(),
            &vec![TaskId(4), TaskId(1), TaskId(6), TaskId(0)]
        );

        toggle_automation_priority(&mut state, &catalog, TaskId(1)).unwrap();
        assert_eq!(
            state.automation_prios.get(&0).unwrap(),
            &vec![TaskId(4), TaskId(6), TaskId(0)]
        );
    }

    #[test]
    fn unknown_task_is_rejected() {
        let catalog = Catalog::standard().unwrap();
        let mut state = with_trance(&catalog);
        assert_eq!(
            toggle_automation_priority(&mut state, &catalog, TaskId(9999)),
            Err(ActionError::TaskNotFound(TaskId(9999)))
        );
    }

    #[test]
    fn pick_skips_disabled_and_missing() {
        let catalog = Catalog::standard().unwrap();
        let mut state = with_trance(&catalog);
        // Task 0 is travel (gated), task 7 is hidden and not live.
        state
            .automation_prios
            .insert(0, vec![TaskId(0), TaskId(7), TaskId(5), TaskId(4)]);
        assert_eq!(pick_next_task(&state), None);

        set_automation_mode(&mut state, AutomationMode::Zone).unwrap();
        assert_eq!(pick_next_task(&state), Some(TaskId(5)));
    }

    #[test]
    fn pick_without_list_is_idle() {
        let catalog = Catalog::standard().unwrap();
        let mut state = with_trance(&catalog);
        set_automation_mode(&mut state, AutomationMode::All).unwrap();
        assert_eq!(pick_next_task(&state), None);
    }
}
