//! Rule-based autopilot for headless runs.
//!
//! Stands in for a player when no renderer is attached. Rules are checked
//! in priority order and the first that applies decides what to do before
//! the next tick. The autopilot never overrides a selected task or an
//! active automation list.

use tracing::{debug, warn};
use waypoint_core::automation;
use waypoint_core::{GameSession, Gamestate};
use waypoint_types::{ItemType, TaskId, TaskType};

/// Energy fraction below which a held elixir is drunk.
const LOW_ENERGY_FRACTION: f64 = 0.25;

/// What the autopilot wants to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Consume one unit of an item.
    UseItem(ItemType),
    /// Select a task.
    SelectTask(TaskId),
}

impl Intent {
    /// Short rule name for logs.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UseItem(ItemType::ScrollOfHaste) => "queue_haste",
            Self::UseItem(_) => "restore_energy",
            Self::SelectTask(_) => "select_task",
        }
    }
}

/// Decide the next intent, if any.
pub fn next_intent(state: &Gamestate) -> Option<Intent> {
    if state.is_in_game_over || state.active_task.is_some() {
        return None;
    }

    if state.item_count(ItemType::ScrollOfHaste) > 0 && state.queued_scrolls_of_haste == 0 {
        return Some(Intent::UseItem(ItemType::ScrollOfHaste));
    }
    if state.item_count(ItemType::Elixir) > 0
        && state.energy.current < state.energy.max * LOW_ENERGY_FRACTION
    {
        return Some(Intent::UseItem(ItemType::Elixir));
    }

    if automation::pick_next_task(state).is_some() {
        return None;
    }

    let first_enabled = |wanted: fn(TaskType) -> bool| {
        state
            .tasks
            .iter()
            .find(|task| task.enabled && wanted(task.definition.task_type))
            .map(|task| Intent::SelectTask(task.id()))
    };
    first_enabled(|kind| kind == TaskType::Mandatory)
        .or_else(|| first_enabled(|kind| !matches!(kind, TaskType::Mandatory | TaskType::Travel)))
        .or_else(|| first_enabled(|kind| kind == TaskType::Travel))
}

/// Apply the next intent to the session.
pub fn step(session: &mut GameSession) {
    let Some(intent) = next_intent(session.state()) else {
        return;
    };
    debug!(rule = intent.as_str(), ?intent, "Autopilot acting");

    let result = match intent {
        Intent::UseItem(item) => session.click_item(item, false).map(|_| ()),
        Intent::SelectTask(id) => session.click_task(id),
    };
    if let Err(error) = result {
        warn!(?intent, %error, "Autopilot action rejected");
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use waypoint_catalog::Catalog;
    use waypoint_core::{NullSink, items, tasks};
    use waypoint_types::{AutomationMode, PerkType};

    use super::*;

    fn fresh() -> (Catalog, Gamestate) {
        let catalog = Catalog::standard().unwrap();
        let state = Gamestate::new(&catalog);
        (catalog, state)
    }

    #[test]
    fn mandatory_tasks_come_first() {
        let (_, state) = fresh();
        assert_eq!(next_intent(&state), Some(Intent::SelectTask(TaskId(1))));
    }

    #[test]
    fn travel_comes_last() {
        let (_, mut state) = fresh();
        for task in &mut state.tasks {
            if task.definition.task_type != TaskType::Travel {
                task.reps = task.definition.max_reps;
            }
        }
        tasks::update_enabled_tasks(&mut state);
        assert_eq!(next_intent(&state), Some(Intent::SelectTask(TaskId(0))));
    }

    #[test]
    fn selected_task_is_left_alone() {
        let (_, mut state) = fresh();
        tasks::click_task(&mut state, TaskId(4)).unwrap();
        assert_eq!(next_intent(&state), None);
    }

    #[test]
    fn haste_is_queued_before_selecting() {
        let (_, mut state) = fresh();
        items::add_item(&mut state, ItemType::ScrollOfHaste, 1);
        assert_eq!(
            next_intent(&state),
            Some(Intent::UseItem(ItemType::ScrollOfHaste))
        );
    }

    #[test]
    fn elixir_only_when_low() {
        let (_, mut state) = fresh();
        items::add_item(&mut state, ItemType::Elixir, 1);
        assert!(matches!(next_intent(&state), Some(Intent::SelectTask(_))));
        state.energy.drain(80.0);
        assert_eq!(next_intent(&state), Some(Intent::UseItem(ItemType::Elixir)));
    }

    #[test]
    fn defers_to_automation() {
        let (_, mut state) = fresh();
        state.perks.insert(PerkType::DeepTrance);
        state.automation_mode = AutomationMode::All;
        state.automation_prios.insert(0, vec![TaskId(4)]);
        assert_eq!(next_intent(&state), None);
    }

    #[test]
    fn step_selects_through_the_session() {
        let (catalog, state) = fresh();
        let mut session = GameSession::new(Arc::new(catalog), state, Box::new(NullSink));
        step(&mut session);
        assert_eq!(session.state().active_task, Some(TaskId(1)));
    }
}
