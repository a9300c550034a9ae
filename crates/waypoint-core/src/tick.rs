//! The simulation tick.
//!
//! One tick runs, in order:
//!
//! 1. Auto-use of held items (when enabled)
//! 2. The task step for the selected or automation-picked task
//! 3. The energy depletion check
//!
//! Nothing happens while the run is over; the player must reset first.

use tracing::debug;
use waypoint_catalog::Catalog;
use waypoint_types::TaskId;

use crate::gamestate::Gamestate;
use crate::items;
use crate::prestige;
use crate::tasks;

/// What a single tick did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickSummary {
    /// The task that made progress, if any.
    pub task: Option<TaskId>,
    /// Energy left after the tick.
    pub energy: f64,
    /// Whether the run is over after this tick.
    pub game_over: bool,
}

/// Advance the simulation by one tick.
pub fn run_tick(state: &mut Gamestate, catalog: &Catalog) -> TickSummary {
    if state.is_in_game_over {
        return TickSummary {
            task: None,
            energy: state.energy.current,
            game_over: true,
        };
    }

    items::auto_use_items(state, catalog);
    let task = tasks::update_active_task(state, catalog);
    prestige::check_energy_depleted(state);

    let summary = TickSummary {
        task,
        energy: state.energy.current,
        game_over: state.is_in_game_over,
    };
    debug!(
        task = ?summary.task,
        energy = summary.energy,
        game_over = summary.game_over,
        "Tick complete"
    );
    summary
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use waypoint_types::{ItemType, SkillType};

    use super::*;

    #[test]
    fn idle_tick_changes_nothing() {
        let catalog = Catalog::standard().unwrap();
        let mut state = Gamestate::new(&catalog);
        state.pop_render_events();
        let before = state.clone();
        let summary = run_tick(&mut state, &catalog);
        assert_eq!(summary.task, None);
        assert_eq!(state, before);
    }

    #[test]
    fn game_over_freezes_ticks() {
        let catalog = Catalog::standard().unwrap();
        let mut state = Gamestate::new(&catalog);
        tasks::click_task(&mut state, TaskId(2)).unwrap();
        state.energy.drain(99.5);

        let summary = run_tick(&mut state, &catalog);
        assert!(summary.game_over);
        assert_eq!(state.energy.current, 0.0);

        let progress = state.task(TaskId(2)).unwrap().progress;
        let summary = run_tick(&mut state, &catalog);
        assert_eq!(summary.task, None);
        assert_eq!(state.task(TaskId(2)).unwrap().progress, progress);
    }

    #[test]
    fn auto_use_runs_before_the_task_step() {
        let catalog = Catalog::standard().unwrap();
        let mut state = Gamestate::new(&catalog);
        state.auto_use_items = true;
        items::add_item(&mut state, ItemType::Arrow, 5);
        tasks::click_task(&mut state, TaskId(2)).unwrap();

        run_tick(&mut state, &catalog);
        assert_eq!(state.item_count(ItemType::Arrow), 0);
        // The first tick already ran at the boosted speed.
        let progress = state.task(TaskId(2)).unwrap().progress;
        assert!((progress - 1.5).abs() < 1e-12);
        assert!((state.skill(SkillType::Combat).speed_modifier - 1.5).abs() < 1e-12);
    }
}
