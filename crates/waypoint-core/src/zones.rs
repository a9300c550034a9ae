//! Zone travel and task set (re)initialization.

use std::sync::Arc;

use tracing::{info, warn};
use waypoint_catalog::Catalog;
use waypoint_types::{AutomationMode, RenderEvent};

use crate::gamestate::{Gamestate, TaskState};
use crate::skills;
use crate::tasks;

/// Move to the next zone, or mark the end of content if there is none.
pub fn advance_zone(state: &mut Gamestate, catalog: &Catalog) {
    let next = state.current_zone.saturating_add(1);
    let has_next = usize::try_from(next).is_ok_and(|index| index < catalog.zone_count());
    if !has_next {
        info!(zone = state.current_zone, "No further zones");
        state.is_at_end_of_content = true;
        state.queue_render_event(RenderEvent::EndOfContent);
        return;
    }

    state.current_zone = next;
    state.highest_zone = state.highest_zone.max(next);
    if state.automation_mode == AutomationMode::Zone {
        state.automation_mode = AutomationMode::Off;
    }

    reset_tasks(state, catalog);

    info!(
        zone = next,
        name = catalog.zone(next).map_or("", |zone| zone.name.as_str()),
        highest_zone = state.highest_zone,
        "Entered zone"
    );
    state.queue_render_event(RenderEvent::ZoneEntered { zone: next });
}

/// Rebuild the live task set for the current zone and clear the end of
/// content flag.
pub fn reset_tasks(state: &mut Gamestate, catalog: &Catalog) {
    initialize_tasks(state, catalog);
    state.is_at_end_of_content = false;
}

/// Replace the live task set with fresh instances of the current zone's
/// tasks.
///
/// Hidden tasks are only instantiated once unlocked. Skills used by the new
/// instances are revealed as they first appear.
pub fn initialize_tasks(state: &mut Gamestate, catalog: &Catalog) {
    state.active_task = None;
    state.tasks.clear();

    let Some(zone) = catalog.zone(state.current_zone) else {
        warn!(zone = state.current_zone, "Current zone missing from catalog");
        tasks::update_enabled_tasks(state);
        return;
    };

    for definition in &zone.tasks {
        if definition.hidden_by_default && !state.unlocked_tasks.contains(&definition.id) {
            continue;
        }
        state.tasks.push(TaskState::new(Arc::clone(definition)));
        for skill in &definition.skills {
            skills::unlock_skill(state, *skill);
        }
    }

    tasks::update_enabled_tasks(state);
}
