//! The game session controller.
//!
//! [`GameSession`] owns the [`Gamestate`] and the shared [`Catalog`] and is
//! the only surface a renderer or driver talks to. Every call runs to
//! completion synchronously. Task completions and energy resets raise a
//! save request, which the session flushes through its [`SaveSink`] before
//! returning.

use std::sync::Arc;

use tracing::{debug, info, warn};
use waypoint_catalog::Catalog;
use waypoint_types::{AutomationMode, ItemType, RenderEvent, TaskId};

use crate::automation;
use crate::error::ActionError;
use crate::gamestate::Gamestate;
use crate::items;
use crate::prestige::{self, ResetReport};
use crate::tasks;
use crate::tick::{self, TickSummary};

/// Error returned by a [`SaveSink`].
pub type SinkError = Box<dyn std::error::Error + Send + Sync>;

/// Destination for persisted state.
///
/// Implemented by the persistence gateway. Failures are logged by the
/// session and never interrupt play.
pub trait SaveSink {
    /// Persist a snapshot of the state.
    fn persist(&mut self, state: &Gamestate) -> Result<(), SinkError>;
}

/// A sink that discards every save.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl SaveSink for NullSink {
    fn persist(&mut self, _state: &Gamestate) -> Result<(), SinkError> {
        Ok(())
    }
}

/// A single play session.
pub struct GameSession {
    catalog: Arc<Catalog>,
    state: Gamestate,
    sink: Box<dyn SaveSink>,
}

impl std::fmt::Debug for GameSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameSession")
            .field("current_zone", &self.state.current_zone)
            .field("active_task", &self.state.active_task)
            .field("energy", &self.state.energy)
            .finish_non_exhaustive()
    }
}

impl GameSession {
    /// Wrap an existing state.
    pub const fn new(catalog: Arc<Catalog>, state: Gamestate, sink: Box<dyn SaveSink>) -> Self {
        Self {
            catalog,
            state,
            sink,
        }
    }

    /// Advance one tick.
    pub fn tick(&mut self) -> TickSummary {
        let summary = tick::run_tick(&mut self.state, &self.catalog);
        self.flush();
        summary
    }

    /// Toggle a task's selection.
    ///
    /// # Errors
    ///
    /// See [`tasks::click_task`].
    pub fn click_task(&mut self, id: TaskId) -> Result<(), ActionError> {
        let result = tasks::click_task(&mut self.state, id);
        self.flush();
        result
    }

    /// Consume one or all units of an item.
    ///
    /// # Errors
    ///
    /// See [`items::click_item`].
    pub fn click_item(&mut self, item: ItemType, use_all: bool) -> Result<u32, ActionError> {
        let result = items::click_item(&mut self.state, &self.catalog, item, use_all);
        self.flush();
        result
    }

    /// Toggle a task in its zone's automation list.
    ///
    /// # Errors
    ///
    /// See [`automation::toggle_automation_priority`].
    pub fn toggle_automation_priority(&mut self, id: TaskId) -> Result<(), ActionError> {
        automation::toggle_automation_priority(&mut self.state, &self.catalog, id)
    }

    /// Change the automation scope.
    ///
    /// # Errors
    ///
    /// See [`automation::set_automation_mode`].
    pub fn set_automation_mode(&mut self, mode: AutomationMode) -> Result<(), ActionError> {
        automation::set_automation_mode(&mut self.state, mode)
    }

    /// Flip whether finished repetitions keep the task selected.
    pub const fn toggle_repeat_tasks(&mut self) {
        tasks::toggle_repeat_tasks(&mut self.state);
    }

    /// Flip automatic item use.
    pub const fn toggle_auto_use_items(&mut self) {
        items::toggle_auto_use_items(&mut self.state);
    }

    /// Rewind to the first zone and start a new epoch.
    pub fn do_energy_reset(&mut self) {
        prestige::do_energy_reset(&mut self.state, &self.catalog);
        self.flush();
    }

    /// Take every pending render event.
    pub fn pop_render_events(&mut self) -> Vec<RenderEvent> {
        self.state.pop_render_events()
    }

    /// Gains of the current epoch.
    pub fn reset_report(&self) -> ResetReport {
        prestige::reset_report(&self.state)
    }

    /// Read access to the full state.
    pub const fn state(&self) -> &Gamestate {
        &self.state
    }

    /// The shared catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Set the debug throughput multiplier.
    pub const fn set_progress_multiplier(&mut self, multiplier: f64) {
        self.state.progress_multiplier = multiplier;
    }

    /// Persist now, regardless of pending requests.
    pub fn save(&mut self) {
        self.state.save_requested = true;
        self.flush();
    }

    /// Swap in a different state, e.g. an imported save, and persist it.
    ///
    /// The debug throughput multiplier carries over.
    pub fn replace_state(&mut self, mut state: Gamestate) {
        state.progress_multiplier = self.state.progress_multiplier;
        info!(
            zone = state.current_zone,
            resets = state.energy_reset_count,
            "State replaced"
        );
        self.state = state;
        self.save();
    }

    fn flush(&mut self) {
        if !self.state.save_requested {
            return;
        }
        self.state.save_requested = false;
        match self.sink.persist(&self.state) {
            Ok(()) => debug!("State persisted"),
            Err(error) => warn!(%error, "Failed to persist state"),
        }
    }
}
