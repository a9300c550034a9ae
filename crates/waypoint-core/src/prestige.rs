//! Prestige controller: energy depletion and the energy reset.
//!
//! Running out of energy only ends the run. The reset itself is a separate
//! user action that rewinds to the first zone while keeping levels, perks,
//! Power and Attunement.

use tracing::info;
use waypoint_catalog::Catalog;
use waypoint_types::{AutomationMode, PerkType, RenderEvent, SkillType};

use crate::gamestate::Gamestate;
use crate::items;
use crate::skills;
use crate::zones;

/// End the run if energy is exhausted. Called once per tick, after the task
/// step.
pub fn check_energy_depleted(state: &mut Gamestate) {
    if !state.energy.is_depleted() || state.is_in_game_over {
        return;
    }
    state.is_in_game_over = true;
    state.energy.clamp_at_zero();
    info!(
        zone = state.current_zone,
        resets = state.energy_reset_count,
        "Energy depleted"
    );
    state.queue_render_event(RenderEvent::EnergyDepleted);
}

/// Rewind to the first zone and start a new reset epoch.
pub fn do_energy_reset(state: &mut Gamestate, catalog: &Catalog) {
    if state.has_perk(PerkType::EnergeticMemory) {
        let bonus = f64::from(state.current_zone.saturating_add(1)) / 10.0;
        state.energy.raise_max(bonus);
    }
    let reached_zone = state.current_zone;

    state.current_zone = 0;
    zones::reset_tasks(state, catalog);

    state.energy.refill();
    state.energy_reset_count = state.energy_reset_count.saturating_add(1);
    state.is_in_game_over = false;
    state.automation_mode = AutomationMode::Off;
    state.queued_scrolls_of_haste = 0;

    skills::remove_temporary_bonuses(state);
    items::halve_item_counts(state);
    snapshot_epoch_start(state);
    state.save_requested = true;

    info!(
        reached_zone,
        resets = state.energy_reset_count,
        max_energy = state.energy.max,
        "Energy reset"
    );
}

fn snapshot_epoch_start(state: &mut Gamestate) {
    state.skills_at_start_of_reset = skills::levels(state);
    state.power_at_start_of_reset = state.power;
    state.attunement_at_start_of_reset = state.attunement;
}

// ---------------------------------------------------------------------------
// Reset report
// ---------------------------------------------------------------------------

/// Level change of one skill during the current epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkillGain {
    /// The skill.
    pub skill: SkillType,
    /// Level when the epoch started.
    pub from: u32,
    /// Current level.
    pub to: u32,
}

/// What the current epoch achieved, for the game over screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResetReport {
    /// Skills that gained levels, in ledger order.
    pub skill_gains: Vec<SkillGain>,
    /// Power gained this epoch.
    pub power_gained: u32,
    /// Attunement gained this epoch.
    pub attunement_gained: u32,
    /// Resets performed before this epoch.
    pub energy_reset_count: u32,
}

/// Compare current levels, Power and Attunement against the epoch snapshot.
pub fn reset_report(state: &Gamestate) -> ResetReport {
    let skill_gains = SkillType::ALL
        .iter()
        .map(|skill| SkillGain {
            skill: *skill,
            from: state
                .skills_at_start_of_reset
                .get(skill.index())
                .copied()
                .unwrap_or(0),
            to: state.skill(*skill).level,
        })
        .filter(|gain| gain.to > gain.from)
        .collect();

    ResetReport {
        skill_gains,
        power_gained: state.power.saturating_sub(state.power_at_start_of_reset),
        attunement_gained: state
            .attunement
            .saturating_sub(state.attunement_at_start_of_reset),
        energy_reset_count: state.energy_reset_count,
    }
}
