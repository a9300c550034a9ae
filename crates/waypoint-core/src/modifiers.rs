//! Modifier resolver: task throughput, cost, energy drain and XP gain.
//!
//! Every function here is pure given a [`Gamestate`] and catalog data.
//! Perk effects are not scattered through the formulas; they are rows in
//! [`PERK_MODIFIERS`], and each formula folds in the rows targeting it.
//!
//! Speed is kept in two layers so a renderer can show them apart:
//! [`speed_without_level`] (items, perks, Power, Attunement) and
//! [`crate::skills::level_speed_multiplier`].

use waypoint_catalog::TaskDefinition;
use waypoint_types::{PerkType, SkillType};

use crate::gamestate::{Gamestate, TaskState};
use crate::skills::{
    ATTUNEMENT_SKILLS, POWER_SKILLS, attunement_bonus, level_speed_multiplier, power_bonus,
};

/// Throughput multiplier of a hasted task.
pub const HASTE_MULTIPLIER: f64 = 5.0;

/// Progress required per repetition before zone scaling.
pub const TASK_COST_BASE: f64 = 10.0;

/// Growth of task cost per zone.
pub const TASK_COST_ZONE_GROWTH: f64 = 1.75;

/// Energy drained per tick before perk reductions.
pub const ENERGY_DRAIN_BASE: f64 = 1.0;

/// XP granted per unit of task progress before scaling.
pub const XP_PER_PROGRESS: f64 = 8.0;

/// Growth of XP gain per zone.
pub const XP_ZONE_GROWTH: f64 = 1.25;

// ---------------------------------------------------------------------------
// Perk table
// ---------------------------------------------------------------------------

/// The quantity a perk modifier scales.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PerkTarget {
    /// Speed of one skill.
    Skill(SkillType),
    /// Experience gained from every task.
    XpGain,
    /// Energy drain of a tick that finishes its task.
    SingleTickEnergyDrain,
    /// Energy drain of every tick.
    EnergyDrain,
    /// Energy drain, applied once per zone between the task and the
    /// furthest zone reached.
    EnergyDrainPerZoneBelowFrontier,
}

/// One perk effect: while `perk` is owned, `target` is multiplied by
/// `multiplier`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerkModifier {
    /// The perk granting the effect.
    pub perk: PerkType,
    /// The quantity affected.
    pub target: PerkTarget,
    /// Factor applied while the perk is owned.
    pub multiplier: f64,
}

const fn skill(perk: PerkType, skill: SkillType, multiplier: f64) -> PerkModifier {
    PerkModifier {
        perk,
        target: PerkTarget::Skill(skill),
        multiplier,
    }
}

const fn global(perk: PerkType, target: PerkTarget, multiplier: f64) -> PerkModifier {
    PerkModifier {
        perk,
        target,
        multiplier,
    }
}

/// Every multiplicative perk effect. Perks on the same target compound.
///
/// `EnergySpell`, `EnergeticMemory`, `Attunement` and `DeepTrance` act on
/// state rather than on a formula and are handled where they apply.
pub const PERK_MODIFIERS: &[PerkModifier] = &[
    skill(PerkType::Reading, SkillType::Study, 1.5),
    skill(PerkType::VillagerGratitude, SkillType::Charisma, 1.5),
    skill(PerkType::VillageHero, SkillType::Charisma, 1.2),
    skill(PerkType::UndergroundConnection, SkillType::Charisma, 1.2),
    skill(PerkType::PurgedBureaucracy, SkillType::Charisma, 1.3),
    skill(PerkType::Amulet, SkillType::Magic, 1.5),
    skill(PerkType::UndergroundConnection, SkillType::Subterfuge, 1.4),
    skill(PerkType::WalkWithoutRhythm, SkillType::Subterfuge, 1.4),
    skill(PerkType::VillageHero, SkillType::Combat, 1.2),
    skill(PerkType::GoblinScourge, SkillType::Combat, 1.3),
    skill(PerkType::SunkenTreasure, SkillType::Survival, 1.3),
    skill(PerkType::GoblinScourge, SkillType::Fortitude, 1.3),
    skill(PerkType::SunkenTreasure, SkillType::Fortitude, 1.3),
    skill(PerkType::LostTemple, SkillType::Druid, 1.5),
    skill(PerkType::ExperiencedTraveler, SkillType::Travel, 1.5),
    skill(PerkType::WalkWithoutRhythm, SkillType::Travel, 1.2),
    skill(PerkType::PurgedBureaucracy, SkillType::Crafting, 1.3),
    global(PerkType::Writing, PerkTarget::XpGain, 1.5),
    global(
        PerkType::MinorTimeCompression,
        PerkTarget::SingleTickEnergyDrain,
        0.2,
    ),
    global(PerkType::HighAltitudeClimbing, PerkTarget::EnergyDrain, 0.8),
    global(
        PerkType::ReflectionsOnTheJourney,
        PerkTarget::EnergyDrainPerZoneBelowFrontier,
        0.95,
    ),
];

/// Product of the multipliers of every owned perk targeting `target`.
pub fn perk_multiplier(state: &Gamestate, target: PerkTarget) -> f64 {
    PERK_MODIFIERS
        .iter()
        .filter(|modifier| modifier.target == target && state.has_perk(modifier.perk))
        .map(|modifier| modifier.multiplier)
        .product()
}

// ---------------------------------------------------------------------------
// Speed
// ---------------------------------------------------------------------------

/// Skill speed from every source except its level.
pub fn speed_without_level(state: &Gamestate, skill: SkillType) -> f64 {
    let mut mult = state.skill(skill).speed_modifier;
    mult *= perk_multiplier(state, PerkTarget::Skill(skill));

    if POWER_SKILLS.contains(&skill) {
        mult *= power_bonus(state.power);
    }
    if ATTUNEMENT_SKILLS.contains(&skill) {
        mult *= attunement_bonus(state.attunement);
    }
    mult
}

/// Full skill speed including its level.
pub fn skill_speed_multiplier(state: &Gamestate, skill: SkillType) -> f64 {
    level_speed_multiplier(state.skill(skill).level) * speed_without_level(state, skill)
}

/// Progress a task instance makes in one tick.
///
/// Level bonuses enter as a geometric mean so tasks with more skills do not
/// scale faster; every other source applies in full for each skill.
pub fn task_throughput_multiplier(state: &Gamestate, task: &TaskState) -> f64 {
    let skills = &task.definition.skills;

    let level_product: f64 = skills
        .iter()
        .map(|skill| level_speed_multiplier(state.skill(*skill).level))
        .product();
    let mut mult = u32::try_from(skills.len())
        .ok()
        .filter(|count| *count > 0)
        .map_or(1.0, |count| level_product.powf(1.0 / f64::from(count)));

    for skill in skills {
        mult *= speed_without_level(state, *skill);
    }

    if task.hasted {
        mult *= HASTE_MULTIPLIER;
    }

    mult * state.progress_multiplier
}

// ---------------------------------------------------------------------------
// Cost, energy and XP
// ---------------------------------------------------------------------------

/// Progress required to finish one repetition of a task.
pub fn task_cost(task: &TaskDefinition) -> f64 {
    let zone_mult = TASK_COST_ZONE_GROWTH.powi(zone_exponent(task.zone_id));
    TASK_COST_BASE * task.cost_multiplier * zone_mult
}

/// Energy drained by one tick of a task.
pub fn energy_drain_per_tick(state: &Gamestate, task: &TaskDefinition, single_tick: bool) -> f64 {
    let mut drain = ENERGY_DRAIN_BASE;

    if single_tick {
        drain *= perk_multiplier(state, PerkTarget::SingleTickEnergyDrain);
    }
    drain *= perk_multiplier(state, PerkTarget::EnergyDrain);

    let zones_below = state.highest_zone.saturating_sub(task.zone_id);
    drain *= perk_multiplier(state, PerkTarget::EnergyDrainPerZoneBelowFrontier)
        .powi(zone_exponent(zones_below));

    drain
}

/// Experience each of a task's skills gains from one tick of progress.
pub fn skill_xp_gain(state: &Gamestate, task: &TaskDefinition, tick_progress: f64) -> f64 {
    let mut xp = tick_progress * XP_PER_PROGRESS * task.xp_mult;
    xp *= perk_multiplier(state, PerkTarget::XpGain);
    xp * XP_ZONE_GROWTH.powi(zone_exponent(task.zone_id))
}

fn zone_exponent(zone: u32) -> i32 {
    i32::try_from(zone).unwrap_or(i32::MAX)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use std::sync::Arc;

    use waypoint_types::TaskType;

    use super::*;

    const EPS: f64 = 1e-9;

    fn task(zone_id: u32, skills: &[SkillType]) -> TaskState {
        TaskState::new(Arc::new(TaskDefinition {
            zone_id,
            ..TaskDefinition::new(1, "T", TaskType::Normal, 1.0, skills)
        }))
    }

    #[test]
    fn fresh_throughput_is_one() {
        let state = Gamestate::default();
        let t = task(0, &[SkillType::Combat]);
        assert_eq!(task_throughput_multiplier(&state, &t), 1.0);
    }

    #[test]
    fn haste_multiplies_by_exactly_five() {
        let mut state = Gamestate::default();
        state.skill_mut(SkillType::Combat).unwrap().level = 13;
        state.skill_mut(SkillType::Combat).unwrap().speed_modifier = 1.3;
        state.perks.insert(PerkType::GoblinScourge);

        let plain = task(2, &[SkillType::Combat, SkillType::Fortitude]);
        let mut hasted = plain.clone();
        hasted.hasted = true;

        let base = task_throughput_multiplier(&state, &plain);
        assert_eq!(task_throughput_multiplier(&state, &hasted), base * 5.0);
    }

    #[test]
    fn level_bonus_is_a_geometric_mean() {
        let mut state = Gamestate::default();
        state.skill_mut(SkillType::Study).unwrap().level = 10;
        state.skill_mut(SkillType::Magic).unwrap().level = 30;

        let t = task(0, &[SkillType::Study, SkillType::Magic]);
        let expected = (1.01_f64.powi(10) * 1.01_f64.powi(30)).sqrt();
        assert!((task_throughput_multiplier(&state, &t) - expected).abs() < EPS);
    }

    #[test]
    fn perks_on_the_same_skill_compound() {
        let mut state = Gamestate::default();
        state.perks.insert(PerkType::VillagerGratitude);
        state.perks.insert(PerkType::VillageHero);
        let speed = speed_without_level(&state, SkillType::Charisma);
        assert!((speed - 1.5 * 1.2).abs() < EPS);
        // Village Hero also covers Combat, but not Study.
        assert!((speed_without_level(&state, SkillType::Combat) - 1.2).abs() < EPS);
        assert_eq!(speed_without_level(&state, SkillType::Study), 1.0);
    }

    #[test]
    fn power_and_attunement_apply_to_their_groups() {
        let mut state = Gamestate::default();
        state.power = 50;
        state.attunement = 200;
        assert!((speed_without_level(&state, SkillType::Fortitude) - 1.5).abs() < EPS);
        assert!((speed_without_level(&state, SkillType::Druid) - 1.2).abs() < EPS);
        assert_eq!(speed_without_level(&state, SkillType::Travel), 1.0);
    }

    #[test]
    fn skill_speed_includes_level() {
        let mut state = Gamestate::default();
        state.skill_mut(SkillType::Travel).unwrap().level = 1;
        state.perks.insert(PerkType::ExperiencedTraveler);
        let speed = skill_speed_multiplier(&state, SkillType::Travel);
        assert!((speed - 1.01 * 1.5).abs() < EPS);
    }

    #[test]
    fn task_cost_grows_strictly_with_zone() {
        let mut previous = 0.0;
        for zone in 0..40 {
            let cost = task_cost(&task(zone, &[SkillType::Study]).definition);
            assert!(cost > previous);
            previous = cost;
        }
        assert_eq!(task_cost(&task(0, &[SkillType::Study]).definition), 10.0);
        assert_eq!(task_cost(&task(1, &[SkillType::Study]).definition), 17.5);
    }

    #[test]
    fn energy_drain_reductions_stack() {
        let mut state = Gamestate::default();
        let t = task(1, &[SkillType::Study]);
        assert_eq!(energy_drain_per_tick(&state, &t.definition, true), 1.0);

        state.perks.insert(PerkType::MinorTimeCompression);
        assert!((energy_drain_per_tick(&state, &t.definition, true) - 0.2).abs() < EPS);
        assert_eq!(energy_drain_per_tick(&state, &t.definition, false), 1.0);

        state.perks.insert(PerkType::HighAltitudeClimbing);
        state.perks.insert(PerkType::ReflectionsOnTheJourney);
        state.highest_zone = 3;
        let expected = 0.2 * 0.8 * 0.95 * 0.95;
        assert!((energy_drain_per_tick(&state, &t.definition, true) - expected).abs() < EPS);
    }

    #[test]
    fn xp_gain_scales_with_zone_and_writing() {
        let mut state = Gamestate::default();
        let t = task(2, &[SkillType::Study]);
        let base = skill_xp_gain(&state, &t.definition, 1.0);
        assert!((base - 8.0 * 1.5625).abs() < EPS);

        state.perks.insert(PerkType::Writing);
        let boosted = skill_xp_gain(&state, &t.definition, 1.0);
        assert!((boosted - base * 1.5).abs() < EPS);
    }

    #[test]
    fn every_speed_perk_has_a_row() {
        for perk in [
            PerkType::Reading,
            PerkType::VillagerGratitude,
            PerkType::Amulet,
            PerkType::LostTemple,
            PerkType::ExperiencedTraveler,
        ] {
            assert!(PERK_MODIFIERS.iter().any(|m| m.perk == perk));
        }
    }
}
