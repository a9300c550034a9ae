//! Skill ledger: experience curves, level-ups, Power and Attunement.
//!
//! # Formulas
//!
//! - XP to advance from level `L`: `1.02^L * 10 * xp_needed_mult`
//! - Speed multiplier from level `L`: `1.01^L`
//! - Power bonus (Combat, Fortitude): `1 + power / 100`
//! - Attunement bonus (Study, Magic, Druid): `1 + attunement / 1000`
//!
//! Levels are never lost. Temporary item bonuses (`speed_modifier`) are
//! cleared by every energy reset.

use tracing::{debug, warn};
use waypoint_catalog::{Catalog, TaskDefinition};
use waypoint_types::{PerkType, RenderEvent, SkillType, TaskType};

use crate::gamestate::Gamestate;

/// Growth of the XP requirement per level.
pub const XP_NEEDED_GROWTH: f64 = 1.02;

/// XP required for the first level, before per-skill scaling.
pub const XP_NEEDED_BASE: f64 = 10.0;

/// Growth of the speed multiplier per level.
pub const LEVEL_SPEED_GROWTH: f64 = 1.01;

/// Power granted per zone beyond the second by a boss.
pub const POWER_PER_BOSS_ZONE: u32 = 5;

/// Skills boosted by Power.
pub const POWER_SKILLS: [SkillType; 2] = [SkillType::Combat, SkillType::Fortitude];

/// Skills boosted by Attunement, and the skills that earn it.
pub const ATTUNEMENT_SKILLS: [SkillType; 3] = [SkillType::Study, SkillType::Magic, SkillType::Druid];

/// Clamp a level into the exponent range of `powi`.
fn exponent(level: u32) -> i32 {
    i32::try_from(level).unwrap_or(i32::MAX)
}

/// XP needed to advance from `level`, for a skill with the given scaling.
pub fn xp_needed_at_level(level: u32, xp_needed_mult: f64) -> f64 {
    XP_NEEDED_GROWTH.powi(exponent(level)) * XP_NEEDED_BASE * xp_needed_mult
}

/// XP needed for `skill` to advance from `level`.
pub fn xp_needed(catalog: &Catalog, level: u32, skill: SkillType) -> f64 {
    xp_needed_at_level(level, catalog.xp_needed_mult(skill))
}

/// Task speed multiplier contributed by a skill level.
pub fn level_speed_multiplier(level: u32) -> f64 {
    LEVEL_SPEED_GROWTH.powi(exponent(level))
}

/// Add experience to a skill, resolving any number of level-ups.
///
/// Emits a single [`RenderEvent::SkillUp`] carrying the net levels gained.
/// Negative or non-finite amounts are ignored.
pub fn add_xp(state: &mut Gamestate, catalog: &Catalog, skill: SkillType, amount: f64) {
    if !amount.is_finite() || amount < 0.0 {
        warn!(?skill, amount, "Ignoring invalid XP amount");
        return;
    }
    let xp_needed_mult = catalog.xp_needed_mult(skill);
    let Some(entry) = state.skill_mut(skill) else {
        return;
    };

    entry.progress += amount;
    let old_level = entry.level;
    loop {
        let needed = xp_needed_at_level(entry.level, xp_needed_mult);
        if needed.is_nan() || needed <= 0.0 {
            warn!(?skill, needed, "Degenerate XP curve, leveling stopped");
            break;
        }
        if entry.progress < needed {
            break;
        }
        entry.progress -= needed;
        entry.level = entry.level.saturating_add(1);
    }

    let new_level = entry.level;
    if new_level > old_level {
        let levels_gained = new_level.saturating_sub(old_level);
        debug!(?skill, levels_gained, new_level, "Skill leveled up");
        state.queue_render_event(RenderEvent::SkillUp {
            skill,
            levels_gained,
            new_level,
        });
    }
}

/// Reveal a skill, emitting [`RenderEvent::UnlockedSkill`] the first time.
pub fn unlock_skill(state: &mut Gamestate, skill: SkillType) {
    if state.unlocked_skills.insert(skill) {
        state.queue_render_event(RenderEvent::UnlockedSkill { skill });
    }
}

/// Clear every temporary item bonus.
pub fn remove_temporary_bonuses(state: &mut Gamestate) {
    for entry in &mut state.skills {
        entry.speed_modifier = 1.0;
    }
}

/// Current level of every skill, in ledger order.
pub fn levels(state: &Gamestate) -> Vec<u32> {
    SkillType::ALL
        .iter()
        .map(|skill| state.skill(*skill).level)
        .collect()
}

// ---------------------------------------------------------------------------
// Power and Attunement
// ---------------------------------------------------------------------------

/// Speed bonus granted by Power.
pub fn power_bonus(power: u32) -> f64 {
    1.0 + f64::from(power) / 100.0
}

/// Speed bonus granted by Attunement.
pub fn attunement_bonus(attunement: u32) -> f64 {
    1.0 + f64::from(attunement) / 1000.0
}

/// Power granted by completing a task. Only bosses grant Power, and the
/// first boss zone (index 2) grants 5.
pub fn power_gain(task: &TaskDefinition) -> u32 {
    if task.task_type != TaskType::Boss {
        return 0;
    }
    task.zone_id
        .checked_sub(1)
        .map_or(0, |mult| mult.saturating_mul(POWER_PER_BOSS_ZONE))
}

/// Attunement granted by completing a task.
pub fn attunement_gain(state: &Gamestate, task: &TaskDefinition) -> u32 {
    if !state.has_perk(PerkType::Attunement) {
        return 0;
    }
    if !ATTUNEMENT_SKILLS.iter().any(|skill| task.uses_skill(*skill)) {
        return 0;
    }
    task.zone_id.saturating_add(1)
}

/// Add Power. The first positive gain emits [`RenderEvent::UnlockedPower`].
pub fn add_power(state: &mut Gamestate, amount: u32) {
    if amount == 0 {
        return;
    }
    if !state.has_unlocked_power {
        state.has_unlocked_power = true;
        state.queue_render_event(RenderEvent::UnlockedPower);
    }
    state.power = state.power.saturating_add(amount);
}

/// Add Attunement.
pub const fn add_attunement(state: &mut Gamestate, amount: u32) {
    state.attunement = state.attunement.saturating_add(amount);
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use waypoint_catalog::{CatalogSource, SkillDefinition, ZoneSource};

    use super::*;

    fn catalog() -> Catalog {
        let skills = SkillType::ALL
            .iter()
            .map(|s| {
                let mult = if *s == SkillType::Magic { 2.0 } else { 1.0 };
                SkillDefinition::new(*s, &format!("{s:?}"), mult)
            })
            .collect();
        Catalog::new(CatalogSource {
            skills,
            items: Vec::new(),
            perks: Vec::new(),
            zones: vec![ZoneSource {
                name: "Test".to_owned(),
                tasks: vec![TaskDefinition::new(
                    1,
                    "T",
                    TaskType::Normal,
                    1.0,
                    &[SkillType::Study],
                )],
            }],
        })
        .unwrap()
    }

    #[test]
    fn xp_needed_grows_strictly_with_level() {
        let catalog = catalog();
        let mut previous = 0.0;
        for level in 0..200 {
            let needed = xp_needed(&catalog, level, SkillType::Study);
            assert!(needed > previous, "level {level}");
            previous = needed;
        }
        assert_eq!(xp_needed(&catalog, 0, SkillType::Study), 10.0);
        assert_eq!(xp_needed(&catalog, 0, SkillType::Magic), 20.0);
    }

    #[test]
    fn level_multiplier_at_zero_is_one() {
        assert_eq!(level_speed_multiplier(0), 1.0);
        assert!((level_speed_multiplier(1) - 1.01).abs() < 1e-12);
    }

    #[test]
    fn add_xp_resolves_multiple_levels_with_one_event() {
        let catalog = catalog();
        let mut state = Gamestate::default();
        // 10 + 10.2 + 10.404 = 30.604 for three levels.
        add_xp(&mut state, &catalog, SkillType::Study, 31.0);
        let entry = state.skill(SkillType::Study);
        assert_eq!(entry.level, 3);
        assert!((entry.progress - (31.0 - 30.604)).abs() < 1e-9);

        let events = state.pop_render_events();
        assert_eq!(
            events,
            vec![RenderEvent::SkillUp {
                skill: SkillType::Study,
                levels_gained: 3,
                new_level: 3,
            }]
        );
    }

    #[test]
    fn add_xp_keeps_progress_below_threshold() {
        let catalog = catalog();
        let mut state = Gamestate::default();
        let amounts = [0.0, 0.5, 9.5, 123.456, 1e4, 3.0];
        for amount in amounts {
            let before = state.skill(SkillType::Magic).level;
            add_xp(&mut state, &catalog, SkillType::Magic, amount);
            let entry = state.skill(SkillType::Magic);
            assert!(entry.level >= before);
            assert!(entry.progress >= 0.0);
            assert!(entry.progress < xp_needed(&catalog, entry.level, SkillType::Magic));
        }
    }

    #[test]
    fn add_xp_ignores_negative_amounts() {
        let catalog = catalog();
        let mut state = Gamestate::default();
        add_xp(&mut state, &catalog, SkillType::Study, 5.0);
        add_xp(&mut state, &catalog, SkillType::Study, -100.0);
        assert_eq!(state.skill(SkillType::Study).progress, 5.0);
        assert!(state.pop_render_events().is_empty());
    }

    #[test]
    fn unlock_skill_emits_once() {
        let mut state = Gamestate::default();
        unlock_skill(&mut state, SkillType::Travel);
        unlock_skill(&mut state, SkillType::Travel);
        assert_eq!(state.pop_render_events().len(), 1);
    }

    #[test]
    fn power_only_from_bosses_past_the_first_zones() {
        let boss = |zone_id| TaskDefinition {
            zone_id,
            ..TaskDefinition::new(1, "Boss", TaskType::Boss, 1.0, &[SkillType::Combat])
        };
        assert_eq!(power_gain(&boss(0)), 0);
        assert_eq!(power_gain(&boss(1)), 0);
        assert_eq!(power_gain(&boss(2)), 5);
        assert_eq!(power_gain(&boss(4)), 15);

        let normal = TaskDefinition {
            zone_id: 4,
            ..TaskDefinition::new(2, "N", TaskType::Normal, 1.0, &[SkillType::Combat])
        };
        assert_eq!(power_gain(&normal), 0);
    }

    #[test]
    fn first_power_gain_unlocks_power() {
        let mut state = Gamestate::default();
        add_power(&mut state, 0);
        assert!(!state.has_unlocked_power);
        add_power(&mut state, 5);
        add_power(&mut state, 10);
        assert_eq!(state.power, 15);
        assert_eq!(state.pop_render_events(), vec![RenderEvent::UnlockedPower]);
        assert!((power_bonus(state.power) - 1.15).abs() < 1e-12);
    }

    #[test]
    fn attunement_requires_perk_and_skill() {
        let mut state = Gamestate::default();
        let study = TaskDefinition {
            zone_id: 3,
            ..TaskDefinition::new(1, "S", TaskType::Normal, 1.0, &[SkillType::Study])
        };
        let combat = TaskDefinition::new(2, "C", TaskType::Normal, 1.0, &[SkillType::Combat]);
        assert_eq!(attunement_gain(&state, &study), 0);

        state.perks.insert(PerkType::Attunement);
        assert_eq!(attunement_gain(&state, &study), 4);
        assert_eq!(attunement_gain(&state, &combat), 0);
        assert_eq!(attunement_bonus(500), 1.5);
    }

    #[test]
    fn temporary_bonuses_reset_to_one() {
        let mut state = Gamestate::default();
        state.skill_mut(SkillType::Combat).unwrap().speed_modifier = 1.7;
        remove_temporary_bonuses(&mut state);
        assert_eq!(state.skill(SkillType::Combat).speed_modifier, 1.0);
    }
}
