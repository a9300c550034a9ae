//! Catalog record shapes.
//!
//! These are the immutable definitions the engine reads. Mutable
//! per-session state (task progress, skill levels, held item counts) lives
//! in `waypoint-core` and only ever references these records.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use waypoint_types::{ItemType, PerkType, SkillType, TaskId, TaskType};

// ---------------------------------------------------------------------------
// Skills
// ---------------------------------------------------------------------------

/// Static data for one skill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillDefinition {
    /// The skill this record describes.
    pub skill_type: SkillType,
    /// Display name.
    pub name: String,
    /// Scales the XP required per level for this skill.
    #[serde(default = "default_one")]
    pub xp_needed_mult: f64,
}

impl SkillDefinition {
    /// Create a skill definition.
    pub fn new(skill_type: SkillType, name: &str, xp_needed_mult: f64) -> Self {
        Self {
            skill_type,
            name: name.to_owned(),
            xp_needed_mult,
        }
    }
}

// ---------------------------------------------------------------------------
// Tasks
// ---------------------------------------------------------------------------

/// Static data for one task.
///
/// Live task instances hold an `Arc` to the definition stored in the
/// catalog's task index, so two instances of the same task always point at
/// the same allocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskDefinition {
    /// Stable identity, used by saves and automation priorities.
    pub id: TaskId,
    /// Display name.
    pub name: String,
    /// Behavioral category.
    pub task_type: TaskType,
    /// Scales the progress required to finish one repetition.
    #[serde(default = "default_one")]
    pub cost_multiplier: f64,
    /// Skills trained by this task, in display order.
    pub skills: Vec<SkillType>,
    /// Scales the XP granted per unit of progress.
    #[serde(default = "default_one")]
    pub xp_mult: f64,
    /// Item granted on every completed repetition.
    #[serde(default)]
    pub item: Option<ItemType>,
    /// Perk granted when the last repetition completes.
    #[serde(default)]
    pub perk: Option<PerkType>,
    /// Number of repetitions before the task is exhausted.
    #[serde(default = "default_max_reps")]
    pub max_reps: u32,
    /// Hidden tasks only appear once unlocked by another task.
    #[serde(default)]
    pub hidden_by_default: bool,
    /// Task revealed when this one is fully finished.
    #[serde(default)]
    pub unlocks_task: Option<TaskId>,
    /// Index of the owning zone. Assigned by the catalog from the task's
    /// position, so sources may leave it out.
    #[serde(default)]
    pub zone_id: u32,
}

impl TaskDefinition {
    /// Create a single-repetition, visible task with unit multipliers.
    pub fn new(
        id: u32,
        name: &str,
        task_type: TaskType,
        cost_multiplier: f64,
        skills: &[SkillType],
    ) -> Self {
        Self {
            id: TaskId(id),
            name: name.to_owned(),
            task_type,
            cost_multiplier,
            skills: skills.to_vec(),
            xp_mult: 1.0,
            item: None,
            perk: None,
            max_reps: 1,
            hidden_by_default: false,
            unlocks_task: None,
            zone_id: 0,
        }
    }

    /// Set the XP multiplier.
    #[must_use]
    pub const fn with_xp_mult(mut self, xp_mult: f64) -> Self {
        self.xp_mult = xp_mult;
        self
    }

    /// Grant an item on every repetition.
    #[must_use]
    pub const fn with_item(mut self, item: ItemType) -> Self {
        self.item = Some(item);
        self
    }

    /// Grant a perk on the final repetition.
    #[must_use]
    pub const fn with_perk(mut self, perk: PerkType) -> Self {
        self.perk = Some(perk);
        self
    }

    /// Set the repetition count.
    #[must_use]
    pub const fn with_max_reps(mut self, max_reps: u32) -> Self {
        self.max_reps = max_reps;
        self
    }

    /// Reveal another task when this one is fully finished.
    #[must_use]
    pub const fn with_unlock(mut self, task: u32) -> Self {
        self.unlocks_task = Some(TaskId(task));
        self
    }

    /// Hide this task until another task unlocks it.
    #[must_use]
    pub const fn hidden(mut self) -> Self {
        self.hidden_by_default = true;
        self
    }

    /// Whether this task trains the given skill.
    pub fn uses_skill(&self, skill: SkillType) -> bool {
        self.skills.contains(&skill)
    }
}

// ---------------------------------------------------------------------------
// Items
// ---------------------------------------------------------------------------

/// What happens when an item is consumed.
///
/// A closed set interpreted by the engine. Every effect is linear in the
/// number of units consumed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum ConsumeEffect {
    /// Raise the temporary speed modifier of each listed skill.
    SkillSpeed {
        /// Skills affected.
        skills: Vec<SkillType>,
        /// Additive modifier per unit (0.1 = +10%).
        per_unit: f64,
    },
    /// Queue haste charges for upcoming task selections.
    HasteScrolls {
        /// Charges queued per unit.
        per_unit: u32,
    },
    /// Restore energy, up to the maximum.
    Energy {
        /// Energy restored per unit.
        per_unit: f64,
    },
}

/// Static data for one item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDefinition {
    /// The item this record describes.
    pub item_type: ItemType,
    /// Display name.
    pub name: String,
    /// Tooltip text.
    pub tooltip: String,
    /// Icon glyph.
    pub icon: String,
    /// Effect applied on consumption.
    pub effect: ConsumeEffect,
    /// Whether the auto-use option may consume this item.
    #[serde(default = "default_true")]
    pub auto_use: bool,
}

impl ItemDefinition {
    /// Human-readable description of consuming `amount` units.
    pub fn effect_text(&self, amount: u32) -> String {
        match &self.effect {
            ConsumeEffect::SkillSpeed { skills, per_unit } => {
                let names: Vec<String> = skills.iter().map(|s| format!("{s:?}")).collect();
                let percent = per_unit * f64::from(amount) * 100.0;
                format!("Improves {} speed by {percent:.0}%", names.join(" and "))
            }
            ConsumeEffect::HasteScrolls { per_unit } => {
                let charges = per_unit.saturating_mul(amount);
                format!("Hastes the next {charges} selected tasks")
            }
            ConsumeEffect::Energy { per_unit } => {
                let energy = per_unit * f64::from(amount);
                format!("Restores {energy:.0} energy")
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Perks
// ---------------------------------------------------------------------------

/// Static data for one perk. Perk behavior lives in the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerkDefinition {
    /// The perk this record describes.
    pub perk_type: PerkType,
    /// Display name.
    pub name: String,
    /// Tooltip text.
    pub tooltip: String,
    /// Icon glyph.
    pub icon: String,
}

// ---------------------------------------------------------------------------
// Zones
// ---------------------------------------------------------------------------

/// A validated zone: an ordered list of shared task definitions.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneDefinition {
    /// Display name.
    pub name: String,
    /// Tasks in display order.
    pub tasks: Vec<Arc<TaskDefinition>>,
}

/// Unvalidated zone data as written in a catalog source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneSource {
    /// Display name.
    pub name: String,
    /// Tasks in display order.
    pub tasks: Vec<TaskDefinition>,
}

/// Unvalidated catalog data, as authored in code or loaded from YAML.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CatalogSource {
    /// One definition per skill.
    #[serde(default)]
    pub skills: Vec<SkillDefinition>,
    /// Item definitions.
    #[serde(default)]
    pub items: Vec<ItemDefinition>,
    /// Perk definitions.
    #[serde(default)]
    pub perks: Vec<PerkDefinition>,
    /// Zones in travel order.
    #[serde(default)]
    pub zones: Vec<ZoneSource>,
}

const fn default_one() -> f64 {
    1.0
}

const fn default_max_reps() -> u32 {
    1
}

const fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn supplies() -> ItemDefinition {
        ItemDefinition {
            item_type: ItemType::GoblinSupplies,
            name: "Goblin Supplies".to_owned(),
            tooltip: String::new(),
            icon: String::new(),
            effect: ConsumeEffect::SkillSpeed {
                skills: vec![SkillType::Subterfuge, SkillType::Combat],
                per_unit: 0.1,
            },
            auto_use: true,
        }
    }

    #[test]
    fn effect_text_scales_with_amount() {
        let item = supplies();
        assert_eq!(
            item.effect_text(1),
            "Improves Subterfuge and Combat speed by 10%"
        );
        assert_eq!(
            item.effect_text(3),
            "Improves Subterfuge and Combat speed by 30%"
        );
    }

    #[test]
    fn haste_and_energy_effect_text() {
        let mut item = supplies();
        item.effect = ConsumeEffect::HasteScrolls { per_unit: 1 };
        assert_eq!(item.effect_text(2), "Hastes the next 2 selected tasks");
        item.effect = ConsumeEffect::Energy { per_unit: 5.0 };
        assert_eq!(item.effect_text(4), "Restores 20 energy");
    }

    #[test]
    fn task_builder_sets_fields() {
        let task = TaskDefinition::new(6, "Observe", TaskType::Normal, 1.5, &[SkillType::Study])
            .with_xp_mult(3.0)
            .with_max_reps(3)
            .with_unlock(7)
            .with_item(ItemType::Coin);
        assert_eq!(task.id, TaskId(6));
        assert_eq!(task.max_reps, 3);
        assert_eq!(task.unlocks_task, Some(TaskId(7)));
        assert_eq!(task.item, Some(ItemType::Coin));
        assert!(task.uses_skill(SkillType::Study));
        assert!(!task.uses_skill(SkillType::Magic));
        assert!(task.hidden().hidden_by_default);
    }
}
