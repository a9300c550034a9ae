//! Enumeration types for the Waypoint simulation.
//!
//! Every enum here is a closed identity set known to the engine. Catalog
//! records attach names, tooltips and numbers to these identities; the
//! engine itself only ever matches on the variants.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Skills
// ---------------------------------------------------------------------------

/// A skill the player trains by completing tasks.
///
/// The engine treats skills as an opaque ordinal with a fixed count: the
/// skill ledger is a dense array indexed by [`SkillType::index`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum SkillType {
    /// Persuasion and social standing.
    Charisma,
    /// Reading, research and learning.
    Study,
    /// Fighting.
    Combat,
    /// Finding hidden things.
    Search,
    /// Stealth and deception.
    Subterfuge,
    /// Making things by hand.
    Crafting,
    /// Living off the land.
    Survival,
    /// Moving between places.
    Travel,
    /// Spellcasting.
    Magic,
    /// Endurance.
    Fortitude,
    /// Nature magic.
    Druid,
    /// Late-game transcendence.
    Ascension,
}

impl SkillType {
    /// Number of skills.
    pub const COUNT: usize = 12;

    /// All skills in ledger order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Charisma,
        Self::Study,
        Self::Combat,
        Self::Search,
        Self::Subterfuge,
        Self::Crafting,
        Self::Survival,
        Self::Travel,
        Self::Magic,
        Self::Fortitude,
        Self::Druid,
        Self::Ascension,
    ];

    /// Position of this skill in the ledger.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Inverse of [`SkillType::index`]. Returns `None` when out of range.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

// ---------------------------------------------------------------------------
// Tasks
// ---------------------------------------------------------------------------

/// Behavioral category of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum TaskType {
    /// Optional task with no special behavior.
    Normal,
    /// Completing it moves the player to the next zone.
    Travel,
    /// Must be finished before any Travel task in the zone unlocks.
    Mandatory,
    /// Completing it marks the end of the available content.
    Prestige,
    /// A boss fight; grants Power on completion.
    Boss,
}

// ---------------------------------------------------------------------------
// Items
// ---------------------------------------------------------------------------

/// An item the player can collect and consume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum ItemType {
    /// Spare change from begging.
    Coin,
    /// Fletched arrow.
    Arrow,
    /// Travel food.
    Food,
    /// Forest mushroom.
    Mushroom,
    /// Stolen goblin supplies.
    GoblinSupplies,
    /// Queues a haste charge for the next selected task.
    ScrollOfHaste,
    /// Restores energy.
    Elixir,
}

impl ItemType {
    /// All items in catalog order.
    pub const ALL: [Self; 7] = [
        Self::Coin,
        Self::Arrow,
        Self::Food,
        Self::Mushroom,
        Self::GoblinSupplies,
        Self::ScrollOfHaste,
        Self::Elixir,
    ];
}

// ---------------------------------------------------------------------------
// Perks
// ---------------------------------------------------------------------------

/// A permanent bonus. Once owned, a perk is never lost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum PerkType {
    /// Study speed.
    Reading,
    /// Experience gain.
    Writing,
    /// Charisma speed.
    VillagerGratitude,
    /// Magic speed.
    Amulet,
    /// One-time maximum energy increase.
    EnergySpell,
    /// Charisma and Combat speed.
    VillageHero,
    /// Charisma and Subterfuge speed.
    UndergroundConnection,
    /// Charisma and Crafting speed.
    PurgedBureaucracy,
    /// Subterfuge and Travel speed.
    WalkWithoutRhythm,
    /// Combat and Fortitude speed.
    GoblinScourge,
    /// Survival and Fortitude speed.
    SunkenTreasure,
    /// Druid speed.
    LostTemple,
    /// Travel speed.
    ExperiencedTraveler,
    /// Cheaper energy for tasks finished within a single tick.
    MinorTimeCompression,
    /// Cheaper energy for all tasks.
    HighAltitudeClimbing,
    /// Cheaper energy for tasks in zones behind the frontier.
    ReflectionsOnTheJourney,
    /// Maximum energy grows with every energy reset.
    EnergeticMemory,
    /// Enables Attunement gains.
    Attunement,
    /// Enables task automation.
    DeepTrance,
}

impl PerkType {
    /// All perks in catalog order.
    pub const ALL: [Self; 19] = [
        Self::Reading,
        Self::Writing,
        Self::VillagerGratitude,
        Self::Amulet,
        Self::EnergySpell,
        Self::VillageHero,
        Self::UndergroundConnection,
        Self::PurgedBureaucracy,
        Self::WalkWithoutRhythm,
        Self::GoblinScourge,
        Self::SunkenTreasure,
        Self::LostTemple,
        Self::ExperiencedTraveler,
        Self::MinorTimeCompression,
        Self::HighAltitudeClimbing,
        Self::ReflectionsOnTheJourney,
        Self::EnergeticMemory,
        Self::Attunement,
        Self::DeepTrance,
    ];
}

// ---------------------------------------------------------------------------
// Automation
// ---------------------------------------------------------------------------

/// Scope of task automation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum AutomationMode {
    /// Automate in every zone until switched off.
    All,
    /// Automate in the current zone only; switches off on travel.
    Zone,
    /// No automation.
    #[default]
    Off,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skill_indices_are_dense() {
        for (i, skill) in SkillType::ALL.iter().enumerate() {
            assert_eq!(skill.index(), i);
            assert_eq!(SkillType::from_index(i), Some(*skill));
        }
        assert_eq!(SkillType::from_index(SkillType::COUNT), None);
    }

    #[test]
    fn automation_defaults_to_off() {
        assert_eq!(AutomationMode::default(), AutomationMode::Off);
    }
}
