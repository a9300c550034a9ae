//! The built-in content catalog.
//!
//! Seven zones from the village to the summit temple. Task ids are
//! `zone * 100 + n` so saves stay readable; ids are persisted and must not
//! be renumbered.

use waypoint_types::{ItemType, PerkType, SkillType, TaskType};

use crate::catalog::Catalog;
use crate::definitions::{
    CatalogSource, ConsumeEffect, ItemDefinition, PerkDefinition, SkillDefinition,
    TaskDefinition, ZoneSource,
};
use crate::error::CatalogError;

use SkillType::{
    Ascension, Charisma, Combat, Crafting, Druid, Fortitude, Magic, Search, Study, Subterfuge,
    Survival, Travel,
};
use TaskType::{Boss, Mandatory, Normal, Prestige};

/// Additive speed bonus per consumed unit of a skill item.
const ITEM_SPEED_BONUS: f64 = 0.1;

/// Energy restored per elixir.
const ELIXIR_ENERGY: f64 = 5.0;

impl Catalog {
    /// Build the built-in catalog.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] only if the built-in content is
    /// inconsistent, which the tests below guard against.
    pub fn standard() -> Result<Self, CatalogError> {
        Self::new(standard_source())
    }
}

/// The unvalidated built-in content.
pub fn standard_source() -> CatalogSource {
    CatalogSource {
        skills: skills(),
        items: items(),
        perks: perks(),
        zones: vec![
            village(),
            village_watch(),
            raid(),
            wilderness(),
            cave_system(),
            mountain_pass(),
            summit_temple(),
        ],
    }
}

fn skills() -> Vec<SkillDefinition> {
    vec![
        SkillDefinition::new(Charisma, "Charisma", 1.0),
        SkillDefinition::new(Study, "Study", 1.0),
        SkillDefinition::new(Combat, "Combat", 1.0),
        SkillDefinition::new(Search, "Search", 1.0),
        SkillDefinition::new(Subterfuge, "Subterfuge", 1.0),
        SkillDefinition::new(Crafting, "Crafting", 1.0),
        SkillDefinition::new(Survival, "Survival", 1.0),
        SkillDefinition::new(Travel, "Travel", 1.0),
        SkillDefinition::new(Magic, "Magic", 1.2),
        SkillDefinition::new(Fortitude, "Fortitude", 1.5),
        SkillDefinition::new(Druid, "Druid", 1.5),
        SkillDefinition::new(Ascension, "Ascension", 3.0),
    ]
}

/// Helper to build a skill-speed [`ItemDefinition`].
fn speed_item(
    item_type: ItemType,
    name: &str,
    icon: &str,
    skills: &[SkillType],
) -> ItemDefinition {
    let mut item = ItemDefinition {
        item_type,
        name: name.to_owned(),
        tooltip: String::new(),
        icon: icon.to_owned(),
        effect: ConsumeEffect::SkillSpeed {
            skills: skills.to_vec(),
            per_unit: ITEM_SPEED_BONUS,
        },
        auto_use: true,
    };
    item.tooltip = item.effect_text(1);
    item
}

fn items() -> Vec<ItemDefinition> {
    vec![
        speed_item(ItemType::Coin, "Coin", "🪙", &[Charisma]),
        speed_item(ItemType::Arrow, "Arrow", "🏹", &[Combat]),
        speed_item(ItemType::Food, "Food", "🍖", &[Survival]),
        speed_item(ItemType::Mushroom, "Mushroom", "🍄", &[Magic]),
        speed_item(
            ItemType::GoblinSupplies,
            "Goblin Supplies",
            "🎒",
            &[Subterfuge, Combat],
        ),
        ItemDefinition {
            item_type: ItemType::ScrollOfHaste,
            name: "Scroll of Haste".to_owned(),
            tooltip: "Your next selected task progresses 5x faster until it completes".to_owned(),
            icon: "📜".to_owned(),
            effect: ConsumeEffect::HasteScrolls { per_unit: 1 },
            auto_use: false,
        },
        ItemDefinition {
            item_type: ItemType::Elixir,
            name: "Elixir".to_owned(),
            tooltip: "Restores 5 energy".to_owned(),
            icon: "🧪".to_owned(),
            effect: ConsumeEffect::Energy {
                per_unit: ELIXIR_ENERGY,
            },
            auto_use: true,
        },
    ]
}

/// Helper to build a [`PerkDefinition`].
fn perk(perk_type: PerkType, name: &str, tooltip: &str, icon: &str) -> PerkDefinition {
    PerkDefinition {
        perk_type,
        name: name.to_owned(),
        tooltip: tooltip.to_owned(),
        icon: icon.to_owned(),
    }
}

fn perks() -> Vec<PerkDefinition> {
    use PerkType as P;
    vec![
        perk(P::Reading, "How to Read", "Improves Study speed by 50%", "📖"),
        perk(P::Writing, "How to Write", "Improves XP gain by 50%", "📝"),
        perk(P::VillagerGratitude, "Villager Gratitude", "Improves Charisma speed by 50%", "❤️"),
        perk(P::Amulet, "Mysterious Amulet", "Improves Magic speed by 50%", "📿"),
        perk(P::EnergySpell, "Energetic Spell", "Increases max Energy by 50", "✨"),
        perk(P::VillageHero, "Village Hero", "Improves Charisma and Combat speed by 20%", "🦸"),
        perk(
            P::UndergroundConnection,
            "Underground Connection",
            "Improves Charisma speed by 20% and Subterfuge speed by 40%",
            "🕳️",
        ),
        perk(
            P::PurgedBureaucracy,
            "Purged Bureaucracy",
            "Improves Charisma and Crafting speed by 30%",
            "📋",
        ),
        perk(
            P::WalkWithoutRhythm,
            "Walk Without Rhythm",
            "Improves Subterfuge speed by 40% and Travel speed by 20%",
            "👣",
        ),
        perk(P::GoblinScourge, "Goblin Scourge", "Improves Combat and Fortitude speed by 30%", "👺"),
        perk(
            P::SunkenTreasure,
            "Sunken Treasure",
            "Improves Survival and Fortitude speed by 30%",
            "💰",
        ),
        perk(P::LostTemple, "Lost Temple", "Improves Druid speed by 50%", "🛕"),
        perk(P::ExperiencedTraveler, "Experienced Traveler", "Improves Travel speed by 50%", "🧭"),
        perk(
            P::MinorTimeCompression,
            "Minor Time Compression",
            "Tasks finished within a single tick cost 80% less Energy",
            "⏳",
        ),
        perk(P::HighAltitudeClimbing, "High Altitude Climbing", "Tasks cost 20% less Energy", "🏔️"),
        perk(
            P::ReflectionsOnTheJourney,
            "Reflections on the Journey",
            "Tasks cost 5% less Energy per zone behind your furthest zone",
            "🪞",
        ),
        perk(
            P::EnergeticMemory,
            "Energetic Memory",
            "Each energy reset raises max Energy by a tenth of the zones reached",
            "🧠",
        ),
        perk(
            P::Attunement,
            "Attunement",
            "Study, Magic and Druid tasks grant Attunement",
            "🌀",
        ),
        perk(P::DeepTrance, "Deep Trance", "Unlocks task automation", "🧘"),
    ]
}

fn zone(name: &str, tasks: Vec<TaskDefinition>) -> ZoneSource {
    ZoneSource {
        name: name.to_owned(),
        tasks,
    }
}

fn travel(id: u32, name: &str, cost: f64, skills: &[SkillType]) -> TaskDefinition {
    TaskDefinition::new(id, name, TaskType::Travel, cost, skills)
}

fn village() -> ZoneSource {
    zone(
        "The Village",
        vec![
            travel(0, "Join the Watch", 5.0, &[Charisma]),
            TaskDefinition::new(1, "Read Noticeboard", Mandatory, 1.0, &[Study]),
            TaskDefinition::new(2, "Train with Weapons", Mandatory, 1.0, &[Combat]),
            TaskDefinition::new(3, "Learn How to Read", Normal, 2.0, &[Study])
                .with_perk(PerkType::Reading),
            TaskDefinition::new(4, "Beg for Money", Normal, 1.0, &[Charisma])
                .with_xp_mult(2.0)
                .with_item(ItemType::Coin)
                .with_max_reps(5),
            TaskDefinition::new(5, "Hide and Seek", Normal, 1.5, &[Search, Subterfuge])
                .with_max_reps(3),
            TaskDefinition::new(6, "Observe Surroundings", Normal, 1.5, &[Study])
                .with_xp_mult(3.0)
                .with_max_reps(3)
                .with_unlock(7),
            TaskDefinition::new(7, "Explore the Old Well", Normal, 2.0, &[Search])
                .with_item(ItemType::ScrollOfHaste)
                .hidden(),
        ],
    )
}

fn village_watch() -> ZoneSource {
    zone(
        "The Village Watch",
        vec![
            travel(100, "Notice Smoke in the Distance", 5.0, &[Survival]),
            TaskDefinition::new(101, "Learn Routines", Mandatory, 1.0, &[Study]),
            TaskDefinition::new(102, "Deal with Drunkards", Mandatory, 1.0, &[Charisma]),
            TaskDefinition::new(103, "Chit-chat", Normal, 0.5, &[Charisma])
                .with_xp_mult(2.0)
                .with_max_reps(5),
            TaskDefinition::new(104, "Sparring", Normal, 2.0, &[Combat, Fortitude])
                .with_max_reps(3),
            TaskDefinition::new(105, "Fletch Arrows", Normal, 1.0, &[Crafting])
                .with_item(ItemType::Arrow)
                .with_max_reps(3),
            TaskDefinition::new(106, "Prepare Travel Supplies", Normal, 2.0, &[Travel, Survival])
                .with_item(ItemType::Food),
            TaskDefinition::new(107, "Learn How to Write", Normal, 3.0, &[Study])
                .with_perk(PerkType::Writing),
            TaskDefinition::new(108, "Help the Villagers", Normal, 2.0, &[Charisma])
                .with_perk(PerkType::VillagerGratitude)
                .with_max_reps(3),
        ],
    )
}

fn raid() -> ZoneSource {
    zone(
        "The Raid",
        vec![
            travel(200, "Enter the Wilderness", 5.0, &[Travel]),
            TaskDefinition::new(201, "Fight a Goblin", Mandatory, 1.0, &[Combat]),
            TaskDefinition::new(202, "Warn Villagers", Mandatory, 1.0, &[Charisma]),
            TaskDefinition::new(203, "Salvage Food", Normal, 0.5, &[Search])
                .with_item(ItemType::Food)
                .with_max_reps(3),
            TaskDefinition::new(204, "Rescue Villager", Normal, 2.0, &[Subterfuge, Search])
                .with_perk(PerkType::VillageHero),
            TaskDefinition::new(205, "Treat Villager Wounds", Normal, 2.0, &[Survival, Crafting])
                .with_item(ItemType::Elixir),
            TaskDefinition::new(206, "Goblin Warlord", Boss, 4.0, &[Combat, Fortitude])
                .with_perk(PerkType::GoblinScourge),
        ],
    )
}

fn wilderness() -> ZoneSource {
    zone(
        "The Wilderness",
        vec![
            travel(300, "Find Cave Entrance", 5.0, &[Travel, Search]),
            TaskDefinition::new(301, "Look for Tracks", Mandatory, 1.0, &[Search, Subterfuge]),
            TaskDefinition::new(302, "Survive the Night", Mandatory, 1.0, &[Survival, Fortitude]),
            TaskDefinition::new(303, "Find an Amulet", Mandatory, 0.5, &[Search, Magic])
                .with_perk(PerkType::Amulet),
            TaskDefinition::new(304, "Build a Fire", Normal, 2.0, &[Survival, Crafting])
                .with_item(ItemType::Food),
            TaskDefinition::new(305, "Forage for Mushrooms", Normal, 1.0, &[Search])
                .with_item(ItemType::Mushroom)
                .with_max_reps(5),
            TaskDefinition::new(306, "Befriend a Deer", Normal, 2.0, &[Charisma, Druid])
                .with_unlock(307),
            TaskDefinition::new(307, "Follow the Deer", Normal, 3.0, &[Druid, Travel])
                .with_perk(PerkType::LostTemple)
                .hidden(),
            TaskDefinition::new(308, "Forest Guardian", Boss, 4.0, &[Combat, Magic]),
        ],
    )
}

fn cave_system() -> ZoneSource {
    zone(
        "The Cave System",
        vec![
            travel(400, "Leave Via Back Entrance", 5.0, &[Travel]),
            TaskDefinition::new(401, "Find a Way Through", Mandatory, 1.0, &[Search]),
            TaskDefinition::new(402, "Rescue Captives", Mandatory, 1.5, &[Charisma, Subterfuge])
                .with_perk(PerkType::UndergroundConnection),
            TaskDefinition::new(403, "Steal Supplies", Normal, 0.5, &[Subterfuge])
                .with_item(ItemType::GoblinSupplies)
                .with_max_reps(5),
            TaskDefinition::new(404, "Try Casting a Spell", Normal, 2.0, &[Magic, Study])
                .with_perk(PerkType::EnergySpell),
            TaskDefinition::new(405, "Inspect Wall Paintings", Normal, 2.0, &[Study])
                .with_perk(PerkType::MinorTimeCompression),
            TaskDefinition::new(406, "Meditate by the Glowing Pool", Normal, 3.0, &[Magic, Druid])
                .with_perk(PerkType::Attunement),
            TaskDefinition::new(407, "Goblin Chieftain", Boss, 4.0, &[Combat, Fortitude]),
        ],
    )
}

fn mountain_pass() -> ZoneSource {
    zone(
        "The Mountain Pass",
        vec![
            travel(500, "Reach the Summit", 6.0, &[Travel, Fortitude]),
            TaskDefinition::new(501, "Climb the Cliffs", Mandatory, 1.5, &[Fortitude, Survival])
                .with_perk(PerkType::HighAltitudeClimbing),
            TaskDefinition::new(502, "Bribe the Toll Keeper", Normal, 2.0, &[Charisma])
                .with_perk(PerkType::PurgedBureaucracy),
            TaskDefinition::new(503, "Sneak Past the Patrols", Normal, 2.0, &[Subterfuge, Travel])
                .with_perk(PerkType::WalkWithoutRhythm),
            TaskDefinition::new(504, "Dive for Sunken Treasure", Normal, 2.0, &[Survival, Search])
                .with_perk(PerkType::SunkenTreasure),
            TaskDefinition::new(505, "Map the Pass", Normal, 2.0, &[Travel])
                .with_perk(PerkType::ExperiencedTraveler),
            TaskDefinition::new(506, "Look Back on the Road", Normal, 2.0, &[Travel, Study])
                .with_perk(PerkType::ReflectionsOnTheJourney),
            TaskDefinition::new(507, "Enter a Deep Trance", Normal, 3.0, &[Magic, Ascension])
                .with_perk(PerkType::DeepTrance),
            TaskDefinition::new(508, "Mountain Troll", Boss, 4.0, &[Combat, Fortitude]),
        ],
    )
}

fn summit_temple() -> ZoneSource {
    zone(
        "The Summit Temple",
        vec![
            TaskDefinition::new(600, "Ascend", Prestige, 8.0, &[Ascension]),
            TaskDefinition::new(601, "Recall Every Step", Normal, 3.0, &[Study])
                .with_perk(PerkType::EnergeticMemory),
            TaskDefinition::new(602, "Commune with the Wind", Normal, 2.0, &[Druid, Ascension])
                .with_item(ItemType::ScrollOfHaste)
                .with_max_reps(3),
            TaskDefinition::new(603, "Temple Guardian", Boss, 5.0, &[Combat, Magic]),
        ],
    )
}
