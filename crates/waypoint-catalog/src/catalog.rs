//! The validated catalog and its lookup indexes.
//!
//! A [`Catalog`] is built once at startup from a [`CatalogSource`] and is
//! never mutated afterwards. Construction validates cross-references and
//! builds the global `TaskId -> TaskDefinition` index that saves are
//! rehydrated through.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use tracing::debug;
use waypoint_types::{ItemType, PerkType, SkillType, TaskId};

use crate::definitions::{
    CatalogSource, ItemDefinition, PerkDefinition, SkillDefinition, TaskDefinition,
    ZoneDefinition,
};
use crate::error::CatalogError;

/// Immutable content catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    /// Skill definitions indexed by [`SkillType::index`].
    skills: Vec<SkillDefinition>,
    /// Item definitions by type.
    items: BTreeMap<ItemType, ItemDefinition>,
    /// Perk definitions by type.
    perks: BTreeMap<PerkType, PerkDefinition>,
    /// Zones in travel order.
    zones: Vec<ZoneDefinition>,
    /// Global task index shared with every zone's task list.
    task_index: BTreeMap<TaskId, Arc<TaskDefinition>>,
}

impl Catalog {
    /// Validate a source and build the catalog.
    ///
    /// Each task's `zone_id` is assigned from the zone it is listed under.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] describing the first validation failure.
    pub fn new(source: CatalogSource) -> Result<Self, CatalogError> {
        let CatalogSource {
            skills: skill_source,
            items: item_source,
            perks: perk_source,
            zones: zone_source,
        } = source;

        if zone_source.is_empty() {
            return Err(CatalogError::NoZones);
        }

        let skills = order_skills(skill_source)?;
        let items: BTreeMap<ItemType, ItemDefinition> = item_source
            .into_iter()
            .map(|item| (item.item_type, item))
            .collect();
        let perks: BTreeMap<PerkType, PerkDefinition> = perk_source
            .into_iter()
            .map(|perk| (perk.perk_type, perk))
            .collect();

        let mut zones = Vec::with_capacity(zone_source.len());
        let mut task_index = BTreeMap::new();

        for (zone_id, zone) in (0_u32..).zip(zone_source) {
            let mut tasks = Vec::with_capacity(zone.tasks.len());
            for mut task in zone.tasks {
                task.zone_id = zone_id;
                validate_task(&task, &items, &perks)?;
                let shared = Arc::new(task);
                if task_index.insert(shared.id, Arc::clone(&shared)).is_some() {
                    return Err(CatalogError::DuplicateTaskId(shared.id));
                }
                tasks.push(shared);
            }
            zones.push(ZoneDefinition {
                name: zone.name,
                tasks,
            });
        }

        for task in task_index.values() {
            if let Some(target) = task.unlocks_task
                && !task_index.contains_key(&target)
            {
                return Err(CatalogError::UnknownUnlock {
                    task: task.id,
                    target,
                });
            }
        }

        debug!(
            zones = zones.len(),
            tasks = task_index.len(),
            items = items.len(),
            perks = perks.len(),
            "Catalog built"
        );

        Ok(Self {
            skills,
            items,
            perks,
            zones,
            task_index,
        })
    }

    /// Parse and validate a catalog from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Yaml`] on malformed input, or a validation
    /// error from [`Catalog::new`].
    pub fn from_yaml(yaml: &str) -> Result<Self, CatalogError> {
        let source: CatalogSource = serde_yml::from_str(yaml)?;
        Self::new(source)
    }

    /// Load and validate a catalog from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Io`] if the file cannot be read, otherwise as
    /// [`Catalog::from_yaml`].
    pub fn from_file(path: &Path) -> Result<Self, CatalogError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Number of zones.
    pub const fn zone_count(&self) -> usize {
        self.zones.len()
    }

    /// All zones in travel order.
    pub fn zones(&self) -> &[ZoneDefinition] {
        &self.zones
    }

    /// The zone at `index`, if it exists.
    pub fn zone(&self, index: u32) -> Option<&ZoneDefinition> {
        usize::try_from(index).ok().and_then(|i| self.zones.get(i))
    }

    /// Resolve a task id through the global index.
    pub fn task(&self, id: TaskId) -> Option<&Arc<TaskDefinition>> {
        self.task_index.get(&id)
    }

    /// Every task, ordered by id.
    pub fn tasks(&self) -> impl Iterator<Item = &Arc<TaskDefinition>> {
        self.task_index.values()
    }

    /// The definition of a skill.
    pub fn skill(&self, skill: SkillType) -> Option<&SkillDefinition> {
        self.skills.get(skill.index())
    }

    /// XP scaling of a skill. Validated catalogs define every skill, so the
    /// fallback of 1 only applies to hand-assembled test data.
    pub fn xp_needed_mult(&self, skill: SkillType) -> f64 {
        self.skill(skill).map_or(1.0, |definition| definition.xp_needed_mult)
    }

    /// The definition of an item.
    pub fn item(&self, item: ItemType) -> Option<&ItemDefinition> {
        self.items.get(&item)
    }

    /// The definition of a perk.
    pub fn perk(&self, perk: PerkType) -> Option<&PerkDefinition> {
        self.perks.get(&perk)
    }
}

/// Arrange skill definitions in ledger order, rejecting gaps and duplicates.
fn order_skills(source: Vec<SkillDefinition>) -> Result<Vec<SkillDefinition>, CatalogError> {
    let mut by_type: BTreeMap<SkillType, SkillDefinition> = BTreeMap::new();
    for definition in source {
        let skill = definition.skill_type;
        if by_type.insert(skill, definition).is_some() {
            return Err(CatalogError::DuplicateSkillDefinition(skill));
        }
    }

    SkillType::ALL
        .iter()
        .map(|skill| {
            by_type
                .remove(skill)
                .ok_or(CatalogError::MissingSkillDefinition(*skill))
        })
        .collect()
}

/// Per-task checks that do not need the full task index.
fn validate_task(
    task: &TaskDefinition,
    items: &BTreeMap<ItemType, ItemDefinition>,
    perks: &BTreeMap<PerkType, PerkDefinition>,
) -> Result<(), CatalogError> {
    if task.skills.is_empty() {
        return Err(CatalogError::EmptySkillList(task.id));
    }
    if task.max_reps == 0 {
        return Err(CatalogError::ZeroMaxReps(task.id));
    }
    if !task.cost_multiplier.is_finite() || task.cost_multiplier <= 0.0 {
        return Err(CatalogError::InvalidCostMultiplier {
            task: task.id,
            value: task.cost_multiplier,
        });
    }
    if let Some(item) = task.item
        && !items.contains_key(&item)
    {
        return Err(CatalogError::MissingItemDefinition(item));
    }
    if let Some(perk) = task.perk
        && !perks.contains_key(&perk)
    {
        return Err(CatalogError::MissingPerkDefinition(perk));
    }
    Ok(())
}
