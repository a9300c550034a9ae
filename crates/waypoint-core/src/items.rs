//! Held items: granting, consuming and auto-use.

use tracing::{debug, warn};
use waypoint_catalog::{Catalog, ConsumeEffect};
use waypoint_types::{ItemType, RenderEvent};

use crate::error::ActionError;
use crate::gamestate::Gamestate;

/// Add `count` units of an item.
pub fn add_item(state: &mut Gamestate, item: ItemType, count: u32) {
    let held = state.items.entry(item).or_insert(0);
    *held = held.saturating_add(count);
}

/// Consume one unit of an item, or every held unit when `use_all` is set.
///
/// Returns the number of units consumed.
///
/// # Errors
///
/// Returns [`ActionError::ItemNotHeld`] if none are held, or
/// [`ActionError::ItemNotDefined`] if the catalog lacks the item.
pub fn click_item(
    state: &mut Gamestate,
    catalog: &Catalog,
    item: ItemType,
    use_all: bool,
) -> Result<u32, ActionError> {
    let held = state.item_count(item);
    if held == 0 {
        warn!(?item, "Tried to use an item that is not held");
        return Err(ActionError::ItemNotHeld(item));
    }
    let definition = catalog.item(item).ok_or(ActionError::ItemNotDefined(item))?;

    let used = if use_all { held } else { 1 };
    apply_effect(state, &definition.effect, used);
    state.items.insert(item, held.saturating_sub(used));

    debug!(?item, used, "Item used");
    state.queue_render_event(RenderEvent::UsedItem { item, count: used });
    Ok(used)
}

/// Apply a consume effect for `amount` units.
pub fn apply_effect(state: &mut Gamestate, effect: &ConsumeEffect, amount: u32) {
    match effect {
        ConsumeEffect::SkillSpeed { skills, per_unit } => {
            let bonus = per_unit * f64::from(amount);
            for skill in skills {
                if let Some(entry) = state.skill_mut(*skill) {
                    entry.speed_modifier += bonus;
                }
            }
        }
        ConsumeEffect::HasteScrolls { per_unit } => {
            state.queued_scrolls_of_haste = state
                .queued_scrolls_of_haste
                .saturating_add(per_unit.saturating_mul(amount));
        }
        ConsumeEffect::Energy { per_unit } => {
            state.energy.restore(per_unit * f64::from(amount));
        }
    }
}

/// Halve every held count, rounding up.
pub fn halve_item_counts(state: &mut Gamestate) {
    for count in state.items.values_mut() {
        *count = count.div_ceil(2);
    }
}

/// Consume every held item that allows auto-use, if auto-use is on.
pub fn auto_use_items(state: &mut Gamestate, catalog: &Catalog) {
    if !state.auto_use_items {
        return;
    }
    let usable: Vec<ItemType> = state
        .items
        .iter()
        .filter(|(item, count)| {
            **count > 0 && catalog.item(**item).is_some_and(|definition| definition.auto_use)
        })
        .map(|(item, _)| *item)
        .collect();

    for item in usable {
        if let Err(error) = click_item(state, catalog, item, true) {
            warn!(?item, %error, "Auto-use failed");
        }
    }
}

/// Flip automatic item use.
pub const fn toggle_auto_use_items(state: &mut Gamestate) {
    state.auto_use_items = !state.auto_use_items;
}
