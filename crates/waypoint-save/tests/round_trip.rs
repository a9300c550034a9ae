//! Save round trips through a real session.
//!
//! The state is played forward with values that encode exactly in JSON,
//! saved through the session's sink, and loaded back with a fresh gateway.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use std::collections::BTreeMap;
use std::sync::Arc;

use waypoint_catalog::Catalog;
use waypoint_core::config::RulesConfig;
use waypoint_core::{GameSession, Gamestate};
use waypoint_save::{MemoryStore, SaveGateway};
use waypoint_types::{AutomationMode, ItemType, PerkType, SkillType, TaskId};

fn played_state(catalog: &Catalog) -> Gamestate {
    let mut state = Gamestate::new(catalog);
    state.current_zone = 1;
    state.highest_zone = 2;
    waypoint_core::zones::reset_tasks(&mut state, catalog);

    let first = state.task_index(TaskId(103)).unwrap();
    state.tasks[first].progress = 2.5;
    state.tasks[first].reps = 3;
    state.tasks[first].hasted = true;

    state.unlocked_tasks.insert(TaskId(7));
    state.perks.insert(PerkType::Reading);
    state.perks.insert(PerkType::DeepTrance);
    state.items.insert(ItemType::Coin, 12);
    state.items.insert(ItemType::Arrow, 0);
    state.automation_prios.insert(0, vec![TaskId(4), TaskId(0)]);
    state.automation_prios.insert(1, vec![TaskId(103)]);
    state.automation_mode = AutomationMode::Zone;
    state.queued_scrolls_of_haste = 2;

    let combat = state.skill_mut(SkillType::Combat).unwrap();
    combat.level = 14;
    combat.progress = 0.75;
    combat.speed_modifier = 1.5;
    state.skills_at_start_of_reset[SkillType::Combat.index()] = 9;

    state.energy.drain(37.25);
    state.energy_reset_count = 4;
    state.power = 5;
    state.has_unlocked_power = true;
    state.attunement = 11;
    state.pop_render_events();
    state
}

#[test]
fn loaded_state_equals_saved_state() {
    let catalog = Arc::new(Catalog::standard().unwrap());
    let store = MemoryStore::new();
    let original = played_state(&catalog);

    let gateway = SaveGateway::new(Arc::clone(&catalog), Box::new(store.clone()));
    let mut session = GameSession::new(Arc::clone(&catalog), original.clone(), Box::new(gateway));
    session.save();

    let reader = SaveGateway::new(Arc::clone(&catalog), Box::new(store));
    let loaded = reader.load().unwrap().unwrap();
    assert_eq!(loaded, original);
}

#[test]
fn restored_tasks_share_catalog_definitions() {
    let catalog = Arc::new(Catalog::standard().unwrap());
    let store = MemoryStore::new();
    let mut writer = SaveGateway::new(Arc::clone(&catalog), Box::new(store.clone()));
    writer.save(&played_state(&catalog)).unwrap();

    let loaded = writer.load().unwrap().unwrap();
    assert!(!loaded.tasks.is_empty());
    for task in &loaded.tasks {
        let indexed = catalog.task(task.id()).unwrap();
        assert!(Arc::ptr_eq(&task.definition, indexed));
    }
}

#[test]
fn maps_are_rebuilt_from_pairs() {
    let catalog = Arc::new(Catalog::standard().unwrap());
    let store = MemoryStore::new();
    let mut gateway = SaveGateway::new(Arc::clone(&catalog), Box::new(store.clone()));
    gateway.save(&played_state(&catalog)).unwrap();

    let json: serde_json::Value = serde_json::from_str(&store.document().unwrap()).unwrap();
    assert!(json["items"].is_array());
    assert!(json["perks"].is_array());
    assert!(json["automation_prios"].is_array());
    assert!(json.get("active_task").is_none());
    assert_eq!(json["automation_mode"], serde_json::json!("Zone"));

    let loaded = gateway.load().unwrap().unwrap();
    let expected_items = BTreeMap::from([(ItemType::Arrow, 0), (ItemType::Coin, 12)]);
    assert_eq!(loaded.items, expected_items);
    assert!(loaded.has_perk(PerkType::Reading));
    assert!(loaded.has_perk(PerkType::DeepTrance));
    assert_eq!(
        loaded.automation_prios.get(&0),
        Some(&vec![TaskId(4), TaskId(0)])
    );
}

#[test]
fn session_resumes_with_its_automation_mode() {
    let catalog = Arc::new(Catalog::standard().unwrap());
    let store = MemoryStore::new();
    let gateway = SaveGateway::new(Arc::clone(&catalog), Box::new(store.clone()));
    let mut session = GameSession::new(
        Arc::clone(&catalog),
        played_state(&catalog),
        Box::new(gateway),
    );
    session.set_automation_mode(AutomationMode::All).unwrap();
    session.click_task(TaskId(103)).unwrap();
    session.save();

    let reader = SaveGateway::new(Arc::clone(&catalog), Box::new(store));
    let resumed = reader.load_or_fresh(&RulesConfig::default());
    assert_eq!(resumed.automation_mode, AutomationMode::All);
    assert_eq!(resumed.active_task, None);
    assert_eq!(resumed.current_zone, 1);
}
