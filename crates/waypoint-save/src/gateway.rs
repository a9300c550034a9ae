//! The persistence gateway.
//!
//! [`SaveGateway`] ties the codec to a store and to the catalog that saves
//! are resolved against. It is the session's [`SaveSink`], and it is the
//! only place that decides what happens when a save cannot be used: load
//! failures are logged and the player starts a fresh game.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};
use waypoint_catalog::Catalog;
use waypoint_core::config::RulesConfig;
use waypoint_core::{Gamestate, SaveSink, SinkError};

use crate::codec::SaveData;
use crate::error::SaveError;
use crate::store::SaveStore;

/// Reads and writes whole-game saves.
pub struct SaveGateway {
    catalog: Arc<Catalog>,
    store: Box<dyn SaveStore>,
}

impl std::fmt::Debug for SaveGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SaveGateway").finish_non_exhaustive()
    }
}

impl SaveGateway {
    /// Create a gateway over a store.
    pub const fn new(catalog: Arc<Catalog>, store: Box<dyn SaveStore>) -> Self {
        Self { catalog, store }
    }

    /// Serialize and store the state.
    ///
    /// # Errors
    ///
    /// Returns [`SaveError::Json`] or [`SaveError::Io`] if encoding or the
    /// store write fails.
    pub fn save(&mut self, state: &Gamestate) -> Result<(), SaveError> {
        let document = serde_json::to_string(&SaveData::from_state(state, Utc::now()))?;
        self.store.write(&document)?;
        info!(
            zone = state.current_zone,
            resets = state.energy_reset_count,
            "Game saved"
        );
        Ok(())
    }

    /// Load the stored game, if there is one.
    ///
    /// # Errors
    ///
    /// Returns any [`SaveError`] raised while reading or decoding.
    pub fn load(&self) -> Result<Option<Gamestate>, SaveError> {
        let Some(document) = self.store.read()? else {
            return Ok(None);
        };
        let state = self.import_json(&document)?;
        info!(
            zone = state.current_zone,
            highest_zone = state.highest_zone,
            resets = state.energy_reset_count,
            "Game loaded"
        );
        Ok(Some(state))
    }

    /// Load the stored game, or start fresh if there is none or it is
    /// unusable.
    ///
    /// The debug throughput multiplier always comes from `rules`.
    pub fn load_or_fresh(&self, rules: &RulesConfig) -> Gamestate {
        match self.load() {
            Ok(Some(mut state)) => {
                state.progress_multiplier = rules.progress_multiplier;
                state
            }
            Ok(None) => {
                info!("No save found, starting a new game");
                Gamestate::with_rules(&self.catalog, rules)
            }
            Err(error) => {
                warn!(%error, "Save could not be loaded, starting a new game");
                Gamestate::with_rules(&self.catalog, rules)
            }
        }
    }

    /// Encode a state as pretty-printed JSON for export.
    ///
    /// # Errors
    ///
    /// Returns [`SaveError::Json`] if encoding fails.
    pub fn export_json(&self, state: &Gamestate) -> Result<String, SaveError> {
        Ok(serde_json::to_string_pretty(&SaveData::from_state(
            state,
            Utc::now(),
        ))?)
    }

    /// Decode an exported document against this gateway's catalog.
    ///
    /// # Errors
    ///
    /// Returns [`SaveError::Json`] for malformed documents, or any
    /// validation error from [`SaveData::rehydrate`].
    pub fn import_json(&self, document: &str) -> Result<Gamestate, SaveError> {
        let data: SaveData = serde_json::from_str(document)?;
        data.rehydrate(&self.catalog)
    }
}

impl SaveSink for SaveGateway {
    fn persist(&mut self, state: &Gamestate) -> Result<(), SinkError> {
        self.save(state).map_err(Into::into)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use waypoint_types::TaskId;

    use super::*;
    use crate::store::MemoryStore;

    fn gateway(store: &MemoryStore) -> SaveGateway {
        let catalog = Arc::new(Catalog::standard().unwrap());
        SaveGateway::new(catalog, Box::new(store.clone()))
    }

    #[test]
    fn empty_store_loads_nothing() {
        let store = MemoryStore::new();
        assert!(gateway(&store).load().unwrap().is_none());
    }

    #[test]
    fn corrupt_save_falls_back_to_fresh() {
        let store = MemoryStore::with_document("{not json");
        let gateway = gateway(&store);
        assert!(matches!(gateway.load(), Err(SaveError::Json(_))));

        let rules = RulesConfig {
            starting_energy: 42.0,
            ..RulesConfig::default()
        };
        let state = gateway.load_or_fresh(&rules);
        assert_eq!(state.current_zone, 0);
        assert!((state.energy.max - 42.0).abs() < f64::EPSILON);
    }

    #[test]
    fn persisted_state_loads_back() {
        let store = MemoryStore::new();
        let mut gateway = gateway(&store);
        let mut state = Gamestate::new(&Catalog::standard().unwrap());
        state.energy_reset_count = 3;
        state.unlocked_tasks.insert(TaskId(7));

        gateway.persist(&state).unwrap();
        assert!(store.document().is_some());

        let rules = RulesConfig {
            progress_multiplier: 4.0,
            ..RulesConfig::default()
        };
        let loaded = gateway.load_or_fresh(&rules);
        assert_eq!(loaded.energy_reset_count, 3);
        assert!(loaded.unlocked_tasks.contains(&TaskId(7)));
        assert!((loaded.progress_multiplier - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn export_is_importable() {
        let store = MemoryStore::new();
        let gateway = gateway(&store);
        let mut state = Gamestate::new(&Catalog::standard().unwrap());
        state.power = 15;

        let exported = gateway.export_json(&state).unwrap();
        assert!(exported.contains("\"power\": 15"));
        let imported = gateway.import_json(&exported).unwrap();
        assert_eq!(imported.power, 15);
        assert!(gateway.import_json("[]").is_err());
    }
}
