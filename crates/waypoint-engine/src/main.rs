//! Headless tick driver for the Waypoint simulation.
//!
//! Runs the simulation in real time without a renderer. Render events are
//! written to the log instead of being drawn, and the autopilot picks tasks
//! when the player would.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `waypoint-config.yaml` (or `WAYPOINT_CONFIG`)
//! 2. Initialize structured logging (tracing)
//! 3. Build and validate the content catalog (built-in or YAML)
//! 4. Load the save, or start a fresh game
//! 5. Run the tick loop until a stop condition or Ctrl-C
//! 6. Save and log the result

mod autopilot;
mod error;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context as _;
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use waypoint_catalog::Catalog;
use waypoint_core::config::{CONFIG_PATH_ENV, CatalogConfig, DEFAULT_CONFIG_PATH, SessionConfig};
use waypoint_core::{EngineConfig, GameSession, Gamestate, NullSink, ResetReport};
use waypoint_save::{FileStore, SaveGateway};
use waypoint_types::RenderEvent;

use crate::error::EngineError;

/// Why the tick loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EndReason {
    /// The configured tick limit was reached.
    MaxTicks,
    /// Energy ran out and automatic resets are disabled.
    GameOver,
    /// No further content is reachable.
    EndOfContent,
    /// The process received Ctrl-C.
    Interrupted,
}

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration or the catalog cannot be loaded.
#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // 1. Configuration comes first so it can set the log level.
    let config_path = config_path();
    let (config, config_found) = load_config(&config_path)?;

    // 2. Logging. RUST_LOG wins over the configured level.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_target(true)
        .init();

    info!("waypoint-engine starting");
    if !config_found {
        warn!(path = %config_path.display(), "Config file not found, using defaults");
    }
    info!(
        tick_interval_ms = config.session.tick_interval_ms,
        max_ticks = config.session.max_ticks,
        auto_reset = config.session.auto_reset,
        autopilot = config.session.autopilot,
        persistence = config.persistence.enabled,
        "Configuration loaded"
    );

    // 3. Catalog.
    let catalog = Arc::new(load_catalog(&config.catalog)?);
    info!(
        zones = catalog.zone_count(),
        tasks = catalog.tasks().count(),
        "Catalog validated"
    );

    // 4. Saved or fresh game.
    let mut session = if config.persistence.enabled {
        let store = FileStore::new(&config.persistence.save_path);
        info!(path = %store.path().display(), "Using save file");
        let gateway = SaveGateway::new(Arc::clone(&catalog), Box::new(store));
        let state = gateway.load_or_fresh(&config.rules);
        GameSession::new(catalog, state, Box::new(gateway))
    } else {
        info!("Persistence disabled, starting a new game");
        let state = Gamestate::with_rules(&catalog, &config.rules);
        GameSession::new(catalog, state, Box::new(NullSink))
    };

    // 5. Tick loop.
    let (end_reason, ticks) = run(&mut session, &config.session)
        .await
        .context("tick loop failed")?;

    // 6. Final save and summary.
    session.save();
    let state = session.state();
    info!(
        ?end_reason,
        ticks,
        zone = state.current_zone,
        highest_zone = state.highest_zone,
        resets = state.energy_reset_count,
        power = state.power,
        attunement = state.attunement,
        perks = state.perks.len(),
        "waypoint-engine shutdown complete"
    );
    Ok(())
}

/// Resolve the configuration path from the environment.
fn config_path() -> PathBuf {
    std::env::var_os(CONFIG_PATH_ENV)
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from)
}

/// Load configuration, falling back to defaults when the file is missing.
///
/// Returns the configuration and whether the file existed.
fn load_config(path: &Path) -> Result<(EngineConfig, bool), EngineError> {
    if path.exists() {
        Ok((EngineConfig::from_file(path)?, true))
    } else {
        Ok((EngineConfig::default(), false))
    }
}

/// Load the configured catalog file, or the built-in content.
fn load_catalog(settings: &CatalogConfig) -> Result<Catalog, EngineError> {
    match &settings.path {
        Some(path) => {
            info!(path = %path, "Loading catalog file");
            Ok(Catalog::from_file(Path::new(path))?)
        }
        None => Ok(Catalog::standard()?),
    }
}

/// Drive the session in real time until a stop condition.
async fn run(
    session: &mut GameSession,
    settings: &SessionConfig,
) -> std::io::Result<(EndReason, u64)> {
    let mut interval = tokio::time::interval(Duration::from_millis(settings.tick_interval_ms));
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    let mut ticks: u64 = 0;
    let reason = loop {
        tokio::select! {
            result = &mut shutdown => {
                result?;
                break EndReason::Interrupted;
            }
            _ = interval.tick() => {}
        }

        if settings.autopilot {
            autopilot::step(session);
        }
        let summary = session.tick();
        ticks = ticks.saturating_add(1);
        log_render_events(&session.pop_render_events());

        if summary.game_over {
            log_reset_report(&session.reset_report());
            if !settings.auto_reset {
                break EndReason::GameOver;
            }
            session.do_energy_reset();
        }
        if session.state().is_at_end_of_content {
            break EndReason::EndOfContent;
        }
        if settings.max_ticks > 0 && ticks >= settings.max_ticks {
            break EndReason::MaxTicks;
        }
    };
    Ok((reason, ticks))
}

/// Write render events to the log in place of a renderer.
fn log_render_events(events: &[RenderEvent]) {
    for event in events {
        match event {
            RenderEvent::SkillUp {
                skill,
                levels_gained,
                new_level,
            } => info!(?skill, levels_gained, new_level, "Skill up"),
            RenderEvent::GainedPerk { perk } => info!(?perk, "Perk gained"),
            RenderEvent::UsedItem { item, count } => info!(?item, count, "Item used"),
            RenderEvent::UnlockedTask { task_id, name } => {
                info!(task = %task_id, name = %name, "Task unlocked");
            }
            RenderEvent::UnlockedSkill { skill } => info!(?skill, "Skill unlocked"),
            RenderEvent::UnlockedPower => info!("Power unlocked"),
            RenderEvent::TaskCompleted {
                task_id,
                reps,
                fully_finished,
            } => info!(task = %task_id, reps, fully_finished, "Task completed"),
            RenderEvent::ZoneEntered { zone } => info!(zone, "Zone entered"),
            RenderEvent::EndOfContent => info!("End of content reached"),
            RenderEvent::EnergyDepleted => info!("Energy depleted"),
        }
    }
}

/// Summarize the finished epoch.
fn log_reset_report(report: &ResetReport) {
    for gain in &report.skill_gains {
        info!(skill = ?gain.skill, from = gain.from, to = gain.to, "Epoch skill gain");
    }
    info!(
        power_gained = report.power_gained,
        attunement_gained = report.attunement_gained,
        resets = report.energy_reset_count,
        "Epoch complete"
    );
}
