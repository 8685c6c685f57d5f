//! Headless arena simulation.
//!
//! Loads AI tuning and a scenario, spawns enemies, then drives AI turns until
//! the player falls, no enemy remains, or the turn limit is reached. Every
//! decision is published to the event bus and printed by an async presenter.
//!
//! ```bash
//! ARENA_SEED=7 ARENA_ENEMIES=4 cargo run -p arena-sim
//! ARENA_SCENARIO=crossroads ARENA_PRESENT_DELAY_MS=150 cargo run -p arena-sim
//! ```
mod arena;
mod config;
mod logging;
mod render;

use std::path::Path;

use anyhow::{Context, Result};
use arena_content::{ConfigLoader, ContentFactory, ScenarioLoader};
use arena_core::{GameConfig, GameState, SeededRandom, spawn_enemies};
use arena_runtime::{EventBus, Presenter, TurnOrchestrator};

use crate::config::SimConfig;

/// Deep enough that a paced presenter rarely lags behind a fast simulation.
const EVENT_CAPACITY: usize = 4096;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let settings = SimConfig::from_env();
    let _guard = logging::setup_logging(settings.seed, settings.log_file)?;
    tracing::info!(seed = settings.seed, "Starting arena simulation");

    let factory = ContentFactory::new(&settings.data_dir);
    let config = load_config(&settings, &factory)?;
    let (name, mut state, extra_enemies) = load_scenario(&settings, &factory)?;

    let mut rng = SeededRandom::new(settings.seed);
    let spawned = spawn_enemies(&mut state, &config, &mut rng, settings.enemies + extra_enemies)
        .context("Failed to spawn enemies")?;
    tracing::info!(
        scenario = %name,
        spawned = spawned.len(),
        enemies = state.enemies.len(),
        "Arena ready"
    );
    print_board(&state);

    let bus = EventBus::with_capacity(EVENT_CAPACITY);
    let presenter = Presenter::new(&bus).with_delay(settings.present_delay);
    let presenting =
        tokio::spawn(presenter.run(|event| println!("{}", render::format_event(event))));

    let mut orchestrator = TurnOrchestrator::new(config, rng).with_event_bus(bus);
    for _ in 0..settings.max_turns {
        let summary = orchestrator.run_ai_turn(&mut state)?;
        for unit in &summary.defeated {
            tracing::info!(turn = summary.turn, %unit, "Enemy eliminated");
        }
        if summary.player_defeated {
            tracing::info!(turn = summary.turn, "Player defeated");
            break;
        }
        if state.living_enemy_ids().is_empty() {
            tracing::info!(turn = summary.turn, "Player is the last one standing");
            break;
        }
        tokio::task::yield_now().await;
    }

    let turns = orchestrator.turn();
    drop(orchestrator);
    let shown = presenting.await.context("Presenter task failed")?;

    print_board(&state);
    tracing::info!(
        turns,
        events = shown,
        player_hp = state.player.hp,
        enemies_left = state.living_enemy_ids().len(),
        "Simulation finished"
    );
    Ok(())
}

fn load_config(settings: &SimConfig, factory: &ContentFactory) -> Result<GameConfig> {
    if let Some(path) = &settings.config_path {
        tracing::info!("Loading AI tuning from {}", path.display());
        return ConfigLoader::load(path);
    }
    if factory.config_path().is_file() {
        tracing::info!("Loading AI tuning from {}", factory.config_path().display());
        return factory.load_config();
    }
    tracing::debug!("Using default AI tuning");
    Ok(GameConfig::default())
}

/// Returns the scenario name, its state and how many extra enemies it asks for.
fn load_scenario(
    settings: &SimConfig,
    factory: &ContentFactory,
) -> Result<(String, GameState, usize)> {
    let Some(scenario) = settings.scenario.as_deref() else {
        return Ok(("builtin".to_owned(), arena::builtin()?, 0));
    };

    let path = Path::new(scenario);
    let loaded = if path.extension().is_some_and(|ext| ext == "ron") {
        ScenarioLoader::load(path)?
    } else {
        factory.load_scenario(scenario)?
    };
    Ok((loaded.name, loaded.state, loaded.random_enemies))
}

fn print_board(state: &GameState) {
    for row in render::draw_board(state) {
        println!("{row}");
    }
    println!();
}
