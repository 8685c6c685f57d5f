//! Simulation settings read from the process environment.
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Settings for one headless simulation run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimConfig {
    pub seed: u64,
    /// Enemies spawned at random on top of any the scenario places.
    pub enemies: usize,
    pub max_turns: u64,
    pub config_path: Option<PathBuf>,
    /// Scenario file path, or a name resolved under `data_dir/scenarios`.
    pub scenario: Option<String>,
    pub data_dir: PathBuf,
    pub present_delay: Duration,
    pub log_file: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            enemies: 6,
            max_turns: 200,
            config_path: None,
            scenario: None,
            data_dir: PathBuf::from("data"),
            present_delay: Duration::ZERO,
            log_file: false,
        }
    }
}

impl SimConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `ARENA_SEED` - Random seed (default: current unix time)
    /// - `ARENA_ENEMIES` - Randomly spawned enemies (default: 6)
    /// - `ARENA_MAX_TURNS` - Turn limit (default: 200)
    /// - `ARENA_CONFIG` - AI tuning TOML (default: `data/config.toml` if present)
    /// - `ARENA_SCENARIO` - Scenario RON path or name (default: built-in arena)
    /// - `ARENA_DATA_DIR` - Content directory (default: `data`)
    /// - `ARENA_PRESENT_DELAY_MS` - Pause between presented events (default: 0)
    /// - `ARENA_LOG_FILE` - Also log to a file in the cache directory
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).map(|value| value.trim().to_owned());

        let mut config = Self {
            seed: parsed(read("ARENA_SEED")).unwrap_or_else(clock_seed),
            ..Self::default()
        };

        if let Some(enemies) = parsed(read("ARENA_ENEMIES")) {
            config.enemies = enemies;
        }
        if let Some(turns) = parsed::<u64>(read("ARENA_MAX_TURNS")) {
            config.max_turns = turns.max(1);
        }
        config.config_path = read("ARENA_CONFIG")
            .filter(|path| !path.is_empty())
            .map(PathBuf::from);
        config.scenario = read("ARENA_SCENARIO").filter(|name| !name.is_empty());
        if let Some(dir) = read("ARENA_DATA_DIR").filter(|dir| !dir.is_empty()) {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(ms) = parsed(read("ARENA_PRESENT_DELAY_MS")) {
            config.present_delay = Duration::from_millis(ms);
        }

        // Accept a bare variable as "true".
        config.log_file = match read("ARENA_LOG_FILE") {
            Some(value) => value.is_empty() || value.parse().unwrap_or(false),
            None => false,
        };

        config
    }
}

fn parsed<T: FromStr>(value: Option<String>) -> Option<T> {
    value?.parse().ok()
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or_default()
}
