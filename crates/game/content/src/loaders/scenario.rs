//! Scenario loader.
//!
//! A scenario is a glyph map plus unit placement:
//!
//! ```ron
//! (
//!     name: "crossroads",
//!     map: [
//!         "..#..",
//!         ".M.A.",
//!         ".....",
//!     ],
//!     safe_zone: Some((top: 0, left: 0, bottom: 2, right: 4)),
//!     player: (position: (row: 2, col: 2), max_hp: 20, detection_range: 8),
//!     enemies: [
//!         (position: (row: 0, col: 0), max_hp: 15, detection_range: 6, ammo: 2),
//!     ],
//!     random_enemies: 2,
//! )
//! ```
//!
//! Optional fields take their value directly; wrapping it in `Some(..)` is
//! also accepted. Listed enemies receive ids `1..=n` in file order. `random_enemies` asks
//! the caller to spawn that many more with rolled stats.

use std::path::Path;

use arena_core::{GameState, Position, SafeZone, TileMap, Unit, UnitId};
use ron::extensions::Extensions;
use serde::Deserialize;

use crate::loaders::{LoadResult, read_file};

/// Placement and starting stats for one unit.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct UnitSpec {
    pub position: Position,
    pub max_hp: u32,
    /// Starting hp; `None` means full health.
    #[serde(default)]
    pub hp: Option<u32>,
    pub detection_range: u32,
    #[serde(default)]
    pub ammo: u32,
    #[serde(default)]
    pub medkits: u32,
}

impl UnitSpec {
    fn into_unit(self, id: UnitId) -> Unit {
        let unit = if id.is_player() {
            Unit::player(self.position, self.max_hp, self.detection_range)
        } else {
            Unit::enemy(id, self.position, self.max_hp, self.detection_range)
        };
        let hp = self.hp.unwrap_or(self.max_hp);
        unit.with_hp(hp).with_resources(self.ammo, self.medkits)
    }
}

#[derive(Debug, Deserialize)]
struct ScenarioRon {
    #[serde(default)]
    name: Option<String>,
    map: Vec<String>,
    #[serde(default)]
    safe_zone: Option<SafeZone>,
    player: UnitSpec,
    #[serde(default)]
    enemies: Vec<UnitSpec>,
    #[serde(default)]
    random_enemies: usize,
}

/// A validated starting state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Scenario {
    pub name: String,
    pub state: GameState,
    /// Additional enemies to spawn at random free cells.
    pub random_enemies: usize,
}

/// Loader for scenarios from RON files.
pub struct ScenarioLoader;

impl ScenarioLoader {
    /// Load a scenario from a RON file. The file stem names unnamed scenarios.
    pub fn load(path: &Path) -> LoadResult<Scenario> {
        let content = read_file(path)?;
        let mut scenario = Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Invalid scenario {}: {}", path.display(), e))?;
        if scenario.name.is_empty()
            && let Some(stem) = path.file_stem()
        {
            scenario.name = stem.to_string_lossy().into_owned();
        }
        Ok(scenario)
    }

    /// Parse a scenario from RON text and build its [`GameState`].
    pub fn parse(content: &str) -> LoadResult<Scenario> {
        let raw: ScenarioRon = ron::Options::default()
            .with_default_extension(Extensions::IMPLICIT_SOME)
            .from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse scenario RON: {}", e))?;

        let map = TileMap::from_rows(raw.map.as_slice())
            .map_err(|e| anyhow::anyhow!("Invalid scenario map: {}", e))?;
        let safe_zone = raw.safe_zone.unwrap_or_else(|| SafeZone::covering(&map));

        let player = raw.player.into_unit(UnitId::PLAYER);
        let enemies = raw
            .enemies
            .into_iter()
            .enumerate()
            .map(|(index, spec)| spec.into_unit(UnitId(index as u32 + 1)))
            .collect();

        let state = GameState::new(map, safe_zone, player, enemies)
            .map_err(|e| anyhow::anyhow!("Invalid scenario state: {}", e))?;

        let name = raw.name.unwrap_or_default();
        tracing::debug!(
            name = %name,
            enemies = state.enemies.len(),
            random_enemies = raw.random_enemies,
            "loaded scenario"
        );
        Ok(Scenario {
            name,
            state,
            random_enemies: raw.random_enemies,
        })
    }
}
