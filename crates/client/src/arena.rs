//! Built-in arena used when no scenario file is configured.
use anyhow::{Context, Result};
use arena_core::{GameState, Position, SafeZone, TileMap, Unit};

const ROWS: [&str; 16] = [
    "~~~~~~~~~~~~~~~~",
    "~..............~",
    "~..T....A...T..~",
    "~......##......~",
    "~.M....#.....A.~",
    "~...T.....T....~",
    "~..##.........#~",
    "~.......M.....#~",
    "~..A..........#~",
    "~....T...##....~",
    "~.........#..M.~",
    "~..#...A.......~",
    "~..#.....T..T..~",
    "~.M............~",
    "~......A.......~",
    "~~~~~~~~~~~~~~~~",
];

const PLAYER_START: Position = Position::new(7, 7);
const PLAYER_MAX_HP: u32 = 20;
const PLAYER_DETECTION_RANGE: u32 = 8;

/// A walled-in field with scattered cover and pickups. The player stands in
/// the middle; enemies are spawned by the caller.
pub fn builtin() -> Result<GameState> {
    let map = TileMap::from_rows(&ROWS).context("Built-in arena map is malformed")?;
    let zone = SafeZone::new(1, 1, map.rows() as i32 - 2, map.cols() as i32 - 2);
    let player = Unit::player(PLAYER_START, PLAYER_MAX_HP, PLAYER_DETECTION_RANGE);
    GameState::new(map, zone, player, Vec::new()).context("Built-in arena state is invalid")
}
