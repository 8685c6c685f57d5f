//! Plain-text rendering of events and boards.
use arena_core::{ActionOutcome, AttackStyle, GameState, ShotOutcome};
use arena_runtime::ActionEvent;

/// One line per event, e.g. `[t3 #2] moves (4, 5) -> (4, 6)`.
pub fn format_event(event: &ActionEvent) -> String {
    format!(
        "[t{} {}] {}",
        event.turn,
        event.outcome.actor(),
        describe(&event.outcome)
    )
}

pub fn describe(outcome: &ActionOutcome) -> String {
    match outcome {
        ActionOutcome::Move(record) => format!("moves {} -> {}", record.from, record.to),
        ActionOutcome::Pickup(pickup) => {
            format!("picks up {} x{}", pickup.resource, pickup.amount)
        }
        ActionOutcome::Attack(report) => {
            let verb = match (report.style, report.shot) {
                (AttackStyle::Melee, _) => "strikes".to_owned(),
                (AttackStyle::Ranged, Some(ShotOutcome::Blocked { at })) => {
                    return format!("shoots into cover at {at}");
                }
                (AttackStyle::Ranged, Some(ShotOutcome::Missed) | None) => {
                    return "shoots and misses".to_owned();
                }
                (AttackStyle::Ranged, Some(ShotOutcome::Hit { .. })) => "shoots".to_owned(),
            };
            let Some(target) = report.target else {
                return verb;
            };
            let mut line = format!(
                "{verb} {target} for {} ({} hp left)",
                report.damage, report.remaining_hp
            );
            if report.defeated {
                line.push_str(", defeating it");
            } else if let Some(knockback) = report.knockback {
                match (knockback.destination, knockback.reason) {
                    (Some(to), _) if knockback.success => {
                        line.push_str(&format!(", knocked back to {to}"));
                    }
                    (_, Some(reason)) => line.push_str(&format!(", knockback failed: {reason}")),
                    _ => {}
                }
            }
            line
        }
        ActionOutcome::Heal { amount, hp, .. } => format!("heals {amount} (now {hp} hp)"),
        ActionOutcome::Wait { reason, .. } => format!("waits ({reason})"),
    }
}

/// Map glyphs with units drawn on top: `P` for the player, the last digit of
/// the id for living enemies.
pub fn draw_board(state: &GameState) -> Vec<String> {
    let mut grid: Vec<Vec<char>> = state
        .map
        .to_rows()
        .into_iter()
        .map(|row| row.chars().collect())
        .collect();

    for unit in state.living_units() {
        let glyph = if unit.is_player() {
            'P'
        } else {
            char::from_digit(unit.id.0 % 10, 10).unwrap_or('E')
        };
        let cell = usize::try_from(unit.position.row)
            .ok()
            .zip(usize::try_from(unit.position.col).ok())
            .and_then(|(row, col)| grid.get_mut(row)?.get_mut(col));
        if let Some(cell) = cell {
            *cell = glyph;
        }
    }

    grid.into_iter().map(String::from_iter).collect()
}

#[cfg(test)]
mod tests {
    use arena_core::{MoveRecord, Position, SafeZone, TileMap, Unit, UnitId, WaitReason};

    use super::*;

    #[test]
    fn formats_moves_and_waits() {
        let event = ActionEvent {
            turn: 3,
            sequence: 0,
            outcome: ActionOutcome::Move(MoveRecord {
                unit: UnitId(2),
                from: Position::new(4, 5),
                to: Position::new(4, 6),
                pickup: None,
            }),
        };
        assert_eq!(format_event(&event), "[t3 #2] moves (4, 5) -> (4, 6)");
        assert_eq!(
            describe(&ActionOutcome::wait(UnitId(1), WaitReason::NoSafeMove)),
            "waits (no_safe_move)"
        );
    }

    #[test]
    fn draws_units_over_terrain() {
        let map = TileMap::from_rows(&["..#", "..."]).unwrap();
        let zone = SafeZone::covering(&map);
        let player = Unit::player(Position::new(1, 0), 10, 3);
        let enemies = vec![
            Unit::enemy(UnitId(12), Position::new(0, 1), 10, 3),
            Unit::enemy(UnitId(3), Position::new(1, 2), 10, 3).with_hp(0),
        ];
        let state = GameState::new(map, zone, player, enemies).unwrap();
        assert_eq!(draw_board(&state), vec![".2#".to_string(), "P..".to_string()]);
    }
}
