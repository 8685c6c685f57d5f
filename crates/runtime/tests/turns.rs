//! Turn-level behaviour: ordering, sweeping and published events.

use arena_core::{
    ActionOutcome, AiState, GameConfig, GameState, Position, SafeZone, ScriptedRandom, TileMap,
    Unit, UnitId, WaitReason,
};
use arena_runtime::{ActionEvent, Event, EventBus, Topic, TurnEvent, TurnOrchestrator};

fn hidden_player_arena(enemies: Vec<Unit>) -> GameState {
    let map = TileMap::from_rows(&["......", "######", "......"]).unwrap();
    let zone = SafeZone::covering(&map);
    let player = Unit::player(Position::new(2, 0), 10, 6);
    GameState::new(map, zone, player, enemies).unwrap()
}

fn idle_rolls(count: usize) -> ScriptedRandom {
    ScriptedRandom::new().with_floats(std::iter::repeat_n(0.99, count))
}

#[test]
fn publishes_turn_boundaries_and_every_outcome() {
    let a = Unit::enemy(UnitId(1), Position::new(0, 0), 10, 2).with_resources(5, 0);
    let b = Unit::enemy(UnitId(2), Position::new(0, 5), 10, 2).with_resources(5, 0);
    let mut state = hidden_player_arena(vec![a, b]);

    let bus = EventBus::new();
    let mut actions = bus.subscribe(Topic::Action);
    let mut turns = bus.subscribe(Topic::Turn);
    let mut orchestrator =
        TurnOrchestrator::new(GameConfig::default(), idle_rolls(2)).with_event_bus(bus);

    let summary = orchestrator.run_ai_turn(&mut state).unwrap();

    assert_eq!(
        turns.try_recv().unwrap(),
        Event::Turn(TurnEvent::Started {
            turn: 1,
            living_enemies: 2,
        })
    );
    assert_eq!(
        turns.try_recv().unwrap(),
        Event::Turn(TurnEvent::Completed {
            turn: 1,
            defeated: vec![],
            player_alive: true,
        })
    );

    for (sequence, unit) in [(0, UnitId(1)), (1, UnitId(2))] {
        assert_eq!(
            actions.try_recv().unwrap(),
            Event::Action(ActionEvent {
                turn: 1,
                sequence,
                outcome: ActionOutcome::wait(unit, WaitReason::Idle),
            })
        );
    }
    assert!(actions.try_recv().is_err());
    assert_eq!(summary.outcomes.len(), 2);
}

#[test]
fn units_killed_earlier_in_the_turn_do_not_act() {
    // Unit 1 finishes off unit 2 before unit 2's turn comes up.
    let killer = Unit::enemy(UnitId(1), Position::new(0, 0), 15, 6)
        .with_state(AiState::EngagingEnemy)
        .with_target_enemy(UnitId(2));
    let victim = Unit::enemy(UnitId(2), Position::new(0, 1), 10, 6).with_hp(1);
    let mut state = hidden_player_arena(vec![killer, victim]);
    let mut orchestrator = TurnOrchestrator::new(GameConfig::default(), idle_rolls(4));

    let summary = orchestrator.run_ai_turn(&mut state).unwrap();

    assert_eq!(summary.defeated, vec![UnitId(2)]);
    assert!(summary.outcomes.iter().all(|o| o.actor() == UnitId(1)));
    assert!(state.unit(UnitId(2)).is_none());
    assert!(!summary.player_defeated);
}

#[test]
fn outcomes_serialize_with_a_kind_tag() {
    let wait = ActionOutcome::wait(UnitId(3), WaitReason::RiskAverse);
    let json = serde_json::to_value(wait).unwrap();
    assert_eq!(json["kind"], "wait");
    assert_eq!(json["reason"], "risk_averse");

    let event = ActionEvent {
        turn: 7,
        sequence: 0,
        outcome: wait,
    };
    let text = serde_json::to_string(&event).unwrap();
    let back: ActionEvent = serde_json::from_str(&text).unwrap();
    assert_eq!(back, event);
}
