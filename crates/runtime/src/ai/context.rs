//! Per-turn blackboard shared by the state handlers.
//!
//! An [`AiContext`] bundles the mutable game state with the injected
//! configuration and random source, and collects the [`ActionOutcome`]s the
//! handlers produce while a unit takes its turn.

use arena_core::{
    ActionOutcome, GameConfig, GameState, MoveRecord, Position, RandomSource, Unit, UnitId,
    WaitReason, move_randomly, move_towards, movement,
};

pub struct AiContext<'a> {
    pub state: &'a mut GameState,
    pub config: &'a GameConfig,
    pub rng: &'a mut dyn RandomSource,

    /// Outcomes recorded so far, in the order they happened.
    outcomes: Vec<ActionOutcome>,
}

impl<'a> AiContext<'a> {
    pub fn new(
        state: &'a mut GameState,
        config: &'a GameConfig,
        rng: &'a mut dyn RandomSource,
    ) -> Self {
        Self {
            state,
            config,
            rng,
            outcomes: Vec::new(),
        }
    }

    /// Returns a unit only if it exists and is alive.
    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.state.living_unit(id)
    }

    pub fn unit_mut(&mut self, id: UnitId) -> Option<&mut Unit> {
        self.state.unit_mut(id).filter(|unit| unit.is_alive())
    }

    pub fn record(&mut self, outcome: ActionOutcome) {
        tracing::trace!(?outcome, "recorded outcome");
        self.outcomes.push(outcome);
    }

    /// Records an explicit wait. Always consumes the turn.
    pub fn wait(&mut self, unit: UnitId, reason: WaitReason) -> bool {
        tracing::debug!(%unit, %reason, "waiting");
        self.record(ActionOutcome::wait(unit, reason));
        true
    }

    /// Steps `unit` towards `target`, recording the move on success.
    pub fn step_towards(&mut self, unit: UnitId, target: Position) -> Option<MoveRecord> {
        let record = move_towards(self.state, self.config, &mut *self.rng, unit, target)?;
        self.record_move(record);
        Some(record)
    }

    /// Steps `unit` onto a random valid neighbour, recording the move on success.
    pub fn step_randomly(&mut self, unit: UnitId) -> Option<MoveRecord> {
        let record = move_randomly(self.state, self.config, &mut *self.rng, unit)?;
        self.record_move(record);
        Some(record)
    }

    /// Commits a move the caller already selected from the valid set.
    pub fn step_to(&mut self, unit: UnitId, destination: Position) -> Option<MoveRecord> {
        let record = movement::move_to(self.state, self.config, unit, destination)?;
        self.record_move(record);
        Some(record)
    }

    fn record_move(&mut self, record: MoveRecord) {
        self.record(ActionOutcome::Move(record));
        if let Some(pickup) = record.pickup {
            self.record(ActionOutcome::Pickup(pickup));
        }
    }

    pub fn outcomes(&self) -> &[ActionOutcome] {
        &self.outcomes
    }

    pub fn into_outcomes(self) -> Vec<ActionOutcome> {
        self.outcomes
    }
}
