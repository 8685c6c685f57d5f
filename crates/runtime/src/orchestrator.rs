//! Turn orchestration for the enemy AI.
//!
//! The orchestrator owns the injected configuration and random source. Each
//! AI turn walks a snapshot of the living enemies in order, gives every unit
//! exactly one decision, and publishes what happened to the event bus.

use arena_core::{ActionOutcome, GameConfig, GameState, RandomSource, UnitId, WaitReason};

use crate::ai::{AiContext, handle_state, reevaluate};
use crate::error::{Result, RuntimeError};
use crate::events::{ActionEvent, Event, EventBus, TurnEvent};

/// Everything that happened during one AI turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnSummary {
    pub turn: u64,
    pub outcomes: Vec<ActionOutcome>,
    /// Enemies removed from the state after being defeated this turn.
    pub defeated: Vec<UnitId>,
    pub player_defeated: bool,
}

pub struct TurnOrchestrator<R> {
    config: GameConfig,
    rng: R,
    bus: Option<EventBus>,
    reevaluation_budget: u32,
    turn: u64,
}

impl<R: RandomSource> TurnOrchestrator<R> {
    /// How many times a unit may be re-evaluated before it simply waits.
    pub const DEFAULT_REEVALUATION_BUDGET: u32 = 4;

    pub fn new(config: GameConfig, rng: R) -> Self {
        Self {
            config,
            rng,
            bus: None,
            reevaluation_budget: Self::DEFAULT_REEVALUATION_BUDGET,
            turn: 0,
        }
    }

    pub fn with_event_bus(mut self, bus: EventBus) -> Self {
        self.bus = Some(bus);
        self
    }

    pub fn with_reevaluation_budget(mut self, budget: u32) -> Self {
        self.reevaluation_budget = budget;
        self
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Number of AI turns started so far.
    pub fn turn(&self) -> u64 {
        self.turn
    }

    /// Runs one decision for `unit`.
    ///
    /// Handlers that report a changed situation trigger a re-evaluation and
    /// run again, until one consumes the turn or the budget is spent.
    pub fn take_unit_turn(
        &mut self,
        state: &mut GameState,
        unit: UnitId,
    ) -> Result<Vec<ActionOutcome>> {
        let me = state.unit(unit).ok_or(RuntimeError::UnknownUnit(unit))?;
        if me.is_player() {
            return Err(RuntimeError::NotAiControlled(unit));
        }
        if !me.is_alive() {
            return Err(RuntimeError::UnitDefeated(unit));
        }

        let budget = self.reevaluation_budget;
        let mut ctx = AiContext::new(state, &self.config, &mut self.rng);
        let mut reevaluations = 0;
        while !handle_state(&mut ctx, unit) {
            if reevaluations >= budget {
                tracing::warn!(%unit, budget, "re-evaluation budget exhausted");
                ctx.wait(unit, WaitReason::Exhausted);
                break;
            }
            reevaluations += 1;
            if reevaluate(ctx.state, ctx.config, unit).is_none() {
                break;
            }
        }
        Ok(ctx.into_outcomes())
    }

    /// Gives every living enemy one decision, in order.
    ///
    /// Units killed earlier in the turn are skipped. Dead enemies are swept
    /// after each unit acts, and the turn ends early once the player falls.
    pub fn run_ai_turn(&mut self, state: &mut GameState) -> Result<TurnSummary> {
        if !state.player.is_alive() {
            return Err(RuntimeError::PlayerDefeated);
        }

        self.turn += 1;
        let turn = self.turn;
        let _span = tracing::info_span!("ai_turn", turn).entered();

        let order = state.living_enemy_ids();
        self.publish(TurnEvent::Started {
            turn,
            living_enemies: order.len(),
        });

        let mut outcomes = Vec::new();
        let mut defeated = Vec::new();
        for unit in order {
            if state.living_unit(unit).is_none() {
                tracing::debug!(%unit, "skipping unit defeated earlier this turn");
                continue;
            }

            let taken = self.take_unit_turn(state, unit)?;
            for outcome in &taken {
                let sequence = u32::try_from(outcomes.len()).unwrap_or(u32::MAX);
                self.publish(ActionEvent {
                    turn,
                    sequence,
                    outcome: *outcome,
                });
                outcomes.push(*outcome);
            }

            let swept = state.remove_dead_enemies();
            if !swept.is_empty() {
                tracing::info!(?swept, "enemies defeated");
                defeated.extend(swept);
            }
            if !state.player.is_alive() {
                tracing::info!(%unit, "player defeated");
                break;
            }
        }

        let player_alive = state.player.is_alive();
        self.publish(TurnEvent::Completed {
            turn,
            defeated: defeated.clone(),
            player_alive,
        });
        tracing::debug!(outcomes = outcomes.len(), "turn complete");

        Ok(TurnSummary {
            turn,
            outcomes,
            defeated,
            player_defeated: !player_alive,
        })
    }

    fn publish(&self, event: impl Into<Event>) {
        if let Some(bus) = &self.bus {
            bus.publish(event.into());
        }
    }
}
