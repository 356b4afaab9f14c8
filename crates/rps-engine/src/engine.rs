//! Round-by-round decision engine
//!
//! One `Engine` plays one match at a time. A `None` input while the engine
//! still holds history is the caller's signal that a new match has begun.

use serde::{Deserialize, Serialize};
use crate::config::EngineConfig;
use crate::ensemble::{self, Choice};
use crate::moves::{Move, ParseMoveError};
use crate::strategy::{PerStrategy, ReferenceSimulator, Simulator, StrategyId};
use crate::tracker::Tracker;

/// Everything the engine knows about the current match
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchState {
    pub tracker: Tracker,
    /// Predictions made last round, checked against the next observed move
    pub last_predictions: Option<PerStrategy<Move>>,
    pub last_choice: Option<Choice>,
    pub simulators: PerStrategy<ReferenceSimulator>,
    pub opponent_history: Vec<Move>,
    pub own_history: Vec<Move>,
}

impl MatchState {
    pub fn new() -> Self {
        Self {
            tracker: Tracker::default(),
            last_predictions: None,
            last_choice: None,
            simulators: PerStrategy::fresh(),
            opponent_history: Vec::new(),
            own_history: Vec::new(),
        }
    }

    fn has_history(&self) -> bool {
        !self.own_history.is_empty() || !self.opponent_history.is_empty()
    }
}

impl Default for MatchState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Debug, Default)]
pub struct Engine {
    config: EngineConfig,
    /// `None` until the first round of a match
    state: Option<MatchState>,
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self { config, state: None }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Current match, if one has started
    pub fn state(&self) -> Option<&MatchState> {
        self.state.as_ref()
    }

    pub fn identified(&self) -> Option<StrategyId> {
        self.state.as_ref().and_then(|s| s.tracker.identified())
    }

    /// Forget the current match entirely.
    pub fn reset(&mut self) {
        self.state = None;
    }

    /// Play one round.
    ///
    /// `previous` is the opponent's move from the last round, `None` on the
    /// first round of a match.
    pub fn step(&mut self, previous: Option<Move>) -> Move {
        if previous.is_none() && self.state.as_ref().is_some_and(MatchState::has_history) {
            log::debug!("new match signalled, discarding state");
            self.reset();
        }

        let config = &self.config;
        let state = self.state.get_or_insert_with(MatchState::new);

        if let Some(observed) = previous {
            state.opponent_history.push(observed);
            if let Some(predictions) = &state.last_predictions {
                state.tracker.observe(predictions, observed);
            }
            state.tracker.reevaluate(config);
        }

        // Every simulator advances every round, identified or not.
        let own_last = state.own_history.last().copied();
        let predictions = state.simulators.map_mut(|_, sim| sim.advance(own_last));

        let choice = match state.tracker.identified() {
            Some(id) => Choice::identified(id, &predictions),
            None => ensemble::decide(state.tracker.stats(), &predictions, config),
        };
        log::trace!(
            "round {}: playing {} ({:?})",
            state.own_history.len() + 1,
            choice.play,
            choice.reason
        );

        state.last_predictions = Some(predictions);
        state.last_choice = Some(choice);
        state.own_history.push(choice.play);
        choice.play
    }

    /// Token-level entry point: `""` for no previous move, else `R`, `P` or `S`.
    pub fn step_token(&mut self, previous: &str) -> Result<Move, ParseMoveError> {
        let previous = Move::parse_token(previous)?;
        Ok(self.step(previous))
    }
}
