//! Adaptive Rock/Paper/Scissors engine
//!
//! Simulates four reference opponents in parallel, tracks which one best
//! predicts the real opponent, counters it once identified and otherwise
//! votes with an accuracy-weighted ensemble.
//! This crate is compiled to:
//! - Native (library and `gauntlet` CLI)
//! - WASM (for browser play)

mod moves;
mod strategy;
mod tracker;
mod ensemble;
mod config;
mod engine;
mod game;

#[cfg(feature = "wasm")]
mod wasm;

pub use moves::{Move, ParseMoveError};
pub use strategy::{
    describe_strategy, CounterLastMove, FrequencyFollower, PerStrategy, PeriodicCycle,
    ReferenceSimulator, Simulator, StrategyId, TransitionPredictor, FREQUENCY_WINDOW,
};
pub use tracker::{DetectionStats, Ranked, Tracker};
pub use ensemble::{Choice, Reason};
pub use config::{ConfigError, EngineConfig};
pub use engine::{Engine, MatchState};
pub use game::{run_gauntlet, run_match, GauntletReport, MatchResult, Opponent, RoundResult, Scripted};

/// Outcome of `a` against `b` from `a`'s side: +1 win, 0 tie, -1 loss
pub fn score(a: Move, b: Move) -> i8 {
    match (a, b) {
        (Move::Rock, Move::Scissors) | (Move::Scissors, Move::Paper) | (Move::Paper, Move::Rock) => 1,
        _ if a == b => 0,
        _ => -1,
    }
}
