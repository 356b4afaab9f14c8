//! Match execution harness
//!
//! Plays an `Engine` against an opponent for a fixed number of rounds, the
//! way an external caller would: feeding the opponent's last move in and
//! taking one move out per round.

use serde::{Deserialize, Serialize};
use crate::engine::Engine;
use crate::moves::Move;
use crate::score;
use crate::strategy::{ReferenceSimulator, Simulator, StrategyId};

/// Anything that can sit across the table from the engine
pub trait Opponent {
    /// `last_seen` is the engine's previous move, `None` on the first round.
    fn play(&mut self, last_seen: Option<Move>) -> Move;
}

impl Opponent for ReferenceSimulator {
    fn play(&mut self, last_seen: Option<Move>) -> Move {
        self.advance(last_seen)
    }
}

/// Replays a fixed list of moves, wrapping around at the end.
#[derive(Clone, Debug)]
pub struct Scripted {
    moves: Vec<Move>,
    cursor: usize,
}

impl Scripted {
    pub fn new(moves: Vec<Move>) -> Self {
        Self { moves, cursor: 0 }
    }
}

impl Opponent for Scripted {
    fn play(&mut self, _last_seen: Option<Move>) -> Move {
        if self.moves.is_empty() {
            return Move::Rock;
        }
        let m = self.moves[self.cursor % self.moves.len()];
        self.cursor += 1;
        m
    }
}

/// Result of a single round
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RoundResult {
    pub round: u32,
    pub engine_move: Move,
    pub opponent_move: Move,
    /// Engine's outcome: +1 win, 0 tie, -1 loss
    pub outcome: i8,
    pub cumulative: i64,
    pub identified: Option<StrategyId>,
}

/// Result of a complete match
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MatchResult {
    pub rounds: Vec<RoundResult>,
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
}

impl MatchResult {
    /// Wins over decided rounds; ties are left out.
    pub fn win_rate(&self) -> f64 {
        let decided = self.wins + self.losses;
        if decided == 0 {
            return 0.0;
        }
        self.wins as f64 / decided as f64
    }

    pub fn score(&self) -> i64 {
        self.wins as i64 - self.losses as i64
    }
}

/// Run a complete match.
///
/// The first round hands the engine `None`, so an engine reused from an
/// earlier match starts over.
pub fn run_match(engine: &mut Engine, opponent: &mut dyn Opponent, rounds: u32) -> MatchResult {
    let mut result = MatchResult {
        rounds: Vec::with_capacity(rounds as usize),
        ..Default::default()
    };
    let mut engine_last = None;
    let mut opponent_last = None;
    let mut cumulative = 0i64;

    for round in 0..rounds {
        // Both sides move simultaneously, each seeing only the other's previous move
        let engine_move = engine.step(opponent_last);
        let opponent_move = opponent.play(engine_last);

        let outcome = score(engine_move, opponent_move);
        match outcome {
            1 => result.wins += 1,
            -1 => result.losses += 1,
            _ => result.ties += 1,
        }
        cumulative += outcome as i64;

        result.rounds.push(RoundResult {
            round,
            engine_move,
            opponent_move,
            outcome,
            cumulative,
            identified: engine.identified(),
        });

        engine_last = Some(engine_move);
        opponent_last = Some(opponent_move);
    }

    log::debug!(
        "match over after {} rounds: {} wins, {} losses, {} ties",
        rounds,
        result.wins,
        result.losses,
        result.ties
    );
    result
}

/// One match per reference opponent, all played by the same engine
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GauntletReport {
    pub matches: Vec<(StrategyId, MatchResult)>,
}

impl GauntletReport {
    pub fn worst_win_rate(&self) -> f64 {
        self.matches
            .iter()
            .map(|(_, m)| m.win_rate())
            .fold(f64::INFINITY, f64::min)
    }
}

/// Play the engine against every reference strategy in turn.
pub fn run_gauntlet(engine: &mut Engine, rounds: u32) -> GauntletReport {
    let matches = StrategyId::ALL
        .into_iter()
        .map(|id| {
            let mut opponent = ReferenceSimulator::new(id);
            let result = run_match(engine, &mut opponent, rounds);
            log::info!("{}: win rate {:.3}", id.name(), result.win_rate());
            (id, result)
        })
        .collect();
    GauntletReport { matches }
}
