//! Reference strategy definitions and simulation
//!
//! Each reference strategy is an archetypal opponent. A simulator is fed the
//! move its modelled opponent just saw (our own previous move) and answers
//! with the move that opponent will play next, which is our prediction of the
//! real opponent.

use core::ops::{Index, IndexMut};
use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use crate::moves::Move;

/// The closed set of reference strategies
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StrategyId {
    /// Plays a fixed five-move cycle, ignoring its adversary.
    PeriodicCycle,
    /// Assumes its adversary repeats, and beats that.
    CounterLastMove,
    /// Beats its adversary's most frequent recent move.
    FrequencyFollower,
    /// Beats the most likely successor of its adversary's last move.
    TransitionPredictor,
}

impl StrategyId {
    /// Declared order. Ranking ties are broken by position in this array.
    pub const ALL: [StrategyId; 4] = [
        StrategyId::PeriodicCycle,
        StrategyId::CounterLastMove,
        StrategyId::FrequencyFollower,
        StrategyId::TransitionPredictor,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            StrategyId::PeriodicCycle => "periodic-cycle",
            StrategyId::CounterLastMove => "counter-last-move",
            StrategyId::FrequencyFollower => "frequency-follower",
            StrategyId::TransitionPredictor => "transition-predictor",
        }
    }
}

/// Get a human-readable description of a reference strategy
pub fn describe_strategy(id: StrategyId) -> &'static str {
    match id {
        StrategyId::PeriodicCycle => "Cycles Rock, Rock, Paper, Paper, Scissors regardless of play.",
        StrategyId::CounterLastMove => "Beats whatever its opponent played last. Assumes Rock at the start.",
        StrategyId::FrequencyFollower => "Beats its opponent's most frequent move over the last ten rounds.",
        StrategyId::TransitionPredictor => "Beats the most frequent follow-up to its opponent's last move.",
    }
}

/// Fixed-size table holding one value per reference strategy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerStrategy<T>([T; 4]);

impl<T> PerStrategy<T> {
    pub fn from_fn(f: impl FnMut(StrategyId) -> T) -> Self {
        Self(StrategyId::ALL.map(f))
    }

    /// Entries in declared order
    pub fn iter(&self) -> impl Iterator<Item = (StrategyId, &T)> {
        StrategyId::ALL.into_iter().zip(self.0.iter())
    }

    /// Visit every entry mutably, in declared order, collecting the results.
    pub fn map_mut<U>(&mut self, mut f: impl FnMut(StrategyId, &mut T) -> U) -> PerStrategy<U> {
        let slots = &mut self.0;
        PerStrategy::from_fn(|id| f(id, &mut slots[id.index()]))
    }
}

impl<T> Index<StrategyId> for PerStrategy<T> {
    type Output = T;

    fn index(&self, id: StrategyId) -> &T {
        &self.0[id.index()]
    }
}

impl<T> IndexMut<StrategyId> for PerStrategy<T> {
    fn index_mut(&mut self, id: StrategyId) -> &mut T {
        &mut self.0[id.index()]
    }
}

/// One simulated opponent.
pub trait Simulator {
    /// Advance by one round.
    ///
    /// `observed` is the move the simulated opponent just saw, `None` on the
    /// first round of a match. Returns the move it plays next.
    fn advance(&mut self, observed: Option<Move>) -> Move;
}

// ── Periodic cycle ───────────────────────────────────────────────────

const CYCLE: [Move; 5] = [Move::Rock, Move::Rock, Move::Paper, Move::Paper, Move::Scissors];

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodicCycle {
    round: usize,
}

impl Simulator for PeriodicCycle {
    fn advance(&mut self, _observed: Option<Move>) -> Move {
        let m = CYCLE[self.round % CYCLE.len()];
        self.round += 1;
        m
    }
}

// ── Counter last move ────────────────────────────────────────────────

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterLastMove;

impl CounterLastMove {
    /// Expects its adversary to repeat, Rock when nothing has been seen.
    pub fn guess(observed: Option<Move>) -> Move {
        observed.unwrap_or(Move::Rock)
    }
}

impl Simulator for CounterLastMove {
    fn advance(&mut self, observed: Option<Move>) -> Move {
        Self::guess(observed).counter()
    }
}

// ── Frequency follower ───────────────────────────────────────────────

/// Number of recent moves the frequency follower looks at.
pub const FREQUENCY_WINDOW: usize = 10;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencyFollower {
    window: VecDeque<Move>,
}

impl FrequencyFollower {
    /// Most frequent move in the window.
    ///
    /// Among tied moves the one seen earliest in the window wins.
    pub fn most_frequent(&self) -> Option<Move> {
        let mut counts = [0usize; 3];
        for m in &self.window {
            counts[m.index()] += 1;
        }
        self.window.iter().copied().fold(None, |best, m| match best {
            Some(b) if counts[b.index()] >= counts[m.index()] => Some(b),
            _ => Some(m),
        })
    }

    pub fn window(&self) -> &VecDeque<Move> {
        &self.window
    }
}

impl Simulator for FrequencyFollower {
    fn advance(&mut self, observed: Option<Move>) -> Move {
        if let Some(m) = observed {
            self.window.push_back(m);
            if self.window.len() > FREQUENCY_WINDOW {
                self.window.pop_front();
            }
        }
        self.most_frequent().unwrap_or(Move::Scissors).counter()
    }
}

// ── Transition predictor ─────────────────────────────────────────────

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionPredictor {
    last: Option<Move>,
    /// `transitions[a][b]` counts how often `b` directly followed `a`.
    transitions: [[u32; 3]; 3],
}

impl TransitionPredictor {
    /// Most frequent successor of `current`, ties resolved Rock, Paper, Scissors.
    pub fn likely_successor(&self, current: Move) -> Move {
        let row = &self.transitions[current.index()];
        Move::ALL
            .into_iter()
            .fold(Move::Rock, |best, m| if row[m.index()] > row[best.index()] { m } else { best })
    }

    pub fn transition_count(&self, from: Move, to: Move) -> u32 {
        self.transitions[from.index()][to.index()]
    }
}

impl Simulator for TransitionPredictor {
    fn advance(&mut self, observed: Option<Move>) -> Move {
        let current = observed.unwrap_or(Move::Rock);
        if let Some(prev) = self.last {
            self.transitions[prev.index()][current.index()] += 1;
        }
        self.last = Some(current);
        self.likely_successor(current).counter()
    }
}

// ── Dispatch ─────────────────────────────────────────────────────────

/// A simulator for any reference strategy
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReferenceSimulator {
    PeriodicCycle(PeriodicCycle),
    CounterLastMove(CounterLastMove),
    FrequencyFollower(FrequencyFollower),
    TransitionPredictor(TransitionPredictor),
}

impl ReferenceSimulator {
    /// Fresh simulator at the start of a match
    pub fn new(id: StrategyId) -> Self {
        match id {
            StrategyId::PeriodicCycle => Self::PeriodicCycle(PeriodicCycle::default()),
            StrategyId::CounterLastMove => Self::CounterLastMove(CounterLastMove),
            StrategyId::FrequencyFollower => Self::FrequencyFollower(FrequencyFollower::default()),
            StrategyId::TransitionPredictor => Self::TransitionPredictor(TransitionPredictor::default()),
        }
    }

    pub fn id(&self) -> StrategyId {
        match self {
            Self::PeriodicCycle(_) => StrategyId::PeriodicCycle,
            Self::CounterLastMove(_) => StrategyId::CounterLastMove,
            Self::FrequencyFollower(_) => StrategyId::FrequencyFollower,
            Self::TransitionPredictor(_) => StrategyId::TransitionPredictor,
        }
    }
}

impl Simulator for ReferenceSimulator {
    fn advance(&mut self, observed: Option<Move>) -> Move {
        match self {
            Self::PeriodicCycle(s) => s.advance(observed),
            Self::CounterLastMove(s) => s.advance(observed),
            Self::FrequencyFollower(s) => s.advance(observed),
            Self::TransitionPredictor(s) => s.advance(observed),
        }
    }
}

impl PerStrategy<ReferenceSimulator> {
    /// One fresh simulator per reference strategy
    pub fn fresh() -> Self {
        Self::from_fn(ReferenceSimulator::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    use crate::moves::Move::{Paper as P, Rock as R, Scissors as S};

    fn feed(sim: &mut impl Simulator, moves: &[Move]) -> Vec<Move> {
        moves.iter().map(|m| sim.advance(Some(*m))).collect()
    }

    #[test]
    fn test_periodic_cycle_sequence() {
        let mut sim = PeriodicCycle::default();
        let first = sim.advance(None);
        let rest = feed(&mut sim, &[S, S, S, S, S, S, S, S, S]);
        let mut out = vec![first];
        out.extend(rest);
        assert_eq!(out, vec![R, R, P, P, S, R, R, P, P, S]);
    }

    #[test]
    fn test_counter_last_move_first_round() {
        let mut sim = CounterLastMove;
        assert_eq!(CounterLastMove::guess(None), R);
        assert_eq!(sim.advance(None), P);
    }

    #[test]
    fn test_counter_last_move_follows_previous() {
        let mut sim = CounterLastMove;
        assert_eq!(feed(&mut sim, &[R, P, S, S]), vec![P, S, R, R]);
    }

    #[test]
    fn test_frequency_follower_empty_window() {
        let mut sim = FrequencyFollower::default();
        assert_eq!(sim.most_frequent(), None);
        // Scissors by default, so it plays Rock
        assert_eq!(sim.advance(None), R);
    }

    #[test]
    fn test_frequency_follower_majority() {
        let mut sim = FrequencyFollower::default();
        let played = feed(&mut sim, &[R, P, R, R, P, R, R, P, R, R]);
        assert_eq!(sim.most_frequent(), Some(R));
        assert_eq!(*played.last().unwrap(), P);
    }

    #[test]
    fn test_frequency_follower_window_slides() {
        let mut sim = FrequencyFollower::default();
        feed(&mut sim, &[S; 10]);
        let played = feed(&mut sim, &[P; 6]);
        assert_eq!(sim.window().len(), FREQUENCY_WINDOW);
        // 4×S, 6×P remain
        assert_eq!(sim.most_frequent(), Some(P));
        assert_eq!(*played.last().unwrap(), S);
    }

    #[test]
    fn test_frequency_follower_tie_goes_to_earliest() {
        let mut sim = FrequencyFollower::default();
        feed(&mut sim, &[S, P, P, S]);
        assert_eq!(sim.most_frequent(), Some(S));

        let mut sim = FrequencyFollower::default();
        feed(&mut sim, &[P, S, S, P, R]);
        assert_eq!(sim.most_frequent(), Some(P));
    }

    #[test]
    fn test_transition_predictor_counts_pairs() {
        let mut sim = TransitionPredictor::default();
        // None is counted as Rock
        sim.advance(None);
        feed(&mut sim, &[P, R, P, R]);
        assert_eq!(sim.transition_count(R, P), 2);
        assert_eq!(sim.transition_count(P, R), 2);
        assert_eq!(sim.transition_count(R, R), 0);
    }

    #[test]
    fn test_transition_predictor_predicts_successor() {
        let mut sim = TransitionPredictor::default();
        // R->S twice, R->P once; the last observed move is R
        let played = feed(&mut sim, &[R, S, R, S, R, P, R]);
        assert_eq!(sim.likely_successor(R), S);
        assert_eq!(*played.last().unwrap(), R);
    }

    #[test]
    fn test_transition_predictor_tie_order() {
        let sim = TransitionPredictor::default();
        assert_eq!(sim.likely_successor(S), R);

        let mut sim = TransitionPredictor::default();
        feed(&mut sim, &[S, P, S, S]);
        // S->P once and S->S once
        assert_eq!(sim.likely_successor(S), P);
    }

    #[test]
    fn test_dispatch_ids_match_declared_order() {
        let sims = PerStrategy::fresh();
        for (id, sim) in sims.iter() {
            assert_eq!(sim.id(), id);
        }
    }

    #[test]
    fn test_map_mut_advances_every_simulator() {
        let mut sims = PerStrategy::fresh();
        let first = sims.map_mut(|_, sim| sim.advance(None));
        assert_eq!(first[StrategyId::PeriodicCycle], R);
        assert_eq!(first[StrategyId::CounterLastMove], P);
        assert_eq!(first[StrategyId::FrequencyFollower], R);
        assert_eq!(first[StrategyId::TransitionPredictor], P);

        let second = sims.map_mut(|_, sim| sim.advance(Some(S)));
        assert_eq!(second[StrategyId::PeriodicCycle], R);
        assert_eq!(second[StrategyId::CounterLastMove], R);
        assert_eq!(second[StrategyId::FrequencyFollower], R);
    }

    fn any_move() -> impl Strategy<Value = Move> {
        prop_oneof![Just(R), Just(P), Just(S)]
    }

    proptest! {
        #[test]
        fn periodic_cycle_ignores_input(inputs in prop::collection::vec(prop::option::of(any_move()), 0..40)) {
            let mut sim = PeriodicCycle::default();
            for (i, observed) in inputs.into_iter().enumerate() {
                prop_assert_eq!(sim.advance(observed), CYCLE[i % 5]);
            }
        }
    }
}
