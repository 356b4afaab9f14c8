//! Confidence-weighted ensemble used while no strategy is identified

use serde::{Deserialize, Serialize};
use crate::config::EngineConfig;
use crate::moves::Move;
use crate::score;
use crate::strategy::{PerStrategy, StrategyId};
use crate::tracker::DetectionStats;

/// Why a move was chosen
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Reason {
    /// Countered the identified strategy.
    Identified(StrategyId),
    /// Countered a strategy whose weight clearly dominates.
    Lean(StrategyId),
    /// Weighted vote over all four predictions.
    Blend,
}

/// A move together with the reason it was picked
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub play: Move,
    pub reason: Reason,
}

impl Choice {
    /// Counter the identified strategy's prediction.
    pub fn identified(id: StrategyId, predictions: &PerStrategy<Move>) -> Self {
        Self { play: predictions[id].counter(), reason: Reason::Identified(id) }
    }
}

/// Ensemble weight of one strategy.
///
/// Squaring the accuracy discounts weak predictors. The multiplier grows
/// with the length of the track record.
pub fn weight(stats: &DetectionStats, config: &EngineConfig) -> f64 {
    match stats.accuracy() {
        None => config.prior_weight,
        Some(accuracy) => accuracy * accuracy * f64::max(1.0, stats.total as f64 / 2.0),
    }
}

pub fn decide(
    stats: &PerStrategy<DetectionStats>,
    predictions: &PerStrategy<Move>,
    config: &EngineConfig,
) -> Choice {
    let weights = PerStrategy::from_fn(|id| weight(&stats[id], config));

    let mut by_weight: Vec<(StrategyId, f64)> = weights.iter().map(|(id, w)| (id, *w)).collect();
    by_weight.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));

    let (top, top_weight) = by_weight[0];
    let runner_up = by_weight.get(1).map_or(0.0, |(_, w)| *w);
    if top_weight > 0.0 && top_weight - runner_up >= config.lean_margin {
        return Choice { play: predictions[top].counter(), reason: Reason::Lean(top) };
    }

    let mut best: Option<(Move, f64)> = None;
    for candidate in Move::ALL {
        let total: f64 = weights
            .iter()
            .map(|(id, w)| w * f64::from(score(candidate, predictions[id])))
            .sum();
        if best.map_or(true, |(_, s)| total > s) {
            best = Some((candidate, total));
        }
    }

    Choice {
        play: best.map_or(Move::Paper, |(m, _)| m),
        reason: Reason::Blend,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::Move::{Paper as P, Rock as R, Scissors as S};

    fn predictions(moves: [Move; 4]) -> PerStrategy<Move> {
        PerStrategy::from_fn(|id| moves[id.index()])
    }

    fn stats(records: [(u32, u32); 4]) -> PerStrategy<DetectionStats> {
        PerStrategy::from_fn(|id| {
            let (matches, total) = records[id.index()];
            DetectionStats { matches, total }
        })
    }

    #[test]
    fn test_weight_prior() {
        let config = EngineConfig::default();
        assert_eq!(weight(&DetectionStats::default(), &config), 0.2);
    }

    #[test]
    fn test_weight_scales_with_track_record() {
        let config = EngineConfig::default();
        // Below two observations the multiplier is 1
        assert_eq!(weight(&DetectionStats { matches: 1, total: 1 }, &config), 1.0);
        assert_eq!(weight(&DetectionStats { matches: 1, total: 2 }, &config), 0.25);
        // 0.5² × 4
        assert_eq!(weight(&DetectionStats { matches: 4, total: 8 }, &config), 1.0);
        assert_eq!(weight(&DetectionStats { matches: 0, total: 8 }, &config), 0.0);
    }

    #[test]
    fn test_first_round_blend() {
        let config = EngineConfig::default();
        let choice = decide(&PerStrategy::default(), &predictions([R, P, R, P]), &config);
        // Paper beats both Rock predictions and ties the Paper ones
        assert_eq!(choice, Choice { play: P, reason: Reason::Blend });
    }

    #[test]
    fn test_lean_on_dominant_strategy() {
        let config = EngineConfig::default();
        // Weights: 0, 1.0, 0, 0
        let stats = stats([(0, 2), (2, 2), (0, 2), (0, 2)]);
        let choice = decide(&stats, &predictions([R, S, R, R]), &config);
        assert_eq!(choice, Choice { play: R, reason: Reason::Lean(StrategyId::CounterLastMove) });
    }

    #[test]
    fn test_no_lean_when_close() {
        let config = EngineConfig::default();
        // Weights: 1.0, 1.0, 0, 0
        let stats = stats([(2, 2), (2, 2), (0, 2), (0, 2)]);
        let choice = decide(&stats, &predictions([R, R, S, S]), &config);
        // Paper: +2; Rock: 0; Scissors: -2
        assert_eq!(choice, Choice { play: P, reason: Reason::Blend });
    }

    #[test]
    fn test_blend_picks_highest_sum() {
        let config = EngineConfig::default();
        let choice = decide(&PerStrategy::default(), &predictions([R, P, S, R]), &config);
        // Rock: 0; Paper: +0.2; Scissors: -0.2
        assert_eq!(choice, Choice { play: P, reason: Reason::Blend });
    }

    #[test]
    fn test_blend_tie_prefers_declared_order() {
        let config = EngineConfig::default();
        // The zero-weight strategy drops out and the remaining predictions cancel
        let stats = stats([(0, 2), (0, 0), (0, 0), (0, 0)]);
        let choice = decide(&stats, &predictions([S, R, P, S]), &config);
        assert_eq!(choice, Choice { play: R, reason: Reason::Blend });
    }

    #[test]
    fn test_identified_counters_prediction() {
        let choice = Choice::identified(StrategyId::TransitionPredictor, &predictions([R, R, R, S]));
        assert_eq!(choice.play, R);
        assert_eq!(choice.reason, Reason::Identified(StrategyId::TransitionPredictor));
    }
}
