//! Opponent identification
//!
//! Scores every reference strategy on how well it has predicted the real
//! opponent and decides, with hysteresis, whether one of them should be
//! treated as the opponent's model. Locking needs more evidence than keeping
//! a lock, and an already identified strategy is re-confirmed without having
//! to beat the runner-up by a margin.

use serde::{Deserialize, Serialize};
use crate::config::EngineConfig;
use crate::moves::Move;
use crate::strategy::{PerStrategy, StrategyId};

/// Prediction track record of one strategy
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectionStats {
    pub matches: u32,
    pub total: u32,
}

impl DetectionStats {
    pub fn record(&mut self, predicted: Move, actual: Move) {
        self.total += 1;
        if predicted == actual {
            self.matches += 1;
        }
    }

    /// `None` until the first observation
    pub fn accuracy(&self) -> Option<f64> {
        (self.total > 0).then(|| self.matches as f64 / self.total as f64)
    }
}

/// A strategy's place in the ranking
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Ranked {
    pub id: StrategyId,
    pub accuracy: f64,
    pub total: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Tracker {
    stats: PerStrategy<DetectionStats>,
    identified: Option<StrategyId>,
}

impl Tracker {
    pub fn stats(&self) -> &PerStrategy<DetectionStats> {
        &self.stats
    }

    pub fn identified(&self) -> Option<StrategyId> {
        self.identified
    }

    /// Score last round's predictions against the move the opponent actually made.
    pub fn observe(&mut self, predictions: &PerStrategy<Move>, actual: Move) {
        for (id, predicted) in predictions.iter() {
            self.stats[id].record(*predicted, actual);
        }
    }

    /// Strategies with at least one observation, best first.
    ///
    /// Ordered by accuracy, then number of observations, then declared order.
    pub fn ranking(&self) -> Vec<Ranked> {
        let mut ranking: Vec<Ranked> = self
            .stats
            .iter()
            .filter_map(|(id, s)| s.accuracy().map(|accuracy| Ranked { id, accuracy, total: s.total }))
            .collect();
        ranking.sort_by(|a, b| {
            b.accuracy
                .total_cmp(&a.accuracy)
                .then(b.total.cmp(&a.total))
                .then(a.id.cmp(&b.id))
        });
        ranking
    }

    /// Apply the lock-in and unlock rules. Returns the identification afterwards.
    pub fn reevaluate(&mut self, config: &EngineConfig) -> Option<StrategyId> {
        let ranking = self.ranking();

        if let Some(best) = ranking.first() {
            let runner_up = ranking.get(1).map_or(0.0, |r| r.accuracy);
            if best.total >= config.lock_min_total && best.accuracy >= config.lock_min_accuracy {
                let confirmed = self.identified == Some(best.id);
                let clear_lead = best.accuracy - runner_up >= config.lock_min_lead;
                let seasoned = best.total >= config.lock_seasoned_total;
                if !confirmed && (clear_lead || seasoned) {
                    log::debug!(
                        "identified {} (accuracy {:.2} over {} rounds)",
                        best.id.name(),
                        best.accuracy,
                        best.total
                    );
                    self.identified = Some(best.id);
                }
            }
        }

        // With nothing identified there is nothing to drop.
        if let Some(id) = self.identified {
            let stats = self.stats[id];
            let accuracy = stats.accuracy().unwrap_or(0.0);
            if stats.total >= config.unlock_min_total && accuracy < config.unlock_below_accuracy {
                log::debug!("dropped {} (accuracy {:.2})", id.name(), accuracy);
                self.identified = None;
            }
        }

        self.identified
    }
}
