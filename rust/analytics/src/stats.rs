//! Per-iteration statistics across every player of a job.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use crate::series::JobScores;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IterationStat {
    /// One-based hand number: series index 0 is iteration 1.
    pub iteration: usize,
    pub mean: f64,
    /// Population variance.
    pub variance: f64,
    pub standard_deviation: f64,
    pub range: f64,
    /// Scores that contributed to this iteration, by player name.
    pub scores: BTreeMap<String, f64>,
}

impl IterationStat {
    /// Builds the statistic from the contributing scores, `None` when nobody contributed.
    pub fn from_scores(iteration: usize, scores: BTreeMap<String, f64>) -> Option<Self> {
        if scores.is_empty() {
            return None;
        }
        let n = scores.len() as f64;
        let mean = scores.values().sum::<f64>() / n;
        let variance = scores.values().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        let max = scores.values().copied().fold(f64::NEG_INFINITY, f64::max);
        let min = scores.values().copied().fold(f64::INFINITY, f64::min);
        Some(IterationStat {
            iteration,
            mean,
            variance,
            standard_deviation: variance.sqrt(),
            range: max - min,
            scores,
        })
    }

    pub fn score(&self, player: &str) -> Option<f64> {
        self.scores.get(player).copied()
    }
}

/// One statistic per iteration index that at least one player reached.
///
/// Shorter series stop contributing past their own length; they are never padded.
pub fn aggregate(scores: &JobScores) -> Vec<IterationStat> {
    let mut stats = Vec::new();
    for index in 0..scores.iterations() {
        let iteration = index + 1;
        let mut present = BTreeMap::new();
        for (player, values) in &scores.series {
            match values.get(index) {
                Some(v) if v.is_finite() => {
                    present.insert(player.clone(), *v);
                }
                Some(v) => debug!(player = %player, iteration, value = %v, "ignoring non-finite score"),
                None => {}
            }
        }
        match IterationStat::from_scores(iteration, present) {
            Some(stat) => stats.push(stat),
            None => debug!(iteration, "no scores for iteration, skipped"),
        }
    }
    stats
}
