//! Detection of interesting iterations in a job.
//!
//! Every interior iteration whose mean or variance moved sharply is handed to a set of
//! [`Heuristic`]s. Each heuristic may attach any number of [`Reason`]s; iterations with
//! at least one reason are ranked by their summed significance.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::AnalyticsError;
use crate::stats::IterationStat;

pub const CHANGE_GATE: f64 = 0.3;
pub const SWING_THRESHOLD: f64 = 0.4;
pub const SWING_SCALE: f64 = 1000.0;
pub const COMEBACK_RATIO: f64 = 0.5;
pub const UNDERDOG_PERCENTILE: f64 = 0.3;
pub const LEADERSHIP_DROP_RATIO: f64 = 0.3;
pub const MAX_HIGHLIGHTS: usize = 10;

/// Tunable thresholds of the detector. Defaults are the named constants of this module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorThresholds {
    /// Minimum relative change of mean or variance for an iteration to be examined
    pub change_gate: f64,
    /// Minimum combined swing for a breakthrough or collapse
    pub swing_threshold: f64,
    /// Absolute score change that counts as a swing of 1.0
    pub swing_scale: f64,
    /// Improvement, relative to the iteration mean, that counts as a comeback
    pub comeback_ratio: f64,
    /// Percentile below which a player is an underdog
    pub underdog_percentile: f64,
    /// Drop of the previous leader, relative to the iteration mean
    pub leadership_drop_ratio: f64,
    pub max_highlights: usize,
}

impl Default for DetectorThresholds {
    fn default() -> Self {
        Self {
            change_gate: CHANGE_GATE,
            swing_threshold: SWING_THRESHOLD,
            swing_scale: SWING_SCALE,
            comeback_ratio: COMEBACK_RATIO,
            underdog_percentile: UNDERDOG_PERCENTILE,
            leadership_drop_ratio: LEADERSHIP_DROP_RATIO,
            max_highlights: MAX_HIGHLIGHTS,
        }
    }
}

impl DetectorThresholds {
    pub fn validate(&self) -> Result<(), AnalyticsError> {
        let positive = [
            ("change_gate", self.change_gate),
            ("swing_threshold", self.swing_threshold),
            ("swing_scale", self.swing_scale),
            ("comeback_ratio", self.comeback_ratio),
            ("leadership_drop_ratio", self.leadership_drop_ratio),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(AnalyticsError::InvalidThresholds(format!(
                    "{} must be a positive number, got {}",
                    name, value
                )));
            }
        }
        if !(self.underdog_percentile > 0.0 && self.underdog_percentile <= 1.0) {
            return Err(AnalyticsError::InvalidThresholds(format!(
                "underdog_percentile must be in (0, 1], got {}",
                self.underdog_percentile
            )));
        }
        if self.max_highlights == 0 {
            return Err(AnalyticsError::InvalidThresholds(
                "max_highlights must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReasonKind {
    Breakthrough,
    Collapse,
    UnderdogComeback,
    LeadershipChange,
    /// Reported by heuristics registered through [`Detector::with_heuristic`]
    Custom(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reason {
    pub kind: ReasonKind,
    pub significance: f64,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InterestingGame {
    /// One-based hand number, copied from the iteration's statistic.
    pub iteration: usize,
    pub reasons: Vec<Reason>,
    pub total_significance: f64,
}

/// Two consecutive iterations under inspection.
#[derive(Debug, Clone, Copy)]
pub struct Window<'a> {
    pub previous: &'a IterationStat,
    pub current: &'a IterationStat,
}

impl<'a> Window<'a> {
    /// Players scored in both iterations, in name order, with `(previous, current)`.
    pub fn movers(&self) -> impl Iterator<Item = (&'a str, f64, f64)> + 'a {
        let (previous, current) = (self.previous, self.current);
        previous.scores.iter().filter_map(move |(name, prev)| {
            current.score(name).map(|cur| (name.as_str(), *prev, cur))
        })
    }
}

/// A rule that explains why an iteration is worth a look.
///
/// Implementations must be pure: the same window and thresholds always yield the same
/// reasons.
///
/// # Example Implementation
///
/// ```rust
/// use handlens_analytics::highlights::{
///     DetectorThresholds, Heuristic, Reason, ReasonKind, Window,
/// };
///
/// struct Stalemate;
///
/// impl Heuristic for Stalemate {
///     fn name(&self) -> &str {
///         "stalemate"
///     }
///
///     fn evaluate(&self, window: &Window<'_>, _: &DetectorThresholds) -> Vec<Reason> {
///         if window.current.range == 0.0 {
///             vec![Reason {
///                 kind: ReasonKind::Custom("stalemate".into()),
///                 significance: 1.0,
///                 description: "every player is level".into(),
///             }]
///         } else {
///             vec![]
///         }
///     }
/// }
/// ```
pub trait Heuristic: Send + Sync {
    fn name(&self) -> &str;

    fn evaluate(&self, window: &Window<'_>, thresholds: &DetectorThresholds) -> Vec<Reason>;
}

/// The single largest individual swing, relative both to [`SWING_SCALE`] and to the
/// player's previous score.
#[derive(Debug, Clone, Copy, Default)]
pub struct BreakthroughCollapse;

impl Heuristic for BreakthroughCollapse {
    fn name(&self) -> &str {
        "breakthrough_collapse"
    }

    fn evaluate(&self, window: &Window<'_>, thresholds: &DetectorThresholds) -> Vec<Reason> {
        let mut best: Option<(&str, f64, f64, f64)> = None;
        for (name, prev, cur) in window.movers() {
            let delta = cur - prev;
            let combined = f64::max(
                delta.abs() / thresholds.swing_scale,
                delta.abs() / relative_base(prev),
            );
            if best.is_none_or(|(_, _, _, top)| combined > top) {
                best = Some((name, prev, cur, combined));
            }
        }

        match best {
            Some((name, prev, cur, combined)) if combined > thresholds.swing_threshold => {
                let (kind, verb) = if cur > prev {
                    (ReasonKind::Breakthrough, "jumped")
                } else {
                    (ReasonKind::Collapse, "dropped")
                };
                vec![Reason {
                    kind,
                    significance: combined,
                    description: format!("{} {} {}", name, verb, movement(prev, cur)),
                }]
            }
            _ => vec![],
        }
    }
}

/// Players from the bottom of the previous distribution who gained a large share of
/// the current mean.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnderdogComeback;

impl Heuristic for UnderdogComeback {
    fn name(&self) -> &str {
        "underdog_comeback"
    }

    fn evaluate(&self, window: &Window<'_>, thresholds: &DetectorThresholds) -> Vec<Reason> {
        let mean = window.current.mean;
        if mean <= 0.0 {
            return vec![];
        }
        let Some(cutoff) = percentile(
            window.previous.scores.values().copied(),
            thresholds.underdog_percentile,
        ) else {
            return vec![];
        };

        window
            .movers()
            .filter(|(_, prev, cur)| *prev <= cutoff && cur - prev > thresholds.comeback_ratio * mean)
            .map(|(name, prev, cur)| Reason {
                kind: ReasonKind::UnderdogComeback,
                significance: (cur - prev) / mean,
                description: format!("{} came back {}", name, movement(prev, cur)),
            })
            .collect()
    }
}

/// The previous leader lost the top spot and a large share of the current mean.
#[derive(Debug, Clone, Copy, Default)]
pub struct LeadershipChange;

impl Heuristic for LeadershipChange {
    fn name(&self) -> &str {
        "leadership_change"
    }

    fn evaluate(&self, window: &Window<'_>, thresholds: &DetectorThresholds) -> Vec<Reason> {
        let mean = window.current.mean;
        if mean <= 0.0 {
            return vec![];
        }
        let (Some((old_leader, old_top)), Some((new_leader, _))) =
            (leader(window.previous), leader(window.current))
        else {
            return vec![];
        };
        if old_leader == new_leader {
            return vec![];
        }
        let Some(old_now) = window.current.score(old_leader) else {
            return vec![];
        };

        let drop = old_top - old_now;
        if drop > thresholds.leadership_drop_ratio * mean {
            vec![Reason {
                kind: ReasonKind::LeadershipChange,
                significance: drop / mean,
                description: format!(
                    "{} took the lead from {}, who fell {}",
                    new_leader,
                    old_leader,
                    movement(old_top, old_now)
                ),
            }]
        } else {
            vec![]
        }
    }
}

/// The built-in heuristics, in evaluation order.
pub fn builtin_heuristics() -> Vec<Box<dyn Heuristic>> {
    vec![
        Box::new(BreakthroughCollapse),
        Box::new(UnderdogComeback),
        Box::new(LeadershipChange),
    ]
}

/// Ranks interior iterations of a job by how much happened in them.
pub struct Detector {
    thresholds: DetectorThresholds,
    heuristics: Vec<Box<dyn Heuristic>>,
}

impl Default for Detector {
    fn default() -> Self {
        Self {
            thresholds: DetectorThresholds::default(),
            heuristics: builtin_heuristics(),
        }
    }
}

impl std::fmt::Debug for Detector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.heuristics.iter().map(|h| h.name()).collect();
        f.debug_struct("Detector")
            .field("thresholds", &self.thresholds)
            .field("heuristics", &names)
            .finish()
    }
}

impl Detector {
    pub fn new(thresholds: DetectorThresholds) -> Result<Self, AnalyticsError> {
        thresholds.validate()?;
        Ok(Self {
            thresholds,
            heuristics: builtin_heuristics(),
        })
    }

    /// Registers an additional heuristic, evaluated after the built-in ones.
    pub fn with_heuristic(mut self, heuristic: Box<dyn Heuristic>) -> Self {
        self.heuristics.push(heuristic);
        self
    }

    pub fn thresholds(&self) -> &DetectorThresholds {
        &self.thresholds
    }

    /// At most `max_highlights` iterations, by descending total significance. Equal
    /// totals keep their iteration order.
    pub fn detect(&self, stats: &[IterationStat]) -> Vec<InterestingGame> {
        let mut found = Vec::new();
        if stats.len() < 3 {
            return found;
        }

        for i in 1..stats.len() - 1 {
            let window = Window {
                previous: &stats[i - 1],
                current: &stats[i],
            };
            if !self.passes_gate(&window) {
                continue;
            }

            let mut reasons = Vec::new();
            for heuristic in &self.heuristics {
                let fired = heuristic.evaluate(&window, &self.thresholds);
                if !fired.is_empty() {
                    debug!(
                        iteration = window.current.iteration,
                        heuristic = heuristic.name(),
                        count = fired.len(),
                        "heuristic fired"
                    );
                }
                reasons.extend(fired);
            }
            if reasons.is_empty() {
                continue;
            }

            let total_significance = reasons.iter().map(|r| r.significance).sum();
            found.push(InterestingGame {
                iteration: window.current.iteration,
                reasons,
                total_significance,
            });
        }

        found.sort_by(|a, b| b.total_significance.total_cmp(&a.total_significance));
        found.truncate(self.thresholds.max_highlights);
        found
    }

    fn passes_gate(&self, window: &Window<'_>) -> bool {
        let (prev, cur) = (window.previous, window.current);
        let variance_change = (cur.variance - prev.variance).abs() / or_one(prev.variance);
        let mean_change = (cur.mean - prev.mean).abs() / or_one(prev.mean);
        let open = variance_change > self.thresholds.change_gate
            || mean_change > self.thresholds.change_gate;
        if !open {
            debug!(
                iteration = cur.iteration,
                variance_change, mean_change, "iteration below change gate"
            );
        }
        open
    }
}

/// Gate denominator: the previous value itself, or one when it is zero. A negative
/// previous mean yields a negative change, which never opens the gate.
fn or_one(previous: f64) -> f64 {
    if previous == 0.0 { 1.0 } else { previous }
}

/// Denominator for a player's relative swing: `|previous|`, or one when it is zero.
fn relative_base(previous: f64) -> f64 {
    if previous == 0.0 { 1.0 } else { previous.abs() }
}

/// Element at `floor(p * n)` of the ascending values, clamped to the last one.
fn percentile(values: impl Iterator<Item = f64>, p: f64) -> Option<f64> {
    let mut sorted: Vec<f64> = values.collect();
    if sorted.is_empty() {
        return None;
    }
    sorted.sort_by(f64::total_cmp);
    let index = ((p * sorted.len() as f64).floor() as usize).min(sorted.len() - 1);
    Some(sorted[index])
}

/// Highest score of the iteration; the first player in name order wins ties.
fn leader(stat: &IterationStat) -> Option<(&str, f64)> {
    let mut top: Option<(&str, f64)> = None;
    for (name, score) in &stat.scores {
        if top.is_none_or(|(_, best)| *score > best) {
            top = Some((name.as_str(), *score));
        }
    }
    top
}

fn movement(from: f64, to: f64) -> String {
    format!("from {} to {} ({:+})", from, to, to - from)
}
