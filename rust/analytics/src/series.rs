//! Score series of a job.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::AnalyticsError;

/// Ordered score sequence per player, index 0 being the first completed hand.
///
/// Players are kept in name order; every "first player" tie-break in this crate relies
/// on it. `null` entries in the payload become NaN and are treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobScores {
    pub series: BTreeMap<String, Vec<f64>>,
}

impl JobScores {
    pub fn from_json(payload: &str) -> Result<Self, AnalyticsError> {
        let raw: BTreeMap<String, Vec<Option<f64>>> = serde_json::from_str(payload)?;
        let scores = JobScores {
            series: raw
                .into_iter()
                .map(|(name, values)| {
                    let values = values.into_iter().map(|v| v.unwrap_or(f64::NAN)).collect();
                    (name, values)
                })
                .collect(),
        };
        scores.validate()?;
        Ok(scores)
    }

    pub fn validate(&self) -> Result<(), AnalyticsError> {
        if self.series.keys().any(|name| name.trim().is_empty()) {
            return Err(AnalyticsError::InvalidSeries(
                "player names must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn insert(&mut self, player: impl Into<String>, values: Vec<f64>) {
        self.series.insert(player.into(), values);
    }

    pub fn players(&self) -> impl Iterator<Item = &str> {
        self.series.keys().map(String::as_str)
    }

    /// Length of the longest series.
    pub fn iterations(&self) -> usize {
        self.series.values().map(Vec::len).max().unwrap_or(0)
    }

    /// Finite score of `player` at `index`, if any.
    pub fn score(&self, player: &str, index: usize) -> Option<f64> {
        self.series
            .get(player)
            .and_then(|values| values.get(index))
            .copied()
            .filter(|v| v.is_finite())
    }

    pub fn is_empty(&self) -> bool {
        self.iterations() == 0
    }
}

impl<S: Into<String>> FromIterator<(S, Vec<f64>)> for JobScores {
    fn from_iter<T: IntoIterator<Item = (S, Vec<f64>)>>(iter: T) -> Self {
        JobScores {
            series: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nulls_become_absent() {
        let scores = JobScores::from_json(r#"{"alice": [1, null, 3], "bob": []}"#).unwrap();
        assert_eq!(scores.iterations(), 3);
        assert_eq!(scores.score("alice", 0), Some(1.0));
        assert_eq!(scores.score("alice", 1), None);
        assert_eq!(scores.score("bob", 0), None);
        assert_eq!(scores.score("carol", 0), None);
    }

    #[test]
    fn rejects_blank_player_names() {
        let err = JobScores::from_json(r#"{" ": [1]}"#).unwrap_err();
        assert!(matches!(err, AnalyticsError::InvalidSeries(_)));
    }

    #[test]
    fn rejects_non_numeric_scores() {
        let err = JobScores::from_json(r#"{"alice": ["high"]}"#).unwrap_err();
        assert!(matches!(err, AnalyticsError::Malformed(_)));
    }
}
