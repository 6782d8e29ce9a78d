use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// A score-series payload that decodes but cannot be analysed.
    #[error("Invalid score series: {0}")]
    InvalidSeries(String),
    #[error("Malformed score series: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("Invalid detector thresholds: {0}")]
    InvalidThresholds(String),
}
