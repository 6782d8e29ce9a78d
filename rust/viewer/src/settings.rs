use handlens_analytics::highlights::DetectorThresholds;
use handlens_engine::reconstruct::{CursorMode, PotScope};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Settings shared by the hand and job viewers
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ViewerSettings {
    /// Number of hands averaged into one chart point
    pub bucket_size: usize,
    /// Pot figures shown by the hand viewer
    pub pot_scope: PotScope,
    /// Cursor mode a freshly loaded hand starts in
    pub cursor_mode: CursorMode,
    /// Maximum number of interesting games reported for a job
    pub highlight_count: usize,
    pub thresholds: DetectorThresholds,
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            bucket_size: 1,
            pot_scope: PotScope::Round,
            cursor_mode: CursorMode::Action,
            highlight_count: handlens_analytics::highlights::MAX_HIGHLIGHTS,
            thresholds: DetectorThresholds::default(),
        }
    }
}

impl ViewerSettings {
    /// Validate settings values
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.bucket_size == 0 {
            return Err(SettingsError::InvalidValue(
                "bucket_size must be greater than 0".to_string(),
            ));
        }

        if self.highlight_count == 0 {
            return Err(SettingsError::InvalidValue(
                "highlight_count must be greater than 0".to_string(),
            ));
        }

        self.detector_thresholds()
            .validate()
            .map_err(|err| SettingsError::InvalidValue(err.to_string()))
    }

    /// Thresholds handed to the detector, capped at `highlight_count` results.
    pub fn detector_thresholds(&self) -> DetectorThresholds {
        DetectorThresholds {
            max_highlights: self.highlight_count,
            ..self.thresholds.clone()
        }
    }
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Invalid settings value: {0}")]
    InvalidValue(String),
}
