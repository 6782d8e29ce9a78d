use thiserror::Error;

/// Errors raised at the record boundary, before any reconstruction runs.
///
/// Reconstruction itself never fails: once a [`crate::record::HandRecord`] exists,
/// missing pieces fall back to defaults.
#[derive(Debug, Error)]
pub enum RecordError {
    /// The payload does not have the minimal shape of a recorded hand.
    #[error("Invalid game data: {reason}")]
    InvalidGameData { reason: String },
    /// The payload passed the shape check but could not be decoded.
    #[error("Malformed hand record: {0}")]
    Malformed(#[from] serde_json::Error),
}

impl RecordError {
    pub fn invalid(reason: impl Into<String>) -> Self {
        RecordError::InvalidGameData {
            reason: reason.into(),
        }
    }

    pub fn is_invalid_game_data(&self) -> bool {
        matches!(self, RecordError::InvalidGameData { .. })
    }
}
