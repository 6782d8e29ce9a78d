//! Minimal shape check for hand records.
//!
//! Runs on the raw JSON document before it is decoded, for both uploaded payloads and
//! records retrieved from storage. Anything that fails here is reported as
//! [`RecordError::InvalidGameData`]; everything past this gate is tolerated and
//! defaulted by the reconstruction.

use serde_json::Value;

use crate::errors::RecordError;

pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 6;
pub const BOARD_SIZE: usize = 5;

/// Checks that `rounds` is an object keyed by round index, `playerNames` maps 2–6
/// players, and `finalBoard` holds exactly five cards.
///
/// # Examples
///
/// ```
/// use handlens_engine::validation::validate_shape;
/// use serde_json::json;
///
/// let ok = json!({
///     "rounds": {},
///     "playerNames": {"0": "player1", "1": "player2"},
///     "finalBoard": ["As", "Kd", "7c", "2h", "9s"]
/// });
/// assert!(validate_shape(&ok).is_ok());
///
/// let lonely = json!({
///     "rounds": {},
///     "playerNames": {"0": "player1"},
///     "finalBoard": ["As", "Kd", "7c", "2h", "9s"]
/// });
/// assert!(validate_shape(&lonely).unwrap_err().is_invalid_game_data());
/// ```
pub fn validate_shape(value: &Value) -> Result<(), RecordError> {
    let obj = value
        .as_object()
        .ok_or_else(|| RecordError::invalid("record must be a JSON object"))?;

    let rounds = obj
        .get("rounds")
        .ok_or_else(|| RecordError::invalid("missing rounds"))?
        .as_object()
        .ok_or_else(|| RecordError::invalid("rounds must be keyed by round index"))?;
    if let Some(bad) = rounds.keys().find(|k| k.parse::<u8>().is_err()) {
        return Err(RecordError::invalid(format!(
            "round key {:?} is not a round index",
            bad
        )));
    }

    let names = obj
        .get("playerNames")
        .ok_or_else(|| RecordError::invalid("missing playerNames"))?
        .as_object()
        .ok_or_else(|| RecordError::invalid("playerNames must be a mapping"))?;
    if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&names.len()) {
        return Err(RecordError::invalid(format!(
            "expected {}-{} players, found {}",
            MIN_PLAYERS,
            MAX_PLAYERS,
            names.len()
        )));
    }

    let board = obj
        .get("finalBoard")
        .ok_or_else(|| RecordError::invalid("missing finalBoard"))?
        .as_array()
        .ok_or_else(|| RecordError::invalid("finalBoard must be a sequence"))?;
    if board.len() != BOARD_SIZE {
        return Err(RecordError::invalid(format!(
            "finalBoard must hold {} cards, found {}",
            BOARD_SIZE,
            board.len()
        )));
    }

    Ok(())
}
