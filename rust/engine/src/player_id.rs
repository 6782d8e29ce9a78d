//! Seat index / player id adapter.
//!
//! Action logs, `playerNames`, `playerHands`, per-round `bets` and side-pot eligibility
//! all use the raw zero-based [`SeatIndex`]. Money tables and the username map are keyed
//! by the one-based [`PlayerId`]. The two conversions below are the only place where the
//! offset is applied.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Raw zero-based player index as written in the action log.
#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct SeatIndex(pub usize);

/// One-based player identifier used by money tables and the username map.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub usize);

impl SeatIndex {
    pub fn player_id(self) -> PlayerId {
        PlayerId(self.0 + 1)
    }
}

impl PlayerId {
    /// Returns `None` for id `0`, which has no seat.
    pub fn seat(self) -> Option<SeatIndex> {
        self.0.checked_sub(1).map(SeatIndex)
    }
}

impl From<usize> for SeatIndex {
    fn from(value: usize) -> Self {
        SeatIndex(value)
    }
}

impl fmt::Display for SeatIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
