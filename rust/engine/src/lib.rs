//! # handlens-engine: Hand Replay Core
//!
//! Reconstructs the state of a recorded Texas Hold'em hand at any point of its action
//! log. Records are read-only; every snapshot is derived from the log on demand.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation and the two-character card tokens used in records
//! - [`record`] - HandRecord, rounds, actions and money tables as written by the engine
//! - [`player_id`] - Seat index / one-based player id adapter
//! - [`validation`] - Minimal shape check for uploaded or retrieved records
//! - [`board`] - Community card reveal per street
//! - [`reconstruct`] - Cursor resolution and player/pot snapshots
//! - [`summary`] - Winner/loser partition at the end of a hand
//! - [`errors`] - Error types for the record boundary
//!
//! ## Quick Start
//!
//! ```rust
//! use handlens_engine::player_id::SeatIndex;
//! use handlens_engine::record::HandRecord;
//! use handlens_engine::reconstruct::{reconstruct, Cursor, PotScope};
//! use handlens_engine::summary::summarize_at;
//!
//! let payload = r#"{
//!     "rounds": {"0": {"action_sequence": [
//!         {"player": 0, "action": "RAISE", "amount": 20, "timestamp": 1},
//!         {"player": 1, "action": "FOLD", "amount": 0, "timestamp": 2}
//!     ]}},
//!     "playerNames": {"0": "player1", "1": "player2"},
//!     "finalBoard": ["As", "Kd", "7c", "2h", "9s"],
//!     "playerMoney": {
//!         "startingMoney": {"1": 10000, "2": 10000},
//!         "finalMoney": {"1": 10010, "2": 9990}
//!     }
//! }"#;
//!
//! let record = HandRecord::from_json(payload).expect("valid record");
//! let end = reconstruct(&record, Cursor::action(1), PotScope::Round);
//! assert!(end.players[&SeatIndex(1)].folded);
//!
//! let summary = summarize_at(&record, &end).expect("cursor is at the end");
//! assert_eq!(summary.winners[0].name, "0");
//! ```

pub mod board;
pub mod cards;
pub mod errors;
pub mod player_id;
pub mod reconstruct;
pub mod record;
pub mod summary;
pub mod validation;
