use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::cards::Card;
use crate::errors::RecordError;
use crate::player_id::{PlayerId, SeatIndex};
use crate::validation::validate_shape;

/// Money assumed for a player when the record's money tables have no entry.
pub const DEFAULT_MONEY: i64 = 10_000;

/// Represents a betting street in Texas Hold'em poker.
/// Defines the four stages of a poker hand.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Street {
    /// Before flop (hole cards dealt)
    Preflop,
    /// After flop (3 community cards)
    Flop,
    /// After turn (4th community card)
    Turn,
    /// After river (5th community card)
    River,
}

impl Street {
    /// Maps a round index to its street; indices past the river stay on the river.
    pub fn from_round_index(index: usize) -> Street {
        match index {
            0 => Street::Preflop,
            1 => Street::Flop,
            2 => Street::Turn,
            _ => Street::River,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Street::Preflop => "Preflop",
            Street::Flop => "Flop",
            Street::Turn => "Turn",
            Street::River => "River",
        }
    }
}

/// The action token recorded for a single betting decision.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    #[serde(rename = "FOLD")]
    Fold,
    #[serde(rename = "CHECK")]
    Check,
    #[serde(rename = "CALL")]
    Call,
    #[serde(rename = "BET")]
    Bet,
    #[serde(rename = "RAISE")]
    Raise,
    #[serde(rename = "ALL-IN", alias = "ALL_IN", alias = "ALL IN")]
    AllIn,
}

impl ActionKind {
    /// Whether the action's amount leaves the player's stack.
    pub fn commits_chips(self) -> bool {
        matches!(
            self,
            ActionKind::Call | ActionKind::Bet | ActionKind::Raise | ActionKind::AllIn
        )
    }

    pub fn token(self) -> &'static str {
        match self {
            ActionKind::Fold => "FOLD",
            ActionKind::Check => "CHECK",
            ActionKind::Call => "CALL",
            ActionKind::Bet => "BET",
            ActionKind::Raise => "RAISE",
            ActionKind::AllIn => "ALL-IN",
        }
    }
}

/// A pot snapshot taken by the recording engine after an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SidePot {
    /// Only cumulative pots carry an id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
    #[serde(default)]
    pub amount: u64,
    /// Raw seat indices of the players who can win this pot
    #[serde(default, alias = "eligible_players")]
    pub eligible_players: Vec<SeatIndex>,
}

/// One recorded betting decision, with the pot state the engine computed right after it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionEvent {
    pub player: SeatIndex,
    pub action: ActionKind,
    #[serde(default)]
    pub amount: u64,
    #[serde(default)]
    pub timestamp: u64,
    /// Pot of the current round after this action
    #[serde(default, alias = "pot_after_action")]
    pub pot_after_action: u64,
    #[serde(default, alias = "side_pots_after_action")]
    pub side_pots_after_action: Vec<SidePot>,
    /// Pot accumulated across all rounds so far
    #[serde(default, alias = "total_pot_after_action")]
    pub total_pot_after_action: u64,
    #[serde(default, alias = "total_side_pots_after_action")]
    pub total_side_pots_after_action: Vec<SidePot>,
}

impl ActionEvent {
    /// Identity used to locate an action among the rounds.
    pub fn triple(&self) -> (u64, SeatIndex, ActionKind) {
        (self.timestamp, self.player, self.action)
    }
}

/// One betting round (street) of a recorded hand.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Round {
    #[serde(default)]
    pub pot: u64,
    /// Amount each seat wagered during this round
    #[serde(default)]
    pub bets: BTreeMap<SeatIndex, u64>,
    #[serde(default, alias = "action_sequence")]
    pub action_sequence: Vec<ActionEvent>,
    /// Last action token per seat, kept from older record versions
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub actions: BTreeMap<SeatIndex, String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub action_times: BTreeMap<SeatIndex, f64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blinds {
    #[serde(default)]
    pub small: u64,
    #[serde(default)]
    pub big: u64,
}

/// Money bookkeeping attached by the engine. Every table is keyed by [`PlayerId`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerMoney {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_amount: Option<i64>,
    #[serde(default)]
    pub starting_money: BTreeMap<PlayerId, i64>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub starting_delta: BTreeMap<PlayerId, i64>,
    #[serde(default)]
    pub final_money: BTreeMap<PlayerId, i64>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub final_delta: BTreeMap<PlayerId, i64>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub game_scores: BTreeMap<PlayerId, i64>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub this_game_delta: BTreeMap<PlayerId, i64>,
}

impl PlayerMoney {
    pub fn starting_for(&self, seat: SeatIndex) -> i64 {
        self.starting_money
            .get(&seat.player_id())
            .copied()
            .unwrap_or(DEFAULT_MONEY)
    }

    pub fn final_for(&self, seat: SeatIndex) -> i64 {
        self.final_money
            .get(&seat.player_id())
            .copied()
            .unwrap_or(DEFAULT_MONEY)
    }

    pub fn has_starting_for(&self, seat: SeatIndex) -> bool {
        self.starting_money.contains_key(&seat.player_id())
    }
}

/// Complete record of one played hand as written by the poker engine.
///
/// Created once when the record is fetched or uploaded and never modified afterwards;
/// every view over it is derived on demand.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_id: Option<String>,
    /// Rounds keyed by index; ascending key order is chronological
    #[serde(default)]
    pub rounds: BTreeMap<u8, Round>,
    #[serde(default)]
    pub player_names: BTreeMap<SeatIndex, String>,
    #[serde(default)]
    pub player_hands: BTreeMap<SeatIndex, Vec<Card>>,
    #[serde(default)]
    pub final_board: Vec<Card>,
    #[serde(default)]
    pub blinds: Blinds,
    #[serde(default)]
    pub player_id_to_username: BTreeMap<PlayerId, String>,
    #[serde(default)]
    pub player_money: PlayerMoney,
    /// Pot table at the end of the hand
    #[serde(default)]
    pub side_pots: Vec<SidePot>,
}

impl HandRecord {
    /// Decodes an uploaded or retrieved record, rejecting payloads without the minimal
    /// hand shape before any field is decoded.
    pub fn from_json(payload: &str) -> Result<Self, RecordError> {
        let value: serde_json::Value = serde_json::from_str(payload)?;
        Self::from_value(value)
    }

    pub fn from_value(value: serde_json::Value) -> Result<Self, RecordError> {
        validate_shape(&value)?;
        Ok(serde_json::from_value(value)?)
    }

    /// Every seat that takes part in the hand: named seats plus any seat seen acting.
    pub fn seats(&self) -> Vec<SeatIndex> {
        let mut seats: BTreeSet<SeatIndex> = self.player_names.keys().copied().collect();
        for round in self.rounds.values() {
            seats.extend(round.action_sequence.iter().map(|a| a.player));
        }
        seats.into_iter().collect()
    }

    /// Rounds in chronological order together with their round index.
    pub fn ordered_rounds(&self) -> impl Iterator<Item = (usize, &Round)> {
        self.rounds.iter().map(|(k, r)| (usize::from(*k), r))
    }

    pub fn action_count(&self) -> usize {
        self.rounds.values().map(|r| r.action_sequence.len()).sum()
    }

    /// Username for a seat, falling back to the raw seat index.
    pub fn display_name(&self, seat: SeatIndex) -> String {
        self.player_id_to_username
            .get(&seat.player_id())
            .cloned()
            .unwrap_or_else(|| seat.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_tokens_accept_engine_spellings() {
        for token in ["\"ALL-IN\"", "\"ALL_IN\"", "\"ALL IN\""] {
            let kind: ActionKind = serde_json::from_str(token).unwrap();
            assert_eq!(kind, ActionKind::AllIn);
        }
        assert_eq!(
            serde_json::to_string(&ActionKind::AllIn).unwrap(),
            "\"ALL-IN\""
        );
        assert!(serde_json::from_str::<ActionKind>("\"fold\"").is_err());
    }

    #[test]
    fn only_wagering_actions_commit_chips() {
        assert!(!ActionKind::Fold.commits_chips());
        assert!(!ActionKind::Check.commits_chips());
        assert!(ActionKind::Call.commits_chips());
        assert!(ActionKind::Bet.commits_chips());
        assert!(ActionKind::Raise.commits_chips());
        assert!(ActionKind::AllIn.commits_chips());
    }

    #[test]
    fn action_event_reads_snake_case_engine_keys() {
        let json = r#"{
            "player": 1,
            "action": "CALL",
            "amount": 20,
            "timestamp": 1754700000001,
            "pot_after_action": 40,
            "side_pots_after_action": [{"amount": 40, "eligible_players": [0, 1]}],
            "total_pot_after_action": 40,
            "total_side_pots_after_action": [{"id": 0, "amount": 40, "eligible_players": [0, 1]}]
        }"#;
        let event: ActionEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.player, SeatIndex(1));
        assert_eq!(event.pot_after_action, 40);
        assert_eq!(event.side_pots_after_action[0].eligible_players.len(), 2);
        assert_eq!(event.total_side_pots_after_action[0].id, Some(0));
    }

    #[test]
    fn money_lookups_default_when_absent() {
        let mut money = PlayerMoney::default();
        money.starting_money.insert(PlayerId(1), 9_500);
        assert_eq!(money.starting_for(SeatIndex(0)), 9_500);
        assert_eq!(money.starting_for(SeatIndex(1)), DEFAULT_MONEY);
        assert_eq!(money.final_for(SeatIndex(0)), DEFAULT_MONEY);
    }

    #[test]
    fn display_name_falls_back_to_raw_seat() {
        let mut record = HandRecord::default();
        record
            .player_id_to_username
            .insert(PlayerId(1), "alice".to_string());
        assert_eq!(record.display_name(SeatIndex(0)), "alice");
        assert_eq!(record.display_name(SeatIndex(3)), "3");
    }

    #[test]
    fn street_saturates_at_river() {
        assert_eq!(Street::from_round_index(0), Street::Preflop);
        assert_eq!(Street::from_round_index(3), Street::River);
        assert_eq!(Street::from_round_index(9), Street::River);
    }
}
