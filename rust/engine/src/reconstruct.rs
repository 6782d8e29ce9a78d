//! Point-in-time hand state derived from the action log.
//!
//! Nothing here stores per-step state. A [`Cursor`] is resolved by its mode's
//! [`CursorStrategy`] into a horizon (how many flattened actions are included) and a
//! round index; [`reconstruct`] then folds the first `horizon` actions into player
//! states. Both modes go through the same fold, so the last action of round `r` under
//! [`CursorMode::Action`] and round `r` under [`CursorMode::Round`] yield the same
//! snapshot.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::board::{round_of_action, visible_cards};
use crate::cards::Card;
use crate::player_id::{PlayerId, SeatIndex};
use crate::record::{ActionEvent, ActionKind, HandRecord, SidePot, Street};

/// Which projection of the log a cursor indexes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CursorMode {
    /// Index into every round's actions concatenated in order
    #[default]
    Action,
    /// Index into the ordered rounds
    Round,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cursor {
    pub mode: CursorMode,
    pub index: usize,
}

impl Cursor {
    pub fn action(index: usize) -> Self {
        Self {
            mode: CursorMode::Action,
            index,
        }
    }

    pub fn round(index: usize) -> Self {
        Self {
            mode: CursorMode::Round,
            index,
        }
    }
}

/// Selects the per-round or the cumulative pot figures recorded with each action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PotScope {
    #[default]
    Round,
    Total,
}

/// The log of a hand flattened into chronological order.
#[derive(Debug)]
pub struct ActionLog<'a> {
    record: &'a HandRecord,
    actions: Vec<&'a ActionEvent>,
    /// (round index, horizon at the end of that round) for each round in order
    round_ends: Vec<(usize, usize)>,
}

impl<'a> ActionLog<'a> {
    pub fn new(record: &'a HandRecord) -> Self {
        let mut actions = Vec::with_capacity(record.action_count());
        let mut round_ends = Vec::with_capacity(record.rounds.len());
        for (index, round) in record.ordered_rounds() {
            actions.extend(round.action_sequence.iter());
            round_ends.push((index, actions.len()));
        }
        Self {
            record,
            actions,
            round_ends,
        }
    }

    pub fn record(&self) -> &'a HandRecord {
        self.record
    }

    pub fn actions(&self) -> &[&'a ActionEvent] {
        &self.actions
    }

    pub fn round_count(&self) -> usize {
        self.round_ends.len()
    }

    /// Last valid cursor index in `mode`. An empty log still has position 0.
    pub fn last_index(&self, mode: CursorMode) -> usize {
        mode.strategy().last_index(self)
    }

    pub fn clamp(&self, cursor: Cursor) -> Cursor {
        Cursor {
            mode: cursor.mode,
            index: cursor.index.min(self.last_index(cursor.mode)),
        }
    }

    pub fn resolve(&self, cursor: Cursor) -> Resolved {
        let cursor = self.clamp(cursor);
        cursor.mode.strategy().resolve(self, cursor.index)
    }

    /// Expresses `cursor` in `mode`, keeping the same point of the hand.
    ///
    /// Action to round lands on the round holding the cursor's action; round to action
    /// lands on the last action played by the end of that round.
    pub fn convert(&self, cursor: Cursor, mode: CursorMode) -> Cursor {
        let cursor = self.clamp(cursor);
        if cursor.mode == mode {
            return cursor;
        }
        let horizon = self.resolve(cursor).horizon;
        match mode {
            CursorMode::Action => Cursor::action(horizon.saturating_sub(1)),
            CursorMode::Round => {
                let position = if horizon == 0 {
                    0
                } else {
                    self.round_ends
                        .iter()
                        .position(|&(_, end)| end >= horizon)
                        .unwrap_or(0)
                };
                Cursor::round(position)
            }
        }
    }
}

/// A cursor reduced to what the fold needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolved {
    /// Number of flattened actions at or before the cursor
    pub horizon: usize,
    /// Round index used for the board reveal
    pub round_index: usize,
}

/// Turns a cursor index into a [`Resolved`] horizon for one projection of the log.
pub trait CursorStrategy {
    fn last_index(&self, log: &ActionLog<'_>) -> usize;
    fn resolve(&self, log: &ActionLog<'_>, index: usize) -> Resolved;
}

pub struct ActionCursor;
pub struct RoundCursor;

impl CursorStrategy for ActionCursor {
    fn last_index(&self, log: &ActionLog<'_>) -> usize {
        log.actions.len().saturating_sub(1)
    }

    fn resolve(&self, log: &ActionLog<'_>, index: usize) -> Resolved {
        match log.actions.get(index) {
            Some(action) => Resolved {
                horizon: index + 1,
                round_index: round_of_action(log.record, action),
            },
            None => Resolved {
                horizon: 0,
                round_index: 0,
            },
        }
    }
}

impl CursorStrategy for RoundCursor {
    fn last_index(&self, log: &ActionLog<'_>) -> usize {
        log.round_ends.len().saturating_sub(1)
    }

    fn resolve(&self, log: &ActionLog<'_>, index: usize) -> Resolved {
        match log.round_ends.get(index) {
            Some(&(round_index, end)) => Resolved {
                horizon: end,
                round_index,
            },
            None => Resolved {
                horizon: 0,
                round_index: 0,
            },
        }
    }
}

impl CursorMode {
    pub fn strategy(self) -> &'static dyn CursorStrategy {
        match self {
            CursorMode::Action => &ActionCursor,
            CursorMode::Round => &RoundCursor,
        }
    }
}

/// Derived state of one player at a cursor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerState {
    pub seat: SeatIndex,
    pub player_id: PlayerId,
    pub name: String,
    pub starting_money: i64,
    /// Chips put in by calls, bets, raises and all-ins so far
    pub committed: u64,
    pub stack: i64,
    pub delta: i64,
    pub folded: bool,
    pub all_in: bool,
}

/// Everything a viewer shows for one cursor position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HandSnapshot {
    /// The cursor after clamping to the log
    pub cursor: Cursor,
    pub pot_scope: PotScope,
    pub horizon: usize,
    pub round_index: usize,
    pub street: Street,
    pub players: BTreeMap<SeatIndex, PlayerState>,
    pub board: Vec<Card>,
    pub pot: u64,
    pub side_pots: Vec<SidePot>,
    /// Latest action at or before the cursor
    pub last_action: Option<ActionEvent>,
    pub is_game_end: bool,
}

impl HandSnapshot {
    pub fn stacks(&self) -> BTreeMap<SeatIndex, i64> {
        self.players
            .iter()
            .map(|(seat, state)| (*seat, state.stack))
            .collect()
    }

    pub fn player(&self, seat: SeatIndex) -> Option<&PlayerState> {
        self.players.get(&seat)
    }
}

/// Derives the hand state at `cursor`.
///
/// Never fails: a record without rounds yields starting stacks, no folds and an empty
/// board; seats missing from the money table start with [`crate::record::DEFAULT_MONEY`].
///
/// # Examples
///
/// ```
/// use handlens_engine::reconstruct::{reconstruct, Cursor, PotScope};
/// use handlens_engine::record::HandRecord;
/// use handlens_engine::player_id::SeatIndex;
///
/// let record: HandRecord = serde_json::from_str(r#"{
///     "rounds": {"0": {"actionSequence": [
///         {"player": 0, "action": "RAISE", "amount": 20, "timestamp": 1},
///         {"player": 1, "action": "CALL", "amount": 20, "timestamp": 2}
///     ]}},
///     "playerNames": {"0": "player1", "1": "player2"},
///     "playerMoney": {"startingMoney": {"1": 10000, "2": 10000}}
/// }"#).unwrap();
///
/// let snapshot = reconstruct(&record, Cursor::action(1), PotScope::Round);
/// assert_eq!(snapshot.stacks()[&SeatIndex(0)], 9980);
/// assert_eq!(snapshot.stacks()[&SeatIndex(1)], 9980);
/// assert!(snapshot.is_game_end);
/// ```
pub fn reconstruct(record: &HandRecord, cursor: Cursor, scope: PotScope) -> HandSnapshot {
    let log = ActionLog::new(record);
    reconstruct_with(&log, cursor, scope)
}

/// Same as [`reconstruct`] over an already flattened log.
pub fn reconstruct_with(log: &ActionLog<'_>, cursor: Cursor, scope: PotScope) -> HandSnapshot {
    let record = log.record();
    let cursor = log.clamp(cursor);
    let Resolved {
        horizon,
        round_index,
    } = log.resolve(cursor);
    let applied = &log.actions()[..horizon];

    let mut players: BTreeMap<SeatIndex, PlayerState> = record
        .seats()
        .into_iter()
        .map(|seat| {
            let starting_money = record.player_money.starting_for(seat);
            let state = PlayerState {
                seat,
                player_id: seat.player_id(),
                name: record.display_name(seat),
                starting_money,
                committed: 0,
                stack: starting_money,
                delta: 0,
                folded: false,
                all_in: false,
            };
            (seat, state)
        })
        .collect();

    let defaulted: Vec<SeatIndex> = players
        .keys()
        .filter(|seat| !record.player_money.has_starting_for(**seat))
        .copied()
        .collect();
    if !defaulted.is_empty() {
        tracing::warn!(
            seats = ?defaulted,
            "no starting money recorded, assuming default"
        );
    }

    for action in applied {
        // seats() covers every acting seat, so the entry always exists
        if let Some(state) = players.get_mut(&action.player) {
            if action.action.commits_chips() {
                state.committed = state.committed.saturating_add(action.amount);
            }
            match action.action {
                ActionKind::Fold => state.folded = true,
                ActionKind::AllIn => state.all_in = true,
                _ => {}
            }
        }
    }
    for state in players.values_mut() {
        let committed = i64::try_from(state.committed).unwrap_or(i64::MAX);
        state.stack = state.starting_money.saturating_sub(committed);
        state.delta = state.stack.saturating_sub(state.starting_money);
    }

    let last_action = applied.last().map(|a| (*a).clone());
    let (pot, side_pots) = match (&last_action, scope) {
        (None, _) => (0, Vec::new()),
        (Some(a), PotScope::Round) => (a.pot_after_action, a.side_pots_after_action.clone()),
        (Some(a), PotScope::Total) => (
            a.total_pot_after_action,
            a.total_side_pots_after_action.clone(),
        ),
    };

    let is_game_end = cursor.index == log.last_index(cursor.mode);

    tracing::debug!(
        mode = ?cursor.mode,
        index = cursor.index,
        horizon,
        round_index,
        is_game_end,
        "reconstructed hand state"
    );

    HandSnapshot {
        cursor,
        pot_scope: scope,
        horizon,
        round_index,
        street: Street::from_round_index(round_index),
        players,
        board: visible_cards(&record.final_board, round_index).to_vec(),
        pot,
        side_pots,
        last_action,
        is_game_end,
    }
}
