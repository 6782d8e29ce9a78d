//! Community card reveal policy.
//!
//! The record only stores the final five-card board; what a viewer may see at a given
//! point is the prefix dealt by the current street.

use crate::cards::Card;
use crate::record::{ActionEvent, HandRecord};

/// Cards visible on pre-flop, flop, turn and river.
pub const REVEAL_COUNTS: [usize; 4] = [0, 3, 4, 5];

/// Number of board cards dealt by `round_index`; rounds past the river show all five.
pub fn reveal_count(round_index: usize) -> usize {
    REVEAL_COUNTS[round_index.min(REVEAL_COUNTS.len() - 1)]
}

/// Visible prefix of `board` at `round_index`.
///
/// A board shorter than the reveal count (the hand ended early) is shown in full.
///
/// ```
/// use handlens_engine::board::visible_cards;
/// use handlens_engine::cards::Card;
///
/// let board: Vec<Card> = ["As", "Kd", "7c", "2h", "9s"]
///     .iter()
///     .map(|c| c.parse().unwrap())
///     .collect();
/// assert!(visible_cards(&board, 0).is_empty());
/// assert_eq!(visible_cards(&board, 1).len(), 3);
/// assert_eq!(visible_cards(&board, 7).len(), 5);
/// ```
pub fn visible_cards(board: &[Card], round_index: usize) -> &[Card] {
    let count = reveal_count(round_index).min(board.len());
    &board[..count]
}

/// Finds the round an action was recorded in by its (timestamp, player, action) triple.
///
/// The first round holding a matching action wins; an action that matches nothing
/// resolves to pre-flop.
pub fn round_of_action(record: &HandRecord, action: &ActionEvent) -> usize {
    let wanted = action.triple();
    let found = record.ordered_rounds().find_map(|(index, round)| {
        round
            .action_sequence
            .iter()
            .any(|a| a.triple() == wanted)
            .then_some(index)
    });
    match found {
        Some(index) => index,
        None => {
            tracing::warn!(
                timestamp = action.timestamp,
                player = %action.player,
                action = action.action.token(),
                "action not found in any round, showing pre-flop board"
            );
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player_id::SeatIndex;
    use crate::record::{ActionKind, Round};

    fn board() -> Vec<Card> {
        ["As", "Kd", "7c", "2h", "9s"]
            .iter()
            .map(|c| c.parse().unwrap())
            .collect()
    }

    fn event(ts: u64, player: usize, action: ActionKind) -> ActionEvent {
        ActionEvent {
            player: SeatIndex(player),
            action,
            amount: 0,
            timestamp: ts,
            pot_after_action: 0,
            side_pots_after_action: vec![],
            total_pot_after_action: 0,
            total_side_pots_after_action: vec![],
        }
    }

    #[test]
    fn reveal_length_follows_street() {
        let board = board();
        for r in 0..10 {
            let expected = [0, 3, 4, 5][r.min(3)];
            assert_eq!(visible_cards(&board, r).len(), expected, "round {}", r);
        }
    }

    #[test]
    fn visibility_never_shrinks() {
        let board = board();
        let mut previous = 0;
        for r in 0..6 {
            let now = visible_cards(&board, r).len();
            assert!(now >= previous);
            previous = now;
        }
    }

    #[test]
    fn short_board_is_shown_whole() {
        let board = board();
        assert_eq!(visible_cards(&board[..3], 3).len(), 3);
    }

    #[test]
    fn resolves_round_by_triple_first_match_wins() {
        let mut record = HandRecord::default();
        record.rounds.insert(
            0,
            Round {
                action_sequence: vec![event(1, 0, ActionKind::Call)],
                ..Round::default()
            },
        );
        record.rounds.insert(
            2,
            Round {
                action_sequence: vec![event(5, 1, ActionKind::Check), event(1, 0, ActionKind::Call)],
                ..Round::default()
            },
        );

        assert_eq!(round_of_action(&record, &event(5, 1, ActionKind::Check)), 2);
        assert_eq!(round_of_action(&record, &event(1, 0, ActionKind::Call)), 0);
        assert_eq!(round_of_action(&record, &event(9, 0, ActionKind::Fold)), 0);
    }
}
