//! Winner / loser partition at the end of a hand.

use serde::Serialize;

use crate::player_id::{PlayerId, SeatIndex};
use crate::reconstruct::HandSnapshot;
use crate::record::HandRecord;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerDelta {
    pub seat: SeatIndex,
    pub player_id: PlayerId,
    pub name: String,
    pub starting_money: i64,
    pub final_money: i64,
    pub delta: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HandSummary {
    /// Players who finished above their starting money
    pub winners: Vec<PlayerDelta>,
    /// Players who finished below their starting money
    pub losers: Vec<PlayerDelta>,
    /// Sum of every player's delta; zero when chips are conserved
    pub net: i64,
}

impl HandSummary {
    pub fn is_conserved(&self) -> bool {
        self.net == 0
    }
}

/// Compares final against starting money for every seat of the hand.
/// Players who broke even appear in neither list.
pub fn summarize(record: &HandRecord) -> HandSummary {
    let mut summary = HandSummary::default();
    for seat in record.seats() {
        let starting_money = record.player_money.starting_for(seat);
        let final_money = record.player_money.final_for(seat);
        let entry = PlayerDelta {
            seat,
            player_id: seat.player_id(),
            name: record.display_name(seat),
            starting_money,
            final_money,
            delta: final_money - starting_money,
        };
        summary.net += entry.delta;
        if entry.delta > 0 {
            summary.winners.push(entry);
        } else if entry.delta < 0 {
            summary.losers.push(entry);
        }
    }
    summary
}

/// Summary for a snapshot, present only once the cursor has reached the end of its mode.
pub fn summarize_at(record: &HandRecord, snapshot: &HandSnapshot) -> Option<HandSummary> {
    snapshot.is_game_end.then(|| summarize(record))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_with(starting: &[(usize, i64)], finals: &[(usize, i64)]) -> HandRecord {
        let mut record = HandRecord::default();
        for (id, money) in starting {
            record
                .player_names
                .insert(SeatIndex(id - 1), format!("player{}", id));
            record.player_money.starting_money.insert(PlayerId(*id), *money);
        }
        for (id, money) in finals {
            record.player_money.final_money.insert(PlayerId(*id), *money);
        }
        record
    }

    #[test]
    fn partitions_by_sign_of_delta() {
        let record = record_with(
            &[(1, 10_000), (2, 10_000), (3, 10_000)],
            &[(1, 10_300), (2, 9_700), (3, 10_000)],
        );
        let summary = summarize(&record);
        assert_eq!(summary.winners.len(), 1);
        assert_eq!(summary.winners[0].seat, SeatIndex(0));
        assert_eq!(summary.winners[0].delta, 300);
        assert_eq!(summary.losers.len(), 1);
        assert_eq!(summary.losers[0].player_id, PlayerId(2));
        assert!(summary.is_conserved());
    }

    #[test]
    fn missing_money_defaults_to_break_even() {
        let record = record_with(&[(1, 10_000), (2, 10_000)], &[(1, 10_000)]);
        let summary = summarize(&record);
        assert!(summary.winners.is_empty());
        assert!(summary.losers.is_empty());
    }
}
