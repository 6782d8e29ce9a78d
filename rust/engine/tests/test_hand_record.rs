use handlens_engine::cards::{Card, Rank, Suit};
use handlens_engine::errors::RecordError;
use handlens_engine::player_id::{PlayerId, SeatIndex};
use handlens_engine::record::{ActionKind, HandRecord};
use handlens_engine::reconstruct::{reconstruct, Cursor, PotScope};
use handlens_engine::summary::{summarize, summarize_at};

const THREE_WAY: &str = include_str!("fixtures/three_way_all_in.json");

#[test]
fn engine_log_decodes_with_snake_case_keys() {
    let record = HandRecord::from_json(THREE_WAY).expect("fixture parses");
    assert_eq!(record.rounds.len(), 4);
    assert_eq!(record.action_count(), 6);
    assert_eq!(record.rounds[&0].action_sequence[2].action, ActionKind::AllIn);
    assert_eq!(record.rounds[&0].bets[&SeatIndex(2)], 30);
    assert_eq!(record.blinds.big, 20);
    assert_eq!(
        record.final_board[0],
        Card {
            rank: Rank::Ace,
            suit: Suit::Spades
        }
    );
    assert_eq!(record.player_hands[&SeatIndex(2)].len(), 2);
    assert_eq!(record.player_money.initial_amount, Some(10_000));
    assert_eq!(record.player_money.starting_money[&PlayerId(3)], 30);
    assert_eq!(record.side_pots.len(), 2);
}

#[test]
fn record_survives_serialization() {
    let record = HandRecord::from_json(THREE_WAY).unwrap();
    let text = serde_json::to_string(&record).unwrap();
    assert!(text.contains("\"ALL-IN\""));
    assert!(text.contains("\"actionSequence\""));
    let back = HandRecord::from_json(&text).unwrap();
    assert_eq!(back, record);
}

#[test]
fn invalid_shape_is_reported_as_invalid_game_data() {
    let payload = r#"{"rounds": {}, "playerNames": {"0": "solo"}, "finalBoard": []}"#;
    let err = HandRecord::from_json(payload).unwrap_err();
    assert!(err.is_invalid_game_data());
    assert!(err.to_string().starts_with("Invalid game data"));
}

#[test]
fn bad_field_types_are_malformed_not_invalid() {
    let payload = r#"{
        "rounds": {"0": {"action_sequence": [{"player": 0, "action": "SHOVE"}]}},
        "playerNames": {"0": "a", "1": "b"},
        "finalBoard": ["As", "Kd", "7c", "2h", "9s"]
    }"#;
    let err = HandRecord::from_json(payload).unwrap_err();
    assert!(matches!(err, RecordError::Malformed(_)));
}

#[test]
fn syntax_errors_are_malformed() {
    let err = HandRecord::from_json("{not json").unwrap_err();
    assert!(matches!(err, RecordError::Malformed(_)));
}

#[test]
fn summary_at_final_cursor_reproduces_final_money() {
    let record = HandRecord::from_json(THREE_WAY).unwrap();
    let end = reconstruct(&record, Cursor::round(3), PotScope::Total);
    let summary = summarize_at(&record, &end).expect("final cursor");

    for entry in summary.winners.iter().chain(summary.losers.iter()) {
        assert_eq!(
            entry.final_money,
            record.player_money.final_money[&entry.player_id]
        );
        assert_eq!(entry.delta, entry.final_money - entry.starting_money);
    }
    assert_eq!(summary.winners.len(), 1);
    assert_eq!(summary.winners[0].name, "alice");
    assert_eq!(summary.losers.len(), 2);
}

#[test]
fn chips_are_conserved_without_rake() {
    let record = HandRecord::from_json(THREE_WAY).unwrap();
    let summary = summarize(&record);
    let total: i64 = summary
        .winners
        .iter()
        .chain(summary.losers.iter())
        .map(|e| e.delta)
        .sum();
    assert_eq!(total, 0);
    assert!(summary.is_conserved());
}

#[test]
fn no_summary_before_the_end() {
    let record = HandRecord::from_json(THREE_WAY).unwrap();
    let mid = reconstruct(&record, Cursor::action(2), PotScope::Round);
    assert!(summarize_at(&record, &mid).is_none());
}
