use handlens_analytics::highlights::{
    Detector, DetectorThresholds, Heuristic, Reason, ReasonKind, Window,
};
use handlens_analytics::series::JobScores;
use handlens_engine::player_id::SeatIndex;
use handlens_engine::record::HandRecord;
use handlens_engine::reconstruct::{Cursor, CursorMode, PotScope};
use handlens_viewer::{
    FetchError, HandViewer, JobViewer, LoadOutcome, SessionError, TestLogSubscriber,
    ViewerSettings,
};
use tracing::Level;

const THREE_WAY: &str = include_str!("../../engine/tests/fixtures/three_way_all_in.json");

const JOB: &str = r#"{
    "alice": [100, 100, 300, 100, 100],
    "bob":   [100, 100,  60, 250, 250],
    "carol": [100, 100,  40,  50,  50]
}"#;

fn three_way() -> HandRecord {
    HandRecord::from_json(THREE_WAY).expect("fixture parses")
}

fn hand_viewer() -> HandViewer {
    HandViewer::new(ViewerSettings::default()).expect("default settings")
}

#[test]
fn stale_hand_load_never_overwrites_newer_one() {
    let mut viewer = hand_viewer();
    let slow = viewer.begin_load();
    let fast = viewer.begin_load();

    let mut newer = three_way();
    newer.game_id = Some("newer".into());
    assert_eq!(
        viewer.complete_load(fast, Ok(newer)).unwrap(),
        LoadOutcome::Applied
    );

    let mut older = three_way();
    older.game_id = Some("older".into());
    assert_eq!(
        viewer.complete_load(slow, Ok(older)).unwrap(),
        LoadOutcome::Stale
    );
    assert_eq!(viewer.record().unwrap().game_id.as_deref(), Some("newer"));
}

#[test]
fn stale_errors_are_dropped_too() {
    let mut viewer = hand_viewer();
    let slow = viewer.begin_load();
    let fast = viewer.begin_load();
    viewer.complete_load(fast, Ok(three_way())).unwrap();

    let outcome = viewer
        .complete_load(slow, Err(FetchError::from_status(404, "hand 7")))
        .unwrap();
    assert_eq!(outcome, LoadOutcome::Stale);
    assert!(viewer.snapshot().is_ok());
}

#[test]
fn failed_current_load_reports_fetch_class() {
    let mut viewer = hand_viewer();
    let ticket = viewer.begin_load();
    let err = viewer
        .complete_load(ticket, Err(FetchError::from_status(403, "private hand")))
        .unwrap_err();
    match err {
        SessionError::Fetch(FetchError::AccessDenied(message)) => {
            assert_eq!(message, "private hand")
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert!(matches!(viewer.snapshot(), Err(SessionError::NothingLoaded)));
}

#[test]
fn invalid_upload_is_invalid_game_data() {
    let mut viewer = hand_viewer();
    let err = viewer
        .load_json(r#"{"rounds": {}, "playerNames": {}, "finalBoard": []}"#)
        .unwrap_err();
    match err {
        SessionError::Fetch(fetch) => assert_eq!(fetch.error_code(), "invalid_game_data"),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn switching_modes_keeps_the_point_of_the_hand() {
    let mut viewer = hand_viewer();
    viewer.load_json(THREE_WAY).unwrap();
    viewer.jump_to(4).unwrap();
    let before = viewer.snapshot().unwrap();

    assert_eq!(viewer.set_mode(CursorMode::Round), Cursor::round(1));
    let by_round = viewer.snapshot().unwrap();
    assert_eq!(by_round.players, before.players);
    assert_eq!(by_round.board, before.board);

    assert_eq!(viewer.set_mode(CursorMode::Action), Cursor::action(4));
}

#[test]
fn summary_only_at_game_end() {
    let mut viewer = hand_viewer();
    viewer.load_json(THREE_WAY).unwrap();
    assert!(viewer.summary().unwrap().is_none());

    viewer.jump_to_end().unwrap();
    let summary = viewer.summary().unwrap().expect("at end");
    assert_eq!(summary.winners.len(), 1);
    assert_eq!(summary.winners[0].seat, SeatIndex(0));
    assert_eq!(summary.winners[0].delta, 70);
    assert!(summary.is_conserved());
}

#[test]
fn pot_scope_changes_the_reported_pot() {
    let mut viewer = hand_viewer();
    viewer.load_json(THREE_WAY).unwrap();
    viewer.jump_to(4).unwrap();
    let round_pot = viewer.snapshot().unwrap().pot;

    viewer.set_pot_scope(PotScope::Total);
    assert_eq!(viewer.pot_scope(), PotScope::Total);
    let total_pot = viewer.snapshot().unwrap().pot;
    assert!(total_pot > round_pot);
}

#[test]
fn load_is_logged_with_session_id() {
    let subscriber = TestLogSubscriber::new();
    let mut viewer = hand_viewer();

    tracing::subscriber::with_default(subscriber.registry(), || {
        let stale = viewer.begin_load();
        viewer.load_json(THREE_WAY).unwrap();
        viewer.complete_load(stale, Ok(three_way())).unwrap();
    });

    let loaded = subscriber.matching("hand loaded");
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].level, Level::INFO);
    assert_eq!(loaded[0].field("session_id"), Some(viewer.id()));
    assert_eq!(loaded[0].field("generation"), Some("2"));

    let stale = subscriber.matching("discarding stale hand load");
    assert_eq!(stale.len(), 1);
    assert_eq!(stale[0].level, Level::DEBUG);
}

#[test]
fn sessions_have_distinct_ids() {
    assert_ne!(hand_viewer().id(), hand_viewer().id());
}

#[test]
fn job_viewer_computes_stats_and_highlights() {
    let mut viewer = JobViewer::new(ViewerSettings::default()).unwrap();
    viewer.load_json(JOB).unwrap();

    let stats = viewer.iteration_stats().unwrap();
    assert_eq!(stats.len(), 5);
    assert_eq!(stats[0].variance, 0.0);

    let highlights = viewer.highlights().unwrap();
    let iterations: Vec<usize> = highlights.iter().map(|h| h.iteration).collect();
    assert_eq!(iterations, vec![4, 3]);
}

#[test]
fn job_chart_follows_bucket_and_zoom() {
    let mut viewer = JobViewer::new(ViewerSettings::default()).unwrap();
    viewer.load_json(JOB).unwrap();

    let chart = viewer.chart().unwrap();
    assert_eq!(chart["alice"], vec![0.0, 100.0, 100.0, 300.0, 100.0, 100.0]);

    viewer.set_bucket_size(2).unwrap();
    let chart = viewer.chart().unwrap();
    assert_eq!(chart["bob"], vec![0.0, 100.0, 155.0, 250.0]);

    viewer.set_zoom(2..4);
    let chart = viewer.chart().unwrap();
    assert_eq!(chart["carol"], vec![0.0, 45.0]);

    viewer.clear_zoom();
    assert_eq!(viewer.chart().unwrap()["carol"].len(), 4);
    // Chart changes never touch the analysed data.
    assert_eq!(viewer.iteration_stats().unwrap().len(), 5);
}

#[test]
fn stale_job_load_is_discarded() {
    let mut viewer = JobViewer::new(ViewerSettings::default()).unwrap();
    let slow = viewer.begin_load();
    let fast = viewer.begin_load();
    viewer
        .complete_load(fast, Ok(JobScores::from_json(JOB).unwrap()))
        .unwrap();

    let other: JobScores = [("zed", vec![1.0, 2.0])].into_iter().collect();
    assert_eq!(
        viewer.complete_load(slow, Ok(other)).unwrap(),
        LoadOutcome::Stale
    );
    assert!(viewer.scores().unwrap().series.contains_key("alice"));
}

#[test]
fn highlight_count_caps_job_highlights() {
    let settings = ViewerSettings {
        highlight_count: 1,
        ..ViewerSettings::default()
    };
    let mut viewer = JobViewer::new(settings).unwrap();
    viewer.load_json(JOB).unwrap();
    assert_eq!(viewer.highlights().unwrap().len(), 1);
}

struct Marker;

impl Heuristic for Marker {
    fn name(&self) -> &str {
        "marker"
    }

    fn evaluate(&self, _: &Window<'_>, _: &DetectorThresholds) -> Vec<Reason> {
        vec![Reason {
            kind: ReasonKind::Custom("marker".into()),
            significance: 10.0,
            description: "marked".into(),
        }]
    }
}

#[test]
fn job_viewer_uses_the_supplied_detector() {
    let detector = Detector::default().with_heuristic(Box::new(Marker));
    let mut viewer = JobViewer::new(ViewerSettings::default())
        .unwrap()
        .with_detector(detector);
    viewer.load_json(JOB).unwrap();

    let highlights = viewer.highlights().unwrap();
    assert_eq!(highlights.len(), 2);
    assert!(highlights
        .iter()
        .all(|h| h.reasons.last().map(|r| &r.kind) == Some(&ReasonKind::Custom("marker".into()))));
}
