use handlens_analytics::highlights::{
    Detector, DetectorThresholds, Heuristic, Reason, ReasonKind, Window,
};
use handlens_analytics::series::JobScores;
use handlens_analytics::stats::aggregate;

fn job(payload: &str) -> JobScores {
    JobScores::from_json(payload).expect("valid series")
}

#[test]
fn ranks_the_swingiest_iterations_first() {
    let scores = job(r#"{
        "alice": [100, 100, 300, 100, 100],
        "bob":   [100, 100,  60, 250, 250],
        "carol": [100, 100,  40,  50,  50]
    }"#);
    let highlights = Detector::default().detect(&aggregate(&scores));

    assert_eq!(highlights.len(), 2);
    assert_eq!(highlights[0].iteration, 4);
    assert_eq!(highlights[1].iteration, 3);

    let kinds: Vec<&ReasonKind> = highlights[0].reasons.iter().map(|r| &r.kind).collect();
    assert_eq!(
        kinds,
        vec![&ReasonKind::Breakthrough, &ReasonKind::LeadershipChange]
    );
    assert!(highlights[0].reasons[1].description.starts_with("bob took the lead from alice"));

    let kinds: Vec<&ReasonKind> = highlights[1].reasons.iter().map(|r| &r.kind).collect();
    assert_eq!(
        kinds,
        vec![&ReasonKind::Breakthrough, &ReasonKind::UnderdogComeback]
    );
    assert!((highlights[1].total_significance - 3.5).abs() < 1e-9);
}

#[test]
fn output_is_capped_and_sorted() {
    let alice: Vec<String> = (0..40)
        .map(|i| if i % 2 == 0 { "10".to_string() } else { format!("{}", 1000 + i) })
        .collect();
    let payload = format!(
        r#"{{"alice": [{}], "bob": [{}]}}"#,
        alice.join(","),
        vec!["10"; 40].join(",")
    );
    let highlights = Detector::default().detect(&aggregate(&job(&payload)));

    assert_eq!(highlights.len(), 10);
    for pair in highlights.windows(2) {
        assert!(pair[0].total_significance >= pair[1].total_significance);
    }
}

#[test]
fn max_highlights_is_configurable() {
    let thresholds = DetectorThresholds {
        max_highlights: 1,
        ..DetectorThresholds::default()
    };
    let scores = job(r#"{
        "alice": [100, 100, 300, 100, 100],
        "bob":   [100, 100,  60, 250, 250],
        "carol": [100, 100,  40,  50,  50]
    }"#);
    let highlights = Detector::new(thresholds)
        .unwrap()
        .detect(&aggregate(&scores));
    assert_eq!(highlights.len(), 1);
    assert_eq!(highlights[0].iteration, 4);
}

#[test]
fn unequal_and_empty_series_are_tolerated() {
    let scores = job(r#"{
        "alice": [100, 400, 20, 500, 10, 900],
        "bob": [100],
        "carol": [],
        "dave": [50, 10, 600]
    }"#);
    let stats = aggregate(&scores);
    assert_eq!(stats.len(), 6);
    let highlights = Detector::default().detect(&stats);
    assert!(highlights.len() <= 10);
    assert!(highlights.iter().all(|h| h.iteration > 1 && h.iteration < 6));
}

#[test]
fn too_short_jobs_have_no_interior() {
    let scores = job(r#"{"alice": [1, 1000], "bob": [1000, 1]}"#);
    assert!(Detector::default().detect(&aggregate(&scores)).is_empty());
    assert!(Detector::default().detect(&[]).is_empty());
}

struct EveryGate;

impl Heuristic for EveryGate {
    fn name(&self) -> &str {
        "every_gate"
    }

    fn evaluate(&self, window: &Window<'_>, _: &DetectorThresholds) -> Vec<Reason> {
        vec![Reason {
            kind: ReasonKind::Custom("gate".into()),
            significance: 0.25,
            description: format!("mean moved to {}", window.current.mean),
        }]
    }
}

#[test]
fn registered_heuristics_add_reasons() {
    // Mean rises 35% at iteration 2 but nobody swings past the built-in thresholds.
    let scores = job(r#"{"alice": [1000, 1350, 1350], "bob": [1000, 1350, 1350]}"#);
    let stats = aggregate(&scores);
    assert!(Detector::default().detect(&stats).is_empty());

    let detector = Detector::default().with_heuristic(Box::new(EveryGate));
    let highlights = detector.detect(&stats);
    assert_eq!(highlights.len(), 1);
    assert_eq!(highlights[0].iteration, 2);
    assert_eq!(highlights[0].reasons[0].kind, ReasonKind::Custom("gate".into()));
    assert_eq!(highlights[0].total_significance, 0.25);
}

#[test]
fn equal_totals_keep_iteration_order() {
    let scores = job(r#"{"solo": [10, 100, 10, 100, 10, 100]}"#);
    let highlights = Detector::default().detect(&aggregate(&scores));
    let iterations: Vec<usize> = highlights.iter().map(|h| h.iteration).collect();
    assert_eq!(iterations, vec![2, 4, 3, 5]);
    assert_eq!(highlights[2].reasons[0].kind, ReasonKind::Collapse);
    assert_eq!(
        highlights[2].reasons[0].description,
        "solo dropped from 100 to 10 (-90)"
    );
}

#[test]
fn falling_negative_mean_stays_below_the_gate() {
    let scores = job(r#"{"a": [-100, -150, -150], "b": [-100, -150, -150]}"#);
    let stats = aggregate(&scores);
    assert_eq!(stats[1].mean, -150.0);
    assert_eq!(stats[1].variance, 0.0);
    assert!(Detector::default().detect(&stats).is_empty());
}
