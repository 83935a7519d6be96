//! Detector replay through the app state, end to end.

use std::time::Duration;

use hand_gesture::{detection_line, synthetic, GestureThresholds, GestureType};
use sword_swarm::SwarmConfig;
use sword_viz::app::{run_headless, AppConfig, AppState};
use sword_viz::source::{spawn_hand_source, DetectorInput, DetectorSource, TrackingEvent};

fn write_session(name: &str, lines: &[String]) -> std::path::PathBuf {
    let path = std::env::temp_dir().join(format!("{name}_{}.jsonl", std::process::id()));
    std::fs::write(&path, lines.join("\n")).unwrap();
    path
}

fn small_config() -> AppConfig {
    AppConfig {
        swarm: SwarmConfig::default().with_sword_count(20).with_seed(8),
        ..AppConfig::default()
    }
}

#[test]
fn replayed_session_drives_the_formation() {
    let palm  = synthetic::pose(GestureType::OpenPalm, 0.4, 0.7);
    let point = synthetic::pose(GestureType::Pointing, 0.4, 0.7);
    let path = write_session("replay_formations", &[
        detection_line(&[palm]).unwrap(),
        r#"{"hands":[{"landmarks":[{"x":0.1,"y":0.1}]}]}"#.to_string(),
        detection_line(&[point]).unwrap(),
    ]);

    let rx = spawn_hand_source(DetectorSource {
        input: DetectorInput::Replay { path: path.clone(), pace: Duration::ZERO },
        thresholds: GestureThresholds::default(),
    });
    let events: Vec<TrackingEvent> = rx.iter().collect();
    std::fs::remove_file(&path).ok();

    // Three lines plus the closing empty frame.
    assert_eq!(events.len(), 4);

    let mut app = AppState::new(&small_config()).unwrap();
    let mut formations = Vec::new();
    for event in events {
        assert!(app.handle_event(event));
        app.tick();
        formations.push(app.swarm().formation().name());
    }
    assert_eq!(formations, ["defensive circle", "idle orbit", "focused beam", "idle orbit"]);
}

#[test]
fn headless_replay_reports_to_the_last_frame() {
    let fists = [
        synthetic::pose(GestureType::Fist, 0.3, 0.5),
        synthetic::pose(GestureType::Fist, 0.7, 0.5),
    ];
    let lines: Vec<String> = (0..10).map(|_| detection_line(&fists).unwrap()).collect();
    let path = write_session("replay_headless", &lines);

    let cfg = AppConfig { replay: Some(path.clone()), replay_fps: 1000.0, ..small_config() };
    let reports = run_headless(&cfg, 90).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(reports.len(), 2);
    assert_eq!(reports[1].frame, 90);
    assert!(reports.iter().all(|r| r.mean_target_distance.is_finite()));
}

#[test]
fn finished_replay_leaves_no_hands() {
    let fist = synthetic::pose(GestureType::Fist, 0.5, 0.5);
    let path = write_session("replay_closed", &[detection_line(&[fist]).unwrap()]);

    let rx = spawn_hand_source(DetectorSource {
        input: DetectorInput::Replay { path: path.clone(), pace: Duration::ZERO },
        thresholds: GestureThresholds::default(),
    });
    let mut app = AppState::new(&small_config()).unwrap();
    while app.source_open() {
        assert!(app.drain(&rx));
        std::thread::sleep(Duration::from_millis(1));
    }
    std::fs::remove_file(&path).ok();

    assert!(app.tracking_active());
    assert!(app.hands().is_empty());
    app.tick();
    assert_eq!(app.swarm().formation().name(), "idle orbit");
}
