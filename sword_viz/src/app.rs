//! Top-level application state and loops.
//!
//! `AppState` owns the `SwarmState`, the frame clock and the latest hand
//! list.  It consumes `TrackingEvent`s and steps the swarm once per frame;
//! the windowed and headless loops differ only in where the frame goes.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, TryRecvError};
use std::time::Duration;

use anyhow::{Context, Result};
use hand_gesture::{GestureThresholds, GestureType, HandFrame};
use serde::{Deserialize, Serialize};
use sword_swarm::{ConfigError, FrameClock, SwarmConfig, SwarmState, SwordPose};
use tracing::{debug, info};

use crate::hud::HudView;
use crate::scene::{Starfield, DEFAULT_STAR_COUNT};
use crate::source::{
    spawn_hand_source, DetectorInput, DetectorSource, SimHandSource, SimHands, SimInput,
    TrackingEvent,
};
use crate::visualizer::{Visualizer, SIM_LEGEND};

// ════════════════════════════════════════════════════════════════════════════
// AppConfig
// ════════════════════════════════════════════════════════════════════════════

/// Configuration for the full application.  Fixed at startup.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub swarm:      SwarmConfig,
    pub thresholds: GestureThresholds,
    pub width:      usize,
    pub height:     usize,
    pub star_count: usize,
    /// Detector program followed by its arguments, one entry each;
    /// takes precedence over `replay`.
    pub detector:   Option<Vec<String>>,
    /// Recorded detector output to play back.
    pub replay:     Option<PathBuf>,
    /// Lines per second when replaying.
    pub replay_fps: f32,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            swarm:      SwarmConfig::default(),
            thresholds: GestureThresholds::default(),
            width:      1280,
            height:     720,
            star_count: DEFAULT_STAR_COUNT,
            detector:   None,
            replay:     None,
            replay_fps: 30.0,
        }
    }
}

impl AppConfig {
    /// Load from a JSON file.  A missing file gives the defaults; a file that
    /// exists but does not parse is an error.
    pub fn load(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(text) => {
                let cfg = serde_json::from_str(&text)
                    .with_context(|| format!("parsing config {}", path.display()))?;
                info!(path = %path.display(), "loaded configuration");
                Ok(cfg)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!(path = %path.display(), "config file not found, using defaults");
                Ok(AppConfig::default())
            }
            Err(e) => Err(e).with_context(|| format!("reading config {}", path.display())),
        }
    }

    /// The detector or replay input, if one is configured.
    pub fn detector_input(&self) -> Option<DetectorInput> {
        if let Some(argv) = self.detector.as_ref().filter(|a| !a.is_empty()) {
            return Some(DetectorInput::Command(argv.clone()));
        }
        self.replay.as_ref().map(|path| DetectorInput::Replay {
            path: path.clone(),
            pace: Duration::from_secs_f32(1.0 / self.replay_fps.max(1.0)),
        })
    }
}

// ════════════════════════════════════════════════════════════════════════════
// AppState
// ════════════════════════════════════════════════════════════════════════════

pub struct AppState {
    swarm:           SwarmState,
    clock:           FrameClock,
    /// Latest hand list; reused until the source sends another.
    hands:           HandFrame,
    /// A source has delivered at least one frame.
    tracking_active: bool,
    source_open:     bool,
}

impl AppState {
    pub fn new(cfg: &AppConfig) -> Result<Self, ConfigError> {
        Ok(AppState {
            swarm:           SwarmState::new(&cfg.swarm)?,
            clock:           FrameClock::new(cfg.swarm.time_step),
            hands:           HandFrame::empty(),
            tracking_active: false,
            source_open:     true,
        })
    }

    // ── process one TrackingEvent ────────────────────────────────────────

    /// Returns false on [`TrackingEvent::Quit`].
    pub fn handle_event(&mut self, event: TrackingEvent) -> bool {
        match event {
            TrackingEvent::Frame(hands) => {
                if !self.tracking_active {
                    info!("hand tracking active");
                    self.tracking_active = true;
                }
                self.hands = hands;
                true
            }
            TrackingEvent::Quit => false,
        }
    }

    /// Drain everything the source has sent since the last frame.
    /// Returns false when the user quit.
    pub fn drain(&mut self, rx: &Receiver<TrackingEvent>) -> bool {
        loop {
            match rx.try_recv() {
                Ok(event) => {
                    if !self.handle_event(event) { return false; }
                }
                Err(TryRecvError::Empty) => return true,
                Err(TryRecvError::Disconnected) => {
                    self.source_closed();
                    return true;
                }
            }
        }
    }

    fn source_closed(&mut self) {
        if self.source_open {
            // Detector and replay sources end with an empty frame, so this
            // is normally zero.
            info!(hands = self.hands.len(), "hand source closed; keeping the current hands");
            self.source_open = false;
        }
    }

    // ── Per-frame tick ────────────────────────────────────────────────────

    pub fn tick(&mut self) -> &[SwordPose] {
        let t = self.clock.tick();
        self.swarm.step(&self.hands, t)
    }

    // ── Accessors for the render loop ─────────────────────────────────────

    pub fn swarm(&self)           -> &SwarmState  { &self.swarm }
    pub fn hands(&self)           -> &HandFrame   { &self.hands }
    pub fn clock(&self)           -> &FrameClock  { &self.clock }
    pub fn tracking_active(&self) -> bool         { self.tracking_active }
    pub fn source_open(&self)     -> bool         { self.source_open }

    pub fn hud_view<'a>(&'a self, legend: Option<&'a str>) -> HudView<'a> {
        HudView {
            tracking_active: self.tracking_active,
            hands:           &self.hands,
            formation:       self.swarm.formation(),
            swords:          self.swarm.len(),
            legend,
        }
    }

    pub fn report(&self) -> HeadlessReport {
        HeadlessReport {
            frame:                self.clock.frames(),
            formation:            self.swarm.formation().name(),
            mean_target_distance: self.swarm.mean_target_distance(),
            mean_speed:           self.swarm.mean_speed(),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// run(): the windowed application loop
// ════════════════════════════════════════════════════════════════════════════

/// Run the full application.
///
/// This is the entry point called from `main.rs`.  It creates the hand
/// source (detector/replay if configured, LeapMotion with `--features leap`,
/// keyboard simulation otherwise), the visualizer, and drives the
/// event/render loop at ~60 fps.
pub fn run(cfg: AppConfig) -> Result<()> {
    let mut app = AppState::new(&cfg).context("invalid swarm configuration")?;
    let stars = Starfield::new(cfg.star_count, cfg.swarm.seed);

    let (rx, sim_tx) = start_source(&cfg);
    let legend = sim_tx.is_some().then_some(SIM_LEGEND);
    let mut vis = Visualizer::new(cfg.width, cfg.height, stars, sim_tx)?;

    info!(swords = app.swarm().len(), simulating = vis.is_simulating(), "visualizer open");

    while vis.is_open() {
        if !vis.poll_input() { break; }
        if !app.drain(&rx) { break; }

        app.tick();
        let key_light = app.swarm().key_light();
        let poses = app.swarm().poses();
        vis.render(poses, key_light, &app.hud_view(legend));
    }

    info!(frames = app.clock().frames(), "visualizer closed");
    Ok(())
}

/// Spawn the configured hand source.  The sender is returned only for the
/// keyboard simulator, which the window feeds.
fn start_source(cfg: &AppConfig) -> (Receiver<TrackingEvent>, Option<mpsc::Sender<SimInput>>) {
    if let Some(input) = cfg.detector_input() {
        info!(?input, "hand source: detector");
        return (spawn_hand_source(DetectorSource { input, thresholds: cfg.thresholds }), None);
    }

    #[cfg(feature = "leap")]
    {
        info!("hand source: LeapMotion");
        let source = crate::source::LeapHandSource { thresholds: cfg.thresholds };
        return (spawn_hand_source(source), None);
    }

    #[cfg(not(feature = "leap"))]
    {
        info!("hand source: keyboard simulation");
        let (sim_tx, sim_rx) = mpsc::channel::<SimInput>();
        let rx = spawn_hand_source(SimHandSource { rx: sim_rx, thresholds: cfg.thresholds });
        (rx, Some(sim_tx))
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Headless diagnostics
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Debug, PartialEq)]
pub struct HeadlessReport {
    pub frame:                u64,
    pub formation:            &'static str,
    pub mean_target_distance: f32,
    pub mean_speed:           f32,
}

/// Without a detector or hardware the headless run walks the simulated hands
/// through every formation, one equal segment each.
const TOUR: [&[SimInput]; 6] = [
    &[],
    &[SimInput::Pose(GestureType::Idle)],
    &[SimInput::Pose(GestureType::OpenPalm)],
    &[SimInput::Pose(GestureType::Fist)],
    &[SimInput::ToggleSecondFist],
    &[SimInput::ToggleSecondFist, SimInput::Pose(GestureType::Pointing), SimInput::Roll(0.4)],
];

const LIVE_REPORT_EVERY: u64 = 60;

/// Step `frames` frames without a window and report swarm health.
pub fn run_headless(cfg: &AppConfig, frames: u64) -> Result<Vec<HeadlessReport>> {
    let mut app = AppState::new(cfg).context("invalid swarm configuration")?;
    let mut reports = Vec::new();

    let live = cfg.detector_input().map(|input| {
        spawn_hand_source(DetectorSource { input, thresholds: cfg.thresholds })
    });
    #[cfg(feature = "leap")]
    let live = live.or_else(|| {
        Some(spawn_hand_source(crate::source::LeapHandSource { thresholds: cfg.thresholds }))
    });

    match live {
        Some(rx) => {
            let wait = Duration::from_secs_f32(cfg.swarm.time_step);
            for f in 1..=frames {
                match rx.recv_timeout(wait) {
                    Ok(event) => {
                        if !app.handle_event(event) { break; }
                    }
                    Err(RecvTimeoutError::Timeout) => {}
                    Err(RecvTimeoutError::Disconnected) => app.source_closed(),
                }
                app.tick();
                if f % LIVE_REPORT_EVERY == 0 || f == frames {
                    reports.push(log_report(app.report()));
                }
            }
        }
        None => {
            let segment = (frames / TOUR.len() as u64).max(1);
            let mut sim = SimHands::default();
            for f in 0..frames {
                if f % segment == 0 {
                    if let Some(inputs) = TOUR.get((f / segment) as usize) {
                        for &input in inputs.iter() {
                            sim.apply(input);
                        }
                        app.handle_event(TrackingEvent::Frame(sim.frame(&cfg.thresholds)));
                        debug!(?sim, "tour segment");
                    }
                }
                app.tick();
                if (f + 1) % segment == 0 || f + 1 == frames {
                    reports.push(log_report(app.report()));
                }
            }
        }
    }

    Ok(reports)
}

fn log_report(r: HeadlessReport) -> HeadlessReport {
    info!(
        frame = r.frame,
        formation = r.formation,
        mean_target_distance = %format!("{:.3}", r.mean_target_distance),
        mean_speed = %format!("{:.3}", r.mean_speed),
        "swarm"
    );
    r
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use hand_gesture::synthetic;

    fn small() -> AppConfig {
        let mut cfg = AppConfig::default();
        cfg.swarm = SwarmConfig::default().with_sword_count(30).with_seed(5);
        cfg
    }

    fn fist_frame() -> HandFrame {
        HandFrame::from_landmark_sets(
            &[synthetic::pose(GestureType::Fist, 0.5, 0.6)],
            &GestureThresholds::default(),
        )
    }

    #[test]
    fn starts_searching_with_idle_orbit() {
        let mut app = AppState::new(&small()).unwrap();
        assert!(!app.tracking_active());
        app.tick();
        assert_eq!(app.swarm().formation().name(), "idle orbit");
        assert_eq!(app.clock().frames(), 1);
    }

    #[test]
    fn first_frame_activates_tracking() {
        let mut app = AppState::new(&small()).unwrap();
        assert!(app.handle_event(TrackingEvent::Frame(HandFrame::empty())));
        assert!(app.tracking_active());
    }

    #[test]
    fn quit_event_stops_the_loop() {
        let mut app = AppState::new(&small()).unwrap();
        assert!(!app.handle_event(TrackingEvent::Quit));
    }

    #[test]
    fn latest_hands_are_reused_between_events() {
        let mut app = AppState::new(&small()).unwrap();
        app.handle_event(TrackingEvent::Frame(fist_frame()));
        for _ in 0..3 {
            app.tick();
            assert_eq!(app.swarm().formation().name(), "forward beam");
        }
    }

    #[test]
    fn drain_keeps_the_newest_frame_and_survives_disconnect() {
        let mut app = AppState::new(&small()).unwrap();
        let (tx, rx) = mpsc::channel();
        tx.send(TrackingEvent::Frame(fist_frame())).unwrap();
        tx.send(TrackingEvent::Frame(HandFrame::empty())).unwrap();
        drop(tx);

        assert!(app.drain(&rx));
        assert!(app.hands().is_empty());
        assert!(!app.source_open());
        assert!(app.drain(&rx));
    }

    #[test]
    fn drain_reports_quit() {
        let mut app = AppState::new(&small()).unwrap();
        let (tx, rx) = mpsc::channel();
        tx.send(TrackingEvent::Quit).unwrap();
        assert!(!app.drain(&rx));
    }

    #[test]
    fn invalid_swarm_config_is_rejected() {
        let mut cfg = small();
        cfg.swarm.damping = 1.5;
        assert!(AppState::new(&cfg).is_err());
    }

    #[test]
    fn hud_view_mirrors_state() {
        let mut app = AppState::new(&small()).unwrap();
        app.handle_event(TrackingEvent::Frame(fist_frame()));
        app.tick();
        let view = app.hud_view(Some(SIM_LEGEND));
        assert!(view.tracking_active);
        assert_eq!(view.hands.len(), 1);
        assert_eq!(view.swords, 30);
    }

    #[test]
    fn headless_tour_visits_every_formation() {
        let reports = run_headless(&small(), 600).unwrap();
        let names: Vec<&str> = reports.iter().map(|r| r.formation).collect();
        assert_eq!(names, [
            "idle orbit",
            "relaxed orbit",
            "defensive circle",
            "forward beam",
            "mega convergence",
            "focused beam",
        ]);
        assert_eq!(reports.last().map(|r| r.frame), Some(600));
        assert!(reports.iter().all(|r| r.mean_speed.is_finite()));
    }

    #[test]
    fn config_defaults_and_json_overrides() {
        let cfg: AppConfig = serde_json::from_str(r#"{ "swarm": { "sword_count": 50 }, "width": 640 }"#).unwrap();
        assert_eq!(cfg.swarm.sword_count, 50);
        assert_eq!(cfg.swarm.spring, sword_swarm::SPRING);
        assert_eq!(cfg.width, 640);
        assert_eq!(cfg.height, 720);
        assert_eq!(cfg.star_count, 3000);
    }

    #[test]
    fn missing_config_file_gives_defaults() {
        let cfg = AppConfig::load(Path::new("/nonexistent/sword_viz.json")).unwrap();
        assert_eq!(cfg, AppConfig::default());
    }

    #[test]
    fn broken_config_file_is_an_error() {
        let path = std::env::temp_dir().join(format!("sword_viz_bad_{}.json", std::process::id()));
        std::fs::write(&path, "{ not json").unwrap();
        let result = AppConfig::load(&path);
        std::fs::remove_file(&path).ok();
        assert!(result.is_err());
    }

    #[test]
    fn detector_takes_precedence_over_replay() {
        let mut cfg = AppConfig::default();
        assert_eq!(cfg.detector_input(), None);
        cfg.replay = Some(PathBuf::from("session.jsonl"));
        assert!(matches!(cfg.detector_input(), Some(DetectorInput::Replay { .. })));
        cfg.detector = Some(vec![]);
        assert!(matches!(cfg.detector_input(), Some(DetectorInput::Replay { .. })));
        let argv: Vec<String> = vec!["python3".into(), "detect.py".into(), "--model".into(), "my hand.task".into()];
        cfg.detector = Some(argv.clone());
        assert_eq!(cfg.detector_input(), Some(DetectorInput::Command(argv)));
    }
}
