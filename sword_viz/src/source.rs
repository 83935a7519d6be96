//! Hand tracking sources: keyboard/mouse simulation, a detector process or
//! replay file, and LeapMotion hardware.
//!
//! The public interface is [`TrackingEvent`] delivered over a `mpsc` channel.
//! Each event carries the full hand list for one processed frame, already
//! classified.  Consumers don't need to know whether frames came from real
//! hardware, a detector, or the simulator.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

use glam::Vec3;
use hand_gesture::landmark::idx;
use hand_gesture::{
    hand_frame_from_line, palm_center, synthetic, GestureThresholds, GestureType, HandFrame,
    Landmark, LandmarkSet, LANDMARK_COUNT,
};
use tracing::{debug, error, info, warn};

// ════════════════════════════════════════════════════════════════════════════
// TrackingEvent
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Debug, PartialEq)]
pub enum TrackingEvent {
    /// Hands seen in one processed frame (possibly none).
    Frame(HandFrame),

    /// Quit the application.
    Quit,
}

// ════════════════════════════════════════════════════════════════════════════
// HandSource trait: unified interface for hw, detector and sim
// ════════════════════════════════════════════════════════════════════════════

/// Anything that can deliver [`TrackingEvent`]s over a channel.
pub trait HandSource: Send + 'static {
    fn run(self: Box<Self>, tx: Sender<TrackingEvent>);
}

/// Spawn a hand source on its own thread and return the receiving end.
pub fn spawn_hand_source<S: HandSource>(source: S) -> Receiver<TrackingEvent> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || Box::new(source).run(tx));
    rx
}

// ════════════════════════════════════════════════════════════════════════════
// SimHandSource: keyboard/mouse simulation (always available)
// ════════════════════════════════════════════════════════════════════════════

/// Raw input event from the simulation window.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SimInput {
    /// Primary hand takes this pose (keys 1–4).
    Pose(GestureType),
    /// Add or remove a second fist (B).
    ToggleSecondFist,
    /// Hide or show all hands (H).
    ToggleHidden,
    /// Rotate the primary hand in the image plane, radians (arrow keys).
    Roll(f32),
    /// Mouse position in normalized image coordinates.
    Pointer { x: f32, y: f32 },
    Quit,
}

/// State of the simulated hands.  Pure, so it can be driven without a window.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimHands {
    pub gesture:     GestureType,
    /// Where the primary palm center sits, image space.
    pub palm:        (f32, f32),
    pub roll:        f32,
    pub second_fist: bool,
    pub hidden:      bool,
}

impl Default for SimHands {
    fn default() -> Self {
        SimHands {
            gesture:     GestureType::Idle,
            palm:        (0.5, 0.5),
            roll:        0.0,
            second_fist: false,
            hidden:      true,
        }
    }
}

const MAX_ROLL: f32 = 1.2;

impl SimHands {
    /// Apply one input.  Returns false for [`SimInput::Quit`].
    ///
    /// Choosing a pose also makes the hands visible.
    pub fn apply(&mut self, input: SimInput) -> bool {
        match input {
            SimInput::Pose(g) => {
                self.gesture = g;
                self.hidden  = false;
            }
            SimInput::ToggleSecondFist => self.second_fist = !self.second_fist,
            SimInput::ToggleHidden     => self.hidden = !self.hidden,
            SimInput::Roll(delta)      => self.roll = (self.roll + delta).clamp(-MAX_ROLL, MAX_ROLL),
            SimInput::Pointer { x, y } => self.palm = (x.clamp(0.0, 1.0), y.clamp(0.0, 1.0)),
            SimInput::Quit             => return false,
        }
        true
    }

    /// Classify the simulated poses through the real classifier.
    ///
    /// The secondary fist mirrors the primary palm horizontally.
    pub fn frame(&self, thresholds: &GestureThresholds) -> HandFrame {
        if self.hidden {
            return HandFrame::empty();
        }
        let (px, py) = self.palm;
        let mut sets = vec![posed_at(self.gesture, px, py, self.roll)];
        if self.second_fist {
            sets.push(posed_at(GestureType::Fist, 1.0 - px, py, 0.0));
        }
        HandFrame::from_landmark_sets(&sets, thresholds)
    }
}

/// A synthetic pose whose palm center (not wrist) lands on `(x, y)`.
fn posed_at(gesture: GestureType, x: f32, y: f32, roll: f32) -> LandmarkSet {
    let offset = palm_center(synthetic::pose_rolled(gesture, 0.0, 0.0, roll).as_slice());
    synthetic::pose_rolled(gesture, x - offset.x, y - offset.y, roll)
}

/// Hand source driven by [`SimInput`] events from the visualizer's window.
///
/// This decouples the window event loop from pose synthesis and
/// classification.
pub struct SimHandSource {
    pub rx:         Receiver<SimInput>,
    pub thresholds: GestureThresholds,
}

impl HandSource for SimHandSource {
    fn run(self: Box<Self>, tx: Sender<TrackingEvent>) {
        let mut hands = SimHands::default();
        for input in self.rx {
            if !hands.apply(input) {
                let _ = tx.send(TrackingEvent::Quit);
                return;
            }
            if tx.send(TrackingEvent::Frame(hands.frame(&self.thresholds))).is_err() {
                return;
            }
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// DetectorSource: JSON lines from a detector process or a replay file
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Debug, PartialEq)]
pub enum DetectorInput {
    /// Program and arguments of a detector that prints one JSON line per
    /// frame.  Arguments are passed through as given, spaces included.
    Command(Vec<String>),
    /// Previously recorded detector output, replayed at `pace` per line.
    Replay { path: PathBuf, pace: Duration },
}

pub struct DetectorSource {
    pub input:      DetectorInput,
    pub thresholds: GestureThresholds,
}

impl HandSource for DetectorSource {
    fn run(self: Box<Self>, tx: Sender<TrackingEvent>) {
        match &self.input {
            DetectorInput::Command(argv) => {
                let Some(mut command) = detector_command(argv) else {
                    error!("empty detector command");
                    return;
                };
                let child = command
                    .stdout(Stdio::piped())
                    .stderr(Stdio::inherit())
                    .spawn();
                let mut child = match child {
                    Ok(c) => c,
                    Err(e) => {
                        error!(command = ?argv, "failed to start detector: {e}");
                        return;
                    }
                };
                info!(command = ?argv, pid = child.id(), "detector started");

                if let Some(stdout) = child.stdout.take() {
                    let n = pump_lines(BufReader::new(stdout), &self.thresholds, &tx, None);
                    info!(frames = n, "detector output ended");
                }
                let _ = tx.send(TrackingEvent::Frame(HandFrame::empty()));
                match child.wait() {
                    Ok(status) if !status.success() => warn!(%status, "detector exited"),
                    Err(e) => warn!("detector wait failed: {e}"),
                    Ok(_) => {}
                }
            }

            DetectorInput::Replay { path, pace } => {
                let file = match File::open(path) {
                    Ok(f) => f,
                    Err(e) => {
                        error!(path = %path.display(), "cannot open replay: {e}");
                        return;
                    }
                };
                let n = pump_lines(BufReader::new(file), &self.thresholds, &tx, Some(*pace));
                info!(frames = n, path = %path.display(), "replay finished");
                let _ = tx.send(TrackingEvent::Frame(HandFrame::empty()));
            }
        }
    }
}

/// Build the detector process from its argument vector, program first.
/// `None` for an empty vector.
pub fn detector_command(argv: &[String]) -> Option<Command> {
    let (program, args) = argv.split_first()?;
    let mut command = Command::new(program);
    command.args(args);
    Some(command)
}

/// Forward one hand frame per non-blank line until the reader or the
/// receiver goes away.  Returns the number of frames sent.
///
/// A bad line becomes an empty frame; it never stops the stream.
pub fn pump_lines<R: BufRead>(
    reader: R,
    thresholds: &GestureThresholds,
    tx: &Sender<TrackingEvent>,
    pace: Option<Duration>,
) -> usize {
    let mut sent = 0;
    for line in reader.lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                warn!("detector read failed: {e}");
                break;
            }
        };
        if line.trim().is_empty() { continue; }

        let frame = hand_frame_from_line(&line, thresholds);
        if tx.send(TrackingEvent::Frame(frame)).is_err() {
            debug!("receiver gone, stopping detector pump");
            break;
        }
        sent += 1;
        if let Some(p) = pace {
            thread::sleep(p);
        }
    }
    sent
}

// ════════════════════════════════════════════════════════════════════════════
// LeapHandSource: real hardware (feature = "leap")
// ════════════════════════════════════════════════════════════════════════════

/// Image-space length of the wrist → middle knuckle segment after mapping.
///
/// Leap reports millimetres, and hands differ in size, so each hand is
/// scaled by its own palm length.  At this span a curled fist sits near
/// 0.1 from the wrist and a flat open hand past 0.26.
pub const LEAP_PALM_SPAN: f32 = 0.14;

/// Palm length assumed when the tracked one is degenerate, mm.
const TYPICAL_PALM_MM: f32 = 90.0;

/// Half-width of the area over the device mapped onto the image, mm.
const LEAP_REACH_MM: f32 = 200.0;

/// Map Leap joints (mm, device frame, already in 21-point order) into
/// image space.
///
/// The device looks up at a hand held flat over it, so the image plane is
/// the device's x/z plane: fingers pointing away from the user point up on
/// screen and height above the device becomes depth.  The wrist is placed by
/// the interaction area; the hand's shape is scaled by [`LEAP_PALM_SPAN`].
pub fn leap_landmarks(joints: &[Vec3; LANDMARK_COUNT]) -> LandmarkSet {
    let wrist = joints[idx::WRIST];
    let palm_mm = wrist.distance(joints[idx::MIDDLE_MCP]);
    let scale = LEAP_PALM_SPAN / if palm_mm > 1.0 { palm_mm } else { TYPICAL_PALM_MM };

    let anchor = Vec3::new(
        (wrist.x + LEAP_REACH_MM) / (2.0 * LEAP_REACH_MM),
        (wrist.z + LEAP_REACH_MM) / (2.0 * LEAP_REACH_MM),
        0.0,
    );
    LandmarkSet::new((*joints).map(|j| {
        let d = j - wrist;
        Landmark::from(anchor + Vec3::new(d.x, d.z, -d.y) * scale)
    }))
}

/// Hand source backed by a real LeapMotion controller.
///
/// Requires the `leap` feature flag and the LeapC shared library installed.
/// Each hand is laid out as the wrist from the arm, then per finger the
/// bases of the proximal, intermediate and distal bones and the distal tip.
#[cfg(feature = "leap")]
pub struct LeapHandSource {
    pub thresholds: GestureThresholds,
}

#[cfg(feature = "leap")]
impl HandSource for LeapHandSource {
    fn run(self: Box<Self>, tx: Sender<TrackingEvent>) {
        use leaprs::*;

        let mut connection = match Connection::create(ConnectionConfig::default()) {
            Ok(c) => c,
            Err(e) => {
                error!("failed to create LeapC connection: {e:?}");
                return;
            }
        };
        if let Err(e) = connection.open() {
            error!("failed to open LeapMotion device: {e:?}");
            return;
        }
        info!("LeapMotion connection open");

        loop {
            let msg = match connection.poll(100) {
                Ok(m)  => m,
                Err(_) => continue,
            };

            if let Event::Tracking(frame) = msg.event() {
                let sets: Vec<LandmarkSet> =
                    frame.hands().map(|h| leap_landmarks(&leap_joints(&h))).collect();
                let hands = HandFrame::from_landmark_sets(&sets, &self.thresholds);
                if tx.send(TrackingEvent::Frame(hands)).is_err() {
                    return;
                }
            }
        }
    }
}

#[cfg(feature = "leap")]
fn leap_joints(hand: &leaprs::Hand) -> [Vec3; LANDMARK_COUNT] {
    macro_rules! joint {
        ($v:expr) => {{
            let p = $v;
            Vec3::new(p.x, p.y, p.z)
        }};
    }

    let wrist = joint!(hand.arm().next_joint());
    let mut joints = [wrist; LANDMARK_COUNT];
    for (f, digit) in hand.digits().enumerate().take(5) {
        let base = 1 + f * 4;
        joints[base]     = joint!(digit.proximal().prev_joint());
        joints[base + 1] = joint!(digit.intermediate().prev_joint());
        joints[base + 2] = joint!(digit.distal().prev_joint());
        joints[base + 3] = joint!(digit.distal().next_joint());
    }
    joints
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
