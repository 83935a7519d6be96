//! Heads-up display drawn over the scene.
//!
//! ```text
//! ┌────────────────────────────────┬───────────────────────┐
//! │ ● SPIRITUAL NEXUS: STABLE      │        IMMORTAL STAGE │
//! │   FORMATION: DEFENSIVE CIRCLE  │          NASCENT SOUL │
//! │                                                        │
//! │ ┃HAND_ALPHA_1  ┃HAND_ALPHA_2                           │
//! │ ┃PALM / DEFENSE┃FIST / CONVERGE                        │
//! │      OPEN PALM > CIRCLE DEFENSE   FIST > ...           │
//! │ key legend                                             │
//! └────────────────────────────────────────────────────────┘
//! ```

use hand_gesture::{GestureType, HandDescriptor, HandFrame};
use sword_swarm::Formation;

use crate::canvas::{label_width, Canvas};

const TEXT_SCALE:  usize = 2;
const LINE_H:      usize = 6 * TEXT_SCALE;
const MARGIN:      usize = 16;
const PANEL_W:     usize = 200;
const PANEL_H:     usize = 62;
const PANEL_GAP:   usize = 12;

const CYAN:        u32 = 0xFF22D3EE;
const CYAN_DIM:    u32 = 0xFF0E7490;
const CYAN_DARK:   u32 = 0xFF164E63;
const PANEL_BG:    u32 = 0xFF083344;
const WHITE:       u32 = 0xFFFFFFFF;
pub const DOT_ACTIVE:   u32 = 0xFF22C55E;
pub const DOT_SEARCHING: u32 = 0xFFEF4444;

pub const INSTRUCTIONS: [(&str, &str); 3] = [
    ("OPEN PALM",   "CIRCLE DEFENSE"),
    ("FIST",        "CONVERGE BEAM"),
    ("POINT INDEX", "DIRECT STRIKE"),
];

/// Everything the HUD reads for one frame.
pub struct HudView<'a> {
    /// A hand source has delivered at least one frame.
    pub tracking_active: bool,
    pub hands:           &'a HandFrame,
    pub formation:       Formation,
    pub swords:          usize,
    /// Key legend for the keyboard simulator, if it is the active source.
    pub legend:          Option<&'a str>,
}

pub fn status_text(tracking_active: bool) -> &'static str {
    if tracking_active {
        "SPIRITUAL NEXUS: STABLE"
    } else {
        "SPIRITUAL NEXUS: SEARCHING"
    }
}

/// Where the status dot is drawn (x, y, size).
pub fn status_dot() -> (usize, usize, usize) {
    (MARGIN + 8, MARGIN + 8, 2 * TEXT_SCALE + 2)
}

/// Screen rectangles (x, y, w, h) of the per-hand panels, left to right.
pub fn hand_panel_rects(height: usize, hands: usize) -> Vec<(usize, usize, usize, usize)> {
    let y = height.saturating_sub(MARGIN + 3 * LINE_H + PANEL_H);
    (0..hands)
        .map(|i| (MARGIN + i * (PANEL_W + PANEL_GAP), y, PANEL_W, PANEL_H))
        .collect()
}

pub fn draw_hud(canvas: &mut Canvas, view: &HudView) {
    let (w, h) = (canvas.width(), canvas.height());

    // ── Status panel ──────────────────────────────────────────────────────
    canvas.shade_rect(MARGIN, MARGIN, 330, 2 * LINE_H + 20, PANEL_BG, 0.4);
    canvas.draw_border(MARGIN, MARGIN, 330, 2 * LINE_H + 20, CYAN_DARK);
    let (dx, dy, ds) = status_dot();
    let dot = if view.tracking_active { DOT_ACTIVE } else { DOT_SEARCHING };
    canvas.fill_rect(dx, dy, ds, ds, dot);
    canvas.draw_label(status_text(view.tracking_active), dx + ds + 8, MARGIN + 8, TEXT_SCALE, CYAN);
    let sub = format!("SWORDS: {}  FORMATION: {}", view.swords, view.formation.name());
    canvas.draw_label(&sub, dx + ds + 8, MARGIN + 8 + LINE_H + 2, 1, CYAN_DIM);

    // ── Stage, top right ─────────────────────────────────────────────────
    let stage = "IMMORTAL STAGE";
    canvas.draw_label(stage, w.saturating_sub(MARGIN + label_width(stage, 1)), MARGIN, 1, CYAN_DARK);
    let soul = "NASCENT SOUL";
    canvas.draw_label(soul, w.saturating_sub(MARGIN + label_width(soul, 3)), MARGIN + 10, 3, CYAN);

    // ── Hands ─────────────────────────────────────────────────────────────
    if view.hands.is_empty() {
        let y = h.saturating_sub(MARGIN + 3 * LINE_H + 24);
        canvas.draw_border(MARGIN, y, 300, 24, CYAN_DARK);
        canvas.draw_label("WAITING FOR MANUAL SIGN...", MARGIN + 10, y + 6, TEXT_SCALE, CYAN_DARK);
    } else {
        let rects = hand_panel_rects(h, view.hands.len());
        for (i, (hand, rect)) in view.hands.hands().iter().zip(rects).enumerate() {
            draw_hand_panel(canvas, i, hand, rect);
        }
    }

    // ── Instruction strip ─────────────────────────────────────────────────
    let items: Vec<String> = INSTRUCTIONS.iter().map(|(k, v)| format!("{k} > {v}")).collect();
    let strip = items.join("    ");
    let sw = label_width(&strip, 1);
    let sy = h.saturating_sub(MARGIN + 2 * LINE_H);
    let sx = w.saturating_sub(sw) / 2;
    canvas.shade_rect(sx.saturating_sub(16), sy.saturating_sub(6), sw + 32, 17, 0xFF000000, 0.6);
    canvas.draw_label(&strip, sx, sy, 1, CYAN);

    // ── Key legend ────────────────────────────────────────────────────────
    if let Some(legend) = view.legend {
        canvas.draw_label(legend, MARGIN, h.saturating_sub(MARGIN), 1, 0xFF888888);
    }
}

fn draw_hand_panel(canvas: &mut Canvas, i: usize, hand: &HandDescriptor, (x, y, w, h): (usize, usize, usize, usize)) {
    canvas.shade_rect(x, y, w, h, PANEL_BG, 0.6);
    canvas.fill_rect(x, y, 4, h, CYAN);
    canvas.draw_label(&format!("HAND_ALPHA_{}", i + 1), x + 12, y + 8, 1, CYAN_DIM);
    canvas.draw_label(hand.gesture.caption(), x + 12, y + 22, TEXT_SCALE, WHITE);

    // Five-segment charge bar, lit for any active gesture.
    let lit = hand.gesture != GestureType::Idle;
    let seg_w = (w - 24 - 4 * 4) / 5;
    for s in 0..5 {
        let color = if lit { CYAN } else { CYAN_DARK };
        canvas.fill_rect(x + 12 + s * (seg_w + 4), y + h - 12, seg_w, 3, color);
    }
}
