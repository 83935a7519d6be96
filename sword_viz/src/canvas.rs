//! ARGB pixel buffer with a depth buffer, flat-shaded triangles and a tiny
//! bitmap font.  Knows nothing about windows; the visualizer hands the
//! finished buffer to `minifb`.

use glam::Vec3;

pub struct Canvas {
    width:  usize,
    height: usize,
    color:  Vec<u32>,
    depth:  Vec<f32>,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        Canvas {
            width,
            height,
            color: vec![0xFF000000; width * height],
            depth: vec![f32::INFINITY; width * height],
        }
    }

    pub fn width(&self)  -> usize  { self.width }
    pub fn height(&self) -> usize  { self.height }
    pub fn pixels(&self) -> &[u32] { &self.color }

    pub fn pixel(&self, x: usize, y: usize) -> Option<u32> {
        (x < self.width && y < self.height).then(|| self.color[y * self.width + x])
    }

    pub fn depth_at(&self, x: usize, y: usize) -> Option<f32> {
        (x < self.width && y < self.height).then(|| self.depth[y * self.width + x])
    }

    /// Vertical gradient from `top` to `bottom`; also resets depth.
    pub fn clear_gradient(&mut self, top: u32, bottom: u32) {
        let span = self.height.saturating_sub(1).max(1) as f32;
        for row in 0..self.height {
            let c = blend(top, bottom, row as f32 / span);
            self.color[row * self.width..(row + 1) * self.width].fill(c);
        }
        self.depth.fill(f32::INFINITY);
    }

    pub fn set_pixel(&mut self, x: usize, y: usize, color: u32) {
        if x < self.width && y < self.height {
            self.color[y * self.width + x] = color;
        }
    }

    /// Mix `color` over what is already there by `alpha`.
    pub fn blend_pixel(&mut self, x: usize, y: usize, color: u32, alpha: f32) {
        if x < self.width && y < self.height {
            let i = y * self.width + x;
            self.color[i] = blend(self.color[i], color, alpha);
        }
    }

    pub fn fill_rect(&mut self, x: usize, y: usize, w: usize, h: usize, color: u32) {
        for row in y..(y + h).min(self.height) {
            for col in x..(x + w).min(self.width) {
                self.color[row * self.width + col] = color;
            }
        }
    }

    /// Translucent rectangle for HUD panels.
    pub fn shade_rect(&mut self, x: usize, y: usize, w: usize, h: usize, color: u32, alpha: f32) {
        for row in y..(y + h).min(self.height) {
            for col in x..(x + w).min(self.width) {
                self.blend_pixel(col, row, color, alpha);
            }
        }
    }

    pub fn draw_border(&mut self, x: usize, y: usize, w: usize, h: usize, color: u32) {
        if w == 0 || h == 0 { return; }
        for col in x..(x + w).min(self.width) {
            self.set_pixel(col, y, color);
            self.set_pixel(col, y + h - 1, color);
        }
        for row in y..(y + h).min(self.height) {
            self.set_pixel(x, row, color);
            self.set_pixel(x + w - 1, row, color);
        }
    }

    /// Fill a screen-space triangle with depth test.  `z` of each vertex is
    /// its view depth; nearer wins.  Winding does not matter.
    pub fn fill_triangle(&mut self, v: [Vec3; 3], color: u32) {
        let area = edge(v[0], v[1], v[2]);
        if area.abs() < 1e-6 { return; }

        let min_x = v.iter().map(|p| p.x).fold(f32::INFINITY, f32::min).floor().max(0.0);
        let max_x = v.iter().map(|p| p.x).fold(f32::NEG_INFINITY, f32::max).ceil()
            .min(self.width as f32 - 1.0);
        let min_y = v.iter().map(|p| p.y).fold(f32::INFINITY, f32::min).floor().max(0.0);
        let max_y = v.iter().map(|p| p.y).fold(f32::NEG_INFINITY, f32::max).ceil()
            .min(self.height as f32 - 1.0);
        if min_x > max_x || min_y > max_y { return; }

        for py in min_y as usize..=max_y as usize {
            for px in min_x as usize..=max_x as usize {
                let p = Vec3::new(px as f32 + 0.5, py as f32 + 0.5, 0.0);
                let w0 = edge(v[1], v[2], p) / area;
                let w1 = edge(v[2], v[0], p) / area;
                let w2 = edge(v[0], v[1], p) / area;
                if w0 < 0.0 || w1 < 0.0 || w2 < 0.0 { continue; }

                let z = w0 * v[0].z + w1 * v[1].z + w2 * v[2].z;
                let i = py * self.width + px;
                if z < self.depth[i] {
                    self.depth[i] = z;
                    self.color[i] = color;
                }
            }
        }
    }

    /// 3×5 bitmap text, each font pixel drawn as a `scale`×`scale` block.
    /// Returns the x just past the last glyph.
    pub fn draw_label(&mut self, text: &str, x: usize, y: usize, scale: usize, color: u32) -> usize {
        let scale = scale.max(1);
        let mut cx = x;
        for ch in text.chars() {
            let glyph = char_glyph(ch);
            for (row, &bits) in glyph.iter().enumerate() {
                for col in 0..3usize {
                    if bits & (1 << (2 - col)) != 0 {
                        self.fill_rect(cx + col * scale, y + row * scale, scale, scale, color);
                    }
                }
            }
            cx += 4 * scale; // 3 wide + 1 gap
            if cx + 4 * scale > self.width { break; }
        }
        cx
    }
}

/// Width in pixels of `text` drawn at `scale`.
pub fn label_width(text: &str, scale: usize) -> usize {
    text.chars().count() * 4 * scale.max(1)
}

fn edge(a: Vec3, b: Vec3, p: Vec3) -> f32 {
    (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x)
}

// ────────────────────────────────────────────────────────────────────────────
// Minimal 3×5 bitmap font
// ────────────────────────────────────────────────────────────────────────────

fn char_glyph(c: char) -> [u8; 5] {
    match c {
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b111, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b001, 0b001, 0b001],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b111],
        'a' | 'A' => [0b111, 0b101, 0b111, 0b101, 0b101],
        'b' | 'B' => [0b110, 0b101, 0b110, 0b101, 0b110],
        'c' | 'C' => [0b111, 0b100, 0b100, 0b100, 0b111],
        'd' | 'D' => [0b110, 0b101, 0b101, 0b101, 0b110],
        'e' | 'E' => [0b111, 0b100, 0b111, 0b100, 0b111],
        'f' | 'F' => [0b111, 0b100, 0b111, 0b100, 0b100],
        'g' | 'G' => [0b111, 0b100, 0b101, 0b101, 0b111],
        'h' | 'H' => [0b101, 0b101, 0b111, 0b101, 0b101],
        'i' | 'I' => [0b111, 0b010, 0b010, 0b010, 0b111],
        'j' | 'J' => [0b001, 0b001, 0b001, 0b101, 0b111],
        'k' | 'K' => [0b101, 0b101, 0b110, 0b101, 0b101],
        'l' | 'L' => [0b100, 0b100, 0b100, 0b100, 0b111],
        'm' | 'M' => [0b101, 0b111, 0b101, 0b101, 0b101],
        'n' | 'N' => [0b111, 0b101, 0b101, 0b101, 0b101],
        'o' | 'O' => [0b111, 0b101, 0b101, 0b101, 0b111],
        'p' | 'P' => [0b111, 0b101, 0b111, 0b100, 0b100],
        'q' | 'Q' => [0b111, 0b101, 0b101, 0b111, 0b001],
        'r' | 'R' => [0b110, 0b101, 0b110, 0b101, 0b101],
        's' | 'S' => [0b111, 0b100, 0b111, 0b001, 0b111],
        't' | 'T' => [0b111, 0b010, 0b010, 0b010, 0b010],
        'u' | 'U' => [0b101, 0b101, 0b101, 0b101, 0b111],
        'v' | 'V' => [0b101, 0b101, 0b101, 0b010, 0b010],
        'w' | 'W' => [0b101, 0b101, 0b101, 0b111, 0b101],
        'x' | 'X' => [0b101, 0b101, 0b010, 0b101, 0b101],
        'y' | 'Y' => [0b101, 0b101, 0b111, 0b010, 0b010],
        'z' | 'Z' => [0b111, 0b001, 0b010, 0b100, 0b111],
        '/' => [0b001, 0b001, 0b010, 0b100, 0b100],
        '-' => [0b000, 0b000, 0b111, 0b000, 0b000],
        '_' => [0b000, 0b000, 0b000, 0b000, 0b111],
        '>' => [0b100, 0b010, 0b001, 0b010, 0b100],
        '.' => [0b000, 0b000, 0b000, 0b000, 0b010],
        ',' => [0b000, 0b000, 0b000, 0b010, 0b100],
        ':' => [0b000, 0b010, 0b000, 0b010, 0b000],
        '=' => [0b000, 0b111, 0b000, 0b111, 0b000],
        '+' => [0b000, 0b010, 0b111, 0b010, 0b000],
        '|' => [0b010, 0b010, 0b010, 0b010, 0b010],
        ' ' => [0b000, 0b000, 0b000, 0b000, 0b000],
        _   => [0b000, 0b000, 0b010, 0b000, 0b000], // fallback dot
    }
}

/// Alpha-blend two ARGB colors. `t` = 0.0 → all `a`, `t` = 1.0 → all `b`.
pub fn blend(a: u32, b: u32, t: f32) -> u32 {
    let t = t.clamp(0.0, 1.0);
    let lerp = |ca: u32, cb: u32| (ca as f32 * (1.0-t) + cb as f32 * t).round() as u32;
    let ar = (a >> 16) & 0xFF; let br = (b >> 16) & 0xFF;
    let ag = (a >>  8) & 0xFF; let bg = (b >>  8) & 0xFF;
    let ab =  a        & 0xFF; let bb =  b        & 0xFF;
    0xFF000000 | (lerp(ar,br) << 16) | (lerp(ag,bg) << 8) | lerp(ab,bb)
}

/// Scale an ARGB color's channels by `k`, saturating.
pub fn scale_color(c: u32, k: f32) -> u32 {
    let k = k.max(0.0);
    let ch = |shift: u32| (((c >> shift) & 0xFF) as f32 * k).round().min(255.0) as u32;
    0xFF000000 | (ch(16) << 16) | (ch(8) << 8) | ch(0)
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blend_endpoints() {
        assert_eq!(blend(0xFF000000, 0xFFFFFFFF, 0.0), 0xFF000000);
        assert_eq!(blend(0xFF000000, 0xFFFFFFFF, 1.0), 0xFFFFFFFF);
        assert_eq!(blend(0xFF000000, 0xFF0000FF, 0.5), 0xFF000080);
    }

    #[test]
    fn gradient_runs_top_to_bottom() {
        let mut c = Canvas::new(4, 3);
        c.clear_gradient(0xFF000814, 0xFF0A1A2F);
        assert_eq!(c.pixel(0, 0), Some(0xFF000814));
        assert_eq!(c.pixel(3, 2), Some(0xFF0A1A2F));
        assert_eq!(c.depth_at(1, 1), Some(f32::INFINITY));
    }

    #[test]
    fn triangle_fills_interior_only() {
        let mut c = Canvas::new(20, 20);
        c.fill_triangle([Vec3::new(2.0, 2.0, 1.0), Vec3::new(18.0, 2.0, 1.0), Vec3::new(2.0, 18.0, 1.0)], 0xFFFFFFFF);
        assert_eq!(c.pixel(4, 4), Some(0xFFFFFFFF));
        assert_eq!(c.pixel(17, 17), Some(0xFF000000));
    }

    #[test]
    fn nearer_triangle_wins_regardless_of_order() {
        let tri = |z| [Vec3::new(0.0, 0.0, z), Vec3::new(10.0, 0.0, z), Vec3::new(0.0, 10.0, z)];
        let mut c = Canvas::new(10, 10);
        c.fill_triangle(tri(2.0), 0xFF0000FF);
        c.fill_triangle(tri(5.0), 0xFFFF0000);
        assert_eq!(c.pixel(2, 2), Some(0xFF0000FF));
        assert_eq!(c.depth_at(2, 2), Some(2.0));
    }

    #[test]
    fn degenerate_and_offscreen_triangles_are_ignored() {
        let mut c = Canvas::new(8, 8);
        c.fill_triangle([Vec3::ZERO, Vec3::ONE, Vec3::splat(2.0)], 0xFFFFFFFF);
        c.fill_triangle([Vec3::new(-30.0, -30.0, 1.0), Vec3::new(-20.0, -30.0, 1.0), Vec3::new(-30.0, -20.0, 1.0)], 0xFFFFFFFF);
        assert!(c.pixels().iter().all(|&p| p == 0xFF000000));
    }

    #[test]
    fn label_scales_and_clips() {
        let mut c = Canvas::new(40, 12);
        let end = c.draw_label("1", 0, 0, 2, 0xFFFFFFFF);
        assert_eq!(end, 8);
        // Top row of '1' is 0b010 → the middle column, two pixels wide.
        assert_eq!(c.pixel(2, 0), Some(0xFFFFFFFF));
        assert_eq!(c.pixel(0, 0), Some(0xFF000000));
        assert_eq!(label_width("ABC", 2), 24);
        c.draw_label("WAITING FOR MANUAL SIGN", 0, 0, 1, 0xFFFFFFFF);
    }

    #[test]
    fn scale_color_saturates() {
        assert_eq!(scale_color(0xFF808080, 2.0), 0xFFFFFFFF);
        assert_eq!(scale_color(0xFF808080, 0.0), 0xFF000000);
    }
}
