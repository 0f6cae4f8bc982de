use std::io::{BufWriter, Stdout, Write};

use glam::Vec2;

use crate::font;
use crate::sim::{VIEW_HEIGHT, VIEW_WIDTH};

// One boundary vertex every 10 degrees on a filled circle.
const FAN_STEP_DEGREES: usize = 10;

// RGB pixel buffer addressed in the logical bottom-left-origin viewport,
// presented to the terminal as truecolor half-block cells.
pub struct Canvas {
    width: usize,
    height: usize,
    bg: (u8, u8, u8),
    pixels: Vec<(u8, u8, u8)>,
    output_buf: Vec<u8>,
}

impl Canvas {
    pub fn new(width: usize, height: usize, bg: (u8, u8, u8)) -> Self {
        Self {
            width,
            height,
            bg,
            pixels: vec![bg; width * height],
            output_buf: Vec::with_capacity(width * height * 25),
        }
    }

    pub fn clear(&mut self) {
        self.pixels.fill(self.bg);
    }

    // Logical coordinates to pixel space (top-left origin, y flipped).
    fn to_px(&self, p: Vec2) -> (f32, f32) {
        (
            p.x * self.width as f32 / VIEW_WIDTH,
            (VIEW_HEIGHT - p.y) * self.height as f32 / VIEW_HEIGHT,
        )
    }

    pub fn fill_circle(&mut self, center: Vec2, radius: f32, color: (u8, u8, u8)) {
        // Closed polygon fan: 37 boundary vertices, the last repeating the
        // first, mapped into pixel space before filling.
        let fan: Vec<(f32, f32)> = (0..=360 / FAN_STEP_DEGREES)
            .map(|i| {
                let a = ((i * FAN_STEP_DEGREES) as f32).to_radians();
                self.to_px(center + Vec2::new(a.sin(), a.cos()) * radius)
            })
            .collect();
        self.fill_convex(&fan, color);

        // Sub-cell radii still land one pixel, or small particles would
        // vanish entirely at terminal resolution.
        let (cx, cy) = self.to_px(center);
        self.set_px(cx.floor() as i32, cy.floor() as i32, color);
    }

    fn fill_convex(&mut self, pts: &[(f32, f32)], color: (u8, u8, u8)) {
        let min_y = pts.iter().map(|p| p.1).fold(f32::INFINITY, f32::min);
        let max_y = pts.iter().map(|p| p.1).fold(f32::NEG_INFINITY, f32::max);
        if max_y < 0.0 || min_y >= self.height as f32 {
            return;
        }
        let y0 = min_y.max(0.0) as usize;
        let y1 = max_y.min(self.height as f32 - 1.0) as usize;

        for y in y0..=y1 {
            let yc = y as f32 + 0.5;
            let mut lo = f32::INFINITY;
            let mut hi = f32::NEG_INFINITY;
            for w in pts.windows(2) {
                let (a, b) = (w[0], w[1]);
                if (a.1 <= yc) != (b.1 <= yc) {
                    let x = a.0 + (yc - a.1) / (b.1 - a.1) * (b.0 - a.0);
                    lo = lo.min(x);
                    hi = hi.max(x);
                }
            }
            if lo > hi || hi < 0.0 || lo >= self.width as f32 {
                continue;
            }
            let x0 = lo.max(0.0) as usize;
            let x1 = hi.min(self.width as f32 - 1.0) as usize;
            for x in x0..=x1 {
                self.pixels[y * self.width + x] = color;
            }
        }
    }

    fn set_px(&mut self, x: i32, y: i32, color: (u8, u8, u8)) {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            self.pixels[y as usize * self.width + x as usize] = color;
        }
    }

    // Axis-aligned fill in logical coordinates; (x, y) is the bottom-left
    // corner. Rounds outward so sub-pixel rects still paint.
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: (u8, u8, u8)) {
        let (px0, py1) = self.to_px(Vec2::new(x, y));
        let (px1, py0) = self.to_px(Vec2::new(x + w, y + h));
        let x0 = px0.max(0.0).floor() as usize;
        let x1 = px1.min(self.width as f32).ceil() as usize;
        let y0 = py0.max(0.0).floor() as usize;
        let y1 = py1.min(self.height as f32).ceil() as usize;
        for py in y0..y1 {
            for px in x0..x1 {
                self.pixels[py * self.width + px] = color;
            }
        }
    }

    // 5x7 bitmap glyphs scaled so the glyph height equals `size` logical
    // units, anchored at the text baseline.
    pub fn draw_text(&mut self, text: &str, pos: Vec2, size: f32, color: (u8, u8, u8)) {
        let dot = size / font::GLYPH_HEIGHT as f32;
        let mut pen_x = pos.x;
        for ch in text.chars() {
            if let Some(rows) = font::glyph(ch) {
                for (row, bits) in rows.iter().enumerate() {
                    for col in 0..font::GLYPH_WIDTH {
                        if bits & (1 << (font::GLYPH_WIDTH - 1 - col)) != 0 {
                            let x = pen_x + col as f32 * dot;
                            let y = pos.y + size - (row as f32 + 1.0) * dot;
                            self.fill_rect(x, y, dot, dot, color);
                        }
                    }
                }
            }
            pen_x += (font::GLYPH_WIDTH + 1) as f32 * dot;
        }
    }

    #[cfg(test)]
    pub fn any_pixel(&self, color: (u8, u8, u8)) -> bool {
        self.pixels.contains(&color)
    }

    pub fn present(&mut self, stdout: &mut BufWriter<Stdout>) -> std::io::Result<()> {
        self.output_buf.clear();
        self.output_buf.extend_from_slice(b"\x1b[H");

        let mut prev_top: (u8, u8, u8) = (255, 255, 255);
        let mut prev_bot: (u8, u8, u8) = (255, 255, 255);

        // Two stacked pixels per cell via the lower-half block.
        for y in (0..self.height).step_by(2) {
            for x in 0..self.width {
                let top = self.pixels[y * self.width + x];
                let bot = if y + 1 < self.height {
                    self.pixels[(y + 1) * self.width + x]
                } else {
                    top
                };

                if top != prev_top {
                    write!(
                        self.output_buf,
                        "\x1b[48;2;{};{};{}m",
                        top.0, top.1, top.2
                    )?;
                    prev_top = top;
                }
                if bot != prev_bot {
                    write!(
                        self.output_buf,
                        "\x1b[38;2;{};{};{}m",
                        bot.0, bot.1, bot.2
                    )?;
                    prev_bot = bot;
                }

                self.output_buf.extend_from_slice("▄".as_bytes());
            }
            self.output_buf.extend_from_slice(b"\x1b[0m");
            prev_top = (255, 255, 255);
            prev_bot = (255, 255, 255);
            if y + 2 < self.height {
                self.output_buf.extend_from_slice(b"\r\n");
            }
        }

        stdout.write_all(&self.output_buf)?;
        stdout.flush()
    }
}
