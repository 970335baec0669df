//! In-memory software rasterizer.

use super::{Point, RenderSurface};
use crate::error::Result;
use crate::pipeline::{Frame, Rgb};

/// Text placed on the canvas, kept as text so the terminal can print it.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLabel {
    pub x: i32,
    pub y: i32,
    pub text: String,
    pub color: Rgb,
}

/// RGB pixel buffer with the game's draw primitives.
///
/// Pixels persist between presents; only text labels are cleared. Used
/// directly as the headless surface.
#[derive(Debug, Clone)]
pub struct PixelCanvas {
    width: u32,
    height: u32,
    pixels: Vec<Rgb>,
    labels: Vec<TextLabel>,
    presented: u64,
}

impl PixelCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Rgb::BLACK; width as usize * height as usize],
            labels: Vec::new(),
            presented: 0,
        }
    }

    pub fn pixel(&self, x: i32, y: i32) -> Option<Rgb> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    pub fn labels(&self) -> &[TextLabel] {
        &self.labels
    }

    /// Frames presented so far.
    pub fn presented(&self) -> u64 {
        self.presented
    }

    /// Forget this frame's labels, keeping the pixels.
    pub fn clear_labels(&mut self) {
        self.labels.clear();
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    fn put(&mut self, x: i32, y: i32, color: Rgb) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = color;
        }
    }

    /// Shrink to `cols` x `rows` by averaging each block of pixels.
    pub fn downsample(&self, cols: u16, rows: u16) -> Vec<Rgb> {
        let (cols, rows) = (cols as usize, rows as usize);
        let (w, h) = (self.width as usize, self.height as usize);
        let mut out = Vec::with_capacity(cols * rows);
        if w == 0 || h == 0 {
            out.resize(cols * rows, Rgb::BLACK);
            return out;
        }

        for r in 0..rows {
            let y0 = (r * h / rows).min(h - 1);
            let y1 = ((r + 1) * h / rows).clamp(y0 + 1, h);
            for c in 0..cols {
                let x0 = (c * w / cols).min(w - 1);
                let x1 = ((c + 1) * w / cols).clamp(x0 + 1, w);

                let (mut sr, mut sg, mut sb) = (0u32, 0u32, 0u32);
                for y in y0..y1 {
                    for px in &self.pixels[y * w + x0..y * w + x1] {
                        sr += px.r as u32;
                        sg += px.g as u32;
                        sb += px.b as u32;
                    }
                }
                let n = ((y1 - y0) * (x1 - x0)) as u32;
                out.push(Rgb::new((sr / n) as u8, (sg / n) as u8, (sb / n) as u8));
            }
        }
        out
    }
}

impl RenderSurface for PixelCanvas {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn draw_background(&mut self, frame: &Frame) {
        if (frame.width(), frame.height()) == (self.width, self.height) {
            self.pixels.copy_from_slice(frame.pixels());
            return;
        }
        // Nearest-neighbor stretch for mismatched sizes
        let (fw, fh) = (frame.width().max(1), frame.height().max(1));
        for y in 0..self.height {
            for x in 0..self.width {
                let color = frame
                    .pixel(x * fw / self.width, y * fh / self.height)
                    .unwrap_or(Rgb::BLACK);
                self.put(x as i32, y as i32, color);
            }
        }
    }

    fn fill_polygon(&mut self, points: &[Point], color: Rgb) {
        if points.len() < 3 {
            return;
        }
        let min_y = points.iter().map(|p| p.1).fold(f64::INFINITY, f64::min);
        let max_y = points.iter().map(|p| p.1).fold(f64::NEG_INFINITY, f64::max);
        let y_start = (min_y - 0.5).ceil().max(0.0) as i32;
        let y_end = (max_y - 0.5).floor().min(self.height as f64 - 1.0) as i32;

        let mut crossings = Vec::with_capacity(points.len());
        for y in y_start..=y_end {
            // Sample at pixel centers; even-odd rule
            let sy = y as f64 + 0.5;
            crossings.clear();
            for (i, &(x0, y0)) in points.iter().enumerate() {
                let (x1, y1) = points[(i + 1) % points.len()];
                if (y0 <= sy && y1 > sy) || (y1 <= sy && y0 > sy) {
                    crossings.push(x0 + (sy - y0) * (x1 - x0) / (y1 - y0));
                }
            }
            crossings.sort_by(|a, b| a.total_cmp(b));
            for span in crossings.chunks_exact(2) {
                let xa = (span[0] - 0.5).ceil().max(0.0) as i32;
                let xb = (span[1] - 0.5).floor().min(self.width as f64 - 1.0) as i32;
                for x in xa..=xb {
                    self.put(x, y, color);
                }
            }
        }
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Rgb) {
        if radius <= 0.0 {
            return;
        }
        let (cx, cy) = center;
        let r2 = radius * radius;
        let y0 = (cy - radius).floor() as i32;
        let y1 = (cy + radius).ceil() as i32;
        let x0 = (cx - radius).floor() as i32;
        let x1 = (cx + radius).ceil() as i32;
        for y in y0..=y1 {
            for x in x0..=x1 {
                let dx = x as f64 + 0.5 - cx;
                let dy = y as f64 + 0.5 - cy;
                if dx * dx + dy * dy <= r2 {
                    self.put(x, y, color);
                }
            }
        }
    }

    fn fill_rect(&mut self, x: i32, y: i32, width: u32, height: u32, color: Rgb, alpha: f64) {
        for py in y.max(0)..(y + height as i32).min(self.height as i32) {
            for px in x.max(0)..(x + width as i32).min(self.width as i32) {
                if let Some(i) = self.index(px, py) {
                    self.pixels[i] = color.blend_over(self.pixels[i], alpha);
                }
            }
        }
    }

    fn draw_text(&mut self, x: i32, y: i32, text: &str, color: Rgb) {
        self.labels.push(TextLabel {
            x,
            y,
            text: text.to_string(),
            color,
        });
    }

    fn present(&mut self) -> Result<()> {
        self.presented += 1;
        self.labels.clear();
        Ok(())
    }
}
