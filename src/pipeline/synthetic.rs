//! Camera-free capture for demos, headless runs and tests.
//!
//! [`SyntheticCamera`] renders a dim backdrop with a bright "face" that
//! sweeps left and right, and [`BrightSpotEstimator`] finds that face by
//! averaging the position of every bright pixel.

use super::{Frame, PoseEstimator, Rgb, VideoSource};
use crate::error::Result;
use std::f64::consts::TAU;
use std::thread;
use std::time::{Duration, Instant};

/// Frames per full left-right-left sweep.
pub const SWEEP_PERIOD_FRAMES: u64 = 240;

/// Luma at or above which a pixel counts as part of the face.
pub const BRIGHTNESS_THRESHOLD: u8 = 200;

/// Normalized x of the sweeping face at a given frame, between 0.1 and 0.9.
pub fn sweep_position(frame_index: u64, period: u64) -> f64 {
    let phase = (frame_index % period.max(1)) as f64 / period.max(1) as f64;
    0.5 + 0.4 * (phase * TAU).sin()
}

pub struct SyntheticCamera {
    width: u32,
    height: u32,
    frame_index: u64,
    frame_interval: Duration,
    next_frame_at: Option<Instant>,
    backdrop: Vec<Rgb>,
}

impl SyntheticCamera {
    /// A 30 fps camera of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        let backdrop = (0..height)
            .flat_map(|y| {
                let shade = (20 + 60 * y / height.max(1)) as u8;
                (0..width).map(move |_| Rgb::new(shade / 3, shade / 2, shade))
            })
            .collect();
        Self {
            width,
            height,
            frame_index: 0,
            frame_interval: Duration::from_millis(33),
            next_frame_at: None,
            backdrop,
        }
    }

    /// Change the pacing. A zero interval hands out frames as fast as asked.
    pub fn with_frame_interval(mut self, interval: Duration) -> Self {
        self.frame_interval = interval;
        self
    }

    /// Where the face sits in camera (unmirrored) coordinates for the next frame.
    pub fn face_position(&self) -> f64 {
        sweep_position(self.frame_index, SWEEP_PERIOD_FRAMES)
    }

    fn render(&self) -> Frame {
        let mut pixels = self.backdrop.clone();
        let cx = self.face_position() * self.width as f64;
        let cy = self.height as f64 / 3.0;
        let radius = (self.height as f64 / 8.0).max(1.0);
        let skin = Rgb::new(255, 224, 196);

        let y0 = (cy - radius).floor().max(0.0) as u32;
        let y1 = ((cy + radius).ceil() as u32).min(self.height);
        let x0 = (cx - radius).floor().max(0.0) as u32;
        let x1 = ((cx + radius).ceil() as u32).min(self.width);
        for y in y0..y1 {
            for x in x0..x1 {
                let dx = x as f64 + 0.5 - cx;
                let dy = y as f64 + 0.5 - cy;
                if dx * dx + dy * dy <= radius * radius {
                    pixels[(y * self.width + x) as usize] = skin;
                }
            }
        }

        Frame::from_pixels(self.width, self.height, pixels)
            .unwrap_or_else(|| Frame::filled(self.width, self.height, Rgb::BLACK))
    }
}

impl VideoSource for SyntheticCamera {
    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn acquire(&mut self) -> Result<Option<Frame>> {
        if let Some(at) = self.next_frame_at {
            let now = Instant::now();
            if at > now {
                thread::sleep(at - now);
            }
        }
        self.next_frame_at = Some(Instant::now() + self.frame_interval);

        let frame = self.render();
        self.frame_index += 1;
        Ok(Some(frame))
    }
}

/// Locates the centroid of bright pixels.
#[derive(Debug, Clone, Copy)]
pub struct BrightSpotEstimator {
    threshold: u8,
}

impl Default for BrightSpotEstimator {
    fn default() -> Self {
        Self {
            threshold: BRIGHTNESS_THRESHOLD,
        }
    }
}

impl BrightSpotEstimator {
    pub fn with_threshold(threshold: u8) -> Self {
        Self { threshold }
    }
}

impl PoseEstimator for BrightSpotEstimator {
    fn infer(&mut self, frame: &Frame) -> Result<Option<f64>> {
        let width = frame.width() as usize;
        if width == 0 {
            return Ok(None);
        }

        let mut sum_x = 0u64;
        let mut count = 0u64;
        for (i, px) in frame.pixels().iter().enumerate() {
            if px.luma() >= self.threshold {
                sum_x += (i % width) as u64;
                count += 1;
            }
        }

        if count == 0 {
            return Ok(None);
        }
        let centroid = sum_x as f64 / count as f64 + 0.5;
        Ok(Some((centroid / width as f64).clamp(0.0, 1.0)))
    }
}
