//! Drawing the game.
//!
//! The game draws in capture-pixel coordinates onto a [`RenderSurface`].
//! [`PixelCanvas`] rasterizes those primitives in memory; the terminal
//! surface scales the canvas onto the terminal when a frame is presented.

pub mod canvas;
pub mod scene;
pub mod terminal;

pub use canvas::{PixelCanvas, TextLabel};
pub use scene::draw_scene;
pub use terminal::TerminalSurface;

use crate::error::Result;
use crate::pipeline::{Frame, Rgb};

/// A point in pixel space.
pub type Point = (f64, f64);

/// Something the game can draw a frame onto and then show.
pub trait RenderSurface {
    /// Drawing area in pixels as (width, height).
    fn size(&self) -> (u32, u32);

    /// Cover the whole surface with a camera frame.
    fn draw_background(&mut self, frame: &Frame);

    fn fill_polygon(&mut self, points: &[Point], color: Rgb);

    fn fill_circle(&mut self, center: Point, radius: f64, color: Rgb);

    /// Fill a rectangle, blending with what is underneath by `alpha` in [0, 1].
    fn fill_rect(&mut self, x: i32, y: i32, width: u32, height: u32, color: Rgb, alpha: f64);

    /// Place a line of text with its top-left corner at (x, y).
    fn draw_text(&mut self, x: i32, y: i32, text: &str, color: Rgb);

    /// Show everything drawn since the last present.
    fn present(&mut self) -> Result<()>;
}
