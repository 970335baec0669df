//! Terminal presentation of the pixel canvas.
//!
//! Each terminal cell shows two stacked pixels with an upper half block:
//! the foreground paints the top pixel and the background the bottom one.

use super::{PixelCanvas, Point, RenderSurface, TextLabel};
use crate::error::Result;
use crate::pipeline::{Frame, Rgb};
use crossterm::cursor::{Hide, Show};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle,
};
use crossterm::ExecutableCommand;
use ratatui::{
    backend::CrosstermBackend,
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Span,
    widgets::Widget,
    Terminal,
};
use std::io::{self, Stdout};

const UPPER_HALF_BLOCK: &str = "\u{2580}";

fn to_color(c: Rgb) -> Color {
    Color::Rgb(c.r, c.g, c.b)
}

/// The canvas scaled to fit a terminal area, plus its text labels.
struct HalfBlockView<'a> {
    canvas: &'a PixelCanvas,
    labels: &'a [TextLabel],
}

impl Widget for HalfBlockView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let cells = self.canvas.downsample(area.width, area.height * 2);
        let cols = area.width as usize;

        for row in 0..area.height {
            for col in 0..area.width {
                let top = cells[(row as usize * 2) * cols + col as usize];
                let bottom = cells[(row as usize * 2 + 1) * cols + col as usize];
                buf.get_mut(area.x + col, area.y + row)
                    .set_symbol(UPPER_HALF_BLOCK)
                    .set_fg(to_color(top))
                    .set_bg(to_color(bottom));
            }
        }

        let (w, h) = self.canvas.size();
        for label in self.labels {
            let col = (label.x.max(0) as u64 * area.width as u64 / w.max(1) as u64) as u16;
            let row = (label.y.max(0) as u64 * area.height as u64 / h.max(1) as u64) as u16;
            if col >= area.width || row >= area.height {
                continue;
            }
            let style = Style::default()
                .fg(to_color(label.color))
                .bg(Color::Black)
                .add_modifier(Modifier::BOLD);
            buf.set_span(
                area.x + col,
                area.y + row,
                &Span::styled(label.text.as_str(), style),
                area.width - col,
            );
        }
    }
}

/// Full-screen terminal surface. Restores the terminal when dropped.
pub struct TerminalSurface {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    canvas: PixelCanvas,
}

impl TerminalSurface {
    /// Take over the terminal: raw mode, alternate screen, hidden cursor.
    pub fn new(width: u32, height: u32, title: &str) -> Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        stdout.execute(Hide)?;
        stdout.execute(SetTitle(title))?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        Ok(Self {
            terminal,
            canvas: PixelCanvas::new(width, height),
        })
    }

    fn restore(&mut self) -> io::Result<()> {
        disable_raw_mode()?;
        let backend = self.terminal.backend_mut();
        backend.execute(Show)?;
        backend.execute(LeaveAlternateScreen)?;
        Ok(())
    }
}

impl Drop for TerminalSurface {
    fn drop(&mut self) {
        // Nothing sensible to do if the terminal refuses to be restored
        let _ = self.restore();
    }
}

impl RenderSurface for TerminalSurface {
    fn size(&self) -> (u32, u32) {
        self.canvas.size()
    }

    fn draw_background(&mut self, frame: &Frame) {
        self.canvas.draw_background(frame);
    }

    fn fill_polygon(&mut self, points: &[Point], color: Rgb) {
        self.canvas.fill_polygon(points, color);
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Rgb) {
        self.canvas.fill_circle(center, radius, color);
    }

    fn fill_rect(&mut self, x: i32, y: i32, width: u32, height: u32, color: Rgb, alpha: f64) {
        self.canvas.fill_rect(x, y, width, height, color, alpha);
    }

    fn draw_text(&mut self, x: i32, y: i32, text: &str, color: Rgb) {
        self.canvas.draw_text(x, y, text, color);
    }

    fn present(&mut self) -> Result<()> {
        let canvas = &self.canvas;
        self.terminal.draw(|frame| {
            let area = frame.size();
            frame.render_widget(
                HalfBlockView {
                    canvas,
                    labels: canvas.labels(),
                },
                area,
            );
        })?;
        self.canvas.present()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_paints_half_blocks() {
        let mut canvas = PixelCanvas::new(4, 4);
        canvas.fill_rect(0, 0, 4, 2, Rgb::new(255, 0, 0), 1.0);
        canvas.fill_rect(0, 2, 4, 2, Rgb::new(0, 0, 255), 1.0);

        let area = Rect::new(0, 0, 2, 1);
        let mut buf = Buffer::empty(area);
        HalfBlockView {
            canvas: &canvas,
            labels: &[],
        }
        .render(area, &mut buf);

        let cell = buf.get(1, 0);
        assert_eq!(cell.symbol(), UPPER_HALF_BLOCK);
        assert_eq!(cell.fg, Color::Rgb(255, 0, 0));
        assert_eq!(cell.bg, Color::Rgb(0, 0, 255));
    }

    #[test]
    fn test_view_places_labels() {
        let canvas = PixelCanvas::new(100, 100);
        let labels = vec![TextLabel {
            x: 50,
            y: 50,
            text: "SCORE: 0".to_string(),
            color: Rgb::new(0, 255, 0),
        }];

        let area = Rect::new(0, 0, 20, 10);
        let mut buf = Buffer::empty(area);
        HalfBlockView {
            canvas: &canvas,
            labels: &labels,
        }
        .render(area, &mut buf);

        assert_eq!(buf.get(10, 5).symbol(), "S");
        assert_eq!(buf.get(17, 5).symbol(), "0");
        assert_eq!(buf.get(10, 5).fg, Color::Rgb(0, 255, 0));
    }
}
