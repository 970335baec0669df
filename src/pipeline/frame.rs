//! Raw RGB frames.

/// 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Perceived brightness (ITU-R BT.601 weights), 0-255.
    pub fn luma(&self) -> u8 {
        ((299 * self.r as u32 + 587 * self.g as u32 + 114 * self.b as u32) / 1000) as u8
    }

    /// Mix `self` over `below` with `alpha` in [0, 1].
    pub fn blend_over(&self, below: Rgb, alpha: f64) -> Rgb {
        let a = alpha.clamp(0.0, 1.0);
        let mix = |top: u8, bottom: u8| (top as f64 * a + bottom as f64 * (1.0 - a)).round() as u8;
        Rgb::new(
            mix(self.r, below.r),
            mix(self.g, below.g),
            mix(self.b, below.b),
        )
    }
}

/// A captured image, row-major, top-left origin.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    width: u32,
    height: u32,
    pixels: Vec<Rgb>,
}

impl Frame {
    /// Build a frame from row-major pixels. Returns `None` if the pixel
    /// count does not match the size.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Rgb>) -> Option<Self> {
        if pixels.len() != width as usize * height as usize {
            return None;
        }
        Some(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn filled(width: u32, height: u32, color: Rgb) -> Self {
        Self {
            width,
            height,
            pixels: vec![color; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// Flip left-to-right, turning a camera view into a mirror view.
    pub fn mirrored(&self) -> Frame {
        let w = self.width as usize;
        let mut pixels = Vec::with_capacity(self.pixels.len());
        for row in self.pixels.chunks(w.max(1)) {
            pixels.extend(row.iter().rev());
        }
        Frame {
            width: self.width,
            height: self.height,
            pixels,
        }
    }
}
