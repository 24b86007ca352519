//! Decoded pixel buffer handed to the engine, and its `image` conversions.

use image::{DynamicImage, RgbImage, RgbaImage};

use crate::color::Color;
use crate::error::{BgError, Result};

/// Interleaved channel layout of a [`Raster`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channels {
    Rgb,
    Rgba,
}

impl Channels {
    pub fn count(self) -> usize {
        match self {
            Channels::Rgb => 3,
            Channels::Rgba => 4,
        }
    }
}

/// Row-major, top-left origin. `pixels.len() == width * height * channels`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    width: u32,
    height: u32,
    channels: Channels,
    pixels: Vec<u8>,
}

impl Raster {
    pub fn new(width: u32, height: u32, channels: Channels, pixels: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize * channels.count();
        if pixels.len() != expected {
            return Err(BgError::InvalidInput(format!(
                "{width}x{height} raster with {} channels needs {expected} bytes, got {}",
                channels.count(),
                pixels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            channels,
            pixels,
        })
    }

    /// A raster filled with one opaque color.
    pub fn filled(width: u32, height: u32, color: Color) -> Self {
        let pixels = [color.r, color.g, color.b].repeat(width as usize * height as usize);
        Self {
            width,
            height,
            channels: Channels::Rgb,
            pixels,
        }
    }

    /// Builds an RGB raster from a per-pixel function.
    pub fn from_fn(width: u32, height: u32, f: impl Fn(u32, u32) -> Color) -> Self {
        let mut pixels = Vec::with_capacity(width as usize * height as usize * 3);
        for y in 0..height {
            for x in 0..width {
                let c = f(x, y);
                pixels.extend_from_slice(&[c.r, c.g, c.b]);
            }
        }
        Self {
            width,
            height,
            channels: Channels::Rgb,
            pixels,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> Channels {
        self.channels
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn contains(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * self.channels.count()
    }

    /// Color at `(x, y)`, or `None` outside the raster.
    pub fn color_at(&self, x: u32, y: u32) -> Option<Color> {
        if !self.contains(x, y) {
            return None;
        }
        let i = self.offset(x, y);
        Some(Color::new(self.pixels[i], self.pixels[i + 1], self.pixels[i + 2]))
    }

    /// Stored alpha at `(x, y)`; opaque when the raster has no alpha channel.
    pub fn alpha_at(&self, x: u32, y: u32) -> Option<u8> {
        if !self.contains(x, y) {
            return None;
        }
        match self.channels {
            Channels::Rgb => Some(u8::MAX),
            Channels::Rgba => Some(self.pixels[self.offset(x, y) + 3]),
        }
    }

    /// Color at `(x, y)` for coordinates already known to be in bounds.
    pub(crate) fn color_unchecked(&self, x: u32, y: u32) -> Color {
        let i = self.offset(x, y);
        Color::new(self.pixels[i], self.pixels[i + 1], self.pixels[i + 2])
    }

    /// Iterates `(x, y, color)` in row-major order.
    pub fn colors(&self) -> impl Iterator<Item = (u32, u32, Color)> + '_ {
        let width = self.width.max(1);
        self.pixels
            .chunks_exact(self.channels.count())
            .enumerate()
            .map(move |(i, px)| {
                let i = i as u32;
                (i % width, i / width, Color::new(px[0], px[1], px[2]))
            })
    }

    /// Always succeeds for RGBA rasters; RGB rasters gain an opaque alpha.
    pub fn to_rgba_image(&self) -> RgbaImage {
        let pixels = match self.channels {
            Channels::Rgba => self.pixels.clone(),
            Channels::Rgb => self
                .pixels
                .chunks_exact(3)
                .flat_map(|px| [px[0], px[1], px[2], u8::MAX])
                .collect(),
        };
        RgbaImage::from_raw(self.width, self.height, pixels)
            .unwrap_or_else(|| RgbaImage::new(self.width, self.height))
    }
}

impl From<RgbImage> for Raster {
    fn from(img: RgbImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            channels: Channels::Rgb,
            pixels: img.into_raw(),
        }
    }
}

impl From<RgbaImage> for Raster {
    fn from(img: RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            channels: Channels::Rgba,
            pixels: img.into_raw(),
        }
    }
}

/// Images with an alpha channel keep it; everything else becomes 8-bit RGB.
impl From<DynamicImage> for Raster {
    fn from(img: DynamicImage) -> Self {
        if img.color().has_alpha() {
            Raster::from(img.into_rgba8())
        } else {
            Raster::from(img.into_rgb8())
        }
    }
}

impl From<&Raster> for RgbaImage {
    fn from(raster: &Raster) -> Self {
        raster.to_rgba_image()
    }
}
