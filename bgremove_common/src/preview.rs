//! Red overlay rendering of pixels a removal would erase.

use crate::color::Color;
use crate::detect::RemovalMask;
use crate::error::Result;
use crate::raster::{Channels, Raster};

/// Weight of the overlay color in the blend.
const OVERLAY_WEIGHT: f32 = 0.5;

fn blend(base: u8, overlay: u8) -> u8 {
    ((1.0 - OVERLAY_WEIGHT) * base as f32 + OVERLAY_WEIGHT * overlay as f32).round() as u8
}

/// RGBA copy of `raster` with masked pixels blended half-way toward red.
/// Alpha is carried over from the input, opaque when it has none.
pub fn render_overlay(raster: &Raster, mask: &RemovalMask) -> Result<Raster> {
    let (width, height) = (raster.width(), raster.height());
    let mut pixels = Vec::with_capacity(width as usize * height as usize * 4);

    for (x, y, color) in raster.colors() {
        let shown = if mask.is_removed(x, y) {
            Color::new(
                blend(color.r, Color::RED.r),
                blend(color.g, Color::RED.g),
                blend(color.b, Color::RED.b),
            )
        } else {
            color
        };
        let alpha = raster.alpha_at(x, y).unwrap_or(u8::MAX);
        pixels.extend_from_slice(&[shown.r, shown.g, shown.b, alpha]);
    }

    Raster::new(width, height, Channels::Rgba, pixels)
}
