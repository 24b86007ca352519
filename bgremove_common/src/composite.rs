//! Alpha compositing of the classification result.

use crate::detect::AlphaChannel;
use crate::error::Result;
use crate::raster::{Channels, Raster};

/// RGBA raster carrying `raster`'s RGB values and `alpha` as opacity.
///
/// `alpha` must have the raster's dimensions; missing cells read as opaque.
pub fn composite(raster: &Raster, alpha: &AlphaChannel) -> Result<Raster> {
    let (width, height) = (raster.width(), raster.height());
    let mut pixels = Vec::with_capacity(width as usize * height as usize * 4);

    for (x, y, color) in raster.colors() {
        let a = alpha.get_pixel_checked(x, y).map_or(u8::MAX, |p| p.0[0]);
        pixels.extend_from_slice(&[color.r, color.g, color.b, a]);
    }

    Raster::new(width, height, Channels::Rgba, pixels)
}
