//! Shadow attenuation by brightness thresholding.

use image::{GrayImage, Luma};
use imageproc::filter::gaussian_blur_f32;
use imageproc::morphology::{grayscale_close, grayscale_open, Mask};

use super::{AlphaChannel, SHADOW_THRESHOLD_SCALE};
use crate::raster::Raster;
use crate::report::RemovalReport;

/// Blurred mask values above this attenuate alpha.
const SHADOW_CUTOFF: u8 = 128;

/// Sigma OpenCV derives for a 5x5 Gaussian kernel.
const BLUR_SIGMA: f32 = 1.1;

/// 5x5 elliptical structuring element.
fn ellipse_5x5() -> Mask {
    let element = GrayImage::from_fn(5, 5, |x, y| {
        let corner_row = y == 0 || y == 4;
        if corner_row && x != 2 {
            Luma([0])
        } else {
            Luma([255])
        }
    });
    Mask::from_image(&element, 2, 2)
}

/// Soft shadow mask: 255 where the HSV value is at or below
/// `tolerance * 2.5`, cleaned by an opening and a closing, then blurred.
pub fn shadow_mask(raster: &Raster, tolerance: u32) -> GrayImage {
    let threshold = tolerance as f32 * SHADOW_THRESHOLD_SCALE;
    let dark = GrayImage::from_fn(raster.width(), raster.height(), |x, y| {
        if raster.color_unchecked(x, y).value() as f32 <= threshold {
            Luma([255])
        } else {
            Luma([0])
        }
    });

    let element = ellipse_5x5();
    let cleaned = grayscale_close(&grayscale_open(&dark, &element), &element);
    gaussian_blur_f32(&cleaned, BLUR_SIGMA)
}

/// `floor(alpha * (1 - strength / 255))` in integer arithmetic.
fn attenuate(alpha: u8, strength: u8) -> u8 {
    (u32::from(alpha) * (255 - u32::from(strength)) / 255) as u8
}

/// Scales alpha down by the shadow strength wherever the mask exceeds 128.
/// Returns the number of attenuated pixels.
pub fn remove_shadows(
    raster: &Raster,
    tolerance: u32,
    alpha: &mut AlphaChannel,
    report: &mut RemovalReport,
) -> usize {
    if raster.is_empty() {
        return 0;
    }
    let mask = shadow_mask(raster, tolerance);
    let mut attenuated = 0;

    for (x, y, &Luma([strength])) in mask.enumerate_pixels() {
        if strength <= SHADOW_CUTOFF {
            continue;
        }
        alpha.put_pixel(x, y, Luma([attenuate(alpha.get_pixel(x, y).0[0], strength)]));
        attenuated += 1;
    }

    report.shadow_pixels = attenuated;
    attenuated
}
