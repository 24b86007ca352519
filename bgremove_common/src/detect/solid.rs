//! Solid background removal keyed on the average border color.

use super::{AlphaChannel, RemovalSink, AUTO_TOLERANCE_SCALE};
use crate::color::Color;
use crate::error::{BgError, Result};
use crate::raster::{Channels, Raster};
use crate::region::VisitedMask;
use crate::report::{CornerFill, RemovalReport};

/// Every n-th pixel along each border is sampled.
const BORDER_SAMPLE_STEP: usize = 5;

/// Rounded mean of the border pixels (top, bottom, left, right).
pub fn detect_background_color(raster: &Raster) -> Color {
    if raster.is_empty() {
        return Color::default();
    }
    let (right, bottom) = (raster.width() - 1, raster.height() - 1);
    let xs = (0..raster.width()).step_by(BORDER_SAMPLE_STEP);
    let ys = (0..raster.height()).step_by(BORDER_SAMPLE_STEP);

    let samples = xs
        .clone()
        .map(|x| (x, 0))
        .chain(xs.map(|x| (x, bottom)))
        .chain(ys.clone().map(|y| (0, y)))
        .chain(ys.map(|y| (right, y)));

    let (mut r, mut g, mut b, mut count) = (0u64, 0u64, 0u64, 0u64);
    for (x, y) in samples {
        let c = raster.color_unchecked(x, y);
        r += c.r as u64;
        g += c.g as u64;
        b += c.b as u64;
        count += 1;
    }

    let mean = |sum: u64| (sum as f64 / count as f64).round() as u8;
    Color::new(mean(r), mean(g), mean(b))
}

/// Best-effort flood fill from the top-left corner.
///
/// Neighbours join when every channel is within `tolerance` of the pixel
/// they were reached from. Only 3-channel rasters are supported. The result
/// is informational and never touches alpha.
pub fn corner_fill(raster: &Raster, tolerance: u32) -> Result<usize> {
    if raster.channels() != Channels::Rgb {
        return Err(BgError::InternalFailure(format!(
            "corner fill supports 3-channel rasters, got {}",
            raster.channels().count()
        )));
    }
    if raster.is_empty() {
        return Err(BgError::InternalFailure("corner fill on an empty raster".into()));
    }

    let within = |a: Color, b: Color| {
        a.r.abs_diff(b.r) as u32 <= tolerance
            && a.g.abs_diff(b.g) as u32 <= tolerance
            && a.b.abs_diff(b.b) as u32 <= tolerance
    };

    let mut visited = VisitedMask::for_raster(raster);
    let mut stack = vec![(0u32, 0u32)];
    visited.visit(0, 0);
    let mut filled = 0;

    while let Some((x, y)) = stack.pop() {
        filled += 1;
        let here = raster.color_unchecked(x, y);
        let neighbours = [
            x.checked_sub(1).map(|nx| (nx, y)),
            Some((x + 1, y)),
            y.checked_sub(1).map(|ny| (x, ny)),
            Some((x, y + 1)),
        ];
        for (nx, ny) in neighbours.into_iter().flatten() {
            if !raster.contains(nx, ny) || visited.is_visited(nx, ny) {
                continue;
            }
            if within(here, raster.color_unchecked(nx, ny)) {
                visited.visit(nx, ny);
                stack.push((nx, ny));
            }
        }
    }

    Ok(filled)
}

/// Zeroes alpha wherever a pixel is closer than `tolerance * 3` to the
/// border average. Returns the number of pixels removed.
pub fn remove_solid_background(
    raster: &Raster,
    tolerance: u32,
    alpha: &mut AlphaChannel,
    report: &mut RemovalReport,
) -> usize {
    if raster.is_empty() {
        return 0;
    }
    let background = detect_background_color(raster);
    report.background_color = Some(background);
    log::debug!("estimated background color {background}");

    report.corner_fill = Some(match corner_fill(raster, tolerance) {
        Ok(pixels) => {
            log::debug!("corner fill reached {pixels} pixels");
            CornerFill::Filled { pixels }
        }
        Err(err) => {
            log::warn!("corner fill skipped, continuing with full scan: {err}");
            CornerFill::Skipped {
                reason: err.to_string(),
            }
        }
    });

    let limit = tolerance as f32 * AUTO_TOLERANCE_SCALE;
    let mut removed = 0;
    for (x, y, color) in raster.colors() {
        if (color.distance(background) as f32) < limit {
            alpha.remove(x, y);
            removed += 1;
        }
    }
    removed
}
