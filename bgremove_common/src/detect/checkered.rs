//! Checkered transparency-pattern removal.

use super::{fill_from_seeds, seeds, RemovalSink, AUTO_TOLERANCE_SCALE};
use crate::cluster::{cluster, CHECKER_CLUSTER_THRESHOLD};
use crate::color::Color;
use crate::raster::Raster;
use crate::report::{Policy, RemovalReport};

/// Candidate checker colors sampled near the corners.
pub fn sample_checker_colors(raster: &Raster) -> Vec<Color> {
    if raster.is_empty() {
        return Vec::new();
    }
    let samples: Vec<Color> = seeds::checker_sample_points(raster.width(), raster.height())
        .into_iter()
        .map(|(x, y)| raster.color_unchecked(x, y))
        .collect();
    cluster(&samples, CHECKER_CLUSTER_THRESHOLD)
}

/// Grows from every flood seed matching a checker color. Returns the number
/// of pixels handed to `sink`.
pub fn remove_checkered<S: RemovalSink + ?Sized>(
    raster: &Raster,
    tolerance: u32,
    sink: &mut S,
    report: &mut RemovalReport,
) -> usize {
    let colors = sample_checker_colors(raster);
    report.checker_clusters = colors.clone();
    if colors.is_empty() {
        return 0;
    }
    log::debug!("checker colors: {colors:?}");

    let tolerance = tolerance as f32;
    fill_from_seeds(
        raster,
        &colors,
        tolerance * AUTO_TOLERANCE_SCALE,
        tolerance,
        Policy::Checkered,
        sink,
        report,
    )
}
