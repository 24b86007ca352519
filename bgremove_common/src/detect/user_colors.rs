//! Removal of colors the user picked from the image.

use super::{fill_from_seeds, RemovalSink, USER_FILL_SCALE, USER_SEED_SCALE};
use crate::color::Color;
use crate::raster::Raster;
use crate::report::{Policy, RemovalReport};

/// Grows from every flood seed within `tolerance * 5` of a selected color.
///
/// Uses its own visited mask, so pixels the checkered pass rejected are
/// examined again here.
pub fn remove_selected_colors<S: RemovalSink + ?Sized>(
    raster: &Raster,
    selected: &[Color],
    tolerance: u32,
    sink: &mut S,
    report: &mut RemovalReport,
) -> usize {
    if selected.is_empty() || raster.is_empty() {
        return 0;
    }
    let tolerance = tolerance as f32;
    fill_from_seeds(
        raster,
        selected,
        tolerance * USER_SEED_SCALE,
        tolerance * USER_FILL_SCALE,
        Policy::UserColor,
        sink,
        report,
    )
}
