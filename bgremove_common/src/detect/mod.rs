//! Background detection policies.
//!
//! Each policy decides where to seed the region grower and which colors to
//! grow from, then records its decisions into a [`RemovalSink`]: the alpha
//! channel when removing, a [`RemovalMask`] when previewing.

pub mod checkered;
pub mod seeds;
pub mod shadow;
pub mod solid;
pub mod user_colors;

use image::{GrayImage, Luma};

use crate::cluster::nearest_within;
use crate::color::Color;
use crate::raster::Raster;
use crate::region::{self, VisitedMask};
use crate::report::{Policy, RemovalReport, SeedAttempt, SeedOutcome};

/// Multiplier applied to the tolerance by automatic (checkered, solid) detection.
pub const AUTO_TOLERANCE_SCALE: f32 = 3.0;
/// Multiplier qualifying a seed against a user-selected color.
pub const USER_SEED_SCALE: f32 = 5.0;
/// Multiplier applied before growing from a user-selected color.
pub const USER_FILL_SCALE: f32 = 1.5;
/// Multiplier turning the tolerance into a brightness threshold.
pub const SHADOW_THRESHOLD_SCALE: f32 = 2.5;

/// Receives the pixels a policy decided to remove.
pub trait RemovalSink {
    fn remove(&mut self, x: u32, y: u32);
}

/// Per-pixel opacity, 255 = opaque.
pub type AlphaChannel = GrayImage;

/// A fully opaque alpha channel.
pub fn opaque_alpha(width: u32, height: u32) -> AlphaChannel {
    GrayImage::from_pixel(width, height, Luma([u8::MAX]))
}

impl RemovalSink for AlphaChannel {
    fn remove(&mut self, x: u32, y: u32) {
        self.put_pixel(x, y, Luma([0]));
    }
}

/// Boolean "would be removed" grid used by the preview path.
#[derive(Debug, Clone)]
pub struct RemovalMask {
    width: u32,
    cells: Vec<bool>,
}

impl RemovalMask {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            cells: vec![false; width as usize * height as usize],
        }
    }

    pub fn is_removed(&self, x: u32, y: u32) -> bool {
        x < self.width
            && self
                .cells
                .get(y as usize * self.width as usize + x as usize)
                .copied()
                .unwrap_or(false)
    }

    pub fn count(&self) -> usize {
        self.cells.iter().filter(|&&v| v).count()
    }
}

impl RemovalSink for RemovalMask {
    fn remove(&mut self, x: u32, y: u32) {
        let i = y as usize * self.width as usize + x as usize;
        if let Some(cell) = self.cells.get_mut(i) {
            *cell = true;
        }
    }
}

/// Grows from the fixed flood seeds, one shared visited mask for all of them.
///
/// A seed qualifies when its color lies within `qualify` of some candidate;
/// it then grows toward that candidate with `fill_tolerance`.
pub(crate) fn fill_from_seeds<S: RemovalSink + ?Sized>(
    raster: &Raster,
    candidates: &[Color],
    qualify: f32,
    fill_tolerance: f32,
    policy: Policy,
    sink: &mut S,
    report: &mut RemovalReport,
) -> usize {
    let mut visited = VisitedMask::for_raster(raster);
    let mut total = 0;

    for (x, y) in seeds::flood_seeds(raster.width(), raster.height()) {
        let color = raster.color_unchecked(x, y);
        let outcome = if visited.is_visited(x, y) {
            SeedOutcome::AlreadyVisited
        } else if let Some(target) = nearest_within(color, candidates, qualify) {
            let accepted = region::grow(raster, &mut visited, (x, y), target, fill_tolerance, |px, py| {
                sink.remove(px, py)
            });
            total += accepted;
            SeedOutcome::Grown { target, accepted }
        } else {
            SeedOutcome::NoMatch
        };
        log::debug!("{policy:?} seed ({x}, {y}) {color}: {outcome:?}");
        report.seeds.push(SeedAttempt {
            policy,
            x,
            y,
            color,
            outcome,
        });
    }

    total
}
