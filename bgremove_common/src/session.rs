//! Interactive editing state: a loaded image plus the options being tuned.

use crate::color::Color;
use crate::error::{BgError, Result};
use crate::options::{check_tolerance, ProcessingOptions};
use crate::pipeline;
use crate::raster::Raster;
use crate::report::RemovalReport;

/// Holds the image being edited between user interactions.
///
/// Processing before an image is loaded fails with [`BgError::NotReady`].
#[derive(Debug, Default)]
pub struct Session {
    raster: Option<Raster>,
    options: ProcessingOptions,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ProcessingOptions) -> Self {
        Self {
            raster: None,
            options,
        }
    }

    /// Replaces the loaded image. Options, including picked colors, are kept.
    pub fn load(&mut self, raster: Raster) {
        log::debug!("loaded {}x{} raster", raster.width(), raster.height());
        self.raster = Some(raster);
    }

    /// Drops the loaded image.
    pub fn reset(&mut self) {
        self.raster = None;
    }

    pub fn raster(&self) -> Option<&Raster> {
        self.raster.as_ref()
    }

    pub fn options(&self) -> &ProcessingOptions {
        &self.options
    }

    pub fn options_mut(&mut self) -> &mut ProcessingOptions {
        &mut self.options
    }

    pub fn set_tolerance(&mut self, tolerance: u32) -> Result<()> {
        check_tolerance(tolerance)?;
        self.options.tolerance = tolerance;
        Ok(())
    }

    fn loaded(&self) -> Result<&Raster> {
        self.raster
            .as_ref()
            .ok_or_else(|| BgError::NotReady("no image loaded yet".into()))
    }

    /// Samples the loaded image at `(x, y)` and selects that color.
    /// Returns the color and whether it was new.
    pub fn pick_color(&mut self, x: u32, y: u32) -> Result<(Color, bool)> {
        let raster = self.loaded()?;
        let color = raster.color_at(x, y).ok_or_else(|| {
            BgError::InvalidInput(format!(
                "pick at ({x}, {y}) outside {}x{} image",
                raster.width(),
                raster.height()
            ))
        })?;
        let added = self.options.add_selected_color(color);
        Ok((color, added))
    }

    pub fn process(&self) -> Result<(Raster, RemovalReport)> {
        pipeline::process_with_report(self.loaded()?, &self.options)
    }

    pub fn preview(&self) -> Result<(Raster, RemovalReport)> {
        pipeline::preview_with_report(self.loaded()?, &self.options)
    }
}
