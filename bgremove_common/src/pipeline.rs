//! Entry points: full removal and mask preview.

use crate::composite::composite;
use crate::detect::{
    checkered, opaque_alpha, shadow, solid, user_colors, AlphaChannel, RemovalMask, RemovalSink,
};
use crate::error::{BgError, Result};
use crate::options::{PolicyBundle, ProcessingOptions};
use crate::preview::render_overlay;
use crate::raster::Raster;
use crate::report::RemovalReport;

fn validate(raster: &Raster, options: &ProcessingOptions) -> Result<()> {
    if raster.is_empty() {
        return Err(BgError::InvalidInput(format!(
            "raster has zero dimension ({}x{})",
            raster.width(),
            raster.height()
        )));
    }
    options.validate()
}

/// Policies shared by removal and preview: checkered, then picked colors.
fn run_seeded_policies<S: RemovalSink + ?Sized>(
    raster: &Raster,
    options: &ProcessingOptions,
    sink: &mut S,
    report: &mut RemovalReport,
) {
    if options.remove_checkered {
        let n = checkered::remove_checkered(raster, options.tolerance, sink, report);
        log::debug!("checkered policy accepted {n} pixels");
    }
    if options.policies == PolicyBundle::ColorPick {
        let n = user_colors::remove_selected_colors(
            raster,
            &options.selected_colors,
            options.tolerance,
            sink,
            report,
        );
        log::debug!("user color policy accepted {n} pixels");
    }
}

/// Makes the detected background transparent.
pub fn process(raster: &Raster, options: &ProcessingOptions) -> Result<Raster> {
    process_with_report(raster, options).map(|(out, _)| out)
}

/// [`process`], also returning the trace of seeds and estimates used.
pub fn process_with_report(
    raster: &Raster,
    options: &ProcessingOptions,
) -> Result<(Raster, RemovalReport)> {
    validate(raster, options)?;
    let mut report = RemovalReport::new(raster.width(), raster.height(), options.tolerance);
    let mut alpha: AlphaChannel = opaque_alpha(raster.width(), raster.height());

    run_seeded_policies(raster, options, &mut alpha, &mut report);

    if let PolicyBundle::SolidShadow {
        remove_solid,
        remove_shadow,
    } = options.policies
    {
        if remove_solid {
            let n = solid::remove_solid_background(raster, options.tolerance, &mut alpha, &mut report);
            log::debug!("solid policy removed {n} pixels");
        }
        if remove_shadow {
            let n = shadow::remove_shadows(raster, options.tolerance, &mut alpha, &mut report);
            log::debug!("shadow policy attenuated {n} pixels");
        }
    }

    report.removed_pixels = alpha.pixels().filter(|p| p.0[0] == 0).count();
    log::info!(
        "{}x{}: {} of {} pixels transparent",
        raster.width(),
        raster.height(),
        report.removed_pixels,
        raster.width() as usize * raster.height() as usize
    );

    let out = composite(raster, &alpha)?;
    Ok((out, report))
}

/// Highlights what the checkered and picked-color policies would remove.
pub fn preview_mask(raster: &Raster, options: &ProcessingOptions) -> Result<Raster> {
    preview_with_report(raster, options).map(|(out, _)| out)
}

/// [`preview_mask`], also returning the trace of seeds used.
pub fn preview_with_report(
    raster: &Raster,
    options: &ProcessingOptions,
) -> Result<(Raster, RemovalReport)> {
    validate(raster, options)?;
    let mut report = RemovalReport::new(raster.width(), raster.height(), options.tolerance);
    let mut mask = RemovalMask::new(raster.width(), raster.height());

    run_seeded_policies(raster, options, &mut mask, &mut report);

    report.removed_pixels = mask.count();
    log::info!("preview marks {} pixels", report.removed_pixels);

    let out = render_overlay(raster, &mask)?;
    Ok((out, report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;

    #[test]
    fn zero_dimension_is_invalid() {
        let raster = Raster::filled(0, 4, Color::RED);
        let opts = ProcessingOptions::default();
        assert!(matches!(process(&raster, &opts), Err(BgError::InvalidInput(_))));
        assert!(matches!(preview_mask(&raster, &opts), Err(BgError::InvalidInput(_))));
    }

    #[test]
    fn out_of_range_tolerance_is_invalid() {
        let raster = Raster::filled(2, 2, Color::RED);
        let opts = ProcessingOptions {
            tolerance: 80,
            ..Default::default()
        };
        assert!(matches!(process(&raster, &opts), Err(BgError::InvalidInput(_))));
    }

    #[test]
    fn nothing_enabled_keeps_everything_opaque() {
        let raster = Raster::filled(3, 3, Color::new(40, 50, 60));
        let opts = ProcessingOptions {
            remove_checkered: false,
            ..Default::default()
        };
        let out = process(&raster, &opts).unwrap();
        assert!(out.pixels().chunks_exact(4).all(|p| p[3] == 255));
    }

    #[test]
    fn solid_bundle_skips_picked_colors() {
        let raster = Raster::filled(3, 3, Color::new(40, 50, 60));
        let mut opts = ProcessingOptions {
            remove_checkered: false,
            policies: PolicyBundle::SolidShadow {
                remove_solid: false,
                remove_shadow: false,
            },
            ..Default::default()
        };
        opts.add_selected_color(Color::new(40, 50, 60));

        let (out, report) = process_with_report(&raster, &opts).unwrap();

        assert!(report.seeds.is_empty());
        assert!(out.pixels().chunks_exact(4).all(|p| p[3] == 255));
    }

    #[test]
    fn shadow_runs_after_solid() {
        // Light frame around a dark core: solid clears the frame, shadow the core.
        let raster = Raster::from_fn(30, 30, |x, y| {
            if (8..22).contains(&x) && (8..22).contains(&y) {
                Color::new(15, 15, 15)
            } else {
                Color::new(240, 240, 240)
            }
        });
        let opts = ProcessingOptions {
            remove_checkered: false,
            policies: PolicyBundle::SolidShadow {
                remove_solid: true,
                remove_shadow: true,
            },
            ..Default::default()
        };

        let (out, report) = process_with_report(&raster, &opts).unwrap();

        assert_eq!(out.alpha_at(0, 0), Some(0));
        assert!(out.alpha_at(15, 15).unwrap() <= 1);
        assert!(report.shadow_pixels > 0);
        assert_eq!(report.background_color, Some(Color::new(240, 240, 240)));
    }
}
