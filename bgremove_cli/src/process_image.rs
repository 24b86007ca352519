use std::path::{Path, PathBuf};

use anyhow::Context;
use bgremove_common::{ProcessingOptions, Raster, RemovalReport, Session};
use image::RgbaImage;

use crate::options::{apply_args, load_options_file};
use crate::Args;

/// `photo.jpg` -> `photo-transparent.png` next to the input.
fn default_output_path(input: &Path, preview: bool) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    let suffix = if preview { "preview" } else { "transparent" };
    input.with_file_name(format!("{stem}-{suffix}.png"))
}

fn write_report(path: &Path, report: &RemovalReport) -> anyhow::Result<()> {
    let file = std::fs::File::create(path).with_context(|| format!("creating {path:?}"))?;
    serde_json::to_writer_pretty(file, report)?;
    log::info!("Report saved to: {path:?}");
    Ok(())
}

/// Removes (or previews) the background of a single image file.
pub fn process_image(args: &Args) -> anyhow::Result<()> {
    let path = args.input.as_path();
    let _span = tracing::info_span!("process_image", path = ?path).entered();

    let base = match &args.options {
        Some(options_path) => load_options_file(options_path)?,
        None => ProcessingOptions::default(),
    };
    let mut session = Session::with_options(apply_args(base, args));

    // Read image.
    let og_image = image::open(path).with_context(|| format!("decoding {path:?}"))?;
    session.load(Raster::from(og_image));

    for &(x, y) in &args.picks {
        let (color, added) = session.pick_color(x, y)?;
        if added {
            log::info!("Picked {color} at ({x}, {y})");
        } else {
            log::info!("Picked {color} at ({x}, {y}), already selected");
        }
    }
    log::debug!("{:?}", session.options());

    // Process image.
    let (result, report) = if args.preview {
        session.preview()?
    } else {
        session.process()?
    };

    // Save output: image & optional report.
    let output_path = args
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(path, args.preview));
    let output = RgbaImage::from(&result);
    output
        .save_with_format(&output_path, image::ImageFormat::Png)
        .with_context(|| format!("writing {output_path:?}"))?;
    log::info!(
        "Saved {output_path:?}: {} of {} pixels {}",
        report.removed_pixels,
        report.width as usize * report.height as usize,
        if args.preview { "highlighted" } else { "transparent" }
    );

    if args.report {
        write_report(&path.with_extension("report.json"), &report)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_names_follow_input_stem() {
        assert_eq!(
            default_output_path(Path::new("shots/cat.photo.jpg"), false),
            PathBuf::from("shots/cat.photo-transparent.png")
        );
        assert_eq!(
            default_output_path(Path::new("cat.png"), true),
            PathBuf::from("cat-preview.png")
        );
    }
}
