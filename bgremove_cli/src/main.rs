mod options;
mod process_image;

use std::path::PathBuf;

use bgremove_common::Color;
use clap::{Parser, ValueEnum};
use tracing_subscriber::prelude::*;

/// Which policies run alongside checkered removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Bundle {
    /// Checkered + picked colors.
    ColorPick,
    /// Checkered + solid background + shadows.
    SolidShadow,
}

#[derive(Debug, Parser)]
pub struct Args {
    /// Path to input image (.jpeg/.png).
    input: PathBuf,
    /// Output path. Defaults to `<stem>-transparent.png`, or
    /// `<stem>-preview.png` with `--preview`.
    #[arg(long, short)]
    output: Option<PathBuf>,
    /// JSON file with processing options; flags below override it.
    #[arg(long)]
    options: Option<PathBuf>,
    /// Color tolerance, higher removes more similar colors.
    #[arg(long, short, value_parser = clap::value_parser!(u32).range(5..=50))]
    tolerance: Option<u32>,
    /// Keep checkered transparency patterns.
    #[arg(long, action)]
    no_checkered: bool,
    /// Background color to remove, as `r,g,b` or `#rrggbb`. Repeatable.
    #[arg(long = "color", short = 'c')]
    colors: Vec<Color>,
    /// Pick the background color at `x,y` of the input. Repeatable.
    #[arg(long = "pick", value_parser = parse_point)]
    picks: Vec<(u32, u32)>,
    /// Policy bundle to run after checkered removal.
    #[arg(long, value_enum)]
    bundle: Option<Bundle>,
    /// Remove the average border color (solid-shadow bundle).
    #[arg(long, action)]
    solid: bool,
    /// Attenuate dark shadow regions (solid-shadow bundle).
    #[arg(long, action)]
    shadow: bool,
    /// Write a red overlay of what would be removed instead of removing it.
    #[arg(long, action, default_value = "false")]
    preview: bool,
    /// Also write a `<stem>.report.json` with the seeds and colors used.
    #[arg(long, action, default_value = "false")]
    report: bool,
}

fn parse_point(s: &str) -> Result<(u32, u32), String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected x,y, got {s:?}"))?;
    let coord = |v: &str| v.trim().parse::<u32>().map_err(|e| format!("{v:?}: {e}"));
    Ok((coord(x)?, coord(y)?))
}

fn main() -> anyhow::Result<()> {
    // Initialize logging.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,bgremove_cli=info,bgremove_common=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    match args.input.extension().and_then(|os_str| os_str.to_str()) {
        Some("jpeg" | "jpg" | "png") => process_image::process_image(&args)?,
        Some(unk) => log::error!("Unhandled file extension: {unk}"),
        None => log::error!(
            "Input path does not have valid file extension: {:?}",
            args.input
        ),
    }

    Ok(())
}
