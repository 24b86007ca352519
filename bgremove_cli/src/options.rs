use std::path::Path;

use anyhow::Context;
use bgremove_common::{PolicyBundle, ProcessingOptions};

use crate::{Args, Bundle};

/// Reads a JSON options document. Missing fields take their defaults.
pub fn load_options_file(path: &Path) -> anyhow::Result<ProcessingOptions> {
    let file = std::fs::File::open(path).with_context(|| format!("opening options {path:?}"))?;
    let options = serde_json::from_reader(std::io::BufReader::new(file))
        .with_context(|| format!("parsing options {path:?}"))?;
    Ok(options)
}

/// Applies command line flags on top of `base`.
pub fn apply_args(mut base: ProcessingOptions, args: &Args) -> ProcessingOptions {
    if let Some(tolerance) = args.tolerance {
        base.tolerance = tolerance;
    }
    if args.no_checkered {
        base.remove_checkered = false;
    }
    for color in &args.colors {
        if !base.add_selected_color(*color) {
            log::info!("Skipping {color}, too close to an already selected color");
        }
    }

    // --solid/--shadow imply the solid-shadow bundle unless one was named.
    let wants_solid_shadow = args.solid || args.shadow;
    base.policies = match (args.bundle, base.policies) {
        (Some(Bundle::ColorPick), _) => PolicyBundle::ColorPick,
        (Some(Bundle::SolidShadow), _) | (None, PolicyBundle::ColorPick) if wants_solid_shadow => {
            PolicyBundle::SolidShadow {
                remove_solid: args.solid,
                remove_shadow: args.shadow,
            }
        }
        (Some(Bundle::SolidShadow), _) => PolicyBundle::SolidShadow {
            remove_solid: true,
            remove_shadow: false,
        },
        (None, PolicyBundle::SolidShadow { remove_solid, remove_shadow }) => {
            PolicyBundle::SolidShadow {
                remove_solid: remove_solid || args.solid,
                remove_shadow: remove_shadow || args.shadow,
            }
        }
        (None, PolicyBundle::ColorPick) => PolicyBundle::ColorPick,
    };

    if base.policies != PolicyBundle::ColorPick && !base.selected_colors.is_empty() {
        log::warn!("Selected colors are ignored by the solid-shadow bundle");
    }
    base
}
