//! Processing options shared by the removal and preview paths.

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::{BgError, Result};

pub const TOLERANCE_MIN: u32 = 5;
pub const TOLERANCE_MAX: u32 = 50;
pub const DEFAULT_TOLERANCE: u32 = 20;

/// A picked color closer than this to an existing one is dropped.
pub const SELECTED_COLOR_DEDUP_DISTANCE: u32 = 15;

/// The policies that run after checkered removal.
///
/// Color picking and the solid/shadow heuristics are alternative designs and
/// never run together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PolicyBundle {
    /// Grow from the user's picked colors.
    #[default]
    ColorPick,
    /// Remove the average border color and attenuate shadows.
    SolidShadow { remove_solid: bool, remove_shadow: bool },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingOptions {
    pub remove_checkered: bool,
    pub tolerance: u32,
    /// Insertion order only matters for de-duplication.
    pub selected_colors: Vec<Color>,
    pub policies: PolicyBundle,
}

impl Default for ProcessingOptions {
    fn default() -> Self {
        Self {
            remove_checkered: true,
            tolerance: DEFAULT_TOLERANCE,
            selected_colors: Vec::new(),
            policies: PolicyBundle::default(),
        }
    }
}

impl ProcessingOptions {
    /// Appends `color` unless an already selected color is within distance 15.
    /// Returns whether it was added.
    pub fn add_selected_color(&mut self, color: Color) -> bool {
        let duplicate = self
            .selected_colors
            .iter()
            .any(|c| c.distance(color) < SELECTED_COLOR_DEDUP_DISTANCE);
        if duplicate {
            log::debug!("ignoring {color}, already selected");
            return false;
        }
        self.selected_colors.push(color);
        true
    }

    pub fn remove_selected_color(&mut self, index: usize) -> Option<Color> {
        (index < self.selected_colors.len()).then(|| self.selected_colors.remove(index))
    }

    pub fn clear_selected_colors(&mut self) {
        self.selected_colors.clear();
    }

    pub fn validate(&self) -> Result<()> {
        check_tolerance(self.tolerance)
    }
}

/// Rejects tolerances outside `TOLERANCE_MIN..=TOLERANCE_MAX`.
pub fn check_tolerance(tolerance: u32) -> Result<()> {
    if !(TOLERANCE_MIN..=TOLERANCE_MAX).contains(&tolerance) {
        return Err(BgError::InvalidInput(format!(
            "tolerance {tolerance} outside {TOLERANCE_MIN}..={TOLERANCE_MAX}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_ui() {
        let opts = ProcessingOptions::default();
        assert!(opts.remove_checkered);
        assert_eq!(opts.tolerance, 20);
        assert_eq!(opts.policies, PolicyBundle::ColorPick);
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn near_duplicate_colors_are_dropped() {
        let mut opts = ProcessingOptions::default();
        assert!(opts.add_selected_color(Color::new(100, 100, 100)));
        assert!(!opts.add_selected_color(Color::new(104, 105, 105)));
        assert!(opts.add_selected_color(Color::new(105, 105, 105)));
        assert_eq!(opts.selected_colors.len(), 2);
    }

    #[test]
    fn remove_and_clear() {
        let mut opts = ProcessingOptions::default();
        opts.add_selected_color(Color::RED);
        opts.add_selected_color(Color::new(0, 0, 255));
        assert_eq!(opts.remove_selected_color(5), None);
        assert_eq!(opts.remove_selected_color(0), Some(Color::RED));
        opts.clear_selected_colors();
        assert!(opts.selected_colors.is_empty());
    }

    #[test]
    fn tolerance_bounds() {
        let mut opts = ProcessingOptions::default();
        for (t, ok) in [(4, false), (5, true), (50, true), (51, false)] {
            opts.tolerance = t;
            assert_eq!(opts.validate().is_ok(), ok, "tolerance {t}");
        }
    }

    #[test]
    fn deserializes_partial_json() {
        let opts: ProcessingOptions = serde_json::from_str(
            r#"{"tolerance": 30, "policies": {"kind": "solid_shadow", "remove_solid": true, "remove_shadow": false}}"#,
        )
        .unwrap();
        assert!(opts.remove_checkered);
        assert_eq!(opts.tolerance, 30);
        assert_eq!(
            opts.policies,
            PolicyBundle::SolidShadow {
                remove_solid: true,
                remove_shadow: false
            }
        );
    }
}
