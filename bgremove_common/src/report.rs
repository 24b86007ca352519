//! Trace of the decisions taken during one call.

use serde::Serialize;

use crate::color::Color;

/// Which policy produced a seed attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Policy {
    Checkered,
    UserColor,
}

/// What happened at one flood seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SeedOutcome {
    /// An earlier seed of the same pass already covered it.
    AlreadyVisited,
    /// The seed color matched no candidate.
    NoMatch,
    /// Region growing ran toward `target`.
    Grown { target: Color, accepted: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeedAttempt {
    pub policy: Policy,
    pub x: u32,
    pub y: u32,
    /// Seed pixel color at the time of the attempt.
    pub color: Color,
    pub outcome: SeedOutcome,
}

/// Outcome of the best-effort corner fill of the solid policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CornerFill {
    Filled { pixels: usize },
    Skipped { reason: String },
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct RemovalReport {
    pub width: u32,
    pub height: u32,
    pub tolerance: u32,
    /// Checker colors found by clustering the corner samples.
    pub checker_clusters: Vec<Color>,
    pub seeds: Vec<SeedAttempt>,
    /// Border average used by the solid policy.
    pub background_color: Option<Color>,
    pub corner_fill: Option<CornerFill>,
    /// Pixels whose alpha the shadow policy reduced.
    pub shadow_pixels: usize,
    /// Pixels that ended fully transparent (or masked, for previews).
    pub removed_pixels: usize,
}

impl RemovalReport {
    pub(crate) fn new(width: u32, height: u32, tolerance: u32) -> Self {
        Self {
            width,
            height,
            tolerance,
            ..Default::default()
        }
    }

    /// Seeds from which growth actually ran.
    pub fn grown_seeds(&self) -> impl Iterator<Item = (&SeedAttempt, Color)> + '_ {
        self.seeds.iter().filter_map(|s| match s.outcome {
            SeedOutcome::Grown { target, .. } => Some((s, target)),
            _ => None,
        })
    }
}
