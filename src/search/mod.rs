//! Search strategies for locating template matches.
//!
//! `exact` performs brute-force pixel-identical matching; `scaled` performs
//! the approximate scale-sweep search built on a normalized
//! squared-difference scan.

use crate::geom::BoundingBox;

pub mod exact;
pub mod scaled;

pub use scaled::{Placement, ScaledMatcher};

/// Policy for the scale-robust heuristic search.
///
/// The defaults are part of the stable contract with recorded fixtures:
/// scales `[1.0, 0.5, 2.0]` tried in that order, candidates accepted at or
/// below `0.4`, and the sweep stopped early once a recorded best reaches
/// `0.1`.
#[derive(Clone, Debug)]
pub struct ScaleSearchConfig {
    /// Scale factors to try, in order.
    pub scales: Vec<f32>,
    /// Highest (worst) score a candidate may have and still be recorded.
    pub accept_score: f32,
    /// Once the recorded best is at or below this score, later scales are
    /// not evaluated.
    pub early_stop_score: f32,
    /// Use the row-parallel scan (requires the `rayon` feature; ignored
    /// otherwise).
    pub parallel: bool,
}

impl Default for ScaleSearchConfig {
    fn default() -> Self {
        Self {
            scales: vec![1.0, 0.5, 2.0],
            accept_score: 0.4,
            early_stop_score: 0.1,
            parallel: false,
        }
    }
}

/// Best approximate match found by the heuristic search.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaledMatch {
    /// Match region at the winning rescaled template dimensions.
    pub bbox: BoundingBox,
    /// Normalized squared-difference score (0 is a perfect match).
    pub score: f32,
    /// Scale factor that produced the winning candidate.
    pub scale: f32,
}

/// Sweep outcome plus the scales whose scans actually ran.
///
/// `scales_evaluated` excludes scales skipped because the rescaled template
/// could not be placed inside the scene.
#[derive(Clone, Debug)]
pub struct ScaleSearchReport {
    /// The recorded best candidate, if any scale produced an acceptable one.
    pub best: Option<ScaledMatch>,
    /// Scale factors that were scanned, in evaluation order.
    pub scales_evaluated: Vec<f32>,
}
