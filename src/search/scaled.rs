//! Scale-robust heuristic matcher.
//!
//! The matcher sweeps an ordered list of scale factors, resampling the
//! template for each and scoring every placement with a normalized
//! squared-difference metric (0 means a perfect match, larger is worse).
//! Pixel values are converted to `[0, 1]` from the original 8-bit data
//! inside every scan; no normalized buffer is carried across scale
//! iterations.

use crate::geom::BoundingBox;
use crate::image::resample::{resize_rgb, scaled_dims};
use crate::image::{ImageView, Pixel};
use crate::search::{ScaleSearchConfig, ScaleSearchReport, ScaledMatch};
use crate::trace::{trace_event, trace_span};
#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Minimum-score placement produced by a dense scan.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    /// X coordinate (column) of the placement's top-left corner.
    pub x: usize,
    /// Y coordinate (row) of the placement's top-left corner.
    pub y: usize,
    /// Normalized squared-difference score at the placement.
    pub score: f32,
}

/// Approximate locator for the "at most one instance" case.
pub struct ScaledMatcher {
    config: ScaleSearchConfig,
}

impl Default for ScaledMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl ScaledMatcher {
    /// Creates a matcher with the default search policy.
    pub fn new() -> Self {
        Self {
            config: ScaleSearchConfig::default(),
        }
    }

    /// Replaces the search policy.
    pub fn with_config(mut self, config: ScaleSearchConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the active search policy.
    pub fn config(&self) -> &ScaleSearchConfig {
        &self.config
    }

    /// Returns the single best acceptable match, or `None`.
    pub fn find(
        &self,
        scene: ImageView<'_, Pixel>,
        template: ImageView<'_, Pixel>,
    ) -> Option<ScaledMatch> {
        self.find_with_report(scene, template).best
    }

    /// Runs the sweep and also reports which scales were scanned.
    pub fn find_with_report(
        &self,
        scene: ImageView<'_, Pixel>,
        template: ImageView<'_, Pixel>,
    ) -> ScaleSearchReport {
        let _span = trace_span!(
            "scale_search",
            scene_w = scene.width(),
            scene_h = scene.height()
        )
        .entered();

        let mut best: Option<ScaledMatch> = None;
        // "No acceptable candidate yet"; any accepted score must beat this.
        let mut best_score = 1.0f32;
        let mut scales_evaluated = Vec::new();

        for &scale in &self.config.scales {
            let (width, height) = scaled_dims(template.width(), template.height(), scale);
            if width == 0
                || height == 0
                || width > scene.width()
                || height > scene.height()
            {
                continue;
            }
            let resized = resize_rgb(template, width, height).expect("target dims are positive");
            scales_evaluated.push(scale);

            let Some(placement) = self.scan(scene, resized.view()) else {
                continue;
            };
            trace_event!(
                "scale_candidate",
                x = placement.x,
                y = placement.y,
                score = placement.score
            );

            if placement.score <= self.config.accept_score && placement.score < best_score {
                best_score = placement.score;
                best = Some(ScaledMatch {
                    bbox: BoundingBox::new(
                        placement.x as u32,
                        placement.y as u32,
                        width as u32,
                        height as u32,
                    ),
                    score: placement.score,
                    scale,
                });
                if best_score <= self.config.early_stop_score {
                    break;
                }
            }
        }

        ScaleSearchReport {
            best,
            scales_evaluated,
        }
    }

    fn scan(
        &self,
        scene: ImageView<'_, Pixel>,
        template: ImageView<'_, Pixel>,
    ) -> Option<Placement> {
        #[cfg(feature = "rayon")]
        if self.config.parallel {
            return scan_sqdiff_normed_par(scene, template);
        }
        scan_sqdiff_normed(scene, template)
    }
}

/// Scans every placement and returns the one with the minimum normalized
/// squared-difference score.
///
/// Ties keep the first placement in row-major order. Returns `None` when the
/// template cannot be placed or no placement yields a finite score.
pub fn scan_sqdiff_normed(
    scene: ImageView<'_, Pixel>,
    template: ImageView<'_, Pixel>,
) -> Option<Placement> {
    let (max_x, max_y) = placement_range(scene, template)?;
    let sum_t2 = template_sq_sum(template);

    let mut best: Option<Placement> = None;
    for y in 0..=max_y {
        for x in 0..=max_x {
            let Some(score) = sqdiff_normed_at(scene, template, sum_t2, x, y) else {
                continue;
            };
            if best.map_or(true, |b| score < b.score) {
                best = Some(Placement { x, y, score });
            }
        }
    }
    best
}

/// Row-parallel variant of [`scan_sqdiff_normed`].
///
/// Produces the same placement as the scalar scan, including its row-major
/// tie-breaking.
#[cfg(feature = "rayon")]
pub fn scan_sqdiff_normed_par(
    scene: ImageView<'_, Pixel>,
    template: ImageView<'_, Pixel>,
) -> Option<Placement> {
    let (max_x, max_y) = placement_range(scene, template)?;
    let sum_t2 = template_sq_sum(template);

    (0..=max_y)
        .into_par_iter()
        .filter_map(|y| {
            let mut row_best: Option<Placement> = None;
            for x in 0..=max_x {
                let Some(score) = sqdiff_normed_at(scene, template, sum_t2, x, y) else {
                    continue;
                };
                if row_best.map_or(true, |b| score < b.score) {
                    row_best = Some(Placement { x, y, score });
                }
            }
            row_best
        })
        .min_by(|a, b| {
            a.score
                .total_cmp(&b.score)
                .then_with(|| a.y.cmp(&b.y))
                .then_with(|| a.x.cmp(&b.x))
        })
}

fn placement_range(
    scene: ImageView<'_, Pixel>,
    template: ImageView<'_, Pixel>,
) -> Option<(usize, usize)> {
    if template.width() > scene.width() || template.height() > scene.height() {
        return None;
    }
    Some((
        scene.width() - template.width(),
        scene.height() - template.height(),
    ))
}

fn template_sq_sum(template: ImageView<'_, Pixel>) -> f32 {
    let mut sum_t2 = 0.0f32;
    for ty in 0..template.height() {
        let row = template.row(ty).expect("template row within bounds");
        for px in row {
            for &channel in px {
                let t = channel as f32 / 255.0;
                sum_t2 += t * t;
            }
        }
    }
    sum_t2
}

fn sqdiff_normed_at(
    scene: ImageView<'_, Pixel>,
    template: ImageView<'_, Pixel>,
    sum_t2: f32,
    x: usize,
    y: usize,
) -> Option<f32> {
    let mut sum_diff2 = 0.0f32;
    let mut sum_i2 = 0.0f32;

    for ty in 0..template.height() {
        let scene_row = scene.row(y + ty).expect("row within bounds for scan");
        let tpl_row = template.row(ty).expect("template row within bounds");
        for tx in 0..template.width() {
            let scene_px = scene_row[x + tx];
            let tpl_px = tpl_row[tx];
            for c in 0..3 {
                let i = scene_px[c] as f32 / 255.0;
                let t = tpl_px[c] as f32 / 255.0;
                let diff = t - i;
                sum_diff2 += diff * diff;
                sum_i2 += i * i;
            }
        }
    }

    let score = sum_diff2 / (sum_t2 * sum_i2).sqrt();
    score.is_finite().then_some(score)
}
