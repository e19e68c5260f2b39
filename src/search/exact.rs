//! Brute-force scan for pixel-identical template occurrences.
//!
//! Offsets are enumerated in row-major order (y outer ascending, x inner
//! ascending); an offset matches iff every pixel of the template equals the
//! corresponding scene pixel channel-for-channel. `find_all` and
//! `find_first` share the same window comparator and therefore agree on
//! which offsets match; they differ only in how many results they surface.

use crate::geom::BoundingBox;
use crate::image::{ImageView, Pixel};
use crate::trace::{trace_event, trace_span};

/// Collects every offset where the template matches the scene exactly.
///
/// Returns an empty vector when the template does not occur, including when
/// it is larger than the scene in either dimension (no valid offsets exist).
pub fn find_all(scene: ImageView<'_, Pixel>, template: ImageView<'_, Pixel>) -> Vec<BoundingBox> {
    let _span = trace_span!(
        "exact_find_all",
        scene_w = scene.width(),
        scene_h = scene.height()
    )
    .entered();

    let mut matches = Vec::new();
    let Some((max_x, max_y)) = placement_range(scene, template) else {
        return matches;
    };

    for y in 0..=max_y {
        for x in 0..=max_x {
            if window_matches(scene, template, x, y) {
                matches.push(BoundingBox::new(
                    x as u32,
                    y as u32,
                    template.width() as u32,
                    template.height() as u32,
                ));
            }
        }
    }

    trace_event!("exact_matches", count = matches.len());
    matches
}

/// Returns the first matching offset in row-major order, if any.
pub fn find_first(
    scene: ImageView<'_, Pixel>,
    template: ImageView<'_, Pixel>,
) -> Option<BoundingBox> {
    let _span = trace_span!(
        "exact_find_first",
        scene_w = scene.width(),
        scene_h = scene.height()
    )
    .entered();

    let (max_x, max_y) = placement_range(scene, template)?;
    for y in 0..=max_y {
        for x in 0..=max_x {
            if window_matches(scene, template, x, y) {
                return Some(BoundingBox::new(
                    x as u32,
                    y as u32,
                    template.width() as u32,
                    template.height() as u32,
                ));
            }
        }
    }
    None
}

/// Returns the maximum valid top-left placement, or `None` if the template
/// cannot be placed anywhere.
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

/// Compares the template against the scene window at `(x, y)`.
///
/// Row slices short-circuit on the first differing pixel, which does not
/// change which offsets match.
fn window_matches(
    scene: ImageView<'_, Pixel>,
    template: ImageView<'_, Pixel>,
    x: usize,
    y: usize,
) -> bool {
    let tpl_width = template.width();
    for ty in 0..template.height() {
        let scene_row = scene.row(y + ty).expect("row within bounds for scan");
        let tpl_row = template.row(ty).expect("template row within bounds");
        if scene_row[x..x + tpl_width] != *tpl_row {
            return false;
        }
    }
    true
}
