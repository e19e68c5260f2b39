//! Persisted fixture records consumed as accepted answer sets.
//!
//! Fixture generators record, per query, the scene and template image paths
//! (relative to a resource root) plus a non-empty list of accepted bounding
//! boxes as 4-integer arrays. The all-zero quad is the historical "no match"
//! sentinel; it is confined to this serialization boundary, and in-memory
//! code works with [`MatchOutcome`] instead.

use crate::geom::{BoundingBox, MatchOutcome};
use std::path::{Path, PathBuf};

/// Serialized sentinel meaning "no detection is acceptable".
pub const NOT_FOUND_QUAD: [u32; 4] = [0, 0, 0, 0];

/// Encodes an outcome as a fixture quad.
pub fn outcome_to_quad(outcome: MatchOutcome) -> [u32; 4] {
    match outcome {
        MatchOutcome::Found(bbox) => [bbox.x, bbox.y, bbox.w, bbox.h],
        MatchOutcome::NotFound => NOT_FOUND_QUAD,
    }
}

/// Decodes a fixture quad into an outcome.
///
/// Only the exact all-zero quad is the sentinel; real accepted boxes always
/// have positive extents (a fixture-generation invariant, not validated
/// here).
pub fn outcome_from_quad(quad: [u32; 4]) -> MatchOutcome {
    if quad == NOT_FOUND_QUAD {
        MatchOutcome::NotFound
    } else {
        MatchOutcome::Found(BoundingBox::new(quad[0], quad[1], quad[2], quad[3]))
    }
}

/// One recorded query: image paths plus the accepted answers.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FixtureRecord {
    /// Record kind tag, e.g. `"find-one"`.
    #[cfg_attr(feature = "serde", serde(rename = "type", default))]
    pub kind: String,
    /// Scene image path, relative to the resource root.
    pub image: String,
    /// Template image path, relative to the resource root.
    pub template: String,
    /// Accepted answers as `[x, y, w, h]` quads; `[0, 0, 0, 0]` marks
    /// "no detection" as acceptable.
    pub bounding_boxes: Vec<[u32; 4]>,
}

impl FixtureRecord {
    /// Decodes the recorded quads into an ordered accepted answer set.
    pub fn accepted_answers(&self) -> Vec<MatchOutcome> {
        self.bounding_boxes
            .iter()
            .map(|&quad| outcome_from_quad(quad))
            .collect()
    }

    /// Resolves the scene image path against a resource root.
    pub fn image_path(&self, resource_root: &Path) -> PathBuf {
        resource_root.join(&self.image)
    }

    /// Resolves the template image path against a resource root.
    pub fn template_path(&self, resource_root: &Path) -> PathBuf {
        resource_root.join(&self.template)
    }
}

#[cfg(test)]
mod tests {
    use super::{outcome_from_quad, outcome_to_quad, NOT_FOUND_QUAD};
    use crate::geom::{BoundingBox, MatchOutcome};

    #[test]
    fn quads_round_trip() {
        let found = MatchOutcome::Found(BoundingBox::new(3, 7, 20, 10));
        assert_eq!(outcome_from_quad(outcome_to_quad(found)), found);
        assert_eq!(outcome_to_quad(MatchOutcome::NotFound), NOT_FOUND_QUAD);
        assert_eq!(outcome_from_quad(NOT_FOUND_QUAD), MatchOutcome::NotFound);
    }
}
