//! Bounding boxes and match outcomes.
//!
//! A `BoundingBox` is inclusive: `(x, y)` is the top-left corner and the box
//! covers pixels `[x, x + w - 1] x [y, y + h - 1]`. Real matches always have
//! positive width and height; "template not present" is expressed by
//! `MatchOutcome::NotFound`, never by a degenerate box.

/// Inclusive rectangular match region with top-left corner and extent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundingBox {
    /// Left edge (column) of the region.
    pub x: u32,
    /// Top edge (row) of the region.
    pub y: u32,
    /// Width in pixels.
    pub w: u32,
    /// Height in pixels.
    pub h: u32,
}

impl BoundingBox {
    /// Creates a bounding box from its top-left corner and extent.
    pub fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    /// Returns the horizontal center of the region.
    pub fn center_x(&self) -> f32 {
        self.x as f32 + self.w as f32 / 2.0
    }

    /// Returns the vertical center of the region.
    pub fn center_y(&self) -> f32 {
        self.y as f32 + self.h as f32 / 2.0
    }
}

/// Result of a single template query: a located region or nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchOutcome {
    /// The template was located at the contained region.
    Found(BoundingBox),
    /// The template is not present in the scene.
    NotFound,
}

impl MatchOutcome {
    /// Returns the bounding box for a located match.
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        match self {
            Self::Found(bbox) => Some(*bbox),
            Self::NotFound => None,
        }
    }

    /// Returns true for a located match.
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }
}

impl From<Option<BoundingBox>> for MatchOutcome {
    fn from(value: Option<BoundingBox>) -> Self {
        match value {
            Some(bbox) => Self::Found(bbox),
            None => Self::NotFound,
        }
    }
}

impl From<MatchOutcome> for Option<BoundingBox> {
    fn from(value: MatchOutcome) -> Self {
        value.bounding_box()
    }
}
