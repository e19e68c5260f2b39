//! Pixgrep locates a small template image inside a larger scene image.
//!
//! Two alternative matchers are provided: a brute-force exact matcher that
//! finds every pixel-identical occurrence, and a scale-robust heuristic
//! matcher that sweeps a fixed list of scale factors and returns the single
//! best placement under a normalized squared-difference metric. A tolerant
//! verifier checks produced results against recorded accepted answer sets,
//! with optional parallelism via the `rayon` feature.

pub mod fixture;
mod geom;
pub mod image;
pub mod search;
mod trace;
pub mod util;
pub mod verify;

pub use crate::geom::{BoundingBox, MatchOutcome};
pub use crate::image::resample::{resize_rgb, scaled_dims};
pub use crate::image::{ImageView, OwnedImage, Pixel};
pub use crate::search::exact::{find_all, find_first};
pub use crate::search::scaled::scan_sqdiff_normed;
#[cfg(feature = "rayon")]
pub use crate::search::scaled::scan_sqdiff_normed_par;
pub use crate::search::{
    Placement, ScaleSearchConfig, ScaleSearchReport, ScaledMatch, ScaledMatcher,
};
pub use crate::util::{PixGrepError, PixGrepResult};
pub use crate::verify::{verify, FailReason, FailureReport, Tolerance, Verdict, Verifier};

pub use crate::fixture::FixtureRecord;

#[cfg(feature = "image-io")]
pub use crate::image::io;
