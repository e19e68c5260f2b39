//! Error types for pixgrep.

use thiserror::Error;

/// Result alias for pixgrep operations.
pub type PixGrepResult<T> = std::result::Result<T, PixGrepError>;

/// Errors that can occur when constructing or slicing images.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PixGrepError {
    /// Image dimensions must both be positive.
    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions {
        /// Requested width in pixels.
        width: usize,
        /// Requested height in pixels.
        height: usize,
    },
    /// The row stride is smaller than the image width.
    #[error("invalid stride {stride} for width {width}")]
    InvalidStride {
        /// Requested width in pixels.
        width: usize,
        /// Requested stride in elements.
        stride: usize,
    },
    /// The backing buffer does not hold enough elements.
    #[error("buffer too small: needed {needed}, got {got}")]
    BufferTooSmall {
        /// Number of elements required by the view geometry.
        needed: usize,
        /// Number of elements actually provided.
        got: usize,
    },
    /// A requested region does not fit inside the image.
    #[error("roi ({x}, {y}, {width}, {height}) out of bounds for {img_width}x{img_height} image")]
    RoiOutOfBounds {
        /// ROI left edge.
        x: usize,
        /// ROI top edge.
        y: usize,
        /// ROI width.
        width: usize,
        /// ROI height.
        height: usize,
        /// Image width.
        img_width: usize,
        /// Image height.
        img_height: usize,
    },
    /// Loading or decoding an image file failed.
    #[cfg(feature = "image-io")]
    #[error("image io failed: {reason}")]
    ImageIo {
        /// Human-readable decoder error.
        reason: String,
    },
}
