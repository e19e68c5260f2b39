//! Convenience helpers for loading images via the `image` crate.
//!
//! Available when the `image-io` feature is enabled. All loaders convert to
//! 8-bit RGB, the only pixel format the matchers operate on.

use crate::image::{OwnedImage, Pixel};
use crate::util::{PixGrepError, PixGrepResult};
use std::path::Path;

/// Creates an owned image from an RGB8 image buffer.
pub fn owned_from_rgb_image(img: &image::RgbImage) -> PixGrepResult<OwnedImage> {
    let width = img.width() as usize;
    let height = img.height() as usize;
    let data: Vec<Pixel> = img.pixels().map(|px| px.0).collect();
    OwnedImage::new(data, width, height)
}

/// Creates an owned RGB image from a dynamic image of any color type.
pub fn owned_from_dynamic_image(img: &image::DynamicImage) -> PixGrepResult<OwnedImage> {
    let rgb = img.to_rgb8();
    owned_from_rgb_image(&rgb)
}

/// Loads an image from disk and converts it to an owned RGB image.
pub fn load_rgb_image<P: AsRef<Path>>(path: P) -> PixGrepResult<OwnedImage> {
    let img = image::open(path).map_err(|err| PixGrepError::ImageIo {
        reason: err.to_string(),
    })?;
    owned_from_dynamic_image(&img)
}
