//! Pixel grids: borrowed views and owned RGB buffers.
//!
//! `ImageView` is a borrowed 2D view into a 1D pixel buffer with an explicit
//! stride. The stride counts pixels between the starts of consecutive rows,
//! so a stride larger than the width represents padded rows. ROI slices are
//! zero-copy views into the same backing slice and retain the original
//! stride. `OwnedImage` is the contiguous owned counterpart used for scenes
//! and templates; both roles share the representation.

use crate::util::{PixGrepError, PixGrepResult};

pub mod resample;

#[cfg(feature = "image-io")]
pub mod io;

/// A single RGB pixel as an ordered triple of 8-bit channel intensities.
pub type Pixel = [u8; 3];

/// Borrowed 2D image view with an explicit stride.
#[derive(Copy, Clone)]
pub struct ImageView<'a, P> {
    data: &'a [P],
    width: usize,
    height: usize,
    stride: usize,
}

impl<'a, P> ImageView<'a, P> {
    /// Creates a contiguous view with `stride == width`.
    pub fn from_slice(data: &'a [P], width: usize, height: usize) -> PixGrepResult<Self> {
        Self::new(data, width, height, width)
    }

    /// Creates a view with an explicit stride.
    pub fn new(data: &'a [P], width: usize, height: usize, stride: usize) -> PixGrepResult<Self> {
        let needed = required_len(width, height, stride)?;
        if data.len() < needed {
            return Err(PixGrepError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
            stride,
        })
    }

    /// Returns the image width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the image height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the stride in pixels between row starts.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Returns the backing slice including any row padding.
    pub fn as_slice(&self) -> &'a [P] {
        self.data
    }

    /// Returns the pixel at `(x, y)` if it is within bounds.
    pub fn get(&self, x: usize, y: usize) -> Option<&'a P> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = y.checked_mul(self.stride)?.checked_add(x)?;
        self.data.get(idx)
    }

    /// Returns a contiguous slice for row `y` with length `width`.
    pub fn row(&self, y: usize) -> Option<&'a [P]> {
        if y >= self.height {
            return None;
        }
        let start = y.checked_mul(self.stride)?;
        let end = start.checked_add(self.width)?;
        self.data.get(start..end)
    }

    /// Returns a zero-copy ROI view into the same backing buffer.
    pub fn roi(
        &self,
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    ) -> PixGrepResult<ImageView<'a, P>> {
        if width == 0 || height == 0 {
            return Err(PixGrepError::InvalidDimensions { width, height });
        }

        let img_width = self.width;
        let img_height = self.height;
        let out_of_bounds = PixGrepError::RoiOutOfBounds {
            x,
            y,
            width,
            height,
            img_width,
            img_height,
        };
        if x >= img_width || y >= img_height {
            return Err(out_of_bounds);
        }

        let end_x = x.checked_add(width).ok_or(out_of_bounds.clone())?;
        let end_y = y.checked_add(height).ok_or(out_of_bounds.clone())?;
        if end_x > img_width || end_y > img_height {
            return Err(out_of_bounds);
        }

        let start = y
            .checked_mul(self.stride)
            .and_then(|v| v.checked_add(x))
            .ok_or(PixGrepError::InvalidDimensions {
                width: img_width,
                height: img_height,
            })?;
        let data = self.data.get(start..).ok_or(PixGrepError::BufferTooSmall {
            needed: start.saturating_add(1),
            got: self.data.len(),
        })?;

        ImageView::new(data, width, height, self.stride)
    }
}

/// Owned contiguous RGB image buffer.
#[derive(Clone)]
pub struct OwnedImage {
    data: Vec<Pixel>,
    width: usize,
    height: usize,
}

impl OwnedImage {
    /// Creates an image from a contiguous row-major pixel buffer.
    ///
    /// The buffer length must be exactly `width * height`.
    pub fn new(data: Vec<Pixel>, width: usize, height: usize) -> PixGrepResult<Self> {
        if width == 0 || height == 0 {
            return Err(PixGrepError::InvalidDimensions { width, height });
        }
        let needed = width
            .checked_mul(height)
            .ok_or(PixGrepError::InvalidDimensions { width, height })?;
        if data.len() < needed {
            return Err(PixGrepError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        if data.len() > needed {
            return Err(PixGrepError::InvalidDimensions { width, height });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Copies a (possibly strided) view into a contiguous owned image.
    pub fn from_view(view: ImageView<'_, Pixel>) -> PixGrepResult<Self> {
        let width = view.width();
        let height = view.height();
        let needed = width
            .checked_mul(height)
            .ok_or(PixGrepError::InvalidDimensions { width, height })?;
        let mut data = vec![[0u8; 3]; needed];
        for y in 0..height {
            let row = view.row(y).ok_or(PixGrepError::BufferTooSmall {
                needed,
                got: view.as_slice().len(),
            })?;
            data[y * width..(y + 1) * width].copy_from_slice(row);
        }
        Self::new(data, width, height)
    }

    /// Returns the image width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the image height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the raw pixel buffer in row-major order.
    pub fn data(&self) -> &[Pixel] {
        &self.data
    }

    /// Returns a borrowed view of the image.
    pub fn view(&self) -> ImageView<'_, Pixel> {
        ImageView {
            data: &self.data,
            width: self.width,
            height: self.height,
            stride: self.width,
        }
    }
}

fn required_len(width: usize, height: usize, stride: usize) -> PixGrepResult<usize> {
    if width == 0 || height == 0 {
        return Err(PixGrepError::InvalidDimensions { width, height });
    }
    if stride < width {
        return Err(PixGrepError::InvalidStride { width, stride });
    }
    let needed = (height - 1)
        .checked_mul(stride)
        .and_then(|v| v.checked_add(width))
        .ok_or(PixGrepError::InvalidDimensions { width, height })?;
    Ok(needed)
}
