//! Anti-aliased RGB rescaling.
//!
//! Downscaling uses area averaging: each destination pixel integrates the
//! source rectangle it covers, weighted by overlap, which suppresses
//! aliasing without a separate blur pass. Upscaling uses bilinear sampling
//! with the half-pixel center convention. Channel values are rounded to the
//! nearest integer and clamped to `[0, 255]` on output.

use crate::image::{ImageView, OwnedImage, Pixel};
use crate::util::{PixGrepError, PixGrepResult};

/// Returns the output dimensions for rescaling `width x height` by `scale`.
///
/// Both dimensions are rounded to the nearest integer; a small template at a
/// small scale can round to zero, which callers treat as "scale does not
/// apply" rather than an error.
pub fn scaled_dims(width: usize, height: usize, scale: f32) -> (usize, usize) {
    let w = (width as f32 * scale).round() as usize;
    let h = (height as f32 * scale).round() as usize;
    (w, h)
}

/// Resamples an RGB image to the requested dimensions.
pub fn resize_rgb(
    src: ImageView<'_, Pixel>,
    dst_width: usize,
    dst_height: usize,
) -> PixGrepResult<OwnedImage> {
    if dst_width == 0 || dst_height == 0 {
        return Err(PixGrepError::InvalidDimensions {
            width: dst_width,
            height: dst_height,
        });
    }

    if dst_width < src.width() || dst_height < src.height() {
        resize_area(src, dst_width, dst_height)
    } else {
        resize_bilinear(src, dst_width, dst_height)
    }
}

fn overlap(a0: f32, a1: f32, b0: f32, b1: f32) -> f32 {
    (a1.min(b1) - a0.max(b0)).max(0.0)
}

fn resize_area(
    src: ImageView<'_, Pixel>,
    dst_width: usize,
    dst_height: usize,
) -> PixGrepResult<OwnedImage> {
    let src_width = src.width();
    let src_height = src.height();
    let rx = src_width as f32 / dst_width as f32;
    let ry = src_height as f32 / dst_height as f32;

    let mut out = vec![[0u8; 3]; dst_width * dst_height];
    for y in 0..dst_height {
        let y0 = y as f32 * ry;
        let y1 = (y + 1) as f32 * ry;
        let sy_begin = y0.floor() as usize;
        let sy_end = (y1.ceil() as usize).min(src_height);

        for x in 0..dst_width {
            let x0 = x as f32 * rx;
            let x1 = (x + 1) as f32 * rx;
            let sx_begin = x0.floor() as usize;
            let sx_end = (x1.ceil() as usize).min(src_width);

            let mut acc = [0.0f32; 3];
            let mut weight_sum = 0.0f32;
            for sy in sy_begin..sy_end {
                let wy = overlap(sy as f32, sy as f32 + 1.0, y0, y1);
                if wy <= 0.0 {
                    continue;
                }
                let row = src.row(sy).expect("row within bounds for resample");
                for sx in sx_begin..sx_end {
                    let wx = overlap(sx as f32, sx as f32 + 1.0, x0, x1);
                    if wx <= 0.0 {
                        continue;
                    }
                    let w = wx * wy;
                    let px = row[sx];
                    acc[0] += px[0] as f32 * w;
                    acc[1] += px[1] as f32 * w;
                    acc[2] += px[2] as f32 * w;
                    weight_sum += w;
                }
            }

            let dst_px = &mut out[y * dst_width + x];
            for c in 0..3 {
                dst_px[c] = (acc[c] / weight_sum).round().clamp(0.0, 255.0) as u8;
            }
        }
    }

    OwnedImage::new(out, dst_width, dst_height)
}

fn resize_bilinear(
    src: ImageView<'_, Pixel>,
    dst_width: usize,
    dst_height: usize,
) -> PixGrepResult<OwnedImage> {
    let src_width = src.width();
    let src_height = src.height();
    let rx = src_width as f32 / dst_width as f32;
    let ry = src_height as f32 / dst_height as f32;
    let max_x = src_width as f32 - 1.0;
    let max_y = src_height as f32 - 1.0;

    let mut out = vec![[0u8; 3]; dst_width * dst_height];
    for y in 0..dst_height {
        let src_y = ((y as f32 + 0.5) * ry - 0.5).clamp(0.0, max_y);
        let y0 = src_y.floor() as usize;
        let y1 = (y0 + 1).min(src_height - 1);
        let fy = src_y - y0 as f32;
        let row0 = src.row(y0).expect("row within bounds for resample");
        let row1 = src.row(y1).expect("row within bounds for resample");

        for x in 0..dst_width {
            let src_x = ((x as f32 + 0.5) * rx - 0.5).clamp(0.0, max_x);
            let x0 = src_x.floor() as usize;
            let x1 = (x0 + 1).min(src_width - 1);
            let fx = src_x - x0 as f32;

            let w00 = (1.0 - fx) * (1.0 - fy);
            let w10 = fx * (1.0 - fy);
            let w01 = (1.0 - fx) * fy;
            let w11 = fx * fy;

            let dst_px = &mut out[y * dst_width + x];
            for c in 0..3 {
                let value = row0[x0][c] as f32 * w00
                    + row0[x1][c] as f32 * w10
                    + row1[x0][c] as f32 * w01
                    + row1[x1][c] as f32 * w11;
                dst_px[c] = value.round().clamp(0.0, 255.0) as u8;
            }
        }
    }

    OwnedImage::new(out, dst_width, dst_height)
}

#[cfg(test)]
mod tests {
    use super::{resize_rgb, scaled_dims};
    use crate::image::{ImageView, Pixel};

    #[test]
    fn scaled_dims_round_to_nearest() {
        assert_eq!(scaled_dims(10, 10, 0.5), (5, 5));
        assert_eq!(scaled_dims(10, 10, 2.0), (20, 20));
        assert_eq!(scaled_dims(5, 3, 0.5), (3, 2));
        assert_eq!(scaled_dims(1, 1, 0.4), (0, 0));
    }

    #[test]
    fn identity_resize_copies_pixels() {
        let data: Vec<Pixel> = (0u8..12).map(|v| [v, v + 1, v + 2]).collect();
        let view = ImageView::from_slice(&data, 4, 3).unwrap();
        let out = resize_rgb(view, 4, 3).unwrap();
        assert_eq!(out.data(), data.as_slice());
    }

    #[test]
    fn constant_image_stays_constant_both_directions() {
        let data = vec![[120u8, 7, 250]; 6 * 6];
        let view = ImageView::from_slice(&data, 6, 6).unwrap();

        let down = resize_rgb(view, 3, 3).unwrap();
        assert!(down.data().iter().all(|px| *px == [120, 7, 250]));

        let up = resize_rgb(view, 12, 12).unwrap();
        assert!(up.data().iter().all(|px| *px == [120, 7, 250]));
    }

    #[test]
    fn half_scale_averages_blocks() {
        let data: Vec<Pixel> = vec![
            [0, 0, 0],
            [100, 100, 100],
            [200, 200, 200],
            [100, 100, 100],
        ];
        let view = ImageView::from_slice(&data, 2, 2).unwrap();
        let out = resize_rgb(view, 1, 1).unwrap();
        assert_eq!(out.data()[0], [100, 100, 100]);
    }

    #[test]
    fn zero_target_dims_are_rejected() {
        let data = vec![[0u8; 3]; 4];
        let view = ImageView::from_slice(&data, 2, 2).unwrap();
        assert!(resize_rgb(view, 0, 1).is_err());
        assert!(resize_rgb(view, 1, 0).is_err());
    }
}
