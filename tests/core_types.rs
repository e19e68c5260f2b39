use pixgrep::{ImageView, OwnedImage, Pixel, PixGrepError};

fn px(v: u8) -> Pixel {
    [v, v, v]
}

#[test]
fn image_view_rejects_invalid_dimensions() {
    let data = [px(0); 4];

    let err = ImageView::from_slice(&data, 0, 1).err().unwrap();
    assert_eq!(
        err,
        PixGrepError::InvalidDimensions {
            width: 0,
            height: 1,
        }
    );

    let err = ImageView::from_slice(&data, 1, 0).err().unwrap();
    assert_eq!(
        err,
        PixGrepError::InvalidDimensions {
            width: 1,
            height: 0,
        }
    );
}

#[test]
fn image_view_rejects_invalid_stride() {
    let data = [px(0); 8];

    let err = ImageView::new(&data, 4, 1, 3).err().unwrap();
    assert_eq!(
        err,
        PixGrepError::InvalidStride {
            width: 4,
            stride: 3,
        }
    );
}

#[test]
fn image_view_rejects_small_buffer() {
    let data = [px(0); 3];

    let err = ImageView::new(&data, 2, 2, 2).err().unwrap();
    assert_eq!(err, PixGrepError::BufferTooSmall { needed: 4, got: 3 });
}

#[test]
fn image_view_roi_matches_expected_values() {
    let data: Vec<Pixel> = (0u8..16).map(px).collect();
    let view = ImageView::from_slice(&data, 4, 4).unwrap();
    assert_eq!(view.stride(), 4);
    assert_eq!(view.as_slice(), data.as_slice());

    let roi = view.roi(1, 1, 2, 2).unwrap();
    assert_eq!(roi.width(), 2);
    assert_eq!(roi.height(), 2);
    assert_eq!(roi.stride(), 4);
    assert_eq!(roi.row(0).unwrap(), &[px(5), px(6)]);
    assert_eq!(roi.row(1).unwrap(), &[px(9), px(10)]);
    assert_eq!(roi.get(0, 0).copied(), Some(px(5)));
    assert!(roi.get(2, 0).is_none());

    let err = view.roi(3, 3, 2, 2).err().unwrap();
    assert_eq!(
        err,
        PixGrepError::RoiOutOfBounds {
            x: 3,
            y: 3,
            width: 2,
            height: 2,
            img_width: 4,
            img_height: 4,
        }
    );
}

#[test]
fn owned_image_validates_buffer_length() {
    let err = OwnedImage::new(vec![px(0); 5], 2, 2).err().unwrap();
    assert_eq!(
        err,
        PixGrepError::InvalidDimensions {
            width: 2,
            height: 2,
        }
    );

    let err = OwnedImage::new(vec![px(0); 3], 2, 2).err().unwrap();
    assert_eq!(err, PixGrepError::BufferTooSmall { needed: 4, got: 3 });
}

#[test]
fn owned_image_from_strided_view_is_contiguous() {
    // 2x2 view over a stride-3 buffer; the padding column is dropped.
    let data: Vec<Pixel> = (0u8..6).map(px).collect();
    let view = ImageView::new(&data, 2, 2, 3).unwrap();
    let owned = OwnedImage::from_view(view).unwrap();
    assert_eq!(owned.width(), 2);
    assert_eq!(owned.height(), 2);
    assert_eq!(owned.data(), &[px(0), px(1), px(3), px(4)]);
}
