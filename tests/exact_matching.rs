//! Integration tests for the brute-force exact matcher.

use pixgrep::{find_all, find_first, BoundingBox, OwnedImage, Pixel};

/// Deterministic non-repeating test pattern.
fn patterned(width: usize, height: usize) -> OwnedImage {
    let mut data = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            let r = ((x * 13) ^ (y * 7)) as u8;
            let g = ((x * 31).wrapping_add(y * 17)) as u8;
            let b = ((x + 1) * (y + 3)) as u8;
            data.push([r, g, b]);
        }
    }
    OwnedImage::new(data, width, height).unwrap()
}

fn solid(width: usize, height: usize, px: Pixel) -> Vec<Pixel> {
    vec![px; width * height]
}

fn extract_patch(
    image: &OwnedImage,
    x0: usize,
    y0: usize,
    width: usize,
    height: usize,
) -> OwnedImage {
    let mut out = Vec::with_capacity(width * height);
    for y in 0..height {
        let row = image.view().row(y0 + y).unwrap();
        out.extend_from_slice(&row[x0..x0 + width]);
    }
    OwnedImage::new(out, width, height).unwrap()
}

fn blit(buffer: &mut [Pixel], buffer_width: usize, patch: &OwnedImage, x0: usize, y0: usize) {
    for y in 0..patch.height() {
        let row = patch.view().row(y).unwrap();
        let start = (y0 + y) * buffer_width + x0;
        buffer[start..start + patch.width()].copy_from_slice(row);
    }
}

#[test]
fn template_always_matches_itself_at_origin() {
    let template = patterned(12, 9);
    let matches = find_all(template.view(), template.view());
    assert_eq!(matches, vec![BoundingBox::new(0, 0, 12, 9)]);
}

#[test]
fn embedded_template_is_located() {
    let scene = patterned(64, 48);
    let template = extract_patch(&scene, 17, 9, 8, 6);

    let matches = find_all(scene.view(), template.view());
    assert!(matches.contains(&BoundingBox::new(17, 9, 8, 6)));
    assert_eq!(find_first(scene.view(), template.view()), matches.first().copied());
}

#[test]
fn absent_template_yields_no_matches() {
    let scene = OwnedImage::new(solid(10, 10, [0, 0, 0]), 10, 10).unwrap();
    let template = OwnedImage::new(solid(3, 3, [255, 0, 0]), 3, 3).unwrap();

    assert!(find_all(scene.view(), template.view()).is_empty());
    assert_eq!(find_first(scene.view(), template.view()), None);
}

#[test]
fn single_pixel_difference_defeats_every_window() {
    let scene = patterned(20, 20);
    let mut altered = scene.data().to_vec();
    let template = extract_patch(&scene, 0, 0, 20, 20);
    // The template is the whole scene, so the only candidate window is the
    // scene itself; one changed pixel must defeat it.
    altered[10 * 20 + 10][1] ^= 0x01;
    let altered = OwnedImage::new(altered, 20, 20).unwrap();

    assert!(find_all(altered.view(), template.view()).is_empty());
}

#[test]
fn oversized_template_cannot_be_placed() {
    let scene = patterned(3, 3);
    let tall = patterned(2, 5);
    let wide = patterned(5, 2);

    assert!(find_all(scene.view(), tall.view()).is_empty());
    assert!(find_all(scene.view(), wide.view()).is_empty());
    assert_eq!(find_first(scene.view(), tall.view()), None);
}

#[test]
fn multiple_occurrences_come_back_in_row_major_order() {
    let marker = OwnedImage::new(solid(2, 2, [9, 9, 9]), 2, 2).unwrap();
    let mut buffer = solid(12, 10, [40, 80, 120]);
    blit(&mut buffer, 12, &marker, 6, 1);
    blit(&mut buffer, 12, &marker, 1, 1);
    blit(&mut buffer, 12, &marker, 1, 5);
    let scene = OwnedImage::new(buffer, 12, 10).unwrap();

    let matches = find_all(scene.view(), marker.view());
    assert_eq!(
        matches,
        vec![
            BoundingBox::new(1, 1, 2, 2),
            BoundingBox::new(6, 1, 2, 2),
            BoundingBox::new(1, 5, 2, 2),
        ]
    );
    assert_eq!(
        find_first(scene.view(), marker.view()),
        Some(BoundingBox::new(1, 1, 2, 2))
    );
}
