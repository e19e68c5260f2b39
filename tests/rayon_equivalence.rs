//! The row-parallel scan must agree exactly with the scalar scan.

#![cfg(feature = "rayon")]

use pixgrep::{
    scan_sqdiff_normed, scan_sqdiff_normed_par, OwnedImage, Pixel, ScaleSearchConfig,
    ScaledMatcher,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_image(width: usize, height: usize, seed: u64) -> OwnedImage {
    let mut rng = StdRng::seed_from_u64(seed);
    let data: Vec<Pixel> = (0..width * height)
        .map(|_| [rng.random(), rng.random(), rng.random()])
        .collect();
    OwnedImage::new(data, width, height).unwrap()
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

#[test]
fn parallel_scan_matches_scalar_scan_on_an_embedded_patch() {
    let scene = random_image(48, 36, 101);
    let template = extract_patch(&scene, 19, 11, 9, 7);

    let scalar = scan_sqdiff_normed(scene.view(), template.view());
    let parallel = scan_sqdiff_normed_par(scene.view(), template.view());
    assert_eq!(scalar, parallel);
}

#[test]
fn parallel_scan_matches_scalar_scan_on_unrelated_images() {
    let scene = random_image(32, 24, 103);
    let template = random_image(6, 5, 104);

    let scalar = scan_sqdiff_normed(scene.view(), template.view());
    let parallel = scan_sqdiff_normed_par(scene.view(), template.view());
    assert_eq!(scalar, parallel);
}

#[test]
fn parallel_matcher_agrees_with_the_sequential_matcher() {
    let scene = random_image(48, 36, 105);
    let template = extract_patch(&scene, 7, 20, 10, 8);

    let sequential = ScaledMatcher::new().find(scene.view(), template.view());
    let parallel = ScaledMatcher::new()
        .with_config(ScaleSearchConfig {
            parallel: true,
            ..ScaleSearchConfig::default()
        })
        .find(scene.view(), template.view());
    assert_eq!(sequential, parallel);
}
