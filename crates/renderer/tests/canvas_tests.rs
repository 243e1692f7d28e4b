//! Tests for PNG output and image-backed color lookup.

use image::{Rgba as Pixel, RgbaImage};
use projvis_common::{ColorSource, SamplingDomain, TRANSPARENT};
use renderer::{ImageColorSource, ProjectedCanvas, ValidCoordinatesCanvas};

// ============================================================================
// Helper functions
// ============================================================================

/// Lon/lat samples of a whole domain, as a run with an identity transform
/// would return them.
fn domain_samples(domain: &SamplingDomain) -> (Vec<f64>, Vec<f64>) {
    (0..domain.total_samples())
        .filter_map(|pos| domain.position(pos))
        .unzip()
}

/// Equirectangular image whose red channel encodes the column and green
/// channel the row.
fn gradient_image(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| Pixel([x as u8, y as u8, 0, 255]))
}

// ============================================================================
// PNG output
// ============================================================================

#[test]
fn test_valid_canvas_png_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("valid.png");

    let domain = SamplingDomain::new(-10.0, 10.0, -20.0, 20.0, 1.0);
    let (lons, lats) = domain_samples(&domain);
    let colors = vec![[10, 20, 30, 255]; lons.len()];

    let canvas = ValidCoordinatesCanvas::render(&lons, &lats, &colors, domain.step).unwrap();
    assert_eq!((canvas.width(), canvas.height()), (41, 21));
    canvas.save_png(&path).unwrap();

    let decoded = image::open(&path).unwrap().to_rgba8();
    assert_eq!(decoded.dimensions(), (41, 21));
    assert!(decoded.pixels().all(|p| p.0 == [10, 20, 30, 255]));
}

#[test]
fn test_projected_canvas_png_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("projected.png");

    let xs = [-2.0e7, 0.0, 2.0e7];
    let ys = [-1.0e7, 0.0, 1.0e7];
    let colors = [[255, 255, 255, 255]; 3];

    let canvas = ProjectedCanvas::render(&xs, &ys, &colors).unwrap();
    canvas.save_png(&path).unwrap();

    let decoded = image::open(&path).unwrap().to_rgba8();
    assert_eq!(decoded.dimensions(), (1000, 500));
    let painted = decoded.pixels().filter(|p| p.0[3] == 255).count();
    assert_eq!(painted, 3 * 4);
}

#[test]
fn test_save_to_missing_directory_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("valid.png");

    let canvas = ValidCoordinatesCanvas::render(&[0.0], &[0.0], &[[1, 2, 3, 255]], 1.0).unwrap();
    assert!(canvas.save_png(&path).is_err());
}

// ============================================================================
// Image color source
// ============================================================================

#[test]
fn test_image_color_source_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("world.png");
    gradient_image(360, 180).save(&path).unwrap();

    let source = ImageColorSource::open(&path).unwrap();
    assert_eq!((source.width(), source.height()), (360, 180));

    // lon 0 -> column 180, lat 0 -> row 90
    assert_eq!(source.color_at(0.0, 0.0), [180, 90, 0, 255]);
    // lon -179.6 -> column 0.4 -> 0
    assert_eq!(source.color_at(-179.6, 89.6), [0, 0, 0, 255]);
    // lat -90 lands one row below the image
    assert_eq!(source.color_at(0.0, -90.0), TRANSPARENT);
}

#[test]
fn test_open_missing_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    assert!(ImageColorSource::open(dir.path().join("nope.png")).is_err());
}
