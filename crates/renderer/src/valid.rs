//! Canvas of the valid samples on their lon/lat grid.

use std::path::Path;

use image::{ImageFormat, Rgba as Pixel, RgbaImage};
use projvis_common::{BoundingBox, Rgba, SCALE};
use tracing::debug;

use crate::error::{check_lengths, RenderError, Result};

/// One pixel per grid cell covering the extent of the valid samples.
///
/// Row 0 is the northernmost latitude. Samples are painted opaque with the
/// RGB of their color; cells without a sample stay transparent.
#[derive(Debug, Clone)]
pub struct ValidCoordinatesCanvas {
    bbox: BoundingBox,
    step: f64,
    image: RgbaImage,
}

impl ValidCoordinatesCanvas {
    /// Plot `lons[i], lats[i]` in `colors[i]` for every sample.
    pub fn render(lons: &[f64], lats: &[f64], colors: &[Rgba], step: f64) -> Result<Self> {
        if !(step.is_finite() && step > 0.0) {
            return Err(RenderError::InvalidStep(step));
        }
        check_lengths(&[("lons", lons.len()), ("lats", lats.len()), ("colors", colors.len())])?;

        let bbox = BoundingBox::from_coordinates(lons, lats)
            .unwrap_or_else(|| BoundingBox::new(0.0, 0.0, 0.0, 0.0));
        let width = cells(bbox.width(), step);
        let height = cells(bbox.height(), step);

        let mut canvas = Self {
            bbox,
            step,
            image: RgbaImage::new(width, height),
        };
        for ((&lon, &lat), &color) in lons.iter().zip(lats).zip(colors) {
            canvas.plot(lon, lat, color);
        }

        debug!(width, height, samples = lons.len(), "Rendered valid coordinates canvas");
        Ok(canvas)
    }

    /// Pixel position of a sample, which may fall outside the canvas.
    pub fn pixel_for(&self, lon: f64, lat: f64) -> (i64, i64) {
        let x = round_half_up((lon - self.bbox.min_x) / self.step);
        let y = round_half_up((self.bbox.height() - (lat - self.bbox.min_y)) / self.step);
        (x, y)
    }

    fn plot(&mut self, lon: f64, lat: f64, color: Rgba) {
        let (x, y) = self.pixel_for(lon, lat);
        if x < 0 || y < 0 || x >= self.width() as i64 || y >= self.height() as i64 {
            return;
        }
        self.image
            .put_pixel(x as u32, y as u32, Pixel([color[0], color[1], color[2], 255]));
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Extent of the plotted samples.
    pub fn bbox(&self) -> BoundingBox {
        self.bbox
    }

    /// Pixel at `(x, y)`; panics when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Rgba {
        self.image.get_pixel(x, y).0
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Write the canvas as a PNG file.
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<()> {
        self.image.save_with_format(path, ImageFormat::Png)?;
        Ok(())
    }
}

/// Cells needed to cover `extent` at `step`, counting both edges.
fn cells(extent: f64, step: f64) -> u32 {
    let count = ((extent * SCALE).round() / (step * SCALE).round()).floor();
    if count.is_finite() && count >= 0.0 {
        (count as u32).saturating_add(1)
    } else {
        1
    }
}

fn round_half_up(v: f64) -> i64 {
    (v + 0.5).floor() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgba = [255, 0, 0, 128];
    const BLUE: Rgba = [0, 0, 255, 255];

    #[test]
    fn test_size_covers_both_edges() {
        let lons = [0.0, 1.0, 2.0];
        let lats = [0.0, 0.5, 1.0];
        let canvas = ValidCoordinatesCanvas::render(&lons, &lats, &[RED; 3], 0.5).unwrap();
        assert_eq!(canvas.width(), 5);
        assert_eq!(canvas.height(), 3);
    }

    #[test]
    fn test_north_is_up() {
        let canvas =
            ValidCoordinatesCanvas::render(&[0.0, 1.0], &[0.0, 1.0], &[RED, BLUE], 1.0).unwrap();
        // Opaque RGB of the sample color.
        assert_eq!(canvas.pixel(0, 1), [255, 0, 0, 255]);
        assert_eq!(canvas.pixel(1, 0), BLUE);
        assert_eq!(canvas.pixel(0, 0), [0, 0, 0, 0]);
        assert_eq!(canvas.pixel(1, 1), [0, 0, 0, 0]);
    }

    #[test]
    fn test_cells_saturate() {
        assert_eq!(cells(2.0, 1.0), 3);
        assert_eq!(cells(1e300, 1.0), u32::MAX);
    }

    #[test]
    fn test_empty_is_one_pixel() {
        let canvas = ValidCoordinatesCanvas::render(&[], &[], &[], 1.0).unwrap();
        assert_eq!((canvas.width(), canvas.height()), (1, 1));
    }

    #[test]
    fn test_rejects_mismatched_arrays() {
        let err = ValidCoordinatesCanvas::render(&[0.0], &[0.0, 1.0], &[RED], 1.0).unwrap_err();
        assert!(matches!(err, RenderError::Mismatched(_)));
    }

    #[test]
    fn test_rejects_bad_step() {
        assert!(ValidCoordinatesCanvas::render(&[], &[], &[], 0.0).is_err());
        assert!(ValidCoordinatesCanvas::render(&[], &[], &[], f64::NAN).is_err());
    }
}
