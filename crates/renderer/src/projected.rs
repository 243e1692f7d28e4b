//! Canvas of the valid samples at their projected positions.

use std::path::Path;

use image::{ImageFormat, Rgba as Pixel, RgbaImage};
use projvis_common::{BoundingBox, Coordinate, Rgba};
use tracing::debug;

use crate::error::{check_lengths, Result};

/// Length of the longer canvas side in pixels.
pub const CANVAS_SIZE: u32 = 1000;

/// Blank border kept around the plotted extent, in pixels.
pub const PADDING: f64 = 1.0;

// Below this the padded drawing area would collapse.
const MIN_SIDE: u32 = 3;

/// Projected samples scaled into a canvas whose longer side is
/// [`CANVAS_SIZE`] and whose aspect ratio follows the projected extent.
///
/// Each sample is a 2x2 square centered on its canvas position.
#[derive(Debug, Clone)]
pub struct ProjectedCanvas {
    bbox: BoundingBox,
    image: RgbaImage,
}

impl ProjectedCanvas {
    /// Plot `xs[i], ys[i]` in `colors[i]` for every sample.
    pub fn render(xs: &[f64], ys: &[f64], colors: &[Rgba]) -> Result<Self> {
        check_lengths(&[("xs", xs.len()), ("ys", ys.len()), ("colors", colors.len())])?;

        let bbox = BoundingBox::from_coordinates(xs, ys)
            .unwrap_or_else(|| BoundingBox::new(0.0, 0.0, 1.0, 1.0));
        let (width, height) = canvas_size(&bbox);

        let mut canvas = Self {
            bbox,
            image: RgbaImage::new(width, height),
        };
        for ((&x, &y), &color) in xs.iter().zip(ys).zip(colors) {
            canvas.plot(Coordinate::new(x, y), color);
        }

        debug!(width, height, samples = xs.len(), "Rendered projected coordinates canvas");
        Ok(canvas)
    }

    /// Projected coordinates to canvas pixel coordinates, y pointing down.
    pub fn to_canvas(&self, coordinate: Coordinate) -> Coordinate {
        let (inner_w, inner_h) = self.inner_size();
        Coordinate::new(
            (coordinate.x - self.bbox.min_x) / extent(self.bbox.width()) * inner_w + PADDING,
            inner_h - (coordinate.y - self.bbox.min_y) / extent(self.bbox.height()) * inner_h
                + PADDING,
        )
    }

    /// Inverse of [`to_canvas`](Self::to_canvas).
    pub fn to_coords(&self, pixel: Coordinate) -> Coordinate {
        let (inner_w, inner_h) = self.inner_size();
        Coordinate::new(
            (pixel.x - PADDING) / inner_w * extent(self.bbox.width()) + self.bbox.min_x,
            -(pixel.y - PADDING - inner_h) / inner_h * extent(self.bbox.height())
                + self.bbox.min_y,
        )
    }

    fn inner_size(&self) -> (f64, f64) {
        (
            self.width() as f64 - PADDING * 2.0,
            self.height() as f64 - PADDING * 2.0,
        )
    }

    fn plot(&mut self, coordinate: Coordinate, color: Rgba) {
        let center = self.to_canvas(coordinate);
        let left = (center.x - 1.0 + 0.5).floor() as i64;
        let top = (center.y - 1.0 + 0.5).floor() as i64;
        let pixel = Pixel([color[0], color[1], color[2], 255]);

        for y in top..top + 2 {
            for x in left..left + 2 {
                if x >= 0 && y >= 0 && x < self.width() as i64 && y < self.height() as i64 {
                    self.image.put_pixel(x as u32, y as u32, pixel);
                }
            }
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Projected extent of the plotted samples.
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

/// A zero extent (a single sample, or a line) scales as if it were 1.
fn extent(length: f64) -> f64 {
    if length > 0.0 && length.is_finite() {
        length
    } else {
        1.0
    }
}

fn canvas_size(bbox: &BoundingBox) -> (u32, u32) {
    let ratio = extent(bbox.width()) / extent(bbox.height());
    let size = CANVAS_SIZE as f64;
    let (width, height) = if ratio < 1.0 {
        ((size * ratio) as u32, CANVAS_SIZE)
    } else {
        (CANVAS_SIZE, (size / ratio) as u32)
    };
    (width.max(MIN_SIDE), height.max(MIN_SIDE))
}
