//! Color lookup backed by a decoded reference image.

use std::path::Path;

use image::RgbaImage;
use projvis_common::{ColorSource, Rgba, TRANSPARENT};
use tracing::info;

use crate::error::Result;

/// An equirectangular world image used as a [`ColorSource`].
#[derive(Debug, Clone)]
pub struct ImageColorSource {
    image: RgbaImage,
}

impl ImageColorSource {
    pub fn new(image: RgbaImage) -> Self {
        Self { image }
    }

    /// Decode an image file in any format the `image` crate supports.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let image = image::open(path)?.to_rgba8();
        info!(
            path = %path.display(),
            width = image.width(),
            height = image.height(),
            "Loaded reference image"
        );
        Ok(Self::new(image))
    }

    /// Decode an in-memory encoded image.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(Self::new(image::load_from_memory(bytes)?.to_rgba8()))
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }
}

impl ColorSource for ImageColorSource {
    fn width(&self) -> u32 {
        self.image.width()
    }

    fn height(&self) -> u32 {
        self.image.height()
    }

    fn get_pixel(&self, x: i64, y: i64) -> Rgba {
        match (u32::try_from(x), u32::try_from(y)) {
            (Ok(x), Ok(y)) if x < self.image.width() && y < self.image.height() => {
                self.image.get_pixel(x, y).0
            }
            _ => TRANSPARENT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba as Pixel;

    /// 4x2 image: west half red, east half blue, bottom row darker.
    fn quadrants() -> ImageColorSource {
        let image = RgbaImage::from_fn(4, 2, |x, y| {
            let level = if y == 0 { 255 } else { 100 };
            if x < 2 {
                Pixel([level, 0, 0, 255])
            } else {
                Pixel([0, 0, level, 255])
            }
        });
        ImageColorSource::new(image)
    }

    #[test]
    fn test_color_at() {
        let source = quadrants();
        // lon -180 -> x 0, lat 90 -> y 0
        assert_eq!(source.color_at(-180.0, 90.0), [255, 0, 0, 255]);
        // lon 0 -> x 2, lat 0 -> y 1
        assert_eq!(source.color_at(0.0, 0.0), [0, 0, 100, 255]);
        // lon 180 wraps to x 0
        assert_eq!(source.color_at(180.0, 45.0), source.color_at(-180.0, 45.0));
    }

    #[test]
    fn test_south_pole_is_transparent() {
        let source = quadrants();
        assert_eq!(source.color_at(10.0, -90.0), TRANSPARENT);
    }

    #[test]
    fn test_out_of_range_pixels() {
        let source = quadrants();
        assert_eq!(source.get_pixel(-1, 0), TRANSPARENT);
        assert_eq!(source.get_pixel(4, 0), TRANSPARENT);
        assert_eq!(source.get_pixel(0, 2), TRANSPARENT);
        assert_eq!(source.get_pixel(3, 1), [0, 0, 100, 255]);
    }

    #[test]
    fn test_from_bytes_rejects_garbage() {
        assert!(ImageColorSource::from_bytes(b"not an image").is_err());
    }
}
