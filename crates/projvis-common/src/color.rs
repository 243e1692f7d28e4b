//! Color lookup over a reference world image.

/// An RGBA color sample.
pub type Rgba = [u8; 4];

/// Color returned for pixels outside the reference image.
pub const TRANSPARENT: Rgba = [0, 0, 0, 0];

/// Read-only access to the pixels of an equirectangular reference image.
pub trait ColorSource: Send + Sync {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// Pixel at `(x, y)`, or [`TRANSPARENT`] when out of range.
    fn get_pixel(&self, x: i64, y: i64) -> Rgba;

    /// Color of the image at a geographic position.
    fn color_at(&self, lon: f64, lat: f64) -> Rgba {
        let (x, y) = pixel_for_lonlat(lon, lat, self.width(), self.height());
        self.get_pixel(x, y)
    }
}

/// Map a lon/lat position to a pixel of a `width` x `height` image covering
/// the globe from -180 to 180 and 90 to -90.
///
/// The x coordinate wraps around the antimeridian. The y coordinate is not
/// clamped, so latitude -90 lands one row below the image.
pub fn pixel_for_lonlat(lon: f64, lat: f64, width: u32, height: u32) -> (i64, i64) {
    if width == 0 || height == 0 {
        return (0, 0);
    }
    let width = width as i64;
    let x = round_half_up((lon + 180.0 + 360.0) / 360.0 * width as f64) as i64;
    let y = round_half_up((-lat + 90.0) / 180.0 * height as f64) as i64;
    (x.rem_euclid(width), y)
}

fn round_half_up(v: f64) -> f64 {
    (v + 0.5).floor()
}

/// A color source returning the same color everywhere.
#[derive(Debug, Clone, Copy)]
pub struct UniformColor {
    pub color: Rgba,
    pub width: u32,
    pub height: u32,
}

impl UniformColor {
    pub fn new(color: Rgba) -> Self {
        Self {
            color,
            width: 360,
            height: 180,
        }
    }
}

impl ColorSource for UniformColor {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn get_pixel(&self, x: i64, y: i64) -> Rgba {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return TRANSPARENT;
        }
        self.color
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_mapping_corners() {
        assert_eq!(pixel_for_lonlat(-180.0, 90.0, 360, 180), (0, 0));
        assert_eq!(pixel_for_lonlat(0.0, 0.0, 360, 180), (180, 90));
        // Wraps at the antimeridian.
        assert_eq!(pixel_for_lonlat(180.0, 0.0, 360, 180), (0, 90));
        // One past the last row at the south pole.
        assert_eq!(pixel_for_lonlat(0.0, -90.0, 360, 180), (180, 180));
    }

    #[test]
    fn test_uniform_out_of_range() {
        let source = UniformColor::new([10, 20, 30, 255]);
        assert_eq!(source.color_at(0.0, 0.0), [10, 20, 30, 255]);
        assert_eq!(source.color_at(0.0, -90.0), TRANSPARENT);
    }
}
