//! Per-pixel brightness and the pixel access trait the mesh builder reads through.

use image::RgbImage;

/// Weight of the squared red channel.
const RED_WEIGHT: f64 = 0.299;
/// Weight of the squared green channel.
const GREEN_WEIGHT: f64 = 0.587;
/// Weight of the squared blue channel.
const BLUE_WEIGHT: f64 = 0.114;

/// Read-only access to a grid of packed `0xRRGGBB` pixels.
///
/// Implemented for [`image::RgbImage`]; tests provide their own grids.
pub trait PixelSource {
    /// Width in pixels.
    fn width(&self) -> u32;
    /// Height in pixels.
    fn height(&self) -> u32;
    /// Packed color at `(x, y)`. Callers stay within `width() x height()`.
    fn packed_rgb(&self, x: u32, y: u32) -> u32;
}

impl PixelSource for RgbImage {
    fn width(&self) -> u32 {
        self.dimensions().0
    }

    fn height(&self) -> u32 {
        self.dimensions().1
    }

    fn packed_rgb(&self, x: u32, y: u32) -> u32 {
        let [r, g, b] = self.get_pixel(x, y).0;
        pack_rgb(r, g, b)
    }
}

/// Pack three channels into `0xRRGGBB`.
pub fn pack_rgb(r: u8, g: u8, b: u8) -> u32 {
    (u32::from(r) << 16) | (u32::from(g) << 8) | u32::from(b)
}

/// Perceptual brightness of a packed color, in `[0, 255]`.
///
/// Computed as `sqrt(0.299 R² + 0.587 G² + 0.114 B²)`. Bits above 23 (alpha)
/// are ignored.
pub fn brightness(color: u32) -> f64 {
    let red = f64::from((color >> 16) & 0xFF);
    let green = f64::from((color >> 8) & 0xFF);
    let blue = f64::from(color & 0xFF);

    (RED_WEIGHT * red.powi(2) + GREEN_WEIGHT * green.powi(2) + BLUE_WEIGHT * blue.powi(2)).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_black_is_zero() {
        assert_eq!(brightness(pack_rgb(0, 0, 0)), 0.0);
    }

    #[test]
    fn test_white_is_full_scale() {
        let white = brightness(pack_rgb(255, 255, 255));
        assert!((white - 255.0).abs() < 1e-9, "white brightness was {white}");
    }

    #[test]
    fn test_single_channel_weights() {
        let red = brightness(pack_rgb(255, 0, 0));
        let green = brightness(pack_rgb(0, 255, 0));
        let blue = brightness(pack_rgb(0, 0, 255));
        assert!((red - 255.0 * 0.299_f64.sqrt()).abs() < 1e-9);
        assert!((green - 255.0 * 0.587_f64.sqrt()).abs() < 1e-9);
        assert!((blue - 255.0 * 0.114_f64.sqrt()).abs() < 1e-9);
        assert!(green > red && red > blue);
    }

    #[test]
    fn test_alpha_bits_ignored() {
        let rgb = pack_rgb(12, 200, 99);
        assert_eq!(brightness(rgb), brightness(0xFF00_0000 | rgb));
    }

    #[test]
    fn test_grey_scales_linearly() {
        let grey = brightness(pack_rgb(100, 100, 100));
        assert!((grey - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_rgb_image_source() {
        let mut img = RgbImage::new(3, 2);
        img.put_pixel(2, 1, image::Rgb([0x12, 0x34, 0x56]));
        assert_eq!(PixelSource::width(&img), 3);
        assert_eq!(PixelSource::height(&img), 2);
        assert_eq!(img.packed_rgb(2, 1), 0x123456);
        assert_eq!(img.packed_rgb(0, 0), 0);
    }
}
