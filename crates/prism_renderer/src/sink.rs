//! Pixel sinks.
//!
//! The renderer never draws anything itself; it hands each finished pixel
//! to a [`PixelSink`].

use prism_math::DrawingColor;

/// Receiver of finished pixel colors.
pub trait PixelSink {
    /// Store the color of pixel (x, y). Called once per pixel.
    fn set_pixel(&mut self, x: u32, y: u32, color: DrawingColor);
}

/// In-memory pixel buffer, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<DrawingColor>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![DrawingColor::default(); (width as usize) * (height as usize)],
        }
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        (y as usize) * (self.width as usize) + (x as usize)
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> DrawingColor {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: DrawingColor) {
        let index = self.index(x, y);
        self.pixels[index] = color;
    }

    /// Convert to packed RGB bytes (for display or saving).
    pub fn to_rgb8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 3);
        for color in &self.pixels {
            bytes.extend_from_slice(&color.to_rgb8());
        }
        bytes
    }

    /// Number of pixels whose channels differ from `other` by more than
    /// `tolerance`. Images of different sizes differ everywhere.
    pub fn count_differences(&self, other: &ImageBuffer, tolerance: i32) -> usize {
        if self.width != other.width || self.height != other.height {
            return self.pixels.len().max(other.pixels.len());
        }

        self.pixels
            .iter()
            .zip(&other.pixels)
            .filter(|(a, b)| {
                (a.r - b.r).abs() > tolerance || (a.g - b.g).abs() > tolerance || (a.b - b.b).abs() > tolerance
            })
            .count()
    }
}

impl PixelSink for ImageBuffer {
    fn set_pixel(&mut self, x: u32, y: u32, color: DrawingColor) {
        self.set(x, y, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_buffer_set_get() {
        let mut image = ImageBuffer::new(4, 3);
        assert_eq!(image.pixels.len(), 12);

        image.set_pixel(3, 2, DrawingColor::new(1, 2, 3));
        assert_eq!(image.get(3, 2), DrawingColor::new(1, 2, 3));
        assert_eq!(image.pixels[11], DrawingColor::new(1, 2, 3));
        assert_eq!(image.get(0, 0), DrawingColor::default());
    }

    #[test]
    fn test_to_rgb8_layout() {
        let mut image = ImageBuffer::new(2, 1);
        image.set(0, 0, DrawingColor::new(255, 0, 10));
        image.set(1, 0, DrawingColor::new(-4, 300, 7));
        assert_eq!(image.to_rgb8(), vec![255, 0, 10, 0, 255, 7]);
    }

    #[test]
    fn test_count_differences() {
        let a = ImageBuffer::new(2, 2);
        let mut b = a.clone();
        b.set(1, 1, DrawingColor::new(1, 0, 0));
        b.set(0, 1, DrawingColor::new(0, 0, 5));

        assert_eq!(a.count_differences(&b, 0), 2);
        assert_eq!(a.count_differences(&b, 1), 1);
        assert_eq!(a.count_differences(&b, 5), 0);
        assert_eq!(a.count_differences(&ImageBuffer::new(3, 2), 255), 6);
    }
}
