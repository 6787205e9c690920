//! RGB colors.
//!
//! [`Color`] holds unbounded linear channels while shading; only the final
//! [`Color::to_drawing_color`] conversion maps it into display space.

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Mul};

/// Floating point RGB color.
///
/// Channels may exceed 1.0 or go negative during computation.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Color {
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0);
    pub const GREY: Color = Color::new(0.5, 0.5, 0.5);
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0);

    /// Color returned for rays that escape the scene.
    pub const BACKGROUND: Color = Color::BLACK;

    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Uniformly scale every channel by `k`.
    #[inline]
    pub fn scale(self, k: f64) -> Self {
        Self::new(k * self.r, k * self.g, k * self.b)
    }

    /// Per-channel product.
    #[inline]
    pub fn times(self, other: Color) -> Self {
        Self::new(self.r * other.r, self.g * other.g, self.b * other.b)
    }

    pub fn with_r(self, r: f64) -> Self {
        Self { r, ..self }
    }

    pub fn with_g(self, g: f64) -> Self {
        Self { g, ..self }
    }

    pub fn with_b(self, b: f64) -> Self {
        Self { b, ..self }
    }

    /// Convert to 8-bit display space.
    ///
    /// Each channel is capped at 1.0 and mapped with `floor(c * 255)`. There
    /// is no lower bound: a negative channel produces a negative integer.
    pub fn to_drawing_color(self) -> DrawingColor {
        #[inline]
        fn legalize(d: f64) -> f64 {
            if d > 1.0 {
                1.0
            } else {
                d
            }
        }

        #[inline]
        fn quantize(d: f64) -> i32 {
            (legalize(d) * 255.0).floor() as i32
        }

        DrawingColor {
            r: quantize(self.r),
            g: quantize(self.g),
            b: quantize(self.b),
        }
    }
}

impl Add for Color {
    type Output = Color;

    #[inline]
    fn add(self, rhs: Color) -> Color {
        Color::new(self.r + rhs.r, self.g + rhs.g, self.b + rhs.b)
    }
}

impl AddAssign for Color {
    #[inline]
    fn add_assign(&mut self, rhs: Color) {
        *self = *self + rhs;
    }
}

impl Mul for Color {
    type Output = Color;

    #[inline]
    fn mul(self, rhs: Color) -> Color {
        self.times(rhs)
    }
}

/// A color in display space, as handed to a pixel sink.
///
/// Channels are nominally 0..=255 but can be negative when the shaded
/// color had a negative channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct DrawingColor {
    pub r: i32,
    pub g: i32,
    pub b: i32,
}

impl DrawingColor {
    pub const fn new(r: i32, g: i32, b: i32) -> Self {
        Self { r, g, b }
    }

    /// Saturate into bytes for image formats.
    pub fn to_rgb8(self) -> [u8; 3] {
        let byte = |c: i32| c.clamp(0, 255) as u8;
        [byte(self.r), byte(self.g), byte(self.b)]
    }
}
