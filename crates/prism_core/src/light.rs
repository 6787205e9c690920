//! Point lights.

use prism_math::{Color, Vector3};
use serde::{Deserialize, Serialize};

/// A point light. Intensity does not fall off with distance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Light {
    pub pos: Vector3,
    pub color: Color,
}

impl Light {
    pub fn new(pos: Vector3, color: Color) -> Self {
        Self { pos, color }
    }

    /// Copy of this light at another position.
    pub fn with_pos(self, pos: Vector3) -> Self {
        Self { pos, ..self }
    }

    /// Copy of this light with another color.
    pub fn with_color(self, color: Color) -> Self {
        Self { color, ..self }
    }
}
