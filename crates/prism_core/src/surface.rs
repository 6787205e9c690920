//! Surface material behaviors.
//!
//! A surface answers three questions about a point on a primitive: its
//! diffuse color, its specular color and how much it reflects. The Phong
//! exponent (`roughness`) is constant per surface.

use prism_math::{Color, Vector3};
use serde::{Deserialize, Serialize};

use crate::{SceneError, SceneResult};

/// Material behavior attached to a primitive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Surface {
    /// White diffuse, grey highlights, strongly reflective.
    Shiny,
    /// Black and white unit squares on the XZ plane.
    Checkerboard,
    /// Position independent material with explicit parameters.
    Uniform {
        diffuse: Color,
        specular: Color,
        reflect: f64,
        roughness: f64,
    },
}

impl Surface {
    /// Diffuse color at `pos`.
    pub fn diffuse(&self, pos: Vector3) -> Color {
        match self {
            Surface::Shiny => Color::WHITE,
            Surface::Checkerboard => {
                if is_odd_square(pos) {
                    Color::WHITE
                } else {
                    Color::BLACK
                }
            }
            Surface::Uniform { diffuse, .. } => *diffuse,
        }
    }

    /// Specular color at `pos`.
    pub fn specular(&self, _pos: Vector3) -> Color {
        match self {
            Surface::Shiny => Color::GREY,
            Surface::Checkerboard => Color::WHITE,
            Surface::Uniform { specular, .. } => *specular,
        }
    }

    /// Reflectivity at `pos`, in [0, 1].
    pub fn reflect(&self, pos: Vector3) -> f64 {
        match self {
            Surface::Shiny => 0.7,
            Surface::Checkerboard => {
                if is_odd_square(pos) {
                    0.1
                } else {
                    0.7
                }
            }
            Surface::Uniform { reflect, .. } => *reflect,
        }
    }

    /// Phong exponent for specular highlights.
    pub fn roughness(&self) -> f64 {
        match self {
            Surface::Shiny => 250.0,
            Surface::Checkerboard => 150.0,
            Surface::Uniform { roughness, .. } => *roughness,
        }
    }

    /// Reject parameters that break shading: `reflect` outside [0, 1] or
    /// non-finite colors and exponents. The built-in surfaces always pass.
    pub fn validate(&self) -> SceneResult<()> {
        let Surface::Uniform {
            diffuse,
            specular,
            reflect,
            roughness,
        } = self
        else {
            return Ok(());
        };

        if !(0.0..=1.0).contains(reflect) {
            return Err(SceneError::configuration(format!(
                "reflect {reflect} is outside [0, 1]"
            )));
        }
        if !roughness.is_finite() {
            return Err(SceneError::configuration(format!("roughness {roughness} is not finite")));
        }
        let finite = |c: &Color| c.r.is_finite() && c.g.is_finite() && c.b.is_finite();
        if !(finite(diffuse) && finite(specular)) {
            return Err(SceneError::configuration("diffuse and specular colors must be finite"));
        }
        Ok(())
    }
}

/// Parity of the unit square containing `pos`.
///
/// Uses the float remainder, so a negative odd sum (-1 % 2 == -1) counts as odd.
#[inline]
fn is_odd_square(pos: Vector3) -> bool {
    (pos.z.floor() + pos.x.floor()) % 2.0 != 0.0
}
