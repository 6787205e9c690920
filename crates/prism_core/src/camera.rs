//! Pinhole camera.
//!
//! The basis is derived once from a position and a look-at point. `right`
//! and `up` are scaled by 1.5 after normalization, which widens the field of
//! view; the basis is therefore not orthonormal.

use prism_math::{Vector3, VectorExt};

use crate::{SceneError, SceneResult};

/// Scale applied to `right` and `up` after normalization.
pub const FOV_SCALE: f64 = 1.5;

/// Auxiliary vector crossed with `forward` to find `right`.
const DOWN: Vector3 = Vector3::new(0.0, -1.0, 0.0);

/// Camera for generating primary rays into the scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub pos: Vector3,
    pub forward: Vector3,
    pub right: Vector3,
    pub up: Vector3,
    look_at: Vector3,
}

impl Camera {
    /// Build the camera basis looking from `pos` towards `look_at`.
    ///
    /// Degenerate input (coincident points, looking straight up or down)
    /// yields a NaN basis. Use [`Camera::try_new`] to reject it instead.
    pub fn new(pos: Vector3, look_at: Vector3) -> Self {
        let forward = (look_at - pos).norm();
        let right = forward.cross(DOWN).norm() * FOV_SCALE;
        let up = forward.cross(right).norm() * FOV_SCALE;

        Self {
            pos,
            forward,
            right,
            up,
            look_at,
        }
    }

    /// Like [`Camera::new`], but fails on a degenerate basis.
    pub fn try_new(pos: Vector3, look_at: Vector3) -> SceneResult<Self> {
        if pos == look_at {
            return Err(SceneError::configuration(format!(
                "camera position and look-at point coincide at {pos}"
            )));
        }

        let camera = Self::new(pos, look_at);
        if camera.is_degenerate() {
            return Err(SceneError::configuration(format!(
                "camera at {pos} looking at {look_at} has no usable basis \
                 (looking straight along the vertical axis?)"
            )));
        }
        Ok(camera)
    }

    /// The point this camera was aimed at.
    pub fn look_at(&self) -> Vector3 {
        self.look_at
    }

    /// True if any basis vector is NaN or infinite.
    pub fn is_degenerate(&self) -> bool {
        !(self.pos.is_finite()
            && self.forward.is_finite()
            && self.right.is_finite()
            && self.up.is_finite())
    }
}
