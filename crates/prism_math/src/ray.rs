use crate::Vector3;

/// A ray in 3D space with a start point and a direction.
///
/// The direction is expected to be unit length for distances to be
/// meaningful, but nothing enforces it.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub start: Vector3,
    pub dir: Vector3,
}

impl Ray {
    /// Create a new ray.
    pub fn new(start: Vector3, dir: Vector3) -> Self {
        Self { start, dir }
    }

    /// Compute the point at parameter t along the ray.
    /// P(t) = dir * t + start
    #[inline]
    pub fn at(&self, t: f64) -> Vector3 {
        self.dir * t + self.start
    }

    /// Copy of this ray with a different start point.
    pub fn with_start(self, start: Vector3) -> Self {
        Self { start, ..self }
    }

    /// Copy of this ray with a different direction.
    pub fn with_dir(self, dir: Vector3) -> Self {
        Self { dir, ..self }
    }
}

impl Default for Ray {
    fn default() -> Self {
        Self {
            start: Vector3::ZERO,
            dir: Vector3::Z,
        }
    }
}
