//! Double precision vector helpers.
//!
//! `Vector3` is glam's `DVec3`; the only behavior we add on top is the
//! permissive normalization used throughout the tracer.

/// Three component f64 vector used for positions, directions and normals.
pub type Vector3 = glam::DVec3;

/// Extra operations on [`Vector3`].
pub trait VectorExt {
    /// Scale the vector to unit length.
    ///
    /// A zero vector is scaled by `+inf` instead of failing, so each of its
    /// components becomes `0.0 * inf` (NaN). Callers that care must check
    /// for degenerate input before normalizing.
    fn norm(self) -> Self;
}

impl VectorExt for Vector3 {
    #[inline]
    fn norm(self) -> Self {
        let mag = self.length();
        let div = if mag == 0.0 { f64::INFINITY } else { 1.0 / mag };
        self * div
    }
}
