//! Geometric primitives.
//!
//! The set of shapes is closed, so `Primitive` is an enum rather than a
//! trait object. Ray intersection lives in the renderer; this module only
//! holds the geometry, the surface normal and the attached material.

use prism_math::{Vector3, VectorExt};

use crate::Surface;

/// A sphere with a precomputed squared radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    center: Vector3,
    radius: f64,
    radius2: f64,
    surface: Surface,
}

impl Sphere {
    /// Create a new sphere.
    pub fn new(center: Vector3, radius: f64, surface: Surface) -> Self {
        Self {
            center,
            radius,
            radius2: radius * radius,
            surface,
        }
    }

    pub fn center(&self) -> Vector3 {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Squared radius, as used by the intersection test.
    pub fn radius2(&self) -> f64 {
        self.radius2
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// Outward unit normal at a point on the sphere.
    pub fn normal(&self, pos: Vector3) -> Vector3 {
        (pos - self.center).norm()
    }

    /// Copy of this sphere with another surface.
    pub fn with_surface(self, surface: Surface) -> Self {
        Self { surface, ..self }
    }
}

/// An infinite plane `normal . p + offset = 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    normal: Vector3,
    offset: f64,
    surface: Surface,
}

impl Plane {
    /// Create a new plane. `normal` is expected to be unit length.
    pub fn new(normal: Vector3, offset: f64, surface: Surface) -> Self {
        Self {
            normal,
            offset,
            surface,
        }
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// The plane normal. The same everywhere, so `pos` is ignored.
    pub fn normal(&self, _pos: Vector3) -> Vector3 {
        self.normal
    }

    /// Copy of this plane with another surface.
    pub fn with_surface(self, surface: Surface) -> Self {
        Self { surface, ..self }
    }
}

/// Any shape that can be placed in a scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Primitive {
    Sphere(Sphere),
    Plane(Plane),
}

impl Primitive {
    /// Surface normal at `pos`.
    pub fn normal(&self, pos: Vector3) -> Vector3 {
        match self {
            Primitive::Sphere(sphere) => sphere.normal(pos),
            Primitive::Plane(plane) => plane.normal(pos),
        }
    }

    /// Material of this primitive.
    pub fn surface(&self) -> &Surface {
        match self {
            Primitive::Sphere(sphere) => sphere.surface(),
            Primitive::Plane(plane) => plane.surface(),
        }
    }

    /// Short name used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Primitive::Sphere(_) => "sphere",
            Primitive::Plane(_) => "plane",
        }
    }
}

impl From<Sphere> for Primitive {
    fn from(sphere: Sphere) -> Self {
        Primitive::Sphere(sphere)
    }
}

impl From<Plane> for Primitive {
    fn from(plane: Plane) -> Self {
        Primitive::Plane(plane)
    }
}
