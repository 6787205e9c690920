// Re-export glam for convenience
pub use glam::*;

// Prism math types
mod color;
mod ray;
mod vector;

pub use color::{Color, DrawingColor};
pub use ray::Ray;
pub use vector::{Vector3, VectorExt};
