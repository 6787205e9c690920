//! Prism Core - Scene model for the Prism ray tracer.
//!
//! This crate provides:
//!
//! - **Scene types**: `Scene`, `Primitive` (`Sphere`, `Plane`), `Light`, `Camera`
//! - **Surfaces**: the `Surface` material behaviors (`Shiny`, `Checkerboard`, `Uniform`)
//! - **Scene files**: JSON scene description loading and saving
//!
//! # Example
//!
//! ```ignore
//! use prism_core::{default_scene, load_scene};
//!
//! let scene = load_scene("scene.json")?;
//! println!("Loaded {} primitives, {} lights",
//!     scene.primitive_count(),
//!     scene.light_count());
//! ```

pub mod camera;
pub mod description;
pub mod error;
pub mod light;
pub mod primitive;
pub mod scene;
pub mod surface;

// Re-export commonly used types
pub use camera::Camera;
pub use description::{load_scene, parse_scene, save_scene, SceneDescription};
pub use error::{SceneError, SceneResult};
pub use light::Light;
pub use primitive::{Plane, Primitive, Sphere};
pub use scene::{default_scene, Scene};
pub use surface::Surface;
