//! Scene aggregate.
//!
//! A scene is built once and then shared read-only by every ray cast
//! during a render.

use prism_math::{Color, Vector3};

use crate::{Camera, Light, Plane, Primitive, SceneError, SceneResult, Sphere, Surface};

/// A complete scene: primitives, lights and the viewing camera.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Shapes, in scan order
    pub primitives: Vec<Primitive>,

    /// Point lights, in accumulation order
    pub lights: Vec<Light>,

    pub camera: Camera,
}

impl Scene {
    /// Create an empty scene seen through `camera`.
    pub fn new(camera: Camera) -> Self {
        Self {
            primitives: Vec::new(),
            lights: Vec::new(),
            camera,
        }
    }

    /// Add a primitive.
    pub fn with_primitive(mut self, primitive: impl Into<Primitive>) -> Self {
        self.primitives.push(primitive.into());
        self
    }

    /// Add a light.
    pub fn with_light(mut self, light: Light) -> Self {
        self.lights.push(light);
        self
    }

    /// Copy of this scene with another camera.
    pub fn with_camera(self, camera: Camera) -> Self {
        Self { camera, ..self }
    }

    pub fn primitive_count(&self) -> usize {
        self.primitives.len()
    }

    pub fn light_count(&self) -> usize {
        self.lights.len()
    }

    /// Check the geometry for input that would only produce NaNs.
    ///
    /// Tracing never validates; call this once after construction.
    pub fn validate(&self) -> SceneResult<()> {
        if self.camera.is_degenerate() {
            return Err(SceneError::configuration(format!(
                "camera at {} has a degenerate basis",
                self.camera.pos
            )));
        }

        for (index, primitive) in self.primitives.iter().enumerate() {
            match primitive {
                Primitive::Sphere(sphere) => {
                    if !sphere.center().is_finite() {
                        return Err(SceneError::configuration(format!(
                            "sphere {index} has a non-finite center"
                        )));
                    }
                    if !(sphere.radius().is_finite() && sphere.radius() > 0.0) {
                        return Err(SceneError::configuration(format!(
                            "sphere {index} has invalid radius {}",
                            sphere.radius()
                        )));
                    }
                }
                Primitive::Plane(plane) => {
                    let normal = plane.normal(Vector3::ZERO);
                    let length = normal.length();
                    if !(length.is_finite() && length > 0.0) || !plane.offset().is_finite() {
                        return Err(SceneError::configuration(format!(
                            "plane {index} has invalid normal {normal} or offset {}",
                            plane.offset()
                        )));
                    }
                    if (length - 1.0).abs() > 1e-9 {
                        log::warn!("plane {index} normal {normal} is not unit length ({length})");
                    }
                }
            }

            if let Err(SceneError::Configuration(message)) = primitive.surface().validate() {
                return Err(SceneError::configuration(format!(
                    "{} {index} surface: {message}",
                    primitive.kind()
                )));
            }
        }

        for (index, light) in self.lights.iter().enumerate() {
            if !light.pos.is_finite() {
                return Err(SceneError::configuration(format!(
                    "light {index} has a non-finite position"
                )));
            }
        }

        if self.lights.is_empty() {
            log::warn!("scene has no lights; only reflections of the background will render");
        }

        log::debug!(
            "Validated scene: {} primitives, {} lights",
            self.primitive_count(),
            self.light_count()
        );
        Ok(())
    }
}

/// The canonical demo scene: a checkerboard floor, three shiny spheres and
/// four colored point lights.
pub fn default_scene() -> Scene {
    let camera = Camera::new(Vector3::new(3.0, 2.0, 4.0), Vector3::new(-1.0, 0.5, 0.0));

    Scene::new(camera)
        .with_primitive(Plane::new(Vector3::new(0.0, 1.0, 0.0), 0.0, Surface::Checkerboard))
        .with_primitive(Sphere::new(Vector3::new(0.0, 1.0, -0.25), 1.0, Surface::Shiny))
        .with_primitive(Sphere::new(Vector3::new(0.5, 1.75, 2.1), 0.25, Surface::Shiny))
        .with_primitive(Sphere::new(Vector3::new(-1.0, 0.7, 1.5), 0.5, Surface::Shiny))
        .with_light(Light::new(Vector3::new(-2.0, 2.5, 0.0), Color::new(0.49, 0.07, 0.07)))
        .with_light(Light::new(Vector3::new(1.5, 2.5, 1.5), Color::new(0.07, 0.07, 0.49)))
        .with_light(Light::new(Vector3::new(1.5, 2.5, -1.5), Color::new(0.57, 0.8, 0.071)))
        .with_light(Light::new(Vector3::new(0.0, 3.5, 0.0), Color::new(0.21, 0.21, 0.35)))
}
