//! JSON scene descriptions.
//!
//! A [`SceneDescription`] is the serializable form of a [`Scene`]. Spheres
//! are written with their radius and cameras with their look-at point; the
//! derived values (squared radius, camera basis) are rebuilt on load.
//!
//! ```json
//! {
//!   "primitives": [
//!     { "type": "plane", "normal": [0.0, 1.0, 0.0], "offset": 0.0, "surface": "checkerboard" },
//!     { "type": "sphere", "center": [0.0, 1.0, -0.25], "radius": 1.0, "surface": "shiny" }
//!   ],
//!   "lights": [ { "pos": [-2.0, 2.5, 0.0], "color": { "r": 0.49, "g": 0.07, "b": 0.07 } } ],
//!   "camera": { "pos": [3.0, 2.0, 4.0], "look_at": [-1.0, 0.5, 0.0] }
//! }
//! ```

use std::path::Path;

use prism_math::Vector3;
use serde::{Deserialize, Serialize};

use crate::{Camera, Light, Plane, Primitive, Scene, SceneResult, Sphere, Surface};

/// Serializable scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneDescription {
    #[serde(default)]
    pub primitives: Vec<PrimitiveDescription>,
    #[serde(default)]
    pub lights: Vec<Light>,
    pub camera: CameraDescription,
}

/// Serializable primitive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PrimitiveDescription {
    Sphere {
        center: Vector3,
        radius: f64,
        surface: Surface,
    },
    Plane {
        normal: Vector3,
        offset: f64,
        surface: Surface,
    },
}

/// Serializable camera placement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraDescription {
    pub pos: Vector3,
    pub look_at: Vector3,
}

impl SceneDescription {
    /// Build and validate the scene.
    pub fn into_scene(self) -> SceneResult<Scene> {
        let camera = Camera::try_new(self.camera.pos, self.camera.look_at)?;
        let mut scene = Scene::new(camera);

        for primitive in self.primitives {
            scene = scene.with_primitive(Primitive::from(primitive));
        }
        for light in self.lights {
            scene = scene.with_light(light);
        }

        scene.validate()?;
        Ok(scene)
    }
}

impl From<PrimitiveDescription> for Primitive {
    fn from(desc: PrimitiveDescription) -> Self {
        match desc {
            PrimitiveDescription::Sphere {
                center,
                radius,
                surface,
            } => Sphere::new(center, radius, surface).into(),
            PrimitiveDescription::Plane {
                normal,
                offset,
                surface,
            } => Plane::new(normal, offset, surface).into(),
        }
    }
}

impl From<&Primitive> for PrimitiveDescription {
    fn from(primitive: &Primitive) -> Self {
        match primitive {
            Primitive::Sphere(sphere) => PrimitiveDescription::Sphere {
                center: sphere.center(),
                radius: sphere.radius(),
                surface: *sphere.surface(),
            },
            Primitive::Plane(plane) => PrimitiveDescription::Plane {
                normal: plane.normal(Vector3::ZERO),
                offset: plane.offset(),
                surface: *plane.surface(),
            },
        }
    }
}

impl From<&Scene> for SceneDescription {
    fn from(scene: &Scene) -> Self {
        Self {
            primitives: scene.primitives.iter().map(PrimitiveDescription::from).collect(),
            lights: scene.lights.clone(),
            camera: CameraDescription {
                pos: scene.camera.pos,
                look_at: scene.camera.look_at(),
            },
        }
    }
}

/// Parse a scene from a JSON string.
pub fn parse_scene(json: &str) -> SceneResult<Scene> {
    let desc: SceneDescription = serde_json::from_str(json)?;
    desc.into_scene()
}

/// Load a scene from a JSON file.
pub fn load_scene<P: AsRef<Path>>(path: P) -> SceneResult<Scene> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path)?;
    let scene = parse_scene(&json)?;

    log::info!(
        "Loaded scene {}: {} primitives, {} lights",
        path.display(),
        scene.primitive_count(),
        scene.light_count()
    );
    Ok(scene)
}

/// Serialize a scene to pretty printed JSON.
pub fn save_scene(scene: &Scene) -> SceneResult<String> {
    Ok(serde_json::to_string_pretty(&SceneDescription::from(scene))?)
}
