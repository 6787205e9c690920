//! Prism Renderer - recursive Whitted-style ray tracing.
//!
//! For every pixel a primary ray is cast from the camera, the nearest
//! primitive hit is shaded with diffuse and specular light from each
//! unshadowed point light, and mirror reflections are traced recursively
//! up to a fixed depth.
//!
//! Rendering is deterministic: [`render`] walks pixels in row-major order
//! on the calling thread, [`render_parallel`] splits the image into
//! buckets on the rayon pool and produces the same pixels.

mod bucket;
mod error;
mod hittable;
mod output;
mod renderer;
mod sink;
mod tracer;

pub use bucket::{generate_buckets, render_bucket, render_parallel, render_parallel_cancellable, Bucket, BucketResult};
pub use error::{RenderError, RenderResult};
pub use hittable::{intersect, nearest_intersection, test_ray, Intersect, Intersection};
pub use output::{read_ppm, save_image, save_png, write_ppm, PpmFormat};
pub use renderer::{primary_ray, render, render_pixel, RenderConfig, DEFAULT_BUCKET_SIZE};
pub use sink::{ImageBuffer, PixelSink};
pub use tracer::{DepthCutoff, RayTracer, TraceStats, DEFAULT_MAX_DEPTH};

/// Re-export the scene and math types renderer users need
pub use prism_core::{default_scene, Scene};
pub use prism_math::{Color, DrawingColor, Ray, Vector3};
