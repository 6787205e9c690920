//! Image renderer.
//!
//! Maps each pixel to a primary ray through the camera basis, traces it,
//! converts the result to display space and hands it to a pixel sink.

use std::time::Instant;

use prism_core::{Camera, Scene};
use prism_math::{Color, Ray, VectorExt};

use crate::{DepthCutoff, PixelSink, RayTracer, RenderError, RenderResult, TraceStats, DEFAULT_MAX_DEPTH};

/// Default tile size for parallel rendering.
pub const DEFAULT_BUCKET_SIZE: u32 = 32;

/// Render configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderConfig {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Maximum reflection depth
    pub max_depth: u32,
    /// Color when a ray doesn't hit anything
    pub background: Color,
    /// Stand-in for reflections past `max_depth`
    pub cutoff: DepthCutoff,
    /// Tile size for parallel rendering
    pub bucket_size: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 300,
            height: 300,
            max_depth: DEFAULT_MAX_DEPTH,
            background: Color::BACKGROUND,
            cutoff: DepthCutoff::Grey,
            bucket_size: DEFAULT_BUCKET_SIZE,
        }
    }
}

impl RenderConfig {
    /// Set image resolution.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    pub fn with_cutoff(mut self, cutoff: DepthCutoff) -> Self {
        self.cutoff = cutoff;
        self
    }

    pub fn with_bucket_size(mut self, bucket_size: u32) -> Self {
        self.bucket_size = bucket_size;
        self
    }

    /// Shading engine for this configuration.
    pub fn tracer(&self) -> RayTracer {
        RayTracer::new(self.max_depth, self.background).with_cutoff(self.cutoff)
    }

    /// Reject sizes that cannot be rendered.
    pub fn validate(&self) -> RenderResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(RenderError::InvalidConfig(format!(
                "resolution {}x{} is empty",
                self.width, self.height
            )));
        }
        if self.bucket_size == 0 {
            return Err(RenderError::InvalidConfig("bucket size must be positive".into()));
        }
        Ok(())
    }
}

/// Primary ray through pixel (x, y) of a `width` x `height` screen.
pub fn primary_ray(camera: &Camera, x: u32, y: u32, width: u32, height: u32) -> Ray {
    let (width, height) = (width as f64, height as f64);
    let recenter_x = |x: f64| (x - width / 2.0) / 2.0 / width;
    let recenter_y = |y: f64| (height / 2.0 - y) / 2.0 / height;

    let dir = (camera.forward + (camera.right * recenter_x(x as f64) + camera.up * recenter_y(y as f64))).norm();
    Ray::new(camera.pos, dir)
}

/// Trace one pixel and convert it to display space.
pub fn render_pixel(
    scene: &Scene,
    tracer: &RayTracer,
    x: u32,
    y: u32,
    config: &RenderConfig,
    stats: &mut TraceStats,
) -> Color {
    let ray = primary_ray(&scene.camera, x, y, config.width, config.height);
    tracer.trace_ray_counted(&ray, scene, 0, stats)
}

/// Render the entire scene into `sink`, one pixel at a time in row-major
/// order.
///
/// This is the single-threaded reference path; see
/// [`render_parallel`](crate::render_parallel) for the tiled version.
pub fn render(scene: &Scene, config: &RenderConfig, sink: &mut dyn PixelSink) -> TraceStats {
    let tracer = config.tracer();
    let mut stats = TraceStats::default();
    let start = Instant::now();

    for y in 0..config.height {
        for x in 0..config.width {
            let color = render_pixel(scene, &tracer, x, y, config, &mut stats);
            sink.set_pixel(x, y, color.to_drawing_color());
        }
    }

    log::info!(
        "Rendered {}x{} in {:?} ({} rays, {} shadow)",
        config.width,
        config.height,
        start.elapsed(),
        stats.total_rays(),
        stats.shadow_rays
    );
    stats
}
