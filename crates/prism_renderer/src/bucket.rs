//! Bucket-based tile rendering.
//!
//! Divides the image into tiles (buckets) that are rendered independently
//! and in parallel using rayon. Every pixel is a pure function of the scene
//! and its coordinates, so the result is identical to the serial
//! [`render`](crate::render).

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use prism_core::Scene;
use prism_math::DrawingColor;
use rayon::prelude::*;

use crate::renderer::render_pixel;
use crate::{ImageBuffer, RayTracer, RenderConfig, RenderError, RenderResult, TraceStats};

/// A rectangular region of the image to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucket {
    /// X coordinate of bucket's top-left corner
    pub x: u32,
    /// Y coordinate of bucket's top-left corner
    pub y: u32,
    /// Width of the bucket in pixels
    pub width: u32,
    /// Height of the bucket in pixels
    pub height: u32,
    /// Index of this bucket in the render order
    pub index: usize,
}

impl Bucket {
    /// Create a new bucket.
    pub fn new(x: u32, y: u32, width: u32, height: u32, index: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
            index,
        }
    }

    /// Get the total number of pixels in this bucket.
    pub fn pixel_count(&self) -> u32 {
        self.width * self.height
    }
}

/// Generate buckets for an image, ordered from the center outward.
///
/// A zero `bucket_size` yields no buckets.
pub fn generate_buckets(width: u32, height: u32, bucket_size: u32) -> Vec<Bucket> {
    if bucket_size == 0 {
        return Vec::new();
    }

    let mut buckets = Vec::new();
    let mut index = 0;

    let mut y = 0;
    while y < height {
        let mut x = 0;
        while x < width {
            let bw = bucket_size.min(width - x);
            let bh = bucket_size.min(height - y);
            buckets.push(Bucket::new(x, y, bw, bh, index));
            index += 1;
            x += bucket_size;
        }
        y += bucket_size;
    }

    sort_spiral(&mut buckets, width, height);

    for (i, bucket) in buckets.iter_mut().enumerate() {
        bucket.index = i;
    }

    buckets
}

/// Sort buckets by distance from the image center.
fn sort_spiral(buckets: &mut [Bucket], width: u32, height: u32) {
    let center_x = width as f64 / 2.0;
    let center_y = height as f64 / 2.0;

    let distance = |b: &Bucket| {
        let bx = b.x as f64 + b.width as f64 / 2.0;
        let by = b.y as f64 + b.height as f64 / 2.0;
        (bx - center_x).powi(2) + (by - center_y).powi(2)
    };

    buckets.sort_by(|a, b| distance(a).total_cmp(&distance(b)));
}

/// Result of rendering a bucket.
#[derive(Debug, Clone)]
pub struct BucketResult {
    /// The bucket that was rendered
    pub bucket: Bucket,
    /// Pixel colors in row-major order within the bucket
    pub pixels: Vec<DrawingColor>,
    /// Rays traced for this bucket
    pub stats: TraceStats,
}

/// Render a single bucket.
pub fn render_bucket(bucket: &Bucket, scene: &Scene, tracer: &RayTracer, config: &RenderConfig) -> BucketResult {
    let mut pixels = Vec::with_capacity(bucket.pixel_count() as usize);
    let mut stats = TraceStats::default();

    for local_y in 0..bucket.height {
        for local_x in 0..bucket.width {
            let color = render_pixel(scene, tracer, bucket.x + local_x, bucket.y + local_y, config, &mut stats);
            pixels.push(color.to_drawing_color());
        }
    }

    BucketResult {
        bucket: *bucket,
        pixels,
        stats,
    }
}

impl ImageBuffer {
    /// Copy a rendered bucket into place.
    pub fn write_bucket(&mut self, result: &BucketResult) {
        let bucket = &result.bucket;
        for local_y in 0..bucket.height {
            for local_x in 0..bucket.width {
                let color = result.pixels[(local_y * bucket.width + local_x) as usize];
                self.set(bucket.x + local_x, bucket.y + local_y, color);
            }
        }
    }
}

/// Render the scene on the rayon thread pool.
pub fn render_parallel(scene: &Scene, config: &RenderConfig) -> RenderResult<(ImageBuffer, TraceStats)> {
    render_parallel_cancellable(scene, config, &AtomicBool::new(false))
}

/// Like [`render_parallel`], but gives up with [`RenderError::Cancelled`]
/// once `cancel` is set. The flag is checked before each bucket starts.
pub fn render_parallel_cancellable(
    scene: &Scene,
    config: &RenderConfig,
    cancel: &AtomicBool,
) -> RenderResult<(ImageBuffer, TraceStats)> {
    config.validate()?;

    let tracer = config.tracer();
    let buckets = generate_buckets(config.width, config.height, config.bucket_size);
    let start = Instant::now();

    log::debug!(
        "Rendering {}x{} in {} buckets of {} px on {} threads",
        config.width,
        config.height,
        buckets.len(),
        config.bucket_size,
        rayon::current_num_threads()
    );

    let results = buckets
        .par_iter()
        .map(|bucket| {
            if cancel.load(Ordering::Relaxed) {
                return Err(RenderError::Cancelled);
            }
            Ok(render_bucket(bucket, scene, &tracer, config))
        })
        .collect::<RenderResult<Vec<_>>>()
        .inspect_err(|_| log::warn!("Render cancelled"))?;

    let mut image = ImageBuffer::new(config.width, config.height);
    let mut stats = TraceStats::default();
    for result in &results {
        image.write_bucket(result);
        stats.merge(&result.stats);
    }

    log::info!(
        "Rendered {}x{} in {:?} ({} rays, {} shadow)",
        config.width,
        config.height,
        start.elapsed(),
        stats.total_rays(),
        stats.shadow_rays
    );
    Ok((image, stats))
}
