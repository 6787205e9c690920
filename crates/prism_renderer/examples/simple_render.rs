//! Simple ray tracer example.
//!
//! Renders the demo scene plus an extra matte sphere and saves it as PPM.

use std::fs::File;

use prism_core::{Light, Sphere, Surface};
use prism_renderer::{
    default_scene, render_parallel, write_ppm, Color, PpmFormat, RenderConfig, Vector3,
};

fn main() {
    println!("Prism Ray Tracer - Simple Example");
    println!("=================================");

    let start = std::time::Instant::now();
    let scene = default_scene()
        .with_primitive(Sphere::new(
            Vector3::new(1.5, 0.4, 0.5),
            0.4,
            Surface::Uniform {
                diffuse: Color::new(0.9, 0.4, 0.1),
                specular: Color::GREY,
                reflect: 0.2,
                roughness: 40.0,
            },
        ))
        .with_light(Light::new(Vector3::new(4.0, 4.0, 4.0), Color::new(0.2, 0.2, 0.2)));
    scene.validate().expect("valid scene");
    println!("Scene built in {:?}", start.elapsed());

    let config = RenderConfig::default().with_resolution(640, 480);
    println!("Rendering {}x{}...", config.width, config.height);

    let start = std::time::Instant::now();
    let (image, stats) = render_parallel(&scene, &config).expect("render");
    println!("Rendered in {:?} ({} rays)", start.elapsed(), stats.total_rays());

    let filename = "output.ppm";
    let file = File::create(filename).expect("Failed to create image");
    write_ppm(&image, PpmFormat::Ascii, file).expect("Failed to save image");
    println!("Saved to {}", filename);
}
