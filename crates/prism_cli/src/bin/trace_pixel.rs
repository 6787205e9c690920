// Quick debug tool to inspect how a single pixel is shaded
// Run with: cargo run --release --bin trace_pixel -- <x> <y> [scene.json]

use std::env;

use prism_core::{default_scene, load_scene};
use prism_renderer::{nearest_intersection, primary_ray, RenderConfig, TraceStats};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        eprintln!("Usage: {} <x> <y> [scene.json]", args[0]);
        std::process::exit(1);
    }

    let x: u32 = args[1].parse()?;
    let y: u32 = args[2].parse()?;
    let scene = match args.get(3) {
        Some(path) => load_scene(path)?,
        None => default_scene(),
    };
    let config = RenderConfig::default();

    let ray = primary_ray(&scene.camera, x, y, config.width, config.height);
    println!("Pixel ({x}, {y}) of {}x{}", config.width, config.height);
    println!("Primary ray: start {} dir {}", ray.start, ray.dir);

    match nearest_intersection(&ray, &scene.primitives) {
        Some(hit) => {
            let pos = hit.ray.at(hit.dist);
            println!("Hit {} at dist {:.6}", hit.primitive.kind(), hit.dist);
            println!("  position {pos}");
            println!("  normal   {}", hit.primitive.normal(pos));
            println!("  surface  {:?}", hit.primitive.surface());
        }
        None => println!("Miss (background)"),
    }

    let mut stats = TraceStats::default();
    let color = config.tracer().trace_ray_counted(&ray, &scene, 0, &mut stats);
    println!("\nColor {:?}", color);
    println!("Drawing color {:?}", color.to_drawing_color());
    println!(
        "Rays: {} reflection, {} shadow, deepest level {}",
        stats.reflection_rays, stats.shadow_rays, stats.max_depth_reached
    );

    Ok(())
}
