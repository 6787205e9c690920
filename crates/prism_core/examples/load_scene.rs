//! Example: Load and inspect a JSON scene file.
//!
//! Run with: cargo run --example load_scene -- scenes/default.json

use std::env;

use prism_core::{load_scene, Primitive};

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        println!("Usage: load_scene <path-to-json-file>");
        println!("\nExample:");
        println!("  cargo run --example load_scene -- scenes/default.json");
        return;
    }

    let path = &args[1];
    println!("Loading scene file: {}", path);

    match load_scene(path) {
        Ok(scene) => {
            println!("\n=== Scene ===");
            println!("Primitives: {}", scene.primitive_count());
            println!("Lights: {}", scene.light_count());
            println!(
                "Camera: {} looking at {}",
                scene.camera.pos,
                scene.camera.look_at()
            );

            println!("\n--- Primitives ---");
            for (i, primitive) in scene.primitives.iter().enumerate() {
                match primitive {
                    Primitive::Sphere(sphere) => println!(
                        "  [{}] sphere at {} radius {:.2} ({:?})",
                        i,
                        sphere.center(),
                        sphere.radius(),
                        sphere.surface()
                    ),
                    Primitive::Plane(plane) => println!(
                        "  [{}] plane offset {:.2} ({:?})",
                        i,
                        plane.offset(),
                        plane.surface()
                    ),
                }
            }

            println!("\n--- Lights ---");
            for (i, light) in scene.lights.iter().enumerate() {
                println!("  [{}] {} color {:?}", i, light.pos, light.color);
            }
        }
        Err(e) => {
            eprintln!("Error loading scene: {}", e);
            std::process::exit(1);
        }
    }
}
