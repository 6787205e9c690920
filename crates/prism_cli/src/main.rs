use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use prism_core::{default_scene, load_scene, save_scene, Scene};
use prism_renderer::{
    read_ppm, render, render_parallel, save_image, DepthCutoff, ImageBuffer, RenderConfig, DEFAULT_BUCKET_SIZE,
    DEFAULT_MAX_DEPTH,
};

/// Render a scene with the Prism ray tracer.
#[derive(Parser, Debug)]
#[command(name = "prism", version, about)]
struct Args {
    /// JSON scene description; the built-in demo scene when omitted
    #[arg(short, long)]
    scene: Option<PathBuf>,

    /// Output image (.png or .ppm)
    #[arg(short, long, default_value = "prism.png")]
    output: PathBuf,

    #[arg(long, default_value_t = 300)]
    width: u32,

    #[arg(long, default_value_t = 300)]
    height: u32,

    /// Reflection recursion limit
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: u32,

    /// Scale the grey used past the depth limit by the surface reflectivity
    #[arg(long)]
    scaled_cutoff: bool,

    /// Render on the calling thread in row-major order
    #[arg(long)]
    serial: bool,

    /// Tile size for parallel rendering
    #[arg(long, default_value_t = DEFAULT_BUCKET_SIZE)]
    bucket_size: u32,

    /// Compare the render against a reference PPM and report differing pixels
    #[arg(long)]
    compare: Option<PathBuf>,

    /// Print the built-in scene as JSON and exit
    #[arg(long)]
    dump_default_scene: bool,
}

impl Args {
    fn config(&self) -> RenderConfig {
        let cutoff = if self.scaled_cutoff {
            DepthCutoff::ReflectedGrey
        } else {
            DepthCutoff::Grey
        };

        RenderConfig::default()
            .with_resolution(self.width, self.height)
            .with_max_depth(self.max_depth)
            .with_cutoff(cutoff)
            .with_bucket_size(self.bucket_size)
    }

    fn scene(&self) -> Result<Scene> {
        match &self.scene {
            Some(path) => load_scene(path).with_context(|| format!("Failed to load scene {}", path.display())),
            None => Ok(default_scene()),
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args = Args::parse();

    if args.dump_default_scene {
        println!("{}", save_scene(&default_scene())?);
        return Ok(());
    }

    let scene = args.scene()?;
    let config = args.config();
    config.validate()?;

    log::info!(
        "Rendering {} primitives, {} lights at {}x{} (max depth {})",
        scene.primitive_count(),
        scene.light_count(),
        config.width,
        config.height,
        config.max_depth
    );

    let image = if args.serial {
        let mut image = ImageBuffer::new(config.width, config.height);
        render(&scene, &config, &mut image);
        image
    } else {
        render_parallel(&scene, &config)?.0
    };

    save_image(&image, &args.output).with_context(|| format!("Failed to write {}", args.output.display()))?;

    if let Some(reference) = &args.compare {
        let file = File::open(reference).with_context(|| format!("Failed to open {}", reference.display()))?;
        let expected = read_ppm(file).with_context(|| format!("Failed to read {}", reference.display()))?;
        let differing = image.count_differences(&expected, 1);
        if differing == 0 {
            log::info!("Render matches {}", reference.display());
        } else {
            anyhow::bail!("{differing} pixels differ from {}", reference.display());
        }
    }

    Ok(())
}
