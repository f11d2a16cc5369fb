//! `lsystem-painter`: renders an L-System to a PNG image.
//!
//! **Usage:**
//! ```text
//! lsystem-painter --seed "++X" --rules X "F+[[XU]D-XU]D-F[-FXU]D+X" F FF \
//!     --width 800 --height 800 --rotatedeg 25 --numiters 6 --out fern.png
//! lsystem-painter --config scene.json --out scene.png
//! ```

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use lsystem_painter::{Grammar, LSystem, RenderConfig, Rgb, Scene};
use tracing_subscriber::EnvFilter;

const COMMANDS_HELP: &str = "\
Currently supported named commands are:
    \"F\": Move forward, can also be used to store more complex rules
    \"G\": Move forward, can also be used to store more complex rules
    \"H\": Move forward, can also be used to store more complex rules
    \"+\": Rotate counter-clockwise
    \"-\": Rotate clockwise
    \"U\": Lift drawing pen up (stop drawing)
    \"D\": Put drawing pen down (resume drawing)
    \"[\": Store position and angle onto stack
    \"]\": Remove most recent position and angle from stack and move cursor there
    \"X\": No action, used for storing more complex rules
    \"Y\": No action, used for storing more complex rules
    \"Z\": No action, used for storing more complex rules
Cursor begins facing to the right";

/// Generate an image from an L-System.
#[derive(Parser)]
#[command(name = "lsystem-painter", about = "Generate an image from an L-System", after_long_help = COMMANDS_HELP)]
struct Args {
    /// Rules engine: named command first, then the rule it defines.
    /// For example, the Barnsley fern is `--rules X "F+[[XU]D-XU]D-F[-FXU]D+X" F FF`.
    #[arg(long, num_args = 1.., required_unless_present = "config")]
    rules: Vec<String>,

    /// Seed value, e.g. `++X` for the Barnsley fern.
    #[arg(long, required_unless_present = "config")]
    seed: Option<String>,

    /// Image height in pixels.
    #[arg(long, required_unless_present = "config")]
    height: Option<u32>,

    /// Image width in pixels.
    #[arg(long, required_unless_present = "config")]
    width: Option<u32>,

    /// Starting x position of cursor (default middle of image).
    #[arg(long)]
    startx: Option<f64>,

    /// Starting y position of cursor (default middle of image).
    #[arg(long)]
    starty: Option<f64>,

    /// Pen movement length per forward command (default 5.0).
    #[arg(long)]
    movelen: Option<f64>,

    /// Pen width in pixels (default 1).
    #[arg(long)]
    penwidth: Option<u32>,

    /// Degrees to rotate on `+` and `-` (default 90).
    #[arg(long)]
    rotatedeg: Option<f64>,

    /// Background color hex string (default 000000).
    #[arg(long)]
    bgcolor: Option<Rgb>,

    /// Pen colors as a series of hex strings (default FFFFFF).
    #[arg(long, num_args = 1..)]
    pencolors: Vec<Rgb>,

    /// Iterations of the L-System before drawing (default 10).
    #[arg(long)]
    numiters: Option<usize>,

    /// JSON scene file; command-line flags override its render settings.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output image path.
    #[arg(long, default_value = "lsystem.png")]
    out: PathBuf,
}

impl Args {
    fn scene(&self) -> Result<Scene> {
        let mut scene = match &self.config {
            Some(path) => {
                let json = fs::read_to_string(path)
                    .with_context(|| format!("Failed to read {}", path.display()))?;
                Scene::from_json(&json)
                    .with_context(|| format!("Failed to parse {}", path.display()))?
            }
            None => Scene {
                seed: String::new(),
                rules: Default::default(),
                names: None,
                render: RenderConfig::default(),
            },
        };

        if let Some(seed) = &self.seed {
            scene.seed = seed.clone();
        }
        if !self.rules.is_empty() {
            if self.rules.len() % 2 != 0 {
                bail!(
                    "--rules expects key/replacement pairs, got {} values",
                    self.rules.len()
                );
            }
            scene.rules = self
                .rules
                .chunks(2)
                .map(|pair| (pair[0].clone(), pair[1].clone()))
                .collect();
        }

        let render = &mut scene.render;
        if let Some(width) = self.width {
            render.width = width;
        }
        if let Some(height) = self.height {
            render.height = height;
        }
        if self.startx.is_some() {
            render.start_x = self.startx;
        }
        if self.starty.is_some() {
            render.start_y = self.starty;
        }
        if let Some(movelen) = self.movelen {
            render.movement_length = movelen;
        }
        if let Some(penwidth) = self.penwidth {
            render.pen_width = penwidth;
        }
        if let Some(degrees) = self.rotatedeg {
            render.rotate_angle = degrees.to_radians();
        }
        if let Some(bg) = self.bgcolor {
            render.background = bg;
        }
        if !self.pencolors.is_empty() {
            render.pen_colors = self.pencolors.clone();
        }
        if let Some(iterations) = self.numiters {
            render.iterations = iterations;
        }
        Ok(scene)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let scene = args.scene()?;

    let names = scene.name_table().context("Invalid command names")?;
    let grammar =
        Grammar::from_strings(&scene.seed, &scene.rules, &names).context("Invalid grammar")?;

    let mut system = LSystem::new(grammar, scene.render).context("Invalid render settings")?;
    let canvas = system.render().context("Failed to draw L-System")?;
    canvas
        .save(&args.out)
        .with_context(|| format!("Failed to write {}", args.out.display()))?;
    println!("Written: {}", args.out.display());
    Ok(())
}
