use std::path::PathBuf;

use anyhow::Context as _;
use bokeh_image::{
    BokehImageNode, BokehImageOperation, DEFAULT_RESOLUTION, OutputMode, TileThreading,
    TiledOperation, TileSource, render_canvas,
};
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "bokeh-image", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a bokeh mask as a PNG.
    Render(RenderArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input bokeh node JSON. Flags below override its fields.
    #[arg(long = "in")]
    in_path: Option<PathBuf>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Number of aperture blades.
    #[arg(long)]
    flaps: Option<u32>,

    /// Rotation in radians.
    #[arg(long, allow_negative_numbers = true)]
    angle: Option<f32>,

    /// Polygon-to-circle morph in [0, 1].
    #[arg(long)]
    rounding: Option<f32>,

    /// Hole radius as a fraction of the circumradius, in [0, 1].
    #[arg(long)]
    catadioptric: Option<f32>,

    /// Lens shift in [-1, 1] (only visible with --dispersion).
    #[arg(long, allow_negative_numbers = true)]
    lens_shift: Option<f32>,

    /// Canvas edge length in pixels.
    #[arg(long, default_value_t = DEFAULT_RESOLUTION)]
    resolution: u32,

    /// Write the 4-channel lens-shift dispersion image instead of the mask.
    #[arg(long, default_value_t = false)]
    dispersion: bool,

    /// Evaluate tiles on the calling thread only.
    #[arg(long, default_value_t = false)]
    sequential: bool,

    /// Override rayon worker threads.
    #[arg(long)]
    threads: Option<usize>,

    /// Tile edge length in pixels.
    #[arg(long, default_value_t = 64)]
    tile_size: u32,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
    }
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let mut node = match &args.in_path {
        Some(path) => BokehImageNode::from_path(path)?,
        None => BokehImageNode::default(),
    };
    if let Some(v) = args.flaps {
        node.flaps = v;
    }
    if let Some(v) = args.angle {
        node.angle = v;
    }
    if let Some(v) = args.rounding {
        node.rounding = v;
    }
    if let Some(v) = args.catadioptric {
        node.catadioptric = v;
    }
    if let Some(v) = args.lens_shift {
        node.lens_shift = v;
    }

    let output = if args.dispersion {
        OutputMode::Dispersion
    } else {
        OutputMode::Mask
    };
    let ready = BokehImageOperation::from_node(&node)?
        .with_resolution(args.resolution)
        .with_output(output)
        .init()?;
    let threading = TileThreading {
        parallel: !args.sequential,
        tile_size: args.tile_size,
        threads: args.threads,
    };
    let mask = render_canvas(&ready, &threading)?;
    ready.deinit();

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    mask.save_png(&args.out)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}
