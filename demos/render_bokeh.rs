use std::path::PathBuf;

use bokeh_image::{BokehParams, OutputMode, TileThreading, render_bokeh};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let out_dir = PathBuf::from("target").join("demos");
    std::fs::create_dir_all(&out_dir)?;

    let shapes = [
        ("hexagon", BokehParams::builder().flaps(6).build()?),
        (
            "rounded_pentagon",
            BokehParams::builder().flaps(5).rotation(0.3).roundness(0.4).build()?,
        ),
        (
            "mirror_lens",
            BokehParams::builder().flaps(8).roundness(1.0).catadioptric(0.45).build()?,
        ),
    ];

    for (name, params) in &shapes {
        let mask = render_bokeh(params, 256, OutputMode::Mask, &TileThreading::default())?;
        let path = out_dir.join(format!("{name}.png"));
        mask.save_png(&path)?;
        eprintln!("wrote {}", path.display());
    }

    let shifted = BokehParams::builder().flaps(7).roundness(0.2).lens_shift(-0.3).build()?;
    let rgba = render_bokeh(&shifted, 256, OutputMode::Dispersion, &TileThreading::default())?;
    let path = out_dir.join("dispersion.png");
    rgba.save_png(&path)?;
    eprintln!("wrote {}", path.display());
    Ok(())
}
