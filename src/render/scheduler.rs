use rayon::prelude::*;

use crate::{
    config::params::BokehParams,
    foundation::{
        core::Area,
        error::{BokehError, BokehResult},
    },
    operation::{
        bokeh::{BokehImageOperation, OutputMode},
        traits::{TileSource, TiledOperation},
    },
    render::buffer::{MaskBuffer, TileBuffer},
};

/// How a canvas is split into tiles and spread across worker threads.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TileThreading {
    /// Evaluate tiles on a dedicated rayon pool instead of the calling thread.
    pub parallel: bool,
    /// Maximum tile edge length in pixels.
    pub tile_size: u32,
    /// Override the number of rayon worker threads. `None` uses rayon defaults.
    pub threads: Option<usize>,
}

impl Default for TileThreading {
    fn default() -> Self {
        Self {
            parallel: true,
            tile_size: 64,
            threads: None,
        }
    }
}

impl TileThreading {
    /// Single-threaded evaluation with the default tile size.
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            ..Self::default()
        }
    }

    fn validate(&self) -> BokehResult<()> {
        if self.tile_size == 0 {
            return Err(BokehError::validation("tile threading 'tile_size' must be >= 1"));
        }
        if self.threads == Some(0) {
            return Err(BokehError::validation(
                "tile threading 'threads' must be >= 1 when set",
            ));
        }
        Ok(())
    }
}

/// Evaluate every tile of `source`'s canvas and assemble the result.
///
/// Tiles are evaluated independently (in parallel when enabled) and copied into the canvas in
/// tile order, so the output does not depend on the thread count or tile size.
#[tracing::instrument(skip(source))]
pub fn render_canvas<S: TileSource>(
    source: &S,
    threading: &TileThreading,
) -> BokehResult<MaskBuffer> {
    threading.validate()?;

    let canvas = source.canvas_size(Area::default());
    let channels = source.channels();
    let tiles = canvas.split_tiles(threading.tile_size)?;
    tracing::debug!(
        width = canvas.width,
        height = canvas.height,
        tiles = tiles.len(),
        "partitioned canvas"
    );

    let eval = |area: &Area| -> BokehResult<TileBuffer> {
        let mut tile = TileBuffer::new(*area, channels);
        source.evaluate_tile(&mut tile, &[])?;
        Ok(tile)
    };

    let rendered = if threading.parallel {
        let pool = build_thread_pool(threading.threads)?;
        tracing::debug!(threads = pool.current_num_threads(), "evaluating tiles in parallel");
        pool.install(|| tiles.par_iter().map(eval).collect::<Vec<_>>())
    } else {
        tiles.iter().map(eval).collect::<Vec<_>>()
    };

    let mut out = MaskBuffer::new(canvas.width, canvas.height, channels);
    for tile in rendered {
        out.blit(&tile?)?;
    }
    Ok(out)
}

/// Initialize a bokeh operation over borrowed parameters, render it and tear it down.
pub fn render_bokeh(
    params: &BokehParams,
    resolution: u32,
    output: OutputMode,
    threading: &TileThreading,
) -> BokehResult<MaskBuffer> {
    let ready = BokehImageOperation::borrowed(params)
        .with_resolution(resolution)
        .with_output(output)
        .init()?;
    let canvas = render_canvas(&ready, threading);
    ready.deinit();
    canvas
}

fn build_thread_pool(threads: Option<usize>) -> BokehResult<rayon::ThreadPool> {
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| BokehError::evaluation(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/render/scheduler.rs"]
mod tests;
