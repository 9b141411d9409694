//! Procedural bokeh kernel masks.
//!
//! This crate synthesizes the grayscale "bokeh" image a defocus effect convolves with: a regular
//! polygon (the aperture blades) that can morph into a circle and carry a concentric
//! catadioptric hole, anti-aliased along every boundary.
//!
//! # Pipeline overview
//!
//! 1. **Configure**: [`BokehImageNode`] (JSON-facing record) or [`BokehParamsBuilder`] produce
//!    a validated, immutable [`BokehParams`].
//! 2. **Initialize**: [`BokehImageOperation`] fixes parameter ownership, resolution and output
//!    layout; [`TiledOperation::init`] turns it into a [`BokehImageReady`].
//! 3. **Evaluate**: [`TileSource::evaluate_tile`] fills disjoint [`TileBuffer`]s, possibly from
//!    many threads; [`render_canvas`] partitions the canvas and runs them on a rayon pool.
//! 4. **Export** (optional): [`MaskBuffer::save_png`].
//!
//! Output values are 0 inside the shape and 1 outside.
//!
//! ```
//! use bokeh_image::{BokehParams, OutputMode, TileThreading, render_bokeh};
//!
//! let params = BokehParams::builder().flaps(6).roundness(0.25).build()?;
//! let mask = render_bokeh(&params, 64, OutputMode::Mask, &TileThreading::default())?;
//! assert_eq!(mask.pixel(32, 32), Some(&[0.0][..]));
//! # Ok::<(), bokeh_image::BokehError>(())
//! ```
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod config;
mod foundation;
mod operation;
mod render;
mod shape;

pub use config::node::BokehImageNode;
pub use config::params::{BokehParams, BokehParamsBuilder, DEFAULT_RESOLUTION, MAX_VERTICES};
pub use foundation::core::{Area, Point, Vec2};
pub use foundation::error::{BokehError, BokehResult};
pub use operation::bokeh::{BokehImageOperation, BokehImageReady, OutputMode, Ownership};
pub use operation::traits::{TileSource, TiledOperation};
pub use render::buffer::{MaskBuffer, TileBuffer};
pub use render::scheduler::{TileThreading, render_bokeh, render_canvas};
pub use shape::evaluator::BokehShape;
pub use shape::polygon::{closest_point_on_line, regular_polygon_vertex};
