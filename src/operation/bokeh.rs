use std::borrow::Cow;

use kurbo::Point;

use crate::{
    config::{
        node::BokehImageNode,
        params::{BokehParams, DEFAULT_RESOLUTION},
    },
    foundation::{
        core::Area,
        error::{BokehError, BokehResult},
    },
    operation::traits::{TileSource, TiledOperation},
    render::buffer::{MaskBuffer, TileBuffer},
    shape::evaluator::BokehShape,
};

/// Channel layout produced by [`BokehImageOperation`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputMode {
    /// One channel: the bokeh mask.
    #[default]
    Mask,
    /// Four channels: the mask at three lens-shifted circumradii plus their mean.
    Dispersion,
}

impl OutputMode {
    /// Number of `f32` channels per pixel.
    pub fn channels(self) -> usize {
        match self {
            Self::Mask => 1,
            Self::Dispersion => 4,
        }
    }
}

/// Whether an operation holds its parameters on loan or owns them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ownership {
    /// The caller keeps the parameters; teardown leaves them alone.
    Borrowed,
    /// The operation owns the parameters and releases them on teardown.
    Owned,
}

fn ownership_of(params: &Cow<'_, BokehParams>) -> Ownership {
    match params {
        Cow::Borrowed(_) => Ownership::Borrowed,
        Cow::Owned(_) => Ownership::Owned,
    }
}

/// Bokeh image operation before initialization.
///
/// Ownership of the parameters is fixed at construction: [`BokehImageOperation::borrowed`] for
/// records kept by the caller (a user-authored node) and [`BokehImageOperation::owned`] for
/// records synthesized on behalf of another effect.
#[derive(Clone, Debug)]
pub struct BokehImageOperation<'a> {
    params: Cow<'a, BokehParams>,
    resolution: u32,
    output: OutputMode,
}

impl<'a> BokehImageOperation<'a> {
    /// Render parameters the caller keeps ownership of.
    pub fn borrowed(params: &'a BokehParams) -> Self {
        Self::with_params(Cow::Borrowed(params))
    }

    /// Render parameters the operation takes ownership of.
    pub fn owned(params: BokehParams) -> Self {
        Self::with_params(Cow::Owned(params))
    }

    fn with_params(params: Cow<'a, BokehParams>) -> Self {
        Self {
            params,
            resolution: DEFAULT_RESOLUTION,
            output: OutputMode::Mask,
        }
    }

    /// Set the canvas edge length in pixels.
    pub fn with_resolution(mut self, resolution: u32) -> Self {
        self.resolution = resolution;
        self
    }

    /// Select the channel layout.
    pub fn with_output(mut self, output: OutputMode) -> Self {
        self.output = output;
        self
    }

    /// Who owns the parameters.
    pub fn ownership(&self) -> Ownership {
        ownership_of(&self.params)
    }

    /// Tear down without ever initializing.
    pub fn deinit(self) {
        release(self.params);
    }
}

impl BokehImageOperation<'static> {
    /// Validate a node record and take ownership of the resulting parameters.
    pub fn from_node(node: &BokehImageNode) -> BokehResult<Self> {
        Ok(Self::owned(BokehParams::from_node(node)?))
    }
}

impl<'a> TiledOperation for BokehImageOperation<'a> {
    type Ready = BokehImageReady<'a>;

    #[tracing::instrument(skip(self), fields(ownership = ?self.ownership()))]
    fn init(self) -> BokehResult<BokehImageReady<'a>> {
        if self.resolution == 0 {
            return Err(BokehError::validation("bokeh resolution must be >= 1"));
        }

        // The polygon's circumradius spans half the canvas and one pixel is the AA band.
        let half = f64::from(self.resolution) / 2.0;
        let shape = BokehShape::new(*self.params, 1.0 / half)?;
        tracing::debug!(
            resolution = self.resolution,
            vertices = self.params.vertex_count(),
            output = ?self.output,
            "bokeh operation initialized"
        );

        Ok(BokehImageReady {
            params: self.params,
            shape,
            resolution: self.resolution,
            half,
            output: self.output,
        })
    }
}

/// Initialized bokeh image operation; the only state that evaluates tiles.
#[derive(Debug)]
pub struct BokehImageReady<'a> {
    params: Cow<'a, BokehParams>,
    shape: BokehShape,
    resolution: u32,
    half: f64,
    output: OutputMode,
}

impl BokehImageReady<'_> {
    /// Canvas edge length in pixels.
    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    /// Shape evaluated per pixel, in unit-circumradius space.
    pub fn shape(&self) -> &BokehShape {
        &self.shape
    }

    /// Channel layout.
    pub fn output(&self) -> OutputMode {
        self.output
    }

    /// Who owns the parameters.
    pub fn ownership(&self) -> Ownership {
        ownership_of(&self.params)
    }

    /// Geometric position of the center of pixel `(x, y)`.
    ///
    /// The canvas center maps to the origin, the canvas half-width to 1 and y points up.
    pub fn pixel_point(&self, x: u32, y: u32) -> Point {
        Point::new(
            (f64::from(x) + 0.5 - self.half) / self.half,
            (self.half - (f64::from(y) + 0.5)) / self.half,
        )
    }

    fn write_pixel(&self, point: Point, out: &mut [f32]) {
        match self.output {
            OutputMode::Mask => out[0] = self.shape.evaluate(point, 1.0),
            OutputMode::Dispersion => {
                let lens_shift = self.params.lens_shift();
                // |s| == 1 collapses the smallest shape to radius 0, which is all exterior.
                let min_shift = lens_shift.abs();
                let min = self.shape.evaluate(point, 1.0 - min_shift);
                let median = self.shape.evaluate(point, 1.0 - 0.5 * min_shift);
                let max = self.shape.evaluate(point, 1.0);
                let (r, b) = if lens_shift < 0.0 { (max, min) } else { (min, max) };
                out.copy_from_slice(&[r, median, b, (min + median + max) / 3.0]);
            }
        }
    }
}

impl TileSource for BokehImageReady<'_> {
    fn canvas_size(&self, _preferred: Area) -> Area {
        Area::square(self.resolution)
    }

    fn channels(&self) -> usize {
        self.output.channels()
    }

    fn evaluate_tile(&self, tile: &mut TileBuffer, _inputs: &[&MaskBuffer]) -> BokehResult<()> {
        let area = tile.area();
        if !Area::square(self.resolution).contains_area(area) {
            return Err(BokehError::evaluation(format!(
                "tile {area:?} lies outside the {0}x{0} bokeh canvas",
                self.resolution
            )));
        }
        if tile.channels() != self.channels() {
            return Err(BokehError::evaluation(format!(
                "tile has {} channels, bokeh output has {}",
                tile.channels(),
                self.channels()
            )));
        }

        for (y, row) in tile.rows_mut() {
            for (px, x) in row.chunks_exact_mut(self.channels()).zip(area.x..) {
                self.write_pixel(self.pixel_point(x, y), px);
            }
        }
        Ok(())
    }

    fn deinit(self) {
        release(self.params);
    }
}

fn release(params: Cow<'_, BokehParams>) {
    tracing::debug!(ownership = ?ownership_of(&params), "bokeh operation torn down");
    // Owned parameters drop here; borrowed ones stay with the caller.
    drop(params);
}

#[cfg(test)]
#[path = "../../tests/unit/operation/bokeh.rs"]
mod tests;
