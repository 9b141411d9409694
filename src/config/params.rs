use std::f64::consts::TAU;

use crate::{
    config::node::BokehImageNode,
    foundation::error::{BokehError, BokehResult},
};

/// Default edge length, in pixels, of the square bokeh canvas.
pub const DEFAULT_RESOLUTION: u32 = 512;

/// Largest accepted polygon vertex count.
pub const MAX_VERTICES: u32 = 1024;

/// Validated, immutable bokeh shape configuration.
///
/// Only obtainable through [`BokehParamsBuilder::build`] or [`BokehParams::from_node`], so every
/// value seen by the shape evaluator satisfies the invariants checked there.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BokehParams {
    exterior_angle: f64,
    rotation: f64,
    roundness: f64,
    catadioptric: f64,
    lens_shift: f64,
}

impl BokehParams {
    /// Start a builder populated with a pentagon and no rounding, hole or shift.
    pub fn builder() -> BokehParamsBuilder {
        BokehParamsBuilder::default()
    }

    /// Validate a node record. The exterior angle is `2π / flaps`.
    pub fn from_node(node: &BokehImageNode) -> BokehResult<Self> {
        BokehParamsBuilder::default()
            .flaps(node.flaps)
            .rotation(f64::from(node.angle))
            .roundness(f64::from(node.rounding))
            .catadioptric(f64::from(node.catadioptric))
            .lens_shift(f64::from(node.lens_shift))
            .build()
    }

    /// Angle in radians between consecutive polygon vertices.
    pub fn exterior_angle(&self) -> f64 {
        self.exterior_angle
    }

    /// Polygon rotation in radians, wrapped into `[0, 2π)`.
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    /// Polygon-to-circle morph factor in `[0, 1]`.
    pub fn roundness(&self) -> f64 {
        self.roundness
    }

    /// Hole radius as a fraction of the circumradius, in `[0, 1]`.
    pub fn catadioptric(&self) -> f64 {
        self.catadioptric
    }

    /// Lens shift in `[-1, 1]`. Never read by the shape function itself.
    pub fn lens_shift(&self) -> f64 {
        self.lens_shift
    }

    /// Number of polygon vertices, `round(2π / exterior_angle)`; in `3..=MAX_VERTICES`.
    pub fn vertex_count(&self) -> u32 {
        vertex_count_for(self.exterior_angle)
    }
}

fn vertex_count_for(exterior_angle: f64) -> u32 {
    (TAU / exterior_angle).round() as u32
}

/// Mutable staging area for [`BokehParams`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BokehParamsBuilder {
    exterior_angle: f64,
    rotation: f64,
    roundness: f64,
    catadioptric: f64,
    lens_shift: f64,
}

impl Default for BokehParamsBuilder {
    fn default() -> Self {
        Self {
            exterior_angle: TAU / 5.0,
            rotation: 0.0,
            roundness: 0.0,
            catadioptric: 0.0,
            lens_shift: 0.0,
        }
    }
}

impl BokehParamsBuilder {
    /// Set the exterior angle in radians directly.
    pub fn exterior_angle(mut self, radians: f64) -> Self {
        self.exterior_angle = radians;
        self
    }

    /// Set the exterior angle from a vertex count.
    pub fn flaps(mut self, flaps: u32) -> Self {
        self.exterior_angle = TAU / f64::from(flaps);
        self
    }

    /// Set the polygon rotation in radians.
    pub fn rotation(mut self, radians: f64) -> Self {
        self.rotation = radians;
        self
    }

    /// Set the polygon-to-circle morph factor.
    pub fn roundness(mut self, roundness: f64) -> Self {
        self.roundness = roundness;
        self
    }

    /// Set the relative hole radius.
    pub fn catadioptric(mut self, catadioptric: f64) -> Self {
        self.catadioptric = catadioptric;
        self
    }

    /// Set the lens shift.
    pub fn lens_shift(mut self, lens_shift: f64) -> Self {
        self.lens_shift = lens_shift;
        self
    }

    /// Validate and freeze the configuration.
    pub fn build(self) -> BokehResult<BokehParams> {
        let Self {
            exterior_angle,
            rotation,
            roundness,
            catadioptric,
            lens_shift,
        } = self;

        if !exterior_angle.is_finite() || exterior_angle <= 0.0 {
            return Err(BokehError::validation(format!(
                "exterior angle must be finite and > 0, got {exterior_angle}"
            )));
        }
        // Checked before the cast so it cannot saturate.
        if TAU / exterior_angle >= f64::from(MAX_VERTICES) + 0.5 {
            return Err(BokehError::validation(format!(
                "exterior angle {exterior_angle} yields more than {MAX_VERTICES} vertices"
            )));
        }
        let n = vertex_count_for(exterior_angle);
        if n < 3 {
            return Err(BokehError::validation(format!(
                "exterior angle {exterior_angle} yields {n} vertices, need at least 3"
            )));
        }
        if !rotation.is_finite() {
            return Err(BokehError::validation("rotation must be finite"));
        }
        // Vertex angles are `ext * i - rotation`; a wrapped rotation keeps them distinct.
        let rotation = rotation.rem_euclid(TAU);
        let rotation = if rotation >= TAU { 0.0 } else { rotation };
        check_range("roundness", roundness, 0.0, 1.0)?;
        check_range("catadioptric", catadioptric, 0.0, 1.0)?;
        check_range("lens shift", lens_shift, -1.0, 1.0)?;

        Ok(BokehParams {
            exterior_angle,
            rotation,
            roundness,
            catadioptric,
            lens_shift,
        })
    }
}

fn check_range(name: &str, v: f64, lo: f64, hi: f64) -> BokehResult<()> {
    // NaN fails the contains check too.
    if !(lo..=hi).contains(&v) {
        return Err(BokehError::validation(format!(
            "{name} must be in [{lo}, {hi}], got {v}"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/config/params.rs"]
mod tests;
