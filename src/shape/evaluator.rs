use kurbo::{Point, Vec2};

use crate::{
    config::params::BokehParams,
    foundation::{
        error::{BokehError, BokehResult},
        math::{lerp, ramp, wrapped_angle},
    },
    shape::polygon::{closest_point_on_line, regular_polygon_vertex},
};

/// Anti-aliased bokeh shape: a regular polygon morphing toward a circle, with an optional
/// concentric hole.
///
/// [`BokehShape::evaluate`] returns 0 inside the shape and 1 outside, with a linear ramp of width
/// `aa_band` centered on every boundary. The value depends only on the point, the circumradius
/// and the frozen parameters, so a shape can be shared freely across threads.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BokehShape {
    params: BokehParams,
    aa_band: f64,
}

impl BokehShape {
    /// Build a shape with an anti-aliasing band of `aa_band` (in the units of evaluated points).
    pub fn new(params: BokehParams, aa_band: f64) -> BokehResult<Self> {
        if !aa_band.is_finite() || aa_band <= 0.0 {
            return Err(BokehError::validation(format!(
                "anti-alias band must be finite and > 0, got {aa_band}"
            )));
        }
        Ok(Self { params, aa_band })
    }

    /// Parameters this shape was built from.
    pub fn params(&self) -> &BokehParams {
        &self.params
    }

    /// Width of the anti-aliasing ramp.
    pub fn aa_band(&self) -> f64 {
        self.aa_band
    }

    /// Distance from the center to the outer boundary, measured along the direction of `point`.
    ///
    /// For a pure polygon this is where the ray through `point` leaves the polygon; `roundness`
    /// then blends it linearly toward `circumradius`.
    pub fn boundary_distance(&self, point: Point, circumradius: f64) -> f64 {
        let p = &self.params;

        // Edge index: the vertex whose angle is the greatest not exceeding the point's angle.
        let angle = wrapped_angle(point.x, point.y, p.rotation());
        let index = (angle / p.exterior_angle()).floor() as i64;
        let first = scale(
            regular_polygon_vertex(index, p.exterior_angle(), p.rotation()),
            circumradius,
        );
        let second = scale(
            regular_polygon_vertex(index + 1, p.exterior_angle(), p.rotation()),
            circumradius,
        );

        // Foot of the apothem, then intersect the ray with the edge line.
        let foot = closest_point_on_line(Point::ORIGIN, first, second).to_vec2();
        let direction = Vec2::from_angle(angle - p.rotation());
        // Positive: the ray stays within half an exterior angle (< 90°) of the apothem.
        let polygon = foot.hypot2() / direction.dot(foot);

        lerp(polygon, circumradius, p.roundness())
    }

    /// Mask value at `point` for a shape with the given circumradius, in `[0, 1]`.
    pub fn evaluate(&self, point: Point, circumradius: f64) -> f32 {
        if circumradius.is_nan() || circumradius <= 0.0 {
            return 1.0;
        }

        let distance = point.to_vec2().hypot();
        let boundary = self.boundary_distance(point, circumradius);
        let mut value = ramp(distance, boundary, self.aa_band);

        let catadioptric = self.params.catadioptric();
        if catadioptric > 0.0 {
            let hole = catadioptric * circumradius;
            value = value.max(1.0 - ramp(distance, hole, self.aa_band));
        }

        value.clamp(0.0, 1.0) as f32
    }
}

fn scale(p: Point, s: f64) -> Point {
    Point::new(p.x * s, p.y * s)
}

#[cfg(test)]
#[path = "../../tests/unit/shape/evaluator.rs"]
mod tests;
