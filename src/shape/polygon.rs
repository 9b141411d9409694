use kurbo::Point;

/// Position of vertex `index` of a regular polygon with unit circumradius.
///
/// Consecutive vertices are `exterior_angle` radians apart and the whole polygon is rotated
/// clockwise by `rotation`. Any integer index is valid; indices wrap through the periodicity of
/// the trigonometric functions.
pub fn regular_polygon_vertex(index: i64, exterior_angle: f64, rotation: f64) -> Point {
    let angle = exterior_angle * index as f64 - rotation;
    let (sin, cos) = angle.sin_cos();
    Point::new(cos, sin)
}

/// Closest point to `point` on the infinite line through `line_start` and `line_end`.
///
/// The two line points must differ.
pub fn closest_point_on_line(point: Point, line_start: Point, line_end: Point) -> Point {
    let line = line_end - line_start;
    let length_sq = line.hypot2();
    debug_assert!(length_sq > 0.0, "degenerate line segment");
    let t = (point - line_start).dot(line) / length_sq;
    line_start + line * t
}

#[cfg(test)]
#[path = "../../tests/unit/shape/polygon.rs"]
mod tests;
