use std::f64::consts::TAU;

/// Exact at both ends: `lerp(a, b, 0) == a` and `lerp(a, b, 1) == b`.
pub(crate) fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a * (1.0 - t) + b * t
}

/// Polar angle of `(x, y)` wrapped into `[0, 2π)`, after adding `offset`.
pub(crate) fn wrapped_angle(x: f64, y: f64, offset: f64) -> f64 {
    let a = (y.atan2(x) + offset).rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs.
    if a >= TAU { 0.0 } else { a }
}

/// Linear ramp from 0 at `edge - band / 2` to 1 at `edge + band / 2`.
pub(crate) fn ramp(value: f64, edge: f64, band: f64) -> f64 {
    ((value - (edge - 0.5 * band)) / band).clamp(0.0, 1.0)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
