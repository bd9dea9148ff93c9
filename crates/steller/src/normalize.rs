//! Axis rescaling into `[-1, 1]`.

use crate::graph::Layout;

/// Maps `z` from `[a, b]` onto `[-1, 1]`.
pub fn scaler(z: f64, a: f64, b: f64) -> f64 {
    2.0 * (z - a) / (b - a) - 1.0
}

/// Rescales one axis in place so that its minimum becomes `-1.0` and its maximum `1.0`.
///
/// An axis whose values all coincide has no range to scale. Rescaled layouts are centered at the
/// origin, so such an axis is treated as already centered and every value becomes `0.0`.
pub fn rescale_axis(values: &mut [f64]) {
    let (min, max) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    if !(min.is_finite() && max.is_finite()) {
        return;
    }
    if max - min == 0.0 {
        values.fill(0.0);
        return;
    }
    for v in values.iter_mut() {
        *v = scaler(*v, min, max);
    }
}

/// Rescales `x` and `y` independently.
pub fn rescale_layout(layout: &mut Layout) {
    rescale_axis(&mut layout.x);
    rescale_axis(&mut layout.y);
}
