//! Utility functions used accross the library
use crate::{EPSILON, PI, Scalar};

/// Relative tolerance used to decide whether two coordinates coincide
pub const REL_TOLERANCE: Scalar = 1e-9;
/// Absolute floor of the tolerance, so values near zero can still compare equal
pub const ABS_TOLERANCE: Scalar = 1e-12;

/// Check if two values are equal within `REL_TOLERANCE` relative to the larger
/// magnitude (never tighter than `ABS_TOLERANCE`).
#[inline]
pub fn is_close(a: Scalar, b: Scalar) -> bool {
    a == b || (a - b).abs() <= (REL_TOLERANCE * a.abs().max(b.abs())).max(ABS_TOLERANCE)
}

/// `count` evenly spaced values over the closed interval `[start, stop]`
///
/// The last value is exactly `stop` (when `count > 1`).
pub fn linspace(start: Scalar, stop: Scalar, count: usize) -> impl Iterator<Item = Scalar> {
    let step = if count > 1 {
        (stop - start) / (count - 1) as Scalar
    } else {
        0.0
    };
    (0..count).map(move |index| {
        if count > 1 && index + 1 == count {
            stop
        } else {
            start + index as Scalar * step
        }
    })
}

/// Linear interpolation, `t = 0` gives exactly `a` and `t = 1` exactly `b`
#[inline]
pub fn lerp(a: Scalar, b: Scalar, t: Scalar) -> Scalar {
    a * (1.0 - t) + b * t
}

/// Map `value` from the range `[a, b]` into the range `[c, d]`, no clamping
#[inline]
pub fn map_range(value: Scalar, a: Scalar, b: Scalar, c: Scalar, d: Scalar) -> Scalar {
    (value - a) / (b - a) * (d - c) + c
}

/// Solve `a * sin(x) + b * cos(x) = 0` where `x = c + d * t` for `t` in `[0, 1]`
///
/// Roots are `x = x0 + PI * n` with `x0` a particular solution, every `n` whose `t`
/// lands in the interval is returned in ascending order.
pub(crate) fn solve_sin_cos(a: Scalar, b: Scalar, c: Scalar, d: Scalar) -> Vec<Scalar> {
    if d.abs() < EPSILON || (a.abs() < EPSILON && b.abs() < EPSILON) {
        return Vec::new();
    }
    let x0 = if a.abs() < EPSILON {
        PI / 2.0
    } else if b.abs() < EPSILON {
        0.0
    } else {
        (-b / a).atan()
    };
    let n0 = (c - x0) / PI;
    let n1 = (c + d - x0) / PI;
    let n_min = n0.min(n1).floor() as i64;
    let n_max = n0.max(n1).ceil() as i64;
    let mut roots: Vec<Scalar> = (n_min..=n_max)
        .map(|n| (x0 - c + PI * n as Scalar) / d)
        .filter(|t| (0.0..=1.0).contains(t))
        .collect();
    roots.sort_by(|t0, t1| t0.total_cmp(t1));
    roots
}
