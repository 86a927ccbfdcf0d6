//! Curve evaluation engines.
//!
//! Each submodule is a set of pure functions over control-point slices. The
//! [`Curve`](crate::Curve) entity dispatches to them according to its kind.

pub mod bezier;
pub mod bspline;
pub mod interpolate;
pub mod rational;

pub use bezier::Continuity;
pub use bspline::SampleBoundary;
pub use interpolate::CubicSpline1;

use num_traits::Float;

/// Converts a count or index to the float type.
///
/// Every `usize` is representable (possibly rounded) in `f32` and `f64`.
#[inline]
pub(crate) fn scalar<F: Float>(n: usize) -> F {
    F::from(n).unwrap_or_else(F::nan)
}

/// `count` parameters evenly spaced over `[0, 1]`, both ends included.
///
/// A single sample sits at `t = 0`; the last sample is exactly `1`.
pub(crate) fn unit_parameters<F: Float>(count: usize) -> impl Iterator<Item = F> {
    let last = count.saturating_sub(1);
    (0..count).map(move |i| {
        if i == last && last > 0 {
            F::one()
        } else if last == 0 {
            F::zero()
        } else {
            scalar::<F>(i) / scalar::<F>(last)
        }
    })
}
