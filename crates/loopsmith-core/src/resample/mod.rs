//! Windowed-sinc interpolation
//!
//! Two precision tiers share one kernel:
//!
//! - [`InterpTable`] - a precomputed 24-tap table with 32 sub-sample
//!   subdivisions and per-tap deltas. O(1) per sample, allocation-free,
//!   safe at audio-callback priority. Error is bounded by the kernel's
//!   curvature over a 1/32-sample step.
//! - [`ExactInterpolator`] - rebuilds a 512-tap kernel on every call.
//!   O(512) per sample, editor-side only. Used by every transform whose
//!   output is resampled at a non-integer ratio, where the table's
//!   linearized residual would accumulate audible error.
//!
//! Both tiers pass integer positions through exactly at cutoff 1.

mod exact;
mod table;

pub use exact::{ExactInterpolator, EXACT_TAPS};
pub use table::{InterpTable, TABLE_TAPS};

/// Normalized sinc, `sin(pi x) / (pi x)` with `sinc(0) = 1`
#[inline]
pub fn sinc(x: f64) -> f64 {
    if x == 0.0 {
        1.0
    } else {
        let v = std::f64::consts::PI * x;
        v.sin() / v
    }
}

/// Windowed-sinc kernel: low-pass at cutoff ratio `f`, sinc window of
/// width `w` taps
#[inline]
pub(crate) fn kernel(x: f64, f: f64, w: f64) -> f64 {
    sinc(f * x) * sinc(2.0 * x / w)
}
