//! Exact slow-path interpolation

use super::kernel;
use crate::types::{sample_at, Sample};

/// Kernel window width of the exact path, in taps
pub const EXACT_TAPS: usize = 512;

/// Tap index that lands on `floor(pos)`
const CENTER_TAP: isize = 255;

/// Exact windowed-sinc evaluator
///
/// Rebuilds and normalizes a 512-tap kernel centered on the requested
/// position on every call. Far too slow for the real-time path; the
/// editing transforms use it wherever a fractional-ratio resample must
/// not pick up the fast table's linearization error.
pub struct ExactInterpolator {
    cutoff: f64,
    scratch: Vec<f64>,
}

impl ExactInterpolator {
    /// Create an evaluator with low-pass cutoff ratio `f <= 1`
    ///
    /// Use a cutoff below 1 only when downsampling, so the kernel also
    /// rejects content above the output Nyquist.
    pub fn new(cutoff: f64) -> Self {
        Self {
            cutoff,
            scratch: vec![0.0; EXACT_TAPS],
        }
    }

    /// Cutoff ratio of this evaluator
    #[inline]
    pub fn cutoff(&self) -> f64 {
        self.cutoff
    }

    /// Evaluate the wave at a fractional position
    pub fn eval(&mut self, samples: &[Sample], pos: f64) -> Sample {
        let floor_pos = pos.floor();
        let offset = pos - floor_pos;

        let mut total = 0.0;
        for (i, slot) in self.scratch.iter_mut().enumerate() {
            let x = offset - i as f64 + CENTER_TAP as f64;
            let v = kernel(x, self.cutoff, EXACT_TAPS as f64);
            *slot = v;
            total += v;
        }

        let anchor = floor_pos as isize - CENTER_TAP;
        let mut acc = 0.0;
        for (i, &w) in self.scratch.iter().enumerate() {
            acc += sample_at(samples, anchor + i as isize) as f64 * w / total;
        }
        acc as Sample
    }
}
