//! Tabulated fast-path interpolation

use std::sync::OnceLock;

use super::kernel;
use crate::types::{sample_at, Sample};

/// Kernel window width of the fast table, in taps
pub const TABLE_TAPS: usize = 24;

/// Sub-sample subdivisions per inter-sample interval
const SUBDIVISIONS: usize = 32;

/// Offset rows stored: one per subdivision plus a final row so deltas
/// exist for the last subdivision too
const OFFSET_ROWS: usize = SUBDIVISIONS + 1;

/// Tap index that lands on `floor(pos)`
const CENTER_TAP: isize = 11;

/// One tap of one offset row
#[derive(Clone, Copy)]
struct Tap {
    weight: f32,
    /// Weight difference to the same tap in the next offset row, so
    /// evaluation can linear-interpolate inside a subdivision
    delta: f32,
}

/// Precomputed windowed-sinc lookup table for one cutoff ratio
///
/// Built once per ratio and shared read-only across all callers. The
/// default (`cutoff = 1`) table serves native-rate playback and
/// editing; playback builds a custom table with
/// `cutoff = device_rate / wave_rate` when the device runs slower than
/// the wave.
pub struct InterpTable {
    taps: Vec<Tap>,
    cutoff: f64,
}

impl InterpTable {
    /// Build the table for a low-pass cutoff ratio `f <= 1`
    ///
    /// Each of the 33 offset rows is normalized independently so its 24
    /// weights sum to exactly 1, preserving DC gain at every offset.
    pub fn new(cutoff: f64) -> Self {
        let mut weights = [[0.0f64; TABLE_TAPS]; OFFSET_ROWS];

        for (row_n, row) in weights.iter_mut().enumerate() {
            let offset = row_n as f64 / SUBDIVISIONS as f64;

            let mut total = 0.0;
            for (i, w) in row.iter_mut().enumerate() {
                let x = offset - i as f64 + CENTER_TAP as f64;
                *w = kernel(x, cutoff, TABLE_TAPS as f64);
                total += *w;
            }
            for w in row.iter_mut() {
                *w /= total;
            }
        }

        let mut taps = Vec::with_capacity(OFFSET_ROWS * TABLE_TAPS);
        for row_n in 0..OFFSET_ROWS {
            for i in 0..TABLE_TAPS {
                let next = if row_n + 1 < OFFSET_ROWS {
                    weights[row_n + 1][i]
                } else {
                    weights[row_n][i]
                };
                taps.push(Tap {
                    weight: weights[row_n][i] as f32,
                    delta: (next - weights[row_n][i]) as f32,
                });
            }
        }

        Self { taps, cutoff }
    }

    /// The shared full-bandwidth (`cutoff = 1`) table
    pub fn shared() -> &'static InterpTable {
        static DEFAULT: OnceLock<InterpTable> = OnceLock::new();
        DEFAULT.get_or_init(|| InterpTable::new(1.0))
    }

    /// Cutoff ratio this table was built for
    #[inline]
    pub fn cutoff(&self) -> f64 {
        self.cutoff
    }

    /// Evaluate the wave at a fractional position
    ///
    /// Reads past either end clamp to the edge sample. Allocation-free
    /// and constant-time; this is the only interpolation path allowed
    /// on the real-time thread.
    pub fn eval(&self, samples: &[Sample], pos: f64) -> Sample {
        let floor_pos = pos.floor();
        let offset = (pos - floor_pos) * SUBDIVISIONS as f64;
        let sub = offset.floor();
        let residual = (offset - sub) as f32;

        let anchor = floor_pos as isize - CENTER_TAP;
        let row = &self.taps[sub as usize * TABLE_TAPS..][..TABLE_TAPS];

        let mut acc = 0.0f32;
        for (i, tap) in row.iter().enumerate() {
            let s = sample_at(samples, anchor + i as isize);
            acc += s * (tap.weight + tap.delta * residual);
        }
        acc
    }

    #[cfg(test)]
    fn row_weight_sum(&self, row_n: usize) -> f64 {
        self.taps[row_n * TABLE_TAPS..][..TABLE_TAPS]
            .iter()
            .map(|t| t.weight as f64)
            .sum()
    }
}

impl Default for InterpTable {
    fn default() -> Self {
        Self::new(1.0)
    }
}
