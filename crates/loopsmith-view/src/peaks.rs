//! Peak pyramid: multi-resolution min/max envelope of a wave
//!
//! Level 0 holds an oversampled true min/max per sample (inter-sample
//! overshoot included); each level above halves the length by pairwise
//! reduction. A query picks the coarsest level where its chunk spans
//! fewer than 8 entries, bounding per-column work at any zoom.

use loopsmith_core::resample::InterpTable;
use loopsmith_core::types::Wave;

/// Oversample points per sample in the level-0 scan: offsets
/// -0.5..=0.5 in steps of 0.1
const OVERSAMPLE_STEPS: i32 = 5;

/// Chunks are reduced at a level once they span fewer than this many
/// of its entries
const MAX_CHUNK_SPAN: usize = 8;

/// Identity of an analyzed wave, used by displays to cheaply detect
/// that a redraw needs fresh peaks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WaveId(u64);

/// Injected id counter - explicit state instead of a process-wide
/// global, so analysis stays testable in isolation
#[derive(Debug, Default)]
pub struct WaveIdSource {
    next: u64,
}

impl WaveIdSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> WaveId {
        let id = WaveId(self.next);
        self.next += 1;
        id
    }
}

/// Multi-resolution min/max envelope
///
/// `min[0]`/`max[0]` have one entry per sample; each further level is
/// the pairwise reduction of the one below, down to length 1.
pub struct PeakPyramid {
    min: Vec<Vec<f32>>,
    max: Vec<Vec<f32>>,
}

impl PeakPyramid {
    /// Build the pyramid for a wave
    ///
    /// Editor-side only: the level-0 scan costs 11 fast-kernel
    /// evaluations per sample.
    pub fn build(wave: &Wave) -> Self {
        let table = InterpTable::shared();
        let len = wave.len();

        let mut min0 = vec![0.0f32; len];
        let mut max0 = vec![0.0f32; len];
        for i in 0..len {
            let mut lo = f32::INFINITY;
            let mut hi = f32::NEG_INFINITY;
            for o in -OVERSAMPLE_STEPS..=OVERSAMPLE_STEPS {
                let s = table.eval(&wave.samples, i as f64 + o as f64 / 10.0);
                lo = lo.min(s);
                hi = hi.max(s);
            }
            min0[i] = lo;
            max0[i] = hi;
        }

        let mut min = vec![min0];
        let mut max = vec![max0];
        let mut level_len = len;
        while level_len > 1 {
            level_len = level_len.div_ceil(2);
            let prev_min = min.last().unwrap();
            let prev_max = max.last().unwrap();
            let mut cur_min = Vec::with_capacity(level_len);
            let mut cur_max = Vec::with_capacity(level_len);

            for i in 0..level_len {
                let mut lo = prev_min[i * 2];
                let mut hi = prev_max[i * 2];
                // a dangling last element is its own pair
                if i * 2 + 1 < prev_min.len() {
                    lo = lo.min(prev_min[i * 2 + 1]);
                    hi = hi.max(prev_max[i * 2 + 1]);
                }
                cur_min.push(lo);
                cur_max.push(hi);
            }

            min.push(cur_min);
            max.push(cur_max);
        }

        log::debug!("PeakPyramid::build: {} samples, {} levels", len, min.len());
        Self { min, max }
    }

    /// Number of resolution levels
    pub fn levels(&self) -> usize {
        self.min.len()
    }

    /// Number of samples indexed (level-0 length)
    pub fn len(&self) -> usize {
        self.min[0].len()
    }

    pub fn is_empty(&self) -> bool {
        self.min[0].is_empty()
    }

    /// Level-0 bounds for one sample
    pub fn sample_bounds(&self, i: usize) -> (f32, f32) {
        (self.min[0][i], self.max[0][i])
    }

    /// Aggregate min/max per display column over `[start, end)`
    ///
    /// The range is split into `columns` equal fractional chunks,
    /// rounded to integer sample bounds. Chunks entirely outside the
    /// indexed range stay zero; chunks that round to zero width are
    /// widened by one sample so every visible column aggregates
    /// something.
    pub fn query(&self, start: f64, end: f64, columns: usize) -> (Vec<f32>, Vec<f32>) {
        let mut min = vec![0.0f32; columns];
        let mut max = vec![0.0f32; columns];
        let width = (end - start) / columns as f64;
        let length = self.len();
        if length == 0 {
            // nothing indexed: the widen-by-one below must never fire
            return (min, max);
        }

        for col in 0..columns {
            let chunk_start = (start + col as f64 * width).round() as i64;
            let chunk_end = (start + (col + 1) as f64 * width).round() as i64;
            if chunk_end <= 0 || chunk_start >= length as i64 {
                continue;
            }

            let mut chunk_start = chunk_start.max(0) as usize;
            let mut chunk_end = (chunk_end as usize).min(length);
            if chunk_start == chunk_end {
                chunk_end += 1;
            }

            let mut level = 0;
            while chunk_end - chunk_start >= MAX_CHUNK_SPAN {
                level += 1;
                chunk_start /= 2;
                chunk_end /= 2;
            }

            let mut lo = f32::INFINITY;
            let mut hi = f32::NEG_INFINITY;
            for i in chunk_start..chunk_end {
                lo = lo.min(self.min[level][i]);
                hi = hi.max(self.max[level][i]);
            }
            min[col] = lo;
            max[col] = hi;
        }

        (min, max)
    }
}

/// A wave analyzed for display: the wave, its peak pyramid, and an id
///
/// The pyramid indexes the sample buffer, so any transform result has
/// to come back through [`AnalyzedWave::replace_wave`] to get a fresh
/// one (and a fresh id for redraw detection).
pub struct AnalyzedWave {
    pub id: WaveId,
    pub wave: Wave,
    pub peaks: PeakPyramid,
}

impl AnalyzedWave {
    pub fn new(wave: Wave, ids: &mut WaveIdSource) -> Self {
        let peaks = PeakPyramid::build(&wave);
        Self {
            id: ids.next_id(),
            wave,
            peaks,
        }
    }

    /// Swap in a transformed wave, rebuilding the pyramid
    pub fn replace_wave(&mut self, wave: Wave, ids: &mut WaveIdSource) {
        self.peaks = PeakPyramid::build(&wave);
        self.wave = wave;
        self.id = ids.next_id();
    }
}
