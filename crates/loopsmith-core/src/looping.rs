//! Loop position folding and loop materialization
//!
//! The folder maps any virtual playback position into its in-loop
//! equivalent with closed-form floored-modulo arithmetic, so it stays
//! exact over thousands of loop passes without iterating. The
//! materializer pre-unrolls one padded pass of the loop into a flat
//! buffer that real-time consumers can read linearly.

use crate::resample::{ExactInterpolator, InterpTable};
use crate::types::{Sample, Wave};

/// Padding appended by the fast materializer
///
/// Real-time consumers read a few samples past the nominal end for
/// interpolation taps; the padding keeps those reads in range.
pub const FAST_PADDING: usize = 12;

/// Padding appended by the exact materializer, sized for the 512-tap
/// kernel's reach
pub const EXACT_PADDING: usize = 256;

/// Bisection steps used when snapping to a zero crossing
const SNAP_STEPS: usize = 20;

/// Fold an absolute position into the loop region
///
/// Positions before the loop end pass through unchanged, as does
/// everything when the wave has no loop. Anything at or past the end
/// wraps back into `[start, end)`.
#[inline]
pub fn fold_position(wave: &Wave, position: f64) -> f64 {
    let Some(region) = wave.loop_region else {
        return position;
    };
    if position < region.end {
        return position;
    }

    let width = region.width();
    let after = position - region.end;
    region.start + after - width * (after / width).floor()
}

/// Materialize a looped wave into a flat buffer using the supplied
/// interpolator
///
/// Walks a virtual position from 0 in unit steps, folding after every
/// step. Integer positions copy the raw sample; fractional ones (which
/// appear once a fractional-width loop wraps) go through `interp`.
/// Output length is `ceil(loop_end) + padding`. Without a loop this is
/// a no-op.
pub fn materialize_with<F>(wave: &Wave, mut interp: F, padding: usize) -> Wave
where
    F: FnMut(&[Sample], f64) -> Sample,
{
    let Some(region) = wave.loop_region else {
        return wave.clone();
    };

    let out_len = region.end.ceil() as usize + padding;
    let mut out = Vec::with_capacity(out_len);

    let mut pos = 0.0f64;
    for _ in 0..out_len {
        if pos == pos.floor() {
            out.push(wave.samples[pos as usize]);
        } else {
            out.push(interp(&wave.samples, pos));
        }
        pos = fold_position(wave, pos + 1.0);
    }

    wave.with_samples(out)
}

/// Fast materialization for real-time playback preparation
pub fn materialize_fast(wave: &Wave, table: &InterpTable) -> Wave {
    materialize_with(wave, |samples, pos| table.eval(samples, pos), FAST_PADDING)
}

/// Exact materialization, run before loop-editing transforms that
/// cannot tolerate the fast table's interpolation error
pub fn materialize_exact(wave: &Wave) -> Wave {
    let mut interp = ExactInterpolator::new(1.0);
    materialize_with(
        wave,
        |samples, pos| interp.eval(samples, pos),
        EXACT_PADDING,
    )
}

/// Math.sign-style three-way sign, so an exact zero never pairs with
/// either side of a crossing
#[inline]
fn sign(v: Sample) -> i8 {
    if v > 0.0 {
        1
    } else if v < 0.0 {
        -1
    } else {
        0
    }
}

/// Snap a position to the nearest zero crossing within half a sample
///
/// Bisects `[pos - 0.5, pos + 0.5]` on the fast kernel. When the
/// bracket never straddles a sign change the midpoint of the current
/// bracket is returned instead, which leaves the position essentially
/// where it was.
pub fn snap_to_zero_crossing(table: &InterpTable, samples: &[Sample], pos: f64) -> f64 {
    let mut lower = pos - 0.5;
    let mut upper = pos + 0.5;

    for _ in 0..SNAP_STEPS {
        let middle = (lower + upper) / 2.0;
        let lv = table.eval(samples, lower);
        let uv = table.eval(samples, upper);
        if sign(lv) == sign(uv) {
            return middle;
        }

        let mv = table.eval(samples, middle);
        if sign(lv) == sign(mv) {
            lower = middle;
        } else {
            upper = middle;
        }
    }

    (lower + upper) / 2.0
}

/// Snap both loop bounds to the nearest zero crossings
///
/// Returns the wave unchanged when it has no loop, or when snapping
/// would collapse the region.
pub fn snap_loop_to_zero_crossings(wave: &Wave) -> Wave {
    let Some(region) = wave.loop_region else {
        return wave.clone();
    };

    let table = InterpTable::shared();
    let start = snap_to_zero_crossing(table, &wave.samples, region.start);
    let end = snap_to_zero_crossing(table, &wave.samples, region.end);
    match wave.with_loop(start, end) {
        Ok(snapped) => snapped,
        Err(_) => wave.clone(),
    }
}

/// Snap both loop bounds to whole sample positions
///
/// Returns the wave unchanged when it has no loop, or when rounding
/// would collapse the region.
pub fn snap_loop_to_samples(wave: &Wave) -> Wave {
    let Some(region) = wave.loop_region else {
        return wave.clone();
    };

    match wave.with_loop(region.start.round(), region.end.round()) {
        Ok(snapped) => snapped,
        Err(_) => wave.clone(),
    }
}
