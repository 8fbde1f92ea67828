//! Loop-length quantization

use crate::resample::ExactInterpolator;
use crate::types::{LoopRegion, Wave};

/// Resample the wave so the loop width becomes an exact integer
///
/// Stretches the whole buffer by `ceil(width) / width` - the sample
/// rate scales with it, so pitch is preserved - then applies the
/// sub-sample shift that lands the new loop start on a whole sample.
/// Time-domain loop operations (crossfade, truncation for export)
/// assume an integral period; this runs first to guarantee it.
///
/// No-op when the width is already integral, below one sample, or
/// there is no loop.
pub fn quantize_loop_length(wave: &Wave) -> Wave {
    let Some(region) = wave.loop_region else {
        return wave.clone();
    };

    let width = region.width();
    if width < 1.0 {
        return wave.clone();
    }
    let new_width = width.ceil();
    if new_width == width {
        return wave.clone();
    }

    let rate = new_width / width;
    let mut new_start = region.start * rate;
    let offset = new_start.ceil() - new_start;
    new_start += offset;

    let out_len = (wave.len() as f64 * rate + offset).ceil() as usize;
    log::debug!(
        "quantize_loop_length: width {} -> {}, rate {}, shift {}",
        width,
        new_width,
        rate,
        offset
    );

    let mut exact = ExactInterpolator::new(1.0);
    let mut out = Vec::with_capacity(out_len);
    for i in 0..out_len {
        out.push(exact.eval(&wave.samples, (i as f64 - offset) / rate));
    }

    Wave {
        samples: out,
        sample_rate: (wave.sample_rate * rate).round(),
        loop_region: Some(LoopRegion {
            start: new_start,
            end: new_start + new_width,
        }),
        root_note: wave.root_note,
        root_fine: wave.root_fine,
    }
}
