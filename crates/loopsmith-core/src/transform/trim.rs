//! Loop truncation for export

use crate::types::{LoopRegion, Wave};

/// Drop everything at and after the loop end, flooring both bounds
///
/// Final export step once `quantize_loop_length` has made the width
/// integral and materialization has verified the seam - fractional
/// precision is no longer needed, and sampler formats store whole
/// sample indices. No-op without a loop, or when flooring would
/// collapse a sub-sample-width region.
pub fn truncate_to_loop(wave: &Wave) -> Wave {
    let Some(region) = wave.loop_region else {
        return wave.clone();
    };
    // flooring a sub-sample-width loop would collapse it to width 0
    if region.end.floor() <= region.start.floor() {
        return wave.clone();
    }

    let out_len = region.end.floor() as usize;
    Wave {
        samples: wave.samples[..out_len].to_vec(),
        sample_rate: wave.sample_rate,
        loop_region: Some(LoopRegion {
            start: region.start.floor(),
            end: region.end.floor(),
        }),
        root_note: wave.root_note,
        root_fine: wave.root_fine,
    }
}
