//! Loop-seam crossfade

use crate::resample::ExactInterpolator;
use crate::types::Wave;

/// Crossfade the loop end with the waveform one loop-width earlier
///
/// Over the last `fade_len` samples before the loop end, the original
/// content is blended linearly with an "echo" read one loop-width back
/// through the exact interpolator. The seam then lands on material the
/// listener already heard, removing the discontinuity at the wrap.
///
/// `fade_len` is clamped to the whole part of the loop width. Without a
/// loop this is a no-op.
pub fn crossfade(wave: &Wave, fade_len: usize) -> Wave {
    let Some(region) = wave.loop_region else {
        return wave.clone();
    };

    let fade_len = (fade_len as f64).min(region.width().floor());
    let fade_start = region.end - fade_len;

    let mut exact = ExactInterpolator::new(1.0);
    let mut out = Vec::with_capacity(wave.len());
    for i in 0..wave.len() {
        let p = i as f64;
        if p >= fade_start && p < region.end {
            let arg = (p - fade_start) / fade_len;
            let echo = exact.eval(&wave.samples, region.start - (region.end - p));
            out.push(((1.0 - arg) * wave.samples[i] as f64 + arg * echo as f64) as f32);
        } else {
            out.push(wave.samples[i]);
        }
    }

    wave.with_samples(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp_wave(len: usize) -> Wave {
        let samples = (0..len).map(|i| i as f32 / len as f32).collect();
        Wave::new(samples, 44100.0).unwrap()
    }

    #[test]
    fn test_noop_without_loop() {
        let wave = ramp_wave(100);
        assert_eq!(crossfade(&wave, 8).samples, wave.samples);
    }

    #[test]
    fn test_only_fade_region_changes() {
        let wave = ramp_wave(100).with_loop(10.0, 50.0).unwrap();
        let faded = crossfade(&wave, 8);
        assert_eq!(faded.len(), wave.len());
        for i in 0..100 {
            if (42..50).contains(&i) {
                continue;
            }
            assert_eq!(
                faded.samples[i], wave.samples[i],
                "sample {} outside the fade region changed",
                i
            );
        }
    }

    #[test]
    fn test_fade_blends_toward_echo() {
        // On a ramp the echo (one loop-width back) is always lower, so
        // every faded sample sits strictly between echo and original.
        let wave = ramp_wave(100).with_loop(10.0, 50.0).unwrap();
        let faded = crossfade(&wave, 8);
        for i in 43..50 {
            let original = wave.samples[i];
            let echo = wave.samples[i - 40];
            assert!(
                faded.samples[i] < original && faded.samples[i] > echo,
                "sample {} = {} not between {} and {}",
                i,
                faded.samples[i],
                echo,
                original
            );
        }
    }

    #[test]
    fn test_fade_len_clamped_to_loop_width() {
        let wave = ramp_wave(100).with_loop(40.0, 44.0).unwrap();
        let faded = crossfade(&wave, 1000);
        // fade covers [40, 44) only
        for i in 0..40 {
            assert_eq!(faded.samples[i], wave.samples[i]);
        }
    }

    #[test]
    fn test_zero_fade_is_identity() {
        let wave = ramp_wave(100).with_loop(10.0, 50.0).unwrap();
        assert_eq!(crossfade(&wave, 0).samples, wave.samples);
    }
}
