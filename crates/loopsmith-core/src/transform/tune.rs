//! Fine-tuning rounding

use crate::resample::ExactInterpolator;
use crate::types::{LoopRegion, Wave};

/// Resample the wave so its cents offset becomes zero
///
/// Below 50 cents the wave is tuned down to the semitone underneath
/// (`rate = 2^(-fine/1200)`, root note kept); at 50 and above it is
/// tuned up to the semitone above (`rate = 2^((100-fine)/1200)`, root
/// note incremented). The exact kernel runs at `cutoff = min(rate, 1)`
/// so downward reads never alias. Loop bounds scale by `1/rate`.
///
/// A wave already on the semitone grid is returned unchanged, with no
/// resampling pass at all.
pub fn round_tuning_fine(wave: &Wave) -> Wave {
    if wave.root_fine == 0 {
        return wave.clone();
    }

    let fine = wave.root_fine as f64;
    let (rate, root_note) = if wave.root_fine < 50 {
        ((-fine / 1200.0).exp2(), wave.root_note)
    } else {
        (((100.0 - fine) / 1200.0).exp2(), wave.root_note + 1)
    };
    log::debug!(
        "round_tuning_fine: {} cents, rate {}, root {} -> {}",
        wave.root_fine,
        rate,
        wave.root_note,
        root_note
    );

    let out_len = (wave.len() as f64 / rate).ceil() as usize;
    let mut exact = ExactInterpolator::new(rate.min(1.0));
    let mut out = Vec::with_capacity(out_len);
    for i in 0..out_len {
        out.push(exact.eval(&wave.samples, i as f64 * rate));
    }

    Wave {
        samples: out,
        sample_rate: wave.sample_rate,
        loop_region: wave.loop_region.map(|r| LoopRegion {
            start: r.start / rate,
            end: r.end / rate,
        }),
        root_note,
        root_fine: 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sine_wave(len: usize, period: f64) -> Wave {
        let samples = (0..len)
            .map(|i| (i as f64 / period * std::f64::consts::TAU).sin() as f32)
            .collect();
        Wave::new(samples, 44100.0).unwrap()
    }

    #[test]
    fn test_zero_fine_is_identity() {
        let wave = sine_wave(100, 20.0).with_loop(10.0, 50.0).unwrap();
        let out = round_tuning_fine(&wave);
        assert_eq!(out, wave);
    }

    #[test]
    fn test_low_fine_tunes_down() {
        let wave = sine_wave(200, 20.0).with_tuning(60, 20);
        let out = round_tuning_fine(&wave);
        assert_eq!(out.root_note, 60);
        assert_eq!(out.root_fine, 0);
        // rate < 1 stretches the buffer
        assert!(out.len() > wave.len());
    }

    #[test]
    fn test_high_fine_tunes_up_to_next_semitone() {
        let wave = sine_wave(200, 20.0).with_tuning(60, 80);
        let out = round_tuning_fine(&wave);
        assert_eq!(out.root_note, 61);
        assert_eq!(out.root_fine, 0);
        // rate > 1 shortens the buffer
        assert!(out.len() < wave.len());
    }

    #[test]
    fn test_loop_bounds_scale_inversely() {
        let wave = sine_wave(200, 20.0)
            .with_loop(40.0, 120.0)
            .unwrap()
            .with_tuning(60, 30);
        let out = round_tuning_fine(&wave);
        let rate = (-30.0f64 / 1200.0).exp2();
        let region = out.loop_region.unwrap();
        assert!((region.start - 40.0 / rate).abs() < 1e-9);
        assert!((region.end - 120.0 / rate).abs() < 1e-9);
        assert!(region.end <= out.len() as f64);
    }

    #[test]
    fn test_resample_shifts_period() {
        // Tuning down by 40 cents stretches the sine period by 1/rate.
        let wave = sine_wave(1024, 32.0).with_tuning(60, 40);
        let out = round_tuning_fine(&wave);
        let rate = (-40.0f64 / 1200.0).exp2();
        for i in 300..340 {
            let src_pos = i as f64 * rate;
            let expected = (src_pos / 32.0 * std::f64::consts::TAU).sin();
            assert!(
                (out.samples[i] as f64 - expected).abs() < 2e-3,
                "sample {}: {} vs {}",
                i,
                out.samples[i],
                expected
            );
        }
    }
}
