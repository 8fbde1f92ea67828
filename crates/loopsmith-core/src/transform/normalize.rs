//! Peak normalization

use crate::resample::InterpTable;
use crate::types::Wave;

/// Peaks below this are treated as silence and left alone
const SILENCE_FLOOR: f32 = 0.001;

/// Oversampling points per sample in the peak scan
const OVERSAMPLE: usize = 10;

/// Scale the wave so its true peak hits 1.0
///
/// The peak scan oversamples 10x through the fast kernel, so
/// inter-sample overshoot counts toward the peak and cannot clip after
/// scaling. Near-silent waves pass through unchanged.
pub fn normalize(wave: &Wave) -> Wave {
    let table = InterpTable::shared();

    let mut peak = 0.0f32;
    for i in 0..wave.len() {
        for j in 0..OVERSAMPLE {
            let pos = i as f64 + j as f64 / OVERSAMPLE as f64;
            peak = peak.max(table.eval(&wave.samples, pos).abs());
        }
    }

    if peak < SILENCE_FLOOR {
        log::debug!("normalize: peak {} below silence floor, skipping", peak);
        return wave.clone();
    }

    wave.with_samples(wave.samples.iter().map(|&s| s / peak).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_peak_reaches_unity() {
        let samples: Vec<f32> = (0..256)
            .map(|i| 0.25 * (i as f64 * 0.07 * std::f64::consts::TAU).sin() as f32)
            .collect();
        let wave = Wave::new(samples, 44100.0).unwrap();
        let out = normalize(&wave);

        let mut peak = 0.0f32;
        for i in 0..out.len() {
            for j in 0..OVERSAMPLE {
                let pos = i as f64 + j as f64 / OVERSAMPLE as f64;
                peak = peak.max(InterpTable::shared().eval(&out.samples, pos).abs());
            }
        }
        assert!((peak - 1.0).abs() < 1e-3, "normalized peak is {}", peak);
    }

    #[test]
    fn test_near_silence_is_untouched() {
        let wave = Wave::new(vec![0.0004f32; 64], 44100.0).unwrap();
        let out = normalize(&wave);
        assert_eq!(out.samples, wave.samples);
    }

    #[test]
    fn test_scaling_is_uniform() {
        let wave = Wave::new(vec![0.1, -0.5, 0.25, 0.0], 44100.0).unwrap();
        let out = normalize(&wave);
        let gain = out.samples[1] / wave.samples[1];
        for (a, b) in wave.samples.iter().zip(&out.samples) {
            assert!((a * gain - b).abs() < 1e-6);
        }
    }
}
