//! Playback-side sample generator
//!
//! `Voice` is the piece the audio callback drives: it owns a
//! materialized wave and renders one output sample per call step with
//! the fast kernel, folding the playhead through the loop. Rendering
//! is allocation-free; the interpolation table is (re)built in
//! `start`, which runs on the editor side.
//!
//! A low-amplitude reference sine can be mixed in for tuning checks,
//! driven by its own phase accumulator.

use crate::looping::fold_position;
use crate::resample::InterpTable;
use crate::types::{Sample, Wave};

/// Fixed attenuation on the main signal, leaving headroom for
/// inter-sample overshoot and the reference tone
pub const HEADROOM: f32 = 0.8;

/// A single playback voice tied to one output device rate
pub struct Voice {
    device_rate: f64,
    wave: Option<Wave>,
    /// Playhead in wave samples; `None` when stopped
    pos: Option<f64>,
    /// Wave samples advanced per device sample
    step: f64,
    /// Custom low-pass table when the device runs below the wave rate;
    /// `None` means the shared full-bandwidth table
    table: Option<InterpTable>,
    tune_phase: f64,
    tune_step: f64,
    tune_vol: f32,
}

impl Voice {
    /// Create a stopped voice for the given device sample rate
    pub fn new(device_rate: f64) -> Self {
        Self {
            device_rate,
            wave: None,
            pos: None,
            step: 1.0,
            table: None,
            tune_phase: 0.0,
            tune_step: 0.0,
            tune_vol: 0.0,
        }
    }

    /// Begin playback of a wave from position 0
    ///
    /// The caller materializes looped waves first (`materialize_fast`);
    /// the voice itself never unrolls. When the device runs slower than
    /// the wave, a table cut off at `device_rate / wave_rate` is built
    /// here so decimation cannot alias; the table is kept across starts
    /// at the same ratio.
    pub fn start(&mut self, wave: Wave) {
        let step = wave.sample_rate / self.device_rate;
        if step != self.step {
            self.table = if self.device_rate < wave.sample_rate {
                Some(InterpTable::new(self.device_rate / wave.sample_rate))
            } else {
                None
            };
        }

        self.step = step;
        self.wave = Some(wave);
        self.pos = Some(0.0);
    }

    /// Stop playback
    pub fn stop(&mut self) {
        self.pos = None;
    }

    /// Set the reference tone frequency (Hz) and mix volume (0..1)
    pub fn set_tune(&mut self, freq: f64, vol: f64) {
        self.tune_step = (freq / self.device_rate).clamp(0.0, 1.0);
        self.tune_vol = vol.clamp(0.0, 1.0) as f32;
    }

    /// Current playhead in wave samples, if playing
    pub fn position(&self) -> Option<f64> {
        self.pos
    }

    /// Render one block of mono output
    ///
    /// Fills silence when stopped and after an unlooped wave runs off
    /// its end (looped waves fold forever). Safe at callback priority:
    /// no allocation, O(1) per output sample.
    pub fn render(&mut self, out: &mut [Sample]) {
        let (Some(wave), Some(mut pos)) = (self.wave.as_ref(), self.pos) else {
            out.fill(0.0);
            return;
        };
        let table = self.table.as_ref().unwrap_or_else(|| InterpTable::shared());

        let mut phase = self.tune_phase;
        let tune_step = self.tune_step;
        let tune_vol = self.tune_vol;
        let step = self.step;

        let mut stopped_at = None;
        for (i, slot) in out.iter_mut().enumerate() {
            if pos >= wave.len() as f64 {
                stopped_at = Some(i);
                break;
            }

            let main = table.eval(&wave.samples, pos);
            let tone = (phase * std::f64::consts::TAU).sin() as f32;
            *slot = main * HEADROOM * (1.0 - tune_vol) + tone * tune_vol;

            pos = fold_position(wave, pos + step);
            phase = (phase + tune_step).fract();
        }

        self.tune_phase = phase;
        if let Some(i) = stopped_at {
            out[i..].fill(0.0);
            self.pos = None;
        } else {
            self.pos = Some(pos);
        }
    }
}
