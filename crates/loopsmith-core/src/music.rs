//! Tuning math shared by the editor and the tune-tone collaborators
//!
//! Converts between MIDI note + cents, frequencies against a tuning
//! standard, and the pitch implied by a loop's width.

use crate::types::Wave;

/// Note names in table order; the octave index increments at A
const NOTE_NAMES: [&str; 12] = [
    "A", "A#", "B", "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#",
];

/// Display name for a MIDI note, e.g. `midi_note_name(60) == "C4"`
pub fn midi_note_name(midi: i32) -> String {
    let num = midi + 3;
    let octave = num.div_euclid(12);
    format!("{}{}", NOTE_NAMES[num.rem_euclid(12) as usize], octave - 1)
}

/// Frequency in Hz of a root note + cents pair against a tuning
/// standard (`standard` = frequency of A above middle C, MIDI 69)
pub fn tune_frequency(root_note: i32, root_fine: i32, standard: f64) -> f64 {
    standard * 2f64.powf((root_note as f64 + root_fine as f64 / 100.0 - 69.0) / 12.0)
}

/// Pitch implied by a loop region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopPitch {
    /// Nearest MIDI note below (or at) the loop frequency
    pub note: i32,
    /// Cents above `note`, in `[0,100)`
    pub cents: i32,
}

/// Derive the pitch a loop plays at, assuming it spans `cycles` periods
/// of the waveform
///
/// This backs the "linked" tuning mode: drag the loop, read off the
/// note it produces. Returns `None` without a loop or when the width is
/// under one sample.
pub fn loop_pitch(wave: &Wave, cycles: u32, standard: f64) -> Option<LoopPitch> {
    let region = wave.loop_region?;
    if region.width() < 1.0 {
        return None;
    }

    let freq = wave.sample_rate * cycles as f64 / region.width();
    let midi_fine = (freq / standard).log2() * 12.0 + 69.0;
    let mut note = midi_fine.floor() as i32;
    let mut cents = ((midi_fine - midi_fine.floor()) * 100.0).round() as i32;
    if cents == 100 {
        note += 1;
        cents = 0;
    }
    Some(LoopPitch { note, cents })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_names() {
        assert_eq!(midi_note_name(60), "C4");
        assert_eq!(midi_note_name(61), "C#4");
        assert_eq!(midi_note_name(48), "C3");
        // octave rolls at A, per the editor's note table
        assert_eq!(midi_note_name(69), "A5");
        assert_eq!(midi_note_name(0), "C-1");
    }

    #[test]
    fn test_tune_frequency_standard_pitch() {
        assert!((tune_frequency(69, 0, 440.0) - 440.0).abs() < 1e-9);
        assert!((tune_frequency(57, 0, 440.0) - 220.0).abs() < 1e-9);
        // 50 cents sits exactly between semitones
        let half = tune_frequency(69, 50, 440.0);
        assert!((half - 440.0 * 2f64.powf(0.5 / 12.0)).abs() < 1e-9);
    }

    #[test]
    fn test_loop_pitch_of_exact_a() {
        // width = rate / 440 puts one cycle exactly at A440
        let rate = 44100.0;
        let width = rate / 440.0;
        let wave = Wave::new(vec![0.0; 4096], rate)
            .unwrap()
            .with_loop(100.0, 100.0 + width)
            .unwrap();
        let pitch = loop_pitch(&wave, 1, 440.0).unwrap();
        assert_eq!(pitch, LoopPitch { note: 69, cents: 0 });
    }

    #[test]
    fn test_loop_pitch_scales_with_cycles() {
        let rate = 44100.0;
        let width = rate / 440.0 * 2.0;
        let wave = Wave::new(vec![0.0; 4096], rate)
            .unwrap()
            .with_loop(100.0, 100.0 + width)
            .unwrap();
        // two cycles in a double-width loop is still A440
        let pitch = loop_pitch(&wave, 2, 440.0).unwrap();
        assert_eq!(pitch, LoopPitch { note: 69, cents: 0 });
        // one cycle is an octave down
        let pitch = loop_pitch(&wave, 1, 440.0).unwrap();
        assert_eq!(pitch, LoopPitch { note: 57, cents: 0 });
    }

    #[test]
    fn test_loop_pitch_requires_loop() {
        let wave = Wave::new(vec![0.0; 64], 44100.0).unwrap();
        assert_eq!(loop_pitch(&wave, 1, 440.0), None);
        let tiny = wave.with_loop(10.0, 10.5).unwrap();
        assert_eq!(loop_pitch(&tiny, 1, 440.0), None);
    }
}
