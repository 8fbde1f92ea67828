//! Common types for Loopsmith
//!
//! This module contains the wave data model used throughout the engine:
//! a mono sample buffer plus loop-region and tuning metadata. Waves are
//! persistent values - every transform allocates a fresh buffer and
//! returns a new `Wave`; nothing mutates in place.

use thiserror::Error;

/// Audio sample type (32-bit float for processing, positions are f64)
pub type Sample = f32;

/// Cents per semitone in the tuning metadata
pub const CENTS_PER_SEMITONE: i32 = 100;

/// Errors raised by the checked `Wave` constructors
///
/// Hot paths never re-validate; collaborators are expected to hand the
/// engine waves that already satisfy the invariants below.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WaveError {
    /// No sample data at all
    #[error("wave has no samples")]
    Empty,

    /// Loop bounds out of range or inverted
    #[error("invalid loop region {start}..{end} for {len} samples")]
    InvalidLoop { start: f64, end: f64, len: usize },
}

/// A loop region in fractional sample positions
///
/// Invariant: `0 <= start < end <= samples.len()`. Both bounds may be
/// fractional, and so may the width. A wave with no sustained loop
/// carries `None` instead of a sentinel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoopRegion {
    /// First position inside the loop
    pub start: f64,
    /// One past the last position inside the loop (exclusive)
    pub end: f64,
}

impl LoopRegion {
    /// Loop width in samples (may be fractional)
    #[inline]
    pub fn width(&self) -> f64 {
        self.end - self.start
    }
}

/// A mono wave with loop and tuning metadata
///
/// `root_note` is the MIDI note the sample plays at native rate;
/// `root_fine` is the cents offset above it, normalized into `[0,100)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Wave {
    /// Mono sample data
    pub samples: Vec<Sample>,
    /// Native sample rate in Hz
    pub sample_rate: f64,
    /// Sustained loop region, if any
    pub loop_region: Option<LoopRegion>,
    /// MIDI root note
    pub root_note: i32,
    /// Cents above the root note, in `[0,100)`
    pub root_fine: i32,
}

impl Wave {
    /// Create a wave without a loop, validating the sample data
    pub fn new(samples: Vec<Sample>, sample_rate: f64) -> Result<Self, WaveError> {
        if samples.is_empty() {
            return Err(WaveError::Empty);
        }
        Ok(Self {
            samples,
            sample_rate,
            loop_region: None,
            root_note: 60,
            root_fine: 0,
        })
    }

    /// Copy of this wave with the given loop region, validating bounds
    pub fn with_loop(&self, start: f64, end: f64) -> Result<Self, WaveError> {
        let len = self.samples.len();
        if !(0.0 <= start && start < end && end <= len as f64) {
            return Err(WaveError::InvalidLoop { start, end, len });
        }
        Ok(Self {
            loop_region: Some(LoopRegion { start, end }),
            ..self.clone()
        })
    }

    /// Copy of this wave with the loop cleared
    pub fn without_loop(&self) -> Self {
        Self {
            loop_region: None,
            ..self.clone()
        }
    }

    /// Copy of this wave with the given tuning
    ///
    /// `fine` may be any cents value; whole semitones carry into the
    /// root note so the stored `root_fine` lands in `[0,100)`.
    pub fn with_tuning(&self, root_note: i32, fine: i32) -> Self {
        let carry = fine.div_euclid(CENTS_PER_SEMITONE);
        Self {
            root_note: root_note + carry,
            root_fine: fine - carry * CENTS_PER_SEMITONE,
            ..self.clone()
        }
    }

    /// Copy of this wave with a replacement sample buffer
    ///
    /// Keeps the loop and tuning metadata; used by transforms that
    /// rewrite samples without moving the loop bounds.
    pub fn with_samples(&self, samples: Vec<Sample>) -> Self {
        Self {
            samples,
            sample_rate: self.sample_rate,
            loop_region: self.loop_region,
            root_note: self.root_note,
            root_fine: self.root_fine,
        }
    }

    /// Number of samples
    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True if the wave carries no samples
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Clamped sample read used by every interpolator
///
/// Out-of-range positions repeat the first/last sample instead of
/// reading zero, which keeps interpolation tails from ringing against
/// a hard edge at the buffer boundary. Empty buffers read as silence.
#[inline]
pub fn sample_at(samples: &[Sample], p: isize) -> Sample {
    if samples.is_empty() {
        0.0
    } else if p < 0 {
        samples[0]
    } else if p as usize >= samples.len() {
        samples[samples.len() - 1]
    } else {
        samples[p as usize]
    }
}
