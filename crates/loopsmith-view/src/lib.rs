//! Loopsmith View - display-side peak indexing
//!
//! Builds and queries the multi-resolution min/max envelope that lets
//! the waveform canvas render any zoom level in constant work per
//! pixel column. Lives outside the engine crate because only the
//! display ever touches it.

pub mod peaks;

pub use peaks::{AnalyzedWave, PeakPyramid, WaveId, WaveIdSource};
