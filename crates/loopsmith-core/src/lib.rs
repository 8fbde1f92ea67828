//! Loopsmith Core - Resampling and loop-processing engine
//!
//! Pure, synchronous transforms over in-memory mono waves with optional
//! loop-point and tuning metadata. The interactive UI, the audio device
//! callback, and the container file format live in the applications; this
//! crate only sees sample buffers, fractional loop bounds, and a root
//! note / cents pair.

pub mod config;
pub mod looping;
pub mod music;
pub mod resample;
pub mod transform;
pub mod types;
pub mod voice;

pub use types::*;
