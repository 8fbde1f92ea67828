//! Loop-editing transforms
//!
//! Every transform takes a `&Wave` and returns a new `Wave`; none
//! mutate in place, and all run to completion on the calling thread.
//! Transforms that resample at non-integer ratios use the exact
//! interpolator only - feeding them through the fast table would fold
//! its linearization error into the audio.
//!
//! The intended export pipeline is: exact-materialize, quantize the
//! loop length, exact-materialize again for verification, truncate.
//! Crossfade, normalize, and tuning rounds may be interleaved anywhere
//! before truncation.

mod align;
mod crossfade;
mod normalize;
mod trim;
mod tune;

pub use align::quantize_loop_length;
pub use crossfade::crossfade;
pub use normalize::normalize;
pub use trim::truncate_to_loop;
pub use tune::round_tuning_fine;
