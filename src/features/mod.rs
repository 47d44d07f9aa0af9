//! Feature extraction modules
//!
//! The tempo pipeline, in order:
//! - Envelope building (framed energy)
//! - Onset detection (adaptive thresholding of the energy differential)
//! - Period resolution (median interval with octave correction)
//! - Stability scoring (rolling-window performance tempo)

pub mod envelope;
pub mod onset;
pub mod period;
pub mod stability;
