//! Energy envelope computation
//!
//! Reduces a mono signal to one energy value per fixed-duration frame.
//! Frames are non-overlapping; the trailing partial frame is dropped. Frame
//! energy is the sum of squared sample values.

use crate::buffer::AudioBuffer;
use crate::config::AnalysisConfig;
use crate::error::AnalysisError;

/// Framed energy envelope of a signal
#[derive(Debug, Clone)]
pub struct Envelope {
    energies: Vec<f64>,
    frame_size: usize,
    frame_duration: f64,
}

impl Envelope {
    /// Per-frame energies (sum of squared samples)
    pub fn energies(&self) -> &[f64] {
        &self.energies
    }

    /// Frame size in samples
    pub fn frame_size(&self) -> usize {
        self.frame_size
    }

    /// Frame duration in seconds
    pub fn frame_duration(&self) -> f64 {
        self.frame_duration
    }

    /// Number of frames
    pub fn len(&self) -> usize {
        self.energies.len()
    }

    /// True if the envelope holds no frames
    pub fn is_empty(&self) -> bool {
        self.energies.is_empty()
    }
}

/// Build an energy envelope from an audio buffer
///
/// The frame size is `config.frame_duration` converted to samples against the
/// buffer's rate (20ms by default). Iteration stops once a full frame no
/// longer fits, so the trailing partial frame never contributes.
///
/// # Errors
///
/// Returns `AnalysisError::InsufficientSignal` when the signal yields fewer
/// than `config.min_envelope_frames` frames, and
/// `AnalysisError::InvalidInput` when the configured frame duration rounds to
/// zero samples.
pub fn build_envelope(
    buffer: &AudioBuffer,
    config: &AnalysisConfig,
) -> Result<Envelope, AnalysisError> {
    let frame_size = (config.frame_duration * buffer.sample_rate() as f64) as usize;
    if frame_size == 0 {
        return Err(AnalysisError::InvalidInput(format!(
            "Frame duration {}s is below one sample at {} Hz",
            config.frame_duration,
            buffer.sample_rate()
        )));
    }

    let samples = buffer.samples();
    let mut energies = Vec::with_capacity(samples.len() / frame_size);

    let mut start = 0;
    while start + frame_size < samples.len() {
        let energy: f64 = samples[start..start + frame_size]
            .iter()
            .map(|&x| (x as f64) * (x as f64))
            .sum();
        energies.push(energy);
        start += frame_size;
    }

    log::debug!(
        "Built envelope: {} frames of {} samples ({:.0}ms each)",
        energies.len(),
        frame_size,
        config.frame_duration * 1000.0
    );

    if energies.len() < config.min_envelope_frames {
        return Err(AnalysisError::InsufficientSignal(format!(
            "Signal yields {} envelope frames, need at least {}",
            energies.len(),
            config.min_envelope_frames
        )));
    }

    Ok(Envelope {
        energies,
        frame_size,
        frame_duration: frame_size as f64 / buffer.sample_rate() as f64,
    })
}
