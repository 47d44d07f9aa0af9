//! Audio buffer value type and coarse signal metrics
//!
//! The analysis pipeline consumes an immutable mono PCM buffer with a known
//! sample rate. Decoding and channel reduction belong to the caller; the
//! interleaved downmix helper is provided for convenience at that boundary.

use crate::error::AnalysisError;
use serde::{Deserialize, Serialize};

/// Immutable mono audio buffer
///
/// Samples are expected to be normalized to [-1.0, 1.0]. The buffer is never
/// mutated by the analysis pipeline.
#[derive(Debug, Clone)]
pub struct AudioBuffer {
    samples: Vec<f32>,
    sample_rate: u32,
}

impl AudioBuffer {
    /// Create a buffer from mono samples
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::InvalidInput` for an empty sample slice or a
    /// zero sample rate.
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Result<Self, AnalysisError> {
        if samples.is_empty() {
            return Err(AnalysisError::InvalidInput(
                "Empty audio samples".to_string(),
            ));
        }
        if sample_rate == 0 {
            return Err(AnalysisError::InvalidInput(
                "Sample rate must be > 0".to_string(),
            ));
        }
        Ok(Self {
            samples,
            sample_rate,
        })
    }

    /// Create a buffer from interleaved multi-channel samples, downmixing to
    /// mono by channel-wise mean
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::InvalidInput` for zero channels, a sample
    /// count that is not a multiple of the channel count, or the same
    /// conditions as [`AudioBuffer::new`].
    pub fn from_interleaved(
        samples: &[f32],
        channels: u32,
        sample_rate: u32,
    ) -> Result<Self, AnalysisError> {
        let mono = downmix_interleaved(samples, channels)?;
        Self::new(mono, sample_rate)
    }

    /// Mono samples
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Sample rate in Hz
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True if the buffer holds no samples (unreachable via constructors)
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Duration in seconds (samples / sample rate)
    pub fn duration_seconds(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }

    /// Coarse signal metrics: duration, mean RMS, peak amplitude
    pub fn metrics(&self) -> SignalMetrics {
        let sum_sq: f64 = self.samples.iter().map(|&x| (x as f64) * (x as f64)).sum();
        let rms = (sum_sq / self.samples.len() as f64).sqrt();
        let peak = self
            .samples
            .iter()
            .map(|&x| x.abs() as f64)
            .fold(0.0f64, f64::max);

        SignalMetrics {
            duration_seconds: self.duration_seconds(),
            sample_rate: self.sample_rate,
            rms_energy: rms,
            peak_amplitude: peak,
        }
    }
}

/// Downmix interleaved multi-channel samples to mono by channel-wise mean
///
/// # Arguments
///
/// * `samples` - Interleaved samples (frame-major: L R L R ... for stereo)
/// * `channels` - Number of channels (> 0)
///
/// # Errors
///
/// Returns `AnalysisError::InvalidInput` for zero channels or a sample count
/// that is not a whole number of frames.
pub fn downmix_interleaved(samples: &[f32], channels: u32) -> Result<Vec<f32>, AnalysisError> {
    if channels == 0 {
        return Err(AnalysisError::InvalidInput(
            "Channel count must be > 0".to_string(),
        ));
    }
    let channels = channels as usize;
    if samples.len() % channels != 0 {
        return Err(AnalysisError::InvalidInput(format!(
            "Sample count {} is not a multiple of channel count {}",
            samples.len(),
            channels
        )));
    }
    if channels == 1 {
        return Ok(samples.to_vec());
    }

    log::debug!(
        "Downmixing {} interleaved samples from {} channels",
        samples.len(),
        channels
    );

    Ok(samples
        .chunks_exact(channels)
        .map(|frame| frame.iter().sum::<f32>() / channels as f32)
        .collect())
}

/// Coarse signal metrics computed from an [`AudioBuffer`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalMetrics {
    /// Duration in seconds
    pub duration_seconds: f64,

    /// Sample rate in Hz
    pub sample_rate: u32,

    /// Mean RMS energy over the whole buffer
    pub rms_energy: f64,

    /// Peak absolute amplitude
    pub peak_amplitude: f64,
}

/// Coarse signal classification by mean RMS energy
///
/// Used by the decision policy to choose a synchronization strategy. This is
/// a deliberately blunt instrument: low-energy content behaves like a vocal
/// take, high-energy content like a rhythmic stem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SignalClass {
    /// Low-energy content (a cappella, spoken word)
    VocalLike,
    /// Mid-energy content (melodic instruments, pads)
    Melodic,
    /// High-energy content (drums, full mixes)
    Rhythmic,
}

impl SignalClass {
    /// Classify a signal from its metrics using the configured RMS thresholds
    pub fn from_metrics(metrics: &SignalMetrics, config: &crate::AnalysisConfig) -> Self {
        if metrics.rms_energy < config.vocal_rms_ceiling {
            SignalClass::VocalLike
        } else if metrics.rms_energy < config.rhythmic_rms_floor {
            SignalClass::Melodic
        } else {
            SignalClass::Rhythmic
        }
    }
}
