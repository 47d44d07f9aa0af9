//! # Cadence DSP
//!
//! A tempo estimation and musical timebase engine for sequencer import,
//! providing onset-based BPM detection with a stability score and exact
//! bar/beat/tick conversion.
//!
//! ## Features
//!
//! - **Tempo estimation**: energy-envelope onset detection with median
//!   interval resolution and octave correction into a musical BPM band
//! - **Stability scoring**: rolling-window "performance" tempo with a
//!   clamped [0, 1] stability score and a discrete confidence label
//! - **Musical timebase**: sample-accurate beat/bar grids and 960 PPQ
//!   bar/beat/tick positions for downstream sequencer import
//! - **Decision policy**: deterministic grid-vs-stretch recommendations from
//!   signal class and confidence
//!
//! ## Quick Start
//!
//! ```no_run
//! use cadence_dsp::{estimate_tempo, AnalysisConfig, AudioBuffer};
//!
//! // Decoded mono samples, normalized to [-1.0, 1.0]
//! let samples: Vec<f32> = vec![]; // Your audio data
//! let buffer = AudioBuffer::new(samples, 44100)?;
//!
//! let analysis = estimate_tempo(&buffer, &AnalysisConfig::default())?;
//! let report = analysis.report();
//!
//! println!("BPM: {:?} (confidence: {})", report.bpm_reference, report.confidence);
//! # Ok::<(), cadence_dsp::AnalysisError>(())
//! ```
//!
//! ## Architecture
//!
//! The estimation pipeline flows one way:
//!
//! ```text
//! AudioBuffer → Envelope → Onsets → Intervals → (reference, performance, stability)
//!                                                        ↓
//!                                       TimebaseGrid / Position / SyncPayload
//! ```
//!
//! The engine is pure and stateless: decoding, upload handling, and
//! persistence are the caller's concern, and the same buffer and
//! configuration always produce the same result.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod analysis;
pub mod buffer;
pub mod config;
pub mod error;
pub mod features;
pub mod timebase;

// Re-export main types
pub use analysis::policy::{recommend, SyncPlan, SyncStrategy};
pub use analysis::result::{Confidence, Provenance, TempoAnalysis, TempoEstimate, TempoReport};
pub use buffer::{AudioBuffer, SignalClass, SignalMetrics};
pub use config::{AnalysisConfig, DEFAULT_BEATS_PER_BAR, DEFAULT_PPQ};
pub use error::AnalysisError;
pub use features::onset::ThresholdPolicy;
pub use timebase::{
    bars_from_duration, build_sync_payload, build_timebase, can_sync, sync_from_analysis,
    to_position, Position, SyncPayload, TimebaseGrid,
};

use features::envelope::build_envelope;
use features::onset::detect_onsets;
use features::period::{intervals_from_onsets, resolve_reference};
use features::stability::score_stability;

/// Estimate the tempo of an audio buffer
///
/// Runs the full pipeline: energy envelope, onset detection, interval
/// resolution, and stability scoring. Insufficient signal (too few frames or
/// onsets) degrades to the all-null low-confidence analysis; it never raises.
///
/// # Arguments
///
/// * `buffer` - Mono audio, normalized to [-1.0, 1.0]
/// * `config` - Analysis configuration parameters
///
/// # Errors
///
/// Returns `AnalysisError::DurationOutOfRange` when the buffer's duration is
/// outside `[config.min_audio_seconds, config.max_audio_seconds]` and
/// `AnalysisError::InvalidInput` for a degenerate configuration. Both are
/// checked before any estimation work begins.
///
/// # Example
///
/// ```no_run
/// use cadence_dsp::{estimate_tempo, AnalysisConfig, AudioBuffer};
///
/// let buffer = AudioBuffer::new(vec![0.0f32; 44100 * 30], 44100)?;
/// let analysis = estimate_tempo(&buffer, &AnalysisConfig::default())?;
/// assert_eq!(analysis.report().bpm_reference, None); // silence has no tempo
/// # Ok::<(), cadence_dsp::AnalysisError>(())
/// ```
pub fn estimate_tempo(
    buffer: &AudioBuffer,
    config: &AnalysisConfig,
) -> Result<TempoAnalysis, AnalysisError> {
    use std::time::Instant;
    let start_time = Instant::now();

    config.validate()?;

    let duration = buffer.duration_seconds();
    if !(config.min_audio_seconds..=config.max_audio_seconds).contains(&duration) {
        return Err(AnalysisError::DurationOutOfRange {
            duration_seconds: duration,
            min_seconds: config.min_audio_seconds,
            max_seconds: config.max_audio_seconds,
        });
    }

    log::debug!(
        "Starting tempo analysis: {} samples at {} Hz ({:.2}s)",
        buffer.len(),
        buffer.sample_rate(),
        duration
    );

    let envelope = match build_envelope(buffer, config) {
        Ok(envelope) => envelope,
        Err(AnalysisError::InsufficientSignal(msg)) => {
            log::warn!("Degrading to indeterminate analysis: {}", msg);
            return Ok(TempoAnalysis::indeterminate());
        }
        Err(e) => return Err(e),
    };

    let onsets = detect_onsets(&envelope, &config.threshold);
    if onsets.len() < config.min_onsets {
        log::debug!(
            "Only {} onsets (need {}), reporting indeterminate",
            onsets.len(),
            config.min_onsets
        );
        return Ok(TempoAnalysis::indeterminate());
    }

    let intervals = intervals_from_onsets(&onsets, config);
    let reference_bpm = resolve_reference(&intervals, config);
    let score = score_stability(&intervals, config);
    let confidence = Confidence::from_stability(score.stability, config);

    let analysis = TempoAnalysis {
        reference: reference_bpm.map(|bpm| TempoEstimate {
            bpm,
            provenance: Provenance::Reference,
            score: score.stability,
        }),
        performance: score.bpm_performance.map(|bpm| TempoEstimate {
            bpm,
            provenance: Provenance::Performance,
            score: score.stability,
        }),
        stability: score.stability,
        confidence,
    };

    log::debug!(
        "Tempo analysis done in {:.2}ms: reference={:?}, performance={:?}, stability={:.3}, confidence={}",
        start_time.elapsed().as_secs_f64() * 1000.0,
        analysis.reference.as_ref().map(|e| e.bpm),
        analysis.performance.as_ref().map(|e| e.bpm),
        analysis.stability,
        analysis.confidence
    );

    Ok(analysis)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Click track: short bursts at a fixed BPM over a silent background
    fn click_track(bpm: f64, duration: f64, sample_rate: u32) -> AudioBuffer {
        let n = (duration * sample_rate as f64) as usize;
        let mut samples = vec![0.0f32; n];
        let period = (60.0 / bpm * sample_rate as f64) as usize;
        let click_len = sample_rate as usize / 100;
        let mut pos = 0;
        while pos < n {
            for i in pos..(pos + click_len).min(n) {
                samples[i] = 0.9;
            }
            pos += period;
        }
        AudioBuffer::new(samples, sample_rate).unwrap()
    }

    #[test]
    fn test_click_track_reference_within_two_percent() {
        let config = AnalysisConfig::default();
        for &bpm in &[60.0, 90.0, 120.0, 150.0] {
            let buffer = click_track(bpm, 20.0, 44100);
            let analysis = estimate_tempo(&buffer, &config).unwrap();

            let reference = analysis
                .reference
                .as_ref()
                .unwrap_or_else(|| panic!("No reference tempo at {} BPM", bpm));
            assert!(
                (reference.bpm - bpm).abs() / bpm < 0.02,
                "Expected ~{} BPM, got {:.2}",
                bpm,
                reference.bpm
            );
            assert!(
                analysis.confidence.is_usable(),
                "Click track at {} BPM should not be low confidence",
                bpm
            );
        }
    }

    #[test]
    fn test_silence_degrades_gracefully() {
        let buffer = AudioBuffer::new(vec![0.0; 44100 * 6], 44100).unwrap();
        let analysis = estimate_tempo(&buffer, &AnalysisConfig::default()).unwrap();

        assert!(analysis.reference.is_none());
        assert!(analysis.performance.is_none());
        assert_eq!(analysis.stability, 0.0);
        assert_eq!(analysis.confidence, Confidence::Low);
    }

    #[test]
    fn test_short_buffer_rejected_before_analysis() {
        let buffer = AudioBuffer::new(vec![0.0; 44100 * 2], 44100).unwrap();
        let result = estimate_tempo(&buffer, &AnalysisConfig::default());
        assert!(matches!(
            result,
            Err(AnalysisError::DurationOutOfRange { .. })
        ));
    }

    #[test]
    fn test_over_long_buffer_rejected() {
        // 8 minutes at a deliberately low rate to keep the test cheap
        let sample_rate = 100;
        let buffer = AudioBuffer::new(vec![0.0; 8 * 60 * sample_rate], sample_rate as u32).unwrap();
        let result = estimate_tempo(&buffer, &AnalysisConfig::default());
        assert!(matches!(
            result,
            Err(AnalysisError::DurationOutOfRange { .. })
        ));
    }

    #[test]
    fn test_estimate_is_deterministic() {
        let config = AnalysisConfig::default();
        let buffer = click_track(128.0, 15.0, 44100);

        let a = estimate_tempo(&buffer, &config).unwrap();
        let b = estimate_tempo(&buffer, &config).unwrap();

        assert_eq!(
            a.reference.as_ref().map(|e| e.bpm),
            b.reference.as_ref().map(|e| e.bpm)
        );
        assert_eq!(a.stability, b.stability);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let buffer = click_track(120.0, 10.0, 44100);
        let config = AnalysisConfig {
            min_bpm: 0.0,
            ..AnalysisConfig::default()
        };
        assert!(matches!(
            estimate_tempo(&buffer, &config),
            Err(AnalysisError::InvalidInput(_))
        ));
    }
}
