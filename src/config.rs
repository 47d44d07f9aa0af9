//! Configuration parameters for tempo analysis

use crate::error::AnalysisError;
use crate::features::onset::ThresholdPolicy;

/// Pulses per quarter note used for tick positions (sequencer standard)
pub const DEFAULT_PPQ: u32 = 960;

/// Default beats per bar (4/4 time)
pub const DEFAULT_BEATS_PER_BAR: u32 = 4;

/// Analysis configuration parameters
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    // Input preconditions
    /// Minimum accepted signal duration in seconds (default: 5.0)
    pub min_audio_seconds: f64,

    /// Maximum accepted signal duration in seconds (default: 420.0, 7 minutes)
    pub max_audio_seconds: f64,

    // Envelope
    /// Envelope frame duration in seconds (default: 0.02, 20ms)
    pub frame_duration: f64,

    /// Minimum number of envelope frames required for onset detection (default: 10)
    pub min_envelope_frames: usize,

    // Onset detection
    /// Adaptive threshold policy for onset picking (default: mean + 1.0 * std)
    pub threshold: ThresholdPolicy,

    /// Minimum number of onsets required for a tempo estimate (default: 4)
    pub min_onsets: usize,

    // Interval resolution
    /// Plausible raw beat-period band in seconds before octave correction
    /// (default: 0.2 to 2.5, i.e. 24 to 300 BPM)
    pub min_interval_seconds: f64,

    /// Upper bound of the raw beat-period band (default: 2.5)
    pub max_interval_seconds: f64,

    /// Minimum number of in-band intervals required (default: 3)
    pub min_intervals: usize,

    /// Minimum BPM after octave folding (default: 40.0)
    pub min_bpm: f64,

    /// Maximum BPM after octave folding (default: 220.0)
    pub max_bpm: f64,

    // Stability scoring
    /// Trailing window width (in intervals) for the performance tempo (default: 4)
    pub window_width: usize,

    /// Stability above which confidence is "high" (default: 0.75)
    pub high_stability: f64,

    /// Stability above which confidence is "medium" (default: 0.4)
    pub medium_stability: f64,

    // Signal classification
    /// Mean RMS below which a signal classifies as vocal-like (default: 0.05)
    pub vocal_rms_ceiling: f64,

    /// Mean RMS at or above which a signal classifies as rhythmic (default: 0.15)
    pub rhythmic_rms_floor: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            min_audio_seconds: 5.0,
            max_audio_seconds: 420.0,
            frame_duration: 0.02,
            min_envelope_frames: 10,
            threshold: ThresholdPolicy::MeanStd { k: 1.0 },
            min_onsets: 4,
            min_interval_seconds: 0.2,
            max_interval_seconds: 2.5,
            min_intervals: 3,
            min_bpm: 40.0,
            max_bpm: 220.0,
            window_width: 4,
            high_stability: 0.75,
            medium_stability: 0.4,
            vocal_rms_ceiling: 0.05,
            rhythmic_rms_floor: 0.15,
        }
    }
}

impl AnalysisConfig {
    /// Profile tuned for percussive material: a stricter percentile threshold
    /// suppresses the weaker inter-beat transients that dense drum patterns
    /// produce between true beats.
    pub fn percussive() -> Self {
        Self {
            threshold: ThresholdPolicy::Percentile { percentile: 0.9 },
            ..Self::default()
        }
    }

    /// Profile tuned for sparse vocal material: a lower threshold multiplier
    /// and a wider stability window tolerate softer attacks and looser phrasing.
    pub fn vocal() -> Self {
        Self {
            threshold: ThresholdPolicy::MeanStd { k: 0.8 },
            window_width: 6,
            ..Self::default()
        }
    }

    /// Validate configuration invariants
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::InvalidInput` when any parameter is degenerate
    /// (non-positive frame duration, inverted BPM or interval bands, zero
    /// window width).
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if self.frame_duration <= 0.0 {
            return Err(AnalysisError::InvalidInput(
                "Frame duration must be > 0".to_string(),
            ));
        }
        if self.min_bpm <= 0.0 || self.max_bpm < self.min_bpm {
            return Err(AnalysisError::InvalidInput(format!(
                "BPM band must satisfy 0 < min <= max, got [{}, {}]",
                self.min_bpm, self.max_bpm
            )));
        }
        if self.min_interval_seconds <= 0.0 || self.max_interval_seconds < self.min_interval_seconds
        {
            return Err(AnalysisError::InvalidInput(format!(
                "Interval band must satisfy 0 < min <= max, got [{}, {}]",
                self.min_interval_seconds, self.max_interval_seconds
            )));
        }
        if self.window_width == 0 {
            return Err(AnalysisError::InvalidInput(
                "Stability window width must be > 0".to_string(),
            ));
        }
        if self.min_audio_seconds < 0.0 || self.max_audio_seconds < self.min_audio_seconds {
            return Err(AnalysisError::InvalidInput(format!(
                "Duration limits must satisfy 0 <= min <= max, got [{}, {}]",
                self.min_audio_seconds, self.max_audio_seconds
            )));
        }
        self.threshold.validate()?;
        Ok(())
    }
}
