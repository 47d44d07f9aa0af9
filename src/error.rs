//! Error types for the tempo analysis engine

use std::fmt;

/// Errors that can occur during tempo analysis and timebase conversion
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisError {
    /// Invalid input parameters
    InvalidInput(String),

    /// Input duration outside the supported analysis window
    DurationOutOfRange {
        /// Duration of the rejected signal in seconds
        duration_seconds: f64,
        /// Minimum accepted duration in seconds
        min_seconds: f64,
        /// Maximum accepted duration in seconds
        max_seconds: f64,
    },

    /// Signal too short or too sparse to produce any estimate
    InsufficientSignal(String),

    /// Non-positive BPM passed to a timebase conversion
    InvalidTempo(f64),

    /// No confident tempo available for timebase/sync construction
    IndeterminateTempo,
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            AnalysisError::DurationOutOfRange {
                duration_seconds,
                min_seconds,
                max_seconds,
            } => write!(
                f,
                "Duration out of range: {:.2}s (accepted range {:.0}s to {:.0}s)",
                duration_seconds, min_seconds, max_seconds
            ),
            AnalysisError::InsufficientSignal(msg) => write!(f, "Insufficient signal: {}", msg),
            AnalysisError::InvalidTempo(bpm) => {
                write!(f, "Invalid tempo: {} BPM (must be > 0)", bpm)
            }
            AnalysisError::IndeterminateTempo => {
                write!(f, "Indeterminate tempo: no confident estimate available")
            }
        }
    }
}

impl std::error::Error for AnalysisError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = AnalysisError::InvalidTempo(-10.0);
        assert!(err.to_string().contains("-10"));

        let err = AnalysisError::DurationOutOfRange {
            duration_seconds: 2.0,
            min_seconds: 5.0,
            max_seconds: 420.0,
        };
        assert!(err.to_string().contains("2.00"));
        assert!(err.to_string().contains("420"));

        let err = AnalysisError::IndeterminateTempo;
        assert!(err.to_string().contains("Indeterminate"));
    }
}
