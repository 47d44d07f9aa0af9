//! Onset detection from the energy envelope
//!
//! An onset is a frame where the envelope's first difference, with falling
//! energy clipped to zero, exceeds an adaptive threshold derived from the
//! track's own dynamic range. The threshold never uses a fixed absolute
//! value, so quiet and loud material are treated alike.

use crate::error::AnalysisError;
use crate::features::envelope::Envelope;

/// Adaptive threshold policy for onset picking
#[derive(Debug, Clone, Copy)]
pub enum ThresholdPolicy {
    /// Threshold at `mean + k * std` of the clipped differences (k = 1.0 by default)
    MeanStd {
        /// Standard-deviation multiplier
        k: f64,
    },
    /// Threshold at a high percentile of the clipped differences (0.85 to 0.95 recommended)
    Percentile {
        /// Percentile in [0.0, 1.0]
        percentile: f64,
    },
}

impl ThresholdPolicy {
    /// Validate policy parameters
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::InvalidInput` for a negative multiplier or a
    /// percentile outside [0.0, 1.0].
    pub fn validate(&self) -> Result<(), AnalysisError> {
        match *self {
            ThresholdPolicy::MeanStd { k } => {
                if k < 0.0 {
                    return Err(AnalysisError::InvalidInput(format!(
                        "Threshold multiplier k must be non-negative, got {}",
                        k
                    )));
                }
            }
            ThresholdPolicy::Percentile { percentile } => {
                if !(0.0..=1.0).contains(&percentile) {
                    return Err(AnalysisError::InvalidInput(format!(
                        "Percentile must be in [0.0, 1.0], got {}",
                        percentile
                    )));
                }
            }
        }
        Ok(())
    }

    fn threshold(&self, values: &[f64]) -> f64 {
        match *self {
            ThresholdPolicy::MeanStd { k } => {
                let mean = values.iter().sum::<f64>() / values.len() as f64;
                let variance =
                    values.iter().map(|&v| (v - mean) * (v - mean)).sum::<f64>() / values.len() as f64;
                mean + k * variance.sqrt()
            }
            ThresholdPolicy::Percentile { percentile } => {
                let mut sorted = values.to_vec();
                sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
                let idx = ((sorted.len() as f64) * percentile) as usize;
                sorted[idx.min(sorted.len() - 1)]
            }
        }
    }
}

/// Detect onsets in an energy envelope
///
/// Computes the frame-to-frame first difference of energy, clips negative
/// differences to zero (only rising energy signals an onset), and flags a
/// frame when its clipped difference exceeds the adaptive threshold. Flagged
/// difference indices map to seconds via `index * frame_duration`.
///
/// # Returns
///
/// Strictly increasing onset times in seconds. Empty when no threshold
/// crossing occurs or the envelope has fewer than two frames.
pub fn detect_onsets(envelope: &Envelope, policy: &ThresholdPolicy) -> Vec<f64> {
    let energies = envelope.energies();
    if energies.len() < 2 {
        return Vec::new();
    }

    let diffs: Vec<f64> = energies
        .windows(2)
        .map(|w| (w[1] - w[0]).max(0.0))
        .collect();

    let threshold = policy.threshold(&diffs);

    let onsets: Vec<f64> = diffs
        .iter()
        .enumerate()
        .filter(|&(_, &d)| d > threshold)
        .map(|(i, _)| i as f64 * envelope.frame_duration())
        .collect();

    log::debug!(
        "Detected {} onsets from {} frames (threshold {:.6})",
        onsets.len(),
        energies.len(),
        threshold
    );

    onsets
}
