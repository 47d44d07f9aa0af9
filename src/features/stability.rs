//! Tempo stability scoring
//!
//! Slides a fixed-width trailing window over the interval series and resolves
//! each window to an octave-folded BPM. The mean of that series is the
//! "performance" tempo; its relative dispersion gives the stability score.
//! An empty series is a valid low-information result, not an error.

use crate::config::AnalysisConfig;
use crate::features::period::bpm_from_intervals;

/// Rolling-window tempo and stability
#[derive(Debug, Clone)]
pub struct StabilityScore {
    /// Mean of the windowed BPM series, when any window resolved
    pub bpm_performance: Option<f64>,

    /// `1 - stddev/mean` of the windowed BPM series, clamped to [0.0, 1.0]
    pub stability: f64,
}

impl StabilityScore {
    /// The zero-information score: no tempo, zero stability
    pub fn indeterminate() -> Self {
        Self {
            bpm_performance: None,
            stability: 0.0,
        }
    }
}

/// Score tempo stability over an interval series
///
/// For each interval index i, the window covers the trailing
/// `config.window_width` intervals ending at i (shorter at the start of the
/// series). Each window resolves through the median + octave-fold contract.
pub fn score_stability(intervals: &[f64], config: &AnalysisConfig) -> StabilityScore {
    let mut bpm_series = Vec::with_capacity(intervals.len());

    for i in 0..intervals.len() {
        let start = i.saturating_sub(config.window_width.saturating_sub(1));
        if let Some(bpm) = bpm_from_intervals(&intervals[start..=i], config) {
            bpm_series.push(bpm);
        }
    }

    if bpm_series.is_empty() {
        log::debug!("Stability indeterminate: no window resolved to a BPM");
        return StabilityScore::indeterminate();
    }

    let mean = bpm_series.iter().sum::<f64>() / bpm_series.len() as f64;
    let variance = bpm_series
        .iter()
        .map(|&b| (b - mean) * (b - mean))
        .sum::<f64>()
        / bpm_series.len() as f64;
    let stability = (1.0 - variance.sqrt() / mean).clamp(0.0, 1.0);

    log::debug!(
        "Performance tempo {:.2} BPM over {} windows, stability {:.3}",
        mean,
        bpm_series.len(),
        stability
    );

    StabilityScore {
        bpm_performance: Some(mean),
        stability,
    }
}
