//! Beat period resolution
//!
//! Turns onset-to-onset gaps into a single BPM value. The contract here is
//! the crate's core numeric mechanism: take the median interval (robust to
//! spurious onsets), invert to BPM, then fold by octaves into the configured
//! band. Folding suppresses the half-time/double-time errors that raw
//! interval inversion produces.

use crate::config::AnalysisConfig;

/// Compute consecutive onset gaps, filtered to the plausible beat-period band
///
/// Gaps outside `[config.min_interval_seconds, config.max_interval_seconds]`
/// are discarded. Onset series are strictly increasing by construction, so
/// every surviving interval is strictly positive.
pub fn intervals_from_onsets(onsets: &[f64], config: &AnalysisConfig) -> Vec<f64> {
    let intervals: Vec<f64> = onsets
        .windows(2)
        .map(|w| w[1] - w[0])
        .filter(|gap| (config.min_interval_seconds..=config.max_interval_seconds).contains(gap))
        .collect();

    log::debug!(
        "Kept {} of {} onset intervals inside [{:.2}s, {:.2}s]",
        intervals.len(),
        onsets.len().saturating_sub(1),
        config.min_interval_seconds,
        config.max_interval_seconds
    );

    intervals
}

/// Fold a BPM value into `[min_bpm, max_bpm]` by repeated doubling/halving
///
/// Returns `None` for a non-positive or non-finite input. Folding is
/// idempotent under octave shifts of the input:
/// `normalize_bpm(x) == normalize_bpm(2x) == normalize_bpm(x / 2)`.
pub fn normalize_bpm(bpm: f64, min_bpm: f64, max_bpm: f64) -> Option<f64> {
    if !bpm.is_finite() || bpm <= 0.0 {
        return None;
    }

    let mut bpm = bpm;
    while bpm < min_bpm {
        bpm *= 2.0;
    }
    while bpm > max_bpm {
        bpm /= 2.0;
    }
    Some(bpm)
}

/// Resolve a BPM value from a set of intervals
///
/// Takes the median interval (not the mean), inverts it to BPM, and folds
/// into the configured band. Returns `None` for an empty or degenerate
/// interval set.
pub fn bpm_from_intervals(intervals: &[f64], config: &AnalysisConfig) -> Option<f64> {
    if intervals.is_empty() {
        return None;
    }

    let median = median(intervals);
    if median <= 0.0 {
        return None;
    }

    normalize_bpm(60.0 / median, config.min_bpm, config.max_bpm)
}

/// Resolve the reference tempo from an interval series
///
/// Requires at least `config.min_intervals` in-band intervals; reports
/// indeterminate (`None`) otherwise.
pub fn resolve_reference(intervals: &[f64], config: &AnalysisConfig) -> Option<f64> {
    if intervals.len() < config.min_intervals {
        log::debug!(
            "Reference tempo indeterminate: {} intervals, need {}",
            intervals.len(),
            config.min_intervals
        );
        return None;
    }

    bpm_from_intervals(intervals, config)
}

/// Median of a non-empty slice (average of middle pair for even lengths)
fn median(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) * 0.5
    } else {
        sorted[mid]
    }
}
