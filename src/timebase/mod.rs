//! Musical timebase conversion
//!
//! Pure conversions from a validated tempo into beat/bar lengths,
//! bar/beat/tick positions, and sample-domain grid spacing. Every entry point
//! rejects a non-positive BPM with `AnalysisError::InvalidTempo`; a grid is
//! never built from an unvalidated tempo.

pub mod sync;

use crate::config::{DEFAULT_BEATS_PER_BAR, DEFAULT_PPQ};
use crate::error::AnalysisError;
use serde::{Deserialize, Serialize};

pub use sync::{build_sync_payload, can_sync, sync_from_analysis, SequencerHints, SyncPayload};

/// Sample-accurate musical grid for a fixed tempo and sample rate
///
/// `samples_per_beat` and `samples_per_bar` are truncated, not rounded:
/// sequencers quantize grid spacing to whole frames by truncation, and
/// reproducing that exactly keeps import round-trips bit-stable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimebaseGrid {
    /// Tempo in BPM (validated strictly positive)
    pub bpm: f64,

    /// Beats per bar (default 4)
    pub beats_per_bar: u32,

    /// Seconds per beat: `60 / bpm`
    pub seconds_per_beat: f64,

    /// Seconds per bar: `seconds_per_beat * beats_per_bar`
    pub seconds_per_bar: f64,

    /// Samples per beat, truncated to an integer
    pub samples_per_beat: u64,

    /// Samples per bar, truncated to an integer
    pub samples_per_bar: u64,

    /// Originating sample rate in Hz
    pub sample_rate: u32,
}

/// Musical position at a fixed PPQ resolution
///
/// Bar and beat are 1-indexed, matching sequencer UI numbering. The tick
/// offset is always in `[0, ppq)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// 1-indexed bar number
    pub bar: u64,

    /// 1-indexed beat within the bar, in `[1, beats_per_bar]`
    pub beat: u32,

    /// Tick offset within the beat, in `[0, ppq)`
    pub tick: u32,

    /// The absolute time this position was computed from, in seconds
    pub absolute_seconds: f64,
}

fn validate_tempo(bpm: f64) -> Result<(), AnalysisError> {
    if !bpm.is_finite() || bpm <= 0.0 {
        return Err(AnalysisError::InvalidTempo(bpm));
    }
    Ok(())
}

/// Build a sample-accurate timebase grid
///
/// # Arguments
///
/// * `bpm` - Tempo in BPM, must be strictly positive
/// * `sample_rate` - Sample rate in Hz, must be > 0
/// * `beats_per_bar` - Beats per bar, must be > 0 (4 for common time)
///
/// # Errors
///
/// Returns `AnalysisError::InvalidTempo` for a non-positive BPM and
/// `AnalysisError::InvalidInput` for a zero sample rate or zero beats per bar.
pub fn build_timebase(
    bpm: f64,
    sample_rate: u32,
    beats_per_bar: u32,
) -> Result<TimebaseGrid, AnalysisError> {
    validate_tempo(bpm)?;
    if sample_rate == 0 {
        return Err(AnalysisError::InvalidInput(
            "Sample rate must be > 0".to_string(),
        ));
    }
    if beats_per_bar == 0 {
        return Err(AnalysisError::InvalidInput(
            "Beats per bar must be > 0".to_string(),
        ));
    }

    let seconds_per_beat = 60.0 / bpm;
    let seconds_per_bar = seconds_per_beat * beats_per_bar as f64;

    Ok(TimebaseGrid {
        bpm,
        beats_per_bar,
        seconds_per_beat,
        seconds_per_bar,
        samples_per_beat: (seconds_per_beat * sample_rate as f64) as u64,
        samples_per_bar: (seconds_per_bar * sample_rate as f64) as u64,
        sample_rate,
    })
}

/// Build a grid in common time (4 beats per bar)
pub fn build_timebase_common(bpm: f64, sample_rate: u32) -> Result<TimebaseGrid, AnalysisError> {
    build_timebase(bpm, sample_rate, DEFAULT_BEATS_PER_BAR)
}

/// Convert an absolute time offset to a bar/beat/tick position
///
/// `total_beats = seconds / (60 / bpm)`; bar and beat come from floor
/// division and are 1-indexed; the tick is the fractional beat scaled to
/// `ppq` pulses and floored.
///
/// # Errors
///
/// Returns `AnalysisError::InvalidTempo` for a non-positive BPM and
/// `AnalysisError::InvalidInput` for negative seconds, zero beats per bar, or
/// zero PPQ.
pub fn to_position(
    seconds: f64,
    bpm: f64,
    beats_per_bar: u32,
    ppq: u32,
) -> Result<Position, AnalysisError> {
    validate_tempo(bpm)?;
    if seconds < 0.0 || !seconds.is_finite() {
        return Err(AnalysisError::InvalidInput(format!(
            "Time offset must be finite and >= 0, got {}",
            seconds
        )));
    }
    if beats_per_bar == 0 {
        return Err(AnalysisError::InvalidInput(
            "Beats per bar must be > 0".to_string(),
        ));
    }
    if ppq == 0 {
        return Err(AnalysisError::InvalidInput("PPQ must be > 0".to_string()));
    }

    let seconds_per_beat = 60.0 / bpm;
    let total_beats = seconds / seconds_per_beat;

    let bar = (total_beats / beats_per_bar as f64).floor() as u64 + 1;
    let beat = ((total_beats % beats_per_bar as f64).floor() as u32).min(beats_per_bar - 1) + 1;
    let beat_fraction = total_beats - total_beats.floor();
    let tick = ((beat_fraction * ppq as f64) as u32).min(ppq - 1);

    Ok(Position {
        bar,
        beat,
        tick,
        absolute_seconds: seconds,
    })
}

/// Convert an absolute time offset to a position in common time at 960 PPQ
pub fn to_position_common(seconds: f64, bpm: f64) -> Result<Position, AnalysisError> {
    to_position(seconds, bpm, DEFAULT_BEATS_PER_BAR, DEFAULT_PPQ)
}

/// Number of bars needed to cover a duration (ceiling division)
///
/// # Errors
///
/// Returns `AnalysisError::InvalidTempo` for a non-positive BPM and
/// `AnalysisError::InvalidInput` for a negative duration or zero beats per bar.
pub fn bars_from_duration(
    duration_seconds: f64,
    bpm: f64,
    beats_per_bar: u32,
) -> Result<u64, AnalysisError> {
    validate_tempo(bpm)?;
    if duration_seconds < 0.0 || !duration_seconds.is_finite() {
        return Err(AnalysisError::InvalidInput(format!(
            "Duration must be finite and >= 0, got {}",
            duration_seconds
        )));
    }
    if beats_per_bar == 0 {
        return Err(AnalysisError::InvalidInput(
            "Beats per bar must be > 0".to_string(),
        ));
    }

    let seconds_per_bar = (60.0 / bpm) * beats_per_bar as f64;
    Ok((duration_seconds / seconds_per_bar).ceil() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_samples_are_truncated_not_rounded() {
        // 60 / 127 * 44100 = 20834.645..., must truncate to 20834
        let grid = build_timebase(127.0, 44100, 4).unwrap();
        assert_eq!(grid.samples_per_beat, 20834);
        assert_eq!(grid.samples_per_bar, 83338);
    }

    #[test]
    fn test_grid_exact_division() {
        let grid = build_timebase(120.0, 44100, 4).unwrap();
        assert!((grid.seconds_per_beat - 0.5).abs() < 1e-12);
        assert!((grid.seconds_per_bar - 2.0).abs() < 1e-12);
        assert_eq!(grid.samples_per_beat, 22050);
        assert_eq!(grid.samples_per_bar, 88200);
        assert_eq!(grid.sample_rate, 44100);
    }

    #[test]
    fn test_grid_matches_floor_contract() {
        for &bpm in &[40.0, 67.3, 120.0, 128.0, 174.9, 220.0] {
            let grid = build_timebase(bpm, 48000, 4).unwrap();
            assert_eq!(grid.samples_per_beat, (60.0 / bpm * 48000.0) as u64);
        }
    }

    #[test]
    fn test_grid_rejects_invalid_tempo() {
        assert_eq!(
            build_timebase(0.0, 44100, 4),
            Err(AnalysisError::InvalidTempo(0.0))
        );
        assert_eq!(
            build_timebase(-10.0, 44100, 4),
            Err(AnalysisError::InvalidTempo(-10.0))
        );
        assert!(build_timebase(f64::NAN, 44100, 4).is_err());
    }

    #[test]
    fn test_grid_rejects_degenerate_parameters() {
        assert!(build_timebase(120.0, 0, 4).is_err());
        assert!(build_timebase(120.0, 44100, 0).is_err());
    }

    #[test]
    fn test_position_at_zero_is_origin() {
        for &bpm in &[40.0, 97.3, 120.0, 220.0] {
            let pos = to_position_common(0.0, bpm).unwrap();
            assert_eq!(pos.bar, 1);
            assert_eq!(pos.beat, 1);
            assert_eq!(pos.tick, 0);
        }
    }

    #[test]
    fn test_position_walks_through_a_bar() {
        // 120 BPM: 0.5s per beat, 2s per bar
        let pos = to_position_common(0.5, 120.0).unwrap();
        assert_eq!((pos.bar, pos.beat, pos.tick), (1, 2, 0));

        let pos = to_position_common(1.5, 120.0).unwrap();
        assert_eq!((pos.bar, pos.beat, pos.tick), (1, 4, 0));

        let pos = to_position_common(2.0, 120.0).unwrap();
        assert_eq!((pos.bar, pos.beat, pos.tick), (2, 1, 0));

        // Half a beat in: 480 ticks at 960 PPQ
        let pos = to_position_common(0.25, 120.0).unwrap();
        assert_eq!((pos.bar, pos.beat, pos.tick), (1, 1, 480));
    }

    #[test]
    fn test_position_tick_stays_below_ppq() {
        // Sweep offsets that land just before beat boundaries
        for i in 0..50 {
            let seconds = 0.5 * i as f64 - 1e-9;
            if seconds < 0.0 {
                continue;
            }
            let pos = to_position_common(seconds, 120.0).unwrap();
            assert!(pos.tick < 960, "tick {} out of range at {}s", pos.tick, seconds);
            assert!(pos.beat >= 1 && pos.beat <= 4);
        }
    }

    #[test]
    fn test_position_bar_monotonicity() {
        let bpm = 97.0;
        let mut last_bar = 0;
        for i in 0..200 {
            let pos = to_position_common(i as f64 * 0.1, bpm).unwrap();
            assert!(pos.bar >= last_bar, "Bar must never decrease");
            last_bar = pos.bar;
        }
    }

    #[test]
    fn test_position_bar_increments_at_bar_boundary() {
        // 120 BPM common time: a bar is exactly 2s
        let before = to_position_common(1.99, 120.0).unwrap();
        let after = to_position_common(2.01, 120.0).unwrap();
        assert_eq!(before.bar, 1);
        assert_eq!(after.bar, 2);
    }

    #[test]
    fn test_position_rejects_invalid_inputs() {
        assert_eq!(
            to_position_common(1.0, 0.0),
            Err(AnalysisError::InvalidTempo(0.0))
        );
        assert_eq!(
            to_position_common(1.0, -10.0),
            Err(AnalysisError::InvalidTempo(-10.0))
        );
        assert!(to_position_common(-1.0, 120.0).is_err());
        assert!(to_position(1.0, 120.0, 0, 960).is_err());
        assert!(to_position(1.0, 120.0, 4, 0).is_err());
    }

    #[test]
    fn test_bars_from_duration_ceils() {
        // 120 BPM common time: 2s per bar
        assert_eq!(bars_from_duration(8.0, 120.0, 4).unwrap(), 4);
        assert_eq!(bars_from_duration(8.1, 120.0, 4).unwrap(), 5);
        assert_eq!(bars_from_duration(0.0, 120.0, 4).unwrap(), 0);
    }

    #[test]
    fn test_bars_from_duration_rejects_invalid() {
        assert!(bars_from_duration(10.0, 0.0, 4).is_err());
        assert!(bars_from_duration(-1.0, 120.0, 4).is_err());
        assert!(bars_from_duration(10.0, 120.0, 0).is_err());
    }

    #[test]
    fn test_odd_meter() {
        let grid = build_timebase(120.0, 44100, 3).unwrap();
        assert!((grid.seconds_per_bar - 1.5).abs() < 1e-12);

        let pos = to_position(1.5, 120.0, 3, 960).unwrap();
        assert_eq!((pos.bar, pos.beat), (2, 1));
    }
}
