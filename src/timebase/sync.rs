//! Sequencer synchronization payload
//!
//! Bundles a timebase grid with the track's end position and import hints
//! into one serializable payload for a downstream sequencer import. The rule
//! here is strict: no real tempo, no sync. A missing or unusable tempo is
//! surfaced as `IndeterminateTempo`, never papered over with a default BPM.

use crate::analysis::result::TempoAnalysis;
use crate::config::DEFAULT_PPQ;
use crate::error::AnalysisError;
use crate::timebase::{bars_from_duration, build_timebase, to_position, Position, TimebaseGrid};
use serde::{Deserialize, Serialize};

/// Import hints for the receiving sequencer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequencerHints {
    /// Time signature string, e.g. "4/4"
    pub time_signature: String,

    /// Grid snap granularity
    pub snap: String,

    /// Default stretch mode for imported clips
    pub stretch_mode: String,
}

impl SequencerHints {
    fn for_meter(beats_per_bar: u32) -> Self {
        Self {
            time_signature: format!("{}/4", beats_per_bar),
            snap: "line".to_string(),
            stretch_mode: "resample".to_string(),
        }
    }
}

/// Complete synchronization payload for sequencer import
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncPayload {
    /// Sample-accurate timebase grid
    pub timebase: TimebaseGrid,

    /// Track duration in seconds
    pub track_duration_seconds: f64,

    /// Bars needed to cover the track (ceiling)
    pub total_bars: u64,

    /// Musical position of the track's end
    pub end_position: Position,

    /// Tick resolution of all positions in this payload
    pub ppq: u32,

    /// Import hints for the receiving sequencer
    pub hints: SequencerHints,

    /// Payload status, always "ready" (an unready payload is never built)
    pub status: String,
}

/// True when a tempo value can drive synchronization
///
/// No real BPM means no sync; this is the gate every sync path goes through.
pub fn can_sync(bpm: Option<f64>) -> bool {
    matches!(bpm, Some(b) if b.is_finite() && b > 0.0)
}

/// Build a synchronization payload from an explicit, validated tempo
///
/// # Errors
///
/// Returns `AnalysisError::InvalidTempo` for a non-positive BPM and
/// `AnalysisError::InvalidInput` for a negative duration, zero sample rate,
/// or zero beats per bar.
pub fn build_sync_payload(
    bpm: f64,
    duration_seconds: f64,
    sample_rate: u32,
    beats_per_bar: u32,
) -> Result<SyncPayload, AnalysisError> {
    let timebase = build_timebase(bpm, sample_rate, beats_per_bar)?;
    let total_bars = bars_from_duration(duration_seconds, bpm, beats_per_bar)?;
    let end_position = to_position(duration_seconds, bpm, beats_per_bar, DEFAULT_PPQ)?;

    log::debug!(
        "Sync payload: {:.2} BPM, {} bars over {:.2}s",
        bpm,
        total_bars,
        duration_seconds
    );

    Ok(SyncPayload {
        timebase,
        track_duration_seconds: duration_seconds,
        total_bars,
        end_position,
        ppq: DEFAULT_PPQ,
        hints: SequencerHints::for_meter(beats_per_bar),
        status: "ready".to_string(),
    })
}

/// Build a synchronization payload from a tempo analysis
///
/// Uses the best available estimate (reference preferred). Callers wanting a
/// fallback tempo must opt in explicitly by calling [`build_sync_payload`]
/// with their own BPM.
///
/// # Errors
///
/// Returns `AnalysisError::IndeterminateTempo` when the analysis carries no
/// usable tempo (no estimate, or low confidence), plus the
/// [`build_sync_payload`] errors.
pub fn sync_from_analysis(
    analysis: &TempoAnalysis,
    duration_seconds: f64,
    sample_rate: u32,
    beats_per_bar: u32,
) -> Result<SyncPayload, AnalysisError> {
    let tempo = analysis.best_tempo();

    if !can_sync(tempo.map(|t| t.bpm)) || !analysis.confidence.is_usable() {
        log::warn!(
            "Refusing sync: tempo={:?}, confidence={}",
            tempo.map(|t| t.bpm),
            analysis.confidence
        );
        return Err(AnalysisError::IndeterminateTempo);
    }

    // best_tempo passed the can_sync gate above
    let bpm = tempo.map(|t| t.bpm).ok_or(AnalysisError::IndeterminateTempo)?;
    build_sync_payload(bpm, duration_seconds, sample_rate, beats_per_bar)
}
