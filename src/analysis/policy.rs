//! Synchronization decision policy
//!
//! A deterministic lookup over (signal class, confidence) that chooses a
//! downstream synchronization strategy. The policy never fabricates a tempo:
//! with no usable estimate it always demands an external reference.

use crate::analysis::result::{Confidence, Provenance, TempoAnalysis, TempoEstimate};
use crate::buffer::SignalClass;
use serde::{Deserialize, Serialize};

/// Downstream synchronization strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SyncStrategy {
    /// Align material to a fixed beat grid at the detected tempo
    FixedGrid,
    /// Allow time-stretching; the detected tempo is an alignment reference only
    TimeStretch,
    /// No usable tempo; synchronization requires an external reference
    ExternalReference,
}

/// Synchronization plan produced by the decision policy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncPlan {
    /// Chosen strategy
    pub strategy: SyncStrategy,

    /// Signal classification the decision was based on
    pub class: SignalClass,

    /// Tempo to drive synchronization with, when one exists. For vocal-like
    /// content this is re-tagged with `vocal-cadence` provenance.
    pub tempo: Option<TempoEstimate>,

    /// Ordered human-readable recommendations
    pub recommendations: Vec<String>,
}

/// Choose a synchronization strategy for a classified signal
///
/// The decision table:
///
/// | class      | confidence  | strategy            |
/// |------------|-------------|---------------------|
/// | any        | low / none  | external reference  |
/// | vocal-like | med / high  | time-stretch        |
/// | melodic    | medium      | time-stretch        |
/// | melodic    | high        | fixed grid          |
/// | rhythmic   | med / high  | fixed grid          |
pub fn recommend(class: SignalClass, analysis: &TempoAnalysis) -> SyncPlan {
    let tempo = analysis.best_tempo().cloned();

    if tempo.is_none() || !analysis.confidence.is_usable() {
        log::debug!("Policy: no usable tempo for {:?} signal", class);
        return SyncPlan {
            strategy: SyncStrategy::ExternalReference,
            class,
            tempo: None,
            recommendations: vec![
                "indeterminate tempo, require an external reference".to_string(),
                "do not build a timebase from a substituted default BPM".to_string(),
            ],
        };
    }

    let (strategy, tempo, recommendations) = match (class, analysis.confidence) {
        (SignalClass::VocalLike, _) => (
            SyncStrategy::TimeStretch,
            tempo.map(|t| TempoEstimate {
                provenance: Provenance::VocalCadence,
                ..t
            }),
            vec![
                "permit time-stretch, use tempo as alignment reference only".to_string(),
                "expect loose phrasing, avoid hard quantization".to_string(),
            ],
        ),
        (SignalClass::Melodic, Confidence::Medium) => (
            SyncStrategy::TimeStretch,
            tempo,
            vec![
                "permit time-stretch, tempo is moderately stable".to_string(),
                "re-check alignment at phrase boundaries".to_string(),
            ],
        ),
        (SignalClass::Melodic, _) => (
            SyncStrategy::FixedGrid,
            tempo,
            vec!["align to fixed grid".to_string()],
        ),
        (SignalClass::Rhythmic, Confidence::Medium) => (
            SyncStrategy::FixedGrid,
            tempo,
            vec![
                "align to fixed grid".to_string(),
                "verify downbeat placement before committing the grid".to_string(),
            ],
        ),
        (SignalClass::Rhythmic, _) => (
            SyncStrategy::FixedGrid,
            tempo,
            vec!["align to fixed grid".to_string()],
        ),
    };

    log::debug!("Policy: {:?} + {} -> {:?}", class, analysis.confidence, strategy);

    SyncPlan {
        strategy,
        class,
        tempo,
        recommendations,
    }
}
