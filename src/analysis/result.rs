//! Tempo analysis result types

use crate::config::AnalysisConfig;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a tempo estimate came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Provenance {
    /// Global estimate from the median of all in-band intervals
    Reference,
    /// Mean of the rolling-window BPM series
    Performance,
    /// A tempo usable only as an alignment reference for vocal-like content
    VocalCadence,
}

/// Discrete confidence label derived from the stability score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    /// Stability above the high band (default: > 0.75)
    High,
    /// Stability above the medium band (default: > 0.4)
    Medium,
    /// Everything else, including the no-information case
    Low,
}

impl Confidence {
    /// Band a stability score using the configured thresholds
    pub fn from_stability(stability: f64, config: &AnalysisConfig) -> Self {
        if stability > config.high_stability {
            Confidence::High
        } else if stability > config.medium_stability {
            Confidence::Medium
        } else {
            Confidence::Low
        }
    }

    /// True when the label is trustworthy enough to drive synchronization
    pub fn is_usable(&self) -> bool {
        !matches!(self, Confidence::Low)
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Confidence::High => write!(f, "high"),
            Confidence::Medium => write!(f, "medium"),
            Confidence::Low => write!(f, "low"),
        }
    }
}

/// A single tempo estimate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TempoEstimate {
    /// Tempo in BPM, folded into the configured band
    pub bpm: f64,

    /// Estimate provenance
    pub provenance: Provenance,

    /// Stability score backing this estimate (0.0 to 1.0)
    pub score: f64,
}

/// Complete tempo analysis for one buffer
///
/// Both tempo fields may be `None`: an under-determined signal degrades to
/// the all-null low-confidence analysis rather than failing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TempoAnalysis {
    /// Median-based reference tempo
    pub reference: Option<TempoEstimate>,

    /// Rolling-window performance tempo
    pub performance: Option<TempoEstimate>,

    /// Stability of the windowed BPM series (0.0 to 1.0)
    pub stability: f64,

    /// Discrete banding of the stability score
    pub confidence: Confidence,
}

impl TempoAnalysis {
    /// The zero-information analysis: all-null tempo, zero stability, low confidence
    pub fn indeterminate() -> Self {
        Self {
            reference: None,
            performance: None,
            stability: 0.0,
            confidence: Confidence::Low,
        }
    }

    /// Best available tempo, preferring the reference estimate
    pub fn best_tempo(&self) -> Option<&TempoEstimate> {
        self.reference.as_ref().or(self.performance.as_ref())
    }

    /// Flat display-rounded report in the downstream JSON shape
    pub fn report(&self) -> TempoReport {
        TempoReport {
            bpm_reference: self.reference.as_ref().map(|e| round_to(e.bpm, 2)),
            bpm_performance: self.performance.as_ref().map(|e| round_to(e.bpm, 2)),
            bpm_stability: round_to(self.stability, 3),
            confidence: self.confidence,
        }
    }
}

/// Flat JSON report consumed downstream
///
/// BPM values are rounded to 2 decimal places and stability to 3, matching
/// the display contract; [`TempoAnalysis`] keeps full precision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TempoReport {
    /// Reference tempo in BPM, rounded to 2 decimal places
    pub bpm_reference: Option<f64>,

    /// Performance tempo in BPM, rounded to 2 decimal places
    pub bpm_performance: Option<f64>,

    /// Stability score, rounded to 3 decimal places
    pub bpm_stability: f64,

    /// Discrete confidence label
    pub confidence: Confidence,
}

/// Round to a fixed number of decimal places (display only)
fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}
