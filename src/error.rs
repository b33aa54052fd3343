//! Error type shared by every component of the evaluation engine.
//!
//! Every variant describes input the caller has to fix: a malformed word
//! token, a broken scoring configuration or an unusable threshold table.
//! Degenerate input such as an empty reference or an empty transcript is
//! *not* an error; the metrics and the aligner define fallback values for it.

use thiserror::Error;

use crate::metrics::MetricKind;
use crate::scoring::Criterion;

// ---------------------------------------------------------------------------
// EvalError
// ---------------------------------------------------------------------------

/// Invalid input rejected at the boundary of the affected component.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    /// A word confidence outside `[0, 1]` (or NaN).
    #[error("invalid confidence {value} for word {word:?} (expected 0.0..=1.0)")]
    InvalidConfidence { word: String, value: f64 },

    /// A word timing that is negative, non-finite or ends before it starts.
    #[error("invalid timing for word {word:?}: start={start:?} end={end:?}")]
    InvalidTiming {
        word: String,
        start: Option<f64>,
        end: Option<f64>,
    },

    /// A single metric weight outside `[0, 1]`.
    #[error("weight for {kind} must lie in 0.0..=1.0 (got {value})")]
    InvalidWeight { kind: MetricKind, value: f64 },

    /// Metric weights that do not sum to exactly 1.0.
    #[error("score weights must sum to 1.0 (got {sum:.6})")]
    WeightSum { sum: f64 },

    /// The aggregator was handed a metric list without this kind.
    #[error("metric {0} missing from aggregation input")]
    MissingMetric(MetricKind),

    /// A lisp penalty that is negative or non-finite.
    #[error("lisp penalty must be finite and non-negative (got {0})")]
    InvalidPenalty(f64),

    /// Score floor outside `[0, 100]`.
    #[error("minimum score must lie in 0..=100 (got {0})")]
    InvalidScoreFloor(f64),

    /// A confidence threshold outside `[0, 1]`.
    #[error("{name} must lie in 0.0..=1.0 (got {value})")]
    InvalidConfidenceThreshold { name: &'static str, value: f64 },

    /// A threshold entry whose value is unusable for its criterion.
    #[error("invalid threshold for {criterion}: {reason}")]
    InvalidThreshold { criterion: Criterion, reason: String },

    /// A threshold table with no criteria at all.
    #[error("threshold table is empty")]
    EmptyThresholds,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confidence_error_names_the_word() {
        let err = EvalError::InvalidConfidence {
            word: "bonjour".into(),
            value: -0.2,
        };
        let msg = err.to_string();
        assert!(msg.contains("bonjour"), "message: {msg}");
        assert!(msg.contains("-0.2"), "message: {msg}");
    }

    #[test]
    fn weight_sum_error_is_informative() {
        let msg = EvalError::WeightSum { sum: 0.9 }.to_string();
        assert!(msg.contains("0.900000"), "message: {msg}");
    }

    #[test]
    fn threshold_error_names_the_criterion() {
        let err = EvalError::InvalidThreshold {
            criterion: Criterion::LispSeverity,
            reason: "value 7 outside 0..=5".into(),
        };
        assert!(err.to_string().contains("lisp_severity"));
    }
}
