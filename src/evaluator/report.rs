//! The immutable result of one evaluation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::align::Alignment;
use crate::lisp::LispSummary;
use crate::metrics::{MetricKind, MetricResult};

/// Everything computed for one reference / transcript pair.
///
/// Built once by [`Evaluator::evaluate`](crate::evaluator::Evaluator::evaluate);
/// a new evaluation produces a new report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub reference: String,
    pub transcript: String,
    /// Weighted score in `[min_score, 100]`.
    pub global_score: f64,
    pub metrics: Vec<MetricResult>,
    pub alignment: Alignment,
    pub lisp: LispSummary,
    pub timestamp: DateTime<Utc>,
}

impl EvaluationReport {
    /// Similarity value (`0..=1`) of one metric.
    pub fn metric(&self, kind: MetricKind) -> Option<f64> {
        self.metrics.iter().find(|m| m.kind == kind).map(|m| m.value)
    }
}
