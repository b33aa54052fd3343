//! Production-readiness gate.
//!
//! [`assess`] compares an [`EvaluationReport`] against a [`ThresholdConfig`]
//! and classifies the result:
//!
//! | Passed criteria | Classification        |
//! |-----------------|-----------------------|
//! | all             | `Ready`               |
//! | ≥ 80 %          | `MinorImprovements`   |
//! | fewer           | `NotReady`            |
//!
//! Metric criteria are compared in percent (`metric × 100`), the global
//! score as-is, and the lisp criterion on the 0–5 severity scale.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::EvalError;
use crate::evaluator::EvaluationReport;
use crate::metrics::MetricKind;

// ---------------------------------------------------------------------------
// Criterion / Comparator / Role
// ---------------------------------------------------------------------------

/// A value of the report that can be gated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Criterion {
    GlobalScore,
    Levenshtein,
    Jaccard,
    JaroWinkler,
    LispSeverity,
}

impl Criterion {
    pub fn name(&self) -> &'static str {
        match self {
            Criterion::GlobalScore => "global_score",
            Criterion::Levenshtein => "levenshtein",
            Criterion::Jaccard => "jaccard",
            Criterion::JaroWinkler => "jaro_winkler",
            Criterion::LispSeverity => "lisp_severity",
        }
    }

    /// Inclusive range a threshold for this criterion must lie in.
    pub fn valid_range(&self) -> (f64, f64) {
        match self {
            Criterion::LispSeverity => (0.0, 5.0),
            _ => (0.0, 100.0),
        }
    }

    /// The report value this criterion gates.
    pub fn actual(&self, report: &EvaluationReport) -> f64 {
        let metric = |kind: MetricKind| report.metric(kind).map_or(0.0, |v| v * 100.0);
        match self {
            Criterion::GlobalScore => report.global_score,
            Criterion::Levenshtein => metric(MetricKind::Levenshtein),
            Criterion::Jaccard => metric(MetricKind::Jaccard),
            Criterion::JaroWinkler => metric(MetricKind::JaroWinkler),
            Criterion::LispSeverity => report.lisp.severity,
        }
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How the actual value is compared with the threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Comparator {
    /// `actual >= threshold` (accuracy-style values).
    #[serde(rename = ">=")]
    AtLeast,
    /// `actual <= threshold` (penalty-style values).
    #[serde(rename = "<=")]
    AtMost,
}

impl Comparator {
    pub fn passes(&self, actual: f64, threshold: f64) -> bool {
        match self {
            Comparator::AtLeast => actual >= threshold,
            Comparator::AtMost => actual <= threshold,
        }
    }
}

/// Importance of a criterion. Reported alongside the outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Blocker,
    Recommended,
}

// ---------------------------------------------------------------------------
// ThresholdConfig
// ---------------------------------------------------------------------------

/// One threshold table entry. Every field is required.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Threshold {
    pub comparator: Comparator,
    pub value: f64,
    pub role: Role,
}

impl Threshold {
    pub fn at_least(value: f64) -> Self {
        Self {
            comparator: Comparator::AtLeast,
            value,
            role: Role::Blocker,
        }
    }

    pub fn at_most(value: f64) -> Self {
        Self {
            comparator: Comparator::AtMost,
            value,
            role: Role::Blocker,
        }
    }
}

/// Immutable criterion → threshold table.
///
/// A table is non-empty and every value lies in its criterion's range;
/// construction and deserialization both reject anything else, so
/// [`assess`] only ever sees a valid table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<Criterion, Threshold>",
    into = "BTreeMap<Criterion, Threshold>"
)]
pub struct ThresholdConfig {
    criteria: BTreeMap<Criterion, Threshold>,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            criteria: BTreeMap::from([
                (Criterion::GlobalScore, Threshold::at_least(85.0)),
                (Criterion::Levenshtein, Threshold::at_least(80.0)),
                (Criterion::Jaccard, Threshold::at_least(75.0)),
                (Criterion::JaroWinkler, Threshold::at_least(80.0)),
                (Criterion::LispSeverity, Threshold::at_most(3.0)),
            ]),
        }
    }
}

impl TryFrom<BTreeMap<Criterion, Threshold>> for ThresholdConfig {
    type Error = EvalError;

    fn try_from(criteria: BTreeMap<Criterion, Threshold>) -> Result<Self, Self::Error> {
        let config = Self { criteria };
        config.validate()?;
        Ok(config)
    }
}

impl From<ThresholdConfig> for BTreeMap<Criterion, Threshold> {
    fn from(config: ThresholdConfig) -> Self {
        config.criteria
    }
}

impl ThresholdConfig {
    /// Build a table from `(criterion, threshold)` pairs.
    ///
    /// # Errors
    ///
    /// [`EvalError::EmptyThresholds`] or [`EvalError::InvalidThreshold`].
    pub fn new(
        criteria: impl IntoIterator<Item = (Criterion, Threshold)>,
    ) -> Result<Self, EvalError> {
        Self::try_from(criteria.into_iter().collect::<BTreeMap<_, _>>())
    }

    /// Return a copy with `criterion` set to `threshold`.
    ///
    /// # Errors
    ///
    /// [`EvalError::InvalidThreshold`] when `threshold` is out of range.
    pub fn with(mut self, criterion: Criterion, threshold: Threshold) -> Result<Self, EvalError> {
        self.criteria.insert(criterion, threshold);
        self.validate()?;
        Ok(self)
    }

    pub fn get(&self, criterion: Criterion) -> Option<&Threshold> {
        self.criteria.get(&criterion)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Criterion, &Threshold)> {
        self.criteria.iter()
    }

    pub fn len(&self) -> usize {
        self.criteria.len()
    }

    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }

    /// Reject an empty table and thresholds outside the criterion's range.
    pub fn validate(&self) -> Result<(), EvalError> {
        if self.criteria.is_empty() {
            return Err(EvalError::EmptyThresholds);
        }
        for (&criterion, threshold) in &self.criteria {
            let (lo, hi) = criterion.valid_range();
            if !threshold.value.is_finite() || threshold.value < lo || threshold.value > hi {
                return Err(EvalError::InvalidThreshold {
                    criterion,
                    reason: format!("value {} outside {lo}..={hi}", threshold.value),
                });
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Verdict
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    Ready,
    MinorImprovements,
    NotReady,
}

impl Classification {
    pub fn label(&self) -> &'static str {
        match self {
            Classification::Ready => "production ready",
            Classification::MinorImprovements => "needs minor improvements",
            Classification::NotReady => "not production ready",
        }
    }

    fn from_counts(passed: usize, total: usize) -> Self {
        if passed == total {
            Classification::Ready
        } else if passed * 5 >= total * 4 {
            Classification::MinorImprovements
        } else {
            Classification::NotReady
        }
    }
}

/// Outcome of one criterion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriterionOutcome {
    pub criterion: Criterion,
    pub comparator: Comparator,
    pub threshold: f64,
    pub actual: f64,
    pub role: Role,
    pub passed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadinessVerdict {
    pub per_criterion: Vec<CriterionOutcome>,
    pub passed_count: usize,
    pub total_count: usize,
    pub classification: Classification,
}

impl ReadinessVerdict {
    /// Blocker criteria that did not pass.
    pub fn failed_blockers(&self) -> Vec<Criterion> {
        self.per_criterion
            .iter()
            .filter(|o| !o.passed && o.role == Role::Blocker)
            .map(|o| o.criterion)
            .collect()
    }
}

/// Gate `report` against `config`.
///
/// Pure: the same inputs always give the same verdict.
pub fn assess(report: &EvaluationReport, config: &ThresholdConfig) -> ReadinessVerdict {
    let per_criterion: Vec<CriterionOutcome> = config
        .iter()
        .map(|(&criterion, threshold)| {
            let actual = criterion.actual(report);
            CriterionOutcome {
                criterion,
                comparator: threshold.comparator,
                threshold: threshold.value,
                actual,
                role: threshold.role,
                passed: threshold.comparator.passes(actual, threshold.value),
            }
        })
        .collect();

    let passed_count = per_criterion.iter().filter(|o| o.passed).count();
    let total_count = per_criterion.len();
    let classification = Classification::from_counts(passed_count, total_count);

    log::info!(
        "readiness: {} ({passed_count}/{total_count} criteria met)",
        classification.label()
    );

    ReadinessVerdict {
        per_criterion,
        passed_count,
        total_count,
        classification,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
