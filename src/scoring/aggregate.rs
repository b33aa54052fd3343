//! Weighted global score.
//!
//! ```text
//! global = clamp( 100 × (wL·lev + wJ·jac + wW·jw) − lisp_penalty , min_score , 100 )
//! ```

use serde::{Deserialize, Serialize};

use crate::error::EvalError;
use crate::metrics::{MetricKind, MetricResult};

/// Allowed drift of the weight sum from 1.0 (float rounding only).
const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

// ---------------------------------------------------------------------------
// ScoreWeights
// ---------------------------------------------------------------------------

/// Per-metric weights. Must sum to 1.0; never normalised silently.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub levenshtein: f64,
    pub jaccard: f64,
    pub jaro_winkler: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            levenshtein: 0.5,
            jaccard: 0.3,
            jaro_winkler: 0.2,
        }
    }
}

impl ScoreWeights {
    pub fn weight(&self, kind: MetricKind) -> f64 {
        match kind {
            MetricKind::Levenshtein => self.levenshtein,
            MetricKind::Jaccard => self.jaccard,
            MetricKind::JaroWinkler => self.jaro_winkler,
        }
    }

    /// Reject weights outside `[0, 1]` or not summing to 1.0.
    pub fn validate(&self) -> Result<(), EvalError> {
        for kind in MetricKind::ALL {
            let value = self.weight(kind);
            if !(0.0..=1.0).contains(&value) {
                return Err(EvalError::InvalidWeight { kind, value });
            }
        }
        let sum: f64 = MetricKind::ALL.iter().map(|&k| self.weight(k)).sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(EvalError::WeightSum { sum });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// ScoreAggregator
// ---------------------------------------------------------------------------

/// Folds metric results and the lisp penalty into a `0..=100` score.
#[derive(Debug, Clone)]
pub struct ScoreAggregator {
    weights: ScoreWeights,
    min_score: f64,
}

impl ScoreAggregator {
    /// Default score floor.
    pub const DEFAULT_MIN_SCORE: f64 = 70.0;

    /// # Errors
    ///
    /// [`EvalError::InvalidWeight`], [`EvalError::WeightSum`] or
    /// [`EvalError::InvalidScoreFloor`].
    pub fn new(weights: ScoreWeights, min_score: f64) -> Result<Self, EvalError> {
        weights.validate()?;
        if !(0.0..=100.0).contains(&min_score) {
            return Err(EvalError::InvalidScoreFloor(min_score));
        }
        Ok(Self { weights, min_score })
    }

    pub fn weights(&self) -> &ScoreWeights {
        &self.weights
    }

    pub fn min_score(&self) -> f64 {
        self.min_score
    }

    /// Combine `metrics` (one of each kind) and subtract `lisp_penalty`.
    ///
    /// ```
    /// use pronounce_eval::metrics::{MetricKind, MetricResult};
    /// use pronounce_eval::scoring::{ScoreAggregator, ScoreWeights};
    ///
    /// let agg = ScoreAggregator::new(ScoreWeights::default(), 70.0).unwrap();
    /// let metrics = [
    ///     MetricResult::new(MetricKind::Levenshtein, 1.0),
    ///     MetricResult::new(MetricKind::Jaccard, 1.0),
    ///     MetricResult::new(MetricKind::JaroWinkler, 1.0),
    /// ];
    /// assert_eq!(agg.aggregate(&metrics, 0.0).unwrap(), 100.0);
    /// assert_eq!(agg.aggregate(&metrics, 4.5).unwrap(), 95.5);
    /// ```
    ///
    /// # Errors
    ///
    /// [`EvalError::MissingMetric`] when a kind is absent,
    /// [`EvalError::InvalidPenalty`] for a negative or non-finite penalty.
    pub fn aggregate(&self, metrics: &[MetricResult], lisp_penalty: f64) -> Result<f64, EvalError> {
        if !lisp_penalty.is_finite() || lisp_penalty < 0.0 {
            return Err(EvalError::InvalidPenalty(lisp_penalty));
        }

        let mut weighted = 0.0;
        for kind in MetricKind::ALL {
            let metric = metrics
                .iter()
                .find(|m| m.kind == kind)
                .ok_or(EvalError::MissingMetric(kind))?;
            weighted += self.weights.weight(kind) * metric.value.clamp(0.0, 1.0);
        }

        let raw = weighted * 100.0 - lisp_penalty;
        let score = raw.clamp(self.min_score, 100.0);
        if score != raw {
            log::debug!("global score {raw:.2} clamped to {score:.2}");
        }
        Ok(score)
    }
}

impl Default for ScoreAggregator {
    fn default() -> Self {
        Self {
            weights: ScoreWeights::default(),
            min_score: Self::DEFAULT_MIN_SCORE,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
