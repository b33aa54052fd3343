//! Score aggregation and the production-readiness gate.
//!
//! * [`ScoreAggregator`] — weighted sum of the three metrics minus the lisp
//!   penalty, clamped to `[min_score, 100]`.
//! * [`assess`] — compares a report with a [`ThresholdConfig`] and returns a
//!   [`ReadinessVerdict`].
//!
//! # Example
//!
//! ```rust
//! use pronounce_eval::align::Transcript;
//! use pronounce_eval::evaluator::Evaluator;
//! use pronounce_eval::scoring::{assess, Classification, ThresholdConfig};
//!
//! let evaluator = Evaluator::default();
//! let report = evaluator
//!     .evaluate("bonjour comment allez vous", &Transcript::from_text("bonjour comment allez vous"))
//!     .unwrap();
//!
//! let verdict = assess(&report, &ThresholdConfig::default());
//! assert_eq!(verdict.classification, Classification::Ready);
//! ```

pub mod aggregate;
pub mod readiness;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use aggregate::{ScoreAggregator, ScoreWeights};
pub use readiness::{
    assess, Classification, Comparator, Criterion, CriterionOutcome, ReadinessVerdict, Role,
    Threshold, ThresholdConfig,
};
