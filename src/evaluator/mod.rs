//! End-to-end evaluation: metrics → alignment → lisp heuristic → global
//! score → readiness verdict.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                       Evaluator                          │
//! │                                                          │
//! │  reference ─┬─▶ metrics::compute_all ──┐                 │
//! │             │                          │                 │
//! │  transcript ┼─▶ WordAligner::align ────┼─▶ ScoreAggregator
//! │             │                          │        │        │
//! │             └─▶ LispAnalyzer ──────────┘        ▼        │
//! │                                         EvaluationReport │
//! │                                                 │        │
//! │                          ThresholdConfig ──▶ assess()    │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! # Quick start
//!
//! ```rust
//! use pronounce_eval::align::{Transcript, WordToken};
//! use pronounce_eval::evaluator::Evaluator;
//!
//! let evaluator = Evaluator::default();
//! let transcript = Transcript::from_words(vec![
//!     WordToken::new(" Bonjour").with_confidence(0.98),
//!     WordToken::new(" monde").with_confidence(0.91),
//! ]);
//!
//! let report = evaluator.evaluate("bonjour le monde", &transcript).unwrap();
//! let verdict = evaluator.assess(&report);
//!
//! assert_eq!(report.alignment.missing_words(), vec!["le"]);
//! println!("{:.1} → {}", report.global_score, verdict.classification.label());
//! ```

pub mod engine;
pub mod report;

// ── Public re-exports ──────────────────────────────────────────────────────

pub use engine::Evaluator;
pub use report::EvaluationReport;
