//! Pronunciation evaluation engine.
//!
//! Compares a recognized transcript with the expected reference text and
//! produces similarity metrics, word-level alignment diagnostics, a
//! text-level sibilant lisp heuristic, a weighted global score and a
//! production-readiness verdict.
//!
//! Speech recognition, audio handling and report rendering are left to the
//! caller: the engine consumes an already-recognized [`align::Transcript`].
//!
//! # Modules
//!
//! * [`metrics`] — Levenshtein, Jaccard and Jaro-Winkler similarity.
//! * [`align`] — recognizer word tokens and the LCS word aligner.
//! * [`lisp`] — sibilant pattern analysis.
//! * [`scoring`] — global score aggregation and the readiness gate.
//! * [`evaluator`] — the end-to-end [`evaluator::Evaluator`].
//! * [`config`] — TOML-backed settings.

pub mod align;
pub mod config;
pub mod error;
pub mod evaluator;
pub mod lisp;
pub mod metrics;
pub mod scoring;

pub use error::EvalError;
pub use evaluator::{EvaluationReport, Evaluator};
