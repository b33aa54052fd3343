//! Sibilant lisp heuristic.
//!
//! The analyzer works on text only: recognizer spellings of sibilant words
//! plus optional recognizer confidences. It is an orthographic proxy for a
//! speech pattern that really needs acoustic analysis, so treat its output as
//! a hint for a human reviewer, never as a diagnosis.
//!
//! * [`LispAnalyzer`] — scans words and scores the four [`LispType`]s.
//! * [`LispSummary`] — detections, per-word candidates, total penalty and a
//!   human-readable summary.
//! * [`count_patterns`] — raw sibilant pattern counts.

pub mod analyzer;
pub mod patterns;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use analyzer::{
    LispAnalyzer, LispCandidate, LispDetection, LispSummary, MAX_CATEGORY_PENALTY, MAX_SEVERITY,
};
pub use patterns::{count_patterns, LispType, SibilantSound, SIBILANT_PATTERNS};
