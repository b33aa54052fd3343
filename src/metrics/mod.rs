//! String similarity metrics used to compare a reference with a transcript.
//!
//! | Metric        | Level      | Measures                                  |
//! |---------------|------------|-------------------------------------------|
//! | Levenshtein   | character  | edit similarity `1 − d / max(len)`        |
//! | Jaccard       | word       | overlap of lower-cased word sets          |
//! | Jaro-Winkler  | character  | transpositions + common-prefix boost      |
//!
//! Every value is a similarity in `[0, 1]` where higher is better.
//!
//! # Example
//!
//! ```rust
//! use pronounce_eval::metrics::{similarity, MetricKind};
//!
//! let s = similarity("bonjour le monde", "bonjour monde", MetricKind::Jaccard);
//! assert!((s - 2.0 / 3.0).abs() < 1e-9);
//! ```

pub mod similarity;

pub use similarity::{
    compute_all, jaccard, jaro_winkler, levenshtein, similarity, MetricKind, MetricResult,
};
