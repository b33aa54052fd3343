//! Word-level alignment between a reference and a recognized transcript.
//!
//! # Architecture
//!
//! ```text
//! reference: &str ──split + normalise──┐
//!                                      ├──▶ WordAligner::align() ──▶ Alignment
//! Transcript { text, words } ──────────┘        (LCS over words)     [AlignmentEntry]
//! ```
//!
//! # Quick start
//!
//! ```rust
//! use pronounce_eval::align::{Transcript, WordAligner};
//!
//! let aligner = WordAligner::default();
//! let transcript = Transcript::from_text("bonjour monde");
//! let alignment = aligner.align_text("bonjour le monde", &transcript).unwrap();
//!
//! assert_eq!(alignment.missing_words(), vec!["le"]);
//! assert!(alignment.added_words().is_empty());
//! ```

pub mod aligner;
pub mod tokens;

// ── Public re-exports ──────────────────────────────────────────────────────

pub use aligner::{Alignment, AlignmentEntry, WordAligner};
pub use tokens::{normalize_word, split_words, Transcript, WordToken};
