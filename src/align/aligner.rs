//! LCS word aligner.
//!
//! [`WordAligner`] aligns normalised reference words against normalised
//! hypothesis words with a longest-common-subsequence table and walks it
//! front to back, so matched pairs always keep reference order. Ties are
//! broken in favour of reporting the reference word as missing first, which
//! makes the output fully deterministic.

use serde::{Deserialize, Serialize};

use crate::align::tokens::{split_words, Transcript, WordToken};
use crate::config::AlignmentConfig;
use crate::error::EvalError;

// ---------------------------------------------------------------------------
// AlignmentEntry
// ---------------------------------------------------------------------------

/// One step of the alignment.
///
/// `LowConfidence` is a qualifier: it always directly follows the `Matched`
/// entry it refers to and does not replace it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AlignmentEntry {
    Matched {
        reference: String,
        hypothesis: String,
        confidence: f64,
    },
    Missing {
        reference: String,
    },
    Added {
        hypothesis: String,
    },
    LowConfidence {
        hypothesis: String,
        confidence: f64,
    },
}

// ---------------------------------------------------------------------------
// Alignment
// ---------------------------------------------------------------------------

/// Ordered alignment entries plus convenience queries.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Alignment {
    entries: Vec<AlignmentEntry>,
}

impl Alignment {
    pub fn entries(&self) -> &[AlignmentEntry] {
        &self.entries
    }

    pub fn matched_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e, AlignmentEntry::Matched { .. }))
            .count()
    }

    /// Reference words with no counterpart in the transcript.
    pub fn missing_words(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter_map(|e| match e {
                AlignmentEntry::Missing { reference } => Some(reference.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Transcript words with no counterpart in the reference.
    pub fn added_words(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter_map(|e| match e {
                AlignmentEntry::Added { hypothesis } => Some(hypothesis.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Matched transcript words flagged below the confidence threshold.
    pub fn low_confidence_words(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter_map(|e| match e {
                AlignmentEntry::LowConfidence { hypothesis, .. } => Some(hypothesis.as_str()),
                _ => None,
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// WordAligner
// ---------------------------------------------------------------------------

/// Aligns reference words with recognized words.
#[derive(Debug, Clone)]
pub struct WordAligner {
    /// Matched words below this confidence are flagged (default `0.5`).
    pub low_confidence_threshold: f64,
    /// Treat a missing confidence as `0.0` instead of `1.0`.
    pub strict_confidence: bool,
}

impl Default for WordAligner {
    fn default() -> Self {
        Self::from_config(&AlignmentConfig::default())
    }
}

impl WordAligner {
    pub fn from_config(config: &AlignmentConfig) -> Self {
        Self {
            low_confidence_threshold: config.low_confidence_threshold,
            strict_confidence: config.strict_confidence,
        }
    }

    /// Align a reference string with a transcript.
    pub fn align_text(&self, reference: &str, transcript: &Transcript) -> Result<Alignment, EvalError> {
        self.align(&split_words(reference), &transcript.tokens())
    }

    /// Align normalised `reference` words with recognized `hypothesis` words.
    ///
    /// Hypothesis tokens that normalise to nothing (bare punctuation) are
    /// ignored. For the remaining words:
    ///
    /// * `matched + missing == reference.len()`
    /// * `matched + added == hypothesis words`
    ///
    /// # Errors
    ///
    /// [`EvalError::InvalidConfidence`] / [`EvalError::InvalidTiming`] for a
    /// malformed token.
    pub fn align(&self, reference: &[String], hypothesis: &[WordToken]) -> Result<Alignment, EvalError> {
        for token in hypothesis {
            token.validate()?;
        }

        let reference: Vec<String> = reference.iter().map(|w| w.to_lowercase()).collect();
        let hypothesis: Vec<(String, &WordToken)> = hypothesis
            .iter()
            .map(|t| (t.normalized(), t))
            .filter(|(norm, _)| !norm.is_empty())
            .collect();

        let m = reference.len();
        let n = hypothesis.len();

        // lcs[i][j] = LCS length of reference[i..] and hypothesis[j..]
        let mut lcs = vec![vec![0usize; n + 1]; m + 1];
        for i in (0..m).rev() {
            for j in (0..n).rev() {
                lcs[i][j] = if reference[i] == hypothesis[j].0 {
                    lcs[i + 1][j + 1] + 1
                } else {
                    lcs[i + 1][j].max(lcs[i][j + 1])
                };
            }
        }

        let mut entries = Vec::with_capacity(m + n);
        let (mut i, mut j) = (0, 0);
        while i < m || j < n {
            if i < m && j < n && reference[i] == hypothesis[j].0 {
                let token = hypothesis[j].1;
                let confidence = token.effective_confidence(self.strict_confidence);
                let text = token.text.trim().to_string();
                entries.push(AlignmentEntry::Matched {
                    reference: reference[i].clone(),
                    hypothesis: text.clone(),
                    confidence,
                });
                if confidence < self.low_confidence_threshold {
                    entries.push(AlignmentEntry::LowConfidence {
                        hypothesis: text,
                        confidence,
                    });
                }
                i += 1;
                j += 1;
            } else if j == n || (i < m && lcs[i + 1][j] >= lcs[i][j + 1]) {
                entries.push(AlignmentEntry::Missing {
                    reference: reference[i].clone(),
                });
                i += 1;
            } else {
                entries.push(AlignmentEntry::Added {
                    hypothesis: hypothesis[j].1.text.trim().to_string(),
                });
                j += 1;
            }
        }

        let alignment = Alignment { entries };
        log::debug!(
            "aligned {m} reference / {n} hypothesis words: matched={}, missing={}, added={}",
            alignment.matched_count(),
            alignment.missing_words().len(),
            alignment.added_words().len()
        );
        Ok(alignment)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
