//! Recognizer output types: [`WordToken`] and [`Transcript`].
//!
//! Both mirror what a Whisper-style recognizer returns (`word`, `start`,
//! `end`, `probability`) and deserialize from that JSON shape.

use serde::{Deserialize, Serialize};

use crate::error::EvalError;

// ---------------------------------------------------------------------------
// WordToken
// ---------------------------------------------------------------------------

/// A single recognized word with optional timing and confidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordToken {
    /// Word text as produced by the recognizer (may carry punctuation and a
    /// leading space).
    #[serde(alias = "word")]
    pub text: String,
    /// Start time in seconds from the beginning of the audio.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<f64>,
    /// End time in seconds from the beginning of the audio.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<f64>,
    /// Recognizer confidence in `[0, 1]`.
    #[serde(default, alias = "probability", skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

impl WordToken {
    /// A token with no timing and no confidence.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            start: None,
            end: None,
            confidence: None,
        }
    }

    /// Builder-style setter for the confidence.
    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = Some(confidence);
        self
    }

    /// Builder-style setter for the timing (seconds).
    pub fn with_timing(mut self, start: f64, end: f64) -> Self {
        self.start = Some(start);
        self.end = Some(end);
        self
    }

    /// Confidence used for scoring.
    ///
    /// A missing confidence counts as `1.0` (well recognized), or `0.0` when
    /// `strict` is set.
    pub fn effective_confidence(&self, strict: bool) -> f64 {
        match self.confidence {
            Some(c) => c,
            None if strict => 0.0,
            None => 1.0,
        }
    }

    /// Lower-cased text with surrounding punctuation removed.
    pub fn normalized(&self) -> String {
        normalize_word(&self.text)
    }

    /// Reject out-of-range confidences and inconsistent timings.
    pub fn validate(&self) -> Result<(), EvalError> {
        if let Some(c) = self.confidence {
            if !(0.0..=1.0).contains(&c) {
                return Err(EvalError::InvalidConfidence {
                    word: self.text.clone(),
                    value: c,
                });
            }
        }

        let bad_time = |t: Option<f64>| t.is_some_and(|t| !t.is_finite() || t < 0.0);
        let inverted = matches!((self.start, self.end), (Some(s), Some(e)) if e < s);
        if bad_time(self.start) || bad_time(self.end) || inverted {
            return Err(EvalError::InvalidTiming {
                word: self.text.clone(),
                start: self.start,
                end: self.end,
            });
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Transcript
// ---------------------------------------------------------------------------

/// Recognizer output: the transcript text plus its word list.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Transcript {
    pub text: String,
    #[serde(default)]
    pub words: Vec<WordToken>,
}

impl Transcript {
    /// A transcript with an explicit word list.
    pub fn new(text: impl Into<String>, words: Vec<WordToken>) -> Self {
        Self {
            text: text.into(),
            words,
        }
    }

    /// A transcript with words split from the text, without timing or
    /// confidence.
    pub fn from_text(text: impl Into<String>) -> Self {
        let text = text.into();
        let words = text.split_whitespace().map(WordToken::new).collect();
        Self { text, words }
    }

    /// Build a transcript from a word list alone; the text is the words
    /// joined by single spaces.
    pub fn from_words(words: Vec<WordToken>) -> Self {
        let text = words
            .iter()
            .map(|w| w.text.trim())
            .filter(|w| !w.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        Self { text, words }
    }

    /// Word tokens to align against. Falls back to splitting the text when
    /// the recognizer supplied no word list.
    pub fn tokens(&self) -> Vec<WordToken> {
        if self.words.is_empty() {
            self.text.split_whitespace().map(WordToken::new).collect()
        } else {
            self.words.clone()
        }
    }

    /// Validate every word token.
    pub fn validate(&self) -> Result<(), EvalError> {
        self.words.iter().try_for_each(WordToken::validate)
    }
}

// ---------------------------------------------------------------------------
// Normalisation helpers
// ---------------------------------------------------------------------------

/// Lower-case `word` and strip leading/trailing punctuation.
///
/// Inner apostrophes and hyphens survive (`"aujourd'hui"`, `"allez-vous"`).
///
/// ```
/// use pronounce_eval::align::normalize_word;
///
/// assert_eq!(normalize_word(" Vous?"), "vous");
/// assert_eq!(normalize_word("aujourd'hui,"), "aujourd'hui");
/// ```
pub fn normalize_word(word: &str) -> String {
    word.trim()
        .trim_matches(|c: char| !c.is_alphanumeric())
        .to_lowercase()
}

/// Split `text` on whitespace into normalised words, dropping tokens that
/// are pure punctuation.
pub fn split_words(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(normalize_word)
        .filter(|w| !w.is_empty())
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
