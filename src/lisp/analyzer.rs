//! Deterministic lisp heuristic over sibilant-bearing words.
//!
//! This is a text-level proxy. It never looks at audio; it looks at how the
//! recognizer *spelled* sibilant words and, when available, how confident
//! the recognizer was about them. A category is only reported when the text
//! contains evidence for it, so identical inputs always give identical
//! results.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use serde::{Deserialize, Serialize};

use crate::align::tokens::{normalize_word, WordToken};
use crate::config::LispConfig;
use crate::lisp::patterns::{count_patterns, sounds_in, LispType, SibilantSound};

/// Per-category penalty cap, in score points.
pub const MAX_CATEGORY_PENALTY: f64 = 15.0;
/// Upper bound of the severity scale.
pub const MAX_SEVERITY: f64 = 5.0;

const SEVERITY_FACTOR: f64 = 0.8;
const SIBILANT_FACTOR: f64 = 0.3;
const DENSITY_FACTOR: f64 = 0.2;

const INTERDENTAL_BONUS: f64 = 2.0;
const LATERAL_BONUS: f64 = 1.5;
const LOW_CONFIDENCE_SCALE: f64 = 5.0;
/// Candidates at or below this severity are dropped.
const CANDIDATE_FLOOR: f64 = 0.5;

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// One detected lisp category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LispDetection {
    #[serde(rename = "type")]
    pub lisp_type: LispType,
    /// Severity on the 0–5 scale, inside the category's range.
    pub severity: f64,
    pub affected_sounds: BTreeSet<SibilantSound>,
    /// Sibilant words that showed evidence for this category.
    pub evidence_words: usize,
    /// Score points this category costs, capped at [`MAX_CATEGORY_PENALTY`].
    pub penalty: f64,
}

/// A single word flagged as a possible lisp realisation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LispCandidate {
    pub word: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<f64>,
    pub confidence: f64,
    pub severity: f64,
    /// Heaviest sibilant sound found in the word.
    pub sound: SibilantSound,
}

/// Aggregated lisp heuristic result.
///
/// This is an orthographic approximation, not a clinical assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LispSummary {
    pub detections: Vec<LispDetection>,
    pub candidates: Vec<LispCandidate>,
    /// Reference words with a sibilant that the transcript does not contain.
    pub missing_sibilants: Vec<String>,
    pub pattern_counts: BTreeMap<String, usize>,
    pub total_patterns: usize,
    /// Sum of category penalties, in score points.
    pub total_penalty: f64,
    pub count: usize,
    /// Mean severity of the detected categories (0 when none).
    pub severity: f64,
    pub summary: String,
}

impl LispSummary {
    /// Summary for a run with the analyzer switched off.
    pub fn disabled() -> Self {
        Self {
            detections: Vec::new(),
            candidates: Vec::new(),
            missing_sibilants: Vec::new(),
            pattern_counts: BTreeMap::new(),
            total_patterns: 0,
            total_penalty: 0.0,
            count: 0,
            severity: 0.0,
            summary: "no lisp detected (analysis disabled)".into(),
        }
    }

    pub fn is_detected(&self) -> bool {
        self.count > 0
    }
}

// ---------------------------------------------------------------------------
// LispAnalyzer
// ---------------------------------------------------------------------------

/// Scans recognized text for sibilant patterns and scores lisp categories.
///
/// # Example
///
/// ```rust
/// use pronounce_eval::lisp::LispAnalyzer;
///
/// let analyzer = LispAnalyzer::default();
/// assert_eq!(analyzer.detect("bonjour comment allez vous").summary, "no lisp detected");
///
/// let summary = analyzer.detect("sthalut les amis");
/// assert_eq!(summary.count, 1);
/// ```
#[derive(Debug, Clone)]
pub struct LispAnalyzer {
    /// Sibilant words recognized below this confidence count as distortion
    /// evidence (default `0.7`).
    pub candidate_confidence: f64,
}

impl Default for LispAnalyzer {
    fn default() -> Self {
        Self::from_config(&LispConfig::default())
    }
}

impl LispAnalyzer {
    pub fn from_config(config: &LispConfig) -> Self {
        Self {
            candidate_confidence: config.candidate_confidence,
        }
    }

    /// Analyse plain text with no confidence information.
    pub fn detect(&self, text: &str) -> LispSummary {
        let words: Vec<WordToken> = text.split_whitespace().map(WordToken::new).collect();
        self.detect_words(&words, &[])
    }

    /// Analyse recognized words; `reference` (normalised words) is only used
    /// to list missing sibilant words.
    ///
    /// Missing confidences are read as `1.0`: absence of a signal is never
    /// turned into evidence.
    pub fn detect_words(&self, words: &[WordToken], reference: &[String]) -> LispSummary {
        let text = words
            .iter()
            .map(|w| w.text.trim())
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase();

        let pattern_counts = count_patterns(&text);
        let total_patterns: usize = pattern_counts.values().sum();

        let mut sibilant_words = 0usize;
        let mut evidence: BTreeMap<LispType, usize> = BTreeMap::new();
        let mut candidates = Vec::new();

        for token in words {
            let word = token.normalized();
            let sounds = sounds_in(&word);
            let Some(&sound) = sounds.iter().max_by(|a, b| a.weight().total_cmp(&b.weight())) else {
                continue;
            };
            sibilant_words += 1;

            let confidence = token.confidence.unwrap_or(1.0);
            for lisp_type in LispType::ALL {
                let marked = lisp_type.profile().markers.iter().any(|m| word.contains(m));
                let unsure = lisp_type == LispType::Distortion && confidence < self.candidate_confidence;
                if marked || unsure {
                    *evidence.entry(lisp_type).or_default() += 1;
                }
            }

            let severity = self.candidate_severity(&word, confidence, sound.weight());
            if severity > CANDIDATE_FLOOR {
                candidates.push(LispCandidate {
                    word: token.text.trim().to_string(),
                    start: token.start,
                    end: token.end,
                    confidence,
                    severity: severity.min(MAX_SEVERITY),
                    sound,
                });
            }
        }

        let detections: Vec<LispDetection> = evidence
            .into_iter()
            .map(|(lisp_type, hits)| {
                score_category(lisp_type, hits, sibilant_words, &text, total_patterns)
            })
            .collect();

        let total_penalty: f64 = detections.iter().map(|d| d.penalty).sum();
        let count = detections.len();
        let severity = if count == 0 {
            0.0
        } else {
            (detections.iter().map(|d| d.severity).sum::<f64>() / count as f64)
                .clamp(0.0, MAX_SEVERITY)
        };

        let missing_sibilants = missing_sibilants(words, reference);
        let summary = summarize(&detections, total_penalty);

        log::debug!(
            "lisp heuristic: {sibilant_words} sibilant words, {total_patterns} patterns, \
             {count} categories, penalty {total_penalty:.2}"
        );

        LispSummary {
            detections,
            candidates,
            missing_sibilants,
            pattern_counts,
            total_patterns,
            total_penalty,
            count,
            severity,
            summary,
        }
    }

    /// Per-word severity: recognizer doubt plus interdental / lateral
    /// spellings, each scaled by the sound weight.
    fn candidate_severity(&self, word: &str, confidence: f64, weight: f64) -> f64 {
        let mut severity = 0.0;
        if confidence < self.candidate_confidence {
            severity += (self.candidate_confidence - confidence) * LOW_CONFIDENCE_SCALE * weight;
        }
        if word.contains("th") {
            severity += INTERDENTAL_BONUS * weight;
        }
        if word.contains("sl") || word.contains("tl") {
            severity += LATERAL_BONUS * weight;
        }
        severity
    }
}

fn score_category(
    lisp_type: LispType,
    hits: usize,
    sibilant_words: usize,
    text: &str,
    total_patterns: usize,
) -> LispDetection {
    let profile = lisp_type.profile();
    let (lo, hi) = profile.severity_range;
    let ratio = (hits as f64 / sibilant_words.max(1) as f64).clamp(0.0, 1.0);
    let severity = (lo + (hi - lo) * ratio).clamp(0.0, MAX_SEVERITY);

    let relevant: usize = profile.affected.iter().map(|s| s.count_in(text)).sum();
    let penalty = (severity * SEVERITY_FACTOR
        + relevant as f64 * SIBILANT_FACTOR
        + total_patterns as f64 * severity * DENSITY_FACTOR)
        .min(MAX_CATEGORY_PENALTY);

    LispDetection {
        lisp_type,
        severity,
        affected_sounds: profile.affected.iter().copied().collect(),
        evidence_words: hits,
        penalty,
    }
}

fn missing_sibilants(words: &[WordToken], reference: &[String]) -> Vec<String> {
    let spoken: HashSet<String> = words.iter().map(WordToken::normalized).collect();
    reference
        .iter()
        .map(|w| normalize_word(w))
        .filter(|w| !sounds_in(w).is_empty() && !spoken.contains(w))
        .collect()
}

fn summarize(detections: &[LispDetection], total_penalty: f64) -> String {
    if detections.is_empty() {
        return "no lisp detected".into();
    }
    let parts: Vec<String> = detections
        .iter()
        .map(|d| format!("{} (severity {:.2})", d.lisp_type, d.severity))
        .collect();
    format!(
        "possible lisp from text heuristic: {}; penalty {:.2} points",
        parts.join(", "),
        total_penalty
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
