//! Pure similarity functions and the [`MetricResult`] value type.
//!
//! Inputs are trimmed and lower-cased before comparison. Character-level
//! metrics delegate to `strsim`; the word-set metric is computed here.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// MetricKind
// ---------------------------------------------------------------------------

/// The three similarity metrics combined into the global score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    Levenshtein,
    Jaccard,
    JaroWinkler,
}

impl MetricKind {
    /// All kinds, in aggregation order.
    pub const ALL: [MetricKind; 3] = [
        MetricKind::Levenshtein,
        MetricKind::Jaccard,
        MetricKind::JaroWinkler,
    ];

    /// Stable snake_case name, matching the serde representation.
    pub fn name(&self) -> &'static str {
        match self {
            MetricKind::Levenshtein => "levenshtein",
            MetricKind::Jaccard => "jaccard",
            MetricKind::JaroWinkler => "jaro_winkler",
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// MetricResult
// ---------------------------------------------------------------------------

/// One computed metric. `value` is always a similarity in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricResult {
    pub kind: MetricKind,
    pub value: f64,
}

impl MetricResult {
    /// Build a result, clamping `value` into `[0, 1]`.
    ///
    /// NaN collapses to `0.0`.
    pub fn new(kind: MetricKind, value: f64) -> Self {
        let value = if value.is_nan() {
            log::warn!("{kind} similarity was NaN; clamping to 0.0");
            0.0
        } else {
            value.clamp(0.0, 1.0)
        };
        Self { kind, value }
    }

    /// The value expressed in percent (`0..=100`).
    pub fn percent(&self) -> f64 {
        self.value * 100.0
    }
}

// ---------------------------------------------------------------------------
// Metrics
// ---------------------------------------------------------------------------

fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Character-level edit similarity: `1 − distance / max(len(a), len(b))`.
///
/// Two empty strings are identical (`1.0`).
pub fn levenshtein(a: &str, b: &str) -> f64 {
    strsim::normalized_levenshtein(&normalize(a), &normalize(b)).clamp(0.0, 1.0)
}

/// Word-set overlap `|A ∩ B| / |A ∪ B|` on lower-cased whitespace tokens.
///
/// Both empty → `1.0`; exactly one empty → `0.0`.
pub fn jaccard(a: &str, b: &str) -> f64 {
    let a = normalize(a);
    let b = normalize(b);
    let set_a: BTreeSet<&str> = a.split_whitespace().collect();
    let set_b: BTreeSet<&str> = b.split_whitespace().collect();

    match (set_a.is_empty(), set_b.is_empty()) {
        (true, true) => 1.0,
        (true, false) | (false, true) => 0.0,
        (false, false) => {
            let intersection = set_a.intersection(&set_b).count();
            let union = set_a.union(&set_b).count();
            intersection as f64 / union as f64
        }
    }
}

/// Jaro similarity with the Winkler prefix boost (prefix ≤ 4, factor 0.1).
///
/// The boost is only applied above a Jaro similarity of 0.7. The common
/// prefix is symmetric, so the boost itself never introduces asymmetry; any
/// difference between `jaro_winkler(a, b)` and `jaro_winkler(b, a)` comes
/// from the greedy Jaro matching and stays well below the 0.1 boost factor.
pub fn jaro_winkler(a: &str, b: &str) -> f64 {
    strsim::jaro_winkler(&normalize(a), &normalize(b)).clamp(0.0, 1.0)
}

/// Compute a single metric.
pub fn similarity(a: &str, b: &str, kind: MetricKind) -> f64 {
    match kind {
        MetricKind::Levenshtein => levenshtein(a, b),
        MetricKind::Jaccard => jaccard(a, b),
        MetricKind::JaroWinkler => jaro_winkler(a, b),
    }
}

/// Compute every metric in [`MetricKind::ALL`] order.
pub fn compute_all(reference: &str, hypothesis: &str) -> Vec<MetricResult> {
    MetricKind::ALL
        .iter()
        .map(|&kind| MetricResult::new(kind, similarity(reference, hypothesis, kind)))
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const SAMPLES: &[&str] = &[
        "",
        "bonjour",
        "Bonjour comment allez vous",
        "bonjour le monde",
        "bonjour monde",
        "les chaussettes de l'archiduchesse",
        "martin",
        "martyn",
        "  espace  ",
        "ça va",
    ];

    #[test]
    fn identical_strings_score_one() {
        for s in SAMPLES {
            for kind in MetricKind::ALL {
                assert_abs_diff_eq!(similarity(s, s, kind), 1.0, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn values_stay_in_unit_range() {
        for a in SAMPLES {
            for b in SAMPLES {
                for kind in MetricKind::ALL {
                    let v = similarity(a, b, kind);
                    assert!((0.0..=1.0).contains(&v), "{kind}({a:?}, {b:?}) = {v}");
                }
            }
        }
    }

    #[test]
    fn levenshtein_and_jaccard_are_symmetric() {
        for a in SAMPLES {
            for b in SAMPLES {
                assert_abs_diff_eq!(levenshtein(a, b), levenshtein(b, a), epsilon = 1e-12);
                assert_abs_diff_eq!(jaccard(a, b), jaccard(b, a), epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn jaro_winkler_asymmetry_is_bounded() {
        for a in SAMPLES {
            for b in SAMPLES {
                let diff = (jaro_winkler(a, b) - jaro_winkler(b, a)).abs();
                assert!(diff <= 0.1, "asymmetry {diff} for {a:?} / {b:?}");
            }
        }
    }

    #[test]
    fn levenshtein_single_edit() {
        // 7 characters, one deletion
        assert_abs_diff_eq!(levenshtein("bonjour", "bonjur"), 1.0 - 1.0 / 7.0, epsilon = 1e-9);
    }

    #[test]
    fn levenshtein_empty_inputs() {
        assert_abs_diff_eq!(levenshtein("", ""), 1.0);
        assert_abs_diff_eq!(levenshtein("", "abc"), 0.0);
    }

    #[test]
    fn levenshtein_ignores_case() {
        assert_abs_diff_eq!(levenshtein("Bonjour", "bonjour"), 1.0);
    }

    #[test]
    fn jaccard_missing_word() {
        assert_abs_diff_eq!(
            jaccard("bonjour le monde", "bonjour monde"),
            2.0 / 3.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn jaccard_empty_rules() {
        assert_abs_diff_eq!(jaccard("", ""), 1.0);
        assert_abs_diff_eq!(jaccard("", "bonjour"), 0.0);
        assert_abs_diff_eq!(jaccard("bonjour", "   "), 0.0);
    }

    #[test]
    fn jaccard_is_a_set_metric() {
        assert_abs_diff_eq!(jaccard("vous vous vous", "VOUS"), 1.0);
    }

    #[test]
    fn jaro_winkler_rewards_common_prefix() {
        let jw = jaro_winkler("martha", "marhta");
        assert_abs_diff_eq!(jw, 0.961, epsilon = 1e-3);
        assert!(jw > strsim::jaro("martha", "marhta"));
    }

    #[test]
    fn jaro_winkler_empty_inputs() {
        assert_abs_diff_eq!(jaro_winkler("", ""), 1.0);
        assert_abs_diff_eq!(jaro_winkler("", "bonjour"), 0.0);
    }

    #[test]
    fn compute_all_returns_every_kind_in_order() {
        let results = compute_all("bonjour", "bonjour");
        let kinds: Vec<_> = results.iter().map(|m| m.kind).collect();
        assert_eq!(kinds, MetricKind::ALL.to_vec());
        assert!(results.iter().all(|m| m.value == 1.0));
    }

    #[test]
    fn metric_result_clamps() {
        assert_eq!(MetricResult::new(MetricKind::Jaccard, 1.5).value, 1.0);
        assert_eq!(MetricResult::new(MetricKind::Jaccard, -0.5).value, 0.0);
        assert_eq!(MetricResult::new(MetricKind::Jaccard, f64::NAN).value, 0.0);
    }
}
