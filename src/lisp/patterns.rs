//! Static sibilant pattern tables.
//!
//! Everything here is orthographic: the tables describe spellings that
//! usually carry a sibilant in French, not measured sounds.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// SibilantSound
// ---------------------------------------------------------------------------

/// Sibilant sound categories tracked by the analyzer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SibilantSound {
    /// /s/ — "s" (outside "sh"), "ç", "ce", "ci", "tion".
    VoicelessAlveolar,
    /// /z/ — "z".
    VoicedAlveolar,
    /// /ʃ/ — "ch", "sh".
    VoicelessPostalveolar,
    /// /ʒ/ — "j", "ge", "gi".
    VoicedPostalveolar,
}

impl SibilantSound {
    pub const ALL: [SibilantSound; 4] = [
        SibilantSound::VoicelessAlveolar,
        SibilantSound::VoicedAlveolar,
        SibilantSound::VoicelessPostalveolar,
        SibilantSound::VoicedPostalveolar,
    ];

    /// Severity weight; harder sibilants weigh more.
    pub fn weight(&self) -> f64 {
        match self {
            SibilantSound::VoicelessAlveolar => 1.0,
            SibilantSound::VoicedAlveolar => 1.1,
            SibilantSound::VoicelessPostalveolar => 1.2,
            SibilantSound::VoicedPostalveolar => 1.3,
        }
    }

    /// Letters or digraphs that mark this sound inside a word.
    fn letters(&self) -> &'static [&'static str] {
        match self {
            SibilantSound::VoicelessAlveolar => &["s", "ç", "ce", "ci", "tion"],
            SibilantSound::VoicedAlveolar => &["z"],
            SibilantSound::VoicelessPostalveolar => &["ch", "sh"],
            SibilantSound::VoicedPostalveolar => &["j"],
        }
    }

    /// Occurrences of this sound's letters in lower-cased `text`.
    pub fn count_in(&self, text: &str) -> usize {
        let hits: usize = self.letters().iter().map(|l| text.matches(l).count()).sum();
        match self {
            // "sh" is postalveolar
            SibilantSound::VoicelessAlveolar => hits.saturating_sub(text.matches("sh").count()),
            _ => hits,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SibilantSound::VoicelessAlveolar => "voiceless_alveolar",
            SibilantSound::VoicedAlveolar => "voiced_alveolar",
            SibilantSound::VoicelessPostalveolar => "voiceless_postalveolar",
            SibilantSound::VoicedPostalveolar => "voiced_postalveolar",
        }
    }
}

impl fmt::Display for SibilantSound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Sibilant sounds present in a lower-cased word, in [`SibilantSound::ALL`]
/// order.
pub fn sounds_in(word: &str) -> Vec<SibilantSound> {
    SibilantSound::ALL
        .iter()
        .copied()
        .filter(|s| s.count_in(word) > 0)
        .collect()
}

// ---------------------------------------------------------------------------
// Trigger patterns
// ---------------------------------------------------------------------------

/// Substrings counted for pattern density.
pub static SIBILANT_PATTERNS: &[&str] = &[
    // alveolar clusters
    "ss", "sc", "sp", "st",
    // postalveolar digraphs
    "ch", "sh",
    // affricate / semivowel triggers
    "tion", "sion", "j", "ge", "gi",
    // palatal triggers
    "c", "ç", "ce", "ci",
];

/// Count every pattern of [`SIBILANT_PATTERNS`] in `text` (lower-cased
/// here). Patterns with zero hits are omitted.
pub fn count_patterns(text: &str) -> BTreeMap<String, usize> {
    let lower = text.to_lowercase();
    SIBILANT_PATTERNS
        .iter()
        .filter_map(|p| {
            let n = lower.matches(p).count();
            (n > 0).then(|| (p.to_string(), n))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Lisp categories
// ---------------------------------------------------------------------------

/// The four lisp categories the analyzer can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LispType {
    /// Tongue between the teeth; sibilants drift towards "th".
    Interdental,
    /// Air escapes over the tongue sides; "sl" / "tl"-like spellings.
    Lateral,
    /// Tongue body raised; /s/ drifts towards /ʃ/ or /ʒ/.
    Palatal,
    /// Unspecified sibilant distortion.
    Distortion,
}

/// Fixed description of one [`LispType`].
pub(crate) struct LispProfile {
    pub affected: &'static [SibilantSound],
    /// Inclusive severity range on the 0–5 scale.
    pub severity_range: (f64, f64),
    /// Spellings inside a sibilant word that count as evidence.
    pub markers: &'static [&'static str],
}

impl LispType {
    pub const ALL: [LispType; 4] = [
        LispType::Interdental,
        LispType::Lateral,
        LispType::Palatal,
        LispType::Distortion,
    ];

    pub(crate) fn profile(&self) -> LispProfile {
        use SibilantSound::*;
        match self {
            LispType::Interdental => LispProfile {
                affected: &[VoicelessAlveolar, VoicedAlveolar],
                severity_range: (1.0, 4.0),
                markers: &["th"],
            },
            LispType::Lateral => LispProfile {
                affected: &[
                    VoicelessAlveolar,
                    VoicedAlveolar,
                    VoicelessPostalveolar,
                    VoicedPostalveolar,
                ],
                severity_range: (1.5, 4.5),
                markers: &["sl", "tl"],
            },
            LispType::Palatal => LispProfile {
                affected: &[VoicelessAlveolar, VoicedAlveolar],
                severity_range: (1.0, 3.5),
                markers: &["sj", "zh", "shy"],
            },
            LispType::Distortion => LispProfile {
                affected: &[
                    VoicelessAlveolar,
                    VoicedAlveolar,
                    VoicelessPostalveolar,
                    VoicedPostalveolar,
                ],
                severity_range: (0.5, 3.0),
                markers: &["sss", "zz"],
            },
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            LispType::Interdental => "interdental",
            LispType::Lateral => "lateral",
            LispType::Palatal => "palatal",
            LispType::Distortion => "distortion",
        }
    }
}

impl fmt::Display for LispType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_patterns_case_insensitively() {
        let counts = count_patterns("Chaussettes");
        assert_eq!(counts.get("ch"), Some(&1));
        assert_eq!(counts.get("ss"), Some(&1));
        assert_eq!(counts.get("st"), None);
        assert!(!counts.contains_key("j"));
    }

    #[test]
    fn empty_text_has_no_patterns() {
        assert!(count_patterns("").is_empty());
    }

    #[test]
    fn detects_sounds_in_word() {
        assert_eq!(sounds_in("bonjour"), vec![SibilantSound::VoicedPostalveolar]);
        assert_eq!(
            sounds_in("chaussures"),
            vec![SibilantSound::VoicelessAlveolar, SibilantSound::VoicelessPostalveolar]
        );
        assert!(sounds_in("monde").is_empty());
    }

    #[test]
    fn soft_c_and_tion_are_alveolar() {
        assert_eq!(sounds_in("garçon"), vec![SibilantSound::VoicelessAlveolar]);
        assert_eq!(sounds_in("ceci"), vec![SibilantSound::VoicelessAlveolar]);
        assert_eq!(sounds_in("nation"), vec![SibilantSound::VoicelessAlveolar]);
        assert_eq!(SibilantSound::VoicelessAlveolar.count_in("ceci"), 2);
        assert!(sounds_in("comme").is_empty());
    }

    #[test]
    fn sh_counts_once() {
        assert_eq!(SibilantSound::VoicelessAlveolar.count_in("shampooing"), 0);
        assert_eq!(SibilantSound::VoicelessPostalveolar.count_in("shampooing"), 1);
        assert_eq!(sounds_in("flash"), vec![SibilantSound::VoicelessPostalveolar]);
        assert_eq!(SibilantSound::VoicelessAlveolar.count_in("sushis"), 2);
    }

    #[test]
    fn counts_cedilla_and_suffix_patterns() {
        let counts = count_patterns("Garçon, nation et passion");
        assert_eq!(counts.get("ç"), Some(&1));
        assert_eq!(counts.get("tion"), Some(&1));
        assert_eq!(counts.get("sion"), Some(&1));
        assert_eq!(counts.get("ss"), Some(&1));
        assert!(!counts.contains_key("c"));
    }

    #[test]
    fn severity_ranges_fit_the_scale() {
        for t in LispType::ALL {
            let (lo, hi) = t.profile().severity_range;
            assert!(0.0 <= lo && lo <= hi && hi <= 5.0, "{t}");
        }
    }
}
