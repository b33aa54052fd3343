//! Evaluator settings structs, defaults and TOML persistence.
//!
//! All structs implement `Serialize`, `Deserialize`, `Default` and `Clone`
//! so they can be round-tripped through TOML files and shared across threads.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::error::EvalError;
use crate::scoring::{ScoreAggregator, ScoreWeights, ThresholdConfig};

// ---------------------------------------------------------------------------
// ScoringConfig
// ---------------------------------------------------------------------------

/// Global score settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Floor of the global score after the lisp penalty (0 – 100).
    pub min_score: f64,
    /// Metric weights; must sum to exactly 1.0.
    pub weights: ScoreWeights,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            min_score: ScoreAggregator::DEFAULT_MIN_SCORE,
            weights: ScoreWeights::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// AlignmentConfig
// ---------------------------------------------------------------------------

/// Word aligner settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignmentConfig {
    /// Matched words below this recognizer confidence are flagged
    /// (0.0 – 1.0).
    pub low_confidence_threshold: f64,
    /// Treat words without a confidence as unrecognized (`0.0`) instead of
    /// well recognized (`1.0`).
    pub strict_confidence: bool,
}

impl Default for AlignmentConfig {
    fn default() -> Self {
        Self {
            low_confidence_threshold: 0.5,
            strict_confidence: false,
        }
    }
}

// ---------------------------------------------------------------------------
// LispConfig
// ---------------------------------------------------------------------------

/// Lisp heuristic settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LispConfig {
    /// Run the heuristic at all. When off, the report carries an empty
    /// summary and no penalty.
    pub enabled: bool,
    /// Sibilant words recognized below this confidence are lisp candidates
    /// (0.0 – 1.0).
    pub candidate_confidence: f64,
}

impl Default for LispConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            candidate_confidence: 0.7,
        }
    }
}

// ---------------------------------------------------------------------------
// EvaluatorConfig  (top-level)
// ---------------------------------------------------------------------------

/// Top-level evaluator configuration, serialised as `settings.toml`.
///
/// Sections missing from the file keep their defaults; a `[thresholds]`
/// table present in the file replaces the default table as a whole.
///
/// # Persistence
///
/// ```rust,no_run
/// use pronounce_eval::config::{EvalPaths, EvaluatorConfig};
///
/// // Load (returns Default when file is missing)
/// let config = EvaluatorConfig::load_from(&EvalPaths::new().settings_file).unwrap();
/// config.validate().unwrap();
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvaluatorConfig {
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub alignment: AlignmentConfig,
    #[serde(default)]
    pub lisp: LispConfig,
    #[serde(default)]
    pub thresholds: ThresholdConfig,
}

impl EvaluatorConfig {
    /// Load configuration from `path`, usually
    /// [`EvalPaths::settings_file`](crate::config::EvalPaths::settings_file).
    ///
    /// Returns `Ok(EvaluatorConfig::default())` when the file does not exist;
    /// a file that exists but does not parse is an error.
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Check every section; the first problem found is returned.
    pub fn validate(&self) -> Result<(), EvalError> {
        self.scoring.weights.validate()?;
        if !(0.0..=100.0).contains(&self.scoring.min_score) {
            return Err(EvalError::InvalidScoreFloor(self.scoring.min_score));
        }
        unit_interval("low_confidence_threshold", self.alignment.low_confidence_threshold)?;
        unit_interval("candidate_confidence", self.lisp.candidate_confidence)?;
        self.thresholds.validate()
    }
}

fn unit_interval(name: &'static str, value: f64) -> Result<(), EvalError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(EvalError::InvalidConfidenceThreshold { name, value })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::{Comparator, Criterion, Role, Threshold};
    use tempfile::tempdir;

    /// A default `EvaluatorConfig` survives a TOML round trip unchanged.
    #[test]
    fn round_trip_toml() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("settings.toml");

        let original = EvaluatorConfig::default();
        original.save_to(&path).expect("save");

        let loaded = EvaluatorConfig::load_from(&path).expect("load");
        assert_eq!(original, loaded);
    }

    /// `load_from` on a non-existent path must return `Default` without error.
    #[test]
    fn load_missing_returns_default() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("nonexistent.toml");

        let config = EvaluatorConfig::load_from(&path).expect("should not error");
        assert_eq!(config, EvaluatorConfig::default());
    }

    #[test]
    fn default_values() {
        let cfg = EvaluatorConfig::default();

        assert_eq!(cfg.scoring.min_score, 70.0);
        assert_eq!(cfg.scoring.weights.levenshtein, 0.5);
        assert_eq!(cfg.scoring.weights.jaccard, 0.3);
        assert_eq!(cfg.scoring.weights.jaro_winkler, 0.2);
        assert_eq!(cfg.alignment.low_confidence_threshold, 0.5);
        assert!(!cfg.alignment.strict_confidence);
        assert!(cfg.lisp.enabled);
        assert_eq!(cfg.lisp.candidate_confidence, 0.7);
        assert_eq!(cfg.thresholds.len(), 5);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn round_trip_modified_values() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("nested").join("modified.toml");

        let mut cfg = EvaluatorConfig::default();
        cfg.scoring.min_score = 0.0;
        cfg.alignment.strict_confidence = true;
        cfg.lisp.enabled = false;
        cfg.thresholds = cfg
            .thresholds
            .with(
                Criterion::Jaccard,
                Threshold {
                    comparator: Comparator::AtLeast,
                    value: 60.0,
                    role: Role::Recommended,
                },
            )
            .expect("valid threshold");

        cfg.save_to(&path).expect("save");
        let loaded = EvaluatorConfig::load_from(&path).expect("load");

        assert_eq!(loaded.scoring.min_score, 0.0);
        assert!(loaded.alignment.strict_confidence);
        assert!(!loaded.lisp.enabled);
        let jaccard = loaded.thresholds.get(Criterion::Jaccard).expect("jaccard");
        assert_eq!(jaccard.value, 60.0);
        assert_eq!(jaccard.role, Role::Recommended);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("partial.toml");
        std::fs::write(&path, "[alignment]\nlow_confidence_threshold = 0.6\nstrict_confidence = false\n")
            .expect("write");

        let cfg = EvaluatorConfig::load_from(&path).expect("load");
        assert_eq!(cfg.alignment.low_confidence_threshold, 0.6);
        assert_eq!(cfg.scoring, ScoringConfig::default());
        assert_eq!(cfg.thresholds, ThresholdConfig::default());
    }

    #[test]
    fn threshold_without_comparator_is_rejected() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "[thresholds.global_score]\nvalue = 85.0\nrole = \"blocker\"\n")
            .expect("write");

        assert!(EvaluatorConfig::load_from(&path).is_err());
    }

    #[test]
    fn empty_threshold_table_fails_to_load() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("empty.toml");
        std::fs::write(&path, "[thresholds]\n").expect("write");

        let err = EvaluatorConfig::load_from(&path).unwrap_err();
        assert!(format!("{err:#}").contains("threshold table is empty"), "{err:#}");
    }

    #[test]
    fn out_of_range_threshold_fails_to_load() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("lenient.toml");
        std::fs::write(
            &path,
            "[thresholds.lisp_severity]\ncomparator = \"<=\"\nvalue = 99.0\nrole = \"blocker\"\n",
        )
        .expect("write");

        assert!(EvaluatorConfig::load_from(&path).is_err());
    }

    #[test]
    fn bad_weights_fail_validation() {
        let mut cfg = EvaluatorConfig::default();
        cfg.scoring.weights.jaccard = 0.4;
        assert!(matches!(cfg.validate().unwrap_err(), EvalError::WeightSum { .. }));
    }

    #[test]
    fn bad_confidence_threshold_fails_validation() {
        let mut cfg = EvaluatorConfig::default();
        cfg.alignment.low_confidence_threshold = 1.5;
        assert!(matches!(
            cfg.validate().unwrap_err(),
            EvalError::InvalidConfidenceThreshold { .. }
        ));
    }
}
