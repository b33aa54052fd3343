//! [`Evaluator`] wires the components together.
//!
//! The evaluator owns nothing mutable. It is `Send + Sync` and can be
//! shared behind an `Arc` by any number of threads; every call to
//! [`Evaluator::evaluate`] is independent.

use crate::align::{split_words, Transcript, WordAligner};
use crate::config::EvaluatorConfig;
use crate::error::EvalError;
use crate::evaluator::report::EvaluationReport;
use crate::lisp::{LispAnalyzer, LispSummary};
use crate::metrics;
use crate::scoring::{self, ReadinessVerdict, ScoreAggregator};

/// Evaluates transcripts against references with a fixed configuration.
#[derive(Debug, Clone)]
pub struct Evaluator {
    config: EvaluatorConfig,
    aligner: WordAligner,
    lisp: LispAnalyzer,
    aggregator: ScoreAggregator,
}

// Compile-time assertion: the evaluator can be shared across threads.
const _: fn() = || {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Evaluator>();
};

impl Default for Evaluator {
    fn default() -> Self {
        let config = EvaluatorConfig::default();
        Self {
            aligner: WordAligner::from_config(&config.alignment),
            lisp: LispAnalyzer::from_config(&config.lisp),
            aggregator: ScoreAggregator::default(),
            config,
        }
    }
}

impl Evaluator {
    /// Build an evaluator, validating `config` first.
    ///
    /// # Errors
    ///
    /// Any [`EvalError`] reported by [`EvaluatorConfig::validate`].
    pub fn new(config: EvaluatorConfig) -> Result<Self, EvalError> {
        config.validate()?;
        let aggregator = ScoreAggregator::new(config.scoring.weights, config.scoring.min_score)?;
        Ok(Self {
            aligner: WordAligner::from_config(&config.alignment),
            lisp: LispAnalyzer::from_config(&config.lisp),
            aggregator,
            config,
        })
    }

    pub fn config(&self) -> &EvaluatorConfig {
        &self.config
    }

    /// Score `transcript` against `reference`.
    ///
    /// Empty input is not an error: metrics and alignment fall back to their
    /// documented values.
    ///
    /// # Errors
    ///
    /// [`EvalError::InvalidConfidence`] / [`EvalError::InvalidTiming`] when
    /// a word token is malformed.
    pub fn evaluate(&self, reference: &str, transcript: &Transcript) -> Result<EvaluationReport, EvalError> {
        transcript.validate()?;

        let reference_words = split_words(reference);
        let tokens = transcript.tokens();

        let metrics = metrics::compute_all(reference, &transcript.text);
        let alignment = self.aligner.align(&reference_words, &tokens)?;
        let lisp = if self.config.lisp.enabled {
            self.lisp.detect_words(&tokens, &reference_words)
        } else {
            LispSummary::disabled()
        };
        let global_score = self.aggregator.aggregate(&metrics, lisp.total_penalty)?;

        log::debug!(
            "evaluated {} reference words: global={global_score:.2} metrics={:?} lisp={}",
            reference_words.len(),
            metrics.iter().map(|m| (m.kind.name(), m.value)).collect::<Vec<_>>(),
            lisp.summary
        );

        Ok(EvaluationReport {
            reference: reference.to_string(),
            transcript: transcript.text.clone(),
            global_score,
            metrics,
            alignment,
            lisp,
            timestamp: chrono::Utc::now(),
        })
    }

    /// Gate `report` against the configured threshold table.
    pub fn assess(&self, report: &EvaluationReport) -> ReadinessVerdict {
        scoring::assess(report, &self.config.thresholds)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::align::{AlignmentEntry, WordToken};
    use crate::metrics::MetricKind;
    use crate::scoring::{Classification, Criterion, Threshold, ThresholdConfig};
    use approx::assert_abs_diff_eq;

    fn evaluate(reference: &str, transcript: &str) -> EvaluationReport {
        Evaluator::default()
            .evaluate(reference, &Transcript::from_text(transcript))
            .expect("evaluate")
    }

    #[test]
    fn identical_sentence_scores_perfectly() {
        let report = evaluate("bonjour comment allez vous", "bonjour comment allez vous");

        assert_eq!(report.metric(MetricKind::Levenshtein), Some(1.0));
        assert_eq!(report.metric(MetricKind::Jaccard), Some(1.0));
        assert_eq!(report.metric(MetricKind::JaroWinkler), Some(1.0));
        assert_eq!(report.lisp.total_penalty, 0.0);
        assert_eq!(report.global_score, 100.0);
        assert!(report.alignment.missing_words().is_empty());
        assert!(report.alignment.added_words().is_empty());
        assert_eq!(
            Evaluator::default().assess(&report).classification,
            Classification::Ready
        );
    }

    #[test]
    fn dropped_word_is_missing() {
        let report = evaluate("bonjour le monde", "bonjour monde");

        assert_eq!(report.alignment.missing_words(), vec!["le"]);
        assert!(report.alignment.added_words().is_empty());
        assert_abs_diff_eq!(
            report.metric(MetricKind::Jaccard).unwrap(),
            2.0 / 3.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn empty_reference_adds_everything() {
        let report = evaluate("", "bonjour");

        assert_eq!(
            report.alignment.entries(),
            &[AlignmentEntry::Added {
                hypothesis: "bonjour".into()
            }]
        );
        assert_eq!(report.metric(MetricKind::Jaccard), Some(0.0));
        assert_eq!(report.global_score, 70.0);
    }

    #[test]
    fn empty_transcript_is_not_an_error() {
        let report = evaluate("bonjour le monde", "");
        assert_eq!(report.alignment.missing_words().len(), 3);
        assert_eq!(report.lisp.missing_sibilants, vec!["bonjour"]);
    }

    #[test]
    fn low_confidence_words_reported() {
        let transcript = Transcript::from_words(vec![
            WordToken::new(" Bonjour").with_confidence(0.95),
            WordToken::new(" le").with_confidence(0.2),
            WordToken::new(" monde").with_confidence(0.9),
        ]);
        let report = Evaluator::default()
            .evaluate("bonjour le monde", &transcript)
            .unwrap();

        assert_eq!(report.alignment.matched_count(), 3);
        assert_eq!(report.alignment.low_confidence_words(), vec!["le"]);
    }

    #[test]
    fn unsure_sibilant_costs_points() {
        let transcript = Transcript::from_words(vec![
            WordToken::new("les").with_confidence(0.2),
            WordToken::new("amis").with_confidence(0.95),
        ]);
        let report = Evaluator::default().evaluate("les amis", &transcript).unwrap();

        assert_eq!(report.lisp.count, 1);
        assert!(report.lisp.total_penalty > 0.0);
        assert!(report.global_score < 100.0);
    }

    #[test]
    fn disabled_lisp_analysis_costs_nothing() {
        let mut config = EvaluatorConfig::default();
        config.lisp.enabled = false;
        let evaluator = Evaluator::new(config).unwrap();

        let report = evaluator
            .evaluate("sthalut", &Transcript::from_text("sthalut"))
            .unwrap();
        assert_eq!(report.lisp.total_penalty, 0.0);
        assert_eq!(report.global_score, 100.0);
    }

    #[test]
    fn invalid_confidence_rejected() {
        let transcript = Transcript::from_words(vec![WordToken::new("bonjour").with_confidence(-0.5)]);
        let err = Evaluator::default().evaluate("bonjour", &transcript).unwrap_err();
        assert!(matches!(err, EvalError::InvalidConfidence { .. }), "{err}");
    }

    #[test]
    fn invalid_config_rejected() {
        let mut config = EvaluatorConfig::default();
        config.scoring.weights.levenshtein = 0.6;
        assert!(Evaluator::new(config).is_err());
    }

    #[test]
    fn near_threshold_score_is_not_ready() {
        let mut config = EvaluatorConfig::default();
        config.thresholds = ThresholdConfig::new([(Criterion::GlobalScore, Threshold::at_least(85.0))])
            .expect("valid table");
        let evaluator = Evaluator::new(config).unwrap();

        let mut report = evaluate("bonjour", "bonjour");
        report.global_score = 84.9;
        assert_ne!(evaluator.assess(&report).classification, Classification::Ready);
    }

    #[test]
    fn report_round_trips_through_json() {
        let transcript = Transcript::from_words(vec![
            WordToken::new("bonjour").with_timing(0.0, 0.4).with_confidence(0.4),
            WordToken::new("chez").with_timing(0.4, 0.7).with_confidence(0.5),
        ]);
        let evaluator = Evaluator::default();
        let report = evaluator.evaluate("bonjour les amis", &transcript).unwrap();
        let verdict = evaluator.assess(&report);

        let json = serde_json::to_string(&report).expect("serialize");
        let back: EvaluationReport = serde_json::from_str(&json).expect("deserialize");
        assert_abs_diff_eq!(back.global_score, report.global_score, epsilon = 0.005);
        assert_eq!(back.alignment.entries().len(), report.alignment.entries().len());
        assert_eq!(back.lisp.summary, report.lisp.summary);
        assert_eq!(back.timestamp, report.timestamp);

        let json = serde_json::to_string(&verdict).expect("serialize");
        let back: scoring::ReadinessVerdict = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back.classification, verdict.classification);
        assert_eq!(back.passed_count, verdict.passed_count);
    }

    #[test]
    fn evaluator_is_shareable_across_threads() {
        let evaluator = Arc::new(Evaluator::default());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let evaluator = Arc::clone(&evaluator);
                std::thread::spawn(move || {
                    evaluator
                        .evaluate("bonjour le monde", &Transcript::from_text("bonjour monde"))
                        .map(|r| r.global_score)
                })
            })
            .collect();

        let scores: Vec<f64> = handles
            .into_iter()
            .map(|h| h.join().expect("join").expect("evaluate"))
            .collect();
        assert!(scores.windows(2).all(|w| w[0] == w[1]));
    }
}
