//! Command-line entry point — evaluate one recognized transcript.
//!
//! # Usage
//!
//! ```text
//! pronounce-eval <reference text> <transcript>
//! ```
//!
//! `<transcript>` is a path to either
//!
//! * a JSON file as produced by a Whisper-style recognizer: a
//!   `{ "text": …, "words": [...] }` object, a full
//!   `{ "text": …, "segments": [{ "words": [...] }, ...] }` output whose
//!   segment words are concatenated, or a bare word array
//!   (`word` / `start` / `end` / `probability`), or
//! * a plain-text file holding the transcript.
//!
//! # Startup sequence
//!
//! 1. Initialise logging.
//! 2. Load [`EvaluatorConfig`] from disk (default on first run; a file that
//!    does not parse aborts the run).
//! 3. Read the transcript.
//! 4. Evaluate, assess and print report + verdict as JSON on stdout.

use std::path::Path;

use anyhow::{bail, Context, Result};
use pronounce_eval::{
    align::{Transcript, WordToken},
    config::{EvalPaths, EvaluatorConfig},
    Evaluator,
};
use serde::Deserialize;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

fn load_config(path: &Path) -> Result<EvaluatorConfig> {
    EvaluatorConfig::load_from(path)
        .with_context(|| format!("failed to load {}", path.display()))
}

// ---------------------------------------------------------------------------
// Transcript loading
// ---------------------------------------------------------------------------

/// JSON object written by the recognizer. Words sit either at the top level
/// or inside each segment.
#[derive(Debug, Deserialize)]
struct RecognizerOutput {
    text: String,
    #[serde(default)]
    words: Vec<WordToken>,
    #[serde(default)]
    segments: Vec<RecognizerSegment>,
}

#[derive(Debug, Deserialize)]
struct RecognizerSegment {
    #[serde(default)]
    words: Vec<WordToken>,
}

impl From<RecognizerOutput> for Transcript {
    fn from(output: RecognizerOutput) -> Self {
        let words = if output.words.is_empty() {
            output.segments.into_iter().flat_map(|s| s.words).collect()
        } else {
            output.words
        };
        Transcript::new(output.text.trim(), words)
    }
}

fn read_transcript(path: &Path) -> Result<Transcript> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read transcript {}", path.display()))?;

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if !is_json {
        return Ok(Transcript::from_text(content.trim()));
    }

    if let Ok(output) = serde_json::from_str::<RecognizerOutput>(&content) {
        return Ok(output.into());
    }
    let words: Vec<WordToken> = serde_json::from_str(&content)
        .with_context(|| format!("{} is neither a transcript nor a word list", path.display()))?;
    Ok(Transcript::from_words(words))
}

// ---------------------------------------------------------------------------
// main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    // 1. Logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let [reference, transcript_path] = args.as_slice() else {
        bail!("usage: pronounce-eval <reference text> <transcript file>");
    };

    // 2. Configuration
    let config = load_config(&EvalPaths::new().settings_file)?;
    let evaluator = Evaluator::new(config).context("invalid evaluator configuration")?;

    // 3. Transcript
    let transcript = read_transcript(Path::new(transcript_path))?;
    log::info!(
        "evaluating {} recognized words against {:?}",
        transcript.tokens().len(),
        reference
    );

    // 4. Evaluate + assess
    let report = evaluator.evaluate(reference, &transcript)?;
    let verdict = evaluator.assess(&report);

    let output = serde_json::json!({
        "report": report,
        "verdict": verdict,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
