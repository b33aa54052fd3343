//! Configuration module for the pronunciation evaluator.
//!
//! Provides `EvaluatorConfig` (top-level settings), one sub-config per
//! component, `EvalPaths` for the platform config directory, and TOML
//! persistence via `EvaluatorConfig::load_from` / `EvaluatorConfig::save_to`.

pub mod paths;
pub mod settings;

pub use paths::EvalPaths;
pub use settings::{AlignmentConfig, EvaluatorConfig, LispConfig, ScoringConfig};
