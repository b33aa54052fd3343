//! Platform config location resolved with the `dirs` crate.
//!
//! Layout:
//!
//!   Windows: %APPDATA%\pronounce-eval\settings.toml
//!   macOS:   ~/Library/Application Support/pronounce-eval/settings.toml
//!   Linux:   ~/.config/pronounce-eval/settings.toml

use std::path::PathBuf;

/// Resolved configuration paths.
#[derive(Debug, Clone)]
pub struct EvalPaths {
    /// Directory holding `settings.toml`.
    pub config_dir: PathBuf,
    /// Full path to `settings.toml`.
    pub settings_file: PathBuf,
}

impl EvalPaths {
    const APP_NAME: &'static str = "pronounce-eval";

    /// Falls back to the current directory when the platform has no config
    /// directory.
    pub fn new() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(Self::APP_NAME);
        let settings_file = config_dir.join("settings.toml");

        Self {
            config_dir,
            settings_file,
        }
    }
}

impl Default for EvalPaths {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_file_lives_in_config_dir() {
        let paths = EvalPaths::new();
        assert!(paths.config_dir.ends_with("pronounce-eval"));
        assert!(paths
            .settings_file
            .file_name()
            .is_some_and(|n| n == "settings.toml"));
        assert_eq!(paths.settings_file.parent(), Some(paths.config_dir.as_path()));
    }
}
