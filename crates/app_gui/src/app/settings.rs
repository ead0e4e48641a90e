//! User settings stored as settings.json in the config directory.

use history_core::FormFactor;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const SETTINGS_FILE: &str = "settings.json";
pub const DEFAULT_HISTORY_FILE: &str = "history.json";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// History JSON to show; defaults to `history.json` in the data directory.
    pub history_file: Option<PathBuf>,
    /// Fixed gallery layout. Follows the window width when unset.
    pub form_factor: Option<FormFactor>,
}

impl Settings {
    /// Missing or unreadable settings fall back to defaults.
    pub fn load(config_dir: &Path) -> Self {
        let path = config_dir.join(SETTINGS_FILE);
        match std::fs::read_to_string(&path) {
            Ok(s) => match serde_json::from_str(&s) {
                Ok(settings) => {
                    debug!(path = %path.display(), "Settings loaded");
                    settings
                }
                Err(e) => {
                    warn!(error = %e, path = %path.display(), "Invalid settings, using defaults");
                    Self::default()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Self::default(),
            Err(e) => {
                warn!(error = %e, path = %path.display(), "Failed to read settings, using defaults");
                Self::default()
            }
        }
    }

    /// The command line wins over the settings file.
    pub fn history_path(&self, cli: Option<PathBuf>, data_dir: &Path) -> PathBuf {
        cli.or_else(|| self.history_file.clone())
            .unwrap_or_else(|| data_dir.join(DEFAULT_HISTORY_FILE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tempfile::tempdir;

    #[test]
    fn missing_settings_are_default() {
        let dir = tempdir().unwrap();
        assert_eq!(Settings::load(dir.path()), Settings::default());
    }

    #[test]
    fn partial_settings_fill_defaults() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join(SETTINGS_FILE), r#"{"form_factor":"wide"}"#).unwrap();
        let settings = Settings::load(dir.path());
        assert_eq!(settings.form_factor, Some(FormFactor::Wide));
        assert_eq!(settings.history_file, None);
    }

    #[test]
    fn broken_settings_are_default() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join(SETTINGS_FILE), "not json").unwrap();
        assert_eq!(Settings::load(dir.path()), Settings::default());
    }

    #[rstest]
    #[case(Some("cli.json"), Some("configured.json"), "cli.json")]
    #[case(None, Some("configured.json"), "configured.json")]
    #[case(None, None, "data/history.json")]
    fn history_path_precedence(
        #[case] cli: Option<&str>,
        #[case] configured: Option<&str>,
        #[case] expected: &str,
    ) {
        let settings = Settings {
            history_file: configured.map(PathBuf::from),
            form_factor: None,
        };
        let path = settings.history_path(cli.map(PathBuf::from), Path::new("data"));
        assert_eq!(path, PathBuf::from(expected));
    }
}
