//! Configuration file loading.
//!
//! Reads `./notebook.ron` (or the `--config` path) and turns it into the
//! language table and the initial viewer settings.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use cells_core::{LanguageConfig, LanguageError, LanguageRegistry};
use notebook_logging::LogDestination;
use results_core::ResultSettings;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub(crate) const DEFAULT_CONFIG_FILENAME: &str = "notebook.ron";

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
    #[error(transparent)]
    Language(#[from] LanguageError),
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct AppConfig {
    pub append_results: bool,
    pub log: LogDestination,
    pub languages: Vec<LanguageConfig>,
}

impl AppConfig {
    pub(crate) fn result_settings(&self) -> ResultSettings {
        ResultSettings {
            append_results: self.append_results,
        }
    }

    /// Built-in languages plus the configured ones.
    pub(crate) fn language_registry(&self) -> Result<LanguageRegistry, ConfigError> {
        let mut registry = LanguageRegistry::builtin();
        registry.extend_from_config(&self.languages)?;
        Ok(registry)
    }
}

/// A configuration together with the file it came from, if any.
#[derive(Debug)]
pub(crate) struct LoadedConfig {
    pub config: AppConfig,
    pub source: Option<PathBuf>,
}

/// Load `explicit`, or the default file if it exists, or fall back to defaults.
///
/// Runs before logging is set up, so the caller reports `source`.
pub(crate) fn load_config(explicit: Option<&Path>) -> Result<LoadedConfig, ConfigError> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let path = PathBuf::from(DEFAULT_CONFIG_FILENAME);
            if !path.exists() {
                return Ok(LoadedConfig {
                    config: AppConfig::default(),
                    source: None,
                });
            }
            path
        }
    };

    let content = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
        path: path.clone(),
        source,
    })?;
    let config = parse_config(&content).map_err(|source| ConfigError::Parse {
        path: path.clone(),
        source,
    })?;
    Ok(LoadedConfig {
        config,
        source: Some(path),
    })
}

fn parse_config(content: &str) -> Result<AppConfig, ron::error::SpannedError> {
    ron::from_str(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_config_uses_defaults() {
        let config = parse_config("()").unwrap();
        assert_eq!(config, AppConfig::default());
        assert!(!config.result_settings().append_results);
    }

    #[test]
    fn languages_extend_builtin_registry() {
        let config = parse_config(
            r#"(
                append_results: true,
                log: Both,
                languages: [
                    (id: "lua", delimiter: "^--\\s*%%(?P<title>.*)$", line_comment: "--", extensions: ["lua"]),
                ],
            )"#,
        )
        .unwrap();

        assert!(config.result_settings().append_results);
        assert_eq!(config.log, LogDestination::Both);
        let registry = config.language_registry().unwrap();
        assert_eq!(registry.language_for_extension("lua"), Some("lua"));
        assert!(registry.get("python").is_some());
        assert_eq!(
            registry.get("lua").unwrap().delimiter_title("-- %% setup"),
            Some("setup".to_owned())
        );
    }

    #[test]
    fn invalid_delimiter_is_a_language_error() {
        let config = parse_config(
            r##"(languages: [(id: "bad", delimiter: "(", line_comment: "#")])"##,
        )
        .unwrap();
        assert!(matches!(
            config.language_registry(),
            Err(ConfigError::Language(LanguageError::InvalidPattern { .. }))
        ));
    }

    #[test]
    fn explicit_file_is_loaded_and_missing_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "(append_results: true)").unwrap();
        let loaded = load_config(Some(file.path())).unwrap();
        assert!(loaded.config.append_results);
        assert_eq!(loaded.source.as_deref(), Some(file.path()));

        let dir = tempfile::TempDir::new().unwrap();
        let missing = dir.path().join("absent.ron");
        assert!(matches!(
            load_config(Some(&missing)),
            Err(ConfigError::Read { .. })
        ));
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "(append_results: maybe)").unwrap();
        assert!(matches!(
            load_config(Some(file.path())),
            Err(ConfigError::Parse { .. })
        ));
    }
}
