//! Configuration management with layered hierarchy

use miette::Diagnostic;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::profile::SchemaProfile;
use crate::core::source::is_blank_yaml;

/// Name of the per-directory config file
pub const LOCAL_CONFIG_FILE: &str = ".rationale.yaml";

/// Wizard configuration with layered hierarchy
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Schema profile to emit
    pub profile: Option<SchemaProfile>,

    /// Directory generated documents are written to
    pub output_dir: Option<PathBuf>,

    /// Override for the profile's fixed file name
    pub file_name: Option<String>,
}

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    #[diagnostic(code(rationale::config::io))]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {message}")]
    #[diagnostic(
        code(rationale::config::parse),
        help("Supported keys: profile, output_dir, file_name")
    )]
    Parse { path: String, message: String },
}

impl Config {
    /// Load configuration from all sources, merging in priority order
    ///
    /// 1. Built-in defaults
    /// 2. Global user config (`<config dir>/rationale/config.yaml`)
    /// 3. Local config (`./.rationale.yaml`)
    ///
    /// Command-line flags are applied on top by the caller.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Config::default();

        if let Some(global_path) = Self::global_config_path() {
            if let Some(global) = Self::load_file(&global_path)? {
                config.merge(global);
            }
        }

        if let Some(local) = Self::load_file(Path::new(LOCAL_CONFIG_FILE))? {
            config.merge(local);
        }

        tracing::debug!(?config, "loaded configuration");
        Ok(config)
    }

    /// Load one config file; `None` when it does not exist
    pub fn load_file(path: &Path) -> Result<Option<Self>, ConfigError> {
        if !path.exists() {
            return Ok(None);
        }
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_yaml(&contents)
            .map(Some)
            .map_err(|message| ConfigError::Parse {
                path: path.display().to_string(),
                message,
            })
    }

    fn from_yaml(contents: &str) -> Result<Self, String> {
        if is_blank_yaml(contents) {
            return Ok(Config::default());
        }
        serde_yml::from_str(contents).map_err(|e| e.to_string())
    }

    /// Get the path to the global config file
    fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "rationale")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Merge another config into this one (other takes precedence)
    pub fn merge(&mut self, other: Config) {
        if other.profile.is_some() {
            self.profile = other.profile;
        }
        if other.output_dir.is_some() {
            self.output_dir = other.output_dir;
        }
        if other.file_name.is_some() {
            self.file_name = other.file_name;
        }
    }

    /// The configured profile, defaulting to the hash algorithm profile
    pub fn profile(&self) -> SchemaProfile {
        self.profile.unwrap_or_default()
    }

    /// Where to write the generated document for the configured profile
    pub fn output_path(&self) -> PathBuf {
        let file_name = self
            .file_name
            .clone()
            .unwrap_or_else(|| self.profile().default_file_name().to_string());
        match &self.output_dir {
            Some(dir) => dir.join(file_name),
            None => PathBuf::from(file_name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_merge_precedence() {
        let mut config = Config {
            profile: Some(SchemaProfile::HashAlgorithm),
            output_dir: Some(PathBuf::from("out")),
            file_name: None,
        };
        config.merge(Config {
            profile: Some(SchemaProfile::Subject),
            ..Default::default()
        });
        assert_eq!(config.profile(), SchemaProfile::Subject);
        assert_eq!(config.output_dir, Some(PathBuf::from("out")));
    }

    #[test]
    fn test_output_path_defaults_to_profile_file_name() {
        let config = Config::default();
        assert_eq!(config.output_path(), PathBuf::from("cip136_metadata.json"));

        let config = Config {
            profile: Some(SchemaProfile::Subject),
            output_dir: Some(PathBuf::from("docs")),
            file_name: None,
        };
        assert_eq!(config.output_path(), PathBuf::from("docs/rationale_metadata.json"));
    }

    #[test]
    fn test_load_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.yaml");
        std::fs::write(&path, "profile: subject\nfile_name: out.json\n").unwrap();

        let config = Config::load_file(&path).unwrap().unwrap();
        assert_eq!(config.profile, Some(SchemaProfile::Subject));
        assert_eq!(config.file_name.as_deref(), Some("out.json"));

        assert!(Config::load_file(&tmp.path().join("missing.yaml")).unwrap().is_none());
    }

    #[test]
    fn test_load_file_rejects_unknown_keys() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.yaml");
        std::fs::write(&path, "editor: vi\n").unwrap();
        assert!(matches!(Config::load_file(&path), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_empty_file_is_default() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.yaml");
        std::fs::write(&path, "\n").unwrap();
        assert_eq!(Config::load_file(&path).unwrap(), Some(Config::default()));
    }

    #[test]
    fn test_comment_only_file_is_default() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.yaml");
        std::fs::write(&path, "# profile: subject\n").unwrap();
        assert_eq!(Config::load_file(&path).unwrap(), Some(Config::default()));
    }
}
