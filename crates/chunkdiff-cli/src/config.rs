//! Settings file for the command-line tool.
//!
//! Every table is optional; missing keys keep their defaults.
//!
//! ```toml
//! [diff]
//! ignore_trim_whitespace = true
//! max_computation_time_ms = 500
//!
//! [patch]
//! context_lines = 5
//!
//! [fold]
//! context = 3
//! ```

use std::path::{Path, PathBuf};

use chunkdiff_engine::DiffOptions;
use chunkdiff_map::FoldOptions;
use chunkdiff_patch::PatchOptions;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file at {config_path}: {source}")]
    Read {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file at {config_path}: {source}")]
    Parse {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub diff: DiffOptions,
    pub patch: PatchOptions,
    pub fold: FoldOptions,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            diff: DiffOptions::default(),
            patch: PatchOptions::with_context(3),
            fold: FoldOptions::default(),
        }
    }
}

impl Settings {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Self, ConfigError> {
        let config_path = config_path.as_ref();
        let content = std::fs::read_to_string(config_path).map_err(|source| ConfigError::Read {
            config_path: config_path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            config_path: config_path.to_path_buf(),
            source,
        })
    }

    /// Settings from `path`, or the defaults when no file was given.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load_from_path(path),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_without_file() {
        let settings = Settings::load(None).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.patch.context_lines, 3);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("chunkdiff.toml");
        std::fs::write(
            &path,
            "[diff]\nignore_trim_whitespace = true\n\n[patch]\ncontext_lines = 5\n",
        )
        .unwrap();

        let settings = Settings::load_from_path(&path).unwrap();
        assert!(settings.diff.ignore_trim_whitespace);
        assert!(settings.diff.compute_char_changes);
        assert_eq!(settings.patch.context_lines, 5);
        assert_eq!(settings.fold, FoldOptions::default());
    }

    #[test]
    fn toml_round_trip() {
        let mut settings = Settings::default();
        settings.diff.max_computation_time_ms = 250;
        settings.fold.min_hidden = 10;

        let text = toml::to_string(&settings).unwrap();
        let back: Settings = toml::from_str(&text).unwrap();
        assert_eq!(back, settings);
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = TempDir::new().unwrap();
        let err = Settings::load_from_path(dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn bad_toml_is_a_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[patch]\ncontext_lines = \"many\"\n").unwrap();
        let err = Settings::load_from_path(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("bad.toml"));
    }
}
