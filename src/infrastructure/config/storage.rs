//! On-disk config and state files.

use super::app_config::{APP_NAME, APP_ORGANIZATION, APP_QUALIFIER, AppConfig};
use super::state_config::StateConfig;
use directories::ProjectDirs;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

const CONFIG_FILE_NAME: &str = "config.toml";
const STATE_FILE_NAME: &str = "state.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to determine config directory")]
    ConfigDirNotFound,
    #[error("config file not found: {}", .0.display())]
    MissingFile(PathBuf),
    #[error("invalid config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("toml serialization error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Config and state files under one directory.
///
/// Reads never create anything; only the default config and `save_state`
/// write to disk.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    dir: PathBuf,
}

impl ConfigStore {
    /// Uses the platform config directory.
    ///
    /// # Errors
    /// Returns `ConfigError::ConfigDirNotFound` when no home directory is known.
    pub fn locate() -> Result<Self, ConfigError> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| Self::at(dirs.config_dir()))
            .ok_or(ConfigError::ConfigDirNotFound)
    }

    #[must_use]
    pub fn at(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Loads the configuration.
    ///
    /// With an explicit path the file must exist and parse. Without one, the
    /// default file is created on first run and a malformed default file
    /// falls back to defaults.
    ///
    /// # Errors
    /// Returns `ConfigError` for a missing or invalid explicit file, or when
    /// the default file cannot be read or created.
    pub fn load_config(&self, explicit: Option<&Path>) -> Result<AppConfig, ConfigError> {
        if let Some(path) = explicit {
            let content = read_if_exists(path)?
                .ok_or_else(|| ConfigError::MissingFile(path.to_path_buf()))?;
            return toml::from_str(&content).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            });
        }

        let path = self.dir.join(CONFIG_FILE_NAME);
        let Some(content) = read_if_exists(&path)? else {
            info!(path = %path.display(), "Writing default config");
            let config = AppConfig::default();
            self.write(&path, &config)?;
            return Ok(config);
        };

        Ok(toml::from_str(&content).unwrap_or_else(|e| {
            warn!(path = %path.display(), error = %e, "Ignoring malformed config");
            AppConfig::default()
        }))
    }

    /// Loads the state left by the previous run, or an empty one.
    ///
    /// # Errors
    /// Returns `ConfigError::Io` if the file exists but cannot be read.
    pub fn load_state(&self) -> Result<StateConfig, ConfigError> {
        let path = self.dir.join(STATE_FILE_NAME);
        let Some(content) = read_if_exists(&path)? else {
            return Ok(StateConfig::default());
        };

        Ok(toml::from_str(&content).unwrap_or_else(|e| {
            warn!(path = %path.display(), error = %e, "Discarding malformed state");
            StateConfig::default()
        }))
    }

    /// # Errors
    /// Returns `ConfigError` if the directory or file cannot be written.
    pub fn save_state(&self, state: &StateConfig) -> Result<(), ConfigError> {
        self.write(&self.dir.join(STATE_FILE_NAME), state)
    }

    /// Replaces `path` atomically via a temp file in the same directory.
    fn write<T: Serialize>(&self, path: &Path, data: &T) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(data)?;

        fs::create_dir_all(&self.dir)?;
        let mut temp_file = tempfile::NamedTempFile::new_in(&self.dir)?;
        temp_file.write_all(content.as_bytes())?;
        temp_file.persist(path).map_err(|e| e.error)?;

        debug!(path = %path.display(), "Saved");
        Ok(())
    }
}

fn read_if_exists(path: &Path) -> Result<Option<String>, ConfigError> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}
