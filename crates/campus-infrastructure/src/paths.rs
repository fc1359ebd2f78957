//! Unified path management for campus configuration and data files.

use campus_core::CampusError;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable that relocates every campus directory under one root.
pub const CAMPUS_HOME_ENV: &str = "CAMPUS_HOME";

const APP_DIR: &str = "campus";

/// Errors that can occur during path resolution.
#[derive(Debug, Error)]
pub enum PathError {
    /// Platform config or data directory could not be determined.
    #[error("cannot determine the {0} directory for this platform")]
    DirNotFound(&'static str),
}

impl From<PathError> for CampusError {
    fn from(err: PathError) -> Self {
        CampusError::config(err.to_string())
    }
}

/// Resolved campus directories.
///
/// # Directory Structure
///
/// ```text
/// <config_dir>/                # ~/.config/campus, or $CAMPUS_HOME/config
/// ├── config.toml              # Application configuration
/// └── logs/                    # Rolling log files
///     └── campus.log.YYYY-MM-DD
///
/// <data_dir>/                  # ~/.local/share/campus, or $CAMPUS_HOME/data
/// ├── accounts.toml            # Local credential service accounts
/// ├── session.toml             # Signed-in account
/// └── users/                   # One profile document per uid
///     └── <uid>.toml
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CampusPaths {
    config_dir: PathBuf,
    data_dir: PathBuf,
}

impl CampusPaths {
    /// Resolves directories from `CAMPUS_HOME`, falling back to the
    /// platform's config and data directories.
    pub fn resolve() -> Result<Self, PathError> {
        if let Some(home) = std::env::var_os(CAMPUS_HOME_ENV).filter(|v| !v.is_empty()) {
            return Ok(Self::at(PathBuf::from(home)));
        }

        let config_dir = dirs::config_dir()
            .ok_or(PathError::DirNotFound("config"))?
            .join(APP_DIR);
        let data_dir = dirs::data_dir()
            .ok_or(PathError::DirNotFound("data"))?
            .join(APP_DIR);

        Ok(Self {
            config_dir,
            data_dir,
        })
    }

    /// Places everything under a single root directory.
    pub fn at(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self {
            config_dir: root.join("config"),
            data_dir: root.join("data"),
        }
    }

    /// Replaces the data directory, keeping the config directory.
    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.config_dir.join("logs")
    }

    pub fn accounts_file(&self) -> PathBuf {
        self.data_dir.join("accounts.toml")
    }

    pub fn session_file(&self) -> PathBuf {
        self.data_dir.join("session.toml")
    }

    /// Directory of the profile collection.
    pub fn profiles_dir(&self) -> PathBuf {
        self.data_dir.join(campus_core::profile::PROFILE_COLLECTION)
    }
}
