//! Configuration loading.
//!
//! Reads `config.toml` from the campus config directory. Every key is
//! optional; a missing or empty file yields the defaults.

use crate::paths::CampusPaths;
use crate::storage::{AtomicTomlError, AtomicTomlFile};
use campus_core::config::CampusConfig;
use campus_core::error::{CampusError, Result};

/// Loads and saves [`CampusConfig`].
#[derive(Debug, Clone)]
pub struct ConfigService {
    file: AtomicTomlFile<CampusConfig>,
}

impl ConfigService {
    pub fn new(paths: &CampusPaths) -> Self {
        Self {
            file: AtomicTomlFile::new(paths.config_file()),
        }
    }

    /// Loads the configuration.
    ///
    /// # Errors
    ///
    /// Returns `CampusError::Config` if the file exists but cannot be read
    /// or parsed.
    pub fn load(&self) -> Result<CampusConfig> {
        match self.file.load() {
            Ok(Some(config)) => {
                tracing::debug!("[ConfigService] Loaded {:?}", self.file.path());
                Ok(config)
            }
            Ok(None) => {
                tracing::debug!(
                    "[ConfigService] No config at {:?}, using defaults",
                    self.file.path()
                );
                Ok(CampusConfig::default())
            }
            Err(e) => Err(config_error(e)),
        }
    }

    /// Writes the configuration, replacing the file.
    pub fn save(&self, config: &CampusConfig) -> Result<()> {
        self.file.save(config).map_err(config_error)
    }
}

fn config_error(err: AtomicTomlError) -> CampusError {
    CampusError::config(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_config_yields_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let service = ConfigService::new(&CampusPaths::at(temp_dir.path()));

        assert_eq!(service.load().unwrap(), CampusConfig::default());
    }

    #[test]
    fn test_save_then_load() {
        let temp_dir = TempDir::new().unwrap();
        let service = ConfigService::new(&CampusPaths::at(temp_dir.path()));

        let mut config = CampusConfig::default();
        config.log_level = "debug".to_string();
        config.routes.protected.push("/learning".to_string());
        service.save(&config).unwrap();

        assert_eq!(service.load().unwrap(), config);
    }

    #[test]
    fn test_malformed_config_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let paths = CampusPaths::at(temp_dir.path());
        std::fs::create_dir_all(paths.config_dir()).unwrap();
        std::fs::write(paths.config_file(), "min_password_length = \"six\"").unwrap();

        let err = ConfigService::new(&paths).load().unwrap_err();
        assert!(matches!(err, CampusError::Config(_)));
    }
}
