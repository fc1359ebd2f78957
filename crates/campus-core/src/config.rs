use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Minimum password length accepted at registration.
pub const DEFAULT_MIN_PASSWORD_LENGTH: usize = 6;

/// Route paths the guard needs to know about.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct RouteConfig {
    pub login: String,
    pub profile_setup: String,
    pub home: String,
    /// Routes that require a signed-in user
    pub protected: Vec<String>,
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            login: "/login".to_string(),
            profile_setup: "/profile-setup".to_string(),
            home: "/".to_string(),
            protected: vec!["/profile-setup".to_string()],
        }
    }
}

/// Root of `config.toml`.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct CampusConfig {
    /// Default tracing filter when `RUST_LOG` is unset
    pub log_level: String,
    /// Also write logs to a daily rolling file under the logs directory
    pub log_to_file: bool,
    /// Overrides the platform data directory
    pub data_dir: Option<PathBuf>,
    pub min_password_length: usize,
    pub routes: RouteConfig,
}

impl Default for CampusConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            log_to_file: false,
            data_dir: None,
            min_password_length: DEFAULT_MIN_PASSWORD_LENGTH,
            routes: RouteConfig::default(),
        }
    }
}
