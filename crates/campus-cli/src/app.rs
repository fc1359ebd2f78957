use crate::prompt::PromptProviderFlow;
use anyhow::Result;
use campus_application::Navigator;
use campus_core::config::CampusConfig;
use campus_core::route::RouteGuard;
use campus_core::session::{SessionManager, SessionState, SessionSubscription};
use campus_infrastructure::{CampusPaths, FileProfileStore, LocalCredentialService};
use std::sync::Arc;

/// Services wired for one command invocation.
pub struct App {
    pub config: CampusConfig,
    pub sessions: Arc<SessionManager>,
    _subscription: SessionSubscription,
}

impl App {
    /// Opens the file-backed services and starts following the session.
    pub fn open(paths: &CampusPaths, config: &CampusConfig, provider_flow: PromptProviderFlow) -> Result<Self> {
        let paths = match &config.data_dir {
            Some(data_dir) => paths.clone().with_data_dir(data_dir),
            None => paths.clone(),
        };
        tracing::debug!("[App] Data directory: {}", paths.data_dir().display());

        let credentials = LocalCredentialService::open(
            &paths,
            Arc::new(provider_flow),
            config.min_password_length,
        )?;
        let profiles = FileProfileStore::from_paths(&paths);

        let sessions = Arc::new(SessionManager::new(Arc::new(credentials), Arc::new(profiles)));
        let subscription = sessions.start();

        Ok(Self {
            config: config.clone(),
            sessions,
            _subscription: subscription,
        })
    }

    pub fn navigator(&self) -> Navigator {
        Navigator::new(RouteGuard::new(self.config.routes.clone()))
    }

    /// Session state once the persisted session and its profile are loaded.
    pub async fn resolved(&self) -> SessionState {
        self.sessions.wait_until_resolved().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use campus_application::{LoginFlow, LoginMethod};
    use tempfile::TempDir;

    fn open(paths: &CampusPaths, config: &CampusConfig) -> App {
        App::open(paths, config, PromptProviderFlow::new(None, None)).unwrap()
    }

    #[tokio::test]
    async fn test_session_carries_over_to_next_invocation() {
        let temp_dir = TempDir::new().unwrap();
        let paths = CampusPaths::at(temp_dir.path());
        let config = CampusConfig::default();

        {
            let app = open(&paths, &config);
            LoginFlow::new(app.sessions.clone(), app.navigator())
                .submit(LoginMethod::Register {
                    email: "new@x.com".to_string(),
                    password: "pw123456".to_string(),
                })
                .await
                .unwrap();
        }

        let state = open(&paths, &config).resolved().await;
        assert_eq!(
            state.identity.and_then(|identity| identity.email).as_deref(),
            Some("new@x.com")
        );
        assert!(state.profile.is_none());
    }

    #[tokio::test]
    async fn test_configured_data_dir_is_used() {
        let temp_dir = TempDir::new().unwrap();
        let paths = CampusPaths::at(temp_dir.path().join("home"));
        let config = CampusConfig {
            data_dir: Some(temp_dir.path().join("elsewhere")),
            ..CampusConfig::default()
        };

        let app = open(&paths, &config);
        app.sessions
            .register_with_password("new@x.com", "pw123456")
            .await
            .unwrap();

        assert!(temp_dir.path().join("elsewhere/accounts.toml").exists());
        assert!(!temp_dir.path().join("home/data").exists());
    }
}
