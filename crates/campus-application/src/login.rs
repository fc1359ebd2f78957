//! Sign-in page flow.

use crate::navigation::{Navigation, Navigator};
use campus_core::error::CampusError;
use campus_core::identity::{Identity, OAuthProvider};
use campus_core::session::{SessionManager, SessionState};
use std::sync::Arc;
use thiserror::Error;

/// The ways the sign-in page can authenticate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginMethod {
    Password { email: String, password: String },
    Register { email: String, password: String },
    Provider(OAuthProvider),
}

impl LoginMethod {
    fn credentials(&self) -> Option<(&str, &str)> {
        match self {
            Self::Password { email, password } | Self::Register { email, password } => {
                Some((email, password))
            }
            Self::Provider(_) => None,
        }
    }
}

/// A completed sign-in, once the session has caught up with it.
#[derive(Debug, Clone)]
pub struct LoginSuccess {
    pub identity: Identity,
    pub state: SessionState,
    /// Where the user lands after signing in
    pub navigation: Navigation,
}

/// A failed sign-in with the message shown under the form.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct LoginFailure {
    pub message: String,
    #[source]
    pub source: CampusError,
}

impl From<CampusError> for LoginFailure {
    fn from(source: CampusError) -> Self {
        Self {
            message: source.user_message(),
            source,
        }
    }
}

/// Drives the sign-in page against a started [`SessionManager`].
pub struct LoginFlow {
    sessions: Arc<SessionManager>,
    navigator: Navigator,
}

impl LoginFlow {
    pub fn new(sessions: Arc<SessionManager>, navigator: Navigator) -> Self {
        Self {
            sessions,
            navigator,
        }
    }

    /// Authenticates, waits for the session to settle on the new identity,
    /// and navigates home (which the guard may turn into profile setup).
    ///
    /// The session manager must have been started, otherwise the wait never
    /// completes.
    pub async fn submit(&self, method: LoginMethod) -> Result<LoginSuccess, LoginFailure> {
        if let Some((email, password)) = method.credentials() {
            if email.trim().is_empty() {
                return Err(CampusError::validation("email", "is required").into());
            }
            if password.is_empty() {
                return Err(CampusError::validation("password", "is required").into());
            }
        }

        let result = match &method {
            LoginMethod::Password { email, password } => {
                self.sessions.login_with_password(email, password).await
            }
            LoginMethod::Register { email, password } => {
                self.sessions.register_with_password(email, password).await
            }
            LoginMethod::Provider(provider) => self.sessions.login_with_provider(*provider).await,
        };
        let identity = result.map_err(|e| {
            tracing::warn!("[LoginFlow] Sign-in failed: {}", e);
            LoginFailure::from(e)
        })?;

        let uid = identity.uid.clone();
        let state = self
            .sessions
            .wait_for(|state| {
                state.identity.as_ref().is_some_and(|current| current.uid == uid)
                    && !state.loading
                    && !state.is_resolving_profile()
            })
            .await;

        let home = self.navigator.guard().routes().home.clone();
        let navigation = self.navigator.navigate(&state, &home)?;

        Ok(LoginSuccess {
            identity,
            state,
            navigation,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::NavigationOutcome;
    use crate::test_support::{StubCredentials, identity, manager, profile};
    use campus_core::error::AuthError;
    use campus_core::profile::ProfileStore;
    use campus_infrastructure::InMemoryProfileStore;

    fn password(email: &str, password: &str) -> LoginMethod {
        LoginMethod::Password {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_login_with_profile_lands_home() {
        let store = InMemoryProfileStore::new();
        store.write_profile("uid-1", &profile()).await.unwrap();
        let credentials = StubCredentials::new().with_account("new@x.com", "pw123456", identity());
        let (sessions, _subscription) = manager(credentials, store);
        let flow = LoginFlow::new(sessions, Navigator::default());

        let success = flow.submit(password("new@x.com", "pw123456")).await.unwrap();

        assert_eq!(success.identity, identity());
        assert_eq!(success.state.profile, Some(profile()));
        assert_eq!(
            success.navigation.outcome,
            NavigationOutcome::Rendered("/".to_string())
        );
    }

    #[tokio::test]
    async fn test_registration_lands_on_profile_setup() {
        let (sessions, _subscription) =
            manager(StubCredentials::new(), InMemoryProfileStore::new());
        let flow = LoginFlow::new(sessions, Navigator::default());

        let success = flow
            .submit(LoginMethod::Register {
                email: "new@x.com".to_string(),
                password: "pw123456".to_string(),
            })
            .await
            .unwrap();

        assert!(success.state.needs_profile_setup());
        assert_eq!(success.navigation.final_path(), "/profile-setup");
    }

    #[tokio::test]
    async fn test_wrong_password_shows_inline_message() {
        let credentials = StubCredentials::new().with_account("new@x.com", "pw123456", identity());
        let (sessions, _subscription) = manager(credentials, InMemoryProfileStore::new());
        let flow = LoginFlow::new(sessions.clone(), Navigator::default());

        let failure = flow.submit(password("new@x.com", "nope")).await.unwrap_err();

        assert_eq!(failure.message, "Invalid email or password.");
        assert_eq!(failure.source, CampusError::Auth(AuthError::InvalidCredentials));
        assert!(sessions.wait_until_resolved().await.identity.is_none());
    }

    #[tokio::test]
    async fn test_empty_fields_never_reach_the_service() {
        let (sessions, _subscription) =
            manager(StubCredentials::new(), InMemoryProfileStore::new());
        let flow = LoginFlow::new(sessions, Navigator::default());

        let failure = flow.submit(password("  ", "pw123456")).await.unwrap_err();
        assert!(matches!(
            failure.source,
            CampusError::Validation { field: "email", .. }
        ));

        let failure = flow.submit(password("new@x.com", "")).await.unwrap_err();
        assert!(matches!(
            failure.source,
            CampusError::Validation { field: "password", .. }
        ));
    }

    #[tokio::test]
    async fn test_abandoned_provider_flow() {
        let (sessions, _subscription) =
            manager(StubCredentials::new(), InMemoryProfileStore::new());
        let flow = LoginFlow::new(sessions, Navigator::default());

        let failure = flow
            .submit(LoginMethod::Provider(OAuthProvider::Github))
            .await
            .unwrap_err();

        assert_eq!(failure.message, "Sign-in with GitHub was cancelled.");
    }

    #[tokio::test]
    async fn test_provider_login() {
        let github = Identity {
            uid: "gh-1".to_string(),
            email: Some("octo@example.com".to_string()),
            display_name: Some("Octo".to_string()),
            provider: Some(OAuthProvider::Github),
        };
        let credentials = StubCredentials::new().with_provider_identity(github.clone());
        let (sessions, _subscription) = manager(credentials, InMemoryProfileStore::new());
        let flow = LoginFlow::new(sessions, Navigator::default());

        let success = flow
            .submit(LoginMethod::Provider(OAuthProvider::Github))
            .await
            .unwrap();

        assert_eq!(success.identity, github);
        assert_eq!(success.navigation.final_path(), "/profile-setup");
    }
}
