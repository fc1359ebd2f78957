use crate::config::RouteConfig;
use crate::session::SessionState;

/// Why a navigation was redirected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectReason {
    /// Protected page requested without a signed-in user
    NotAuthenticated,
    /// Signed-in user has not completed their profile yet
    ProfileIncomplete,
    /// Profile setup requested by a user who already has a profile
    ProfileAlreadyComplete,
}

/// Outcome of evaluating a navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// The requested page may render
    Render,
    /// The session is still resolving; show a neutral waiting state
    Wait,
    /// Navigate to `to` instead, replacing the requested entry
    Redirect { to: String, reason: RedirectReason },
    /// The profile could not be loaded; show a retryable error
    Unavailable { message: String },
}

impl GuardDecision {
    pub fn is_redirect(&self) -> bool {
        matches!(self, Self::Redirect { .. })
    }

    pub fn redirect_target(&self) -> Option<&str> {
        match self {
            Self::Redirect { to, .. } => Some(to),
            _ => None,
        }
    }
}

/// Strips query string, fragment and trailing slashes from a path.
pub fn normalize_path(path: &str) -> &str {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() { "/" } else { trimmed }
}

/// Enforces the portal's two navigation policies.
///
/// - Protected routes send anonymous visitors to the login route.
/// - Signed-in users without a profile are sent to profile setup from every
///   route except login and profile setup itself.
///
/// No decision is taken while the session is still loading.
#[derive(Debug, Clone, Default)]
pub struct RouteGuard {
    routes: RouteConfig,
}

impl RouteGuard {
    pub fn new(routes: RouteConfig) -> Self {
        Self { routes }
    }

    pub fn routes(&self) -> &RouteConfig {
        &self.routes
    }

    pub fn is_protected(&self, path: &str) -> bool {
        let path = normalize_path(path);
        self.routes
            .protected
            .iter()
            .any(|protected| normalize_path(protected) == path)
    }

    /// Login and profile setup are never forced to profile setup.
    pub fn is_exempt(&self, path: &str) -> bool {
        let path = normalize_path(path);
        path == normalize_path(&self.routes.login) || path == normalize_path(&self.routes.profile_setup)
    }

    /// Decides what happens when `path` is requested in `state`.
    pub fn evaluate(&self, state: &SessionState, path: &str) -> GuardDecision {
        let path = normalize_path(path);

        if state.loading || state.is_resolving_profile() {
            return GuardDecision::Wait;
        }

        let Some(identity) = state.identity.as_ref() else {
            if self.is_protected(path) {
                tracing::debug!("[RouteGuard] {} requires sign-in", path);
                return self.redirect(&self.routes.login, RedirectReason::NotAuthenticated);
            }
            return GuardDecision::Render;
        };

        if state.profile.is_none() {
            if path == normalize_path(&self.routes.login) {
                return GuardDecision::Render;
            }
            // A stored profile may exist behind a failed fetch; the setup form must not replace it.
            if let Some(message) = state.profile_error() {
                return GuardDecision::Unavailable {
                    message: message.to_string(),
                };
            }
            if self.is_exempt(path) {
                return GuardDecision::Render;
            }
            tracing::debug!(
                "[RouteGuard] uid={} has no profile, leaving {}",
                identity.uid,
                path
            );
            return self.redirect(&self.routes.profile_setup, RedirectReason::ProfileIncomplete);
        }

        if path == normalize_path(&self.routes.profile_setup) {
            return self.redirect(&self.routes.home, RedirectReason::ProfileAlreadyComplete);
        }

        GuardDecision::Render
    }

    fn redirect(&self, to: &str, reason: RedirectReason) -> GuardDecision {
        GuardDecision::Redirect {
            to: to.to_string(),
            reason,
        }
    }
}
