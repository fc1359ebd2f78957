//! Navigation through the route guard.
//!
//! A single guard evaluation may redirect to another route that redirects
//! again (an anonymous visitor to profile setup lands on login, a completed
//! profile on profile setup lands on home). [`Navigator`] follows that chain
//! until a page renders.

use campus_core::error::{CampusError, Result};
use campus_core::route::{GuardDecision, RedirectReason, RouteGuard, normalize_path};
use campus_core::session::SessionState;

/// Maximum number of redirects followed for one navigation.
pub const MAX_REDIRECTS: usize = 4;

/// Where a navigation ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationOutcome {
    /// The page at this path renders
    Rendered(String),
    /// The session is still resolving at this path
    Waiting(String),
    /// The profile could not be loaded; the page shows a retryable error
    Unavailable { path: String, message: String },
}

/// Result of following the guard from a requested path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub requested: String,
    /// Each redirect taken, in order
    pub redirects: Vec<(String, RedirectReason)>,
    pub outcome: NavigationOutcome,
}

impl Navigation {
    /// Path the user ends up on.
    pub fn final_path(&self) -> &str {
        match &self.outcome {
            NavigationOutcome::Rendered(path) | NavigationOutcome::Waiting(path) => path,
            NavigationOutcome::Unavailable { path, .. } => path,
        }
    }

    pub fn was_redirected(&self) -> bool {
        !self.redirects.is_empty()
    }
}

/// Follows guard redirects for a session snapshot.
#[derive(Debug, Clone, Default)]
pub struct Navigator {
    guard: RouteGuard,
}

impl Navigator {
    pub fn new(guard: RouteGuard) -> Self {
        Self { guard }
    }

    pub fn guard(&self) -> &RouteGuard {
        &self.guard
    }

    /// Navigates to `path` in `state`.
    ///
    /// # Errors
    ///
    /// Returns `CampusError::StateInvariant` if the redirects revisit a path
    /// or exceed [`MAX_REDIRECTS`]; both mean the route configuration is
    /// inconsistent.
    pub fn navigate(&self, state: &SessionState, path: &str) -> Result<Navigation> {
        let requested = normalize_path(path).to_string();
        let mut current = requested.clone();
        let mut redirects: Vec<(String, RedirectReason)> = Vec::new();

        loop {
            let outcome = match self.guard.evaluate(state, &current) {
                GuardDecision::Render => NavigationOutcome::Rendered(current),
                GuardDecision::Wait => NavigationOutcome::Waiting(current),
                GuardDecision::Unavailable { message } => NavigationOutcome::Unavailable {
                    path: current,
                    message,
                },
                GuardDecision::Redirect { to, reason } => {
                    let to = normalize_path(&to).to_string();
                    let revisited = to == requested || redirects.iter().any(|(p, _)| *p == to);
                    if revisited || redirects.len() >= MAX_REDIRECTS {
                        return Err(CampusError::state_invariant(format!(
                            "redirect loop navigating to {}: {} -> {}",
                            requested,
                            redirects
                                .iter()
                                .map(|(p, _)| p.as_str())
                                .collect::<Vec<_>>()
                                .join(" -> "),
                            to
                        )));
                    }
                    tracing::debug!("[Navigator] {} -> {} ({:?})", current, to, reason);
                    redirects.push((to.clone(), reason));
                    current = to;
                    continue;
                }
            };

            return Ok(Navigation {
                requested,
                redirects,
                outcome,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{identity, profile};
    use campus_core::config::RouteConfig;
    use campus_core::session::ProfileFetch;

    fn resolved(with_identity: bool, with_profile: bool) -> SessionState {
        SessionState {
            identity: with_identity.then(identity),
            profile: with_profile.then(profile),
            loading: false,
            profile_fetch: match (with_identity, with_profile) {
                (false, _) => ProfileFetch::Idle,
                (true, true) => ProfileFetch::Loaded,
                (true, false) => ProfileFetch::Missing,
            },
        }
    }

    #[test]
    fn test_anonymous_visitor_reaches_login() {
        let navigation = Navigator::default()
            .navigate(&resolved(false, false), "/profile-setup")
            .unwrap();

        assert_eq!(
            navigation.redirects,
            vec![("/login".to_string(), RedirectReason::NotAuthenticated)]
        );
        assert_eq!(
            navigation.outcome,
            NavigationOutcome::Rendered("/login".to_string())
        );
    }

    #[test]
    fn test_missing_profile_leads_to_setup() {
        let navigation = Navigator::default()
            .navigate(&resolved(true, false), "/courses?page=2")
            .unwrap();

        assert_eq!(navigation.requested, "/courses");
        assert_eq!(navigation.final_path(), "/profile-setup");
        assert!(navigation.was_redirected());
    }

    #[test]
    fn test_completed_profile_leaves_setup() {
        let navigation = Navigator::default()
            .navigate(&resolved(true, true), "/profile-setup/")
            .unwrap();

        assert_eq!(
            navigation.redirects,
            vec![("/".to_string(), RedirectReason::ProfileAlreadyComplete)]
        );
        assert_eq!(navigation.outcome, NavigationOutcome::Rendered("/".to_string()));
    }

    #[test]
    fn test_waits_while_loading() {
        let navigation = Navigator::default()
            .navigate(&SessionState::initial(), "/courses")
            .unwrap();

        assert_eq!(
            navigation.outcome,
            NavigationOutcome::Waiting("/courses".to_string())
        );
        assert!(!navigation.was_redirected());
    }

    #[test]
    fn test_redirect_loop_is_an_invariant_violation() {
        // Login itself protected: anonymous visitors bounce between nothing but login.
        let routes = RouteConfig {
            protected: vec!["/login".to_string(), "/profile-setup".to_string()],
            ..RouteConfig::default()
        };
        let err = Navigator::new(RouteGuard::new(routes))
            .navigate(&resolved(false, false), "/profile-setup")
            .unwrap_err();

        assert!(matches!(err, CampusError::StateInvariant(_)));
    }
}
