//! Session state model.

use crate::identity::Identity;
use crate::profile::StudentProfile;

/// Outcome of the most recent profile fetch for the current identity.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ProfileFetch {
    /// No identity, nothing to fetch
    #[default]
    Idle,
    /// A fetch for the current identity is in flight
    Pending,
    /// The profile document was found
    Loaded,
    /// The identity has no profile document yet
    Missing,
    /// The store failed; the fetch can be retried
    Failed { message: String },
}

/// In-memory view of who is signed in and what their profile is.
///
/// Readers only ever see clones of this value; the `SessionManager` is the
/// single writer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub identity: Option<Identity>,
    /// Always `None` while `identity` is `None`
    pub profile: Option<StudentProfile>,
    /// True until the first session notification has been fully processed
    pub loading: bool,
    pub profile_fetch: ProfileFetch,
}

impl SessionState {
    /// State at application start.
    pub fn initial() -> Self {
        Self {
            identity: None,
            profile: None,
            loading: true,
            profile_fetch: ProfileFetch::Idle,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }

    /// True while the profile of the current identity is still being fetched.
    pub fn is_resolving_profile(&self) -> bool {
        self.identity.is_some() && self.profile_fetch == ProfileFetch::Pending
    }

    /// Signed in, resolved, and confirmed to have no profile document.
    pub fn needs_profile_setup(&self) -> bool {
        !self.loading
            && self.identity.is_some()
            && self.profile.is_none()
            && self.profile_fetch == ProfileFetch::Missing
    }

    /// Message of a failed profile fetch, if that is the current state.
    pub fn profile_error(&self) -> Option<&str> {
        match &self.profile_fetch {
            ProfileFetch::Failed { message } if self.profile.is_none() => Some(message),
            _ => None,
        }
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::initial()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_is_loading_and_anonymous() {
        let state = SessionState::initial();
        assert!(state.loading);
        assert!(state.identity.is_none());
        assert!(state.profile.is_none());
        assert!(!state.needs_profile_setup());
    }

    #[test]
    fn test_needs_profile_setup_only_when_confirmed_missing() {
        let mut state = SessionState {
            identity: Some(Identity::with_password("uid-1", "new@x.com")),
            profile: None,
            loading: false,
            profile_fetch: ProfileFetch::Pending,
        };
        assert!(!state.needs_profile_setup());
        assert!(state.is_resolving_profile());

        state.profile_fetch = ProfileFetch::Missing;
        assert!(state.needs_profile_setup());

        state.profile_fetch = ProfileFetch::Failed {
            message: "offline".to_string(),
        };
        assert!(!state.needs_profile_setup());
        assert_eq!(state.profile_error(), Some("offline"));
    }
}
