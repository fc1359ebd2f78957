//! Profile completion and editing.

use crate::profile_form::ProfileForm;
use campus_core::config::RouteConfig;
use campus_core::error::{CampusError, Result};
use campus_core::identity::Identity;
use campus_core::profile::StudentProfile;
use campus_core::session::{ProfileFetch, SessionManager, SessionState};
use std::sync::Arc;

fn signed_in(state: &SessionState) -> Result<&Identity> {
    state
        .identity
        .as_ref()
        .ok_or_else(|| CampusError::state_invariant("profile form opened without a signed-in user"))
}

/// First-time profile completion for a signed-in user.
pub struct ProfileSetup {
    sessions: Arc<SessionManager>,
    routes: RouteConfig,
}

impl ProfileSetup {
    pub fn new(sessions: Arc<SessionManager>, routes: RouteConfig) -> Self {
        Self { sessions, routes }
    }

    /// Empty form for the signed-in user.
    ///
    /// # Errors
    ///
    /// Returns `CampusError::StateInvariant` unless the signed-in user is
    /// confirmed to have no profile document: nobody signed in, profile
    /// already complete, or the profile could not be loaded (a stored
    /// profile may still exist).
    pub fn form(&self) -> Result<ProfileForm> {
        let state = self.sessions.snapshot();
        let identity = signed_in(&state)?;
        if state.profile.is_some() {
            return Err(CampusError::state_invariant(
                "profile already completed; edit it instead",
            ));
        }
        match &state.profile_fetch {
            ProfileFetch::Missing => Ok(ProfileForm::prefill(identity, None)),
            ProfileFetch::Failed { message } => Err(CampusError::state_invariant(format!(
                "profile could not be loaded ({}); retry before setting it up",
                message
            ))),
            _ => Err(CampusError::state_invariant(
                "profile is still loading; wait for the session to resolve",
            )),
        }
    }

    /// Validates and saves the form.
    ///
    /// # Returns
    ///
    /// The route to navigate to next (home).
    pub async fn submit(&self, form: &ProfileForm) -> Result<String> {
        // Re-checks the session: it may have changed since the form was opened.
        self.form()?;
        let profile = form.validate()?;

        self.sessions.save_profile(profile).await?;
        tracing::info!("[ProfileSetup] Profile completed");
        Ok(self.routes.home.clone())
    }
}

/// Editing of an existing profile.
pub struct ProfileEditor {
    sessions: Arc<SessionManager>,
}

impl ProfileEditor {
    pub fn new(sessions: Arc<SessionManager>) -> Self {
        Self { sessions }
    }

    /// Form prefilled from the stored profile.
    ///
    /// # Errors
    ///
    /// Returns `CampusError::StateInvariant` if nobody is signed in or there
    /// is no profile to edit yet.
    pub fn form(&self) -> Result<ProfileForm> {
        let state = self.sessions.snapshot();
        let identity = signed_in(&state)?;
        let profile = state
            .profile
            .as_ref()
            .ok_or_else(|| CampusError::state_invariant("no profile to edit; complete setup first"))?;
        Ok(ProfileForm::prefill(identity, Some(profile)))
    }

    /// Validates the form and replaces the stored profile.
    pub async fn submit(&self, form: &ProfileForm) -> Result<StudentProfile> {
        self.form()?;
        let profile = form.validate()?;

        self.sessions.update_profile(profile.clone()).await?;
        tracing::info!("[ProfileEditor] Profile updated");
        Ok(profile)
    }
}
