use super::state::{ProfileFetch, SessionState};
use crate::error::{CampusError, Result};
use crate::identity::{CredentialService, Identity, OAuthProvider};
use crate::profile::{ProfileStore, StudentProfile};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Handle to the session stream listener started by [`SessionManager::start`].
///
/// Dropping the handle (or calling [`SessionSubscription::unsubscribe`])
/// stops the listener; the session state keeps its last value.
pub struct SessionSubscription {
    task: JoinHandle<()>,
}

impl SessionSubscription {
    /// Stops listening to the credential service.
    pub fn unsubscribe(self) {
        drop(self);
    }

    pub fn is_active(&self) -> bool {
        !self.task.is_finished()
    }
}

impl Drop for SessionSubscription {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Single source of truth for who is signed in and what their profile is.
///
/// `SessionManager` is responsible for:
/// - Following the credential service's session stream
/// - Fetching the profile document of each newly signed-in identity
/// - Exposing login, logout and profile write operations
/// - Publishing read-only snapshots of the session state
///
/// The state lives in a `watch` channel owned by the manager, which is its
/// only writer. Every session notification gets a sequence number; the
/// result of a profile fetch is dropped when a newer notification (or a
/// profile save) has superseded it by the time the fetch resolves.
pub struct SessionManager {
    credentials: Arc<dyn CredentialService>,
    profiles: Arc<dyn ProfileStore>,
    state: watch::Sender<SessionState>,
    /// Sequence number of the latest notification; only touched while the
    /// state channel is locked
    latest: AtomicU64,
}

impl SessionManager {
    /// Creates a new `SessionManager` in the initial loading state.
    ///
    /// # Arguments
    ///
    /// * `credentials` - The identity provider
    /// * `profiles` - The profile document store
    pub fn new(credentials: Arc<dyn CredentialService>, profiles: Arc<dyn ProfileStore>) -> Self {
        let (state, _) = watch::channel(SessionState::initial());
        Self {
            credentials,
            profiles,
            state,
            latest: AtomicU64::new(0),
        }
    }

    /// Starts following the credential service's session stream.
    ///
    /// The current session is processed first, then every change, one
    /// notification at a time. Must be called from within a tokio runtime.
    pub fn start(self: &Arc<Self>) -> SessionSubscription {
        let mut changes = self.credentials.session_changes();
        let manager = Arc::clone(self);

        let task = tokio::spawn(async move {
            let current = changes.borrow_and_update().clone();
            manager.handle_session_change(current).await;

            while changes.changed().await.is_ok() {
                let identity = changes.borrow_and_update().clone();
                manager.handle_session_change(identity).await;
            }

            tracing::debug!("[SessionManager] Session stream closed");
        });

        SessionSubscription { task }
    }

    /// Applies one session notification.
    ///
    /// The identity is published immediately; `loading` flips to false only
    /// once the profile fetch for this notification has been applied.
    pub async fn handle_session_change(&self, identity: Option<Identity>) {
        let Some(identity) = identity else {
            self.state.send_modify(|state| {
                self.latest.fetch_add(1, Ordering::SeqCst);
                state.identity = None;
                state.profile = None;
                state.profile_fetch = ProfileFetch::Idle;
                state.loading = false;
            });
            tracing::debug!("[SessionManager] No active session");
            return;
        };

        let uid = identity.uid.clone();
        let mut seq = 0;
        self.state.send_modify(|state| {
            seq = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
            let same_user = state.identity.as_ref().is_some_and(|current| current.uid == uid);
            if !same_user {
                state.profile = None;
            }
            state.identity = Some(identity);
            state.profile_fetch = ProfileFetch::Pending;
        });

        tracing::debug!(
            "[SessionManager] Fetching profile: uid={}, seq={}",
            uid,
            seq
        );
        let fetched = self.profiles.read_profile(&uid).await;

        self.state.send_if_modified(|state| {
            let latest = self.latest.load(Ordering::SeqCst);
            if latest != seq {
                tracing::debug!(
                    "[SessionManager] Discarding stale profile fetch: uid={}, seq={}, latest={}",
                    uid,
                    seq,
                    latest
                );
                return false;
            }

            match fetched {
                Ok(Some(profile)) => {
                    state.profile = Some(profile);
                    state.profile_fetch = ProfileFetch::Loaded;
                }
                Ok(None) => {
                    tracing::info!("[SessionManager] No profile yet for uid={}", uid);
                    state.profile = None;
                    state.profile_fetch = ProfileFetch::Missing;
                }
                Err(e) => {
                    tracing::warn!("[SessionManager] Profile fetch failed for uid={}: {}", uid, e);
                    state.profile_fetch = ProfileFetch::Failed {
                        message: e.to_string(),
                    };
                }
            }
            state.loading = false;
            true
        });
    }

    /// Returns a copy of the current session state.
    pub fn snapshot(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// Returns a receiver observing every session state change.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    /// Waits until the session state satisfies `predicate`.
    pub async fn wait_for<F>(&self, predicate: F) -> SessionState
    where
        F: FnMut(&SessionState) -> bool,
    {
        let mut receiver = self.state.subscribe();
        // The sender lives as long as `self`, so the channel cannot close here.
        match receiver.wait_for(predicate).await {
            Ok(state) => state.clone(),
            Err(_) => self.snapshot(),
        }
    }

    /// Waits until the initial resolution window has ended and no profile
    /// fetch is in flight.
    pub async fn wait_until_resolved(&self) -> SessionState {
        self.wait_for(|state| !state.loading && !state.is_resolving_profile())
            .await
    }

    /// Signs in with email and password.
    ///
    /// The session state is updated by the resulting notification, not by
    /// this call.
    pub async fn login_with_password(&self, email: &str, password: &str) -> Result<Identity> {
        tracing::info!("[SessionManager] Password sign-in: {}", email);
        self.credentials.sign_in_with_password(email, password).await
    }

    /// Creates a new email/password account, which becomes the signed-in user.
    pub async fn register_with_password(&self, email: &str, password: &str) -> Result<Identity> {
        tracing::info!("[SessionManager] Registering: {}", email);
        self.credentials.sign_up_with_password(email, password).await
    }

    /// Signs in through an external provider's interactive flow.
    pub async fn login_with_provider(&self, provider: OAuthProvider) -> Result<Identity> {
        tracing::info!("[SessionManager] {} sign-in", provider);
        self.credentials.sign_in_with_provider(provider).await
    }

    /// Ends the current session.
    ///
    /// Identity and profile are cleared by the resulting notification.
    pub async fn logout(&self) -> Result<()> {
        tracing::info!("[SessionManager] Signing out");
        self.credentials.sign_out().await
    }

    /// Writes the complete profile of the signed-in user.
    ///
    /// Without a signed-in user this is a no-op. On success the session's
    /// profile is set to exactly `profile`, without re-reading the store.
    ///
    /// # Errors
    ///
    /// Returns the store error if the write fails; the session state is left
    /// unchanged in that case.
    pub async fn save_profile(&self, profile: StudentProfile) -> Result<()> {
        let Some(uid) = self.current_uid() else {
            tracing::warn!("[SessionManager] save_profile called without a signed-in user");
            return Ok(());
        };

        self.profiles.write_profile(&uid, &profile).await?;
        tracing::info!("[SessionManager] Profile saved: uid={}", uid);

        let published = self.state.send_if_modified(|state| {
            if state.identity.as_ref().is_none_or(|current| current.uid != uid) {
                return false;
            }
            // An in-flight fetch for this user may have read the previous document.
            self.latest.fetch_add(1, Ordering::SeqCst);
            state.profile = Some(profile);
            state.profile_fetch = ProfileFetch::Loaded;
            state.loading = false;
            true
        });

        if !published {
            tracing::warn!(
                "[SessionManager] Signed-in user changed while saving profile for uid={}",
                uid
            );
        }
        Ok(())
    }

    /// Replaces the profile of the signed-in user. Same semantics as
    /// [`SessionManager::save_profile`].
    pub async fn update_profile(&self, profile: StudentProfile) -> Result<()> {
        self.save_profile(profile).await
    }

    /// Fetches the signed-in user's profile again, typically after a failure.
    ///
    /// # Errors
    ///
    /// Returns `CampusError::StateInvariant` if nobody is signed in.
    pub async fn retry_profile_fetch(&self) -> Result<SessionState> {
        let identity = self.state.borrow().identity.clone();
        let identity = identity.ok_or_else(|| {
            CampusError::state_invariant("profile fetch requested without a signed-in user")
        })?;

        self.handle_session_change(Some(identity)).await;
        Ok(self.snapshot())
    }

    fn current_uid(&self) -> Option<String> {
        self.state
            .borrow()
            .identity
            .as_ref()
            .map(|identity| identity.uid.clone())
    }
}
