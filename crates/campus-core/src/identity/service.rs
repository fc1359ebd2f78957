//! Credential service trait.
//!
//! Defines the interface to the identity provider that authenticates users.

use super::model::{Identity, OAuthProvider};
use crate::error::Result;
use async_trait::async_trait;
use tokio::sync::watch;

/// An abstract identity provider.
///
/// Sign-in operations resolve with the authenticated identity, but callers
/// should not act on that value directly: the authoritative signal is the
/// session stream returned by [`CredentialService::session_changes`], which
/// every successful sign-in, sign-up and sign-out also updates.
///
/// # Implementation Notes
///
/// Implementations should:
/// - Publish the current session before returning from `session_changes`
/// - Publish `None` on sign-out
/// - Report failures as `CampusError::Auth`
#[async_trait]
pub trait CredentialService: Send + Sync {
    /// Signs in with an email/password pair.
    ///
    /// # Errors
    ///
    /// - `AuthError::InvalidCredentials`: unknown email or wrong password
    /// - `AuthError::Network`: service unreachable
    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Identity>;

    /// Creates a new email/password account and signs it in.
    ///
    /// # Errors
    ///
    /// - `AuthError::EmailInUse`, `AuthError::WeakPassword`, `AuthError::InvalidEmail`
    /// - `AuthError::Network`: service unreachable
    async fn sign_up_with_password(&self, email: &str, password: &str) -> Result<Identity>;

    /// Runs the interactive sign-in flow of an external provider.
    ///
    /// # Errors
    ///
    /// - `AuthError::PopupClosed`: the user abandoned the flow
    /// - `AuthError::Network`: service unreachable
    async fn sign_in_with_provider(&self, provider: OAuthProvider) -> Result<Identity>;

    /// Ends the current session.
    async fn sign_out(&self) -> Result<()>;

    /// Subscribes to session changes.
    ///
    /// The receiver holds the current session immediately and observes every
    /// subsequent change. Dropping it unsubscribes.
    fn session_changes(&self) -> watch::Receiver<Option<Identity>>;
}
