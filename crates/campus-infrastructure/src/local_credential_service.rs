//! File-backed credential service.
//!
//! Accounts live in `accounts.toml`, the signed-in account in `session.toml`,
//! so a new process resumes the previous session the way a browser keeps a
//! persisted sign-in.

use crate::dto::{AccountRecord, AccountsDocument, SessionDocument};
use crate::password;
use crate::paths::CampusPaths;
use crate::storage::{AtomicTomlError, AtomicTomlFile};
use async_trait::async_trait;
use campus_core::error::{AuthError, CampusError, Result};
use campus_core::identity::{CredentialService, Identity, OAuthProvider};
use std::sync::Arc;
use tokio::sync::watch;
use uuid::Uuid;

/// Account details released by a provider after the user consents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderGrant {
    pub email: String,
    pub display_name: Option<String>,
}

/// The interactive part of an OAuth sign-in (a popup in a browser, a prompt
/// in a terminal).
#[async_trait]
pub trait ProviderFlow: Send + Sync {
    /// Asks the user to authorize `provider`.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(grant))`: The user completed the flow
    /// - `Ok(None)`: The user abandoned the flow
    async fn authorize(&self, provider: OAuthProvider) -> Result<Option<ProviderGrant>>;
}

/// Errors raised inside a locked accounts update.
enum AccountsError {
    Auth(AuthError),
    File(AtomicTomlError),
}

impl From<AtomicTomlError> for AccountsError {
    fn from(err: AtomicTomlError) -> Self {
        AccountsError::File(err)
    }
}

impl From<AccountsError> for CampusError {
    fn from(err: AccountsError) -> Self {
        match err {
            AccountsError::Auth(e) => e.into(),
            AccountsError::File(e) => unavailable(e),
        }
    }
}

fn unavailable(err: impl std::fmt::Display) -> CampusError {
    AuthError::Network(err.to_string()).into()
}

/// Trims and lower-cases an email address, rejecting malformed ones.
pub fn normalize_email(email: &str) -> Result<String> {
    let normalized = email.trim().to_lowercase();
    let valid = match normalized.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !normalized.contains(char::is_whitespace)
        }
        None => false,
    };

    if valid {
        Ok(normalized)
    } else {
        Err(AuthError::InvalidEmail(email.trim().to_string()).into())
    }
}

/// Stable uid of a provider account, so repeated sign-ins map to one identity.
fn provider_uid(provider: OAuthProvider, email: &str) -> String {
    let name = format!("{}:{}", provider.to_string().to_lowercase(), email);
    Uuid::new_v5(&Uuid::NAMESPACE_OID, name.as_bytes()).to_string()
}

async fn run_blocking<T, F>(f: F) -> Result<T>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f).await.map_err(unavailable)
}

/// Credential service backed by TOML files in the data directory.
pub struct LocalCredentialService {
    accounts: AtomicTomlFile<AccountsDocument>,
    session_file: AtomicTomlFile<SessionDocument>,
    provider_flow: Arc<dyn ProviderFlow>,
    min_password_length: usize,
    session: watch::Sender<Option<Identity>>,
}

impl LocalCredentialService {
    /// Opens the service and restores the persisted session, if any.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Network` if the account or session files exist
    /// but cannot be read.
    pub fn open(
        paths: &CampusPaths,
        provider_flow: Arc<dyn ProviderFlow>,
        min_password_length: usize,
    ) -> Result<Self> {
        let accounts = AtomicTomlFile::new(paths.accounts_file());
        let session_file = AtomicTomlFile::new(paths.session_file());
        let current = Self::restore_session(&accounts, &session_file)?;

        if let Some(identity) = &current {
            tracing::info!(
                "[LocalCredentialService] Restored session for {}",
                identity.label()
            );
        }

        let (session, _) = watch::channel(current);
        Ok(Self {
            accounts,
            session_file,
            provider_flow,
            min_password_length,
            session,
        })
    }

    fn restore_session(
        accounts: &AtomicTomlFile<AccountsDocument>,
        session_file: &AtomicTomlFile<SessionDocument>,
    ) -> Result<Option<Identity>> {
        let Some(uid) = session_file.load().map_err(unavailable)?.and_then(|doc| doc.uid) else {
            return Ok(None);
        };

        let accounts = accounts.load().map_err(unavailable)?.unwrap_or_default();
        match accounts.find_by_uid(&uid) {
            Some(record) => Ok(Some(Identity::from(record))),
            None => {
                tracing::warn!(
                    "[LocalCredentialService] Session refers to unknown account {}, ignoring",
                    uid
                );
                Ok(None)
            }
        }
    }

    async fn start_session(&self, record: AccountRecord) -> Result<Identity> {
        let identity = Identity::from(&record);
        let document = SessionDocument {
            uid: Some(record.uid),
            signed_in_at: Some(chrono::Utc::now().to_rfc3339()),
        };

        let session_file = self.session_file.clone();
        run_blocking(move || session_file.save(&document))
            .await?
            .map_err(unavailable)?;

        tracing::info!(
            "[LocalCredentialService] Signed in: uid={}, {}",
            identity.uid,
            identity.label()
        );
        self.session.send_replace(Some(identity.clone()));
        Ok(identity)
    }
}

#[async_trait]
impl CredentialService for LocalCredentialService {
    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Identity> {
        let email = normalize_email(email)?;
        let accounts = self.accounts.clone();
        let password = password.to_string();

        let record = run_blocking(move || -> Result<AccountRecord> {
            let document = accounts.load().map_err(unavailable)?.unwrap_or_default();
            let record = document
                .find_password_account(&email)
                .cloned()
                .ok_or(AuthError::InvalidCredentials)?;
            let hashword = record.password_hash.as_deref().unwrap_or_default();
            if !password::verify(&password, hashword) {
                return Err(AuthError::InvalidCredentials.into());
            }
            Ok(record)
        })
        .await??;

        self.start_session(record).await
    }

    async fn sign_up_with_password(&self, email: &str, password: &str) -> Result<Identity> {
        let email = normalize_email(email)?;
        if password.chars().count() < self.min_password_length {
            return Err(AuthError::WeakPassword {
                min_length: self.min_password_length,
            }
            .into());
        }

        let accounts = self.accounts.clone();
        let password = password.to_string();
        let record = run_blocking(move || -> Result<AccountRecord> {
            let password_hash = password::hash(&password).map_err(unavailable)?;
            let record = accounts.update(AccountsDocument::default(), |document| {
                if document.find_password_account(&email).is_some() {
                    return Err(AccountsError::Auth(AuthError::EmailInUse));
                }
                let record = AccountRecord {
                    uid: Uuid::new_v4().to_string(),
                    email,
                    password_hash: Some(password_hash),
                    provider: None,
                    display_name: None,
                    created_at: chrono::Utc::now().to_rfc3339(),
                };
                document.accounts.push(record.clone());
                Ok(record)
            })?;
            Ok(record)
        })
        .await??;

        tracing::info!("[LocalCredentialService] Registered {}", record.email);
        self.start_session(record).await
    }

    async fn sign_in_with_provider(&self, provider: OAuthProvider) -> Result<Identity> {
        let grant = self
            .provider_flow
            .authorize(provider)
            .await?
            .ok_or(AuthError::PopupClosed(provider))?;
        let email = normalize_email(&grant.email)?;
        let uid = provider_uid(provider, &email);

        let accounts = self.accounts.clone();
        let record = run_blocking(move || -> Result<AccountRecord> {
            let record = accounts.update(AccountsDocument::default(), |document| {
                if let Some(existing) = document.accounts.iter_mut().find(|a| a.uid == uid) {
                    if grant.display_name.is_some() {
                        existing.display_name = grant.display_name;
                    }
                    return Ok::<_, AccountsError>(existing.clone());
                }
                let record = AccountRecord {
                    uid,
                    email,
                    password_hash: None,
                    provider: Some(provider),
                    display_name: grant.display_name,
                    created_at: chrono::Utc::now().to_rfc3339(),
                };
                document.accounts.push(record.clone());
                Ok(record)
            })?;
            Ok(record)
        })
        .await??;

        self.start_session(record).await
    }

    async fn sign_out(&self) -> Result<()> {
        let session_file = self.session_file.clone();
        run_blocking(move || session_file.save(&SessionDocument::default()))
            .await?
            .map_err(unavailable)?;

        tracing::info!("[LocalCredentialService] Signed out");
        self.session.send_replace(None);
        Ok(())
    }

    fn session_changes(&self) -> watch::Receiver<Option<Identity>> {
        self.session.subscribe()
    }
}
