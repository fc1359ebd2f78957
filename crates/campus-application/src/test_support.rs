use campus_core::error::{AuthError, Result};
use campus_core::identity::{CredentialService, Identity, OAuthProvider};
use campus_core::profile::{Department, StudentProfile, YearOfStudy};
use campus_core::session::SessionManager;
use campus_infrastructure::InMemoryProfileStore;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::watch;

pub fn identity() -> Identity {
    Identity::with_password("uid-1", "new@x.com")
}

pub fn profile() -> StudentProfile {
    StudentProfile {
        full_name: "Grace Hopper".to_string(),
        email: "new@x.com".to_string(),
        phone: "555-0199".to_string(),
        address: "1 Compiler Way".to_string(),
        year_of_study: YearOfStudy::Fourth,
        department: Department::ComputerScience,
    }
}

/// Credential service keeping accounts in memory.
pub struct StubCredentials {
    accounts: Mutex<HashMap<String, (String, Identity)>>,
    provider_identity: Option<Identity>,
    session: watch::Sender<Option<Identity>>,
}

impl StubCredentials {
    pub fn new() -> Self {
        let (session, _) = watch::channel(None);
        Self {
            accounts: Mutex::new(HashMap::new()),
            provider_identity: None,
            session,
        }
    }

    pub fn with_account(self, email: &str, password: &str, identity: Identity) -> Self {
        self.accounts
            .lock()
            .unwrap()
            .insert(email.to_string(), (password.to_string(), identity));
        self
    }

    pub fn with_provider_identity(mut self, identity: Identity) -> Self {
        self.provider_identity = Some(identity);
        self
    }

    pub fn signed_in_as(self, identity: Identity) -> Self {
        self.session.send_replace(Some(identity));
        self
    }
}

#[async_trait::async_trait]
impl CredentialService for StubCredentials {
    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Identity> {
        let identity = match self.accounts.lock().unwrap().get(email) {
            Some((stored, identity)) if stored == password => identity.clone(),
            _ => return Err(AuthError::InvalidCredentials.into()),
        };
        self.session.send_replace(Some(identity.clone()));
        Ok(identity)
    }

    async fn sign_up_with_password(&self, email: &str, password: &str) -> Result<Identity> {
        let identity = {
            let mut accounts = self.accounts.lock().unwrap();
            if accounts.contains_key(email) {
                return Err(AuthError::EmailInUse.into());
            }
            let identity = Identity::with_password(format!("uid-{}", accounts.len() + 1), email);
            accounts.insert(email.to_string(), (password.to_string(), identity.clone()));
            identity
        };
        self.session.send_replace(Some(identity.clone()));
        Ok(identity)
    }

    async fn sign_in_with_provider(&self, provider: OAuthProvider) -> Result<Identity> {
        let identity = self
            .provider_identity
            .clone()
            .ok_or(AuthError::PopupClosed(provider))?;
        self.session.send_replace(Some(identity.clone()));
        Ok(identity)
    }

    async fn sign_out(&self) -> Result<()> {
        self.session.send_replace(None);
        Ok(())
    }

    fn session_changes(&self) -> watch::Receiver<Option<Identity>> {
        self.session.subscribe()
    }
}

/// A started session manager; keep the subscription alive for the test.
pub fn manager(
    credentials: StubCredentials,
    store: InMemoryProfileStore,
) -> (
    Arc<SessionManager>,
    campus_core::session::SessionSubscription,
) {
    let manager = Arc::new(SessionManager::new(Arc::new(credentials), Arc::new(store)));
    let subscription = manager.start();
    (manager, subscription)
}
