use campus_core::identity::{Identity, OAuthProvider};
use serde::{Deserialize, Serialize};

/// One registered account in `accounts.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRecord {
    pub uid: String,
    /// Normalized (trimmed, lower-cased) email
    pub email: String,
    /// Argon2 PHC string; absent for provider accounts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<OAuthProvider>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    pub created_at: String,
}

impl AccountRecord {
    pub fn is_password_account(&self) -> bool {
        self.provider.is_none()
    }
}

impl From<&AccountRecord> for Identity {
    fn from(record: &AccountRecord) -> Self {
        Identity {
            uid: record.uid.clone(),
            email: Some(record.email.clone()),
            display_name: record.display_name.clone(),
            provider: record.provider,
        }
    }
}

/// Root of `accounts.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccountsDocument {
    #[serde(default, rename = "account")]
    pub accounts: Vec<AccountRecord>,
}

impl AccountsDocument {
    pub fn find_by_uid(&self, uid: &str) -> Option<&AccountRecord> {
        self.accounts.iter().find(|account| account.uid == uid)
    }

    pub fn find_password_account(&self, email: &str) -> Option<&AccountRecord> {
        self.accounts
            .iter()
            .find(|account| account.is_password_account() && account.email == email)
    }
}

/// Root of `session.toml`: the signed-in account, if any.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signed_in_at: Option<String>,
}
