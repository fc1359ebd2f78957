//! Identity domain model.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// External OAuth providers the portal accepts.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive)]
pub enum OAuthProvider {
    #[strum(serialize = "Google")]
    Google,
    #[strum(serialize = "GitHub")]
    Github,
}

/// Opaque reference to an authenticated user.
///
/// Identities are produced by the credential service only; the rest of the
/// application never constructs or mutates one outside of tests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Stable unique id, the key of the user's profile document
    pub uid: String,
    /// Verified email, if the provider exposes one
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    /// `None` for email/password accounts
    #[serde(default)]
    pub provider: Option<OAuthProvider>,
}

impl Identity {
    /// Creates an email/password identity.
    pub fn with_password(uid: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            email: Some(email.into()),
            display_name: None,
            provider: None,
        }
    }

    /// Returns the display name, falling back to the email address.
    pub fn label(&self) -> &str {
        self.display_name
            .as_deref()
            .or(self.email.as_deref())
            .unwrap_or(&self.uid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_provider_parses_case_insensitively() {
        assert_eq!(OAuthProvider::from_str("github").unwrap(), OAuthProvider::Github);
        assert_eq!(OAuthProvider::from_str("GOOGLE").unwrap(), OAuthProvider::Google);
        assert!(OAuthProvider::from_str("facebook").is_err());
    }

    #[test]
    fn test_label_prefers_display_name() {
        let mut identity = Identity::with_password("uid-1", "ada@example.com");
        assert_eq!(identity.label(), "ada@example.com");

        identity.display_name = Some("Ada".to_string());
        assert_eq!(identity.label(), "Ada");
    }
}
