//! Error types for the campus portal.

use crate::identity::OAuthProvider;
use thiserror::Error;

/// Failures reported by the credential service.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Unknown email or wrong password
    #[error("invalid email or password")]
    InvalidCredentials,

    /// Registration with an email that already has an account
    #[error("an account with this email already exists")]
    EmailInUse,

    /// Registration password below the minimum length
    #[error("password must be at least {min_length} characters")]
    WeakPassword { min_length: usize },

    /// Malformed email address
    #[error("invalid email address: '{0}'")]
    InvalidEmail(String),

    /// The interactive provider flow was closed before completing
    #[error("sign-in with {0} was cancelled")]
    PopupClosed(OAuthProvider),

    /// The credential service could not be reached
    #[error("credential service unavailable: {0}")]
    Network(String),
}

/// Failures reported by the profile store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The store could not be reached
    #[error("profile store unavailable: {0}")]
    Network(String),

    /// A document exists but could not be read
    #[error("failed to read document '{id}': {message}")]
    Read { id: String, message: String },

    /// A document could not be written
    #[error("failed to write document '{id}': {message}")]
    Write { id: String, message: String },

    /// A document could not be encoded or decoded
    #[error("serialization error: {format} - {message}")]
    Serialization { format: String, message: String },
}

/// A shared error type for the entire campus portal.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CampusError {
    /// Authentication failure
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Profile store failure
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Session state was used in a way the call site should have prevented
    #[error("session state violation: {0}")]
    StateInvariant(String),

    /// Form input rejected before reaching any service
    #[error("invalid {field}: {message}")]
    Validation { field: &'static str, message: String },

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },
}

impl CampusError {
    /// Creates a StateInvariant error
    pub fn state_invariant(message: impl Into<String>) -> Self {
        Self::StateInvariant(message.into())
    }

    /// Creates a Validation error
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Auth(_))
    }

    pub fn is_store(&self) -> bool {
        matches!(self, Self::Store(_))
    }

    /// Returns the inline message a page shows for this failure.
    ///
    /// Service details (paths, hashes, transport errors) never reach the user;
    /// they are logged where the error originates.
    pub fn user_message(&self) -> String {
        match self {
            Self::Auth(AuthError::InvalidCredentials) => "Invalid email or password.".to_string(),
            Self::Auth(AuthError::EmailInUse) => {
                "An account with this email already exists.".to_string()
            }
            Self::Auth(AuthError::WeakPassword { min_length }) => {
                format!("Password should be at least {} characters.", min_length)
            }
            Self::Auth(AuthError::InvalidEmail(_)) => {
                "Please enter a valid email address.".to_string()
            }
            Self::Auth(AuthError::PopupClosed(provider)) => {
                format!("Sign-in with {} was cancelled.", provider)
            }
            Self::Auth(AuthError::Network(_)) => {
                "Could not reach the sign-in service. Please try again.".to_string()
            }
            Self::Store(_) => "Failed to save profile. Please try again.".to_string(),
            Self::Validation { field, message } => format!("{}: {}", field, message),
            Self::StateInvariant(_) | Self::Config(_) | Self::Io { .. } => {
                "Something went wrong. Please try again.".to_string()
            }
        }
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for CampusError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<toml::de::Error> for StoreError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for StoreError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, CampusError>`.
pub type Result<T> = std::result::Result<T, CampusError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_error_converts_into_campus_error() {
        let err: CampusError = AuthError::InvalidCredentials.into();
        assert!(err.is_auth());
        assert!(!err.is_store());
        assert_eq!(err.to_string(), "invalid email or password");
    }

    #[test]
    fn test_user_message_hides_store_details() {
        let err: CampusError = StoreError::Write {
            id: "uid-1".to_string(),
            message: "disk full at /var/lib/campus/users".to_string(),
        }
        .into();

        let message = err.user_message();
        assert_eq!(message, "Failed to save profile. Please try again.");
        assert!(!message.contains("/var/lib"));
    }

    #[test]
    fn test_popup_closed_names_provider() {
        let err: CampusError = AuthError::PopupClosed(OAuthProvider::Github).into();
        assert_eq!(err.user_message(), "Sign-in with GitHub was cancelled.");
    }

    #[test]
    fn test_io_error_conversion_keeps_kind() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "nope");
        let err: CampusError = io.into();
        match err {
            CampusError::Io { message } => assert!(message.contains("PermissionDenied")),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
