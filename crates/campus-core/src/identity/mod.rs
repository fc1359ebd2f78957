//! Identity domain module.
//!
//! # Module Structure
//!
//! - `model`: Authenticated user reference (`Identity`) and OAuth providers
//! - `service`: Credential service trait consumed by the session manager

mod model;
mod service;

// Re-export public API
pub use model::{Identity, OAuthProvider};
pub use service::CredentialService;
