//! Core domain of the campus learning portal.
//!
//! This crate owns everything that decides *who* is signed in and *where* they
//! may go:
//!
//! - `identity`: authenticated user references and the credential service contract
//! - `profile`: the student profile record and the profile store contract
//! - `session`: the session state container and `SessionManager`
//! - `route`: navigation policies enforced by `RouteGuard`
//! - `config`: configuration model shared by every layer
//!
//! Concrete service implementations live in `campus-infrastructure`.

pub mod config;
pub mod error;
pub mod identity;
pub mod profile;
pub mod route;
pub mod session;

// Re-export common error type
pub use error::CampusError;
