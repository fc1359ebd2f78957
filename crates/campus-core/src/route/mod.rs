//! Navigation policies.
//!
//! `RouteGuard` decides, from a session snapshot alone, whether a requested
//! page may render or where the visitor must go instead.

mod guard;

pub use guard::{GuardDecision, RedirectReason, RouteGuard, normalize_path};
