//! Profile store trait.
//!
//! Defines the interface for profile document persistence.

use super::model::StudentProfile;
use crate::error::Result;
use async_trait::async_trait;

/// Collection holding one profile document per user id.
pub const PROFILE_COLLECTION: &str = "users";

/// An abstract document store for student profiles.
///
/// Documents are keyed by the identity's `uid`; there is at most one per
/// user. Writes replace the whole document.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Reads the profile document of a user.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(profile))`: Document exists
    /// - `Ok(None)`: No document for this user
    /// - `Err(_)`: Store unreachable or document unreadable
    async fn read_profile(&self, uid: &str) -> Result<Option<StudentProfile>>;

    /// Writes the complete profile document of a user.
    ///
    /// # Returns
    ///
    /// - `Ok(())`: Document written; a following read returns exactly `profile`
    /// - `Err(_)`: Store unreachable or write rejected
    async fn write_profile(&self, uid: &str, profile: &StudentProfile) -> Result<()>;
}
