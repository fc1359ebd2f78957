//! Student profile domain module.
//!
//! # Module Structure
//!
//! - `model`: The profile record and its fixed value sets
//! - `store`: Profile store trait keyed by user id

mod model;
mod store;

// Re-export public API
pub use model::{Department, StudentProfile, YearOfStudy};
pub use store::{PROFILE_COLLECTION, ProfileStore};
