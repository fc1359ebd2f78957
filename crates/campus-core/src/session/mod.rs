//! Session domain module.
//!
//! # Module Structure
//!
//! - `state`: The session state container value (`SessionState`, `ProfileFetch`)
//! - `manager`: Session lifecycle management (`SessionManager`)
//!
//! # Usage
//!
//! ```ignore
//! use campus_core::session::{SessionManager, SessionState};
//!
//! let manager = Arc::new(SessionManager::new(credentials, profiles));
//! let _subscription = manager.start();
//! let state = manager.wait_until_resolved().await;
//! ```

mod manager;
mod state;


// Re-export public API
pub use manager::{SessionManager, SessionSubscription};
pub use state::{ProfileFetch, SessionState};
