//! Application layer for the campus portal.
//!
//! Page-level use cases built on the session manager and route guard:
//! following redirects, the sign-in page, and the profile forms.

pub mod login;
pub mod navigation;
pub mod profile_form;
pub mod profile_setup;

#[cfg(test)]
mod test_support;

pub use login::{LoginFailure, LoginFlow, LoginMethod, LoginSuccess};
pub use navigation::{MAX_REDIRECTS, Navigation, NavigationOutcome, Navigator};
pub use profile_form::ProfileForm;
pub use profile_setup::{ProfileEditor, ProfileSetup};
