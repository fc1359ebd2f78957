pub mod config_service;
pub mod dto;
pub mod file_profile_store;
pub mod local_credential_service;
pub mod memory_profile_store;
pub mod password;
pub mod paths;
pub mod storage;

pub use crate::config_service::ConfigService;
pub use crate::file_profile_store::FileProfileStore;
pub use crate::local_credential_service::{LocalCredentialService, ProviderFlow, ProviderGrant};
pub use crate::memory_profile_store::InMemoryProfileStore;
pub use crate::paths::CampusPaths;
