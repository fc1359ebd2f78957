//! File-backed profile store.
//!
//! Directory structure:
//! ```text
//! data_dir/
//! └── users/
//!     ├── <uid-1>.toml
//!     └── <uid-2>.toml
//! ```

use crate::paths::CampusPaths;
use crate::storage::{AtomicTomlError, AtomicTomlFile};
use async_trait::async_trait;
use campus_core::error::{CampusError, Result, StoreError};
use campus_core::profile::{ProfileStore, StudentProfile};
use std::path::{Path, PathBuf};

/// Profile store writing one TOML document per user.
#[derive(Debug, Clone)]
pub struct FileProfileStore {
    dir: PathBuf,
}

impl FileProfileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store rooted at the default profile collection directory.
    pub fn from_paths(paths: &CampusPaths) -> Self {
        Self::new(paths.profiles_dir())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn document(&self, uid: &str) -> std::result::Result<AtomicTomlFile<StudentProfile>, String> {
        let valid = !uid.is_empty()
            && uid
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(format!("invalid document id '{}'", uid));
        }
        Ok(AtomicTomlFile::new(self.dir.join(format!("{}.toml", uid))))
    }
}

#[async_trait]
impl ProfileStore for FileProfileStore {
    async fn read_profile(&self, uid: &str) -> Result<Option<StudentProfile>> {
        let document = self.document(uid).map_err(|message| StoreError::Read {
            id: uid.to_string(),
            message,
        })?;

        let id = uid.to_string();
        let loaded = run_blocking(move || document.load()).await?;
        loaded.map_err(|e| {
            tracing::warn!("[FileProfileStore] Read failed for {}: {}", id, e);
            store_error(e, |message| StoreError::Read { id, message })
        })
    }

    async fn write_profile(&self, uid: &str, profile: &StudentProfile) -> Result<()> {
        let document = self.document(uid).map_err(|message| StoreError::Write {
            id: uid.to_string(),
            message,
        })?;

        let id = uid.to_string();
        let profile = profile.clone();
        let written = run_blocking(move || document.save(&profile)).await?;
        written.map_err(|e| {
            tracing::warn!("[FileProfileStore] Write failed for {}: {}", id, e);
            store_error(e, |message| StoreError::Write { id, message })
        })?;

        tracing::debug!("[FileProfileStore] Wrote profile document for {}", uid);
        Ok(())
    }
}

async fn run_blocking<T, F>(f: F) -> Result<T>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| StoreError::Network(format!("storage task failed: {}", e)).into())
}

fn store_error<F>(err: AtomicTomlError, io_variant: F) -> CampusError
where
    F: FnOnce(String) -> StoreError,
{
    match err {
        AtomicTomlError::Parse { source, .. } => StoreError::from(source).into(),
        AtomicTomlError::Serialize(source) => StoreError::from(source).into(),
        other => io_variant(other.to_string()).into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use campus_core::profile::{Department, YearOfStudy};
    use tempfile::TempDir;

    fn profile() -> StudentProfile {
        StudentProfile {
            full_name: "Katherine Johnson".to_string(),
            email: "kj@example.com".to_string(),
            phone: "555-0142".to_string(),
            address: "3 Orbit Court".to_string(),
            year_of_study: YearOfStudy::Third,
            department: Department::Electrical,
        }
    }

    #[tokio::test]
    async fn test_read_missing_document() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileProfileStore::new(temp_dir.path().join("users"));

        assert!(store.read_profile("uid-1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_write_then_read_is_exact() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileProfileStore::new(temp_dir.path().join("users"));

        store.write_profile("uid-1", &profile()).await.unwrap();

        assert_eq!(store.read_profile("uid-1").await.unwrap(), Some(profile()));
        assert!(temp_dir.path().join("users/uid-1.toml").exists());
    }

    #[tokio::test]
    async fn test_reads_portal_document_layout() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("users");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            dir.join("uid-7.toml"),
            r#"
fullName = "Katherine Johnson"
email = "kj@example.com"
phone = "555-0142"
address = "3 Orbit Court"
yearOfStudying = "3rd Year"
department = "Electrical"
"#,
        )
        .unwrap();

        let store = FileProfileStore::new(dir);
        assert_eq!(store.read_profile("uid-7").await.unwrap(), Some(profile()));
    }

    #[tokio::test]
    async fn test_corrupt_document_is_store_error() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("users");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("uid-1.toml"), "yearOfStudying = \"7th Year\"").unwrap();

        let err = FileProfileStore::new(dir)
            .read_profile("uid-1")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            CampusError::Store(StoreError::Serialization { .. })
        ));
    }

    #[tokio::test]
    async fn test_rejects_path_like_ids() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileProfileStore::new(temp_dir.path().join("users"));

        let err = store.write_profile("../escape", &profile()).await.unwrap_err();
        assert!(matches!(err, CampusError::Store(StoreError::Write { .. })));
        assert!(store.read_profile("").await.is_err());
    }
}
