use async_trait::async_trait;
use campus_core::error::Result;
use campus_core::profile::{ProfileStore, StudentProfile};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Profile store kept in process memory.
///
/// Nothing survives the process; used by tests and by embedders that
/// keep profiles elsewhere.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProfileStore {
    documents: Arc<RwLock<HashMap<String, StudentProfile>>>,
}

impl InMemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.documents.read().await.is_empty()
    }
}

#[async_trait]
impl ProfileStore for InMemoryProfileStore {
    async fn read_profile(&self, uid: &str) -> Result<Option<StudentProfile>> {
        Ok(self.documents.read().await.get(uid).cloned())
    }

    async fn write_profile(&self, uid: &str, profile: &StudentProfile) -> Result<()> {
        self.documents
            .write()
            .await
            .insert(uid.to_string(), profile.clone());
        Ok(())
    }
}
