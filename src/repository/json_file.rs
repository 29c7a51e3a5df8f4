//! Repository backend that keeps everything in one JSON document on disk

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;

use super::collections::Collections;
use super::traits::{FormPatch, FormRepository, RepoResult};
use crate::state::{FormDefinition, FormResponse, NewResponse};

/// Stores all forms and responses in a single JSON file.
///
/// Every operation re-reads the file, so edits made by another process are
/// picked up, and each write replaces the whole document (last write wins).
#[derive(Debug)]
pub struct JsonFileRepository {
    path: PathBuf,
    /// Serializes read-modify-write cycles within this process
    lock: Mutex<()>,
}

impl JsonFileRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> RepoResult<Collections> {
        match fs::read(&self.path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Ok(Collections::default()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Collections::default()),
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, collections: &Collections) -> RepoResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }
        let content = serde_json::to_vec_pretty(collections)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, content).await?;
        fs::rename(&tmp, &self.path).await?;
        tracing::debug!(path = %self.path.display(), "Saved form store");
        Ok(())
    }

    /// Load, mutate and save under the process-wide lock
    async fn modify<T>(&self, f: impl FnOnce(&mut Collections) -> RepoResult<T>) -> RepoResult<T> {
        let _guard = self.lock.lock().await;
        let mut collections = self.load().await?;
        let value = f(&mut collections)?;
        self.save(&collections).await?;
        Ok(value)
    }

    async fn read<T>(&self, f: impl FnOnce(&Collections) -> RepoResult<T>) -> RepoResult<T> {
        let _guard = self.lock.lock().await;
        let collections = self.load().await?;
        f(&collections)
    }
}

#[async_trait]
impl FormRepository for JsonFileRepository {
    async fn create(&self, form: &FormDefinition) -> RepoResult<String> {
        let id = self.modify(|c| c.create(form)).await?;
        tracing::info!(form_id = %id, owner_id = %form.owner_id, "Created form");
        Ok(id)
    }

    async fn get(&self, id: &str) -> RepoResult<FormDefinition> {
        self.read(|c| c.get(id)).await
    }

    async fn update(&self, id: &str, patch: FormPatch) -> RepoResult<()> {
        self.modify(|c| c.update(id, patch)).await?;
        tracing::debug!(form_id = %id, "Updated form");
        Ok(())
    }

    async fn delete(&self, id: &str) -> RepoResult<()> {
        let removed = self.modify(|c| c.delete(id)).await?;
        tracing::info!(form_id = %id, responses = removed, "Deleted form and its responses");
        Ok(())
    }

    async fn list_by_owner(&self, owner_id: &str) -> RepoResult<Vec<FormDefinition>> {
        self.read(|c| Ok(c.list_by_owner(owner_id))).await
    }

    async fn create_response(&self, form_id: &str, response: NewResponse) -> RepoResult<String> {
        let id = self.modify(|c| c.create_response(form_id, response)).await?;
        tracing::debug!(form_id = %form_id, response_id = %id, "Stored response");
        Ok(id)
    }

    async fn list_responses(&self, form_id: &str) -> RepoResult<Vec<FormResponse>> {
        self.read(|c| Ok(c.list_responses(form_id))).await
    }
}
