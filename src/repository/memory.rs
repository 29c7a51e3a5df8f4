//! In-process repository backend

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::collections::Collections;
use super::traits::{FormPatch, FormRepository, RepoResult};
use crate::state::{FormDefinition, FormResponse, NewResponse};

/// Keeps everything in memory; contents are lost when the process exits
#[derive(Debug, Default)]
pub struct MemoryRepository {
    inner: RwLock<Collections>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FormRepository for MemoryRepository {
    async fn create(&self, form: &FormDefinition) -> RepoResult<String> {
        let id = self.inner.write().await.create(form)?;
        tracing::info!(form_id = %id, owner_id = %form.owner_id, "Created form");
        Ok(id)
    }

    async fn get(&self, id: &str) -> RepoResult<FormDefinition> {
        self.inner.read().await.get(id)
    }

    async fn update(&self, id: &str, patch: FormPatch) -> RepoResult<()> {
        self.inner.write().await.update(id, patch)?;
        tracing::debug!(form_id = %id, "Updated form");
        Ok(())
    }

    async fn delete(&self, id: &str) -> RepoResult<()> {
        let removed = self.inner.write().await.delete(id)?;
        tracing::info!(form_id = %id, responses = removed, "Deleted form and its responses");
        Ok(())
    }

    async fn list_by_owner(&self, owner_id: &str) -> RepoResult<Vec<FormDefinition>> {
        Ok(self.inner.read().await.list_by_owner(owner_id))
    }

    async fn create_response(&self, form_id: &str, response: NewResponse) -> RepoResult<String> {
        let id = self.inner.write().await.create_response(form_id, response)?;
        tracing::debug!(form_id = %form_id, response_id = %id, "Stored response");
        Ok(id)
    }

    async fn list_responses(&self, form_id: &str) -> RepoResult<Vec<FormResponse>> {
        Ok(self.inner.read().await.list_responses(form_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RepositoryError;
    use crate::state::{FieldSpec, FieldType, FormDefinitionStore, ResponseData};
    use pretty_assertions::assert_eq;

    fn draft(owner: &str, title: &str) -> FormDefinition {
        let mut store = FormDefinitionStore::for_owner(owner);
        store.set_title(title).unwrap();
        store.snapshot().unwrap()
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let repo = MemoryRepository::new();
        let form = draft("ada", "Contact");
        let id = repo.create(&form).await.unwrap();
        assert_eq!(id, form.id);
        assert_eq!(repo.get(&id).await.unwrap(), form);
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let repo = MemoryRepository::new();
        assert!(repo.get("nope").await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let repo = MemoryRepository::new();
        let err = repo.update("nope", FormPatch::default()).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_list_by_owner_filters() {
        let repo = MemoryRepository::new();
        repo.create(&draft("ada", "One")).await.unwrap();
        repo.create(&draft("grace", "Two")).await.unwrap();
        repo.create(&draft("ada", "Three")).await.unwrap();

        let titles: Vec<_> = repo
            .list_by_owner("ada")
            .await
            .unwrap()
            .into_iter()
            .map(|f| f.title)
            .collect();
        assert_eq!(titles.len(), 2);
        assert!(titles.contains(&"One".to_string()));
        assert!(titles.contains(&"Three".to_string()));
    }

    #[tokio::test]
    async fn test_last_write_wins() {
        let repo = MemoryRepository::new();
        let form = draft("ada", "Original");
        repo.create(&form).await.unwrap();

        // Two sessions load the same form and save independently
        let mut tab_a = FormDefinitionStore::new();
        tab_a.load_definition(repo.get(&form.id).await.unwrap()).unwrap();
        let mut tab_b = tab_a.clone();

        tab_a.add_field(FieldSpec::new("text").label("From A")).unwrap();
        tab_b.set_title("From B").unwrap();

        repo.update(&form.id, FormPatch::from_definition(&tab_a.snapshot().unwrap()))
            .await
            .unwrap();
        repo.update(&form.id, FormPatch::from_definition(&tab_b.snapshot().unwrap()))
            .await
            .unwrap();

        let stored = repo.get(&form.id).await.unwrap();
        assert_eq!(stored.title, "From B");
        assert!(stored.fields.is_empty());
    }

    #[tokio::test]
    async fn test_rejected_update_keeps_form_editable() {
        let repo = MemoryRepository::new();
        let mut store = FormDefinitionStore::for_owner("ada");
        store.add_field(FieldSpec::new("radio").label("Plan")).unwrap();
        let form = store.snapshot().unwrap();
        repo.create(&form).await.unwrap();

        let mut fields = form.fields.clone();
        fields[0].field_type = FieldType::Text;
        fields.push(fields[0].clone());
        let err = repo
            .update(
                &form.id,
                FormPatch {
                    fields: Some(fields),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Invalid(_)));

        let mut reopened = FormDefinitionStore::new();
        reopened
            .load_definition(repo.get(&form.id).await.unwrap())
            .unwrap();
        assert_eq!(reopened.snapshot().unwrap(), form);
    }

    #[tokio::test]
    async fn test_delete_cascades_to_responses() {
        let repo = MemoryRepository::new();
        let form = draft("ada", "Poll");
        let other = draft("ada", "Other");
        repo.create(&form).await.unwrap();
        repo.create(&other).await.unwrap();

        for _ in 0..3 {
            repo.create_response(&form.id, NewResponse::default())
                .await
                .unwrap();
        }
        repo.create_response(
            &other.id,
            NewResponse {
                data: ResponseData::new(),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(repo.list_responses(&form.id).await.unwrap().len(), 3);

        repo.delete(&form.id).await.unwrap();

        assert!(repo.list_responses(&form.id).await.unwrap().is_empty());
        assert_eq!(repo.list_responses(&other.id).await.unwrap().len(), 1);
        assert!(repo.get(&form.id).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let repo = MemoryRepository::new();
        assert!(repo.delete("nope").await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_response_to_missing_form_is_rejected() {
        let repo = MemoryRepository::new();
        let err = repo
            .create_response("ghost", NewResponse::default())
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }
}
