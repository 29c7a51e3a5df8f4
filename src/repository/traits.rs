//! Persistence contract for form definitions and their responses

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::RepositoryError;
use crate::state::{FormDefinition, FormField, FormResponse, FormStyle, NewResponse};

pub type RepoResult<T> = std::result::Result<T, RepositoryError>;

/// Replacement values for a stored form; `None` leaves a member as stored.
///
/// Patches are applied last-write-wins: there is no version check, so the
/// most recent save of a member overwrites whatever was there.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub fields: Option<Vec<FormField>>,
    pub style: Option<FormStyle>,
    pub expires_at: Option<Option<DateTime<Utc>>>,
    pub is_published: Option<bool>,
}

impl FormPatch {
    /// Patch replacing every mutable member with the values of `form`
    pub fn from_definition(form: &FormDefinition) -> Self {
        Self {
            title: Some(form.title.clone()),
            description: Some(form.description.clone()),
            fields: Some(form.fields.clone()),
            style: Some(form.style.clone()),
            expires_at: Some(form.expires_at),
            is_published: Some(form.is_published),
        }
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Apply onto a stored record, stamping `updated_at`
    pub fn apply_to(self, form: &mut FormDefinition) {
        if let Some(title) = self.title {
            form.title = title;
        }
        if let Some(description) = self.description {
            form.description = description;
        }
        if let Some(fields) = self.fields {
            form.fields = fields;
        }
        if let Some(style) = self.style {
            form.style = style;
        }
        if let Some(expires_at) = self.expires_at {
            form.expires_at = expires_at;
        }
        if let Some(is_published) = self.is_published {
            form.is_published = is_published;
        }
        form.updated_at = Utc::now();
    }
}

/// Storage backend for forms and responses, enabling mocking in tests
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FormRepository: Send + Sync {
    /// Store a new form and return its id
    async fn create(&self, form: &FormDefinition) -> RepoResult<String>;

    /// Fetch a form by id
    async fn get(&self, id: &str) -> RepoResult<FormDefinition>;

    /// Apply a patch to a stored form
    async fn update(&self, id: &str, patch: FormPatch) -> RepoResult<()>;

    /// Delete a form together with all of its responses
    async fn delete(&self, id: &str) -> RepoResult<()>;

    /// All forms owned by `owner_id`, oldest first
    async fn list_by_owner(&self, owner_id: &str) -> RepoResult<Vec<FormDefinition>>;

    /// Store a response for an existing form and return its id
    async fn create_response(&self, form_id: &str, response: NewResponse) -> RepoResult<String>;

    /// Responses of a form in submission order
    async fn list_responses(&self, form_id: &str) -> RepoResult<Vec<FormResponse>>;
}
