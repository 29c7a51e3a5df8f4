//! Working state of one form being edited

use chrono::{DateTime, Utc};

use super::definition::FormDefinition;
use super::field::{FieldPatch, FieldSpec, FormField};
use super::style::StylePatch;
use crate::error::{FormError, Result};

/// Lifecycle of a store
#[derive(Debug, Clone, Default)]
enum StoreState {
    #[default]
    Uninitialized,
    Ready(FormDefinition),
}

/// Holds one form definition and applies order-preserving mutations to it.
///
/// A store has a single writer (the owning editing session) and does no I/O.
/// Persisting is an explicit call on a repository with a [`snapshot`].
/// Every failing operation leaves the store exactly as it was.
///
/// [`snapshot`]: FormDefinitionStore::snapshot
#[derive(Debug, Clone, Default)]
pub struct FormDefinitionStore {
    state: StoreState,
}

impl FormDefinitionStore {
    /// An uninitialized store; call [`create`](Self::create) or a `load_*` method next
    pub fn new() -> Self {
        Self::default()
    }

    /// A ready store holding a fresh form for `owner_id`
    pub fn for_owner(owner_id: impl Into<String>) -> Self {
        let mut store = Self::new();
        store.create(owner_id);
        store
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, StoreState::Ready(_))
    }

    /// Start editing a brand new, empty form and return its id
    pub fn create(&mut self, owner_id: impl Into<String>) -> String {
        let form = FormDefinition::new(owner_id);
        let id = form.id.clone();
        self.state = StoreState::Ready(form);
        id
    }

    fn form(&self) -> Result<&FormDefinition> {
        match &self.state {
            StoreState::Ready(form) => Ok(form),
            StoreState::Uninitialized => Err(FormError::NotReady),
        }
    }

    fn form_mut(&mut self) -> Result<&mut FormDefinition> {
        match &mut self.state {
            StoreState::Ready(form) => Ok(form),
            StoreState::Uninitialized => Err(FormError::NotReady),
        }
    }

    /// Run a mutation and stamp `updated_at` when it succeeds
    fn mutate<T>(&mut self, f: impl FnOnce(&mut FormDefinition) -> Result<T>) -> Result<T> {
        let form = self.form_mut()?;
        let value = f(form)?;
        form.updated_at = Utc::now();
        Ok(value)
    }

    pub fn fields(&self) -> Result<&[FormField]> {
        Ok(&self.form()?.fields)
    }

    pub fn field(&self, id: &str) -> Result<&FormField> {
        self.form()?
            .field(id)
            .ok_or_else(|| FormError::FieldNotFound(id.to_string()))
    }

    pub fn set_title(&mut self, title: impl Into<String>) -> Result<()> {
        let title = title.into();
        self.mutate(|form| {
            form.title = title;
            Ok(())
        })
    }

    pub fn set_description(&mut self, description: impl Into<String>) -> Result<()> {
        let description = description.into();
        self.mutate(|form| {
            form.description = description;
            Ok(())
        })
    }

    /// Append a new field and return its generated id.
    ///
    /// Choice fields created without options receive
    /// [`DEFAULT_CHOICE_OPTIONS`](super::field::DEFAULT_CHOICE_OPTIONS).
    pub fn add_field(&mut self, spec: FieldSpec) -> Result<String> {
        self.form()?;
        let field = FormField::from_spec(spec)?;
        self.mutate(|form| {
            let id = field.id.clone();
            form.fields.push(field);
            Ok(id)
        })
    }

    /// Merge `patch` onto the field with `id`, leaving every other field and
    /// the order untouched
    pub fn update_field(&mut self, id: &str, patch: FieldPatch) -> Result<()> {
        self.mutate(|form| {
            let field = form
                .fields
                .iter_mut()
                .find(|f| f.id == id)
                .ok_or_else(|| FormError::FieldNotFound(id.to_string()))?;
            field.apply(patch)
        })
    }

    /// Remove the field with `id`. Removing a missing id is a no-op that
    /// returns `false`.
    pub fn remove_field(&mut self, id: &str) -> Result<bool> {
        let Some(index) = self.form()?.position(id) else {
            return Ok(false);
        };
        self.mutate(|form| {
            form.fields.remove(index);
            Ok(true)
        })
    }

    /// Take the field at `source` out and reinsert it at `destination` of the
    /// shortened list. Not a swap: `[A, B, C]` with `(0, 2)` gives `[B, C, A]`.
    pub fn reorder_fields(&mut self, source: usize, destination: usize) -> Result<()> {
        let len = self.form()?.fields.len();
        for index in [source, destination] {
            if index >= len {
                return Err(FormError::IndexOutOfRange { index, len });
            }
        }
        self.mutate(|form| {
            let field = form.fields.remove(source);
            form.fields.insert(destination, field);
            Ok(())
        })
    }

    pub fn update_style(&mut self, patch: StylePatch) -> Result<()> {
        self.mutate(|form| {
            form.style = form.style.merged(patch)?;
            Ok(())
        })
    }

    /// Set or clear the expiration instant. Does not touch `updated_at`.
    pub fn set_expiration(&mut self, expires_at: Option<DateTime<Utc>>) -> Result<()> {
        self.form_mut()?.expires_at = expires_at;
        Ok(())
    }

    pub fn set_published(&mut self, published: bool) -> Result<()> {
        self.mutate(|form| {
            form.is_published = published;
            Ok(())
        })
    }

    /// Replace the working state with a fresh empty form for the same owner.
    /// Already persisted copies are not affected.
    pub fn reset(&mut self) -> Result<String> {
        let owner_id = self.form()?.owner_id.clone();
        Ok(self.create(owner_id))
    }

    /// Load an external record, e.g. a JSON document fetched from storage
    pub fn load_from(&mut self, record: serde_json::Value) -> Result<()> {
        let form: FormDefinition = serde_json::from_value(record)
            .map_err(|e| FormError::MalformedRecord(e.to_string()))?;
        self.load_definition(form)
    }

    pub fn load_definition(&mut self, form: FormDefinition) -> Result<()> {
        form.validate()?;
        self.state = StoreState::Ready(form);
        Ok(())
    }

    /// A full copy of the current definition for handoff to persistence
    pub fn snapshot(&self) -> Result<FormDefinition> {
        self.form().cloned()
    }
}
