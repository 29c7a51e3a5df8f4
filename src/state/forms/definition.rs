//! The editable form definition record

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::field::FormField;
use super::style::FormStyle;
use crate::error::{FormError, Result};

/// Fields, style and lifecycle metadata of one form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FormDefinition {
    pub id: String,
    pub owner_id: String,
    pub title: String,
    pub description: String,
    /// Render and tab order
    pub fields: Vec<FormField>,
    pub style: FormStyle,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
    pub is_published: bool,
}

impl FormDefinition {
    /// A fresh, empty, unpublished form
    pub fn new(owner_id: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            owner_id: owner_id.into(),
            title: String::new(),
            description: String::new(),
            fields: Vec::new(),
            style: FormStyle::default(),
            created_at: now,
            updated_at: now,
            expires_at: None,
            is_published: false,
        }
    }

    pub fn field(&self, id: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.id == id)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.id == id)
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }

    /// Published and not expired
    pub fn accepts_submissions(&self, now: DateTime<Utc>) -> bool {
        self.is_published && !self.is_expired(now)
    }

    /// Record-level invariants that serde alone cannot express
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(FormError::MalformedRecord("form id is empty".to_string()));
        }

        let mut seen = HashSet::new();
        for field in &self.fields {
            if field.id.trim().is_empty() {
                return Err(FormError::MalformedRecord("field id is empty".to_string()));
            }
            if !seen.insert(field.id.as_str()) {
                return Err(FormError::MalformedRecord(format!(
                    "duplicate field id `{}`",
                    field.id
                )));
            }
            if !field.field_type.is_choice() && !field.options.is_empty() {
                return Err(FormError::MalformedRecord(format!(
                    "field `{}` of type `{}` carries options",
                    field.id, field.field_type
                )));
            }
        }

        self.style
            .validate()
            .map_err(|e| FormError::MalformedRecord(e.to_string()))
    }
}
