//! Submitted responses and submission-time validation

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::definition::FormDefinition;
use super::field::{FieldType, FormField};
use crate::error::{FormError, Result};

/// A submitted value, shaped by the type of the field it answers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponseValue {
    Bool(bool),
    Text(String),
    Choices(Vec<String>),
}

impl ResponseValue {
    fn is_blank(&self) -> bool {
        match self {
            Self::Text(s) => s.trim().is_empty(),
            Self::Choices(values) => values.is_empty(),
            Self::Bool(checked) => !checked,
        }
    }
}

impl From<&str> for ResponseValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<bool> for ResponseValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// Submitted values keyed by field id
pub type ResponseData = BTreeMap<String, ResponseValue>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

/// A response as handed to the repository, before an id is assigned
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewResponse {
    pub data: ResponseData,
    #[serde(default)]
    pub metadata: ResponseMetadata,
}

/// A stored submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormResponse {
    pub id: String,
    pub form_id: String,
    pub data: ResponseData,
    pub submitted_at: DateTime<Utc>,
    #[serde(flatten)]
    pub metadata: ResponseMetadata,
}

impl FormResponse {
    pub fn new(form_id: impl Into<String>, response: NewResponse) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            form_id: form_id.into(),
            data: response.data,
            submitted_at: Utc::now(),
            metadata: response.metadata,
        }
    }
}

/// Check a submission against the form's fields.
///
/// Collects every violation instead of stopping at the first one.
pub fn validate_submission(form: &FormDefinition, data: &ResponseData) -> Result<()> {
    let mut violations = Vec::new();

    for key in data.keys() {
        match form.field(key) {
            None => violations.push(format!("`{key}` is not a field of this form")),
            Some(field) if !field.field_type.accepts_input() => {
                violations.push(format!("`{}` does not accept a value", field.label))
            }
            Some(_) => {}
        }
    }

    for field in form.fields.iter().filter(|f| f.field_type.accepts_input()) {
        match data.get(&field.id) {
            Some(value) if !value.is_blank() => {
                if let Err(problem) = check_value(field, value) {
                    violations.push(format!("`{}` {problem}", field.label));
                }
            }
            _ if field.required => violations.push(format!("`{}` is required", field.label)),
            Some(value) => {
                // Blank optional values still need the right shape
                if let Err(problem) = check_shape(field, value) {
                    violations.push(format!("`{}` {problem}", field.label));
                }
            }
            None => {}
        }
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(FormError::ValidationFailed(violations))
    }
}

fn check_shape(field: &FormField, value: &ResponseValue) -> std::result::Result<(), String> {
    let ok = match field.field_type {
        FieldType::Checkbox => matches!(value, ResponseValue::Choices(_) | ResponseValue::Bool(_)),
        _ => matches!(value, ResponseValue::Text(_)),
    };
    if ok {
        Ok(())
    } else {
        Err(format!("expects a {} value", expected_shape(field.field_type)))
    }
}

fn expected_shape(field_type: FieldType) -> &'static str {
    match field_type {
        FieldType::Checkbox => "list or boolean",
        _ => "text",
    }
}

fn check_value(field: &FormField, value: &ResponseValue) -> std::result::Result<(), String> {
    check_shape(field, value)?;

    match (field.field_type, value) {
        (FieldType::Select | FieldType::Radio, ResponseValue::Text(choice)) => {
            if !field.options.contains(choice) {
                return Err(format!("has no option `{choice}`"));
            }
        }
        (FieldType::Checkbox, ResponseValue::Choices(choices)) => {
            if let Some(unknown) = choices.iter().find(|c| !field.options.contains(c)) {
                return Err(format!("has no option `{unknown}`"));
            }
        }
        (FieldType::Email, ResponseValue::Text(email)) => {
            let valid = email
                .trim()
                .split_once('@')
                .is_some_and(|(local, domain)| !local.is_empty() && valid_email_domain(domain));
            if !valid {
                return Err("is not a valid email address".to_string());
            }
        }
        (FieldType::Number, ResponseValue::Text(number)) => {
            if !number.trim().parse::<f64>().is_ok_and(f64::is_finite) {
                return Err("is not a number".to_string());
            }
        }
        (FieldType::Url, ResponseValue::Text(url)) => {
            let url = url.trim();
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err("is not an http(s) URL".to_string());
            }
        }
        _ => {}
    }
    Ok(())
}

/// A single `@`-free domain with a non-empty label before its first dot
fn valid_email_domain(domain: &str) -> bool {
    !domain.contains('@')
        && domain
            .split_once('.')
            .is_some_and(|(label, rest)| !label.is_empty() && !rest.is_empty())
}
