//! Error types shared by the form store, persistence and submission layers

use thiserror::Error;

use crate::state::FieldType;

/// Failures raised by the form definition store and submission validation.
///
/// All of these are local and recoverable: the store is left unchanged and
/// the caller decides what to show the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("unknown field type `{0}`")]
    InvalidFieldType(String),

    #[error("field `{0}` not found")]
    FieldNotFound(String),

    #[error("index {index} is out of range for {len} fields")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("malformed form record: {0}")]
    MalformedRecord(String),

    #[error("form store has no form loaded")]
    NotReady,

    #[error("submission rejected: {}", .0.join("; "))]
    ValidationFailed(Vec<String>),

    #[error("invalid style: {0}")]
    InvalidStyle(String),

    #[error("options are not allowed on `{0}` fields")]
    OptionsNotAllowed(FieldType),
}

pub type Result<T> = std::result::Result<T, FormError>;

/// Failures raised by a persistence backend
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("{kind} `{id}` not found")]
    NotFound { kind: &'static str, id: String },

    #[error("refusing to store form: {0}")]
    Invalid(FormError),

    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("stored data could not be (de)serialized: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl RepositoryError {
    pub fn form_not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            kind: "form",
            id: id.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Failures raised while accepting an external submission
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("form is not accepting submissions: {0}")]
    Closed(String),

    #[error(transparent)]
    Rejected(#[from] FormError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_failed_lists_every_violation() {
        let err = FormError::ValidationFailed(vec![
            "`name` is required".to_string(),
            "`country` has an unknown option".to_string(),
        ]);
        assert_eq!(
            err.to_string(),
            "submission rejected: `name` is required; `country` has an unknown option"
        );
    }

    #[test]
    fn test_index_out_of_range_message() {
        let err = FormError::IndexOutOfRange { index: 4, len: 3 };
        assert_eq!(err.to_string(), "index 4 is out of range for 3 fields");
    }

    #[test]
    fn test_options_not_allowed_uses_type_name() {
        let err = FormError::OptionsNotAllowed(FieldType::Email);
        assert_eq!(err.to_string(), "options are not allowed on `email` fields");
    }

    #[test]
    fn test_form_not_found_helper() {
        let err = RepositoryError::form_not_found("abc");
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "form `abc` not found");
    }

    #[test]
    fn test_submit_error_is_transparent_over_form_error() {
        let err: SubmitError = FormError::NotReady.into();
        assert_eq!(err.to_string(), "form store has no form loaded");
    }
}
