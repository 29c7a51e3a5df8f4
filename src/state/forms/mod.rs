//! Form domain layer
//!
//! Type-safe form definitions, the single-writer editing store and
//! submission-time validation.

mod definition;
mod field;
mod form_state;
mod response;
mod style;

pub use definition::FormDefinition;
pub use field::{FieldPatch, FieldSpec, FieldType, FormField, DEFAULT_CHOICE_OPTIONS};
pub use form_state::FormDefinitionStore;
pub use response::{
    validate_submission, FormResponse, NewResponse, ResponseData, ResponseMetadata, ResponseValue,
};
pub use style::{FormStyle, StylePatch, STYLE_SCHEMA_VERSION};
