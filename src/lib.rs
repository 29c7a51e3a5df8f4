//! Formsmith - form definitions, editing and submissions
//!
//! The core is [`FormDefinitionStore`], a single-writer store that applies
//! order-preserving mutations to one form definition. Persistence goes
//! through the [`FormRepository`] contract, and [`SubmissionHandler`]
//! validates external submissions before storing them.

pub mod config;
pub mod error;
pub mod repository;
pub mod state;
pub mod submission;

pub use error::{FormError, RepositoryError, Result, SubmitError};
pub use repository::{FormPatch, FormRepository, JsonFileRepository, MemoryRepository};
pub use state::{
    FieldPatch, FieldSpec, FieldType, FormDefinition, FormDefinitionStore, FormField,
    FormResponse, FormStyle, NewResponse, ResponseData, ResponseMetadata, ResponseValue,
    StylePatch,
};
pub use submission::SubmissionHandler;
