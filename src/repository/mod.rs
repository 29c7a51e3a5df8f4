//! Persistence backends for forms and responses

mod collections;
mod json_file;
mod memory;
mod traits;

pub use json_file::JsonFileRepository;
pub use memory::MemoryRepository;
pub use traits::{FormPatch, FormRepository, RepoResult};

#[cfg(test)]
pub use traits::MockFormRepository;
