//! CLI commands

pub mod config;
pub mod fields;
pub mod forms;
pub mod responses;
pub mod style;

use anyhow::{Context, Result};
use formsmith::{FormDefinitionStore, FormPatch, FormRepository};
use serde::Serialize;

/// Print a value as pretty JSON on stdout
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Load a stored form into an editing store
pub async fn open_store<R: FormRepository>(repo: &R, form_id: &str) -> Result<FormDefinitionStore> {
    let form = repo
        .get(form_id)
        .await
        .with_context(|| format!("Failed to load form {form_id}"))?;
    let mut store = FormDefinitionStore::new();
    store.load_definition(form)?;
    Ok(store)
}

/// Persist the store's current definition, overwriting the stored copy
pub async fn save_store<R: FormRepository>(repo: &R, store: &FormDefinitionStore) -> Result<()> {
    let form = store.snapshot()?;
    repo.update(&form.id, FormPatch::from_definition(&form))
        .await
        .with_context(|| format!("Failed to save form {}", form.id))?;
    Ok(())
}

/// Open a form, apply `edit`, save it and print the result
pub async fn edit_form<R, F>(repo: &R, form_id: &str, edit: F) -> Result<()>
where
    R: FormRepository,
    F: FnOnce(&mut FormDefinitionStore) -> Result<()>,
{
    let mut store = open_store(repo, form_id).await?;
    edit(&mut store)?;
    save_store(repo, &store).await?;
    print_json(&store.snapshot()?)
}
