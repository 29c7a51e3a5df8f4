//! Style commands

use anyhow::{Context, Result};
use formsmith::{FormRepository, StylePatch};

use super::edit_form;
use crate::StyleCommands;

pub async fn handle<R: FormRepository>(action: StyleCommands, repo: &R) -> Result<()> {
    match action {
        StyleCommands::Set { form_id, patch } => {
            let patch: StylePatch =
                serde_json::from_str(&patch).context("Style patch is not valid JSON")?;
            edit_form(repo, &form_id, |store| Ok(store.update_style(patch)?)).await
        }
    }
}
