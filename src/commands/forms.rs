//! Form commands

use anyhow::{anyhow, Result};
use formsmith::{FormDefinitionStore, FormRepository};

use super::{edit_form, print_json};
use crate::FormCommands;

pub async fn handle<R: FormRepository>(
    action: FormCommands,
    repo: &R,
    owner: Option<&str>,
) -> Result<()> {
    let require_owner = || owner.ok_or_else(|| anyhow!("No owner given; pass --owner or set defaultOwner"));

    match action {
        FormCommands::New { title, description } => {
            let mut store = FormDefinitionStore::for_owner(require_owner()?);
            store.set_title(title)?;
            store.set_description(description)?;
            let id = repo.create(&store.snapshot()?).await?;
            println!("Created form: {id}");
        }
        FormCommands::List => {
            let forms = repo.list_by_owner(require_owner()?).await?;
            print_json(&forms)?;
        }
        FormCommands::Show { id } => {
            print_json(&repo.get(&id).await?)?;
        }
        FormCommands::Edit {
            id,
            title,
            description,
        } => {
            edit_form(repo, &id, |store| {
                if let Some(title) = title {
                    store.set_title(title)?;
                }
                if let Some(description) = description {
                    store.set_description(description)?;
                }
                Ok(())
            })
            .await?;
        }
        FormCommands::Delete { id } => {
            repo.delete(&id).await?;
            println!("Deleted form: {id}");
        }
        FormCommands::Publish { id } => {
            edit_form(repo, &id, |store| Ok(store.set_published(true)?)).await?;
        }
        FormCommands::Unpublish { id } => {
            edit_form(repo, &id, |store| Ok(store.set_published(false)?)).await?;
        }
        FormCommands::Expire { id, at, clear } => {
            if at.is_none() && !clear {
                return Err(anyhow!("Pass --at <timestamp> or --clear"));
            }
            edit_form(repo, &id, |store| Ok(store.set_expiration(at)?)).await?;
        }
    }
    Ok(())
}
