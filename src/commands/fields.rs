//! Field commands

use anyhow::{Context, Result};
use formsmith::{FieldPatch, FieldSpec, FieldType, FormRepository};

use super::edit_form;
use crate::FieldCommands;

pub async fn handle<R: FormRepository>(action: FieldCommands, repo: &R) -> Result<()> {
    match action {
        FieldCommands::Add {
            form_id,
            field_type,
            label,
            placeholder,
            required,
            options,
            default_value,
        } => {
            let spec = FieldSpec {
                field_type,
                label,
                placeholder,
                required,
                options: (!options.is_empty()).then_some(options),
                default_value,
            };
            edit_form(repo, &form_id, |store| {
                let id = store.add_field(spec)?;
                tracing::info!(form_id = %form_id, field_id = %id, "Added field");
                Ok(())
            })
            .await
        }
        FieldCommands::Update {
            form_id,
            field_id,
            field_type,
            label,
            placeholder,
            clear_placeholder,
            required,
            options,
            default_value,
        } => {
            let field_type = field_type
                .map(|t| t.parse::<FieldType>())
                .transpose()
                .context("Invalid --type")?;
            let placeholder = if clear_placeholder {
                Some(None)
            } else {
                placeholder.map(Some)
            };
            let patch = FieldPatch {
                field_type,
                label,
                placeholder,
                required,
                options: (!options.is_empty()).then_some(options),
                default_value: default_value.map(Some),
            };
            edit_form(repo, &form_id, |store| Ok(store.update_field(&field_id, patch)?)).await
        }
        FieldCommands::Remove { form_id, field_id } => {
            edit_form(repo, &form_id, |store| {
                if !store.remove_field(&field_id)? {
                    tracing::info!(field_id = %field_id, "Field not present, nothing removed");
                }
                Ok(())
            })
            .await
        }
        FieldCommands::Move { form_id, from, to } => {
            edit_form(repo, &form_id, |store| Ok(store.reorder_fields(from, to)?)).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formsmith::state::DEFAULT_CHOICE_OPTIONS;
    use formsmith::{FormDefinitionStore, MemoryRepository};

    async fn repo_with_form() -> (MemoryRepository, String) {
        let repo = MemoryRepository::new();
        let form = FormDefinitionStore::for_owner("ada").snapshot().unwrap();
        let id = repo.create(&form).await.unwrap();
        (repo, id)
    }

    fn add(form_id: &str, field_type: &str, options: &[&str]) -> FieldCommands {
        FieldCommands::Add {
            form_id: form_id.to_string(),
            field_type: field_type.to_string(),
            label: "Plan".to_string(),
            placeholder: None,
            required: false,
            options: options.iter().map(|o| o.to_string()).collect(),
            default_value: None,
        }
    }

    fn update(form_id: &str, field_id: &str) -> FieldCommands {
        FieldCommands::Update {
            form_id: form_id.to_string(),
            field_id: field_id.to_string(),
            field_type: None,
            label: None,
            placeholder: None,
            clear_placeholder: false,
            required: None,
            options: Vec::new(),
            default_value: None,
        }
    }

    #[tokio::test]
    async fn test_add_without_options_seeds_defaults() {
        let (repo, id) = repo_with_form().await;
        handle(add(&id, "select", &[]), &repo).await.unwrap();

        let form = repo.get(&id).await.unwrap();
        assert_eq!(form.fields.len(), 1);
        assert_eq!(form.fields[0].options, DEFAULT_CHOICE_OPTIONS);
    }

    #[tokio::test]
    async fn test_add_with_options_keeps_them() {
        let (repo, id) = repo_with_form().await;
        handle(add(&id, "radio", &["Free", "Pro"]), &repo)
            .await
            .unwrap();

        let form = repo.get(&id).await.unwrap();
        assert_eq!(form.fields[0].options, vec!["Free", "Pro"]);
    }

    #[tokio::test]
    async fn test_add_unknown_type_leaves_form_unchanged() {
        let (repo, id) = repo_with_form().await;
        assert!(handle(add(&id, "bogus", &[]), &repo).await.is_err());
        assert!(repo.get(&id).await.unwrap().fields.is_empty());
    }

    #[tokio::test]
    async fn test_update_without_options_keeps_existing() {
        let (repo, id) = repo_with_form().await;
        handle(add(&id, "radio", &["Free", "Pro"]), &repo)
            .await
            .unwrap();
        let field_id = repo.get(&id).await.unwrap().fields[0].id.clone();

        let mut action = update(&id, &field_id);
        if let FieldCommands::Update { label, .. } = &mut action {
            *label = Some("Tier".to_string());
        }
        handle(action, &repo).await.unwrap();

        let field = repo.get(&id).await.unwrap().fields[0].clone();
        assert_eq!(field.label, "Tier");
        assert_eq!(field.options, vec!["Free", "Pro"]);
    }

    #[tokio::test]
    async fn test_update_rejects_unknown_type() {
        let (repo, id) = repo_with_form().await;
        handle(add(&id, "text", &[]), &repo).await.unwrap();
        let field_id = repo.get(&id).await.unwrap().fields[0].id.clone();

        let mut action = update(&id, &field_id);
        if let FieldCommands::Update { field_type, .. } = &mut action {
            *field_type = Some("bogus".to_string());
        }
        assert!(handle(action, &repo).await.is_err());
    }

    #[tokio::test]
    async fn test_remove_missing_field_is_ok() {
        let (repo, id) = repo_with_form().await;
        let action = FieldCommands::Remove {
            form_id: id.clone(),
            field_id: "missing".to_string(),
        };
        assert!(handle(action, &repo).await.is_ok());
    }

    #[tokio::test]
    async fn test_move_out_of_range_fails() {
        let (repo, id) = repo_with_form().await;
        handle(add(&id, "text", &[]), &repo).await.unwrap();
        let action = FieldCommands::Move {
            form_id: id.clone(),
            from: 0,
            to: 3,
        };
        assert!(handle(action, &repo).await.is_err());
    }
}
