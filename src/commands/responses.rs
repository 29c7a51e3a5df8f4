//! Response commands

use anyhow::{Context, Result};
use formsmith::{FormRepository, ResponseData, ResponseMetadata, SubmissionHandler};

use super::print_json;
use crate::ResponseCommands;

pub async fn handle<R: FormRepository>(action: ResponseCommands, repo: R) -> Result<()> {
    let handler = SubmissionHandler::new(repo);

    match action {
        ResponseCommands::Submit {
            form_id,
            data,
            source_address,
            user_agent,
        } => {
            let data: ResponseData =
                serde_json::from_str(&data).context("Response data is not valid JSON")?;
            let metadata = ResponseMetadata {
                source_address,
                user_agent,
            };
            let id = handler.submit(&form_id, data, metadata).await?;
            println!("Accepted response: {id}");
        }
        ResponseCommands::List { form_id } => {
            let responses = handler.repository().list_responses(&form_id).await?;
            print_json(&responses)?;
        }
    }
    Ok(())
}
