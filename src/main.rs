//! Formsmith CLI
//!
//! Edit forms and collect responses in a local JSON store.
//!
//! # Usage
//!
//! ```bash
//! formsmith --owner ada forms new --title "Signup"
//! formsmith fields add <form-id> --type select --label Country
//! formsmith fields move <form-id> 1 0
//! formsmith forms publish <form-id>
//! formsmith responses submit <form-id> --data '{"<field-id>": "Option 2"}'
//! ```

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use chrono::{DateTime, Utc};
use formsmith::config::AppConfig;
use formsmith::JsonFileRepository;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "formsmith")]
#[command(version)]
#[command(about = "Build forms and collect responses", long_about = None)]
struct Cli {
    /// Directory holding the form store
    #[arg(long, global = true, env = "FORMSMITH_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Owner of the forms being managed
    #[arg(long, global = true, env = "FORMSMITH_OWNER")]
    owner: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage forms
    Forms {
        #[command(subcommand)]
        action: FormCommands,
    },
    /// Edit the fields of a form
    Fields {
        #[command(subcommand)]
        action: FieldCommands,
    },
    /// Edit the style of a form
    Style {
        #[command(subcommand)]
        action: StyleCommands,
    },
    /// Submit and list responses
    Responses {
        #[command(subcommand)]
        action: ResponseCommands,
    },
    /// Inspect or initialize the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum FormCommands {
    /// Create an empty form
    New {
        #[arg(long, default_value = "")]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// List the owner's forms
    List,
    /// Show a form definition
    Show { id: String },
    /// Change title or description
    Edit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete a form and all of its responses
    Delete { id: String },
    /// Open a form for submissions
    Publish { id: String },
    /// Close a form for submissions
    Unpublish { id: String },
    /// Set or clear the expiration time
    Expire {
        id: String,
        /// RFC 3339 timestamp, e.g. 2026-12-31T23:59:59Z
        #[arg(long, conflicts_with = "clear")]
        at: Option<DateTime<Utc>>,
        #[arg(long)]
        clear: bool,
    },
}

#[derive(Subcommand)]
enum FieldCommands {
    /// Append a field
    Add {
        form_id: String,
        #[arg(long = "type")]
        field_type: String,
        #[arg(long, default_value = "")]
        label: String,
        #[arg(long)]
        placeholder: Option<String>,
        #[arg(long)]
        required: bool,
        /// Choice option; repeat for several
        #[arg(long = "option")]
        options: Vec<String>,
        #[arg(long)]
        default_value: Option<String>,
    },
    /// Change attributes of a field
    Update {
        form_id: String,
        field_id: String,
        #[arg(long = "type")]
        field_type: Option<String>,
        #[arg(long)]
        label: Option<String>,
        #[arg(long, conflicts_with = "clear_placeholder")]
        placeholder: Option<String>,
        #[arg(long)]
        clear_placeholder: bool,
        #[arg(long)]
        required: Option<bool>,
        /// Replacement options; repeat for several
        #[arg(long = "option")]
        options: Vec<String>,
        #[arg(long)]
        default_value: Option<String>,
    },
    /// Remove a field (no-op when it does not exist)
    Remove { form_id: String, field_id: String },
    /// Move the field at FROM to TO
    Move {
        form_id: String,
        from: usize,
        to: usize,
    },
}

#[derive(Subcommand)]
enum StyleCommands {
    /// Merge a JSON style patch, e.g. '{"buttonColor": "#000000"}'
    Set { form_id: String, patch: String },
}

#[derive(Subcommand)]
enum ResponseCommands {
    /// Submit a response given as JSON keyed by field id
    Submit {
        form_id: String,
        #[arg(long)]
        data: String,
        #[arg(long)]
        source_address: Option<String>,
        #[arg(long)]
        user_agent: Option<String>,
    },
    /// List the responses of a form
    List { form_id: String },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Print the effective configuration
    Show,
    /// Write the configuration file with the current values
    Init,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = AppConfig::load()?;

    // Initialize logging
    let default_filter = config
        .log_filter
        .clone()
        .unwrap_or_else(|| "formsmith=info".to_string());
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    if cli.data_dir.is_some() {
        config.data_dir = cli.data_dir;
    }
    let owner = cli.owner.or_else(|| config.default_owner.clone());
    let repository = JsonFileRepository::new(config.data_file());
    tracing::debug!(path = %repository.path().display(), "Using form store");

    let result = match cli.command {
        Commands::Forms { action } => {
            commands::forms::handle(action, &repository, owner.as_deref()).await
        }
        Commands::Fields { action } => commands::fields::handle(action, &repository).await,
        Commands::Style { action } => commands::style::handle(action, &repository).await,
        Commands::Responses { action } => commands::responses::handle(action, repository).await,
        Commands::Config { action } => commands::config::handle(action, &config),
    };

    if let Err(err) = result {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }

    Ok(())
}
