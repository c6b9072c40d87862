//! CLI command definitions and handlers

use anyhow::Context;
use clap::Subcommand;
use serde::Serialize;
use tracing::info;

use crate::core::client::MachineTranslationClient;
use crate::core::models::{AddMtRequest, ListMtsOptions, PatchRequest, TranslateRequest};

/// Commands for the MT management CLI
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List machine translation engines
    List {
        /// Only engines of this group
        #[arg(long)]
        group_id: Option<u64>,

        /// Page size
        #[arg(long)]
        limit: Option<u64>,

        /// Page start
        #[arg(long)]
        offset: Option<u64>,
    },

    /// Create an engine
    Create {
        /// Engine name
        #[arg(short, long)]
        name: String,

        /// Provider type (google, deepl, ...)
        #[arg(short = 't', long = "type")]
        engine_type: String,

        /// Provider credentials as a JSON object, e.g. '{"apiKey":"..."}'
        #[arg(short, long)]
        credentials: String,

        /// Group to create the engine in
        #[arg(long)]
        group_id: Option<u64>,
    },

    /// Show one engine
    Get {
        /// Engine id
        id: u64,
    },

    /// Delete an engine
    Delete {
        /// Engine id
        id: u64,
    },

    /// Update an engine
    Update {
        /// Engine id
        id: u64,

        /// New name
        #[arg(long)]
        name: Option<String>,

        /// Enable or disable the engine
        #[arg(long)]
        enabled: Option<bool>,

        /// Raw patch operations as a JSON array
        #[arg(long)]
        patch: Option<String>,
    },

    /// Translate strings through an engine
    Translate {
        /// Engine id
        id: u64,

        /// Target language id
        #[arg(short, long)]
        target_lang: String,

        /// Source language id (detected if not specified)
        #[arg(long)]
        source_lang: Option<String>,

        /// Strings to translate
        strings: Vec<String>,
    },
}

/// Run a command against the API
pub async fn run(client: &MachineTranslationClient, command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::List {
            group_id,
            limit,
            offset,
        } => {
            let options = ListMtsOptions {
                group_id,
                limit,
                offset,
            };
            let page = client.list_mts(&options).await?;
            info!(
                "Listed {} engines (offset {}, limit {})",
                page.len(),
                page.pagination.offset,
                page.pagination.limit
            );
            print_json(&page)
        }
        Commands::Create {
            name,
            engine_type,
            credentials,
            group_id,
        } => {
            let credentials: serde_json::Value = serde_json::from_str(&credentials)
                .context("--credentials must be a JSON object")?;
            let mut spec = AddMtRequest::new(name, engine_type, credentials);
            spec.group_id = group_id;

            let created = client.create_mt(&spec).await?;
            info!("Created engine {}", created.data.id);
            print_json(&created)
        }
        Commands::Get { id } => print_json(&client.get_mt(id).await?),
        Commands::Delete { id } => {
            client.delete_mt(id).await?;
            println!("Deleted engine {}", id);
            Ok(())
        }
        Commands::Update {
            id,
            name,
            enabled,
            patch,
        } => {
            let ops = build_patch(name, enabled, patch.as_deref())?;
            print_json(&client.update_mt(id, &ops).await?)
        }
        Commands::Translate {
            id,
            target_lang,
            source_lang,
            strings,
        } => {
            let mut request = TranslateRequest::new(target_lang);
            if let Some(lang) = source_lang {
                request = request.with_source_language(lang);
            }
            if !strings.is_empty() {
                request = request.with_strings(strings);
            }
            print_json(&client.translate(id, &request).await?)
        }
    }
}

/// Collect patch operations from the update flags
pub fn build_patch(
    name: Option<String>,
    enabled: Option<bool>,
    raw: Option<&str>,
) -> anyhow::Result<Vec<PatchRequest>> {
    let mut ops = match raw {
        Some(raw) => serde_json::from_str::<Vec<PatchRequest>>(raw)
            .context("--patch must be a JSON array of {op, path, value}")?,
        None => Vec::new(),
    };

    if let Some(name) = name {
        ops.push(PatchRequest::replace("/name", name));
    }
    if let Some(enabled) = enabled {
        ops.push(PatchRequest::replace("/isEnabled", enabled));
    }

    if ops.is_empty() {
        anyhow::bail!("Nothing to update: pass --name, --enabled or --patch");
    }

    Ok(ops)
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
