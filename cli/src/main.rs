//! Policy Template CLI
//!
//! Loads a serialized policy document into the template model and reports
//! on it.
//!
//! # Usage
//!
//! ```bash
//! # Summary plus consistency report
//! policy-template inspect policy.json
//!
//! # Variable catalogue with external inputs
//! policy-template variables policy.json --schemas schemas.json --tools tools.json
//!
//! # Wrap a block in a new module and print the result
//! policy-template convert-module policy.json --node 7d1c...
//! ```

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use policy_template_core::models::{Schema, Token, ToolTemplate};
use policy_template_core::tree::{BlockCatalogue, CatalogueNodeFactory};
use policy_template_core::{
    validate_template, PolicyDocument, PolicyTemplate, TemplateConfig, TemplateContext,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Parser)]
#[command(name = "policy-template")]
#[command(version)]
#[command(about = "Inspect and transform serialized policy templates")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Template configuration (JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Recognised block types (JSON array)
    #[arg(long, global = true)]
    catalogue: Option<PathBuf>,

    /// Raise log level to debug
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print status flags, counts, and the consistency report
    Inspect {
        /// Policy document (JSON)
        document: PathBuf,
    },

    /// Print the variable snapshot as JSON
    Variables {
        document: PathBuf,

        /// Schema list (JSON array)
        #[arg(long)]
        schemas: Option<PathBuf>,

        /// Token list (JSON array)
        #[arg(long)]
        tokens: Option<PathBuf>,

        /// Tool template list (JSON array)
        #[arg(long)]
        tools: Option<PathBuf>,
    },

    /// Re-serialize the document
    Export { document: PathBuf },

    /// Wrap a node in a new module and print the document
    ConvertModule {
        document: PathBuf,

        /// Id of the node to convert
        #[arg(long)]
        node: String,
    },

    /// Print the SHA-256 fingerprint of the serialized document
    Fingerprint { document: PathBuf },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Summary<'a> {
    name: &'a str,
    status: Option<&'a str>,
    is_draft: bool,
    is_published: bool,
    is_dry_run: bool,
    is_publish_error: bool,
    readonly: bool,
    nodes: usize,
    blocks: usize,
    modules: usize,
    tools: usize,
    events: usize,
    unresolved_events: usize,
    roles: usize,
    groups: usize,
    topics: usize,
    token_templates: usize,
    problems: Vec<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_level.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let context = load_context(cli.config.as_deref(), cli.catalogue.as_deref())?;

    match cli.command {
        Commands::Inspect { document } => {
            let template = load_template(&document, context)?;
            print_json(&summarize(&template))
        }
        Commands::Variables {
            document,
            schemas,
            tokens,
            tools,
        } => {
            let mut template = load_template(&document, context)?;
            if let Some(path) = schemas {
                template.set_schemas(read_json::<Vec<Schema>>(&path)?);
            }
            if let Some(path) = tokens {
                template.set_tokens(read_json::<Vec<Token>>(&path)?);
            }
            if let Some(path) = tools {
                template.set_tools(read_json::<Vec<ToolTemplate>>(&path)?);
            }
            print_json(template.variables())
        }
        Commands::Export { document } => {
            let template = load_template(&document, context)?;
            print_json(&template.get_json())
        }
        Commands::ConvertModule { document, node } => {
            let mut template = load_template(&document, context)?;
            let module = template
                .convert_module(&node)
                .with_context(|| format!("Failed to convert node {}", node))?;
            debug!(node = %node, module = %module, "node converted");
            print_json(&template.get_json())
        }
        Commands::Fingerprint { document } => {
            let template = load_template(&document, context)?;
            println!("{}", template.fingerprint()?);
            Ok(())
        }
    }
}

fn load_context(config: Option<&Path>, catalogue: Option<&Path>) -> Result<TemplateContext> {
    let mut context = TemplateContext::default();
    if let Some(path) = config {
        context = context.with_config(read_json::<TemplateConfig>(path)?);
    }
    if let Some(path) = catalogue {
        let catalogue = read_json::<BlockCatalogue>(path)?;
        context = context.with_factory(CatalogueNodeFactory::new(catalogue));
    }
    Ok(context)
}

fn load_template(path: &Path, context: TemplateContext) -> Result<PolicyTemplate> {
    let document: PolicyDocument = read_json(path)?;
    if document.config.is_none() {
        bail!("{} has no root config", path.display());
    }
    PolicyTemplate::with_context(Some(document), context)
        .with_context(|| format!("Failed to build template from {}", path.display()))
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Failed to parse {}", path.display()))
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn summarize(template: &PolicyTemplate) -> Summary<'_> {
    let flags = template.flags();
    let problems = match validate_template(template) {
        Ok(()) => Vec::new(),
        Err(errors) => errors.iter().map(ToString::to_string).collect(),
    };
    Summary {
        name: template.name(),
        status: template.header().status.as_deref(),
        is_draft: flags.is_draft,
        is_published: flags.is_published,
        is_dry_run: flags.is_dry_run,
        is_publish_error: flags.is_publish_error,
        readonly: flags.readonly,
        nodes: template.node_count(),
        blocks: template.all_blocks().len(),
        modules: template.all_modules().len(),
        tools: template.all_tools().len(),
        events: template.all_events().len(),
        unresolved_events: template.all_events().unresolved().count(),
        roles: template.roles().len(),
        groups: template.groups().len(),
        topics: template.topics().len(),
        token_templates: template.token_templates().len(),
        problems,
    }
}
