use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use agentbuilder::cli::{catalog_rows, draft_report, load_config, load_draft, schema_exports, CatalogRow};
use agentbuilder::{
    compile, BuilderTab, DryRunSubmitter, DynSubmitter, LoggingConfig, ProviderCatalog,
    ProviderCategory,
};
use anyhow::{bail, Context};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "agentbuilder",
    version,
    about = "Compile voice agent drafts into runtime payloads",
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    Catalog {
        #[command(subcommand)]
        command: CatalogCommand,
    },
    Draft {
        #[command(subcommand)]
        command: DraftCommand,
    },
    /// 编译 draft 并输出 payload
    Compile {
        #[arg(long)]
        draft: PathBuf,
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long)]
        output: Option<PathBuf>,
        #[arg(long)]
        pretty: bool,
    },
    /// 编译并提交到 agent 运行时
    Submit {
        #[arg(long)]
        draft: PathBuf,
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long)]
        dry_run: bool,
    },
    Schema {
        #[command(subcommand)]
        command: SchemaCommand,
    },
}

#[derive(Subcommand)]
enum CatalogCommand {
    List {
        #[arg(long)]
        category: Option<ProviderCategory>,
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum DraftCommand {
    Validate {
        #[arg(long)]
        draft: PathBuf,
        #[arg(long)]
        tab: Option<BuilderTab>,
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum SchemaCommand {
    Export {
        #[arg(long)]
        output: Option<PathBuf>,
        /// 输出单行 JSON
        #[arg(long)]
        compact: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    LoggingConfig::init();

    let cli = Cli::parse();
    match cli.command {
        Command::Catalog { command } => match command {
            CatalogCommand::List { category, catalog } => {
                handle_catalog_list(category, catalog.as_deref())?
            }
        },
        Command::Draft { command } => match command {
            DraftCommand::Validate { draft, tab, config } => {
                handle_draft_validate(&draft, tab, config.as_deref())?
            }
        },
        Command::Compile {
            draft,
            config,
            output,
            pretty,
        } => handle_compile(&draft, config.as_deref(), output, pretty)?,
        Command::Submit {
            draft,
            config,
            dry_run,
        } => handle_submit(&draft, config.as_deref(), dry_run).await?,
        Command::Schema { command } => match command {
            SchemaCommand::Export { output, compact } => handle_schema_export(output, !compact)?,
        },
    }
    Ok(())
}

fn handle_catalog_list(category: Option<ProviderCategory>, path: Option<&Path>) -> anyhow::Result<()> {
    let catalog = match path {
        Some(path) => ProviderCatalog::from_path(path)
            .with_context(|| format!("failed to load catalog `{}`", path.display()))?,
        None => ProviderCatalog::builtin().clone(),
    };
    let rows = catalog_rows(&catalog, category);
    if rows.is_empty() {
        println!("No providers in catalog version `{}`", catalog.version);
    } else {
        render_catalog_table(&rows);
    }
    Ok(())
}

fn render_catalog_table(rows: &[CatalogRow]) {
    println!(
        "{:<14} {:<12} {:<28} {}",
        "Category", "Provider", "Default", "Variants"
    );
    for row in rows {
        println!(
            "{:<14} {:<12} {:<28} {}",
            row.category.as_str(),
            row.provider,
            row.default_variant.as_deref().unwrap_or("-"),
            row.variants.join(", ")
        );
    }
}

fn handle_draft_validate(
    draft_path: &Path,
    tab: Option<BuilderTab>,
    config_path: Option<&Path>,
) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let catalog = config.load_catalog()?;
    let draft = load_draft(draft_path, &config, &catalog)?;
    let report = draft_report(&draft, tab);
    println!("{}", serde_json::to_string_pretty(&report)?);

    let blocked = report.tabs.iter().any(|tab| !tab.validation.valid);
    if blocked {
        bail!("draft `{}` has blocking validation errors", draft_path.display());
    }
    Ok(())
}

fn handle_compile(
    draft_path: &Path,
    config_path: Option<&Path>,
    output: Option<PathBuf>,
    pretty: bool,
) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let catalog = config.load_catalog()?;
    let draft = load_draft(draft_path, &config, &catalog)?;
    let payload = compile(&draft, &catalog)?;

    let content = if pretty {
        serde_json::to_string_pretty(&payload)?
    } else {
        serde_json::to_string(&payload)?
    };

    if let Some(path) = output {
        fs::write(&path, content)?;
        println!("Payload written to `{}`", path.display());
    } else {
        println!("{content}");
    }
    Ok(())
}

async fn handle_submit(
    draft_path: &Path,
    config_path: Option<&Path>,
    dry_run: bool,
) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let catalog = config.load_catalog()?;
    let draft = load_draft(draft_path, &config, &catalog)?;
    let payload = compile(&draft, &catalog)?;

    let submitter = build_submitter(&config, dry_run)?;
    match submitter.create_agent(&payload).await {
        Ok(created) => {
            println!("{}", serde_json::to_string_pretty(&created)?);
            Ok(())
        }
        Err(err) => bail!(err.user_message()),
    }
}

#[cfg(feature = "http-client")]
fn build_submitter(
    config: &agentbuilder::BuilderConfig,
    dry_run: bool,
) -> anyhow::Result<DynSubmitter> {
    if dry_run {
        return Ok(Arc::new(DryRunSubmitter::new()));
    }
    Ok(Arc::new(agentbuilder::HttpSubmissionClient::from_config(&config.api)?))
}

#[cfg(not(feature = "http-client"))]
fn build_submitter(
    _config: &agentbuilder::BuilderConfig,
    dry_run: bool,
) -> anyhow::Result<DynSubmitter> {
    if !dry_run {
        tracing::warn!("built without http-client, falling back to dry run");
    }
    Ok(Arc::new(DryRunSubmitter::new()))
}

fn handle_schema_export(output: Option<PathBuf>, pretty: bool) -> anyhow::Result<()> {
    let entries = schema_exports();
    let content = if pretty {
        serde_json::to_string_pretty(&entries)?
    } else {
        serde_json::to_string(&entries)?
    };

    if let Some(path) = output {
        fs::write(&path, content)?;
        println!("Schema exported to `{}`", path.display());
    } else {
        println!("{content}");
    }
    Ok(())
}
