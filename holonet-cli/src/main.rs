//! Holonet CLI
//!
//! Runs the API server, or queries the upstream catalog directly through the
//! same cached, rate-limited client.

use std::future::Future;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use holonet_api::{ApiConfig, ApiServer};
use holonet_client::HolonetClient;
use holonet_core::constants::RESPONSE_PAGE_SIZE;
use holonet_core::error::HolonetError;
use holonet_core::traits::Resource;
use holonet_core::types::{Character, EntityId, EntityKind, Film, Planet, Starship};
use holonet_query::{paginate, sort, SortOrder, Sortable};

/// Holonet - cached, rate-limited access to the Star Wars catalog
#[derive(Parser)]
#[command(name = "holonet")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Upstream base URL (overrides SWAPI_BASE_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the API server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "8000", env = "PORT")]
        port: u16,
        /// Bind address
        #[arg(short, long, default_value = "0.0.0.0", env = "BIND")]
        bind: String,
    },

    /// Print one entity as JSON
    Get {
        /// Kind: characters, planets, starships or films
        kind: EntityKind,
        /// Entity id
        id: EntityId,
    },

    /// Print one page of a full listing
    List {
        /// Kind: characters, planets, starships or films
        kind: EntityKind,
        /// Upstream search term
        #[arg(short, long)]
        search: Option<String>,
        /// Page number (1-based)
        #[arg(short, long, default_value = "1")]
        page: u32,
        /// Sort field, e.g. name, height, population, episode_id
        #[arg(long)]
        sort_by: Option<String>,
        /// Sort descending
        #[arg(long)]
        desc: bool,
    },

    /// Print the entities another entity refers to
    Related {
        /// Kind of the source entity
        kind: EntityKind,
        /// Source entity id
        id: EntityId,
        /// Kind of the related entities
        related: EntityKind,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let mut config = ApiConfig::from_env().context("Invalid configuration")?;
    if let Some(base_url) = cli.base_url {
        config.client.base_url = base_url;
    }

    match cli.command {
        Commands::Serve { port, bind } => cmd_serve(config, port, &bind).await,
        Commands::Get { kind, id } => cmd_get(&client(config)?, kind, id).await,
        Commands::List {
            kind,
            search,
            page,
            sort_by,
            desc,
        } => {
            let order = if desc { SortOrder::Desc } else { SortOrder::Asc };
            cmd_list(&client(config)?, kind, search.as_deref(), page, sort_by.as_deref(), order)
                .await
        }
        Commands::Related { kind, id, related } => {
            cmd_related(&client(config)?, kind, id, related).await
        }
    }
}

/// RUST_LOG wins, then LOG_LEVEL; `--verbose` raises our crates to debug.
fn init_logging(verbose: bool) {
    let level = std::env::var("LOG_LEVEL")
        .map(|l| l.to_lowercase())
        .unwrap_or_else(|_| "info".into());
    let fallback = if verbose {
        format!("holonet_api=debug,holonet_client=debug,{level}")
    } else {
        level
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn client(config: ApiConfig) -> Result<HolonetClient> {
    HolonetClient::with_config(config.client).context("Failed to create upstream client")
}

fn spinner(message: String) -> Result<ProgressBar> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    Ok(pb)
}

/// Runs `work` behind a spinner, clearing it whatever the outcome.
async fn with_spinner<T>(message: String, work: impl Future<Output = Result<T>>) -> Result<T> {
    let pb = spinner(message)?;
    let result = work.await;
    pb.finish_and_clear();
    result
}

fn to_json<T: Serialize>(value: T) -> Result<Value> {
    Ok(serde_json::to_value(value)?)
}

/// Label of a summary line: its name, or its title for films.
fn display_name(item: &Value) -> &str {
    item.get("name")
        .or_else(|| item.get("title"))
        .and_then(Value::as_str)
        .unwrap_or("?")
}

fn print_summaries(items: &[Value]) {
    for item in items {
        let id = item.get("id").and_then(Value::as_u64).unwrap_or_default();
        println!("   {} {}", format!("{id:>4}").dimmed(), display_name(item));
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// COMMANDS
// ═══════════════════════════════════════════════════════════════════════════════

/// Run API server
async fn cmd_serve(config: ApiConfig, port: u16, bind: &str) -> Result<()> {
    println!("{}", "Starting Holonet API server...".cyan().bold());
    println!("   {} http://{}:{}", "Listening on:".green(), bind, port);
    println!("   {} http://{}:{}/health", "Health check:".dimmed(), bind, port);
    println!("   {} {}", "Upstream:".dimmed(), config.client.base_url);
    println!("\n   Press Ctrl+C to stop.\n");

    let ip: IpAddr = bind
        .parse()
        .with_context(|| format!("Invalid bind address: {bind}"))?;
    let server = ApiServer::new(config).context("Failed to build API server")?;
    server
        .run_until(SocketAddr::new(ip, port), shutdown_signal())
        .await
        .context("API server failed")?;

    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(err) => {
            warn!(error = %err, "Cannot listen for Ctrl+C; stop the process to exit");
            std::future::pending::<()>().await;
        }
    }
}

/// Print one entity
async fn cmd_get(client: &HolonetClient, kind: EntityKind, id: EntityId) -> Result<()> {
    let entity = match kind {
        EntityKind::Character => to_json(client.get::<Character>(id).await?)?,
        EntityKind::Planet => to_json(client.get::<Planet>(id).await?)?,
        EntityKind::Starship => to_json(client.get::<Starship>(id).await?)?,
        EntityKind::Film => to_json(client.get::<Film>(id).await?)?,
    };

    println!("{} {} {}", "Found".green().bold(), kind, display_name(&entity).bold());
    println!("{}", serde_json::to_string_pretty(&entity)?);
    Ok(())
}

async fn list_page<T>(
    client: &HolonetClient,
    search: Option<&str>,
    page: u32,
    sort_by: Option<&str>,
    order: SortOrder,
) -> Result<Value>
where
    T: Resource,
    T::Summary: Sortable,
    <T::Summary as Sortable>::Field: FromStr<Err = HolonetError> + Default,
{
    let field = match sort_by {
        Some(name) => name.parse()?,
        None => Default::default(),
    };
    let items = client.all::<T>(search).await?;
    let items = sort(items, field, order);
    to_json(paginate(items, page, RESPONSE_PAGE_SIZE))
}

/// Print one page of a listing
async fn cmd_list(
    client: &HolonetClient,
    kind: EntityKind,
    search: Option<&str>,
    page: u32,
    sort_by: Option<&str>,
    order: SortOrder,
) -> Result<()> {
    if page == 0 {
        anyhow::bail!("Page numbers start at 1");
    }

    let work = async {
        match kind {
            EntityKind::Character => {
                list_page::<Character>(client, search, page, sort_by, order).await
            }
            EntityKind::Planet => list_page::<Planet>(client, search, page, sort_by, order).await,
            EntityKind::Starship => {
                list_page::<Starship>(client, search, page, sort_by, order).await
            }
            EntityKind::Film => list_page::<Film>(client, search, page, sort_by, order).await,
        }
    };
    let listing = with_spinner(format!("Fetching all {}...", kind.path()), work).await?;

    let count = listing["count"].as_u64().unwrap_or_default();
    let total_pages = listing["total_pages"].as_u64().unwrap_or(1);
    println!(
        "{} {} {} (page {}/{})",
        "Found".green().bold(),
        count,
        kind.path(),
        page,
        total_pages
    );

    match listing["results"].as_array() {
        Some(items) if !items.is_empty() => print_summaries(items),
        _ => println!("   {}", "No results on this page.".yellow()),
    }
    Ok(())
}

async fn related_of<R: Resource>(
    client: &HolonetClient,
    id: EntityId,
    related: EntityKind,
) -> Result<Vec<Value>> {
    let entity: R = client.get(id).await?;
    let resolved = match related {
        EntityKind::Character => to_json(client.resolve_related::<R, Character>(&entity).await?)?,
        EntityKind::Planet => to_json(client.resolve_related::<R, Planet>(&entity).await?)?,
        EntityKind::Starship => to_json(client.resolve_related::<R, Starship>(&entity).await?)?,
        EntityKind::Film => to_json(client.resolve_related::<R, Film>(&entity).await?)?,
    };
    Ok(serde_json::from_value(resolved)?)
}

/// Print related entities
async fn cmd_related(
    client: &HolonetClient,
    kind: EntityKind,
    id: EntityId,
    related: EntityKind,
) -> Result<()> {
    let work = async {
        match kind {
            EntityKind::Character => related_of::<Character>(client, id, related).await,
            EntityKind::Planet => related_of::<Planet>(client, id, related).await,
            EntityKind::Starship => related_of::<Starship>(client, id, related).await,
            EntityKind::Film => related_of::<Film>(client, id, related).await,
        }
    };
    let items = with_spinner(format!("Resolving {} of {kind} {id}...", related.path()), work)
        .await?;

    if items.is_empty() {
        println!("{} {} {} has no related {}", "ℹ".cyan(), kind, id, related.path());
    } else {
        println!("{} {} {}:", "Found".green().bold(), items.len(), related.path());
        print_summaries(&items);
    }
    Ok(())
}
