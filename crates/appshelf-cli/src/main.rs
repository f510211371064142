use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use appshelf_core::{load_config, load_seed, AppContext, CatalogQuery, MainConfig};
use appshelf_schema::{CategoryFilter, SortOption};
use appshelf_server::state::AppState;
use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
#[command(name = "appshelf", version, about = "appshelf catalog server")]
struct Cli {
    #[arg(
        long,
        default_value = "~/.appshelf",
        help = "Config root directory (contains config/ and logs/)"
    )]
    config_root: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Start the HTTP API server")]
    Start {
        #[arg(long, help = "Override the port from server.bind")]
        port: Option<u16>,
    },
    #[command(about = "Validate config and seed catalog")]
    Validate,
    #[command(about = "Print the catalog as the storefront would list it")]
    Catalog {
        #[arg(long, default_value = "all", help = "all, game, app or software")]
        category: CategoryFilter,
        #[arg(long, default_value = "", help = "Case-insensitive name search")]
        search: String,
        #[arg(long, default_value = "downloads", help = "downloads, date or name")]
        sort: SortOption,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let mut cli = Cli::parse();

    if cli.config_root.starts_with("~") {
        if let Some(home) = std::env::var_os("HOME") {
            cli.config_root = PathBuf::from(home).join(
                cli.config_root
                    .strip_prefix("~")
                    .unwrap_or(&cli.config_root),
            );
        }
    }

    let log_dir = cli.config_root.join("logs");
    std::fs::create_dir_all(&log_dir)?;
    let file_appender = tracing_appender::rolling::daily(&log_dir, "appshelf.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(non_blocking),
        )
        .init();

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    let config_dir = cli.config_root.join("config");
    match command {
        Commands::Start { port } => {
            let mut config = load_config(&config_dir)?;
            if let Some(port) = port {
                config.server.bind = with_port(&config.server.bind, port)?;
            }
            start_server(&config_dir, config).await?;
        }
        Commands::Validate => {
            let config = load_config(&config_dir)?;
            let ctx = build_context(&config_dir, &config)?;
            println!(
                "Config valid. Listening on {}, {} catalog items, admin user '{}'.",
                config.server.bind,
                ctx.store().len(),
                config.auth.username
            );
            ctx.shutdown();
        }
        Commands::Catalog {
            category,
            search,
            sort,
        } => {
            let config = load_config(&config_dir)?;
            let ctx = build_context(&config_dir, &config)?;
            let query = CatalogQuery::new(category).search(search).sort(sort);
            for line in render_listing(&ctx, &query) {
                println!("{line}");
            }
            ctx.shutdown();
        }
    }

    Ok(())
}

fn build_context(config_dir: &Path, config: &MainConfig) -> Result<AppContext> {
    let seed = load_seed(config_dir, &config.catalog)?;
    AppContext::from_config(config, seed).context("building catalog")
}

async fn start_server(config_dir: &Path, config: MainConfig) -> Result<()> {
    if config.auth.uses_default_password() {
        tracing::warn!(
            "admin account uses the built-in default password; set auth.password or APPSHELF_ADMIN_PASSWORD"
        );
    }
    let ctx = build_context(config_dir, &config)?;
    tracing::info!(items = ctx.store().len(), "catalog ready");
    appshelf_server::serve(AppState::new(ctx), &config.server.bind).await
}

/// Replace the port of a `host:port` bind address.
fn with_port(bind: &str, port: u16) -> Result<String> {
    let mut addr: std::net::SocketAddr = bind
        .parse()
        .with_context(|| format!("server.bind is not a socket address: {bind}"))?;
    addr.set_port(port);
    Ok(addr.to_string())
}

fn render_listing(ctx: &AppContext, query: &CatalogQuery) -> Vec<String> {
    ctx.browse(query)
        .iter()
        .map(|item| {
            format!(
                "{:<10} {:<8} {:>10}  {}  {}",
                item.id,
                item.category.as_str(),
                item.downloads,
                item.upload_date,
                item.name
            )
        })
        .collect()
}
