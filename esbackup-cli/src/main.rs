use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use esbackup::{Config, ElasticsearchRepository, Session};
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "esbackup")]
#[command(about = "esbackup CLI - inspect Elasticsearch clusters before backup or restore")]
#[command(version)]
struct Cli {
    /// Config file (defaults to ~/.esbackup/config.toml)
    #[arg(short, long, global = true, env = "ESBACKUP_CONFIG")]
    config: Option<PathBuf>,

    /// Cluster host, overrides the config file
    #[arg(long, global = true)]
    host: Option<String>,

    /// Cluster HTTP port, overrides the config file
    #[arg(short, long, global = true)]
    port: Option<u16>,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show node name, cluster name and version
    Info,

    /// Count documents per index and type
    DocCounts,

    /// Dump the mappings of every index
    Mappings,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Config::load().context("Failed to load default config")?,
    };
    if let Some(host) = &cli.host {
        config.cluster.host = host.clone();
    }
    if let Some(port) = cli.port {
        config.cluster.port = port;
    }

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| config.logging.level.clone()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let repo = ElasticsearchRepository::http(&config.cluster)
        .context("Failed to create HTTP client")?;
    let session = Session::from_config(&config.cluster);
    let target = session.endpoint().to_string();

    match cli.command {
        Commands::Info => {
            let info = repo
                .get_server_info(&session)
                .await
                .with_context(|| format!("Failed to query {}", target))?;
            print_json(&info, cli.pretty)?;
        }
        Commands::DocCounts => {
            let stats = repo
                .get_doc_count_by_index_type(&session)
                .await
                .with_context(|| format!("Failed to count documents on {}", target))?;
            tracing::info!("Counted documents in {} indices", stats.len());
            print_json(&stats, cli.pretty)?;
        }
        Commands::Mappings => {
            let mappings = repo
                .get_all_mappings(&session)
                .await
                .with_context(|| format!("Failed to fetch mappings from {}", target))?;
            tracing::info!("Fetched mappings for {} indices", mappings.len());
            print_json(&mappings, cli.pretty)?;
        }
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let out = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", out);
    Ok(())
}
