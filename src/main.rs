use anyhow::{Context, Result};
use clap::Parser;
use std::{path::PathBuf, process::ExitCode, sync::Arc};
use tracing::{error, info};
use tracing_subscriber::filter::{EnvFilter, LevelFilter};

mod api;
mod config;
mod links;
mod utils;

use api::{MediaServerApi, MediaServerClient};
use config::Config;
use links::LinkCollector;

#[derive(Parser, Debug)]
#[command(author, version, about = "Collect direct download links for every video under a media server channel", long_about = None)]
struct Args {
    /// Path to the configuration file (TOML, or media server client JSON)
    #[arg(short, long)]
    conf: Option<String>,

    /// Channel oid to walk
    #[arg(long)]
    channel: String,

    /// Where to write the links (defaults to ./download.json)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn load_config(args: &Args) -> Result<Config> {
    let path = config::resolve_config_path(args.conf.as_deref())
        .context("No configuration file found; pass --conf or set MS_LINKS_CONFIG")?;

    if !path.exists() {
        anyhow::bail!("Invalid path for configuration file: {}", path.display());
    }

    Config::from_file(&path)
}

fn init_logging(format: &str) {
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    if format == "json" {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(env_filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }
}

async fn run(args: Args, config: Config) -> Result<PathBuf> {
    info!("Using media server {}", config.server_url);
    let client = MediaServerClient::new(&config)?;
    client
        .check_server()
        .await
        .context("Media server is not reachable")?;

    let output = LinkCollector::resolve_output_path(args.output)
        .context("Failed to determine the current directory")?;

    info!("Starting to gather download links...");
    let collector = LinkCollector::new(Arc::new(client), config.item_delay(), output);
    let path = collector.collect(&args.channel).await?;
    Ok(path)
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let config = load_config(&args);
    init_logging(
        config
            .as_ref()
            .map(|c| c.get_logging_format())
            .unwrap_or("text"),
    );

    let config = match config {
        Ok(config) => config,
        Err(e) => {
            error!("{:#}", e);
            return ExitCode::FAILURE;
        }
    };

    match run(args, config).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
