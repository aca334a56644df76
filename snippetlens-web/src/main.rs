//! SnippetLens Web Server
//!
//! Serves snippet analytics over HTTP.

use anyhow::Context;
use clap::Parser;
use snippetlens_core::SnippetLensConfig;
use snippetlens_web::{init_logging, SnippetLensServer, WebConfig};
use std::path::PathBuf;
use tracing::info;

/// SnippetLens Web Server - analytics dashboard and charts for a snippet collection
#[derive(Parser)]
#[command(name = "snippetlens-web")]
#[command(about = "Serve snippet analytics over HTTP")]
#[command(version)]
struct Args {
    /// Server host to bind to
    #[arg(long)]
    host: Option<String>,

    /// Server port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Document store URL, e.g. sqlite://snippets.db
    #[arg(long)]
    store_url: Option<String>,

    /// Start with an empty in-memory store
    #[arg(long, conflicts_with = "store_url")]
    memory_store: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long)]
    log_level: Option<String>,
}

impl Args {
    /// File, then environment, then command line
    fn resolve_config(&self) -> anyhow::Result<SnippetLensConfig> {
        let mut config = match &self.config {
            Some(path) => SnippetLensConfig::from_file(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => SnippetLensConfig::default(),
        };

        config.apply_env_overrides()?;

        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(url) = &self.store_url {
            config.store.url = url.clone();
        }
        if self.memory_store {
            config.store.url = "memory://".to_string();
        }
        if let Some(level) = &self.log_level {
            config.logging = config.logging.with_level(level);
        }

        config.validate()?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let args = Args::parse();
    let config = args.resolve_config()?;

    init_logging(&config.logging)?;

    info!("Starting SnippetLens web server");
    info!("Server: http://{}", config.address());
    info!("Store: {} (database {})", config.store.url, config.store.database);

    let server = SnippetLensServer::new(WebConfig::from_config(&config))
        .await
        .context("failed to build server")?;

    server.start().await.context("server failed")?;
    Ok(())
}
