// ABOUTME: Entry point for the hydraweb binary.
// ABOUTME: Parses CLI arguments, initializes tracing, builds the shared web instance, and serves the admin app.

mod admin;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use hydraweb_server::{DirSource, ServerConfig, Web};

#[derive(Debug, Parser)]
#[command(name = "hydraweb", version, about = "Shared admin web scaffold")]
struct Cli {
    /// Address to bind, overriding HYDRA_BIND
    #[arg(long)]
    bind: Option<SocketAddr>,

    /// Directory containing project page templates, overriding HYDRA_TEMPLATES_DIR
    #[arg(long)]
    templates: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("hydraweb=debug,hydraweb_server=debug")),
        )
        .init();

    let cli = Cli::parse();
    let mut config = ServerConfig::from_env().context("loading configuration")?;
    if let Some(bind) = cli.bind {
        config.bind = bind;
    }
    if let Some(dir) = cli.templates {
        config.templates_dir = Some(dir);
    }

    // Template errors are fatal at startup.
    let renderer = match &config.templates_dir {
        Some(dir) => admin::renderer(&DirSource::new(dir)),
        None => admin::renderer(&admin::embedded_pages()),
    }
    .context("building template registry")?;

    tracing::info!(project = %config.site.project_name, "hydraweb starting up");
    let bind = config.bind;
    let web = Arc::new(Web::new(config.site, renderer));
    let app = admin::app(web);

    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .with_context(|| format!("binding {bind}"))?;
    tracing::info!(addr = %bind, "listening");
    axum::serve(listener, app).await?;

    Ok(())
}
