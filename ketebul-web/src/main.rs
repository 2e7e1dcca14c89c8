//! ketebul-web - Ketebul Music public site
//!
//! Serves the server-rendered content pages backed by the remote content
//! store. Configuration is optional; the site starts on compiled defaults.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use ketebul_common::config::ConfigResolver;
use ketebul_web::api::buildinfo::BuildInfo;
use ketebul_web::{build_router, AppState};
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(name = "ketebul-web")]
#[command(about = "Ketebul Music content site", long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Address to bind (overrides the config file)
    #[arg(long, env = "KETEBUL_HOST")]
    host: Option<String>,

    /// Port to listen on (overrides the config file)
    #[arg(short, long, env = "KETEBUL_PORT")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Loaded before the subscriber so its level can seed the default filter
    let config = ConfigResolver::new(args.config.clone()).load()?;

    let default_filter = format!("ketebul_web={0},ketebul_common={0},tower_http={0}", config.logging.level);
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Build identification first, before any network activity
    let build = BuildInfo::current();
    info!(
        "Starting Ketebul site (ketebul-web) v{} [{}] built {} ({}), assets {}",
        build.version, build.git_hash, build.build_timestamp, build.build_profile, build.asset_version
    );

    info!(
        backend = ?config.content_store.backend,
        gallery_images = config.gallery.len(),
        team_members = config.team.len(),
        events = config.events.len(),
        "Content store configured"
    );

    let state = AppState::from_config(&config)?;
    let loader = state.loader.clone();
    let app = build_router(state, config.server.public_dir.as_deref());

    let host = args.host.unwrap_or(config.server.host);
    let port = args.port.unwrap_or(config.server.port);
    let addr = format!("{}:{}", host, port);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("ketebul-web listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            // Renders still waiting on the store finish without their records
            loader.cancel_all().await;
        })
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "Ctrl+C handler unavailable");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "SIGTERM handler unavailable");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received terminate signal, shutting down"),
    }
}
