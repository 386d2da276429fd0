mod api;
mod config;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use floodroute_core::loading::{RoadNetwork, load_kml_hazards, overpass_query};
use floodroute_core::build_road_graph;
use tracing_subscriber::EnvFilter;

use crate::api::{AppState, router};
use crate::config::ServerConfig;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Parser)]
#[command(version, about = "Flood-aware road routing service")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build the flood-weighted road graph and serve routing requests
    Serve {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Print the Overpass query that fetches roads around the hazard area
    OverpassQuery {
        #[arg(long)]
        hazards: PathBuf,
        /// Margin around the hazards, in degrees
        #[arg(long, default_value_t = 0.02)]
        margin: f64,
    },
}

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match Cli::parse().command {
        Command::Serve { config } => serve(ServerConfig::load(&config)?).await,
        Command::OverpassQuery { hazards, margin } => {
            let hazards = load_kml_hazards(&hazards)?;
            print!("{}", overpass_query(&hazards.bounding_box(margin)?));
            Ok(())
        }
    }
}

async fn serve(config: ServerConfig) -> Result<(), BoxError> {
    let routing = config.routing;
    let network_path = config.network_path.clone();
    let hazards_path = config.hazards_path.clone();

    // Graph construction is CPU-bound and must finish before serving
    let state = tokio::task::spawn_blocking(move || -> Result<AppState, floodroute_core::Error> {
        let hazards = load_kml_hazards(&hazards_path)?;
        let network = RoadNetwork::load(&network_path)?;
        let graph = build_road_graph(&network, &hazards, &routing)?;
        Ok(AppState {
            graph,
            hazards,
            config: routing,
        })
    })
    .await??;

    tracing::info!(
        "Serving {} nodes / {} edges on http://{}",
        state.graph.node_count(),
        state.graph.edge_count(),
        config.bind
    );

    let app = router(
        Arc::new(state),
        config.request_timeout(),
        config.concurrency_limit,
    );
    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
