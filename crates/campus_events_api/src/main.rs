// Composition root for the campus events console.
//
// Responsibilities
// - Read config from the environment.
// - Instantiate the file-backed gateway and wire it into the store.
// - Load the persisted collection (a failed load logs and starts empty) and
//   run one status reconcile pass before serving.

mod config;
mod handlers;
mod routes;
mod state;

use std::sync::Arc;

use chrono::Utc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{fmt, EnvFilter};

use campus_events::adapters::json_file::json_file_gateway::JsonFileGateway;
use campus_events::application::store::EventStore;

use crate::config::Config;
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let config = Config::from_env()?;
    let gateway = Arc::new(JsonFileGateway::new(&config.data_dir, &config.storage_key));
    tracing::info!(path = %gateway.path().display(), "using JSON file persistence");

    let store = Arc::new(EventStore::new(gateway));
    match store.load().await {
        Ok(events) => tracing::info!(count = events.len(), "loaded event collection"),
        Err(err) => tracing::error!(error = %err, "starting with an empty collection"),
    }
    let reclassified = store.reconcile_statuses(Utc::now().date_naive()).await;
    if reclassified > 0 {
        tracing::info!(count = reclassified, "reclassified event statuses by date");
    }

    let app = routes::router(AppState { store })
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    tracing::info!(addr = %config.bind_addr, "listening");
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
