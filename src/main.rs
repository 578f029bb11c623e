//! Logic Links · front-end host
//!
//! - Serves the static page (./static, SPA fallback)
//! - Axum HTTP + WebSocket API for quiz, chat and offline study packs
//! - Remote backend calls with local fallback replies
//!
//! Important env variables:
//!   LOGICLINKS_CONFIG_PATH : path to TOML config (backend, store, ui, server)
//!   LOGICLINKS_BACKEND_URL : backend origin, default "http://127.0.0.1:8000"
//!   LOGICLINKS_STORE_PATH  : saved packs file, default "./data/offline_packs.json"
//!   LOGICLINKS_STATIC_DIR  : page directory, default "./static"
//!   PORT                   : u16 (default 3000)
//!   LOG_LEVEL              : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT             : "pretty" (default) or "json"

use std::{net::SocketAddr, sync::Arc};

use tokio::net::TcpListener;
use tracing::info;

use logiclinks_frontend::config::ClientConfig;
use logiclinks_frontend::routes::build_router;
use logiclinks_frontend::state::AppState;
use logiclinks_frontend::telemetry;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  telemetry::init_tracing();

  let config = ClientConfig::from_env();
  let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));

  let state = Arc::new(AppState::new(config)?);
  let app = build_router(state);

  let listener = TcpListener::bind(addr).await?;
  info!(target: "logiclinks", %addr, "HTTP server listening");
  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await?;
  Ok(())
}

async fn shutdown_signal() {
  if let Err(e) = tokio::signal::ctrl_c().await {
    tracing::error!(target: "logiclinks", error = %e, "Failed to listen for ctrl-c");
    std::future::pending::<()>().await;
  }
  info!(target: "logiclinks", "Shutdown signal received");
}
