// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! GaiaTrace API Server
//!
//! Records carbon logs, rewards savings with credit and serves a ranked
//! community feed from Firestore.

use gaiatrace::{
    config::Config,
    db::{FirestoreDb, Gateway, MemoryDb},
    services::catalog::default_catalog,
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging for GCP
    init_logging()?;

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(port = config.port, "Starting GaiaTrace API");

    let gateway: Arc<dyn Gateway> = if config.use_memory_db {
        tracing::warn!("Using in-memory store; data is lost on restart");
        Arc::new(MemoryDb::new())
    } else {
        Arc::new(FirestoreDb::new(&config.gcp_project_id).await?)
    };

    // Make sure there is something to log against
    if gateway.seed_catalog(&default_catalog()).await? {
        tracing::info!("Default activity catalog seeded");
    }

    let state = Arc::new(AppState::new(config.clone(), gateway));

    // Build router
    let app = gaiatrace::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging (GCP-compliant).
fn init_logging() -> Result<(), Box<dyn std::error::Error>> {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("gaiatrace=debug".parse()?)
                .add_directive("info".parse()?),
        )
        .with(format)
        .init();
    Ok(())
}
