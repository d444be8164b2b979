//! HTTP service command.

use std::sync::Arc;

use anyhow::Context;
use tokio::runtime::Runtime;
use tracing::{info, warn};

use crate::api::{self, AppState};
use crate::config::Config;
use crate::db;
use crate::enrichment::MusicInfoClient;
use crate::library::SongService;

/// Run the service until Ctrl+C.
pub fn cmd_serve(rt: &Runtime, config: Config) -> anyhow::Result<()> {
    config.validate()?;

    rt.block_on(async {
        let pool = db::init_db(config.database_url()?, config.database.max_connections)
            .await
            .context("Failed to initialize database")?;
        info!(target: "db", "Database ready");

        let client = MusicInfoClient::new(&config.enrichment)?;
        if !client.is_configured() {
            warn!(target: "enrichment", "MUSIC_API_URL is not set, song creation will fail");
        }

        let songs = SongService::new(pool.clone(), Arc::new(client));
        let app = api::router(AppState { songs });

        let addr = config.listen_addr();
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .with_context(|| format!("Failed to bind {addr}"))?;
        info!(target: "api", %addr, "Listening");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("Server error")?;

        pool.close().await;
        info!(target: "api", "Shut down");
        Ok::<(), anyhow::Error>(())
    })
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!(target: "api", "Shutdown signal received"),
        Err(e) => warn!(target: "api", error = %e, "Failed to listen for Ctrl+C"),
    }
}
