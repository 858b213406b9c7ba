use std::sync::Arc;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod archive;
mod config;
mod endpoint;
mod error;
mod genre;
mod handlers;
mod models;
mod payload;
mod query;
mod repositories;
mod routes;
mod state;
#[cfg(test)]
mod testing;

use common::database::{DatabaseConfig, init_pool};

use crate::{
    archive::FsArchive, config::ServerConfig, repositories::catalog::CatalogRepository,
    state::AppState,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting reFES server");

    let server_config = ServerConfig::from_env()?;

    // Initialize catalog connection pool
    let db_config = DatabaseConfig::from_env()?;
    let pool = init_pool(&db_config).await?;

    if common::database::health_check(&pool).await? {
        info!("Catalog connection successful");
    } else {
        anyhow::bail!("Failed to connect to catalog database");
    }

    let catalog = CatalogRepository::new(pool);
    let archive = FsArchive::new(&server_config.games_us_dir, &server_config.games_jp_dir);
    let app_state = AppState::new(Arc::new(catalog), Arc::new(archive));

    let app = routes::create_router(app_state);

    let address = server_config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    info!("reFES server listening on {}", address);

    axum::serve(listener, app).await?;

    Ok(())
}
