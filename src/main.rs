// src/main.rs

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use pokehub::api::{build_router, AppState};
use pokehub::config::Config;
use pokehub::db::{create_connection_pool, initialize_database};
use pokehub::integrations::{PokeApiClient, PokemonDataSource};
use pokehub::repositories::{PokemonRepository, SqlitePokemonRepository};
use pokehub::services::{EnrichmentService, PokemonService};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // 1. INFRASTRUCTURE
    let config = Config::load()?;
    let pool = Arc::new(create_connection_pool(&config.db_path)?);

    // Initialize schema (idempotent)
    {
        let conn = pool.get()?;
        initialize_database(&conn)?;
    }

    // 2. REPOSITORIES & INTEGRATIONS
    let repo: Arc<dyn PokemonRepository> = Arc::new(SqlitePokemonRepository::new(pool));
    let source: Arc<dyn PokemonDataSource> =
        Arc::new(PokeApiClient::new(config.pokeapi_base_url.clone())?);

    // 3. SERVICES
    let enrichment_service = Arc::new(EnrichmentService::new(source.clone(), repo.clone()));
    let pokemon_service = Arc::new(PokemonService::new(repo, source, enrichment_service));

    // 4. HTTP BOUNDARY
    let router = build_router(
        AppState {
            pokemon_service,
        },
        &config.cors_origin,
    )?;

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Application is running on: http://localhost:{}", config.port);

    axum::serve(listener, router).await?;

    Ok(())
}
