// src/lib.rs
// Pokehub - PokeAPI proxy/cache with a favoriting REST surface
//
// Architecture:
// - Domain-centric: entities and blob shapes live in domain/
// - Explicit: constructor injection only, wiring happens in main
// - Lazy: upstream data is fetched on first touch, then served locally
// - Layered: repositories (SQL) / integrations (upstream) / services /
//   api (HTTP boundary) / client (embeddable pagination controller)

pub mod api;
pub mod client;
pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod integrations;
pub mod repositories;
pub mod services;

// ============================================================================
// PUBLIC API - Domain Entities
// ============================================================================

pub use domain::{Enrichment, EvolutionEntry, PokemonRecord, SpriteSet, StatEntry, TypeRef};

// ============================================================================
// PUBLIC API - Error Types
// ============================================================================

pub use error::{AppError, AppResult};

// ============================================================================
// PUBLIC API - Services & Boundaries
// ============================================================================

pub use api::{build_router, AppState};
pub use client::{Filter, HttpPokehubApi, PaginationController, PokehubApi};
pub use config::Config;
pub use integrations::{PokeApiClient, PokemonDataSource};
pub use repositories::{PokemonRepository, SqlitePokemonRepository};
pub use services::{EnrichmentService, PokemonService};
