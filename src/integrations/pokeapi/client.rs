// src/integrations/pokeapi/client.rs
//
// PokeAPI REST Integration
//
// ARCHITECTURE:
// - Plain REST client for the public PokeAPI
// - Maps external data → typed DTOs (NO domain mutation)
// - Used by EnrichmentService and PokemonService
//
// CRITICAL RULES:
// - This is INFRASTRUCTURE, not DOMAIN
// - Never creates or modifies domain entities directly
// - Returns DTOs that services can map
// - Handles all external API concerns

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::error::{AppError, AppResult};

use super::types::{
    EvolutionChainResponse, PokemonDetailsResponse, SpeciesEntry, SpeciesListResponse,
};

/// Seam between services and the upstream source. The upstream is treated
/// as unreliable; every call may fail with `UpstreamFetch`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PokemonDataSource: Send + Sync {
    /// Fetch the first `limit` entries of the species list.
    async fn list_species(&self, limit: u32) -> AppResult<Vec<SpeciesEntry>>;

    /// Fetch the detail payload at an absolute resource URL.
    async fn fetch_details(&self, url: &str) -> AppResult<PokemonDetailsResponse>;

    /// Fetch the evolution chain for a numeric species id.
    async fn fetch_evolution_chain(&self, species_id: i64) -> AppResult<EvolutionChainResponse>;
}

/// PokeAPI client
pub struct PokeApiClient {
    base_url: String,
    http_client: Client,
}

impl PokeApiClient {
    pub fn new(base_url: String) -> AppResult<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| AppError::Other(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            base_url,
            http_client,
        })
    }

    async fn get_json<T>(&self, url: &str) -> AppResult<T>
    where
        T: DeserializeOwned,
    {
        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| AppError::UpstreamFetch(format!("PokeAPI request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::UpstreamFetch(format!(
                "PokeAPI returned status {} for {}",
                response.status(),
                url
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::UpstreamFetch(format!("Failed to parse PokeAPI response: {}", e)))
    }
}

#[async_trait]
impl PokemonDataSource for PokeApiClient {
    async fn list_species(&self, limit: u32) -> AppResult<Vec<SpeciesEntry>> {
        let url = format!("{}/pokemon?limit={}", self.base_url, limit);
        let page: SpeciesListResponse = self.get_json(&url).await?;
        Ok(page.results)
    }

    async fn fetch_details(&self, url: &str) -> AppResult<PokemonDetailsResponse> {
        self.get_json(url).await
    }

    async fn fetch_evolution_chain(&self, species_id: i64) -> AppResult<EvolutionChainResponse> {
        let url = format!("{}/evolution-chain/{}", self.base_url, species_id);
        self.get_json(&url).await
    }
}
