// src/client/api.rs
//
// Client-side transport against the pokehub REST surface. The trait seam
// lets the pagination controller be driven by a mock in tests.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use uuid::Uuid;

use crate::api::dto::{DetailsResponse, FavoriteToggleBody, PokemonResponse};
use crate::error::{AppError, AppResult};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PokehubApi: Send + Sync {
    async fn fetch_page(&self, offset: u32, limit: u32) -> AppResult<Vec<PokemonResponse>>;

    async fn search(&self, query: &str, limit: u32) -> AppResult<Vec<PokemonResponse>>;

    async fn fetch_details(&self, id: Uuid) -> AppResult<DetailsResponse>;

    async fn set_favorite(&self, id: Uuid, value: bool) -> AppResult<()>;
}

pub struct HttpPokehubApi {
    base_url: String,
    http_client: Client,
}

impl HttpPokehubApi {
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

    fn check_status(response: &reqwest::Response, url: &str) -> AppResult<()> {
        if !response.status().is_success() {
            return Err(AppError::UpstreamFetch(format!(
                "pokehub API returned status {} for {}",
                response.status(),
                url
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl PokehubApi for HttpPokehubApi {
    async fn fetch_page(&self, offset: u32, limit: u32) -> AppResult<Vec<PokemonResponse>> {
        let url = format!("{}/pokemon?offset={}&limit={}", self.base_url, offset, limit);
        let response = self.http_client.get(&url).send().await?;
        Self::check_status(&response, &url)?;
        Ok(response.json().await?)
    }

    async fn search(&self, query: &str, limit: u32) -> AppResult<Vec<PokemonResponse>> {
        let url = format!(
            "{}/pokemon/search?query={}&limit={}",
            self.base_url, query, limit
        );
        let response = self.http_client.get(&url).send().await?;
        Self::check_status(&response, &url)?;
        Ok(response.json().await?)
    }

    async fn fetch_details(&self, id: Uuid) -> AppResult<DetailsResponse> {
        let url = format!("{}/pokemon/{}/details", self.base_url, id);
        let response = self.http_client.get(&url).send().await?;
        Self::check_status(&response, &url)?;
        Ok(response.json().await?)
    }

    async fn set_favorite(&self, id: Uuid, value: bool) -> AppResult<()> {
        let url = format!("{}/pokemon/{}/favorite", self.base_url, id);
        let response = self
            .http_client
            .patch(&url)
            .json(&FavoriteToggleBody { is_favorite: value })
            .send()
            .await?;
        Self::check_status(&response, &url)
    }
}
