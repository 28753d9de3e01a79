// src/services/pokemon_service.rs
//
// Listing/Search Service + Favorite Toggle + Detail-View flow
//
// Serves paged/searched views of the store, bulk-seeding on first touch
// and lazily enriching any record in a returned slice that still lacks
// its detail blob. Enrichment is page-scoped: the store as a whole is
// never eagerly populated.

use std::sync::Arc;
use std::time::Instant;

use futures::future::join_all;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::PokemonRecord;
use crate::error::{AppError, AppResult};
use crate::integrations::PokemonDataSource;
use crate::repositories::PokemonRepository;
use crate::services::EnrichmentService;

/// Species fetched during one-time bulk seeding of an empty store.
const SEED_SPECIES_COUNT: u32 = 150;

pub struct PokemonService {
    repo: Arc<dyn PokemonRepository>,
    source: Arc<dyn PokemonDataSource>,
    enrichment: Arc<EnrichmentService>,
}

impl PokemonService {
    pub fn new(
        repo: Arc<dyn PokemonRepository>,
        source: Arc<dyn PokemonDataSource>,
        enrichment: Arc<EnrichmentService>,
    ) -> Self {
        Self {
            repo,
            source,
            enrichment,
        }
    }

    /// Read a page in insertion order, bulk-seeding first when the store
    /// is empty. Bulk-seed failure fails the whole call; per-record
    /// enrichment failures do not.
    pub async fn list(&self, offset: u32, limit: u32) -> AppResult<Vec<PokemonRecord>> {
        let started = Instant::now();

        let mut page = self.repo.list(offset, limit)?;

        if page.is_empty() && offset == 0 && self.repo.count()? == 0 {
            self.seed().await?;
            page = self.repo.list(offset, limit)?;
        }

        let enriched = self.enrich_page(page).await;

        info!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            offset, limit, "list"
        );

        Ok(enriched)
    }

    /// Case-insensitive substring match on name only.
    pub async fn search(&self, query: &str, limit: u32) -> AppResult<Vec<PokemonRecord>> {
        let started = Instant::now();

        let matches = self.repo.search_by_name(query, limit)?;
        let enriched = self.enrich_page(matches).await;

        info!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            query, limit, "search"
        );

        Ok(enriched)
    }

    /// All favorited records, lazily enriched like any other page.
    pub async fn favorites(&self) -> AppResult<Vec<PokemonRecord>> {
        let favorites = self.repo.list_favorites()?;
        Ok(self.enrich_page(favorites).await)
    }

    /// Detail view. Short-circuits without upstream calls once a record is
    /// fully enriched; otherwise runs the evolution-aware enrichment path
    /// and marks the record viewed.
    pub async fn get_details(&self, id: Uuid) -> AppResult<PokemonRecord> {
        let record = self
            .repo
            .get_by_id(id)?
            .ok_or_else(|| AppError::NotFound(format!("Pokemon with ID {} not found", id)))?;

        if record.has_full_details() {
            return Ok(record);
        }

        let enrichment = self.enrichment.enrich_full(&record).await?;

        Ok(PokemonRecord {
            enrichment: Some(enrichment),
            is_viewed: true,
            ..record
        })
    }

    /// Single-field favorite update. Idempotent end state.
    pub fn set_favorite(&self, id: Uuid, value: bool) -> AppResult<()> {
        self.repo.set_favorite(id, value)
    }

    // ------------------------------------------------------------------
    // Legacy favorites-by-name surface, served off the same flag
    // ------------------------------------------------------------------

    pub fn favorite_names(&self) -> AppResult<Vec<String>> {
        self.repo.favorite_names()
    }

    pub fn add_favorite_by_name(&self, name: &str) -> AppResult<()> {
        let record = self
            .repo
            .get_by_name(name)?
            .ok_or_else(|| AppError::NotFound(format!("Pokemon {} not found", name)))?;

        if record.is_favorite {
            warn!(pokemon = name, "already in favorites");
            return Err(AppError::Conflict(format!(
                "Pokemon {} is already in favorites",
                name
            )));
        }

        self.repo.set_favorite(record.id, true)
    }

    pub fn remove_favorite_by_name(&self, name: &str) -> AppResult<()> {
        let record = self
            .repo
            .get_by_name(name)?
            .filter(|r| r.is_favorite)
            .ok_or_else(|| {
                warn!(pokemon = name, "not found in favorites");
                AppError::NotFound(format!("Pokemon {} not found in favorites", name))
            })?;

        self.repo.set_favorite(record.id, false)
    }

    // ------------------------------------------------------------------
    // Internal
    // ------------------------------------------------------------------

    /// One-time bulk seeding: bare records only, enrichment stays lazy.
    async fn seed(&self) -> AppResult<()> {
        let species = self.source.list_species(SEED_SPECIES_COUNT).await?;

        let records: Vec<PokemonRecord> = species
            .into_iter()
            .map(|entry| PokemonRecord::new(entry.name, entry.url))
            .collect();

        let inserted = self.repo.insert_bare(&records)?;
        info!(inserted, "bulk-seeded empty store");

        Ok(())
    }

    /// Fire out basic enrichment for every bare record in the slice and
    /// await all. A failed record is served bare and retried on its next
    /// touch; availability wins over completeness here.
    async fn enrich_page(&self, page: Vec<PokemonRecord>) -> Vec<PokemonRecord> {
        let enrich_one = |record: PokemonRecord| async move {
            if record.has_enrichment() {
                return record;
            }

            match self.enrichment.enrich_basic(&record).await {
                Ok(enrichment) => PokemonRecord {
                    enrichment: Some(enrichment),
                    ..record
                },
                Err(err) => {
                    warn!(
                        pokemon = %record.name,
                        error = %err,
                        "enrichment failed, serving record bare"
                    );
                    record
                }
            }
        };

        join_all(page.into_iter().map(enrich_one)).await
    }
}
