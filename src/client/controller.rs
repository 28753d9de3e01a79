// src/client/controller.rs
//
// Pagination/Cache Controller
//
// Browser-side state machine: requests successive pages, merges them into
// a local list, derives a filtered view (search / favorites-only), and
// reconciles optimistic favorite edits against server confirmation.
//
// Single-owner (&mut self) by design, mirroring the event-loop model it
// came from; the loading flag guards re-entrant triggers from a scroll
// sensor driving it through a command queue.

use std::sync::Arc;

use tracing::warn;
use uuid::Uuid;

use crate::api::dto::{DetailsResponse, PokemonResponse};
use crate::error::AppResult;

use super::api::PokehubApi;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    None,
    Query(String),
    FavoritesOnly,
}

pub struct PaginationController {
    api: Arc<dyn PokehubApi>,
    page_size: u32,

    full_list: Vec<PokemonResponse>,
    page: u32,
    has_more: bool,
    loading: bool,

    filter: Filter,
    /// The filtered view pages through `full_list` locally
    filter_page: u32,

    /// Bumped on every detail fetch; stale responses are discarded
    detail_generation: u64,
}

impl PaginationController {
    pub fn new(api: Arc<dyn PokehubApi>, page_size: u32) -> Self {
        Self {
            api,
            page_size,
            full_list: Vec::new(),
            page: 0,
            has_more: true,
            loading: false,
            filter: Filter::None,
            filter_page: 1,
            detail_generation: 0,
        }
    }

    /// Fetch page 0 and replace the local list.
    pub async fn load_first_page(&mut self) -> AppResult<()> {
        if self.loading {
            return Ok(());
        }

        self.loading = true;
        let result = self.api.fetch_page(0, self.page_size).await;
        self.loading = false;

        let records = result?;
        self.has_more = records.len() as u32 >= self.page_size;
        self.full_list = records;
        self.page = 1;
        self.filter_page = 1;

        Ok(())
    }

    /// Fetch the next page and append it. Returns false when the call was
    /// skipped (already loading, or nothing left to fetch).
    pub async fn load_more(&mut self) -> AppResult<bool> {
        if self.loading {
            return Ok(false);
        }

        // A filtered view pages through what is already cached
        if self.filter != Filter::None {
            let shown = (self.filter_page * self.page_size) as usize;
            if self.filtered().len() > shown {
                self.filter_page += 1;
                return Ok(true);
            }
            return Ok(false);
        }

        if !self.has_more {
            return Ok(false);
        }

        self.loading = true;
        let result = self
            .api
            .fetch_page(self.page * self.page_size, self.page_size)
            .await;
        self.loading = false;

        let records = result?;
        self.has_more = records.len() as u32 >= self.page_size;

        // Append in request order; a record already cached keeps its slot
        for record in records {
            if !self.full_list.iter().any(|r| r.id == record.id) {
                self.full_list.push(record);
            }
        }
        self.page += 1;

        Ok(true)
    }

    /// Change the derived view without discarding the cached list. Text
    /// queries additionally hit the server-side search endpoint so matches
    /// beyond the cached pages are pulled in.
    pub async fn set_filter(&mut self, filter: Filter) -> AppResult<()> {
        if let Filter::Query(query) = &filter {
            let matches = self.api.search(query, self.page_size).await?;
            for record in matches {
                if !self.full_list.iter().any(|r| r.id == record.id) {
                    self.full_list.push(record);
                }
            }
        }

        self.filter = filter;
        self.filter_page = 1;

        Ok(())
    }

    /// Optimistic favorite toggle: flip locally, confirm with the server,
    /// revert on failure. No other field is touched.
    pub async fn toggle_favorite(&mut self, id: Uuid) -> AppResult<()> {
        let Some(index) = self.full_list.iter().position(|r| r.id == id) else {
            return Ok(());
        };

        let new_value = !self.full_list[index].is_fav;
        self.full_list[index].is_fav = new_value;

        if let Err(err) = self.api.set_favorite(id, new_value).await {
            warn!(%id, error = %err, "favorite toggle rejected, reverting");
            self.full_list[index].is_fav = !new_value;
            return Err(err);
        }

        Ok(())
    }

    /// Fetch details for a record. Returns None when a newer detail fetch
    /// was started while this one was in flight: the stale response must
    /// not overwrite the newer selection.
    pub async fn open_details(&mut self, id: Uuid) -> AppResult<Option<DetailsResponse>> {
        let generation = self.begin_details();
        let response = self.api.fetch_details(id).await?;
        Ok(self.apply_details(generation, response))
    }

    /// Start a detail fetch, invalidating any still in flight.
    pub fn begin_details(&mut self) -> u64 {
        self.detail_generation += 1;
        self.detail_generation
    }

    /// Merge a completed detail response, unless a newer fetch superseded
    /// the one identified by `generation`.
    pub fn apply_details(
        &mut self,
        generation: u64,
        response: DetailsResponse,
    ) -> Option<DetailsResponse> {
        if generation != self.detail_generation {
            return None;
        }

        if let Some(record) = self.full_list.iter_mut().find(|r| r.id == response.id) {
            record.details = Some(response.details.clone());
            record.is_viewed = true;
        }

        Some(response)
    }

    /// The records the current filter and filter-page expose.
    pub fn visible(&self) -> Vec<&PokemonResponse> {
        // Unfiltered, the server already paginated for us
        if self.filter == Filter::None {
            return self.full_list.iter().collect();
        }

        let filtered = self.filtered();
        let shown = (self.filter_page * self.page_size) as usize;
        filtered.into_iter().take(shown).collect()
    }

    pub fn full_list(&self) -> &[PokemonResponse] {
        &self.full_list
    }

    pub fn has_more(&self) -> bool {
        match self.filter {
            Filter::None => self.has_more,
            _ => self.filtered().len() > (self.filter_page * self.page_size) as usize,
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    fn filtered(&self) -> Vec<&PokemonResponse> {
        match &self.filter {
            Filter::None => self.full_list.iter().collect(),
            Filter::Query(query) => {
                let needle = query.to_lowercase();
                self.full_list
                    .iter()
                    .filter(|r| r.name.to_lowercase().contains(&needle))
                    .collect()
            }
            Filter::FavoritesOnly => self.full_list.iter().filter(|r| r.is_fav).collect(),
        }
    }
}
