// src/api/pokemon_handlers.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::{AppError, AppResult};

use super::dto::{DetailsResponse, FavoriteToggleBody, PokemonResponse};
use super::AppState;

fn default_limit() -> u32 {
    20
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub offset: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
    #[serde(default)]
    pub favorites: bool,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub query: Option<String>,
    #[serde(default = "default_limit")]
    pub limit: u32,
}

/// GET /pokemon?offset=&limit=&favorites=
pub async fn get_all_pokemon(
    State(state): State<AppState>,
    Query(params): Query<ListQuery>,
) -> AppResult<Json<Vec<PokemonResponse>>> {
    let records = if params.favorites {
        state.pokemon_service.favorites().await?
    } else {
        state
            .pokemon_service
            .list(params.offset, params.limit)
            .await?
    };

    Ok(Json(records.into_iter().map(Into::into).collect()))
}

/// GET /pokemon/search?query=&limit=
pub async fn search_pokemon(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> AppResult<Json<Vec<PokemonResponse>>> {
    let query = params
        .query
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .ok_or_else(|| AppError::Validation("Missing query parameter".to_string()))?;

    let records = state.pokemon_service.search(query, params.limit).await?;

    Ok(Json(records.into_iter().map(Into::into).collect()))
}

/// GET /pokemon/:id/details
pub async fn get_pokemon_details(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<DetailsResponse>> {
    let id = Uuid::parse_str(&id)?;

    let record = state.pokemon_service.get_details(id).await?;
    let details = record
        .enrichment
        .ok_or_else(|| AppError::Other("Enriched record missing details".to_string()))?;

    Ok(Json(DetailsResponse {
        id: record.id,
        details,
    }))
}

/// PATCH /pokemon/:id/favorite
pub async fn set_favorite(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<FavoriteToggleBody>,
) -> AppResult<StatusCode> {
    let id = Uuid::parse_str(&id)?;

    state.pokemon_service.set_favorite(id, body.is_favorite)?;

    Ok(StatusCode::NO_CONTENT)
}
