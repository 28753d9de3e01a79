// src/api/favorites_handlers.rs
//
// Legacy favorites-by-name surface. The store of truth is the
// `is_favorite` flag on the record; these endpoints are thin adapters
// kept for older clients.

use axum::{extract::State, http::StatusCode, Json};

use crate::error::{AppError, AppResult};

use super::dto::FavoriteNameBody;
use super::AppState;

/// GET /favorites → names, most recently updated first
pub async fn list_favorites(State(state): State<AppState>) -> AppResult<Json<Vec<String>>> {
    Ok(Json(state.pokemon_service.favorite_names()?))
}

/// POST /favorites {name}
pub async fn add_favorite(
    State(state): State<AppState>,
    Json(body): Json<FavoriteNameBody>,
) -> AppResult<(StatusCode, Json<FavoriteNameBody>)> {
    let name = validated_name(&body)?;

    state.pokemon_service.add_favorite_by_name(name)?;

    Ok((
        StatusCode::CREATED,
        Json(FavoriteNameBody {
            name: name.to_string(),
        }),
    ))
}

/// DELETE /favorites {name}
pub async fn remove_favorite(
    State(state): State<AppState>,
    Json(body): Json<FavoriteNameBody>,
) -> AppResult<StatusCode> {
    let name = validated_name(&body)?;

    state.pokemon_service.remove_favorite_by_name(name)?;

    Ok(StatusCode::NO_CONTENT)
}

fn validated_name(body: &FavoriteNameBody) -> AppResult<&str> {
    let name = body.name.trim();
    if name.is_empty() {
        return Err(AppError::Validation("name must not be empty".to_string()));
    }
    Ok(name)
}
