// src/api/dto.rs
//
// Wire shapes. Field names (`_id`, `isFav`, `isViewed`, `details`) are
// the historical client contract and must not drift.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Enrichment, PokemonRecord};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PokemonResponse {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    pub url: String,
    #[serde(rename = "isFav")]
    pub is_fav: bool,
    #[serde(rename = "isViewed")]
    pub is_viewed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Enrichment>,
}

impl From<PokemonRecord> for PokemonResponse {
    fn from(record: PokemonRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            url: record.source_url,
            is_fav: record.is_favorite,
            is_viewed: record.is_viewed,
            details: record.enrichment,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailsResponse {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub details: Enrichment,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FavoriteToggleBody {
    #[serde(rename = "isFavorite")]
    pub is_favorite: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FavoriteNameBody {
    pub name: String,
}
