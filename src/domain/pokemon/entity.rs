use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enrichment::Enrichment;

/// One cached Pokémon species. The root entity of the store.
///
/// Records are created only during bulk seeding and never deleted.
/// `enrichment` is appended in place (two-phase: basic fields first,
/// evolutions on first detail view) and never removed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PokemonRecord {
    /// Internal immutable identifier
    pub id: Uuid,

    /// Lowercase species name, unique across the store
    pub name: String,

    /// Upstream detail-resource URL captured at seed time
    pub source_url: String,

    /// Written only by the favorite toggle
    pub is_favorite: bool,

    /// Set true once evolution-aware enrichment succeeds
    pub is_viewed: bool,

    /// Absent until the first detail fetch succeeds
    pub enrichment: Option<Enrichment>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl PokemonRecord {
    /// Create a bare (unenriched) record, as inserted during bulk seeding.
    pub fn new(name: String, source_url: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            source_url,
            is_favorite: false,
            is_viewed: false,
            enrichment: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// True when the basic enrichment fields are present.
    pub fn has_enrichment(&self) -> bool {
        self.enrichment.is_some()
    }

    /// True when the record has been fully enriched via the detail-view
    /// path and can be served without touching the upstream source.
    pub fn has_full_details(&self) -> bool {
        self.is_viewed
            && self
                .enrichment
                .as_ref()
                .and_then(|e| e.evolutions.as_ref())
                .map(|evos| !evos.is_empty())
                .unwrap_or(false)
    }
}
