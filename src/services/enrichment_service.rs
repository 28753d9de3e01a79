// src/services/enrichment_service.rs
//
// Enrichment Fetcher
//
// Pulls the upstream detail payload for a stored-but-unenriched record,
// reshapes it into the denormalized enrichment blob, and writes it back.
// Two-phase: basic fields on first list/search touch, evolutions on first
// detail view. Re-running with no intervening store mutation produces an
// identical blob, so overlapping duplicate fetches are benign.

use std::sync::{Arc, OnceLock};

use regex::Regex;
use tracing::warn;

use crate::domain::{
    AbilityRef, Enrichment, EvolutionEntry, MoveRef, NamedRef, PokemonRecord, SpriteSet,
    StatEntry, TypeRef,
};
use crate::error::AppResult;
use crate::integrations::pokeapi::{ChainLink, PokemonDetailsResponse, RawSprites};
use crate::integrations::PokemonDataSource;
use crate::repositories::PokemonRepository;

const SPRITE_REPO_URL: &str =
    "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon";

pub struct EnrichmentService {
    source: Arc<dyn PokemonDataSource>,
    repo: Arc<dyn PokemonRepository>,
}

impl EnrichmentService {
    pub fn new(source: Arc<dyn PokemonDataSource>, repo: Arc<dyn PokemonRepository>) -> Self {
        Self { source, repo }
    }

    /// Fetch and persist the basic enrichment fields for the list view.
    /// On upstream failure the record is left unmodified.
    pub async fn enrich_basic(&self, record: &PokemonRecord) -> AppResult<Enrichment> {
        let details = self.source.fetch_details(&record.source_url).await?;
        let enrichment = build_enrichment(details);

        self.repo.save_enrichment(record.id, &enrichment, false)?;

        Ok(enrichment)
    }

    /// Evolution-aware path: basic fields (fetched only if still missing)
    /// plus the flattened evolution chain. Marks the record viewed.
    ///
    /// A failed chain fetch is recovered with an empty evolution list; the
    /// upstream chain endpoint is flaky for some ids and the detail view
    /// must still render.
    pub async fn enrich_full(&self, record: &PokemonRecord) -> AppResult<Enrichment> {
        let mut enrichment = match &record.enrichment {
            Some(existing) => existing.clone(),
            None => {
                let details = self.source.fetch_details(&record.source_url).await?;
                build_enrichment(details)
            }
        };

        let evolutions = match self.source.fetch_evolution_chain(enrichment.id).await {
            Ok(response) => flatten_chain(&response.chain),
            Err(err) => {
                warn!(
                    pokemon = %record.name,
                    error = %err,
                    "failed to fetch evolution chain, continuing without evolutions"
                );
                Vec::new()
            }
        };
        enrichment.evolutions = Some(evolutions);

        self.repo.save_enrichment(record.id, &enrichment, true)?;

        Ok(enrichment)
    }
}

/// Reshape the upstream detail payload into the stored blob.
pub(crate) fn build_enrichment(details: PokemonDetailsResponse) -> Enrichment {
    let sprites = normalize_sprites(&details.sprites);

    Enrichment {
        id: details.id,
        name: details.name,
        types: details
            .types
            .into_iter()
            .map(|slot| TypeRef::Structured {
                r#type: NamedRef {
                    name: slot.type_ref.name,
                },
            })
            .collect(),
        abilities: details
            .abilities
            .into_iter()
            .map(|slot| AbilityRef::Legacy(slot.ability.name))
            .collect(),
        height: details.height,
        weight: details.weight,
        base_experience: details.base_experience,
        stats: details
            .stats
            .into_iter()
            .map(|slot| StatEntry {
                name: slot.stat.name,
                base_stat: slot.base_stat,
                effort: slot.effort,
            })
            .collect(),
        sprites,
        moves: details
            .moves
            .into_iter()
            .map(|slot| MoveRef::Legacy(slot.move_ref.name))
            .collect(),
        evolutions: None,
    }
}

/// Normalize the raw sprite map into the stored set.
///
/// Fallback order:
/// - front: official-artwork > dream_world > home > top-level front_default
/// - back: top-level back_default > gen-V animated back
/// - front_shiny: home > gen-V animated
/// - back_shiny: top-level > gen-V animated
pub(crate) fn normalize_sprites(raw: &RawSprites) -> SpriteSet {
    let animated = &raw.versions.generation_v.black_white.animated;

    SpriteSet {
        front: raw
            .other
            .official_artwork
            .front_default
            .clone()
            .or_else(|| raw.other.dream_world.front_default.clone())
            .or_else(|| raw.other.home.front_default.clone())
            .or_else(|| raw.front_default.clone()),
        back: raw
            .back_default
            .clone()
            .or_else(|| animated.back_default.clone()),
        front_shiny: raw
            .other
            .home
            .front_shiny
            .clone()
            .or_else(|| animated.front_shiny.clone()),
        back_shiny: raw
            .back_shiny
            .clone()
            .or_else(|| animated.back_shiny.clone()),
        front_artwork: raw.other.official_artwork.front_default.clone(),
    }
}

/// Walk the chain tree breadth-first, collecting the base form plus every
/// reachable evolution. The upstream shape defines the depth; none is
/// enforced here.
pub(crate) fn flatten_chain(chain: &ChainLink) -> Vec<EvolutionEntry> {
    let mut evolutions = Vec::new();
    let mut queue = std::collections::VecDeque::new();

    let base_id = id_from_url(&chain.species.url);
    evolutions.push(EvolutionEntry {
        id: base_id,
        name: chain.species.name.clone(),
        sprite: sprite_url(base_id),
        condition: None,
    });
    queue.extend(chain.evolves_to.iter());

    while let Some(link) = queue.pop_front() {
        let id = id_from_url(&link.species.url);
        evolutions.push(EvolutionEntry {
            id,
            name: link.species.name.clone(),
            sprite: sprite_url(id),
            condition: Some(evolution_condition(link)),
        });
        queue.extend(link.evolves_to.iter());
    }

    evolutions
}

/// Derive the human-readable trigger from the first detail entry.
/// Precedence: min_level > item > named trigger > "Unknown".
pub(crate) fn evolution_condition(link: &ChainLink) -> String {
    if let Some(details) = link.evolution_details.first() {
        if let Some(level) = details.min_level {
            return format!("Level {}", level);
        }
        if let Some(item) = &details.item {
            return format!("Use {}", item.name);
        }
        if let Some(trigger) = &details.trigger {
            return trigger.name.clone();
        }
    }

    "Unknown".to_string()
}

/// Numeric resource id from the trailing path segment of an upstream URL,
/// e.g. ".../pokemon-species/25/" -> 25. Returns 0 when the URL has no
/// trailing number, matching the tolerant historical behavior.
pub(crate) fn id_from_url(url: &str) -> i64 {
    static ID_RE: OnceLock<Regex> = OnceLock::new();
    let re = ID_RE.get_or_init(|| Regex::new(r"/(\d+)/?$").expect("valid regex"));

    re.captures(url)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0)
}

fn sprite_url(id: i64) -> String {
    format!("{}/{}.png", SPRITE_REPO_URL, id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::integrations::pokeapi::types::{EvolutionDetail, NamedResource, SpeciesEntry};

    fn link(name: &str, id: i64, details: Vec<EvolutionDetail>, next: Vec<ChainLink>) -> ChainLink {
        ChainLink {
            species: SpeciesEntry {
                name: name.to_string(),
                url: format!("https://pokeapi.co/api/v2/pokemon-species/{}/", id),
            },
            evolves_to: next,
            evolution_details: details,
        }
    }

    #[test]
    fn test_id_from_url_trailing_segment() {
        assert_eq!(
            id_from_url("https://pokeapi.co/api/v2/pokemon-species/25/"),
            25
        );
        assert_eq!(id_from_url("https://pokeapi.co/api/v2/pokemon/133"), 133);
        assert_eq!(id_from_url("https://pokeapi.co/api/v2/pokemon/"), 0);
    }

    #[test]
    fn test_condition_prefers_min_level_over_item() {
        let node = link(
            "ivysaur",
            2,
            vec![EvolutionDetail {
                min_level: Some(16),
                item: Some(NamedResource {
                    name: "rare-candy".to_string(),
                }),
                trigger: Some(NamedResource {
                    name: "level-up".to_string(),
                }),
            }],
            vec![],
        );

        assert_eq!(evolution_condition(&node), "Level 16");
    }

    #[test]
    fn test_condition_item_then_trigger_then_unknown() {
        let item_only = link(
            "vaporeon",
            134,
            vec![EvolutionDetail {
                min_level: None,
                item: Some(NamedResource {
                    name: "water-stone".to_string(),
                }),
                trigger: None,
            }],
            vec![],
        );
        assert_eq!(evolution_condition(&item_only), "Use water-stone");

        let trigger_only = link(
            "machamp",
            68,
            vec![EvolutionDetail {
                min_level: None,
                item: None,
                trigger: Some(NamedResource {
                    name: "trade".to_string(),
                }),
            }],
            vec![],
        );
        assert_eq!(evolution_condition(&trigger_only), "trade");

        let empty = link("caterpie", 10, vec![EvolutionDetail::default()], vec![]);
        assert_eq!(evolution_condition(&empty), "Unknown");

        let no_details = link("caterpie", 10, vec![], vec![]);
        assert_eq!(evolution_condition(&no_details), "Unknown");
    }

    #[test]
    fn test_flatten_chain_breadth_first() {
        // pichu -> pikachu -> raichu, with a hypothetical sibling branch
        let chain = link(
            "pichu",
            172,
            vec![],
            vec![link(
                "pikachu",
                25,
                vec![EvolutionDetail {
                    min_level: None,
                    item: None,
                    trigger: Some(NamedResource {
                        name: "level-up".to_string(),
                    }),
                }],
                vec![link(
                    "raichu",
                    26,
                    vec![EvolutionDetail {
                        min_level: None,
                        item: Some(NamedResource {
                            name: "thunder-stone".to_string(),
                        }),
                        trigger: None,
                    }],
                    vec![],
                )],
            )],
        );

        let flat = flatten_chain(&chain);
        let names: Vec<&str> = flat.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["pichu", "pikachu", "raichu"]);

        // Base form carries no condition
        assert!(flat[0].condition.is_none());
        assert_eq!(flat[1].condition.as_deref(), Some("level-up"));
        assert_eq!(flat[2].condition.as_deref(), Some("Use thunder-stone"));
        assert!(flat[2].sprite.ends_with("/26.png"));
    }

    #[test]
    fn test_flatten_chain_handles_branching() {
        // eevee fans out to three stones
        let chain = link(
            "eevee",
            133,
            vec![],
            vec![
                link("vaporeon", 134, vec![], vec![]),
                link("jolteon", 135, vec![], vec![]),
                link("flareon", 136, vec![], vec![]),
            ],
        );

        let flat = flatten_chain(&chain);
        assert_eq!(flat.len(), 4);
        assert_eq!(flat[0].name, "eevee");
        assert_eq!(
            flat.iter().map(|e| e.id).collect::<Vec<_>>(),
            vec![133, 134, 135, 136]
        );
    }

    #[test]
    fn test_sprite_fallback_order() {
        let mut raw = RawSprites::default();
        raw.front_default = Some("plain-front.png".to_string());
        assert_eq!(
            normalize_sprites(&raw).front.as_deref(),
            Some("plain-front.png")
        );

        raw.other.home.front_default = Some("home.png".to_string());
        assert_eq!(normalize_sprites(&raw).front.as_deref(), Some("home.png"));

        raw.other.dream_world.front_default = Some("dream.png".to_string());
        assert_eq!(normalize_sprites(&raw).front.as_deref(), Some("dream.png"));

        raw.other.official_artwork.front_default = Some("artwork.png".to_string());
        let set = normalize_sprites(&raw);
        assert_eq!(set.front.as_deref(), Some("artwork.png"));
        assert_eq!(set.front_artwork.as_deref(), Some("artwork.png"));
    }

    #[test]
    fn test_sprite_back_falls_back_to_animated() {
        let mut raw = RawSprites::default();
        raw.versions.generation_v.black_white.animated.back_default =
            Some("animated-back.gif".to_string());

        assert_eq!(
            normalize_sprites(&raw).back.as_deref(),
            Some("animated-back.gif")
        );

        raw.back_default = Some("static-back.png".to_string());
        assert_eq!(
            normalize_sprites(&raw).back.as_deref(),
            Some("static-back.png")
        );
    }
}
