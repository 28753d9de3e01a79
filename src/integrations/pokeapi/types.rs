// src/integrations/pokeapi/types.rs
//
// Typed upstream payloads. These mirror the PokeAPI wire shapes only as
// far as we consume them; everything else is ignored on deserialization.

use serde::Deserialize;

/// One entry of the paginated species list.
#[derive(Debug, Clone, Deserialize)]
pub struct SpeciesEntry {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct SpeciesListResponse {
    pub results: Vec<SpeciesEntry>,
}

/// Per-species detail payload.
#[derive(Debug, Clone, Deserialize)]
pub struct PokemonDetailsResponse {
    pub id: i64,
    pub name: String,
    pub types: Vec<TypeSlot>,
    pub abilities: Vec<AbilitySlot>,
    pub height: i64,
    pub weight: i64,
    pub base_experience: Option<i64>,
    pub stats: Vec<StatSlot>,
    pub sprites: RawSprites,
    pub moves: Vec<MoveSlot>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TypeSlot {
    #[serde(rename = "type")]
    pub type_ref: NamedResource,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AbilitySlot {
    pub ability: NamedResource,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatSlot {
    pub base_stat: i64,
    pub effort: i64,
    pub stat: NamedResource,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MoveSlot {
    #[serde(rename = "move")]
    pub move_ref: NamedResource,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NamedResource {
    pub name: String,
}

/// Raw sprite map. The `other` and `versions` groups are frequently
/// missing for forms and variants, hence the defaults everywhere.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSprites {
    pub front_default: Option<String>,
    pub back_default: Option<String>,
    pub back_shiny: Option<String>,
    #[serde(default)]
    pub other: SpriteOther,
    #[serde(default)]
    pub versions: SpriteVersions,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SpriteOther {
    #[serde(default)]
    pub dream_world: SpriteGroup,
    #[serde(rename = "official-artwork", default)]
    pub official_artwork: SpriteGroup,
    #[serde(default)]
    pub home: SpriteGroup,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SpriteGroup {
    pub front_default: Option<String>,
    pub front_shiny: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SpriteVersions {
    #[serde(rename = "generation-v", default)]
    pub generation_v: GenerationV,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerationV {
    #[serde(rename = "black-white", default)]
    pub black_white: BlackWhite,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BlackWhite {
    #[serde(default)]
    pub animated: AnimatedSprites,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnimatedSprites {
    pub front_default: Option<String>,
    pub back_default: Option<String>,
    pub front_shiny: Option<String>,
    pub back_shiny: Option<String>,
}

/// Evolution-chain payload: a tree of species nodes.
#[derive(Debug, Clone, Deserialize)]
pub struct EvolutionChainResponse {
    pub chain: ChainLink,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChainLink {
    pub species: SpeciesEntry,
    #[serde(default)]
    pub evolves_to: Vec<ChainLink>,
    #[serde(default)]
    pub evolution_details: Vec<EvolutionDetail>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EvolutionDetail {
    pub min_level: Option<i64>,
    pub item: Option<NamedResource>,
    pub trigger: Option<NamedResource>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn details_payload_tolerates_missing_sprite_groups() {
        let json = r#"{
            "id": 25,
            "name": "pikachu",
            "types": [{"slot": 1, "type": {"name": "electric", "url": "u"}}],
            "abilities": [{"ability": {"name": "static", "url": "u"}, "is_hidden": false}],
            "height": 4,
            "weight": 60,
            "base_experience": 112,
            "stats": [{"base_stat": 35, "effort": 0, "stat": {"name": "hp", "url": "u"}}],
            "sprites": {"front_default": "front.png"},
            "moves": [{"move": {"name": "thunder-shock", "url": "u"}}]
        }"#;

        let details: PokemonDetailsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(details.id, 25);
        assert_eq!(details.types[0].type_ref.name, "electric");
        assert_eq!(details.sprites.front_default.as_deref(), Some("front.png"));
        assert!(details.sprites.other.home.front_default.is_none());
        assert!(details
            .sprites
            .versions
            .generation_v
            .black_white
            .animated
            .back_default
            .is_none());
    }

    #[test]
    fn chain_payload_parses_nested_links() {
        let json = r#"{
            "chain": {
                "species": {"name": "pichu", "url": "https://pokeapi.co/api/v2/pokemon-species/172/"},
                "evolution_details": [],
                "evolves_to": [{
                    "species": {"name": "pikachu", "url": "https://pokeapi.co/api/v2/pokemon-species/25/"},
                    "evolution_details": [{"min_level": null, "trigger": {"name": "level-up", "url": "u"}}],
                    "evolves_to": []
                }]
            }
        }"#;

        let chain: EvolutionChainResponse = serde_json::from_str(json).unwrap();
        assert_eq!(chain.chain.species.name, "pichu");
        assert_eq!(chain.chain.evolves_to[0].species.name, "pikachu");
        assert_eq!(
            chain.chain.evolves_to[0].evolution_details[0]
                .trigger
                .as_ref()
                .unwrap()
                .name,
            "level-up"
        );
    }
}
