// Denormalized detail blob attached to a PokemonRecord after the first
// upstream fetch. Stored as JSON in the `enrichment` column.
//
// The blob went through several historical shapes (plain string types vs.
// `{type: {name}}` objects); all shape tolerance lives in the untagged
// unions here, resolved once at the store boundary, so nothing downstream
// ever sniffs shapes again.

use serde::{Deserialize, Serialize};

/// Basic enrichment fields plus the optional evolution list.
///
/// Invariant: either the whole struct is absent from the record, or all
/// basic fields are present. `evolutions` may lag behind (two-phase
/// enrichment).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enrichment {
    /// Numeric species id from the upstream source
    pub id: i64,

    /// Display name as reported upstream
    pub name: String,

    /// Type names, normalized to plain lowercase strings
    pub types: Vec<TypeRef>,

    /// Ability names
    pub abilities: Vec<AbilityRef>,

    pub height: i64,
    pub weight: i64,
    pub base_experience: Option<i64>,

    pub stats: Vec<StatEntry>,
    pub sprites: SpriteSet,

    /// Move names (full move metadata is deliberately not kept)
    pub moves: Vec<MoveRef>,

    /// Present only after the detail-view path has run
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evolutions: Option<Vec<EvolutionEntry>>,
}

/// A type reference in either historical shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TypeRef {
    Legacy(String),
    Structured { r#type: NamedRef },
}

impl TypeRef {
    /// Resolve either shape to the bare type name.
    pub fn name(&self) -> &str {
        match self {
            TypeRef::Legacy(name) => name,
            TypeRef::Structured { r#type } => &r#type.name,
        }
    }
}

/// An ability reference in either historical shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AbilityRef {
    Legacy(String),
    Structured { ability: NamedRef },
}

impl AbilityRef {
    pub fn name(&self) -> &str {
        match self {
            AbilityRef::Legacy(name) => name,
            AbilityRef::Structured { ability } => &ability.name,
        }
    }
}

/// A move reference in either historical shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MoveRef {
    Legacy(String),
    Structured { r#move: NamedRef },
}

impl MoveRef {
    pub fn name(&self) -> &str {
        match self {
            MoveRef::Legacy(name) => name,
            MoveRef::Structured { r#move } => &r#move.name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedRef {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatEntry {
    pub name: String,
    pub base_stat: i64,
    pub effort: i64,
}

/// Normalized sprite URLs. Fallback order is fixed at fetch time:
/// front: official-artwork > dream_world > home > top-level front_default;
/// back / shiny variants fall back to the generation-V animated set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpriteSet {
    pub front: Option<String>,
    pub back: Option<String>,
    pub front_shiny: Option<String>,
    pub back_shiny: Option<String>,
    pub front_artwork: Option<String>,
}

/// One node of a flattened evolution chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvolutionEntry {
    pub id: i64,
    pub name: String,
    pub sprite: String,

    /// Human-readable trigger: "Level 16", "Use water-stone", a bare
    /// trigger name, or "Unknown". Absent on the chain's base form.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
}
