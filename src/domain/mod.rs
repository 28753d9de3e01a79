// src/domain/mod.rs
//
// Domain Root - The Single Source of Truth for Domain API
//
// All other modules import from `crate::domain::*`

pub mod pokemon;

pub use pokemon::{
    AbilityRef, Enrichment, EvolutionEntry, MoveRef, NamedRef, PokemonRecord, SpriteSet,
    StatEntry, TypeRef,
};
