// src/domain/pokemon/mod.rs

pub mod enrichment;
pub mod entity;

pub use enrichment::{
    AbilityRef, Enrichment, EvolutionEntry, MoveRef, NamedRef, SpriteSet, StatEntry, TypeRef,
};
pub use entity::PokemonRecord;
