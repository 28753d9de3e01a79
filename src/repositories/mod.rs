// src/repositories/mod.rs
//
// Repository layer
//
// CRITICAL RULES:
// - Repositories are DUMB data mappers
// - NO business logic
// - NO invariant enforcement
// - Explicit SQL only

pub mod pokemon_repository;

pub use pokemon_repository::{PokemonRepository, SqlitePokemonRepository};
