// src/integrations/mod.rs
//
// External integrations - infrastructure boundary

pub mod pokeapi;

pub use pokeapi::{PokeApiClient, PokemonDataSource};
