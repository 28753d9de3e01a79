// src/integrations/pokeapi/mod.rs

pub mod client;
pub mod types;

pub use client::{PokeApiClient, PokemonDataSource};
pub use types::{
    ChainLink, EvolutionChainResponse, EvolutionDetail, PokemonDetailsResponse, RawSprites,
    SpeciesEntry,
};

#[cfg(test)]
pub use client::MockPokemonDataSource;
