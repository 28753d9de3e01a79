// src/services/mod.rs
//
// Services Module - Orchestration Layer

pub mod enrichment_service;
pub mod pokemon_service;


pub use enrichment_service::EnrichmentService;
pub use pokemon_service::PokemonService;
