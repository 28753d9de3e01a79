// src/client/mod.rs
//
// Embeddable client tier: transport + pagination/cache controller.

pub mod api;
pub mod controller;


pub use api::{HttpPokehubApi, PokehubApi};
pub use controller::{Filter, PaginationController};
