// src/config.rs
//
// Environment configuration with logged defaults.

use std::env;
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;

use tracing::info;

use crate::db::default_database_path;
use crate::error::AppResult;

pub struct Config {
    pub port: u16,
    pub db_path: PathBuf,
    pub pokeapi_base_url: String,
    pub cors_origin: String,
}

impl Config {
    pub fn load() -> AppResult<Self> {
        let db_path = match env::var("POKEHUB_DB_PATH") {
            Ok(path) => PathBuf::from(path),
            Err(_) => default_database_path()?,
        };

        Ok(Self {
            port: try_load("POKEHUB_PORT", "4000"),
            db_path,
            pokeapi_base_url: load_or(
                "POKEAPI_BASE_URL",
                "https://pokeapi.co/api/v2",
            ),
            cors_origin: load_or("FRONTEND_URL", "http://localhost:5173"),
        })
    }
}

fn load_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    })
}

fn try_load<T: FromStr>(key: &str, default: &str) -> T
where
    T::Err: Display,
{
    load_or(key, default)
        .parse()
        .unwrap_or_else(|e| panic!("Invalid {key} value: {e}"))
}
