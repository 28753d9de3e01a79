// src/db/mod.rs

pub mod connection;
pub mod migrations;

pub use connection::{create_connection_pool, default_database_path, ConnectionPool, PooledConn};
pub use migrations::initialize_database;
