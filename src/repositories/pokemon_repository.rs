// src/repositories/pokemon_repository.rs
//
// Pokemon persistence

use chrono::{DateTime, Utc};
use rusqlite::{params, OptionalExtension, Row};
use std::sync::Arc;
use uuid::Uuid;

use crate::db::ConnectionPool;
use crate::domain::{Enrichment, PokemonRecord};
use crate::error::{AppError, AppResult};

#[cfg_attr(test, mockall::automock)]
pub trait PokemonRepository: Send + Sync {
    /// Insert bare records, skipping any whose name already exists.
    /// Returns the number of rows actually inserted.
    fn insert_bare(&self, records: &[PokemonRecord]) -> AppResult<usize>;

    fn count(&self) -> AppResult<i64>;

    /// Read a slice in insertion order.
    fn list(&self, offset: u32, limit: u32) -> AppResult<Vec<PokemonRecord>>;

    /// Case-insensitive substring match on name only.
    fn search_by_name(&self, query: &str, limit: u32) -> AppResult<Vec<PokemonRecord>>;

    fn list_favorites(&self) -> AppResult<Vec<PokemonRecord>>;

    fn get_by_id(&self, id: Uuid) -> AppResult<Option<PokemonRecord>>;

    fn get_by_name(&self, name: &str) -> AppResult<Option<PokemonRecord>>;

    /// Single-field favorite update. NotFound when no record has `id`.
    fn set_favorite(&self, id: Uuid, value: bool) -> AppResult<()>;

    /// Persist the enrichment blob; optionally flip `is_viewed` forward.
    fn save_enrichment(
        &self,
        id: Uuid,
        enrichment: &Enrichment,
        mark_viewed: bool,
    ) -> AppResult<()>;

    /// Names of all favorited records, most recently updated first.
    fn favorite_names(&self) -> AppResult<Vec<String>>;
}

pub struct SqlitePokemonRepository {
    pool: Arc<ConnectionPool>,
}

const RECORD_COLUMNS: &str =
    "id, name, source_url, is_favorite, is_viewed, enrichment, created_at, updated_at";

impl SqlitePokemonRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    /// Map database row to PokemonRecord - returns rusqlite::Error for
    /// query_map compatibility
    fn row_to_record(row: &Row) -> Result<PokemonRecord, rusqlite::Error> {
        let id_str: String = row.get("id")?;
        let id = Uuid::parse_str(&id_str)
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

        let enrichment_json: Option<String> = row.get("enrichment")?;
        let enrichment: Option<Enrichment> = enrichment_json
            .map(|json| {
                serde_json::from_str(&json)
                    .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
            })
            .transpose()?;

        let created_at_str: String = row.get("created_at")?;
        let created_at = DateTime::parse_from_rfc3339(&created_at_str)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

        let updated_at_str: String = row.get("updated_at")?;
        let updated_at = DateTime::parse_from_rfc3339(&updated_at_str)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

        Ok(PokemonRecord {
            id,
            name: row.get("name")?,
            source_url: row.get("source_url")?,
            is_favorite: row.get("is_favorite")?,
            is_viewed: row.get("is_viewed")?,
            enrichment,
            created_at,
            updated_at,
        })
    }
}

impl PokemonRepository for SqlitePokemonRepository {
    fn insert_bare(&self, records: &[PokemonRecord]) -> AppResult<usize> {
        let mut conn = self.pool.get()?;
        let tx = conn.transaction()?;

        let mut inserted = 0;
        {
            // OR IGNORE: the unique name constraint makes seeding idempotent
            let mut stmt = tx.prepare(
                "INSERT OR IGNORE INTO pokemon
                    (id, name, source_url, is_favorite, is_viewed, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            )?;

            for record in records {
                inserted += stmt.execute(params![
                    record.id.to_string(),
                    record.name,
                    record.source_url,
                    record.is_favorite,
                    record.is_viewed,
                    record.created_at.to_rfc3339(),
                    record.updated_at.to_rfc3339(),
                ])?;
            }
        }
        tx.commit()?;

        Ok(inserted)
    }

    fn count(&self) -> AppResult<i64> {
        let conn = self.pool.get()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM pokemon", [], |row| row.get(0))?;
        Ok(count)
    }

    fn list(&self, offset: u32, limit: u32) -> AppResult<Vec<PokemonRecord>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {RECORD_COLUMNS} FROM pokemon ORDER BY seq LIMIT ?1 OFFSET ?2"
        ))?;

        let records: Vec<PokemonRecord> = stmt
            .query_map(params![limit, offset], Self::row_to_record)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(records)
    }

    fn search_by_name(&self, query: &str, limit: u32) -> AppResult<Vec<PokemonRecord>> {
        let conn = self.pool.get()?;

        // instr() instead of LIKE so %/_ in the query are matched literally
        let mut stmt = conn.prepare(&format!(
            "SELECT {RECORD_COLUMNS} FROM pokemon
             WHERE instr(name, ?1) > 0
             ORDER BY seq LIMIT ?2"
        ))?;

        let records: Vec<PokemonRecord> = stmt
            .query_map(params![query.to_lowercase(), limit], Self::row_to_record)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(records)
    }

    fn list_favorites(&self) -> AppResult<Vec<PokemonRecord>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {RECORD_COLUMNS} FROM pokemon WHERE is_favorite = 1 ORDER BY seq"
        ))?;

        let records: Vec<PokemonRecord> = stmt
            .query_map([], Self::row_to_record)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(records)
    }

    fn get_by_id(&self, id: Uuid) -> AppResult<Option<PokemonRecord>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {RECORD_COLUMNS} FROM pokemon WHERE id = ?1"
        ))?;

        stmt.query_row(params![id.to_string()], Self::row_to_record)
            .optional()
            .map_err(AppError::Database)
    }

    fn get_by_name(&self, name: &str) -> AppResult<Option<PokemonRecord>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {RECORD_COLUMNS} FROM pokemon WHERE name = ?1"
        ))?;

        stmt.query_row(params![name], Self::row_to_record)
            .optional()
            .map_err(AppError::Database)
    }

    fn set_favorite(&self, id: Uuid, value: bool) -> AppResult<()> {
        let conn = self.pool.get()?;

        let rows_affected = conn.execute(
            "UPDATE pokemon SET is_favorite = ?1, updated_at = ?2 WHERE id = ?3",
            params![value, Utc::now().to_rfc3339(), id.to_string()],
        )?;

        if rows_affected == 0 {
            return Err(AppError::NotFound(format!(
                "Pokemon with ID {} not found",
                id
            )));
        }

        Ok(())
    }

    fn save_enrichment(
        &self,
        id: Uuid,
        enrichment: &Enrichment,
        mark_viewed: bool,
    ) -> AppResult<()> {
        let conn = self.pool.get()?;
        let enrichment_json = serde_json::to_string(enrichment)?;

        let rows_affected = if mark_viewed {
            conn.execute(
                "UPDATE pokemon SET enrichment = ?1, is_viewed = 1, updated_at = ?2 WHERE id = ?3",
                params![enrichment_json, Utc::now().to_rfc3339(), id.to_string()],
            )?
        } else {
            conn.execute(
                "UPDATE pokemon SET enrichment = ?1, updated_at = ?2 WHERE id = ?3",
                params![enrichment_json, Utc::now().to_rfc3339(), id.to_string()],
            )?
        };

        if rows_affected == 0 {
            return Err(AppError::NotFound(format!(
                "Pokemon with ID {} not found",
                id
            )));
        }

        Ok(())
    }

    fn favorite_names(&self) -> AppResult<Vec<String>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT name FROM pokemon WHERE is_favorite = 1 ORDER BY updated_at DESC",
        )?;

        let names: Vec<String> = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(names)
    }
}
