// src/repositories/mpa_repository.rs

use std::sync::Arc;

use rusqlite::{params, Row};

use crate::db::ConnectionPool;
use crate::domain::MpaRating;
use crate::error::{AppError, AppResult};

pub trait MpaRepository: Send + Sync {
    fn find_all(&self) -> AppResult<Vec<MpaRating>>;
    fn find_by_id(&self, id: i64) -> AppResult<Option<MpaRating>>;
}

const FIND_ALL_SQL: &str = "SELECT id, name FROM mpa_ratings ORDER BY id";
const FIND_BY_ID_SQL: &str = "SELECT id, name FROM mpa_ratings WHERE id = ?1";

pub struct SqliteMpaRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteMpaRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    fn row_to_mpa(row: &Row) -> Result<MpaRating, rusqlite::Error> {
        Ok(MpaRating {
            id: row.get("id")?,
            name: row.get("name")?,
        })
    }
}

impl MpaRepository for SqliteMpaRepository {
    fn find_all(&self) -> AppResult<Vec<MpaRating>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(FIND_ALL_SQL)?;
        let ratings: Vec<MpaRating> = stmt
            .query_map([], Self::row_to_mpa)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ratings)
    }

    fn find_by_id(&self, id: i64) -> AppResult<Option<MpaRating>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(FIND_BY_ID_SQL)?;
        match stmt.query_row(params![id], Self::row_to_mpa) {
            Ok(mpa) => Ok(Some(mpa)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::Database(e)),
        }
    }
}
