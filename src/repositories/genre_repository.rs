// src/repositories/genre_repository.rs

use std::sync::Arc;

use rusqlite::{params, Row};

use crate::db::ConnectionPool;
use crate::domain::Genre;
use crate::error::{AppError, AppResult};

pub trait GenreRepository: Send + Sync {
    fn find_all(&self) -> AppResult<Vec<Genre>>;
    fn find_by_id(&self, id: i64) -> AppResult<Option<Genre>>;
}

const FIND_ALL_SQL: &str = "SELECT id, name FROM genres ORDER BY id";
const FIND_BY_ID_SQL: &str = "SELECT id, name FROM genres WHERE id = ?1";

pub struct SqliteGenreRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteGenreRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    fn row_to_genre(row: &Row) -> Result<Genre, rusqlite::Error> {
        Ok(Genre {
            id: row.get("id")?,
            name: row.get("name")?,
        })
    }
}

impl GenreRepository for SqliteGenreRepository {
    fn find_all(&self) -> AppResult<Vec<Genre>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(FIND_ALL_SQL)?;
        let genres: Vec<Genre> = stmt
            .query_map([], Self::row_to_genre)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(genres)
    }

    fn find_by_id(&self, id: i64) -> AppResult<Option<Genre>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(FIND_BY_ID_SQL)?;
        match stmt.query_row(params![id], Self::row_to_genre) {
            Ok(genre) => Ok(Some(genre)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::Database(e)),
        }
    }
}
