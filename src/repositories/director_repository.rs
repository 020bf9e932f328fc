// src/repositories/director_repository.rs

use std::sync::Arc;

use rusqlite::{params, Row};

use crate::db::ConnectionPool;
use crate::domain::Director;
use crate::error::{AppError, AppResult};

pub trait DirectorRepository: Send + Sync {
    fn find_all(&self) -> AppResult<Vec<Director>>;
    fn find_by_id(&self, id: i64) -> AppResult<Option<Director>>;
    fn create(&self, director: &Director) -> AppResult<Director>;
    fn update(&self, director: &Director) -> AppResult<Director>;
    fn delete(&self, id: i64) -> AppResult<()>;
}

const FIND_ALL_SQL: &str = "SELECT id, name FROM directors ORDER BY id";
const FIND_BY_ID_SQL: &str = "SELECT id, name FROM directors WHERE id = ?1";
const CREATE_SQL: &str = "INSERT INTO directors (name) VALUES (?1)";
const UPDATE_SQL: &str = "UPDATE directors SET name = ?1 WHERE id = ?2";
const DELETE_SQL: &str = "DELETE FROM directors WHERE id = ?1";

pub struct SqliteDirectorRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteDirectorRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    fn row_to_director(row: &Row) -> Result<Director, rusqlite::Error> {
        Ok(Director {
            id: row.get("id")?,
            name: row.get("name")?,
        })
    }
}

impl DirectorRepository for SqliteDirectorRepository {
    fn find_all(&self) -> AppResult<Vec<Director>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(FIND_ALL_SQL)?;
        let directors: Vec<Director> = stmt
            .query_map([], Self::row_to_director)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(directors)
    }

    fn find_by_id(&self, id: i64) -> AppResult<Option<Director>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(FIND_BY_ID_SQL)?;
        match stmt.query_row(params![id], Self::row_to_director) {
            Ok(director) => Ok(Some(director)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::Database(e)),
        }
    }

    fn create(&self, director: &Director) -> AppResult<Director> {
        let conn = self.pool.get()?;

        conn.execute(CREATE_SQL, params![director.name])?;

        let mut created = director.clone();
        created.id = conn.last_insert_rowid();
        Ok(created)
    }

    fn update(&self, director: &Director) -> AppResult<Director> {
        let conn = self.pool.get()?;

        let rows_affected = conn.execute(UPDATE_SQL, params![director.name, director.id])?;
        if rows_affected == 0 {
            return Err(AppError::not_found("Director", director.id));
        }

        Ok(director.clone())
    }

    fn delete(&self, id: i64) -> AppResult<()> {
        let conn = self.pool.get()?;

        // film_directors rows cascade
        let rows_affected = conn.execute(DELETE_SQL, params![id])?;
        if rows_affected == 0 {
            return Err(AppError::not_found("Director", id));
        }

        Ok(())
    }
}
