// src/repositories/film_like_repository.rs
//
// film_likes join table. Uniqueness of (film_id, user_id) is the table's
// primary key; a duplicate insert surfaces as a constraint violation that the
// service layer decides how to treat.

use std::collections::BTreeSet;
use std::sync::Arc;

use rusqlite::params;

use crate::db::ConnectionPool;
use crate::error::AppResult;

pub trait FilmLikeRepository: Send + Sync {
    /// Plain insert; a duplicate pair propagates the constraint violation.
    fn add(&self, film_id: i64, user_id: i64) -> AppResult<()>;
    /// Idempotent: removing an absent like is a no-op.
    fn remove(&self, film_id: i64, user_id: i64) -> AppResult<()>;
    fn likes_for_film(&self, film_id: i64) -> AppResult<BTreeSet<i64>>;
    /// Every (user_id, film_id) like pair in the store.
    fn all_likes(&self) -> AppResult<Vec<(i64, i64)>>;
}

const ADD_SQL: &str = "INSERT INTO film_likes (film_id, user_id) VALUES (?1, ?2)";
const REMOVE_SQL: &str = "DELETE FROM film_likes WHERE film_id = ?1 AND user_id = ?2";
const LIKES_FOR_FILM_SQL: &str = "SELECT user_id FROM film_likes WHERE film_id = ?1";
const ALL_LIKES_SQL: &str = "SELECT user_id, film_id FROM film_likes";

pub struct SqliteFilmLikeRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteFilmLikeRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }
}

impl FilmLikeRepository for SqliteFilmLikeRepository {
    fn add(&self, film_id: i64, user_id: i64) -> AppResult<()> {
        let conn = self.pool.get()?;
        conn.execute(ADD_SQL, params![film_id, user_id])?;
        Ok(())
    }

    fn remove(&self, film_id: i64, user_id: i64) -> AppResult<()> {
        let conn = self.pool.get()?;
        conn.execute(REMOVE_SQL, params![film_id, user_id])?;
        Ok(())
    }

    fn likes_for_film(&self, film_id: i64) -> AppResult<BTreeSet<i64>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(LIKES_FOR_FILM_SQL)?;
        let likes: BTreeSet<i64> = stmt
            .query_map(params![film_id], |row| row.get(0))?
            .collect::<Result<BTreeSet<_>, _>>()?;

        Ok(likes)
    }

    fn all_likes(&self) -> AppResult<Vec<(i64, i64)>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(ALL_LIKES_SQL)?;
        let likes: Vec<(i64, i64)> = stmt
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(likes)
    }
}
