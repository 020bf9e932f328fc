// src/repositories/review_repository.rs
//
// Reviews plus the review_likes vote table. The useful score is derived from
// vote transitions, so every vote write recomputes its delta from the
// previous vote state and applies both changes in one transaction.

use std::sync::Arc;

use rusqlite::{params, Row, Transaction};

use crate::db::ConnectionPool;
use crate::domain::Review;
use crate::error::{AppError, AppResult};

pub trait ReviewRepository: Send + Sync {
    /// Inserts the review and returns it with its assigned id.
    fn create(&self, review: &Review) -> AppResult<Review>;
    /// Updates content and polarity only; the useful score is never written
    /// by the update path.
    fn update(&self, review: &Review) -> AppResult<Review>;
    fn delete(&self, id: i64) -> AppResult<()>;
    fn find_by_id(&self, id: i64) -> AppResult<Option<Review>>;
    /// Top `count` reviews by useful score, scoped to a film when given.
    fn find_for_film(&self, film_id: Option<i64>, count: i64) -> AppResult<Vec<Review>>;
    /// Record a vote. Fresh vote: ±1. Same polarity again: no-op. Flipped
    /// polarity: ±2 (cancels the old vote and applies the new one).
    fn add_vote(&self, review_id: i64, user_id: i64, positive: bool) -> AppResult<()>;
    /// Remove a vote of the given polarity, adjusting the score by the
    /// inverse of its sign. Absent vote: no-op.
    fn remove_vote(&self, review_id: i64, user_id: i64, positive: bool) -> AppResult<()>;
}

const CREATE_SQL: &str =
    "INSERT INTO reviews (film_id, user_id, content, is_positive, useful) \
     VALUES (?1, ?2, ?3, ?4, ?5)";
const UPDATE_SQL: &str = "UPDATE reviews SET content = ?1, is_positive = ?2 WHERE id = ?3";
const DELETE_SQL: &str = "DELETE FROM reviews WHERE id = ?1";
const FIND_BY_ID_SQL: &str =
    "SELECT id, film_id, user_id, content, is_positive, useful FROM reviews WHERE id = ?1";
const FIND_BY_FILM_SQL: &str =
    "SELECT id, film_id, user_id, content, is_positive, useful FROM reviews \
     WHERE film_id = ?1 ORDER BY useful DESC, id ASC LIMIT ?2";
const FIND_ALL_SQL: &str =
    "SELECT id, film_id, user_id, content, is_positive, useful FROM reviews \
     ORDER BY useful DESC, id ASC LIMIT ?1";
const FIND_VOTE_SQL: &str =
    "SELECT is_positive FROM review_likes WHERE review_id = ?1 AND user_id = ?2";
const INSERT_VOTE_SQL: &str =
    "INSERT INTO review_likes (review_id, user_id, is_positive) VALUES (?1, ?2, ?3)";
const UPDATE_VOTE_SQL: &str =
    "UPDATE review_likes SET is_positive = ?1 WHERE review_id = ?2 AND user_id = ?3";
const DELETE_VOTE_SQL: &str =
    "DELETE FROM review_likes WHERE review_id = ?1 AND user_id = ?2 AND is_positive = ?3";
const UPDATE_USEFUL_SQL: &str = "UPDATE reviews SET useful = useful + ?1 WHERE id = ?2";

pub struct SqliteReviewRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteReviewRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    fn row_to_review(row: &Row) -> Result<Review, rusqlite::Error> {
        Ok(Review {
            review_id: row.get("id")?,
            film_id: row.get("film_id")?,
            user_id: row.get("user_id")?,
            content: row.get("content")?,
            is_positive: row.get("is_positive")?,
            useful: row.get("useful")?,
        })
    }

    /// Previous vote polarity of this user on this review, if any.
    fn find_vote(tx: &Transaction, review_id: i64, user_id: i64) -> AppResult<Option<bool>> {
        let mut stmt = tx.prepare(FIND_VOTE_SQL)?;
        match stmt.query_row(params![review_id, user_id], |row| row.get(0)) {
            Ok(positive) => Ok(Some(positive)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::Database(e)),
        }
    }
}

impl ReviewRepository for SqliteReviewRepository {
    fn create(&self, review: &Review) -> AppResult<Review> {
        let conn = self.pool.get()?;

        conn.execute(
            CREATE_SQL,
            params![
                review.film_id,
                review.user_id,
                review.content,
                review.is_positive,
                review.useful
            ],
        )?;

        let mut created = review.clone();
        created.review_id = conn.last_insert_rowid();
        Ok(created)
    }

    fn update(&self, review: &Review) -> AppResult<Review> {
        let conn = self.pool.get()?;

        let rows_affected = conn.execute(
            UPDATE_SQL,
            params![review.content, review.is_positive, review.review_id],
        )?;
        if rows_affected == 0 {
            return Err(AppError::not_found("Review", review.review_id));
        }
        drop(conn);

        self.find_by_id(review.review_id)?
            .ok_or_else(|| AppError::not_found("Review", review.review_id))
    }

    fn delete(&self, id: i64) -> AppResult<()> {
        let conn = self.pool.get()?;

        // Vote rows cascade
        let rows_affected = conn.execute(DELETE_SQL, params![id])?;
        if rows_affected == 0 {
            return Err(AppError::not_found("Review", id));
        }

        Ok(())
    }

    fn find_by_id(&self, id: i64) -> AppResult<Option<Review>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(FIND_BY_ID_SQL)?;
        match stmt.query_row(params![id], Self::row_to_review) {
            Ok(review) => Ok(Some(review)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::Database(e)),
        }
    }

    fn find_for_film(&self, film_id: Option<i64>, count: i64) -> AppResult<Vec<Review>> {
        let conn = self.pool.get()?;

        let reviews: Vec<Review> = match film_id {
            Some(film_id) => {
                let mut stmt = conn.prepare(FIND_BY_FILM_SQL)?;
                let rows = stmt
                    .query_map(params![film_id, count], Self::row_to_review)?
                    .collect::<Result<Vec<_>, _>>()?;
                rows
            }
            None => {
                let mut stmt = conn.prepare(FIND_ALL_SQL)?;
                let rows = stmt
                    .query_map(params![count], Self::row_to_review)?
                    .collect::<Result<Vec<_>, _>>()?;
                rows
            }
        };

        Ok(reviews)
    }

    fn add_vote(&self, review_id: i64, user_id: i64, positive: bool) -> AppResult<()> {
        let mut conn = self.pool.get()?;
        let tx = conn.transaction()?;

        let delta = match Self::find_vote(&tx, review_id, user_id)? {
            None => {
                tx.execute(INSERT_VOTE_SQL, params![review_id, user_id, positive])?;
                if positive {
                    1
                } else {
                    -1
                }
            }
            Some(previous) if previous == positive => {
                // Unchanged polarity: nothing to do
                return Ok(());
            }
            Some(_) => {
                tx.execute(UPDATE_VOTE_SQL, params![positive, review_id, user_id])?;
                if positive {
                    2
                } else {
                    -2
                }
            }
        };

        tx.execute(UPDATE_USEFUL_SQL, params![delta, review_id])?;
        tx.commit()?;

        Ok(())
    }

    fn remove_vote(&self, review_id: i64, user_id: i64, positive: bool) -> AppResult<()> {
        let mut conn = self.pool.get()?;
        let tx = conn.transaction()?;

        let rows_affected =
            tx.execute(DELETE_VOTE_SQL, params![review_id, user_id, positive])?;
        if rows_affected > 0 {
            let delta = if positive { -1 } else { 1 };
            tx.execute(UPDATE_USEFUL_SQL, params![delta, review_id])?;
        }

        tx.commit()?;
        Ok(())
    }
}
