// src/repositories/friendship_repository.rs
//
// Directional friendship rows: user_id added friend_id.

use std::sync::Arc;

use rusqlite::{params, Row};

use crate::db::ConnectionPool;
use crate::domain::Friendship;
use crate::error::AppResult;

pub trait FriendshipRepository: Send + Sync {
    /// Idempotent: re-adding an existing (user, friend) pair is a no-op.
    fn add(&self, friendship: &Friendship) -> AppResult<()>;
    /// Idempotent: deleting an absent pair is a no-op.
    fn delete(&self, user_id: i64, friend_id: i64) -> AppResult<()>;
    fn find_by_user(&self, user_id: i64) -> AppResult<Vec<Friendship>>;
    /// Ids befriended by both users.
    fn common_friend_ids(&self, user_id: i64, other_id: i64) -> AppResult<Vec<i64>>;
}

const ADD_SQL: &str =
    "INSERT OR IGNORE INTO friendships (user_id, friend_id, confirmed) VALUES (?1, ?2, ?3)";
const DELETE_SQL: &str = "DELETE FROM friendships WHERE user_id = ?1 AND friend_id = ?2";
const FIND_BY_USER_SQL: &str =
    "SELECT user_id, friend_id, confirmed FROM friendships WHERE user_id = ?1 ORDER BY friend_id";
const COMMON_FRIENDS_SQL: &str = "SELECT f1.friend_id \
     FROM friendships f1 \
     JOIN friendships f2 ON f1.friend_id = f2.friend_id \
     WHERE f1.user_id = ?1 AND f2.user_id = ?2 \
     ORDER BY f1.friend_id";

pub struct SqliteFriendshipRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteFriendshipRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    fn row_to_friendship(row: &Row) -> Result<Friendship, rusqlite::Error> {
        Ok(Friendship {
            user_id: row.get("user_id")?,
            friend_id: row.get("friend_id")?,
            confirmed: row.get("confirmed")?,
        })
    }
}

impl FriendshipRepository for SqliteFriendshipRepository {
    fn add(&self, friendship: &Friendship) -> AppResult<()> {
        let conn = self.pool.get()?;

        conn.execute(
            ADD_SQL,
            params![
                friendship.user_id,
                friendship.friend_id,
                friendship.confirmed
            ],
        )?;

        Ok(())
    }

    fn delete(&self, user_id: i64, friend_id: i64) -> AppResult<()> {
        let conn = self.pool.get()?;
        conn.execute(DELETE_SQL, params![user_id, friend_id])?;
        Ok(())
    }

    fn find_by_user(&self, user_id: i64) -> AppResult<Vec<Friendship>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(FIND_BY_USER_SQL)?;
        let friendships: Vec<Friendship> = stmt
            .query_map(params![user_id], Self::row_to_friendship)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(friendships)
    }

    fn common_friend_ids(&self, user_id: i64, other_id: i64) -> AppResult<Vec<i64>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(COMMON_FRIENDS_SQL)?;
        let ids: Vec<i64> = stmt
            .query_map(params![user_id, other_id], |row| row.get(0))?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ids)
    }
}
