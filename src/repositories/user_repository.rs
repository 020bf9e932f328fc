// src/repositories/user_repository.rs

use std::sync::Arc;

use chrono::NaiveDate;
use rusqlite::{params, Row};

use crate::db::ConnectionPool;
use crate::domain::User;
use crate::error::{AppError, AppResult};

pub trait UserRepository: Send + Sync {
    fn find_all(&self) -> AppResult<Vec<User>>;
    fn find_by_id(&self, id: i64) -> AppResult<Option<User>>;
    /// Inserts the row and returns the user with its assigned id.
    fn create(&self, user: &User) -> AppResult<User>;
    fn update(&self, user: &User) -> AppResult<User>;
    fn delete(&self, id: i64) -> AppResult<()>;
}

const FIND_ALL_SQL: &str = "SELECT id, email, login, name, birthday FROM users ORDER BY id";
const FIND_BY_ID_SQL: &str = "SELECT id, email, login, name, birthday FROM users WHERE id = ?1";
const CREATE_SQL: &str = "INSERT INTO users (email, login, name, birthday) VALUES (?1, ?2, ?3, ?4)";
const UPDATE_SQL: &str =
    "UPDATE users SET email = ?1, login = ?2, name = ?3, birthday = ?4 WHERE id = ?5";
const DELETE_SQL: &str = "DELETE FROM users WHERE id = ?1";

pub struct SqliteUserRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteUserRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    fn row_to_user(row: &Row) -> Result<User, rusqlite::Error> {
        let birthday_str: String = row.get("birthday")?;
        let birthday = NaiveDate::parse_from_str(&birthday_str, "%Y-%m-%d")
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

        Ok(User {
            id: row.get("id")?,
            email: row.get("email")?,
            login: row.get("login")?,
            name: row.get("name")?,
            birthday,
        })
    }
}

impl UserRepository for SqliteUserRepository {
    fn find_all(&self) -> AppResult<Vec<User>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(FIND_ALL_SQL)?;
        let users: Vec<User> = stmt
            .query_map([], Self::row_to_user)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(users)
    }

    fn find_by_id(&self, id: i64) -> AppResult<Option<User>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(FIND_BY_ID_SQL)?;
        match stmt.query_row(params![id], Self::row_to_user) {
            Ok(user) => Ok(Some(user)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::Database(e)),
        }
    }

    fn create(&self, user: &User) -> AppResult<User> {
        let conn = self.pool.get()?;

        conn.execute(
            CREATE_SQL,
            params![
                user.email,
                user.login,
                user.name,
                user.birthday.to_string()
            ],
        )?;

        let mut created = user.clone();
        created.id = conn.last_insert_rowid();
        Ok(created)
    }

    fn update(&self, user: &User) -> AppResult<User> {
        let conn = self.pool.get()?;

        let rows_affected = conn.execute(
            UPDATE_SQL,
            params![
                user.email,
                user.login,
                user.name,
                user.birthday.to_string(),
                user.id
            ],
        )?;
        if rows_affected == 0 {
            return Err(AppError::not_found("User", user.id));
        }

        Ok(user.clone())
    }

    fn delete(&self, id: i64) -> AppResult<()> {
        let conn = self.pool.get()?;

        // Friendships, likes, reviews and feed entries cascade
        let rows_affected = conn.execute(DELETE_SQL, params![id])?;
        if rows_affected == 0 {
            return Err(AppError::not_found("User", id));
        }

        Ok(())
    }
}
