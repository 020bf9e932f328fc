// src/services/test_fixtures.rs
//
// Shared setup for service tests: the full service graph wired over a
// tempfile-backed SQLite pool, or over the in-memory backend.

use std::sync::Arc;

use chrono::NaiveDate;
use tempfile::TempDir;

use crate::application::AppState;
use crate::db::{create_connection_pool, get_connection, initialize_database, ConnectionPool};
use crate::services::{CreateFilmRequest, CreateUserRequest, EntityRef};

pub struct Fixture {
    pub state: AppState,
    _dir: Option<TempDir>,
}

pub fn test_pool() -> (Arc<ConnectionPool>, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let pool = Arc::new(create_connection_pool(&dir.path().join("test.db"), 4).unwrap());
    let conn = get_connection(&pool).unwrap();
    initialize_database(&conn).unwrap();
    (pool, dir)
}

pub fn sqlite_fixture() -> Fixture {
    let (pool, dir) = test_pool();
    Fixture {
        state: AppState::with_sqlite(pool),
        _dir: Some(dir),
    }
}

pub fn memory_fixture() -> Fixture {
    Fixture {
        state: AppState::with_memory(),
        _dir: None,
    }
}

/// Both backends, for behavior-parity tests.
pub fn all_fixtures() -> Vec<Fixture> {
    vec![sqlite_fixture(), memory_fixture()]
}

pub fn film_request(name: &str, year: i32) -> CreateFilmRequest {
    CreateFilmRequest {
        name: name.to_string(),
        description: format!("{} (test)", name),
        release_date: NaiveDate::from_ymd_opt(year, 6, 1).unwrap(),
        duration: 120,
        mpa: Some(EntityRef { id: 1 }),
        genres: None,
        directors: None,
    }
}

pub fn user_request(login: &str) -> CreateUserRequest {
    CreateUserRequest {
        email: format!("{}@example.com", login),
        login: login.to_string(),
        name: String::new(),
        birthday: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
    }
}
