// src/repositories/memory/reference.rs
//
// Reference data and directors for the in-memory backend. Genre and MPA rows
// mirror the seed data in schema.sql.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use crate::domain::{Director, Genre, MpaRating};
use crate::error::{AppError, AppResult};
use crate::repositories::{DirectorRepository, GenreRepository, MpaRepository};

const GENRES: [(i64, &str); 6] = [
    (1, "Comedy"),
    (2, "Drama"),
    (3, "Cartoon"),
    (4, "Thriller"),
    (5, "Documentary"),
    (6, "Action"),
];

const MPA_RATINGS: [(i64, &str); 5] =
    [(1, "G"), (2, "PG"), (3, "PG-13"), (4, "R"), (5, "NC-17")];

#[derive(Default)]
pub struct MemoryGenreRepository;

impl MemoryGenreRepository {
    pub fn new() -> Self {
        Self
    }
}

impl GenreRepository for MemoryGenreRepository {
    fn find_all(&self) -> AppResult<Vec<Genre>> {
        Ok(GENRES
            .iter()
            .map(|(id, name)| Genre {
                id: *id,
                name: (*name).to_string(),
            })
            .collect())
    }

    fn find_by_id(&self, id: i64) -> AppResult<Option<Genre>> {
        Ok(GENRES
            .iter()
            .find(|(genre_id, _)| *genre_id == id)
            .map(|(id, name)| Genre {
                id: *id,
                name: (*name).to_string(),
            }))
    }
}

#[derive(Default)]
pub struct MemoryMpaRepository;

impl MemoryMpaRepository {
    pub fn new() -> Self {
        Self
    }
}

impl MpaRepository for MemoryMpaRepository {
    fn find_all(&self) -> AppResult<Vec<MpaRating>> {
        Ok(MPA_RATINGS
            .iter()
            .map(|(id, name)| MpaRating {
                id: *id,
                name: (*name).to_string(),
            })
            .collect())
    }

    fn find_by_id(&self, id: i64) -> AppResult<Option<MpaRating>> {
        Ok(MPA_RATINGS
            .iter()
            .find(|(mpa_id, _)| *mpa_id == id)
            .map(|(id, name)| MpaRating {
                id: *id,
                name: (*name).to_string(),
            }))
    }
}

#[derive(Default)]
struct DirectorStore {
    directors: BTreeMap<i64, Director>,
    next_id: i64,
}

#[derive(Default)]
pub struct MemoryDirectorRepository {
    store: Mutex<DirectorStore>,
}

impl MemoryDirectorRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn store(&self) -> AppResult<MutexGuard<'_, DirectorStore>> {
        self.store
            .lock()
            .map_err(|_| AppError::Other("director store lock poisoned".to_string()))
    }
}

impl DirectorRepository for MemoryDirectorRepository {
    fn find_all(&self) -> AppResult<Vec<Director>> {
        Ok(self.store()?.directors.values().cloned().collect())
    }

    fn find_by_id(&self, id: i64) -> AppResult<Option<Director>> {
        Ok(self.store()?.directors.get(&id).cloned())
    }

    fn create(&self, director: &Director) -> AppResult<Director> {
        let mut store = self.store()?;

        store.next_id += 1;
        let mut created = director.clone();
        created.id = store.next_id;

        store.directors.insert(created.id, created.clone());
        Ok(created)
    }

    fn update(&self, director: &Director) -> AppResult<Director> {
        let mut store = self.store()?;

        if !store.directors.contains_key(&director.id) {
            return Err(AppError::not_found("Director", director.id));
        }

        store.directors.insert(director.id, director.clone());
        Ok(director.clone())
    }

    fn delete(&self, id: i64) -> AppResult<()> {
        let mut store = self.store()?;
        store
            .directors
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| AppError::not_found("Director", id))
    }
}
