// src/repositories/memory/films.rs

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Mutex, MutexGuard};

use chrono::Datelike;

use crate::domain::Film;
use crate::error::{AppError, AppResult};
use crate::repositories::{FilmLikeRepository, FilmRepository};

#[derive(Default)]
struct FilmStore {
    films: BTreeMap<i64, Film>,
    next_id: i64,
}

/// Stores whole Film aggregates, likes included, so it also backs the like
/// repository trait over the same state.
#[derive(Default)]
pub struct MemoryFilmRepository {
    store: Mutex<FilmStore>,
}

impl MemoryFilmRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn store(&self) -> AppResult<MutexGuard<'_, FilmStore>> {
        self.store
            .lock()
            .map_err(|_| AppError::Other("film store lock poisoned".to_string()))
    }

    /// Same canonical shape the persistent backend produces on read:
    /// collections de-duplicated by id and sorted ascending.
    fn canonicalize(film: &mut Film) {
        let mut seen = BTreeSet::new();
        film.genres.retain(|g| seen.insert(g.id));
        film.genres.sort_by_key(|g| g.id);

        let mut seen = BTreeSet::new();
        film.directors.retain(|d| seen.insert(d.id));
        film.directors.sort_by_key(|d| d.id);
    }

    fn by_popularity(mut films: Vec<Film>) -> Vec<Film> {
        films.sort_by(|a, b| {
            b.like_count()
                .cmp(&a.like_count())
                .then_with(|| a.id.cmp(&b.id))
        });
        films
    }
}

impl FilmRepository for MemoryFilmRepository {
    fn find_all(&self) -> AppResult<Vec<Film>> {
        Ok(self.store()?.films.values().cloned().collect())
    }

    fn find_by_id(&self, id: i64) -> AppResult<Option<Film>> {
        Ok(self.store()?.films.get(&id).cloned())
    }

    fn create(&self, film: &Film) -> AppResult<Film> {
        let mut store = self.store()?;

        store.next_id += 1;
        let mut created = film.clone();
        created.id = store.next_id;
        created.likes = BTreeSet::new();
        Self::canonicalize(&mut created);

        store.films.insert(created.id, created.clone());
        Ok(created)
    }

    fn update(&self, film: &Film) -> AppResult<Film> {
        let mut store = self.store()?;

        let existing = store
            .films
            .get(&film.id)
            .ok_or_else(|| AppError::not_found("Film", film.id))?;

        let mut updated = film.clone();
        updated.likes = existing.likes.clone();
        Self::canonicalize(&mut updated);

        store.films.insert(updated.id, updated.clone());
        Ok(updated)
    }

    fn delete(&self, id: i64) -> AppResult<()> {
        let mut store = self.store()?;
        store
            .films
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| AppError::not_found("Film", id))
    }

    fn find_popular(
        &self,
        count: i64,
        genre_id: Option<i64>,
        year: Option<i32>,
    ) -> AppResult<Vec<Film>> {
        let films: Vec<Film> = self
            .store()?
            .films
            .values()
            .filter(|f| genre_id.is_none_or(|g| f.genres.iter().any(|fg| fg.id == g)))
            .filter(|f| year.is_none_or(|y| f.release_date.year() == y))
            .cloned()
            .collect();

        let mut films = Self::by_popularity(films);
        films.truncate(count.max(0) as usize);
        Ok(films)
    }

    fn find_by_director(&self, director_id: i64) -> AppResult<Vec<Film>> {
        Ok(self
            .store()?
            .films
            .values()
            .filter(|f| f.directors.iter().any(|d| d.id == director_id))
            .cloned()
            .collect())
    }

    fn find_common(&self, user_id: i64, friend_id: i64) -> AppResult<Vec<Film>> {
        let films: Vec<Film> = self
            .store()?
            .films
            .values()
            .filter(|f| f.likes.contains(&user_id) && f.likes.contains(&friend_id))
            .cloned()
            .collect();

        Ok(Self::by_popularity(films))
    }

    fn search(&self, query: &str, by_title: bool, by_director: bool) -> AppResult<Vec<Film>> {
        if !by_title && !by_director {
            return Ok(Vec::new());
        }

        let needle = query.to_lowercase();
        let films: Vec<Film> = self
            .store()?
            .films
            .values()
            .filter(|f| {
                let title_hit = by_title && f.name.to_lowercase().contains(&needle);
                let director_hit = by_director
                    && f.directors
                        .iter()
                        .any(|d| d.name.to_lowercase().contains(&needle));
                title_hit || director_hit
            })
            .cloned()
            .collect();

        Ok(Self::by_popularity(films))
    }
}

impl FilmLikeRepository for MemoryFilmRepository {
    fn add(&self, film_id: i64, user_id: i64) -> AppResult<()> {
        let mut store = self.store()?;

        let film = store
            .films
            .get_mut(&film_id)
            .ok_or_else(|| AppError::not_found("Film", film_id))?;

        // Set semantics make the duplicate insert a natural no-op
        film.likes.insert(user_id);
        Ok(())
    }

    fn remove(&self, film_id: i64, user_id: i64) -> AppResult<()> {
        let mut store = self.store()?;

        if let Some(film) = store.films.get_mut(&film_id) {
            film.likes.remove(&user_id);
        }
        Ok(())
    }

    fn likes_for_film(&self, film_id: i64) -> AppResult<BTreeSet<i64>> {
        Ok(self
            .store()?
            .films
            .get(&film_id)
            .map(|f| f.likes.clone())
            .unwrap_or_default())
    }

    fn all_likes(&self) -> AppResult<Vec<(i64, i64)>> {
        Ok(self
            .store()?
            .films
            .values()
            .flat_map(|f| f.likes.iter().map(|user_id| (*user_id, f.id)))
            .collect())
    }
}
