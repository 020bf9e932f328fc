// src/services/film_service.rs

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::{Datelike, NaiveDate, Utc};
use serde::Deserialize;

use crate::domain::{
    validate_film, Director, EventType, FeedEvent, Film, Genre, Operation,
};
use crate::error::{AppError, AppResult};
use crate::repositories::{FeedEventRepository, FilmLikeRepository, FilmRepository};
use crate::services::{DirectorService, GenreService, MpaService, UserService};

const SORT_BY_YEAR: &str = "year";
const SORT_BY_LIKES: &str = "likes";

/// A `{"id": N}` reference to another entity inside a film payload.
/// Extra fields (e.g. a redundant name) are accepted and ignored.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct EntityRef {
    pub id: i64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFilmRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub release_date: NaiveDate,
    pub duration: i32,
    /// Required; its absence is a validation error, not a parse error
    pub mpa: Option<EntityRef>,
    pub genres: Option<Vec<EntityRef>>,
    pub directors: Option<Vec<EntityRef>>,
}

/// Update payload. Omitted genre/director sets keep the stored value;
/// explicit empty sets clear it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFilmRequest {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub release_date: NaiveDate,
    pub duration: i32,
    pub mpa: Option<EntityRef>,
    pub genres: Option<Vec<EntityRef>>,
    pub directors: Option<Vec<EntityRef>>,
}

pub struct FilmService {
    film_repo: Arc<dyn FilmRepository>,
    like_repo: Arc<dyn FilmLikeRepository>,
    feed_repo: Arc<dyn FeedEventRepository>,
    user_service: Arc<UserService>,
    mpa_service: Arc<MpaService>,
    genre_service: Arc<GenreService>,
    director_service: Arc<DirectorService>,
}

impl FilmService {
    pub fn new(
        film_repo: Arc<dyn FilmRepository>,
        like_repo: Arc<dyn FilmLikeRepository>,
        feed_repo: Arc<dyn FeedEventRepository>,
        user_service: Arc<UserService>,
        mpa_service: Arc<MpaService>,
        genre_service: Arc<GenreService>,
        director_service: Arc<DirectorService>,
    ) -> Self {
        Self {
            film_repo,
            like_repo,
            feed_repo,
            user_service,
            mpa_service,
            genre_service,
            director_service,
        }
    }

    pub fn find_all(&self) -> AppResult<Vec<Film>> {
        self.film_repo.find_all()
    }

    pub fn find_by_id(&self, id: i64) -> AppResult<Film> {
        self.film_repo.find_by_id(id)?.ok_or_else(|| {
            log::warn!("Film with id={} not found", id);
            AppError::not_found("Film", id)
        })
    }

    pub fn create(&self, request: CreateFilmRequest) -> AppResult<Film> {
        let mpa_ref = request
            .mpa
            .ok_or_else(|| AppError::Validation("MPA rating is required".to_string()))?;
        let mpa = self.mpa_service.find_by_id(mpa_ref.id)?;

        let genres = self.resolve_genres(request.genres.unwrap_or_default())?;
        let directors = self.resolve_directors(request.directors.unwrap_or_default())?;

        let film = Film {
            id: 0,
            name: request.name,
            description: request.description,
            release_date: request.release_date,
            duration: request.duration,
            mpa,
            genres,
            directors,
            likes: BTreeSet::new(),
        };
        validate_film(&film)?;

        let created = self.film_repo.create(&film)?;
        log::info!("Film created: id={}, name={}", created.id, created.name);
        Ok(created)
    }

    pub fn update(&self, request: UpdateFilmRequest) -> AppResult<Film> {
        let existing = self.find_by_id(request.id)?;

        let mpa = match request.mpa {
            Some(mpa_ref) => self.mpa_service.find_by_id(mpa_ref.id)?,
            None => existing.mpa.clone(),
        };
        let genres = match request.genres {
            Some(refs) => self.resolve_genres(refs)?,
            None => existing.genres.clone(),
        };
        let directors = match request.directors {
            Some(refs) => self.resolve_directors(refs)?,
            None => existing.directors.clone(),
        };

        let film = Film {
            id: request.id,
            name: request.name,
            description: request.description,
            release_date: request.release_date,
            duration: request.duration,
            mpa,
            genres,
            directors,
            likes: existing.likes,
        };
        validate_film(&film)?;

        self.film_repo.update(&film)
    }

    pub fn add_like(&self, film_id: i64, user_id: i64) -> AppResult<()> {
        self.find_by_id(film_id)?;
        self.user_service.find_by_id(user_id)?;

        self.feed_repo.save(&FeedEvent::now(
            user_id,
            EventType::Like,
            Operation::Add,
            film_id,
        ))?;

        match self.like_repo.add(film_id, user_id) {
            Ok(()) => {
                log::info!("Like added: film={}, user={}", film_id, user_id);
                Ok(())
            }
            // At most one like per (film, user) is enforced by storage;
            // re-adding is non-fatal
            Err(e) if e.is_unique_violation() => {
                log::warn!("Duplicate like attempt: film={}, user={}", film_id, user_id);
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    pub fn remove_like(&self, film_id: i64, user_id: i64) -> AppResult<()> {
        self.find_by_id(film_id)?;
        self.user_service.find_by_id(user_id)?;

        self.feed_repo.save(&FeedEvent::now(
            user_id,
            EventType::Like,
            Operation::Remove,
            film_id,
        ))?;

        // Removing an absent like is a silent no-op
        self.like_repo.remove(film_id, user_id)?;
        log::info!("Like removed: film={}, user={}", film_id, user_id);
        Ok(())
    }

    pub fn get_popular_films(
        &self,
        count: i64,
        genre_id: Option<i64>,
        year: Option<i32>,
    ) -> AppResult<Vec<Film>> {
        if let Some(genre_id) = genre_id {
            self.genre_service.find_by_id(genre_id)?;
        }
        if let Some(year) = year {
            let current_year = Utc::now().year();
            if year < 1895 || year > current_year {
                return Err(AppError::Validation(format!("Invalid year: {}", year)));
            }
        }

        self.film_repo.find_popular(count, genre_id, year)
    }

    pub fn get_films_by_director(&self, director_id: i64, sort_by: &str) -> AppResult<Vec<Film>> {
        self.director_service.find_by_id(director_id)?;
        let mut films = self.film_repo.find_by_director(director_id)?;

        match sort_by {
            SORT_BY_YEAR => films.sort_by_key(|f| f.release_date),
            SORT_BY_LIKES => films.sort_by(|a, b| {
                b.like_count()
                    .cmp(&a.like_count())
                    .then_with(|| a.id.cmp(&b.id))
            }),
            other => {
                return Err(AppError::InvalidArgument(format!(
                    "Unsupported sortBy value: {}",
                    other
                )))
            }
        }

        Ok(films)
    }

    pub fn delete(&self, id: i64) -> AppResult<()> {
        self.find_by_id(id)?;
        self.film_repo.delete(id)?;
        log::info!("Film deleted: id={}", id);
        Ok(())
    }

    pub fn get_all_films_common(&self, user_id: i64, friend_id: i64) -> AppResult<Vec<Film>> {
        self.film_repo.find_common(user_id, friend_id)
    }

    pub fn search_films(&self, query: &str, by: &str) -> AppResult<Vec<Film>> {
        let mut by_title = false;
        let mut by_director = false;

        for token in by.split(',') {
            match token.trim() {
                "title" => by_title = true,
                "director" => by_director = true,
                _ => {}
            }
        }

        if !by_title && !by_director {
            return Err(AppError::Validation(
                "Parameter 'by' must contain 'title' and/or 'director'".to_string(),
            ));
        }

        self.film_repo.search(query, by_title, by_director)
    }

    /// Resolve genre references through the genre service, de-duplicated in
    /// the caller's order. NotFound on the first unknown id.
    fn resolve_genres(&self, refs: Vec<EntityRef>) -> AppResult<Vec<Genre>> {
        let mut seen = BTreeSet::new();
        let mut genres = Vec::new();
        for genre_ref in refs {
            if seen.insert(genre_ref.id) {
                genres.push(self.genre_service.find_by_id(genre_ref.id)?);
            }
        }
        Ok(genres)
    }

    fn resolve_directors(&self, refs: Vec<EntityRef>) -> AppResult<Vec<Director>> {
        let mut seen = BTreeSet::new();
        let mut directors = Vec::new();
        for director_ref in refs {
            if seen.insert(director_ref.id) {
                directors.push(self.director_service.find_by_id(director_ref.id)?);
            }
        }
        Ok(directors)
    }
}
