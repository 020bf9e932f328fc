// src/services/genre_service.rs

use std::sync::Arc;

use crate::domain::Genre;
use crate::error::{AppError, AppResult};
use crate::repositories::GenreRepository;

pub struct GenreService {
    genre_repo: Arc<dyn GenreRepository>,
}

impl GenreService {
    pub fn new(genre_repo: Arc<dyn GenreRepository>) -> Self {
        Self { genre_repo }
    }

    pub fn find_all(&self) -> AppResult<Vec<Genre>> {
        self.genre_repo.find_all()
    }

    pub fn find_by_id(&self, id: i64) -> AppResult<Genre> {
        self.genre_repo
            .find_by_id(id)?
            .ok_or_else(|| AppError::not_found("Genre", id))
    }
}
