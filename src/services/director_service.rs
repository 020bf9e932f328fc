// src/services/director_service.rs

use std::sync::Arc;

use serde::Deserialize;

use crate::domain::{validate_director, Director};
use crate::error::{AppError, AppResult};
use crate::repositories::DirectorRepository;

/// Create/update payload. `id` is ignored on create.
#[derive(Debug, Clone, Deserialize)]
pub struct DirectorRequest {
    #[serde(default)]
    pub id: i64,
    pub name: String,
}

pub struct DirectorService {
    director_repo: Arc<dyn DirectorRepository>,
}

impl DirectorService {
    pub fn new(director_repo: Arc<dyn DirectorRepository>) -> Self {
        Self { director_repo }
    }

    pub fn find_all(&self) -> AppResult<Vec<Director>> {
        self.director_repo.find_all()
    }

    pub fn find_by_id(&self, id: i64) -> AppResult<Director> {
        self.director_repo
            .find_by_id(id)?
            .ok_or_else(|| AppError::not_found("Director", id))
    }

    pub fn create(&self, request: DirectorRequest) -> AppResult<Director> {
        let director = Director {
            id: 0,
            name: request.name,
        };
        validate_director(&director)?;

        let created = self.director_repo.create(&director)?;
        log::info!("Director created: id={}, name={}", created.id, created.name);
        Ok(created)
    }

    pub fn update(&self, request: DirectorRequest) -> AppResult<Director> {
        self.find_by_id(request.id)?;

        let director = Director {
            id: request.id,
            name: request.name,
        };
        validate_director(&director)?;

        self.director_repo.update(&director)
    }

    pub fn delete(&self, id: i64) -> AppResult<()> {
        self.director_repo.delete(id)?;
        log::info!("Director deleted: id={}", id);
        Ok(())
    }
}
