// src/services/mpa_service.rs

use std::sync::Arc;

use crate::domain::MpaRating;
use crate::error::{AppError, AppResult};
use crate::repositories::MpaRepository;

pub struct MpaService {
    mpa_repo: Arc<dyn MpaRepository>,
}

impl MpaService {
    pub fn new(mpa_repo: Arc<dyn MpaRepository>) -> Self {
        Self { mpa_repo }
    }

    pub fn find_all(&self) -> AppResult<Vec<MpaRating>> {
        self.mpa_repo.find_all()
    }

    pub fn find_by_id(&self, id: i64) -> AppResult<MpaRating> {
        self.mpa_repo
            .find_by_id(id)?
            .ok_or_else(|| AppError::not_found("MPA rating", id))
    }
}
