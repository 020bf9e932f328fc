// src/http/genres.rs

use axum::extract::{Path, State};
use axum::Json;

use super::{blocking, ApiError, SharedState};
use crate::domain::Genre;

pub async fn find_all(State(state): State<SharedState>) -> Result<Json<Vec<Genre>>, ApiError> {
    let genres = blocking(move || state.genre_service.find_all()).await?;
    Ok(Json(genres))
}

pub async fn find_by_id(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<Json<Genre>, ApiError> {
    let genre = blocking(move || state.genre_service.find_by_id(id)).await?;
    Ok(Json(genre))
}
