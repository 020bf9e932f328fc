// src/http/mpa.rs

use axum::extract::{Path, State};
use axum::Json;

use super::{blocking, ApiError, SharedState};
use crate::domain::MpaRating;

pub async fn find_all(State(state): State<SharedState>) -> Result<Json<Vec<MpaRating>>, ApiError> {
    let ratings = blocking(move || state.mpa_service.find_all()).await?;
    Ok(Json(ratings))
}

pub async fn find_by_id(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<Json<MpaRating>, ApiError> {
    let rating = blocking(move || state.mpa_service.find_by_id(id)).await?;
    Ok(Json(rating))
}
