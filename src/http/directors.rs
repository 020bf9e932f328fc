// src/http/directors.rs

use axum::extract::{Path, State};
use axum::Json;

use super::{blocking, ApiError, SharedState};
use crate::domain::Director;
use crate::services::DirectorRequest;

pub async fn find_all(State(state): State<SharedState>) -> Result<Json<Vec<Director>>, ApiError> {
    let directors = blocking(move || state.director_service.find_all()).await?;
    Ok(Json(directors))
}

pub async fn find_by_id(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<Json<Director>, ApiError> {
    let director = blocking(move || state.director_service.find_by_id(id)).await?;
    Ok(Json(director))
}

pub async fn create(
    State(state): State<SharedState>,
    Json(request): Json<DirectorRequest>,
) -> Result<Json<Director>, ApiError> {
    let director = blocking(move || state.director_service.create(request)).await?;
    Ok(Json(director))
}

pub async fn update(
    State(state): State<SharedState>,
    Json(request): Json<DirectorRequest>,
) -> Result<Json<Director>, ApiError> {
    let director = blocking(move || state.director_service.update(request)).await?;
    Ok(Json(director))
}

pub async fn delete(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<(), ApiError> {
    blocking(move || state.director_service.delete(id)).await
}
