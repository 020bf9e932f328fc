// src/http/reviews.rs

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use super::{blocking, ApiError, SharedState};
use crate::domain::Review;
use crate::services::{CreateReviewRequest, UpdateReviewRequest};

fn default_count() -> i64 {
    10
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewQuery {
    pub film_id: Option<i64>,
    #[serde(default = "default_count")]
    pub count: i64,
}

pub async fn create(
    State(state): State<SharedState>,
    Json(request): Json<CreateReviewRequest>,
) -> Result<Json<Review>, ApiError> {
    let review = blocking(move || state.review_service.create_review(request)).await?;
    Ok(Json(review))
}

pub async fn update(
    State(state): State<SharedState>,
    Json(request): Json<UpdateReviewRequest>,
) -> Result<Json<Review>, ApiError> {
    let review = blocking(move || state.review_service.update_review(request)).await?;
    Ok(Json(review))
}

pub async fn find_by_id(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<Json<Review>, ApiError> {
    let review = blocking(move || state.review_service.get_review_by_id(id)).await?;
    Ok(Json(review))
}

pub async fn find_for_film(
    State(state): State<SharedState>,
    Query(params): Query<ReviewQuery>,
) -> Result<Json<Vec<Review>>, ApiError> {
    let reviews =
        blocking(move || state.review_service.get_reviews(params.film_id, params.count)).await?;
    Ok(Json(reviews))
}

pub async fn delete(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<(), ApiError> {
    blocking(move || state.review_service.delete_review(id)).await
}

pub async fn add_like(
    State(state): State<SharedState>,
    Path((id, user_id)): Path<(i64, i64)>,
) -> Result<(), ApiError> {
    blocking(move || state.review_service.like_review(id, user_id, true)).await
}

pub async fn add_dislike(
    State(state): State<SharedState>,
    Path((id, user_id)): Path<(i64, i64)>,
) -> Result<(), ApiError> {
    blocking(move || state.review_service.like_review(id, user_id, false)).await
}

pub async fn remove_like(
    State(state): State<SharedState>,
    Path((id, user_id)): Path<(i64, i64)>,
) -> Result<(), ApiError> {
    blocking(move || state.review_service.remove_like(id, user_id, true)).await
}

pub async fn remove_dislike(
    State(state): State<SharedState>,
    Path((id, user_id)): Path<(i64, i64)>,
) -> Result<(), ApiError> {
    blocking(move || state.review_service.remove_like(id, user_id, false)).await
}
