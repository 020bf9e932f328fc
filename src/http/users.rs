// src/http/users.rs

use axum::extract::{Path, State};
use axum::Json;

use super::{blocking, ApiError, SharedState};
use crate::domain::{FeedEvent, Film, User};
use crate::services::{CreateUserRequest, UpdateUserRequest};

pub async fn find_all(State(state): State<SharedState>) -> Result<Json<Vec<User>>, ApiError> {
    let users = blocking(move || state.user_service.find_all()).await?;
    Ok(Json(users))
}

pub async fn find_by_id(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<Json<User>, ApiError> {
    let user = blocking(move || state.user_service.find_by_id(id)).await?;
    Ok(Json(user))
}

pub async fn create(
    State(state): State<SharedState>,
    Json(request): Json<CreateUserRequest>,
) -> Result<Json<User>, ApiError> {
    let user = blocking(move || state.user_service.create(request)).await?;
    Ok(Json(user))
}

pub async fn update(
    State(state): State<SharedState>,
    Json(request): Json<UpdateUserRequest>,
) -> Result<Json<User>, ApiError> {
    let user = blocking(move || state.user_service.update(request)).await?;
    Ok(Json(user))
}

pub async fn delete(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<(), ApiError> {
    blocking(move || state.user_service.delete(id)).await
}

pub async fn add_friend(
    State(state): State<SharedState>,
    Path((id, friend_id)): Path<(i64, i64)>,
) -> Result<(), ApiError> {
    blocking(move || state.user_service.add_friend(id, friend_id)).await
}

pub async fn remove_friend(
    State(state): State<SharedState>,
    Path((id, friend_id)): Path<(i64, i64)>,
) -> Result<(), ApiError> {
    blocking(move || state.user_service.remove_friend(id, friend_id)).await
}

pub async fn get_friends(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<User>>, ApiError> {
    let friends = blocking(move || state.user_service.get_friends(id)).await?;
    Ok(Json(friends))
}

pub async fn common_friends(
    State(state): State<SharedState>,
    Path((id, other_id)): Path<(i64, i64)>,
) -> Result<Json<Vec<User>>, ApiError> {
    let friends = blocking(move || state.user_service.get_common_friends(id, other_id)).await?;
    Ok(Json(friends))
}

pub async fn recommendations(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<Film>>, ApiError> {
    let films = blocking(move || state.user_service.get_recommendations(id)).await?;
    Ok(Json(films))
}

pub async fn feed(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<FeedEvent>>, ApiError> {
    let events = blocking(move || state.user_service.get_feed_events(id)).await?;
    Ok(Json(events))
}
