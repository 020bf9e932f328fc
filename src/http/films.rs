// src/http/films.rs

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use super::{blocking, ApiError, SharedState};
use crate::domain::{Film, Genre, MpaRating};
use crate::services::{CreateFilmRequest, UpdateFilmRequest};

fn default_count() -> i64 {
    10
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PopularParams {
    #[serde(default = "default_count")]
    pub count: i64,
    pub genre_id: Option<i64>,
    pub year: Option<i32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommonParams {
    pub user_id: i64,
    pub friend_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub query: String,
    pub by: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectorSortParams {
    pub sort_by: String,
}

pub async fn find_all(State(state): State<SharedState>) -> Result<Json<Vec<Film>>, ApiError> {
    let films = blocking(move || state.film_service.find_all()).await?;
    Ok(Json(films))
}

pub async fn find_by_id(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<Json<Film>, ApiError> {
    let film = blocking(move || state.film_service.find_by_id(id)).await?;
    Ok(Json(film))
}

pub async fn create(
    State(state): State<SharedState>,
    Json(request): Json<CreateFilmRequest>,
) -> Result<Json<Film>, ApiError> {
    let film = blocking(move || state.film_service.create(request)).await?;
    Ok(Json(film))
}

pub async fn update(
    State(state): State<SharedState>,
    Json(request): Json<UpdateFilmRequest>,
) -> Result<Json<Film>, ApiError> {
    let film = blocking(move || state.film_service.update(request)).await?;
    Ok(Json(film))
}

pub async fn delete(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<(), ApiError> {
    blocking(move || state.film_service.delete(id)).await
}

pub async fn add_like(
    State(state): State<SharedState>,
    Path((id, user_id)): Path<(i64, i64)>,
) -> Result<(), ApiError> {
    blocking(move || state.film_service.add_like(id, user_id)).await
}

pub async fn remove_like(
    State(state): State<SharedState>,
    Path((id, user_id)): Path<(i64, i64)>,
) -> Result<(), ApiError> {
    blocking(move || state.film_service.remove_like(id, user_id)).await
}

pub async fn popular(
    State(state): State<SharedState>,
    Query(params): Query<PopularParams>,
) -> Result<Json<Vec<Film>>, ApiError> {
    let films = blocking(move || {
        state
            .film_service
            .get_popular_films(params.count, params.genre_id, params.year)
    })
    .await?;
    Ok(Json(films))
}

pub async fn common(
    State(state): State<SharedState>,
    Query(params): Query<CommonParams>,
) -> Result<Json<Vec<Film>>, ApiError> {
    let films = blocking(move || {
        state
            .film_service
            .get_all_films_common(params.user_id, params.friend_id)
    })
    .await?;
    Ok(Json(films))
}

pub async fn search(
    State(state): State<SharedState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Film>>, ApiError> {
    let films =
        blocking(move || state.film_service.search_films(&params.query, &params.by)).await?;
    Ok(Json(films))
}

pub async fn by_director(
    State(state): State<SharedState>,
    Path(director_id): Path<i64>,
    Query(params): Query<DirectorSortParams>,
) -> Result<Json<Vec<Film>>, ApiError> {
    let films = blocking(move || {
        state
            .film_service
            .get_films_by_director(director_id, &params.sort_by)
    })
    .await?;
    Ok(Json(films))
}

pub async fn mpa_of_film(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<Json<MpaRating>, ApiError> {
    let film = blocking(move || state.film_service.find_by_id(id)).await?;
    Ok(Json(film.mpa))
}

pub async fn genres_of_film(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<Genre>>, ApiError> {
    let film = blocking(move || state.film_service.find_by_id(id)).await?;
    Ok(Json(film.genres))
}
