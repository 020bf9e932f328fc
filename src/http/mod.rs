// src/http/mod.rs
//
// Thin HTTP adapter. Handlers translate transport concerns only: extract
// parameters, call the synchronous services on the blocking pool, map
// AppError to a status code plus an {error, message} body. No business
// logic lives here.

pub mod directors;
pub mod films;
pub mod genres;
pub mod mpa;
pub mod reviews;
pub mod users;

use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, put};
use axum::{Json, Router};
use serde_json::json;

use crate::application::AppState;
use crate::error::{AppError, AppResult};

pub type SharedState = Arc<AppState>;

pub fn router(state: SharedState) -> Router {
    Router::new()
        // Films
        .route("/films", get(films::find_all).post(films::create).put(films::update))
        .route("/films/popular", get(films::popular))
        .route("/films/common", get(films::common))
        .route("/films/search", get(films::search))
        .route("/films/director/{director_id}", get(films::by_director))
        .route("/films/{id}", get(films::find_by_id).delete(films::delete))
        .route("/films/{id}/mpa", get(films::mpa_of_film))
        .route("/films/{id}/genres", get(films::genres_of_film))
        .route(
            "/films/{id}/like/{user_id}",
            put(films::add_like).delete(films::remove_like),
        )
        // Users
        .route("/users", get(users::find_all).post(users::create).put(users::update))
        .route("/users/{id}", get(users::find_by_id).delete(users::delete))
        .route("/users/{id}/friends", get(users::get_friends))
        .route(
            "/users/{id}/friends/common/{other_id}",
            get(users::common_friends),
        )
        .route(
            "/users/{id}/friends/{friend_id}",
            put(users::add_friend).delete(users::remove_friend),
        )
        .route("/users/{id}/recommendations", get(users::recommendations))
        .route("/users/{id}/feed", get(users::feed))
        // Reviews
        .route(
            "/reviews",
            get(reviews::find_for_film).post(reviews::create).put(reviews::update),
        )
        .route("/reviews/{id}", get(reviews::find_by_id).delete(reviews::delete))
        .route(
            "/reviews/{id}/like/{user_id}",
            put(reviews::add_like).delete(reviews::remove_like),
        )
        .route(
            "/reviews/{id}/dislike/{user_id}",
            put(reviews::add_dislike).delete(reviews::remove_dislike),
        )
        // Directors
        .route(
            "/directors",
            get(directors::find_all).post(directors::create).put(directors::update),
        )
        .route(
            "/directors/{id}",
            get(directors::find_by_id).delete(directors::delete),
        )
        // Reference data
        .route("/genres", get(genres::find_all))
        .route("/genres/{id}", get(genres::find_by_id))
        .route("/mpa", get(mpa::find_all))
        .route("/mpa/{id}", get(mpa::find_by_id))
        .with_state(state)
}

/// Wraps AppError for transport translation.
pub struct ApiError(AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, message) = match &self.0 {
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "Not Found", self.0.to_string()),
            AppError::Domain(_) | AppError::Validation(_) | AppError::InvalidArgument(_) => {
                (StatusCode::BAD_REQUEST, "Validation error", self.0.to_string())
            }
            other => {
                log::error!("Internal error: {}", other);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error",
                    "An unexpected error occurred".to_string(),
                )
            }
        };

        (status, Json(json!({ "error": error, "message": message }))).into_response()
    }
}

/// Run a synchronous service call on the blocking pool.
pub(crate) async fn blocking<T, F>(f: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce() -> AppResult<T> + Send + 'static,
{
    match tokio::task::spawn_blocking(f).await {
        Ok(result) => result.map_err(ApiError::from),
        Err(e) => {
            log::error!("Blocking task failed: {}", e);
            Err(ApiError(AppError::Other(
                "Request handler failed".to_string(),
            )))
        }
    }
}
