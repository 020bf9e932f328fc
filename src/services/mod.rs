// src/services/mod.rs
//
// Services Module - Orchestration Layer

pub mod director_service;
pub mod film_service;
pub mod genre_service;
pub mod mpa_service;
pub mod review_service;
pub mod user_service;

#[cfg(test)]
mod test_fixtures;

#[cfg(test)]
mod film_service_tests;
#[cfg(test)]
mod review_service_tests;

// Re-export all services and their types
pub use film_service::{CreateFilmRequest, EntityRef, FilmService, UpdateFilmRequest};

pub use user_service::{CreateUserRequest, UpdateUserRequest, UserService};

pub use review_service::{CreateReviewRequest, ReviewService, UpdateReviewRequest};

pub use director_service::{DirectorRequest, DirectorService};

pub use genre_service::GenreService;

pub use mpa_service::MpaService;
