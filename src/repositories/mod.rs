// src/repositories/mod.rs
//
// Repository layer
//
// CRITICAL RULES:
// - Repositories are DUMB data mappers
// - NO business logic
// - NO invariant enforcement
// - NO cross-repository calls
// - Explicit SQL only

pub mod director_repository;
pub mod feed_event_repository;
pub mod film_like_repository;
pub mod film_repository;
pub mod friendship_repository;
pub mod genre_repository;
pub mod memory;
pub mod mpa_repository;
pub mod review_repository;
pub mod user_repository;

pub use director_repository::{DirectorRepository, SqliteDirectorRepository};
pub use feed_event_repository::{FeedEventRepository, SqliteFeedEventRepository};
pub use film_like_repository::{FilmLikeRepository, SqliteFilmLikeRepository};
pub use film_repository::{FilmRepository, SqliteFilmRepository};
pub use friendship_repository::{FriendshipRepository, SqliteFriendshipRepository};
pub use genre_repository::{GenreRepository, SqliteGenreRepository};
pub use mpa_repository::{MpaRepository, SqliteMpaRepository};
pub use review_repository::{ReviewRepository, SqliteReviewRepository};
pub use user_repository::{SqliteUserRepository, UserRepository};
