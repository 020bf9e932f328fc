// src/lib.rs
// Filmorate - movie catalog and recommendation backend
//
// Architecture:
// - Layered: HTTP adapter -> domain services -> repositories -> SQLite
// - Repositories are trait objects with a persistent and an in-memory
//   implementation, selected by configuration
// - Services own existence checks, cross-entity validation and feed
//   recording; repositories stay dumb data mappers

// ============================================================================
// CORE LAYERS
// ============================================================================

pub mod db;
pub mod domain;
pub mod error;
pub mod repositories;
pub mod services;

// ============================================================================
// APPLICATION LAYER
// ============================================================================

pub mod application;
pub mod config;
pub mod http;

// ============================================================================
// PUBLIC API - Domain Entities
// ============================================================================

pub use domain::{
    validate_director,
    validate_film,
    validate_review,
    validate_user,
    Director,
    EventType,
    FeedEvent,
    Film,
    Friendship,
    Genre,
    MpaRating,
    Operation,
    Review,
    User,
};

// ============================================================================
// PUBLIC API - Error Types
// ============================================================================

pub use error::{AppError, AppResult};

// ============================================================================
// PUBLIC API - Database
// ============================================================================

pub use db::{create_connection_pool, initialize_database, ConnectionPool};

// ============================================================================
// PUBLIC API - Repositories
// ============================================================================

pub use repositories::{
    DirectorRepository,
    FeedEventRepository,
    FilmLikeRepository,
    FilmRepository,
    FriendshipRepository,
    GenreRepository,
    MpaRepository,
    ReviewRepository,
    SqliteDirectorRepository,
    SqliteFeedEventRepository,
    SqliteFilmLikeRepository,
    SqliteFilmRepository,
    SqliteFriendshipRepository,
    SqliteGenreRepository,
    SqliteMpaRepository,
    SqliteReviewRepository,
    SqliteUserRepository,
    UserRepository,
};

// ============================================================================
// PUBLIC API - Services
// ============================================================================

pub use services::{
    CreateFilmRequest,
    CreateReviewRequest,
    CreateUserRequest,
    DirectorRequest,
    DirectorService,
    EntityRef,
    FilmService,
    GenreService,
    MpaService,
    ReviewService,
    UpdateFilmRequest,
    UpdateReviewRequest,
    UpdateUserRequest,
    UserService,
};

// ============================================================================
// PUBLIC API - Application Layer
// ============================================================================

pub use application::AppState;
pub use config::{Config, StorageBackend};
