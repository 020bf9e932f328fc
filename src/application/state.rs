// src/application/state.rs
//
// Service wiring. Repositories are chosen by Config::storage and injected as
// trait objects, so the services never know which backend they run on.

use std::sync::Arc;

use crate::config::{Config, StorageBackend};
use crate::db::{create_connection_pool, get_connection, initialize_database, ConnectionPool};
use crate::error::AppResult;
use crate::repositories::memory::{
    MemoryDirectorRepository, MemoryFeedEventRepository, MemoryFilmRepository,
    MemoryGenreRepository, MemoryMpaRepository, MemoryReviewRepository, MemoryUserRepository,
};
use crate::repositories::{
    DirectorRepository, FeedEventRepository, FilmLikeRepository, FilmRepository,
    FriendshipRepository, GenreRepository, MpaRepository, ReviewRepository,
    SqliteDirectorRepository, SqliteFeedEventRepository, SqliteFilmLikeRepository,
    SqliteFilmRepository, SqliteFriendshipRepository, SqliteGenreRepository, SqliteMpaRepository,
    SqliteReviewRepository, SqliteUserRepository, UserRepository,
};
use crate::services::{
    DirectorService, FilmService, GenreService, MpaService, ReviewService, UserService,
};

/// Application state shared across request handlers.
/// All services are Arc-wrapped for thread-safe sharing.
pub struct AppState {
    pub film_service: Arc<FilmService>,
    pub user_service: Arc<UserService>,
    pub review_service: Arc<ReviewService>,
    pub director_service: Arc<DirectorService>,
    pub genre_service: Arc<GenreService>,
    pub mpa_service: Arc<MpaService>,
}

impl AppState {
    pub fn from_config(config: &Config) -> AppResult<Self> {
        match config.storage {
            StorageBackend::Sqlite => {
                let pool = Arc::new(create_connection_pool(
                    &config.database_path,
                    config.pool_size,
                )?);
                let conn = get_connection(&pool)?;
                initialize_database(&conn)?;
                drop(conn);
                Ok(Self::with_sqlite(pool))
            }
            StorageBackend::Memory => Ok(Self::with_memory()),
        }
    }

    /// Wire every service over the SQLite repositories.
    pub fn with_sqlite(pool: Arc<ConnectionPool>) -> Self {
        Self::wire(Backends {
            film_repo: Arc::new(SqliteFilmRepository::new(pool.clone())),
            like_repo: Arc::new(SqliteFilmLikeRepository::new(pool.clone())),
            user_repo: Arc::new(SqliteUserRepository::new(pool.clone())),
            friendship_repo: Arc::new(SqliteFriendshipRepository::new(pool.clone())),
            genre_repo: Arc::new(SqliteGenreRepository::new(pool.clone())),
            mpa_repo: Arc::new(SqliteMpaRepository::new(pool.clone())),
            director_repo: Arc::new(SqliteDirectorRepository::new(pool.clone())),
            review_repo: Arc::new(SqliteReviewRepository::new(pool.clone())),
            feed_repo: Arc::new(SqliteFeedEventRepository::new(pool)),
        })
    }

    /// Wire every service over the in-memory reference repositories. The film
    /// and user stores each back two traits (films own their likes, users own
    /// their friendship rows).
    pub fn with_memory() -> Self {
        let films = Arc::new(MemoryFilmRepository::new());
        let users = Arc::new(MemoryUserRepository::new());

        Self::wire(Backends {
            film_repo: films.clone(),
            like_repo: films,
            user_repo: users.clone(),
            friendship_repo: users,
            genre_repo: Arc::new(MemoryGenreRepository::new()),
            mpa_repo: Arc::new(MemoryMpaRepository::new()),
            director_repo: Arc::new(MemoryDirectorRepository::new()),
            review_repo: Arc::new(MemoryReviewRepository::new()),
            feed_repo: Arc::new(MemoryFeedEventRepository::new()),
        })
    }

    fn wire(backends: Backends) -> Self {
        let mpa_service = Arc::new(MpaService::new(backends.mpa_repo));
        let genre_service = Arc::new(GenreService::new(backends.genre_repo));
        let director_service = Arc::new(DirectorService::new(backends.director_repo));

        let user_service = Arc::new(UserService::new(
            backends.user_repo.clone(),
            backends.friendship_repo,
            backends.like_repo.clone(),
            backends.film_repo.clone(),
            backends.feed_repo.clone(),
        ));

        let film_service = Arc::new(FilmService::new(
            backends.film_repo.clone(),
            backends.like_repo,
            backends.feed_repo.clone(),
            user_service.clone(),
            mpa_service.clone(),
            genre_service.clone(),
            director_service.clone(),
        ));

        let review_service = Arc::new(ReviewService::new(
            backends.review_repo,
            backends.film_repo,
            backends.user_repo,
            backends.feed_repo,
        ));

        Self {
            film_service,
            user_service,
            review_service,
            director_service,
            genre_service,
            mpa_service,
        }
    }
}

struct Backends {
    film_repo: Arc<dyn FilmRepository>,
    like_repo: Arc<dyn FilmLikeRepository>,
    user_repo: Arc<dyn UserRepository>,
    friendship_repo: Arc<dyn FriendshipRepository>,
    genre_repo: Arc<dyn GenreRepository>,
    mpa_repo: Arc<dyn MpaRepository>,
    director_repo: Arc<dyn DirectorRepository>,
    review_repo: Arc<dyn ReviewRepository>,
    feed_repo: Arc<dyn FeedEventRepository>,
}
