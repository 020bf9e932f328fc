// src/repositories/memory/mod.rs
//
// In-memory reference implementations of the repository traits.
//
// Selected via Config::storage; also the fast backend for tests. Each store
// keeps its id counter inside the same lock as its map, so id assignment and
// insertion are one atomic step.

pub mod feed;
pub mod films;
pub mod reference;
pub mod reviews;
pub mod users;

pub use feed::MemoryFeedEventRepository;
pub use films::MemoryFilmRepository;
pub use reference::{MemoryDirectorRepository, MemoryGenreRepository, MemoryMpaRepository};
pub use reviews::MemoryReviewRepository;
pub use users::MemoryUserRepository;
