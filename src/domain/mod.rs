// src/domain/mod.rs
//
// Domain Root - The Single Source of Truth for Domain API
//
// This file MUST declare all domain modules and re-export their public API.
// All other modules import from `crate::domain::*`

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod director;
pub mod feed_event;
pub mod film;
pub mod friendship;
pub mod genre;
pub mod mpa;
pub mod review;
pub mod user;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

// Film Domain
pub use film::{validate_film, Film};

// User Domain
pub use user::{validate_user, User};

// Review Domain
pub use review::{validate_review, Review};

// Reference Data
pub use genre::Genre;
pub use mpa::MpaRating;

// Directors
pub use director::{validate_director, Director};

// Relations
pub use friendship::Friendship;

// Activity Feed
pub use feed_event::{EventType, FeedEvent, Operation};

// ============================================================================
// DOMAIN ERROR TYPES
// ============================================================================

use thiserror::Error;

/// Domain-level errors
/// These represent violations of business rules and invariants
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),
}

/// Domain result type
pub type DomainResult<T> = Result<T, DomainError>;
