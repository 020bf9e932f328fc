use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{Director, Genre, MpaRating};

/// A catalog film together with its owned collections (the aggregate root)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Film {
    /// Surrogate key, assigned by storage on create
    pub id: i64,

    /// Title, never blank
    pub name: String,

    /// Free-text description, at most 200 characters
    #[serde(default)]
    pub description: String,

    /// Theatrical release date; cinema did not exist before 1895-12-28
    pub release_date: NaiveDate,

    /// Runtime in minutes, strictly positive
    pub duration: i32,

    /// MPA rating reference, required for creation
    pub mpa: MpaRating,

    /// Genre references, unique, kept in ascending-id order
    #[serde(default)]
    pub genres: Vec<Genre>,

    /// Director references, unique, kept in ascending-id order
    #[serde(default)]
    pub directors: Vec<Director>,

    /// Ids of users who liked this film. Derived data: mutated only through
    /// the like/unlike operations, never part of a write payload.
    #[serde(default)]
    pub likes: BTreeSet<i64>,
}

impl Film {
    pub fn like_count(&self) -> usize {
        self.likes.len()
    }
}
