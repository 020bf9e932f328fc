use serde::{Deserialize, Serialize};

/// MPA content-rating classification (G, PG, PG-13, R, NC-17).
/// Reference data, read-only from the API surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MpaRating {
    pub id: i64,
    pub name: String,
}
