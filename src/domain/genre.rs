use serde::{Deserialize, Serialize};

/// Film genre. Reference data, read-only from the API surface.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Genre {
    pub id: i64,
    pub name: String,
}
