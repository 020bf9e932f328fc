use serde::{Deserialize, Serialize};

/// A user's review of a film.
///
/// `useful` is the review's net approval count. It starts at zero and is
/// mutated only by the vote operations; the write path never sets it
/// directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub review_id: i64,
    pub content: String,
    pub is_positive: bool,
    pub film_id: i64,
    pub user_id: i64,
    #[serde(default)]
    pub useful: i32,
}
