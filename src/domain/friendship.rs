use serde::{Deserialize, Serialize};

/// Directional friendship: `user_id` added `friend_id`.
///
/// The `(user_id, friend_id)` pair is the row identity. `confirmed` models a
/// pending/accepted state for a symmetric-confirmation workflow; the shipped
/// add-friend path writes it as `true` unconditionally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Friendship {
    pub user_id: i64,
    pub friend_id: i64,
    pub confirmed: bool,
}
