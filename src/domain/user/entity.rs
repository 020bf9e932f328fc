use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A registered user. Friends are not stored on the entity; friendship is a
/// separate directional relation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub email: String,
    pub login: String,
    /// Display name; defaults to login when blank
    #[serde(default)]
    pub name: String,
    pub birthday: NaiveDate,
}
