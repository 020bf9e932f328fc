// src/repositories/feed_event_repository.rs
//
// Append-only activity log. Events are inserted once and never rewritten.

use std::sync::Arc;

use rusqlite::{params, Row};

use crate::db::ConnectionPool;
use crate::domain::{EventType, FeedEvent, Operation};
use crate::error::AppResult;

#[cfg_attr(test, mockall::automock)]
pub trait FeedEventRepository: Send + Sync {
    /// Pure insert; collisions carry no business meaning.
    fn save(&self, event: &FeedEvent) -> AppResult<()>;
    /// Events recorded under `user_id`, chronological order.
    fn find_by_user(&self, user_id: i64) -> AppResult<Vec<FeedEvent>>;
}

const SAVE_SQL: &str =
    "INSERT INTO feed_events (event_time, user_id, event_type, operation, entity_id) \
     VALUES (?1, ?2, ?3, ?4, ?5)";
const FIND_BY_USER_SQL: &str =
    "SELECT event_id, event_time, user_id, event_type, operation, entity_id \
     FROM feed_events WHERE user_id = ?1 ORDER BY event_time ASC, event_id ASC";

pub struct SqliteFeedEventRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteFeedEventRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    fn row_to_event(row: &Row) -> Result<FeedEvent, rusqlite::Error> {
        let event_type_str: String = row.get("event_type")?;
        let event_type = match event_type_str.as_str() {
            "LIKE" => EventType::Like,
            "REVIEW" => EventType::Review,
            "FRIEND" => EventType::Friend,
            _ => return Err(rusqlite::Error::InvalidQuery),
        };

        let operation_str: String = row.get("operation")?;
        let operation = match operation_str.as_str() {
            "ADD" => Operation::Add,
            "REMOVE" => Operation::Remove,
            "UPDATE" => Operation::Update,
            _ => return Err(rusqlite::Error::InvalidQuery),
        };

        Ok(FeedEvent {
            event_id: row.get("event_id")?,
            timestamp: row.get("event_time")?,
            user_id: row.get("user_id")?,
            event_type,
            operation,
            entity_id: row.get("entity_id")?,
        })
    }
}

impl FeedEventRepository for SqliteFeedEventRepository {
    fn save(&self, event: &FeedEvent) -> AppResult<()> {
        let conn = self.pool.get()?;

        conn.execute(
            SAVE_SQL,
            params![
                event.timestamp,
                event.user_id,
                event.event_type.to_string(),
                event.operation.to_string(),
                event.entity_id,
            ],
        )?;

        Ok(())
    }

    fn find_by_user(&self, user_id: i64) -> AppResult<Vec<FeedEvent>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(FIND_BY_USER_SQL)?;
        let events: Vec<FeedEvent> = stmt
            .query_map(params![user_id], Self::row_to_event)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(events)
    }
}
