// src/domain/feed_event.rs
//
// Activity feed events
//
// Append-only: events are recorded once and never updated or deleted.

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// One record in a user's activity feed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedEvent {
    /// Assigned by storage on save
    pub event_id: i64,

    /// Epoch milliseconds
    pub timestamp: i64,

    /// The feed owner this event is recorded under
    pub user_id: i64,

    pub event_type: EventType,

    pub operation: Operation,

    /// Id of the film/review/friend the event refers to
    pub entity_id: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EventType {
    Like,
    Review,
    Friend,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Operation {
    Add,
    Remove,
    Update,
}

impl FeedEvent {
    /// Create an event stamped with the current time
    pub fn now(user_id: i64, event_type: EventType, operation: Operation, entity_id: i64) -> Self {
        Self {
            event_id: 0,
            timestamp: Utc::now().timestamp_millis(),
            user_id,
            event_type,
            operation,
            entity_id,
        }
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventType::Like => write!(f, "LIKE"),
            EventType::Review => write!(f, "REVIEW"),
            EventType::Friend => write!(f, "FRIEND"),
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Add => write!(f, "ADD"),
            Operation::Remove => write!(f, "REMOVE"),
            Operation::Update => write!(f, "UPDATE"),
        }
    }
}
