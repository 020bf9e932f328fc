// src/repositories/memory/feed.rs

use std::sync::{Mutex, MutexGuard};

use crate::domain::FeedEvent;
use crate::error::{AppError, AppResult};
use crate::repositories::FeedEventRepository;

#[derive(Default)]
struct FeedStore {
    events: Vec<FeedEvent>,
    next_id: i64,
}

/// Append-only in-memory event log.
#[derive(Default)]
pub struct MemoryFeedEventRepository {
    store: Mutex<FeedStore>,
}

impl MemoryFeedEventRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn store(&self) -> AppResult<MutexGuard<'_, FeedStore>> {
        self.store
            .lock()
            .map_err(|_| AppError::Other("feed store lock poisoned".to_string()))
    }
}

impl FeedEventRepository for MemoryFeedEventRepository {
    fn save(&self, event: &FeedEvent) -> AppResult<()> {
        let mut store = self.store()?;

        store.next_id += 1;
        let mut stored = event.clone();
        stored.event_id = store.next_id;

        store.events.push(stored);
        Ok(())
    }

    fn find_by_user(&self, user_id: i64) -> AppResult<Vec<FeedEvent>> {
        let mut events: Vec<FeedEvent> = self
            .store()?
            .events
            .iter()
            .filter(|e| e.user_id == user_id)
            .cloned()
            .collect();

        events.sort_by_key(|e| (e.timestamp, e.event_id));
        Ok(events)
    }
}
