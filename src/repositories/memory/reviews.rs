// src/repositories/memory/reviews.rs

use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard};

use crate::domain::Review;
use crate::error::{AppError, AppResult};
use crate::repositories::ReviewRepository;

#[derive(Default)]
struct ReviewStore {
    reviews: BTreeMap<i64, Review>,
    /// (review_id, user_id) -> vote polarity
    votes: HashMap<(i64, i64), bool>,
    next_id: i64,
}

#[derive(Default)]
pub struct MemoryReviewRepository {
    store: Mutex<ReviewStore>,
}

impl MemoryReviewRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn store(&self) -> AppResult<MutexGuard<'_, ReviewStore>> {
        self.store
            .lock()
            .map_err(|_| AppError::Other("review store lock poisoned".to_string()))
    }
}

impl ReviewRepository for MemoryReviewRepository {
    fn create(&self, review: &Review) -> AppResult<Review> {
        let mut store = self.store()?;

        store.next_id += 1;
        let mut created = review.clone();
        created.review_id = store.next_id;

        store.reviews.insert(created.review_id, created.clone());
        Ok(created)
    }

    fn update(&self, review: &Review) -> AppResult<Review> {
        let mut store = self.store()?;

        let stored = store
            .reviews
            .get_mut(&review.review_id)
            .ok_or_else(|| AppError::not_found("Review", review.review_id))?;

        // Content and polarity only; useful is vote-derived
        stored.content = review.content.clone();
        stored.is_positive = review.is_positive;
        Ok(stored.clone())
    }

    fn delete(&self, id: i64) -> AppResult<()> {
        let mut store = self.store()?;

        store
            .reviews
            .remove(&id)
            .ok_or_else(|| AppError::not_found("Review", id))?;
        store.votes.retain(|(review_id, _), _| *review_id != id);
        Ok(())
    }

    fn find_by_id(&self, id: i64) -> AppResult<Option<Review>> {
        Ok(self.store()?.reviews.get(&id).cloned())
    }

    fn find_for_film(&self, film_id: Option<i64>, count: i64) -> AppResult<Vec<Review>> {
        let mut reviews: Vec<Review> = self
            .store()?
            .reviews
            .values()
            .filter(|r| film_id.is_none_or(|id| r.film_id == id))
            .cloned()
            .collect();

        reviews.sort_by(|a, b| {
            b.useful
                .cmp(&a.useful)
                .then_with(|| a.review_id.cmp(&b.review_id))
        });
        reviews.truncate(count.max(0) as usize);
        Ok(reviews)
    }

    fn add_vote(&self, review_id: i64, user_id: i64, positive: bool) -> AppResult<()> {
        let mut store = self.store()?;

        if !store.reviews.contains_key(&review_id) {
            return Err(AppError::not_found("Review", review_id));
        }

        let delta = match store.votes.insert((review_id, user_id), positive) {
            None => {
                if positive {
                    1
                } else {
                    -1
                }
            }
            Some(previous) if previous == positive => 0,
            Some(_) => {
                if positive {
                    2
                } else {
                    -2
                }
            }
        };

        if delta != 0 {
            if let Some(review) = store.reviews.get_mut(&review_id) {
                review.useful += delta;
            }
        }
        Ok(())
    }

    fn remove_vote(&self, review_id: i64, user_id: i64, positive: bool) -> AppResult<()> {
        let mut store = self.store()?;

        if store.votes.get(&(review_id, user_id)) == Some(&positive) {
            store.votes.remove(&(review_id, user_id));
            if let Some(review) = store.reviews.get_mut(&review_id) {
                review.useful += if positive { -1 } else { 1 };
            }
        }
        Ok(())
    }
}
