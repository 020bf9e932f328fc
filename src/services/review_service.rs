// src/services/review_service.rs

use std::sync::Arc;

use serde::Deserialize;

use crate::domain::{validate_review, EventType, FeedEvent, Operation, Review};
use crate::error::{AppError, AppResult};
use crate::repositories::{
    FeedEventRepository, FilmRepository, ReviewRepository, UserRepository,
};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReviewRequest {
    pub content: String,
    pub is_positive: bool,
    pub film_id: i64,
    pub user_id: i64,
    #[serde(default)]
    pub useful: i32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReviewRequest {
    pub review_id: i64,
    pub content: String,
    pub is_positive: bool,
    pub film_id: i64,
    pub user_id: i64,
}

pub struct ReviewService {
    review_repo: Arc<dyn ReviewRepository>,
    film_repo: Arc<dyn FilmRepository>,
    user_repo: Arc<dyn UserRepository>,
    feed_repo: Arc<dyn FeedEventRepository>,
}

impl ReviewService {
    pub fn new(
        review_repo: Arc<dyn ReviewRepository>,
        film_repo: Arc<dyn FilmRepository>,
        user_repo: Arc<dyn UserRepository>,
        feed_repo: Arc<dyn FeedEventRepository>,
    ) -> Self {
        Self {
            review_repo,
            film_repo,
            user_repo,
            feed_repo,
        }
    }

    pub fn create_review(&self, request: CreateReviewRequest) -> AppResult<Review> {
        self.validate_refs(request.film_id, request.user_id)?;

        let review = Review {
            review_id: 0,
            content: request.content,
            is_positive: request.is_positive,
            film_id: request.film_id,
            user_id: request.user_id,
            useful: request.useful,
        };
        validate_review(&review)?;

        let created = self.review_repo.create(&review)?;
        self.feed_repo.save(&FeedEvent::now(
            created.user_id,
            EventType::Review,
            Operation::Add,
            created.review_id,
        ))?;

        log::info!(
            "Review created: id={}, film={}, user={}",
            created.review_id,
            created.film_id,
            created.user_id
        );
        Ok(created)
    }

    pub fn update_review(&self, request: UpdateReviewRequest) -> AppResult<Review> {
        self.validate_refs(request.film_id, request.user_id)?;

        let review = Review {
            review_id: request.review_id,
            content: request.content,
            is_positive: request.is_positive,
            film_id: request.film_id,
            user_id: request.user_id,
            useful: 0, // ignored by the update path
        };
        validate_review(&review)?;

        let updated = self.review_repo.update(&review)?;
        self.feed_repo.save(&FeedEvent::now(
            updated.user_id,
            EventType::Review,
            Operation::Update,
            updated.review_id,
        ))?;
        Ok(updated)
    }

    pub fn get_review_by_id(&self, id: i64) -> AppResult<Review> {
        self.review_repo
            .find_by_id(id)?
            .ok_or_else(|| AppError::not_found("Review", id))
    }

    /// Top reviews by useful score, film-scoped when `film_id` is given.
    pub fn get_reviews(&self, film_id: Option<i64>, count: i64) -> AppResult<Vec<Review>> {
        self.review_repo.find_for_film(film_id, count)
    }

    pub fn delete_review(&self, id: i64) -> AppResult<()> {
        let review = self.get_review_by_id(id)?;

        // The event carries the author snapshot, so record-then-delete
        self.feed_repo.save(&FeedEvent::now(
            review.user_id,
            EventType::Review,
            Operation::Remove,
            review.review_id,
        ))?;
        self.review_repo.delete(id)?;

        log::info!("Review deleted: id={}", id);
        Ok(())
    }

    pub fn like_review(&self, review_id: i64, user_id: i64, positive: bool) -> AppResult<()> {
        self.validate_vote(review_id, user_id)?;
        self.review_repo.add_vote(review_id, user_id, positive)
    }

    pub fn remove_like(&self, review_id: i64, user_id: i64, positive: bool) -> AppResult<()> {
        self.validate_vote(review_id, user_id)?;
        self.review_repo.remove_vote(review_id, user_id, positive)
    }

    fn validate_vote(&self, review_id: i64, user_id: i64) -> AppResult<()> {
        if self.review_repo.find_by_id(review_id)?.is_none() {
            return Err(AppError::not_found("Review", review_id));
        }
        if self.user_repo.find_by_id(user_id)?.is_none() {
            return Err(AppError::not_found("User", user_id));
        }
        Ok(())
    }

    /// A review must reference an existing film and user, on update too.
    fn validate_refs(&self, film_id: i64, user_id: i64) -> AppResult<()> {
        if self.film_repo.find_by_id(film_id)?.is_none() {
            return Err(AppError::not_found("Film", film_id));
        }
        if self.user_repo.find_by_id(user_id)?.is_none() {
            return Err(AppError::not_found("User", user_id));
        }
        Ok(())
    }
}
