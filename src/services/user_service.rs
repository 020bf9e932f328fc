// src/services/user_service.rs

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::domain::{
    validate_user, EventType, FeedEvent, Film, Friendship, Operation, User,
};
use crate::error::{AppError, AppResult};
use crate::repositories::{
    FeedEventRepository, FilmLikeRepository, FilmRepository, FriendshipRepository, UserRepository,
};

#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserRequest {
    pub email: String,
    pub login: String,
    #[serde(default)]
    pub name: String,
    pub birthday: NaiveDate,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateUserRequest {
    pub id: i64,
    pub email: String,
    pub login: String,
    #[serde(default)]
    pub name: String,
    pub birthday: NaiveDate,
}

pub struct UserService {
    user_repo: Arc<dyn UserRepository>,
    friendship_repo: Arc<dyn FriendshipRepository>,
    like_repo: Arc<dyn FilmLikeRepository>,
    film_repo: Arc<dyn FilmRepository>,
    feed_repo: Arc<dyn FeedEventRepository>,
}

impl UserService {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        friendship_repo: Arc<dyn FriendshipRepository>,
        like_repo: Arc<dyn FilmLikeRepository>,
        film_repo: Arc<dyn FilmRepository>,
        feed_repo: Arc<dyn FeedEventRepository>,
    ) -> Self {
        Self {
            user_repo,
            friendship_repo,
            like_repo,
            film_repo,
            feed_repo,
        }
    }

    pub fn find_all(&self) -> AppResult<Vec<User>> {
        self.user_repo.find_all()
    }

    pub fn find_by_id(&self, id: i64) -> AppResult<User> {
        self.user_repo.find_by_id(id)?.ok_or_else(|| {
            log::warn!("User with id={} not found", id);
            AppError::not_found("User", id)
        })
    }

    pub fn create(&self, request: CreateUserRequest) -> AppResult<User> {
        let mut user = User {
            id: 0,
            email: request.email,
            login: request.login,
            name: request.name,
            birthday: request.birthday,
        };
        if user.name.trim().is_empty() {
            user.name = user.login.clone();
        }
        validate_user(&user)?;

        let created = self.user_repo.create(&user)?;
        log::info!("User created: id={}, login={}", created.id, created.login);
        Ok(created)
    }

    pub fn update(&self, request: UpdateUserRequest) -> AppResult<User> {
        self.find_by_id(request.id)?;

        let mut user = User {
            id: request.id,
            email: request.email,
            login: request.login,
            name: request.name,
            birthday: request.birthday,
        };
        if user.name.trim().is_empty() {
            user.name = user.login.clone();
        }
        validate_user(&user)?;

        let updated = self.user_repo.update(&user)?;
        log::info!("User updated: id={}", updated.id);
        Ok(updated)
    }

    pub fn delete(&self, id: i64) -> AppResult<()> {
        self.find_by_id(id)?;
        self.user_repo.delete(id)?;
        log::info!("User deleted: id={}", id);
        Ok(())
    }

    /// One-directional: only `user_id` gains a friend. Both feeds record the
    /// event.
    pub fn add_friend(&self, user_id: i64, friend_id: i64) -> AppResult<()> {
        self.find_by_id(user_id)?;
        self.find_by_id(friend_id)?;

        self.friendship_repo.add(&Friendship {
            user_id,
            friend_id,
            confirmed: true,
        })?;
        log::info!("User {} added user {} as a friend", user_id, friend_id);

        self.feed_repo.save(&FeedEvent::now(
            user_id,
            EventType::Friend,
            Operation::Add,
            friend_id,
        ))?;
        self.feed_repo.save(&FeedEvent::now(
            friend_id,
            EventType::Friend,
            Operation::Add,
            user_id,
        ))?;
        Ok(())
    }

    pub fn remove_friend(&self, user_id: i64, friend_id: i64) -> AppResult<()> {
        self.find_by_id(user_id)?;
        self.find_by_id(friend_id)?;

        // Absent friendship: still a success, events are recorded regardless
        self.friendship_repo.delete(user_id, friend_id)?;
        log::info!("User {} removed user {} from friends", user_id, friend_id);

        self.feed_repo.save(&FeedEvent::now(
            user_id,
            EventType::Friend,
            Operation::Remove,
            friend_id,
        ))?;
        self.feed_repo.save(&FeedEvent::now(
            friend_id,
            EventType::Friend,
            Operation::Remove,
            user_id,
        ))?;
        Ok(())
    }

    pub fn get_friends(&self, user_id: i64) -> AppResult<Vec<User>> {
        self.find_by_id(user_id)?;

        self.friendship_repo
            .find_by_user(user_id)?
            .into_iter()
            .map(|friendship| self.find_by_id(friendship.friend_id))
            .collect()
    }

    pub fn get_common_friends(&self, user_id: i64, other_id: i64) -> AppResult<Vec<User>> {
        self.find_by_id(user_id)?;
        self.find_by_id(other_id)?;

        self.friendship_repo
            .common_friend_ids(user_id, other_id)?
            .into_iter()
            .map(|id| self.find_by_id(id))
            .collect()
    }

    /// Collaborative-filtering heuristic: find the single most like-overlapping
    /// other user and recommend the films they liked that this user has not.
    pub fn get_recommendations(&self, user_id: i64) -> AppResult<Vec<Film>> {
        self.find_by_id(user_id)?;

        let mut likes_by_user: HashMap<i64, HashSet<i64>> = HashMap::new();
        for (like_user_id, film_id) in self.like_repo.all_likes()? {
            likes_by_user.entry(like_user_id).or_default().insert(film_id);
        }

        let Some(user_likes) = likes_by_user.get(&user_id) else {
            log::info!("User {} has no likes, nothing to recommend", user_id);
            return Ok(Vec::new());
        };

        // Most-overlapping other user; ties go to the smallest user id
        let mut candidate_ids: Vec<i64> = likes_by_user
            .keys()
            .copied()
            .filter(|id| *id != user_id)
            .collect();
        candidate_ids.sort_unstable();

        let mut best: Option<(i64, usize)> = None;
        for other_id in candidate_ids {
            let overlap = likes_by_user[&other_id].intersection(user_likes).count();
            if overlap > 0 && best.is_none_or(|(_, best_overlap)| overlap > best_overlap) {
                best = Some((other_id, overlap));
            }
        }

        let Some((similar_id, overlap)) = best else {
            log::info!("No user shares liked films with user {}", user_id);
            return Ok(Vec::new());
        };

        let mut recommended: Vec<i64> = likes_by_user[&similar_id]
            .difference(user_likes)
            .copied()
            .collect();
        recommended.sort_unstable();

        log::info!(
            "User {} shares {} likes with user {}; recommending {} films",
            similar_id,
            overlap,
            user_id,
            recommended.len()
        );

        let mut films = Vec::with_capacity(recommended.len());
        for film_id in recommended {
            if let Some(film) = self.film_repo.find_by_id(film_id)? {
                films.push(film);
            }
        }
        Ok(films)
    }

    /// The user's own activity, chronological. Friends' feeds stay private.
    pub fn get_feed_events(&self, user_id: i64) -> AppResult<Vec<FeedEvent>> {
        self.find_by_id(user_id)?;
        self.feed_repo.find_by_user(user_id)
    }
}
