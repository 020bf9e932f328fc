// src/repositories/memory/users.rs

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use crate::domain::{Friendship, User};
use crate::error::{AppError, AppResult};
use crate::repositories::{FriendshipRepository, UserRepository};

#[derive(Default)]
struct UserStore {
    users: BTreeMap<i64, User>,
    friendships: Vec<Friendship>,
    next_id: i64,
}

/// Users plus their directional friendship rows in one store.
#[derive(Default)]
pub struct MemoryUserRepository {
    store: Mutex<UserStore>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn store(&self) -> AppResult<MutexGuard<'_, UserStore>> {
        self.store
            .lock()
            .map_err(|_| AppError::Other("user store lock poisoned".to_string()))
    }
}

impl UserRepository for MemoryUserRepository {
    fn find_all(&self) -> AppResult<Vec<User>> {
        Ok(self.store()?.users.values().cloned().collect())
    }

    fn find_by_id(&self, id: i64) -> AppResult<Option<User>> {
        Ok(self.store()?.users.get(&id).cloned())
    }

    fn create(&self, user: &User) -> AppResult<User> {
        let mut store = self.store()?;

        store.next_id += 1;
        let mut created = user.clone();
        created.id = store.next_id;

        store.users.insert(created.id, created.clone());
        Ok(created)
    }

    fn update(&self, user: &User) -> AppResult<User> {
        let mut store = self.store()?;

        if !store.users.contains_key(&user.id) {
            return Err(AppError::not_found("User", user.id));
        }

        store.users.insert(user.id, user.clone());
        Ok(user.clone())
    }

    fn delete(&self, id: i64) -> AppResult<()> {
        let mut store = self.store()?;

        store
            .users
            .remove(&id)
            .ok_or_else(|| AppError::not_found("User", id))?;
        store
            .friendships
            .retain(|f| f.user_id != id && f.friend_id != id);
        Ok(())
    }
}

impl FriendshipRepository for MemoryUserRepository {
    fn add(&self, friendship: &Friendship) -> AppResult<()> {
        let mut store = self.store()?;

        let exists = store
            .friendships
            .iter()
            .any(|f| f.user_id == friendship.user_id && f.friend_id == friendship.friend_id);
        if !exists {
            store.friendships.push(*friendship);
        }
        Ok(())
    }

    fn delete(&self, user_id: i64, friend_id: i64) -> AppResult<()> {
        let mut store = self.store()?;
        store
            .friendships
            .retain(|f| !(f.user_id == user_id && f.friend_id == friend_id));
        Ok(())
    }

    fn find_by_user(&self, user_id: i64) -> AppResult<Vec<Friendship>> {
        let mut friendships: Vec<Friendship> = self
            .store()?
            .friendships
            .iter()
            .filter(|f| f.user_id == user_id)
            .copied()
            .collect();

        friendships.sort_by_key(|f| f.friend_id);
        Ok(friendships)
    }

    fn common_friend_ids(&self, user_id: i64, other_id: i64) -> AppResult<Vec<i64>> {
        let store = self.store()?;

        let mut ids: Vec<i64> = store
            .friendships
            .iter()
            .filter(|f| f.user_id == user_id)
            .filter(|f| {
                store
                    .friendships
                    .iter()
                    .any(|other| other.user_id == other_id && other.friend_id == f.friend_id)
            })
            .map(|f| f.friend_id)
            .collect();

        ids.sort_unstable();
        Ok(ids)
    }
}
