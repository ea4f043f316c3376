//! In-memory StateRepository implementation for tests and local runs.

use std::collections::HashMap;
use std::sync::RwLock;

use gacha_core::{BannerKind, BannerState, UserRecord};

use crate::locks::BannerLocks;
use crate::repository::{RepositoryError, Result, StateRepository};

/// In-memory implementation of StateRepository.
///
/// Stores one [`UserRecord`] per user id.
pub struct InMemoryStateRepo {
    users: RwLock<HashMap<String, UserRecord>>,
    locks: BannerLocks,
}

impl InMemoryStateRepo {
    /// Create a new empty in-memory repository.
    pub fn new() -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
            locks: BannerLocks::new(),
        }
    }

    /// Create with a pre-existing record for one user.
    pub fn with_user(user: impl Into<String>, record: UserRecord) -> Self {
        let mut users = HashMap::new();
        users.insert(user.into(), record);
        Self {
            users: RwLock::new(users),
            locks: BannerLocks::new(),
        }
    }
}

impl Default for InMemoryStateRepo {
    fn default() -> Self {
        Self::new()
    }
}

impl StateRepository for InMemoryStateRepo {
    fn locks(&self) -> &BannerLocks {
        &self.locks
    }

    fn save(&self, user: &str, banner: BannerKind, state: &BannerState) -> Result<()> {
        let mut users = self
            .users
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        *users.entry(user.to_owned()).or_default().banner_mut(banner) = state.clone();
        Ok(())
    }

    fn load_user(&self, user: &str) -> Result<UserRecord> {
        let users = self
            .users
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(users.get(user).cloned().unwrap_or_default())
    }

    fn exists(&self, user: &str) -> bool {
        self.users
            .read()
            .map(|users| users.contains_key(user))
            .unwrap_or(false)
    }

    fn list_users(&self) -> Result<Vec<String>> {
        let users = self
            .users
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        let mut ids: Vec<String> = users.keys().cloned().collect();
        ids.sort_unstable();
        Ok(ids)
    }
}
