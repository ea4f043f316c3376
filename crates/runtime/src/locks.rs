//! Per-(user, banner) mutual exclusion.
//!
//! A draw session loads a banner state, advances it, and saves it back.
//! Two sessions on the same key must not interleave or one of them loses its
//! update; sessions on different keys run freely.
//!
//! Each [`crate::StateRepository`] owns one [`BannerLocks`], so every service
//! writing through the same store serializes on the same table.
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use gacha_core::BannerKind;

type LockKey = (String, BannerKind);

/// Table of async locks keyed by (user, banner).
///
/// An entry exists only while some session holds or waits for its key; the
/// last guard to drop removes it.
#[derive(Default)]
pub struct BannerLocks {
    locks: Mutex<HashMap<LockKey, Arc<AsyncMutex<()>>>>,
}

impl BannerLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to `(user, banner)`.
    ///
    /// The returned guard releases the key when dropped.
    pub async fn acquire(&self, user: &str, banner: BannerKind) -> BannerGuard<'_> {
        let key = (user.to_owned(), banner);
        let lock = Arc::clone(
            self.table()
                .entry(key.clone())
                .or_insert_with(|| Arc::new(AsyncMutex::new(()))),
        );

        // Built before waiting so a cancelled wait still prunes the entry.
        let mut guard = BannerGuard {
            locks: self,
            key,
            guard: None,
        };
        guard.guard = Some(lock.lock_owned().await);
        guard
    }

    /// Number of keys currently held or awaited.
    pub fn len(&self) -> usize {
        self.table().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn table(&self) -> MutexGuard<'_, HashMap<LockKey, Arc<AsyncMutex<()>>>> {
        // The table only holds Arcs, so a panic while it was held cannot
        // leave it inconsistent.
        self.locks.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn release(&self, key: &LockKey) {
        let mut table = self.table();
        // Waiters clone the Arc under the table lock, so a count of one
        // means nobody else holds or awaits this key.
        let idle = table
            .get(key)
            .is_some_and(|lock| Arc::strong_count(lock) == 1);
        if idle {
            table.remove(key);
        }
    }
}

/// Exclusive access to one (user, banner) key.
pub struct BannerGuard<'a> {
    locks: &'a BannerLocks,
    key: LockKey,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for BannerGuard<'_> {
    fn drop(&mut self) {
        drop(self.guard.take());
        self.locks.release(&self.key);
    }
}
