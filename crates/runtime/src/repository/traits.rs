//! Repository contract for loading and saving user draw state.

use gacha_core::{BannerKind, BannerState, UserRecord};

use super::Result;
use crate::locks::BannerLocks;

/// Repository for per-user, per-banner draw state.
///
/// - `load` of an unknown user or banner returns the zero-valued state
/// - `save` fully replaces one banner's state and leaves the user's other
///   banners untouched, atomically with respect to other calls on the same
///   repository
///
/// Callers that load, draw, and save must hold the (user, banner) lock from
/// [`StateRepository::locks`] for the whole sequence. The lock table lives
/// with the store, so every service sharing a repository serializes on it.
pub trait StateRepository: Send + Sync {
    /// Lock table guarding read-modify-write sessions against this store.
    ///
    /// Implementations backed by the same storage must return the same table.
    fn locks(&self) -> &BannerLocks;

    /// Load one banner's state.
    fn load(&self, user: &str, banner: BannerKind) -> Result<BannerState> {
        Ok(self.load_user(user)?.banner(banner).clone())
    }

    /// Replace one banner's state.
    fn save(&self, user: &str, banner: BannerKind, state: &BannerState) -> Result<()>;

    /// Load every banner of a user. Unknown users get an empty record.
    fn load_user(&self, user: &str) -> Result<UserRecord>;

    /// Check if a user has any stored state
    fn exists(&self, user: &str) -> bool;

    /// List all stored user ids, sorted
    fn list_users(&self) -> Result<Vec<String>> {
        Ok(vec![])
    }
}
