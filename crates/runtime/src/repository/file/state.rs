//! File-based StateRepository implementation.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, LazyLock, Mutex, PoisonError, Weak};

use gacha_core::{BannerKind, BannerState, UserRecord};

use crate::locks::BannerLocks;
use crate::repository::{RepositoryError, Result, StateRepository};

type UserDocument = BTreeMap<String, UserRecord>;

/// Locks shared by every repository open on one document.
#[derive(Default)]
struct SharedDocument {
    write_lock: Mutex<()>,
    locks: BannerLocks,
}

/// Documents open in this process, keyed by absolute path.
static OPEN_DOCUMENTS: LazyLock<Mutex<HashMap<PathBuf, Weak<SharedDocument>>>> =
    LazyLock::new(Default::default);

fn shared_document(path: &Path) -> Arc<SharedDocument> {
    let key = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    let mut open = OPEN_DOCUMENTS
        .lock()
        .unwrap_or_else(PoisonError::into_inner);

    if let Some(shared) = open.get(&key).and_then(Weak::upgrade) {
        return shared;
    }

    open.retain(|_, shared| shared.strong_count() > 0);
    let shared = Arc::new(SharedDocument::default());
    open.insert(key, Arc::downgrade(&shared));
    shared
}

/// File-based implementation of StateRepository.
///
/// # File Format
///
/// All users live in a single pretty-printed JSON document, `user.json`:
///
/// ```text
/// {
///   "<user id>": {
///     "characters": { "pull_count", "five_pity", "four_pity", "five_star_history": [{ "item", "at_pull" }] },
///     "weapons": { ... }
///   }
/// }
/// ```
///
/// Writes go to a temp file that is then renamed over the document, so a
/// crash mid-write leaves the previous document intact.
///
/// Repositories opened on the same path within one process share their write
/// lock and their [`BannerLocks`].
pub struct FileStateRepository {
    path: PathBuf,
    shared: Arc<SharedDocument>,
}

impl FileStateRepository {
    pub const FILE_NAME: &'static str = "user.json";

    /// Create a repository storing `user.json` under `base_dir`.
    ///
    /// The directory is created on first save.
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        let path = base_dir.as_ref().join(Self::FILE_NAME);
        Self {
            shared: shared_document(&path),
            path,
        }
    }

    /// Path of the JSON document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_document(&self) -> Result<UserDocument> {
        if !self.path.exists() {
            return Ok(UserDocument::new());
        }

        let bytes = fs::read(&self.path).map_err(RepositoryError::Io)?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(UserDocument::new());
        }

        serde_json::from_slice(&bytes).map_err(|e| RepositoryError::Json(e.to_string()))
    }

    fn write_document(&self, document: &UserDocument) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(RepositoryError::Io)?;
        }

        let bytes = serde_json::to_vec_pretty(document)
            .map_err(|e| RepositoryError::Json(e.to_string()))?;

        let temp_path = self.path.with_extension("json.tmp");
        fs::write(&temp_path, bytes).map_err(RepositoryError::Io)?;
        // Atomic rename
        fs::rename(&temp_path, &self.path).map_err(RepositoryError::Io)?;

        Ok(())
    }
}

impl StateRepository for FileStateRepository {
    fn locks(&self) -> &BannerLocks {
        &self.shared.locks
    }

    fn save(&self, user: &str, banner: BannerKind, state: &BannerState) -> Result<()> {
        let _guard = self
            .shared
            .write_lock
            .lock()
            .map_err(|_| RepositoryError::LockPoisoned)?;

        let mut document = self.read_document()?;
        *document.entry(user.to_owned()).or_default().banner_mut(banner) = state.clone();
        self.write_document(&document)?;

        tracing::debug!(
            "Saved {}[{}] to {}",
            user,
            banner,
            self.path.display()
        );

        Ok(())
    }

    fn load_user(&self, user: &str) -> Result<UserRecord> {
        let _guard = self
            .shared
            .write_lock
            .lock()
            .map_err(|_| RepositoryError::LockPoisoned)?;

        let mut document = self.read_document()?;
        Ok(document.remove(user).unwrap_or_default())
    }

    fn exists(&self, user: &str) -> bool {
        self.list_users()
            .map(|users| users.iter().any(|id| id == user))
            .unwrap_or(false)
    }

    fn list_users(&self) -> Result<Vec<String>> {
        let _guard = self
            .shared
            .write_lock
            .lock()
            .map_err(|_| RepositoryError::LockPoisoned)?;

        Ok(self.read_document()?.into_keys().collect())
    }
}
