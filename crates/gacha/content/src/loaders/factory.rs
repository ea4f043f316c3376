//! Content factory for loading every gacha input from a data directory.

use std::path::{Path, PathBuf};

use gacha_core::{GachaConfig, ItemPools};

use crate::loaders::{ConfigLoader, LoadResult, PoolLoader};

/// Content factory that loads all gacha content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// └── pools.ron
/// ```
///
/// Missing files are not errors: an absent `config.toml` yields the default
/// rates and an absent `pools.ron` yields empty pools. Files that exist but
/// fail to parse or validate are errors.
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub const CONFIG_FILE: &'static str = "config.toml";
    pub const POOLS_FILE: &'static str = "pools.ron";

    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Load banner rates from `config.toml`.
    pub fn load_config(&self) -> LoadResult<GachaConfig> {
        let path = self.data_dir.join(Self::CONFIG_FILE);
        if !path.exists() {
            tracing::warn!("{} not found; using default rates", path.display());
            return Ok(GachaConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load item pools from `pools.ron`.
    pub fn load_pools(&self) -> LoadResult<ItemPools> {
        let path = self.data_dir.join(Self::POOLS_FILE);
        if !path.exists() {
            tracing::warn!("{} not found; every pool is empty", path.display());
            return Ok(ItemPools::default());
        }
        PoolLoader::load(&path)
    }
}
