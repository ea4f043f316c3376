//! Content loaders for reading gacha data from files.

pub mod config;
pub mod factory;
pub mod pools;

pub use config::{ConfigLoader, FourStarUpSpec, RateTableSpec, RatesFile};
pub use factory::ContentFactory;
pub use pools::PoolLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
