//! Item pool loader.

use std::path::Path;

use gacha_core::ItemPools;

use crate::loaders::{LoadResult, read_file};

/// Loader for item pools and featured lists from RON files.
pub struct PoolLoader;

impl PoolLoader {
    /// Load item pools from a RON file.
    ///
    /// Pools missing from the file are empty; draws that land in them
    /// resolve to the unknown item.
    pub fn load(path: &Path) -> LoadResult<ItemPools> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse item pools from RON text.
    pub fn parse(content: &str) -> LoadResult<ItemPools> {
        let pools: ItemPools = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse item pools RON: {}", e))?;

        for tag in pools.empty_pools() {
            tracing::warn!("Item pool {} is empty; draws landing there yield the unknown item", tag);
        }

        Ok(pools)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gacha_core::{PoolOracle, PoolTag};

    #[test]
    fn parses_pools_and_featured_lists() {
        let pools = PoolLoader::parse(
            r#"(
                character_5: ["Verina", "Encore"],
                weapon_3: ["Training Blade"],
                featured: (character_5: ["Jiyan"]),
            )"#,
        )
        .unwrap();

        assert_eq!(pools.pool(PoolTag::Character5).len(), 2);
        assert_eq!(pools.featured(PoolTag::Character5), ["Jiyan".to_string()]);
        assert!(pools.pool(PoolTag::Weapon4).is_empty());
        assert!(pools.featured(PoolTag::Weapon3).is_empty());
        assert_eq!(
            pools.empty_pools(),
            vec![PoolTag::Character4, PoolTag::Weapon5, PoolTag::Weapon4]
        );
    }

    #[test]
    fn rejects_malformed_ron() {
        assert!(PoolLoader::parse("(character_5: [\"Verina\"").is_err());
    }
}
