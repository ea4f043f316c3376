//! Runtime wrapper around static gacha content.
//!
//! [`OracleManager`] bundles the rate and pool oracles with the RNG so the
//! service can build [`gacha_core::GachaEnv`] values on demand. The data is
//! immutable at runtime and shared across every user; dynamic state lives
//! in repositories.
use std::sync::Arc;

use gacha_core::{BannerKind, Env, GachaConfig, GachaEnv, ItemPools, PcgRng, RateTable};

/// Manages all oracle implementations and provides unified access
#[derive(Clone)]
pub struct OracleManager {
    pub(crate) config: Arc<GachaConfig>,
    pub(crate) pools: Arc<ItemPools>,
    pub(crate) rng: PcgRng,
}

impl OracleManager {
    /// Creates a new oracle manager
    pub fn new(config: GachaConfig, pools: ItemPools) -> Self {
        Self {
            config: Arc::new(config),
            pools: Arc::new(pools),
            rng: PcgRng, // PcgRng is stateless
        }
    }

    /// Converts oracle manager into a `GachaEnv` for one draw stream
    pub fn as_gacha_env(&self, seed: u64) -> GachaEnv<'_> {
        Env::new(self.config.as_ref(), self.pools.as_ref(), &self.rng, seed).into_gacha_env()
    }

    /// Rate table of a banner
    pub fn rates(&self, banner: BannerKind) -> RateTable {
        *self.config.rates(banner)
    }

    pub fn config(&self) -> &GachaConfig {
        &self.config
    }

    pub fn pools(&self) -> &ItemPools {
        &self.pools
    }
}
