//! Rate oracle for exposing banner probabilities to the engine.

use super::PoolTag;
use crate::config::{GachaConfig, RateTable};
use crate::state::BannerKind;

/// Provides the rate table of each banner and the featured odds of each pool.
pub trait RateOracle: Send + Sync {
    fn rates(&self, banner: BannerKind) -> RateTable;

    /// Chance that a draw landing in `pool` takes its featured list.
    fn up_rate(&self, pool: PoolTag) -> f64;
}

impl RateOracle for GachaConfig {
    fn rates(&self, banner: BannerKind) -> RateTable {
        *GachaConfig::rates(self, banner)
    }

    fn up_rate(&self, pool: PoolTag) -> f64 {
        GachaConfig::up_rate(self, pool)
    }
}
