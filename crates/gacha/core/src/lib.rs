//! Deterministic gacha rules and data types shared across hosts.
//!
//! `gacha-core` defines the canonical draw rules (pity, soft pity, the shared
//! four-star universe, featured-item resolution) and exposes pure APIs that
//! the runtime and offline tools reuse. All banner state mutation flows
//! through [`engine::GachaEngine`]; rates, pools, and randomness are read
//! through the oracle traits in [`env`].
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod state;

pub use config::{ConfigError, FourStarUpRates, GachaConfig, RateTable};
pub use engine::{
    DrawResult, DrawSummary, GachaEngine, Rarity, UNKNOWN_ITEM, draw, draw_batch,
    five_star_probability, four_star_probability, resolve_rarity,
};
pub use env::{
    Env, FeaturedLists, GachaEnv, ItemPools, PcgRng, PoolOracle, PoolTag, RateOracle, RngOracle,
    compute_seed,
};
pub use error::{ErrorSeverity, GachaError};
pub use state::{BannerKind, BannerState, FiveStarRecord, StateError, UserRecord};
