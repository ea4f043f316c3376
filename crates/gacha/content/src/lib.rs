//! Data-driven gacha content and loaders.
//!
//! This crate reads the static inputs of a draw from disk:
//! - Banner rate tables (data-driven via TOML)
//! - Item pools and featured lists (data-driven via RON)
//!
//! Content is consumed by runtime oracles and never appears in user state.
//! All loaders produce gacha-core types; rates are validated before they are
//! handed out.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    ConfigLoader, ContentFactory, FourStarUpSpec, PoolLoader, RateTableSpec, RatesFile,
};
