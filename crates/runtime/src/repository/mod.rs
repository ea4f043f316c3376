//! Repository layer for per-user draw state.
//!
//! Repositories handle data that CHANGES as users draw: one
//! [`gacha_core::BannerState`] per user and banner. Static content (rates,
//! pools) is handled by oracles, not repositories.

mod error;
mod file;
mod memory;
mod traits;

pub use error::{RepositoryError, Result};
pub use file::FileStateRepository;
pub use memory::InMemoryStateRepo;
pub use traits::StateRepository;
