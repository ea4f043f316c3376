//! Draw orchestration over oracles, repositories, and per-key locks.
//!
//! [`GachaService`] is the host-facing entry point. A draw session holds the
//! (user, banner) lock of its repository across load, draw, and save, so
//! concurrent requests for the same key serialize even when they come through
//! different services sharing one store. Other keys proceed in parallel.

use std::sync::Arc;

use sha2::{Digest, Sha256};

use gacha_core::{
    BannerKind, BannerState, DrawResult, DrawSummary, GachaEngine, GachaError, RateTable,
    UserRecord,
};

use crate::api::{Result, RuntimeError};
use crate::oracle::OracleManager;
use crate::repository::StateRepository;

/// Service configuration shared by every draw session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Largest accepted batch size.
    pub max_batch: usize,
    /// Mixed into every per-user stream seed.
    ///
    /// Defaults to 0. Items are a pure function of this seed, the user, the
    /// banner, and the stored pull count, so with the default every process
    /// replays the same items for the same records. Hosts that want draws to
    /// differ between deployments must set their own seed, as the `gacha`
    /// binary does from `GACHA_SEED` or the clock.
    pub base_seed: u64,
}

impl ServiceConfig {
    pub const DEFAULT_MAX_BATCH: usize = 100;
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            max_batch: Self::DEFAULT_MAX_BATCH,
            base_seed: 0,
        }
    }
}

/// Derive the RNG stream seed for one (user, banner).
///
/// Draws within the stream are separated by the pull count, so the same base
/// seed and stored state always reproduce the same items.
pub fn stream_seed(base_seed: u64, user: &str, banner: BannerKind) -> u64 {
    let mut hasher = Sha256::new();
    hasher.update(user.as_bytes());
    hasher.update([0u8]);
    hasher.update(banner.as_ref().as_bytes());
    let digest = hasher.finalize();

    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(bytes) ^ base_seed
}

/// Result of one draw session.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawOutcome {
    pub user: String,
    pub banner: BannerKind,
    pub results: Vec<DrawResult>,
    /// Lifetime pull count before this batch.
    pub pulls_before: u64,
    /// State persisted after this batch.
    pub state: BannerState,
}

impl DrawOutcome {
    pub fn summary(&self) -> DrawSummary {
        DrawSummary::from_results(&self.results)
    }
}

/// Host-facing draw service.
pub struct GachaService {
    config: ServiceConfig,
    oracles: OracleManager,
    repository: Arc<dyn StateRepository>,
}

impl GachaService {
    /// Create a new service builder
    pub fn builder() -> ServiceBuilder {
        ServiceBuilder::new()
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    pub fn oracles(&self) -> &OracleManager {
        &self.oracles
    }

    /// Rate table in effect for a banner
    pub fn rates(&self, banner: BannerKind) -> RateTable {
        self.oracles.rates(banner)
    }

    /// Draw `count` items for `user` on `banner` and persist the new state.
    ///
    /// Rejects `count` outside `1..=max_batch` before touching any state.
    pub async fn draw(&self, user: &str, banner: BannerKind, count: usize) -> Result<DrawOutcome> {
        if count == 0 || count > self.config.max_batch {
            return Err(RuntimeError::InvalidCount {
                count,
                max: self.config.max_batch,
            });
        }

        let _guard = self.repository.locks().acquire(user, banner).await;

        let mut state = self.repository.load(user, banner)?;
        let rates = self.oracles.rates(banner);
        if let Err(err) = state.check_invariant(&rates) {
            tracing::warn!(
                "Stored state for {}[{}] is inconsistent ({}): {}",
                user,
                banner,
                err.error_code(),
                err
            );
        }

        let pulls_before = state.pull_count;
        let seed = stream_seed(self.config.base_seed, user, banner);
        let env = self.oracles.as_gacha_env(seed);
        let results = GachaEngine::new(&mut state).draw_batch(banner, env, count);

        let unknown = results.iter().filter(|r| r.is_unknown()).count();
        if unknown > 0 {
            tracing::warn!(
                "{} of {} draws for {}[{}] landed in an empty pool",
                unknown,
                count,
                user,
                banner
            );
        }

        self.repository.save(user, banner, &state)?;

        let summary = DrawSummary::from_results(&results);
        tracing::info!(
            "{}[{}] drew {} (5★ {}, 4★ {}, 3★ {}); pulls {} -> {}",
            user,
            banner,
            count,
            summary.five_star,
            summary.four_star,
            summary.three_star,
            pulls_before,
            state.pull_count
        );

        Ok(DrawOutcome {
            user: user.to_owned(),
            banner,
            results,
            pulls_before,
            state,
        })
    }

    /// Read both banners of a user without drawing.
    pub fn stats(&self, user: &str) -> Result<UserRecord> {
        Ok(self.repository.load_user(user)?)
    }
}

/// Builder for [`GachaService`].
pub struct ServiceBuilder {
    config: ServiceConfig,
    oracles: Option<OracleManager>,
    repository: Option<Arc<dyn StateRepository>>,
}

impl ServiceBuilder {
    fn new() -> Self {
        Self {
            config: ServiceConfig::default(),
            oracles: None,
            repository: None,
        }
    }

    /// Override service configuration
    pub fn config(mut self, config: ServiceConfig) -> Self {
        self.config = config;
        self
    }

    /// Set required oracle manager
    pub fn oracles(mut self, oracles: OracleManager) -> Self {
        self.oracles = Some(oracles);
        self
    }

    /// Set required state repository
    pub fn repository(mut self, repository: impl StateRepository + 'static) -> Self {
        self.repository = Some(Arc::new(repository));
        self
    }

    /// Share an existing repository with the service
    pub fn shared_repository(mut self, repository: Arc<dyn StateRepository>) -> Self {
        self.repository = Some(repository);
        self
    }

    pub fn base_seed(mut self, seed: u64) -> Self {
        self.config.base_seed = seed;
        self
    }

    pub fn max_batch(mut self, max_batch: usize) -> Self {
        self.config.max_batch = max_batch;
        self
    }

    /// Build the service
    pub fn build(self) -> Result<GachaService> {
        let oracles = self.oracles.ok_or(RuntimeError::MissingOracles)?;
        let repository = self.repository.ok_or(RuntimeError::MissingRepository)?;

        tracing::debug!(
            "Gacha service ready (max_batch {}, base_seed {:#x})",
            self.config.max_batch,
            self.config.base_seed
        );

        Ok(GachaService {
            config: self.config,
            oracles,
            repository,
        })
    }
}
