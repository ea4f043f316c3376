//! Traits describing the read-only inputs of a draw.
//!
//! Oracles expose rate tables, item pools, and randomness. The [`Env`]
//! aggregate bundles them with the seed of the current draw stream so the
//! engine can access everything it needs without hard coupling to concrete
//! implementations.
mod pools;
mod rates;
mod rng;

pub use pools::{FeaturedLists, ItemPools, PoolOracle, PoolTag};
pub use rates::RateOracle;
pub use rng::{PcgRng, RngOracle, compute_seed};

/// Aggregates the oracles and stream seed a draw reads from.
pub struct Env<'a, R, P, G>
where
    R: RateOracle + ?Sized,
    P: PoolOracle + ?Sized,
    G: RngOracle + ?Sized,
{
    rates: &'a R,
    pools: &'a P,
    rng: &'a G,
    seed: u64,
}

impl<R, P, G> Clone for Env<'_, R, P, G>
where
    R: RateOracle + ?Sized,
    P: PoolOracle + ?Sized,
    G: RngOracle + ?Sized,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<R, P, G> Copy for Env<'_, R, P, G>
where
    R: RateOracle + ?Sized,
    P: PoolOracle + ?Sized,
    G: RngOracle + ?Sized,
{
}

pub type GachaEnv<'a> =
    Env<'a, dyn RateOracle + 'a, dyn PoolOracle + 'a, dyn RngOracle + 'a>;

impl<'a, R, P, G> Env<'a, R, P, G>
where
    R: RateOracle + ?Sized,
    P: PoolOracle + ?Sized,
    G: RngOracle + ?Sized,
{
    pub fn new(rates: &'a R, pools: &'a P, rng: &'a G, seed: u64) -> Self {
        Self {
            rates,
            pools,
            rng,
            seed,
        }
    }

    pub fn rates(&self) -> &'a R {
        self.rates
    }

    pub fn pools(&self) -> &'a P {
        self.pools
    }

    pub fn rng(&self) -> &'a G {
        self.rng
    }

    /// Seed of the draw stream. Individual decisions derive from it via [`compute_seed`].
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Same oracles, different stream seed.
    pub fn with_seed(self, seed: u64) -> Self {
        Self { seed, ..self }
    }
}

impl<'a, R, P, G> Env<'a, R, P, G>
where
    R: RateOracle + 'a,
    P: PoolOracle + 'a,
    G: RngOracle + 'a,
{
    /// Converts this environment into a trait-object based [`GachaEnv`].
    pub fn into_gacha_env(self) -> GachaEnv<'a> {
        let rates: &'a dyn RateOracle = self.rates;
        let pools: &'a dyn PoolOracle = self.pools;
        let rng: &'a dyn RngOracle = self.rng;
        Env::new(rates, pools, rng, self.seed)
    }
}
