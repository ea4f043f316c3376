//! Draw pipeline.
//!
//! The [`GachaEngine`] is the authoritative reducer for [`BannerState`]. A
//! draw resolves the rarity, then the pool and item, then advances the
//! counters. The engine is total: missing pool data degrades to
//! [`UNKNOWN_ITEM`] instead of failing.

mod item;
mod rarity;

pub use rarity::{Rarity, five_star_probability, four_star_probability, resolve_rarity};

use crate::env::{GachaEnv, compute_seed};
use crate::state::{BannerKind, BannerState};

/// Item name returned when the resolved pool is empty or absent.
pub const UNKNOWN_ITEM: &str = "unknown";

/// Seed contexts of the independent random decisions within one draw.
pub(crate) mod ctx {
    pub const RARITY: u32 = 0;
    pub const FOUR_STAR_POOL: u32 = 1;
    pub const FEATURED: u32 = 2;
    pub const ITEM: u32 = 3;
}

/// Outcome of a single draw.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DrawResult {
    pub item: String,
    pub rarity: Rarity,
}

impl DrawResult {
    /// True when the pool for this draw was empty.
    pub fn is_unknown(&self) -> bool {
        self.item == UNKNOWN_ITEM
    }
}

/// Draw engine bound to one banner state.
///
/// Every draw reads the stream seed from the environment and the lifetime
/// pull count from the state, so replaying the same state with the same
/// seed yields the same items.
pub struct GachaEngine<'a> {
    state: &'a mut BannerState,
}

impl<'a> GachaEngine<'a> {
    /// Creates a new engine over the given state.
    pub fn new(state: &'a mut BannerState) -> Self {
        Self { state }
    }

    /// Performs one draw on `banner` and advances the state.
    pub fn draw(&mut self, banner: BannerKind, env: GachaEnv<'_>) -> DrawResult {
        let rates = env.rates().rates(banner);
        let nonce = self.state.pull_count;

        let roll = env
            .rng()
            .unit(compute_seed(env.seed(), nonce, ctx::RARITY));
        let rarity = resolve_rarity(self.state, &rates, roll);

        let tag = item::resolve_pool(banner, rarity, &env, nonce);
        let item = item::resolve_item(tag, &env, nonce);

        self.state.record_draw(rarity, &item);

        DrawResult { item, rarity }
    }

    /// Performs `count` sequential draws, each on the state left by the previous one.
    ///
    /// `count == 0` returns an empty list and leaves the state untouched.
    pub fn draw_batch(
        &mut self,
        banner: BannerKind,
        env: GachaEnv<'_>,
        count: usize,
    ) -> Vec<DrawResult> {
        (0..count).map(|_| self.draw(banner, env)).collect()
    }
}

/// Value-in, value-out form of [`GachaEngine::draw`].
pub fn draw(
    mut state: BannerState,
    banner: BannerKind,
    env: GachaEnv<'_>,
) -> (DrawResult, BannerState) {
    let result = GachaEngine::new(&mut state).draw(banner, env);
    (result, state)
}

/// Value-in, value-out form of [`GachaEngine::draw_batch`].
pub fn draw_batch(
    mut state: BannerState,
    banner: BannerKind,
    env: GachaEnv<'_>,
    count: usize,
) -> (Vec<DrawResult>, BannerState) {
    let results = GachaEngine::new(&mut state).draw_batch(banner, env, count);
    (results, state)
}

/// Per-rarity tally of a batch.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DrawSummary {
    pub three_star: usize,
    pub four_star: usize,
    pub five_star: usize,
    /// Draws that resolved to [`UNKNOWN_ITEM`].
    pub unknown: usize,
}

impl DrawSummary {
    pub fn from_results(results: &[DrawResult]) -> Self {
        results.iter().fold(Self::default(), |mut summary, result| {
            match result.rarity {
                Rarity::Three => summary.three_star += 1,
                Rarity::Four => summary.four_star += 1,
                Rarity::Five => summary.five_star += 1,
            }
            if result.is_unknown() {
                summary.unknown += 1;
            }
            summary
        })
    }

    pub fn total(&self) -> usize {
        self.three_star + self.four_star + self.five_star
    }
}
