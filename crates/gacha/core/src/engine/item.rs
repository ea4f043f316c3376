//! Item resolution once the rarity of a draw is known.

use super::{Rarity, UNKNOWN_ITEM, ctx};
use crate::env::{GachaEnv, PoolTag, compute_seed};
use crate::state::BannerKind;

/// Picks the pool a draw of `rarity` on `banner` lands in.
///
/// Four-stars ignore the banner: a fair coin chooses between the character
/// and weapon four-star pools, so both banners share one four-star universe.
pub(crate) fn resolve_pool(
    banner: BannerKind,
    rarity: Rarity,
    env: &GachaEnv<'_>,
    nonce: u64,
) -> PoolTag {
    match rarity {
        Rarity::Five => PoolTag::five_star(banner),
        Rarity::Four => {
            let seed = compute_seed(env.seed(), nonce, ctx::FOUR_STAR_POOL);
            if env.rng().chance(seed, 0.5) {
                PoolTag::Character4
            } else {
                PoolTag::Weapon4
            }
        }
        Rarity::Three => PoolTag::Weapon3,
    }
}

/// Resolves the item name of a draw.
///
/// With probability given by the up rate of `tag` the item comes from the
/// featured list of `tag` (when non-empty), otherwise uniformly from the
/// general pool. An empty general pool yields [`UNKNOWN_ITEM`].
pub(crate) fn resolve_item(tag: PoolTag, env: &GachaEnv<'_>, nonce: u64) -> String {
    let rng = env.rng();
    let featured = env.pools().featured(tag);

    if !featured.is_empty() {
        let seed = compute_seed(env.seed(), nonce, ctx::FEATURED);
        if rng.chance(seed, env.rates().up_rate(tag)) {
            let index = rng.index(compute_seed(env.seed(), nonce, ctx::ITEM), featured.len());
            return featured[index].clone();
        }
    }

    let pool = env.pools().pool(tag);
    if pool.is_empty() {
        return UNKNOWN_ITEM.to_owned();
    }
    let index = rng.index(compute_seed(env.seed(), nonce, ctx::ITEM), pool.len());
    pool[index].clone()
}
