//! RNG oracle for deterministic draws.
//!
//! Every random decision of a draw is derived from a seed rather than from a
//! shared generator, so a draw can be replayed from `(stream seed, pull
//! count, decision)` alone.
//!
//! # Determinism
//!
//! All RNG implementations must be deterministic: given the same seed,
//! they must produce the same value.

/// RNG oracle for deterministic random number generation.
pub trait RngOracle: Send + Sync {
    /// Generate a random u32 value from a seed.
    fn next_u32(&self, seed: u64) -> u32;

    /// Uniform value in `[0, 1)`.
    fn unit(&self, seed: u64) -> f64 {
        f64::from(self.next_u32(seed)) / 4_294_967_296.0
    }

    /// Returns true with probability `p`. `p <= 0` never hits, `p >= 1` always does.
    fn chance(&self, seed: u64, p: f64) -> bool {
        self.unit(seed) < p
    }

    /// Uniform index in `0..len`. Returns 0 for an empty range.
    fn index(&self, seed: u64, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        (self.next_u32(seed) as usize) % len
    }
}

/// PCG random number generator (Permuted Congruential Generator).
///
/// This implementation uses PCG-XSH-RR, which produces 32-bit output from
/// 64-bit state. The generator is stateless: the seed is the state.
///
/// # References
///
/// - PCG paper: <https://www.pcg-random.org/>
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    /// `state' = (state × multiplier + increment) mod 2^64`
    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// XSH-RR output permutation.
    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        Self::pcg_output(Self::pcg_step(seed))
    }
}

/// Compute the seed of one random decision.
///
/// # Arguments
///
/// * `stream_seed` - Seed of the draw stream (per user and banner, chosen by the host)
/// * `nonce` - Lifetime pull count of the banner at the time of the draw
/// * `context` - Which decision of the draw this is
///
/// Distinct `context` values give independent rolls within one draw; see
/// the `ctx` constants in the engine.
pub fn compute_seed(stream_seed: u64, nonce: u64, context: u32) -> u64 {
    // SplitMix64 / FxHash multipliers
    let mut hash = stream_seed;
    hash ^= nonce.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= u64::from(context).wrapping_mul(0x85ebca6b);

    // Final avalanche
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;

    hash
}
