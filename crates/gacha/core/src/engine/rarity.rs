//! Rarity resolution: hard pity, soft-pity ramp, probability bands.

use crate::config::RateTable;
use crate::state::BannerState;

/// Rarity tier of a drawn item.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Rarity {
    #[strum(serialize = "3-star")]
    Three,
    #[strum(serialize = "4-star")]
    Four,
    #[strum(serialize = "5-star")]
    Five,
}

impl Rarity {
    pub const fn stars(&self) -> u8 {
        match self {
            Rarity::Three => 3,
            Rarity::Four => 4,
            Rarity::Five => 5,
        }
    }
}

/// Effective five-star probability at `five_pity`, including soft pity.
pub fn five_star_probability(five_pity: u32, rates: &RateTable) -> f64 {
    ramp(
        rates.base_five_rate,
        five_pity,
        rates.soft_pity_5,
        rates.soft_pity_step,
    )
}

/// Effective four-star probability at `four_pity`, including soft pity.
pub fn four_star_probability(four_pity: u32, rates: &RateTable) -> f64 {
    ramp(
        rates.base_four_rate,
        four_pity,
        rates.soft_pity_4,
        rates.soft_pity_step,
    )
}

/// Linear ramp: `base + (pity - onset + 1) * step` from the onset, capped at 1.
fn ramp(base: f64, pity: u32, onset: u32, step: f64) -> f64 {
    if pity < onset {
        return base;
    }
    (base + f64::from(pity - onset + 1) * step).min(1.0)
}

/// Decides the rarity of the next draw from `state`.
///
/// Checked in strict order, five-star before four-star at every step:
/// 1. five-star hard pity (`five_pity >= pity_5 - 1`)
/// 2. four-star hard pity (`four_pity >= pity_4 - 1`)
/// 3. `roll < p5` is five-star, `roll < p5 + p4` is four-star, else three-star
///
/// `roll` must be uniform in `[0, 1)`; it is ignored when hard pity applies.
/// Counters already past their threshold (corrupted records) take the
/// hard-pity branch.
pub fn resolve_rarity(state: &BannerState, rates: &RateTable, roll: f64) -> Rarity {
    if state.five_pity >= rates.pity_5.saturating_sub(1) {
        return Rarity::Five;
    }
    if state.four_pity >= rates.pity_4.saturating_sub(1) {
        return Rarity::Four;
    }

    let p5 = five_star_probability(state.five_pity, rates);
    let p4 = four_star_probability(state.four_pity, rates);

    if roll < p5 {
        Rarity::Five
    } else if roll < p5 + p4 {
        Rarity::Four
    } else {
        Rarity::Three
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(five_pity: u32, four_pity: u32) -> BannerState {
        BannerState {
            five_pity,
            four_pity,
            ..BannerState::default()
        }
    }

    #[test]
    fn base_rate_below_soft_pity() {
        let rates = RateTable::characters();
        assert_eq!(five_star_probability(0, &rates), 0.006);
        assert_eq!(five_star_probability(72, &rates), 0.006);
        assert_eq!(four_star_probability(7, &rates), 0.051);
    }

    #[test]
    fn soft_pity_ramps_linearly_and_caps() {
        let rates = RateTable::characters();
        let at_onset = five_star_probability(73, &rates);
        assert!((at_onset - 0.106).abs() < 1e-12);
        let next = five_star_probability(74, &rates);
        assert!((next - 0.206).abs() < 1e-12);

        let mut steep = rates;
        steep.soft_pity_step = 0.6;
        assert_eq!(five_star_probability(75, &steep), 1.0);
    }

    #[test]
    fn five_star_probability_is_monotone_from_onset() {
        let rates = RateTable::weapons();
        let mut previous = five_star_probability(rates.soft_pity_5, &rates);
        for pity in rates.soft_pity_5..rates.pity_5 + 20 {
            let p = five_star_probability(pity, &rates);
            assert!(p >= previous);
            assert!(p <= 1.0);
            previous = p;
        }
    }

    #[test]
    fn hard_pity_ignores_roll() {
        let rates = RateTable::characters();
        for roll in [0.0, 0.5, 0.999_999] {
            assert_eq!(resolve_rarity(&state(79, 0), &rates, roll), Rarity::Five);
            assert_eq!(resolve_rarity(&state(10, 9), &rates, roll), Rarity::Four);
        }
    }

    #[test]
    fn five_star_pity_wins_over_four_star_pity() {
        let rates = RateTable::characters();
        assert_eq!(resolve_rarity(&state(79, 9), &rates, 0.99), Rarity::Five);
    }

    #[test]
    fn corrupted_counters_force_guaranteed_rarity() {
        let rates = RateTable::characters();
        assert_eq!(resolve_rarity(&state(200, 0), &rates, 0.99), Rarity::Five);
        assert_eq!(resolve_rarity(&state(0, 50), &rates, 0.99), Rarity::Four);
    }

    #[test]
    fn probability_bands() {
        let rates = RateTable::characters();
        let s = state(0, 0);
        assert_eq!(resolve_rarity(&s, &rates, 0.0), Rarity::Five);
        assert_eq!(resolve_rarity(&s, &rates, 0.0059), Rarity::Five);
        assert_eq!(resolve_rarity(&s, &rates, 0.006), Rarity::Four);
        assert_eq!(resolve_rarity(&s, &rates, 0.056), Rarity::Four);
        assert_eq!(resolve_rarity(&s, &rates, 0.06), Rarity::Three);
    }

    #[test]
    fn four_star_soft_pity_widens_band() {
        let rates = RateTable::characters();
        // four_pity 8: p4 = 0.051 + 0.1
        assert_eq!(resolve_rarity(&state(0, 8), &rates, 0.15), Rarity::Four);
        assert_eq!(resolve_rarity(&state(0, 7), &rates, 0.15), Rarity::Three);
    }
}
