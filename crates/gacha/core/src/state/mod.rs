//! Per-user draw history.
//!
//! [`BannerState`] is the only data a draw mutates. One instance exists per
//! user and [`BannerKind`]; a [`UserRecord`] groups a user's banners and is
//! the unit hosts persist.

use crate::config::RateTable;
use crate::engine::Rarity;
use crate::error::{ErrorSeverity, GachaError};

/// Banner a draw is made on. Each banner keeps independent pity counters.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum BannerKind {
    #[default]
    Characters,
    Weapons,
}

impl BannerKind {
    pub const ALL: [BannerKind; 2] = [BannerKind::Characters, BannerKind::Weapons];
}

/// A five-star drop and the lifetime pull it happened on.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FiveStarRecord {
    pub item: String,
    pub at_pull: u64,
}

/// Pity counters and five-star log for one user on one banner.
///
/// Immediately after any draw, `five_pity < pity_5` and `four_pity < pity_4`
/// hold for the rate table the draw used.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BannerState {
    /// Lifetime draws on this banner. Never reset.
    pub pull_count: u64,
    /// Draws since the last five-star.
    pub five_pity: u32,
    /// Draws since the last four-star or five-star.
    pub four_pity: u32,
    /// Append-only, ordered by `at_pull`.
    pub five_star_history: Vec<FiveStarRecord>,
}

impl BannerState {
    /// Zero-valued state for a user who has never drawn.
    pub fn new() -> Self {
        Self::default()
    }

    /// Advances counters for a draw of `rarity` that produced `item`.
    pub fn record_draw(&mut self, rarity: Rarity, item: &str) {
        self.pull_count += 1;
        self.five_pity = self.five_pity.saturating_add(1);
        self.four_pity = self.four_pity.saturating_add(1);

        match rarity {
            Rarity::Five => {
                self.five_pity = 0;
                self.four_pity = 0;
                self.five_star_history.push(FiveStarRecord {
                    item: item.to_owned(),
                    at_pull: self.pull_count,
                });
            }
            Rarity::Four => self.four_pity = 0,
            Rarity::Three => {}
        }
    }

    /// Draws left until the five-star hard pity triggers, counting the guaranteed draw.
    pub fn pulls_until_five_star_pity(&self, rates: &RateTable) -> u32 {
        rates.pity_5.saturating_sub(self.five_pity)
    }

    /// Draws left until the four-star hard pity triggers, counting the guaranteed draw.
    pub fn pulls_until_four_star_pity(&self, rates: &RateTable) -> u32 {
        rates.pity_4.saturating_sub(self.four_pity)
    }

    /// Number of five-stars ever drawn on this banner.
    pub fn five_star_count(&self) -> usize {
        self.five_star_history.len()
    }

    /// Checks the post-draw pity invariant against `rates`.
    ///
    /// A violation means the stored record was corrupted or the thresholds
    /// were lowered after it was written. The engine still draws from such a
    /// state; the next draw forces the guaranteed rarity.
    pub fn check_invariant(&self, rates: &RateTable) -> Result<(), StateError> {
        if self.five_pity >= rates.pity_5 {
            return Err(StateError::FivePityOverflow {
                five_pity: self.five_pity,
                pity_5: rates.pity_5,
            });
        }
        if self.four_pity >= rates.pity_4 {
            return Err(StateError::FourPityOverflow {
                four_pity: self.four_pity,
                pity_4: rates.pity_4,
            });
        }
        Ok(())
    }
}

/// All banners of one user.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct UserRecord {
    pub characters: BannerState,
    pub weapons: BannerState,
}

impl UserRecord {
    pub fn banner(&self, kind: BannerKind) -> &BannerState {
        match kind {
            BannerKind::Characters => &self.characters,
            BannerKind::Weapons => &self.weapons,
        }
    }

    pub fn banner_mut(&mut self, kind: BannerKind) -> &mut BannerState {
        match kind {
            BannerKind::Characters => &mut self.characters,
            BannerKind::Weapons => &mut self.weapons,
        }
    }
}

/// Stored state that breaks the pity invariant.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StateError {
    #[error("five_pity {five_pity} already reached pity_5 {pity_5}")]
    FivePityOverflow { five_pity: u32, pity_5: u32 },

    #[error("four_pity {four_pity} already reached pity_4 {pity_4}")]
    FourPityOverflow { four_pity: u32, pity_4: u32 },
}

impl GachaError for StateError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Internal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::FivePityOverflow { .. } => "STATE_FIVE_PITY_OVERFLOW",
            Self::FourPityOverflow { .. } => "STATE_FOUR_PITY_OVERFLOW",
        }
    }
}
