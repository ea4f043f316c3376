//! Rate tables and the per-banner configuration bundle.
//!
//! Rates are immutable inputs to the engine. They are validated once when
//! loaded, never looked up or checked per draw.

use crate::env::PoolTag;
use crate::error::{ErrorSeverity, GachaError};
use crate::state::BannerKind;

/// Probability parameters for one banner.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RateTable {
    /// Base five-star probability before soft pity.
    pub base_five_rate: f64,
    /// Base four-star probability before soft pity.
    pub base_four_rate: f64,
    /// Hard pity: the `pity_5`-th draw without a five-star is guaranteed one.
    pub pity_5: u32,
    /// Hard pity: the `pity_4`-th draw without a four-star-or-better is guaranteed one.
    pub pity_4: u32,
    /// Five-star pity count at which the soft-pity ramp starts.
    pub soft_pity_5: u32,
    /// Four-star pity count at which the soft-pity ramp starts.
    pub soft_pity_4: u32,
    /// Chance that a five-star is taken from the banner's featured list.
    pub up_five_rate: f64,
    /// Probability added per draw past the soft-pity onset.
    pub soft_pity_step: f64,
}

impl RateTable {
    pub const DEFAULT_PITY_5: u32 = 80;
    pub const DEFAULT_PITY_4: u32 = 10;
    pub const DEFAULT_SOFT_PITY_5: u32 = 73;
    pub const DEFAULT_SOFT_PITY_4: u32 = 8;
    pub const DEFAULT_SOFT_PITY_STEP: f64 = 0.1;

    /// Defaults for the character banner.
    pub const fn characters() -> Self {
        Self {
            base_five_rate: 0.006,
            base_four_rate: 0.051,
            pity_5: Self::DEFAULT_PITY_5,
            pity_4: Self::DEFAULT_PITY_4,
            soft_pity_5: Self::DEFAULT_SOFT_PITY_5,
            soft_pity_4: Self::DEFAULT_SOFT_PITY_4,
            up_five_rate: 0.5,
            soft_pity_step: Self::DEFAULT_SOFT_PITY_STEP,
        }
    }

    /// Defaults for the weapon banner.
    pub const fn weapons() -> Self {
        Self {
            base_five_rate: 0.007,
            base_four_rate: 0.06,
            pity_5: Self::DEFAULT_PITY_5,
            pity_4: Self::DEFAULT_PITY_4,
            soft_pity_5: Self::DEFAULT_SOFT_PITY_5,
            soft_pity_4: Self::DEFAULT_SOFT_PITY_4,
            up_five_rate: 0.75,
            soft_pity_step: Self::DEFAULT_SOFT_PITY_STEP,
        }
    }

    /// Defaults for the given banner.
    pub const fn defaults_for(banner: BannerKind) -> Self {
        match banner {
            BannerKind::Characters => Self::characters(),
            BannerKind::Weapons => Self::weapons(),
        }
    }

    /// Checks that thresholds and probabilities are usable by the engine.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found, tagged with `banner`.
    pub fn validate(&self, banner: BannerKind) -> Result<(), ConfigError> {
        for (field, value) in [("pity_5", self.pity_5), ("pity_4", self.pity_4)] {
            if value == 0 {
                return Err(ConfigError::ZeroThreshold { banner, field });
            }
        }

        for (field, soft, hard) in [
            ("soft_pity_5", self.soft_pity_5, self.pity_5),
            ("soft_pity_4", self.soft_pity_4, self.pity_4),
        ] {
            if soft >= hard {
                return Err(ConfigError::SoftPityNotBelowHard {
                    banner,
                    field,
                    soft,
                    hard,
                });
            }
        }

        for (field, value) in [
            ("base_five_rate", self.base_five_rate),
            ("base_four_rate", self.base_four_rate),
            ("up_five_rate", self.up_five_rate),
            ("soft_pity_step", self.soft_pity_step),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::ProbabilityOutOfRange {
                    banner,
                    field,
                    value,
                });
            }
        }

        let total = self.base_five_rate + self.base_four_rate;
        if total > 1.0 {
            return Err(ConfigError::BaseRatesExceedOne { banner, total });
        }

        Ok(())
    }
}

/// Featured-item odds of the two four-star pools.
///
/// Four-star pools are shared by every banner, so their odds belong to the
/// pool rather than to the banner being drawn.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FourStarUpRates {
    pub character_4: f64,
    pub weapon_4: f64,
}

impl FourStarUpRates {
    pub const DEFAULT_UP_RATE: f64 = 0.5;

    pub const fn new(character_4: f64, weapon_4: f64) -> Self {
        Self {
            character_4,
            weapon_4,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (pool, value) in [
            (PoolTag::Character4, self.character_4),
            (PoolTag::Weapon4, self.weapon_4),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::UpRateOutOfRange { pool, value });
            }
        }
        Ok(())
    }
}

impl Default for FourStarUpRates {
    fn default() -> Self {
        Self::new(Self::DEFAULT_UP_RATE, Self::DEFAULT_UP_RATE)
    }
}

/// Rate tables for every banner plus the shared four-star odds.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GachaConfig {
    pub characters: RateTable,
    pub weapons: RateTable,
    pub four_star_up: FourStarUpRates,
}

impl GachaConfig {
    pub const fn new(
        characters: RateTable,
        weapons: RateTable,
        four_star_up: FourStarUpRates,
    ) -> Self {
        Self {
            characters,
            weapons,
            four_star_up,
        }
    }

    /// Chance that a draw landing in `pool` takes its featured list.
    ///
    /// Five-star pools use their banner's `up_five_rate`; the three-star
    /// pool has no featured list.
    pub const fn up_rate(&self, pool: PoolTag) -> f64 {
        match pool {
            PoolTag::Character5 => self.characters.up_five_rate,
            PoolTag::Weapon5 => self.weapons.up_five_rate,
            PoolTag::Character4 => self.four_star_up.character_4,
            PoolTag::Weapon4 => self.four_star_up.weapon_4,
            PoolTag::Weapon3 => 0.0,
        }
    }

    /// Returns the rate table of the given banner.
    pub const fn rates(&self, banner: BannerKind) -> &RateTable {
        match banner {
            BannerKind::Characters => &self.characters,
            BannerKind::Weapons => &self.weapons,
        }
    }

    /// Validates every banner's rate table.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.characters.validate(BannerKind::Characters)?;
        self.weapons.validate(BannerKind::Weapons)?;
        self.four_star_up.validate()
    }
}

impl Default for GachaConfig {
    fn default() -> Self {
        Self::new(
            RateTable::characters(),
            RateTable::weapons(),
            FourStarUpRates::default(),
        )
    }
}

/// Rejected rate configuration.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("{banner}: {field} must be greater than zero")]
    ZeroThreshold {
        banner: BannerKind,
        field: &'static str,
    },

    #[error("{banner}: {field} ({soft}) must be below its hard pity ({hard})")]
    SoftPityNotBelowHard {
        banner: BannerKind,
        field: &'static str,
        soft: u32,
        hard: u32,
    },

    #[error("{banner}: {field} ({value}) must be within [0, 1]")]
    ProbabilityOutOfRange {
        banner: BannerKind,
        field: &'static str,
        value: f64,
    },

    #[error("{banner}: base five-star and four-star rates sum to {total}, above 1")]
    BaseRatesExceedOne { banner: BannerKind, total: f64 },

    #[error("four_star_up: {pool} ({value}) must be within [0, 1]")]
    UpRateOutOfRange { pool: PoolTag, value: f64 },
}

impl GachaError for ConfigError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::ZeroThreshold { .. } => "CONFIG_ZERO_THRESHOLD",
            Self::SoftPityNotBelowHard { .. } => "CONFIG_SOFT_PITY_NOT_BELOW_HARD",
            Self::ProbabilityOutOfRange { .. } => "CONFIG_PROBABILITY_OUT_OF_RANGE",
            Self::BaseRatesExceedOne { .. } => "CONFIG_BASE_RATES_EXCEED_ONE",
            Self::UpRateOutOfRange { .. } => "CONFIG_UP_RATE_OUT_OF_RANGE",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(GachaConfig::default().validate(), Ok(()));
    }

    #[test]
    fn banner_defaults_differ_in_base_and_up_rates() {
        let config = GachaConfig::default();
        assert_eq!(config.rates(BannerKind::Characters).base_five_rate, 0.006);
        assert_eq!(config.rates(BannerKind::Weapons).base_four_rate, 0.06);
        assert_eq!(config.rates(BannerKind::Weapons).up_five_rate, 0.75);
        assert_eq!(config.rates(BannerKind::Characters).pity_5, 80);
    }

    #[test]
    fn up_rate_is_keyed_by_pool() {
        let mut config = GachaConfig::default();
        config.four_star_up = FourStarUpRates::new(0.25, 0.9);

        assert_eq!(config.up_rate(PoolTag::Character5), 0.5);
        assert_eq!(config.up_rate(PoolTag::Weapon5), 0.75);
        assert_eq!(config.up_rate(PoolTag::Character4), 0.25);
        assert_eq!(config.up_rate(PoolTag::Weapon4), 0.9);
        assert_eq!(config.up_rate(PoolTag::Weapon3), 0.0);
    }

    #[test]
    fn rejects_four_star_up_rate_out_of_range() {
        let mut config = GachaConfig::default();
        config.four_star_up.weapon_4 = -0.1;

        let err = config.validate().unwrap_err();
        assert_eq!(
            err,
            ConfigError::UpRateOutOfRange {
                pool: PoolTag::Weapon4,
                value: -0.1
            }
        );
        assert!(err.to_string().contains("weapon_4"));
    }

    #[test]
    fn rejects_soft_pity_at_threshold() {
        let mut rates = RateTable::characters();
        rates.soft_pity_4 = rates.pity_4;
        let err = rates.validate(BannerKind::Characters).unwrap_err();
        assert_eq!(err.error_code(), "CONFIG_SOFT_PITY_NOT_BELOW_HARD");
    }

    #[test]
    fn rejects_zero_threshold_and_nan() {
        let mut rates = RateTable::weapons();
        rates.pity_5 = 0;
        assert!(matches!(
            rates.validate(BannerKind::Weapons),
            Err(ConfigError::ZeroThreshold { field: "pity_5", .. })
        ));

        let mut rates = RateTable::weapons();
        rates.up_five_rate = f64::NAN;
        assert!(matches!(
            rates.validate(BannerKind::Weapons),
            Err(ConfigError::ProbabilityOutOfRange { field: "up_five_rate", .. })
        ));
    }

    #[test]
    fn rejects_base_rates_above_one() {
        let mut rates = RateTable::characters();
        rates.base_five_rate = 0.6;
        rates.base_four_rate = 0.5;
        let err = rates.validate(BannerKind::Characters).unwrap_err();
        assert_eq!(err.severity(), ErrorSeverity::Validation);
        assert!(err.to_string().starts_with("characters:"));
    }
}
