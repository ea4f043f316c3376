//! Banner rate configuration loader.

use std::path::Path;

use gacha_core::{BannerKind, FourStarUpRates, GachaConfig, RateTable};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// One banner's table as written in `config.toml`. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RateTableSpec {
    pub base_five_rate: Option<f64>,
    pub base_four_rate: Option<f64>,
    pub pity_5: Option<u32>,
    pub pity_4: Option<u32>,
    pub soft_pity_5: Option<u32>,
    pub soft_pity_4: Option<u32>,
    pub up_five_rate: Option<f64>,
    pub soft_pity_step: Option<f64>,
}

impl RateTableSpec {
    /// Fills missing keys from `banner`'s defaults.
    pub fn resolve(&self, banner: BannerKind) -> RateTable {
        let defaults = RateTable::defaults_for(banner);
        RateTable {
            base_five_rate: self.base_five_rate.unwrap_or(defaults.base_five_rate),
            base_four_rate: self.base_four_rate.unwrap_or(defaults.base_four_rate),
            pity_5: self.pity_5.unwrap_or(defaults.pity_5),
            pity_4: self.pity_4.unwrap_or(defaults.pity_4),
            soft_pity_5: self.soft_pity_5.unwrap_or(defaults.soft_pity_5),
            soft_pity_4: self.soft_pity_4.unwrap_or(defaults.soft_pity_4),
            up_five_rate: self.up_five_rate.unwrap_or(defaults.up_five_rate),
            soft_pity_step: self.soft_pity_step.unwrap_or(defaults.soft_pity_step),
        }
    }
}

/// The `[four_star_up]` table: featured odds of the shared four-star pools.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FourStarUpSpec {
    pub character_4: Option<f64>,
    pub weapon_4: Option<f64>,
}

impl FourStarUpSpec {
    pub fn resolve(&self) -> FourStarUpRates {
        let defaults = FourStarUpRates::default();
        FourStarUpRates::new(
            self.character_4.unwrap_or(defaults.character_4),
            self.weapon_4.unwrap_or(defaults.weapon_4),
        )
    }
}

/// Layout of `config.toml`: one optional table per banner plus the
/// four-star pool odds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RatesFile {
    pub characters: RateTableSpec,
    pub weapons: RateTableSpec,
    pub four_star_up: FourStarUpSpec,
}

impl RatesFile {
    /// Resolves defaults and validates the result.
    pub fn into_config(self) -> LoadResult<GachaConfig> {
        let config = GachaConfig::new(
            self.characters.resolve(BannerKind::Characters),
            self.weapons.resolve(BannerKind::Weapons),
            self.four_star_up.resolve(),
        );
        config
            .validate()
            .map_err(|e| anyhow::anyhow!("Invalid rate configuration: {}", e))?;
        Ok(config)
    }
}

/// Loader for banner rates from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load and validate rates from a TOML file.
    ///
    /// Missing tables or keys take the banner defaults. Unknown keys and
    /// out-of-range values are errors.
    pub fn load(path: &Path) -> LoadResult<GachaConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse and validate rates from TOML text.
    pub fn parse(content: &str) -> LoadResult<GachaConfig> {
        let file: RatesFile = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;
        file.into_config()
    }
}
