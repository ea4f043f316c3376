use crate::state::BannerKind;

/// Read access to item pools and featured ("up") lists.
pub trait PoolOracle: Send + Sync {
    /// Items of the general pool for `tag`. Empty when the pool is missing.
    fn pool(&self, tag: PoolTag) -> &[String];

    /// Featured items for `tag`. Empty when nothing is featured.
    fn featured(&self, tag: PoolTag) -> &[String];
}

/// Named item pool.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PoolTag {
    #[strum(serialize = "character_5")]
    #[cfg_attr(feature = "serde", serde(rename = "character_5"))]
    Character5,
    #[strum(serialize = "character_4")]
    #[cfg_attr(feature = "serde", serde(rename = "character_4"))]
    Character4,
    #[strum(serialize = "weapon_5")]
    #[cfg_attr(feature = "serde", serde(rename = "weapon_5"))]
    Weapon5,
    #[strum(serialize = "weapon_4")]
    #[cfg_attr(feature = "serde", serde(rename = "weapon_4"))]
    Weapon4,
    /// Filler pool shared by every banner.
    #[strum(serialize = "weapon_3")]
    #[cfg_attr(feature = "serde", serde(rename = "weapon_3"))]
    Weapon3,
}

impl PoolTag {
    pub const ALL: [PoolTag; 5] = [
        PoolTag::Character5,
        PoolTag::Character4,
        PoolTag::Weapon5,
        PoolTag::Weapon4,
        PoolTag::Weapon3,
    ];

    /// Five-star pool of a banner.
    pub const fn five_star(banner: BannerKind) -> Self {
        match banner {
            BannerKind::Characters => PoolTag::Character5,
            BannerKind::Weapons => PoolTag::Weapon5,
        }
    }
}

/// Featured items per tier. The three-star tier has no featured list.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FeaturedLists {
    pub character_5: Vec<String>,
    pub character_4: Vec<String>,
    pub weapon_5: Vec<String>,
    pub weapon_4: Vec<String>,
}

/// Every item pool plus the featured lists supplied alongside them.
///
/// Featured lists and general pools are independent inputs. An item listed
/// in both is reachable through both branches; nothing is deduplicated.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ItemPools {
    pub character_5: Vec<String>,
    pub character_4: Vec<String>,
    pub weapon_5: Vec<String>,
    pub weapon_4: Vec<String>,
    pub weapon_3: Vec<String>,
    pub featured: FeaturedLists,
}

impl ItemPools {
    /// Tags whose general pool is empty. Draws landing there yield the unknown item.
    pub fn empty_pools(&self) -> Vec<PoolTag> {
        PoolTag::ALL
            .into_iter()
            .filter(|tag| self.pool(*tag).is_empty())
            .collect()
    }
}

impl PoolOracle for ItemPools {
    fn pool(&self, tag: PoolTag) -> &[String] {
        match tag {
            PoolTag::Character5 => &self.character_5,
            PoolTag::Character4 => &self.character_4,
            PoolTag::Weapon5 => &self.weapon_5,
            PoolTag::Weapon4 => &self.weapon_4,
            PoolTag::Weapon3 => &self.weapon_3,
        }
    }

    fn featured(&self, tag: PoolTag) -> &[String] {
        match tag {
            PoolTag::Character5 => &self.featured.character_5,
            PoolTag::Character4 => &self.featured.character_4,
            PoolTag::Weapon5 => &self.featured.weapon_5,
            PoolTag::Weapon4 => &self.featured.weapon_4,
            PoolTag::Weapon3 => &[],
        }
    }
}
