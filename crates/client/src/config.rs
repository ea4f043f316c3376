//! Client configuration structures and loaders.
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result, anyhow, bail};

use gacha_core::BannerKind;
use gacha_runtime::ServiceConfig;

/// Configuration required to run draws from the command line.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Directory holding `config.toml` and `pools.ron`.
    pub data_dir: PathBuf,
    /// Directory holding `user.json`.
    pub save_dir: PathBuf,
    pub service: ServiceConfig,
}

impl ClientConfig {
    pub const DEFAULT_DATA_DIR: &'static str = "crates/gacha/content/data";

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `GACHA_DATA_DIR` - Rate and pool content directory (default: `crates/gacha/content/data`)
    /// - `GACHA_SAVE_DIR` - Directory for `user.json` (default: platform-specific)
    /// - `GACHA_SEED` - Base RNG seed (default: derived from the system clock)
    /// - `GACHA_MAX_BATCH` - Largest draw count per request (default: 100)
    pub fn from_env() -> Self {
        let data_dir = env::var("GACHA_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(Self::DEFAULT_DATA_DIR));

        let save_dir = env::var("GACHA_SAVE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_save_dir());

        let mut service = ServiceConfig {
            base_seed: read_env::<u64>("GACHA_SEED").unwrap_or_else(clock_seed),
            ..ServiceConfig::default()
        };
        if let Some(max_batch) = read_env::<usize>("GACHA_MAX_BATCH") {
            service.max_batch = max_batch.max(1);
        }

        Self {
            data_dir,
            save_dir,
            service,
        }
    }
}

/// Positional command-line arguments: `<user> [characters|weapons] [count]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DrawArgs {
    pub user: String,
    pub banner: BannerKind,
    pub count: usize,
}

impl DrawArgs {
    pub const DEFAULT_COUNT: usize = 10;
    pub const USAGE: &'static str = "usage: gacha <user> [characters|weapons] [count]";

    /// Parse arguments, excluding the program name.
    pub fn parse<I>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();

        let Some(user) = args.next() else {
            bail!(Self::USAGE);
        };

        let banner = match args.next() {
            Some(raw) => BannerKind::from_str(&raw)
                .map_err(|_| anyhow!("unknown banner '{}'\n{}", raw, Self::USAGE))?,
            None => BannerKind::default(),
        };

        let count = match args.next() {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("invalid count '{}'\n{}", raw, Self::USAGE))?,
            None => Self::DEFAULT_COUNT,
        };

        if let Some(extra) = args.next() {
            bail!("unexpected argument '{}'\n{}", extra, Self::USAGE);
        }

        Ok(Self {
            user,
            banner,
            count,
        })
    }
}

/// Platform-specific data directory for gacha records.
///
/// - Linux: `~/.local/share/gacha` (or `$XDG_DATA_HOME/gacha`)
/// - macOS: `~/Library/Application Support/gacha`
/// - Fallback: `./save_data`
fn default_save_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "gacha")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("./save_data"))
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: FromStr,
{
    env::var(key).ok()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(raw: &[&str]) -> Result<DrawArgs> {
        DrawArgs::parse(raw.iter().map(|s| s.to_string()))
    }

    #[test]
    fn user_only_defaults_to_ten_character_draws() {
        assert_eq!(
            args(&["1001"]).unwrap(),
            DrawArgs {
                user: "1001".into(),
                banner: BannerKind::Characters,
                count: 10,
            }
        );
    }

    #[test]
    fn banner_and_count_are_parsed() {
        let parsed = args(&["1001", "Weapons", "1"]).unwrap();
        assert_eq!(parsed.banner, BannerKind::Weapons);
        assert_eq!(parsed.count, 1);
    }

    #[test]
    fn bad_arguments_are_rejected() {
        assert!(args(&[]).is_err());
        assert!(args(&["1001", "standard"]).is_err());
        assert!(args(&["1001", "weapons", "ten"]).is_err());
        assert!(args(&["1001", "weapons", "10", "extra"]).is_err());
    }
}
