//! Gacha client binary.
//!
//! Composition root: loads content, opens the record store, runs one batch
//! draw for the user given on the command line, and prints the results
//! followed by the user's stats on both banners.
//!
//! # Examples
//!
//! ```bash
//! # Ten character draws for user 1001
//! cargo run -p gacha-client -- 1001
//!
//! # A single weapon draw with a fixed seed
//! GACHA_SEED=7 cargo run -p gacha-client -- 1001 weapons 1
//! ```
mod config;
mod report;

use anyhow::Result;

use gacha_content::ContentFactory;
use gacha_runtime::{FileStateRepository, GachaService, OracleManager};

use crate::config::{ClientConfig, DrawArgs};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = DrawArgs::parse(std::env::args().skip(1))?;
    let config = ClientConfig::from_env();

    tracing::debug!("Content directory: {}", config.data_dir.display());
    tracing::debug!("Save directory: {}", config.save_dir.display());

    let content = ContentFactory::new(&config.data_dir);
    let oracles = OracleManager::new(content.load_config()?, content.load_pools()?);

    let service = GachaService::builder()
        .config(config.service.clone())
        .oracles(oracles)
        .repository(FileStateRepository::new(&config.save_dir))
        .build()?;

    let outcome = service.draw(&args.user, args.banner, args.count).await?;
    println!("{}", report::render_outcome(&outcome));

    let record = service.stats(&args.user)?;
    println!();
    println!(
        "{}",
        report::render_stats(&record, |banner| service.rates(banner))
    );

    Ok(())
}
