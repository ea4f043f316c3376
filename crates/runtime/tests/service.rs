//! Draw sessions through the full service stack.

use std::sync::Arc;

use gacha_content::ContentFactory;
use gacha_core::{BannerKind, GachaConfig, ItemPools, Rarity, UNKNOWN_ITEM};
use gacha_runtime::{
    FileStateRepository, GachaService, InMemoryStateRepo, OracleManager, RuntimeError,
    StateRepository,
};
use tempfile::TempDir;

fn pools() -> ItemPools {
    let names = |items: &[&str]| items.iter().map(|s| s.to_string()).collect::<Vec<_>>();
    let mut pools = ItemPools {
        character_5: names(&["Verina", "Encore", "Calcharo"]),
        character_4: names(&["Sanhua", "Baizhi", "Chixia"]),
        weapon_5: names(&["Static Mist", "Abyss Surges"]),
        weapon_4: names(&["Comet Flare", "Variation"]),
        weapon_3: names(&["Training Blade", "Tyro Sword"]),
        ..ItemPools::default()
    };
    pools.featured.character_5 = names(&["Jiyan"]);
    pools.featured.weapon_5 = names(&["Verdant Summit"]);
    pools
}

fn memory_service(seed: u64) -> GachaService {
    GachaService::builder()
        .oracles(OracleManager::new(GachaConfig::default(), pools()))
        .repository(InMemoryStateRepo::new())
        .base_seed(seed)
        .build()
        .unwrap()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_batches_on_one_banner_are_serialized() {
    let service = Arc::new(memory_service(11));

    let tasks: Vec<_> = (0..8)
        .map(|_| {
            let service = Arc::clone(&service);
            tokio::spawn(async move { service.draw("1001", BannerKind::Characters, 10).await })
        })
        .collect();

    let mut pulls_before = Vec::new();
    for task in tasks {
        let outcome = task.await.unwrap().unwrap();
        assert_eq!(outcome.results.len(), 10);
        pulls_before.push(outcome.pulls_before);
    }
    pulls_before.sort_unstable();
    assert_eq!(pulls_before, (0..8).map(|i| i * 10).collect::<Vec<u64>>());

    let state = service.stats("1001").unwrap().characters;
    assert_eq!(state.pull_count, 80);
    assert!(
        state
            .five_star_history
            .windows(2)
            .all(|w| w[0].at_pull < w[1].at_pull)
    );

    // Interleaving does not change the outcome: the stream is indexed by pull count.
    let sequential = memory_service(11);
    for _ in 0..8 {
        sequential
            .draw("1001", BannerKind::Characters, 10)
            .await
            .unwrap();
    }
    assert_eq!(sequential.stats("1001").unwrap().characters, state);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_banners_of_one_user_both_persist() {
    let service = Arc::new(memory_service(3));

    let characters = {
        let service = Arc::clone(&service);
        tokio::spawn(async move {
            for _ in 0..5 {
                service
                    .draw("1001", BannerKind::Characters, 10)
                    .await
                    .unwrap();
            }
        })
    };
    let weapons = {
        let service = Arc::clone(&service);
        tokio::spawn(async move {
            for _ in 0..5 {
                service.draw("1001", BannerKind::Weapons, 7).await.unwrap();
            }
        })
    };
    characters.await.unwrap();
    weapons.await.unwrap();

    let record = service.stats("1001").unwrap();
    assert_eq!(record.characters.pull_count, 50);
    assert_eq!(record.weapons.pull_count, 35);
}

fn service_on(repository: Arc<dyn StateRepository>, seed: u64) -> GachaService {
    GachaService::builder()
        .oracles(OracleManager::new(GachaConfig::default(), pools()))
        .shared_repository(repository)
        .base_seed(seed)
        .build()
        .unwrap()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn services_sharing_a_repository_do_not_lose_updates() {
    let repo: Arc<dyn StateRepository> = Arc::new(InMemoryStateRepo::new());
    let services = [
        Arc::new(service_on(Arc::clone(&repo), 5)),
        Arc::new(service_on(Arc::clone(&repo), 5)),
    ];

    let tasks: Vec<_> = (0..16)
        .map(|i| {
            let service = Arc::clone(&services[i % 2]);
            tokio::spawn(async move { service.draw("1001", BannerKind::Characters, 10).await })
        })
        .collect();

    let mut pulls_before = Vec::new();
    for task in tasks {
        pulls_before.push(task.await.unwrap().unwrap().pulls_before);
    }
    pulls_before.sort_unstable();
    assert_eq!(pulls_before, (0..16).map(|i| i * 10).collect::<Vec<u64>>());

    let state = repo.load("1001", BannerKind::Characters).unwrap();
    assert_eq!(state.pull_count, 160);
    assert!(repo.locks().is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn file_repositories_on_one_path_do_not_lose_updates() {
    let save_dir = TempDir::new().unwrap();
    let open = || -> Arc<GachaService> {
        Arc::new(service_on(
            Arc::new(FileStateRepository::new(save_dir.path())),
            8,
        ))
    };
    let services = [open(), open()];

    let tasks: Vec<_> = (0..12)
        .map(|i| {
            let service = Arc::clone(&services[i % 2]);
            let banner = if i % 3 == 0 {
                BannerKind::Weapons
            } else {
                BannerKind::Characters
            };
            tokio::spawn(async move { service.draw("1001", banner, 5).await })
        })
        .collect();
    for task in tasks {
        task.await.unwrap().unwrap();
    }

    let reopened = FileStateRepository::new(save_dir.path());
    let record = reopened.load_user("1001").unwrap();
    assert_eq!(record.weapons.pull_count, 20);
    assert_eq!(record.characters.pull_count, 40);
}

#[tokio::test]
async fn default_seed_replays_across_restarts() {
    let build = || {
        GachaService::builder()
            .oracles(OracleManager::new(GachaConfig::default(), pools()))
            .repository(InMemoryStateRepo::new())
            .build()
            .unwrap()
    };

    let first = build();
    assert_eq!(first.config().base_seed, 0);
    let a = first.draw("9", BannerKind::Characters, 30).await.unwrap();
    let b = build().draw("9", BannerKind::Characters, 30).await.unwrap();
    assert_eq!(a.results, b.results);
}

#[tokio::test]
async fn invalid_counts_are_rejected_without_touching_state() {
    let repo: Arc<dyn StateRepository> = Arc::new(InMemoryStateRepo::new());
    let service = GachaService::builder()
        .oracles(OracleManager::new(GachaConfig::default(), pools()))
        .shared_repository(Arc::clone(&repo))
        .max_batch(20)
        .build()
        .unwrap();

    for count in [0, 21] {
        let err = service
            .draw("1001", BannerKind::Weapons, count)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            RuntimeError::InvalidCount { count: c, max: 20 } if c == count
        ));
    }
    assert!(!repo.exists("1001"));

    let outcome = service.draw("1001", BannerKind::Weapons, 20).await.unwrap();
    assert_eq!(outcome.state.pull_count, 20);
}

#[tokio::test]
async fn pity_guarantees_hold_across_batches() {
    let service = memory_service(0xDEAD_BEEF);

    let mut rarities = Vec::new();
    for _ in 0..16 {
        let outcome = service
            .draw("77", BannerKind::Characters, 10)
            .await
            .unwrap();
        rarities.extend(outcome.results.iter().map(|r| r.rarity));
    }

    let five_star_positions: Vec<usize> = rarities
        .iter()
        .enumerate()
        .filter(|(_, r)| **r == Rarity::Five)
        .map(|(i, _)| i + 1)
        .collect();
    assert!(five_star_positions.first().is_some_and(|&p| p <= 80));
    assert!(five_star_positions.windows(2).all(|w| w[1] - w[0] <= 80));

    assert!(
        rarities
            .windows(10)
            .all(|w| w.iter().any(|r| *r >= Rarity::Four))
    );

    let state = service.stats("77").unwrap().characters;
    assert_eq!(state.five_star_count(), five_star_positions.len());
    let recorded: Vec<u64> = state.five_star_history.iter().map(|r| r.at_pull).collect();
    let expected: Vec<u64> = five_star_positions.iter().map(|&p| p as u64).collect();
    assert_eq!(recorded, expected);
}

#[tokio::test]
async fn base_seed_controls_replay() {
    let draw_items = |seed: u64| async move {
        memory_service(seed)
            .draw("5", BannerKind::Weapons, 50)
            .await
            .unwrap()
            .results
    };

    assert_eq!(draw_items(9).await, draw_items(9).await);
    assert_ne!(draw_items(9).await, draw_items(10).await);
}

#[tokio::test]
async fn empty_pools_yield_unknown_items() {
    let service = GachaService::builder()
        .oracles(OracleManager::new(
            GachaConfig::default(),
            ItemPools::default(),
        ))
        .repository(InMemoryStateRepo::new())
        .build()
        .unwrap();

    let outcome = service.draw("1", BannerKind::Characters, 10).await.unwrap();
    assert!(outcome.results.iter().all(|r| r.item == UNKNOWN_ITEM));
    assert_eq!(outcome.summary().unknown, 10);
    assert_eq!(outcome.state.pull_count, 10);
}

#[tokio::test]
async fn file_backed_service_persists_across_restarts() {
    let content = ContentFactory::new(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/../gacha/content/data"
    ));
    let config = content.load_config().unwrap();
    let item_pools = content.load_pools().unwrap();
    let save_dir = TempDir::new().unwrap();

    let build = || {
        GachaService::builder()
            .oracles(OracleManager::new(config.clone(), item_pools.clone()))
            .repository(FileStateRepository::new(save_dir.path()))
            .base_seed(42)
            .build()
            .unwrap()
    };

    let first = build();
    let outcome = first
        .draw("1001", BannerKind::Characters, 100)
        .await
        .unwrap();
    assert!(outcome.results.iter().all(|r| !r.is_unknown()));
    assert!(outcome.summary().five_star >= 1);
    first.draw("1001", BannerKind::Weapons, 5).await.unwrap();
    drop(first);

    let second = build();
    let record = second.stats("1001").unwrap();
    assert_eq!(record.characters, outcome.state);
    assert_eq!(record.weapons.pull_count, 5);

    let next = second
        .draw("1001", BannerKind::Characters, 1)
        .await
        .unwrap();
    assert_eq!(next.pulls_before, 100);
    assert!(save_dir.path().join(FileStateRepository::FILE_NAME).exists());
}
