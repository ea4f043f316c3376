//! Plain-text rendering of draw results and user stats.
use gacha_core::{BannerKind, BannerState, RateTable, UserRecord};
use gacha_runtime::DrawOutcome;

/// Shown in place of item names when a batch produced nothing.
pub const NO_RESULTS: &str = "No results, please try again";

/// Item names of a batch in draw order, followed by the rarity tally.
pub fn render_outcome(outcome: &DrawOutcome) -> String {
    if outcome.results.is_empty() {
        return NO_RESULTS.to_owned();
    }

    let names: Vec<&str> = outcome.results.iter().map(|r| r.item.as_str()).collect();
    let summary = outcome.summary();

    [
        names.join(", "),
        format!(
            "5★ {} | 4★ {} | 3★ {}",
            summary.five_star, summary.four_star, summary.three_star
        ),
        format!("Total pulls: {}", outcome.state.pull_count),
    ]
    .join("\n")
}

/// Per-banner counters, distance to pity, and five-star history.
pub fn render_stats(record: &UserRecord, rates: impl Fn(BannerKind) -> RateTable) -> String {
    BannerKind::ALL
        .iter()
        .map(|&banner| render_banner(banner, record.banner(banner), &rates(banner)))
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn render_banner(banner: BannerKind, state: &BannerState, rates: &RateTable) -> String {
    let mut lines = vec![
        format!("[{}]", banner),
        format!("Total pulls: {}", state.pull_count),
        format!("Until 5★ pity: {}", state.pulls_until_five_star_pity(rates)),
        format!("Until 4★ pity: {}", state.pulls_until_four_star_pity(rates)),
    ];

    if !state.five_star_history.is_empty() {
        let history: Vec<String> = state
            .five_star_history
            .iter()
            .map(|record| format!("{}({})", record.item, record.at_pull))
            .collect();
        lines.push(format!("5★ history: {}", history.join(", ")));
    }

    lines.join("\n")
}
