pub mod api;
pub mod models;
pub mod store;
pub mod utils;

pub use api::{FeedError, ScoresApiClient};
pub use models::*;
pub use store::{
    connect_pool, GameCache, MemoryGameCache, MemoryPickStore, PgGameCache, PgPickStore, PickStore,
};
pub use utils::grading::{grade, GradeOutcome, SkipReason};
pub use utils::matching::{matching_predictions, normalize_team_name, teams_match};
pub use utils::outcome::extract_predicted_outcome;
pub use utils::win_rates::compute_win_rates;

use anyhow::Result;
use serde::Serialize;
use tracing::{debug, error, info, warn};

/// Counters reported by one grading run
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct UpdateSummary {
    /// Canonical game results handled this run
    pub processed: usize,
    /// Picks graded and written back as completed
    pub graded: usize,
    /// Matched picks left open because grading was indeterminate
    pub skipped: usize,
    /// Pending picks moved to in-progress
    pub marked_live: usize,
}

/// Fetch results for the given sports and work through them. This is the
/// whole batch job: the HTTP trigger and the CLI both end up here.
pub async fn run_score_update(
    feed: &ScoresApiClient,
    store: &dyn PickStore,
    cache: &dyn GameCache,
    sports: &[Sport],
) -> Result<UpdateSummary> {
    let results = feed.fetch_all_results(sports).await;
    info!("Fetched {} game results across {} sports", results.len(), sports.len());
    apply_results(store, cache, &results).await
}

/// Grade every pick the given results settle, and bump pending picks whose
/// game has gone live.
///
/// Per-game and per-pick failures are logged and the run continues; the
/// selection of only non-terminal picks plus idempotent writes make an
/// overlapping or half-finished run safe to repeat.
pub async fn apply_results(
    store: &dyn PickStore,
    cache: &dyn GameCache,
    results: &[GameResult],
) -> Result<UpdateSummary> {
    let mut summary = UpdateSummary::default();

    for result in results {
        summary.processed += 1;

        if let Err(e) = cache.upsert(result).await {
            error!("Failed to cache game {}: {:#}", result.external_id, e);
        }

        match result.status {
            ResultStatus::Completed => resolve_completed_game(store, result, &mut summary).await,
            ResultStatus::Live => mark_live_game(store, result, &mut summary).await,
            ResultStatus::Scheduled => {}
        }
    }

    info!(
        "Run finished: {} results, {} graded, {} skipped, {} marked live",
        summary.processed, summary.graded, summary.skipped, summary.marked_live
    );
    Ok(summary)
}

async fn resolve_completed_game(
    store: &dyn PickStore,
    result: &GameResult,
    summary: &mut UpdateSummary,
) {
    let open_picks = match store.find_open_picks(result.sport).await {
        Ok(picks) => picks,
        Err(e) => {
            error!(
                "Failed to load open {} picks for {}: {:#}",
                result.sport, result.external_id, e
            );
            return;
        }
    };

    let matches = matching_predictions(&open_picks, result);
    if matches.is_empty() {
        return;
    }
    if matches.len() > 1 {
        // Legitimate when several users (or bet types) rode the same game,
        // but worth surfacing for the false-positive hunt
        warn!(
            "{} picks matched {} @ {}",
            matches.len(),
            result.away_team,
            result.home_team
        );
    }

    for pick in matches {
        match grade(pick, result) {
            GradeOutcome::Graded(g) => match store.mark_completed(pick.id, &g).await {
                Ok(()) => {
                    summary.graded += 1;
                    info!(
                        "Graded pick {}: {}",
                        pick.id,
                        if g.is_correct { "CORRECT" } else { "INCORRECT" }
                    );
                }
                Err(e) => error!("Failed to record grade for pick {}: {:#}", pick.id, e),
            },
            GradeOutcome::Skipped(reason) => {
                summary.skipped += 1;
                debug!("Left pick {} open: {}", pick.id, reason);
            }
        }
    }
}

async fn mark_live_game(store: &dyn PickStore, result: &GameResult, summary: &mut UpdateSummary) {
    let pending = match store.find_pending_picks(result.sport).await {
        Ok(picks) => picks,
        Err(e) => {
            error!(
                "Failed to load pending {} picks for {}: {:#}",
                result.sport, result.external_id, e
            );
            return;
        }
    };

    for pick in matching_predictions(&pending, result) {
        match store.mark_in_progress(pick.id).await {
            Ok(()) => summary.marked_live += 1,
            Err(e) => error!("Failed to mark pick {} in progress: {:#}", pick.id, e),
        }
    }
}
