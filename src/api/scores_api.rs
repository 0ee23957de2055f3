//! Client for the SportRadar daily-schedule feed.
//!
//! Each sport exposes its own schedule endpoint with its own payload
//! quirks (baseball scores in `runs`, the rest in `points`); everything is
//! normalized into the canonical [`GameResult`] before any other component
//! sees it.

use crate::models::{GameResult, ResultStatus, Sport};
use chrono::{Duration as ChronoDuration, Utc};
use futures::future::join_all;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::{error, info, warn};

const BASE_URL: &str = "https://api.sportradar.us";
const REQUEST_TIMEOUT_SECS: u64 = 10;
/// Fetch today's and yesterday's slates; games that finish after the UTC
/// day rolls over still show up on yesterday's schedule.
const DATE_OFFSETS: [i64; 2] = [0, -1];

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("request to results feed failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("results feed returned {status} for {url}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },
    #[error("malformed results payload: {0}")]
    Payload(#[from] serde_json::Error),
}

/// Raw daily schedule as the provider ships it
#[derive(Debug, Deserialize)]
struct SchedulePayload {
    #[serde(default)]
    games: Vec<RawGame>,
}

#[derive(Debug, Deserialize)]
struct RawGame {
    id: String,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    home: Option<RawTeam>,
    #[serde(default)]
    away: Option<RawTeam>,
    #[serde(default)]
    home_points: Option<i32>,
    #[serde(default)]
    away_points: Option<i32>,
    #[serde(default)]
    home_runs: Option<i32>,
    #[serde(default)]
    away_runs: Option<i32>,
}

#[derive(Debug, Deserialize)]
struct RawTeam {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    market: Option<String>,
    #[serde(default)]
    alias: Option<String>,
    #[serde(default)]
    runs: Option<i32>,
    #[serde(default)]
    points: Option<i32>,
}

pub struct ScoresApiClient {
    client: Client,
    api_key: String,
}

impl ScoresApiClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
        }
    }

    /// Fetch canonical results for one sport's recent window.
    ///
    /// A failed day is logged and dropped; the error surfaces only when
    /// every day in the window fails.
    pub async fn fetch_results(&self, sport: Sport) -> Result<Vec<GameResult>, FeedError> {
        let mut results = Vec::new();
        let mut last_error = None;

        for offset in DATE_OFFSETS {
            let date = Utc::now() + ChronoDuration::days(offset);
            match self.fetch_day(sport, &date.format("%Y/%m/%d").to_string()).await {
                Ok(games) => results.extend(games),
                Err(e) => {
                    warn!("Failed to fetch {} schedule for offset {}: {}", sport, offset, e);
                    last_error = Some(e);
                }
            }
        }

        match last_error {
            Some(e) if results.is_empty() => Err(e),
            _ => Ok(results),
        }
    }

    async fn fetch_day(&self, sport: Sport, date_path: &str) -> Result<Vec<GameResult>, FeedError> {
        let (league, version) = schedule_route(sport);
        let url = format!(
            "{}/{}/trial/{}/en/games/{}/schedule.json",
            BASE_URL, league, version, date_path
        );

        let response = self
            .client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str())])
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(FeedError::Status {
                status: response.status(),
                url,
            });
        }

        let body = response.text().await?;
        let payload: SchedulePayload = serde_json::from_str(&body)?;
        Ok(payload
            .games
            .into_iter()
            .map(|raw| normalize_game(raw, sport))
            .collect())
    }

    /// Fetch all sports concurrently, best-effort. A sport whose fetch
    /// fails is logged and excluded; it never blocks the others.
    pub async fn fetch_all_results(&self, sports: &[Sport]) -> Vec<GameResult> {
        let fetches = sports
            .iter()
            .map(|&sport| async move { (sport, self.fetch_results(sport).await) });

        let mut all = Vec::new();
        for (sport, outcome) in join_all(fetches).await {
            match outcome {
                Ok(results) => {
                    info!("Fetched {} {} games", results.len(), sport);
                    all.extend(results);
                }
                Err(e) => error!("Skipping {} this run: {}", sport, e),
            }
        }
        all
    }
}

/// Provider path segment and API version per sport
fn schedule_route(sport: Sport) -> (&'static str, &'static str) {
    match sport {
        Sport::MLB => ("mlb", "v7"),
        Sport::NBA => ("nba", "v8"),
        Sport::NFL => ("nfl", "v7"),
        Sport::NHL => ("nhl", "v7"),
        Sport::NCAAMB => ("ncaamb", "v8"),
    }
}

/// Collapse a provider game into the canonical record. Absent scores read
/// as 0; absent team names fall back to a placeholder rather than failing
/// the whole slate.
fn normalize_game(raw: RawGame, sport: Sport) -> GameResult {
    let status = match raw.status.as_deref() {
        Some("closed") | Some("complete") | Some("completed") => ResultStatus::Completed,
        Some("inprogress") | Some("live") => ResultStatus::Live,
        _ => ResultStatus::Scheduled,
    };

    // MLB reports runs, every other sport reports points
    let (home_score, away_score) = match sport {
        Sport::MLB => (
            raw.home
                .as_ref()
                .and_then(|t| t.runs)
                .or(raw.home_runs)
                .unwrap_or(0),
            raw.away
                .as_ref()
                .and_then(|t| t.runs)
                .or(raw.away_runs)
                .unwrap_or(0),
        ),
        _ => (
            raw.home_points
                .or_else(|| raw.home.as_ref().and_then(|t| t.points))
                .unwrap_or(0),
            raw.away_points
                .or_else(|| raw.away.as_ref().and_then(|t| t.points))
                .unwrap_or(0),
        ),
    };

    GameResult {
        external_id: raw.id,
        sport,
        home_team: team_name(raw.home.as_ref(), "Unknown Home"),
        away_team: team_name(raw.away.as_ref(), "Unknown Away"),
        status,
        home_score,
        away_score,
        winner: GameResult::derive_winner(status, home_score, away_score),
    }
}

fn team_name(team: Option<&RawTeam>, fallback: &str) -> String {
    team.and_then(|t| {
        t.name
            .clone()
            .or_else(|| t.market.clone())
            .or_else(|| t.alias.clone())
    })
    .unwrap_or_else(|| fallback.to_string())
}
