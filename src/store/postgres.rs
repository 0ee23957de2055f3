//! Postgres-backed store implementations.
//!
//! Queries run through `sqlx` at runtime; enums travel as their TEXT
//! column form and are parsed back on read so legacy rows with odd values
//! degrade gracefully instead of failing the whole select.

use super::{GameCache, PickStore};
use crate::models::{GameResult, Grade, Prediction, Sport};
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;
use uuid::Uuid;

const SELECT_PICK: &str = "SELECT id, user_id, game_id, sport, home_team, away_team, \
     prediction_type, prediction_text, predicted_outcome, spread_line, over_under_line, \
     game_status, actual_outcome, is_correct, game_final_score, created_at FROM user_picks";

/// Connect with bounded timeouts so an unreachable database fails the run
/// quickly instead of hanging the batch trigger.
pub async fn connect_pool(database_url: &str) -> Result<PgPool> {
    PgPoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url)
        .await
        .context("Failed to connect to Postgres")
}

#[derive(sqlx::FromRow)]
struct PickRow {
    id: Uuid,
    user_id: Uuid,
    game_id: String,
    sport: String,
    home_team: Option<String>,
    away_team: Option<String>,
    prediction_type: Option<String>,
    prediction_text: Option<String>,
    predicted_outcome: Option<String>,
    spread_line: Option<f64>,
    over_under_line: Option<f64>,
    game_status: Option<String>,
    actual_outcome: Option<String>,
    is_correct: Option<bool>,
    game_final_score: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<PickRow> for Prediction {
    type Error = anyhow::Error;

    fn try_from(row: PickRow) -> Result<Self> {
        Ok(Prediction {
            id: row.id,
            user_id: row.user_id,
            game_id: row.game_id,
            sport: row.sport.parse()?,
            home_team: row.home_team.unwrap_or_default(),
            away_team: row.away_team.unwrap_or_default(),
            // Rows from before bet types existed are moneyline picks
            prediction_type: row
                .prediction_type
                .as_deref()
                .unwrap_or("MONEYLINE")
                .parse()?,
            prediction_text: row.prediction_text.unwrap_or_default(),
            predicted_outcome: crate::models::PredictedOutcome::parse(
                row.predicted_outcome.as_deref().unwrap_or(""),
            ),
            spread_line: row.spread_line,
            over_under_line: row.over_under_line,
            game_status: row.game_status.as_deref().unwrap_or("pending").parse()?,
            actual_outcome: row.actual_outcome,
            is_correct: row.is_correct,
            game_final_score: row.game_final_score,
            created_at: row.created_at,
        })
    }
}

#[derive(Clone)]
pub struct PgPickStore {
    pool: PgPool,
}

impl PgPickStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn select_by_status(&self, sport: Sport, statuses: &[&str]) -> Result<Vec<Prediction>> {
        let query = format!(
            "{} WHERE sport = $1 AND (game_status = ANY($2) OR game_status IS NULL)",
            SELECT_PICK
        );
        let rows: Vec<PickRow> = sqlx::query_as(&query)
            .bind(sport.as_str())
            .bind(statuses)
            .fetch_all(&self.pool)
            .await
            .context("Failed to fetch picks")?;

        rows.into_iter().map(Prediction::try_from).collect()
    }
}

#[async_trait]
impl PickStore for PgPickStore {
    async fn find_open_picks(&self, sport: Sport) -> Result<Vec<Prediction>> {
        self.select_by_status(sport, &["pending", "in_progress"]).await
    }

    async fn find_pending_picks(&self, sport: Sport) -> Result<Vec<Prediction>> {
        self.select_by_status(sport, &["pending"]).await
    }

    async fn mark_in_progress(&self, pick_id: Uuid) -> Result<()> {
        sqlx::query("UPDATE user_picks SET game_status = 'in_progress' WHERE id = $1")
            .bind(pick_id)
            .execute(&self.pool)
            .await
            .context("Failed to mark pick in progress")?;
        Ok(())
    }

    async fn mark_completed(&self, pick_id: Uuid, grade: &Grade) -> Result<()> {
        // Status and grade fields land in one statement; a pick is never
        // visible as completed-but-ungraded.
        sqlx::query(
            "UPDATE user_picks SET game_status = 'completed', is_correct = $2, \
             actual_outcome = $3, game_final_score = $4 WHERE id = $1",
        )
        .bind(pick_id)
        .bind(grade.is_correct)
        .bind(&grade.actual_outcome)
        .bind(&grade.game_final_score)
        .execute(&self.pool)
        .await
        .context("Failed to record pick grade")?;
        Ok(())
    }

    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Prediction>> {
        let query = format!("{} WHERE user_id = $1 ORDER BY created_at DESC", SELECT_PICK);
        let rows: Vec<PickRow> = sqlx::query_as(&query)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .context("Failed to fetch user picks")?;

        rows.into_iter().map(Prediction::try_from).collect()
    }
}

#[derive(Clone)]
pub struct PgGameCache {
    pool: PgPool,
}

impl PgGameCache {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GameCache for PgGameCache {
    async fn upsert(&self, result: &GameResult) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO games (
                id, sport, status, home_score, away_score, winner,
                home_team, away_team, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, NOW())
            ON CONFLICT (id) DO UPDATE SET
                status = EXCLUDED.status,
                home_score = EXCLUDED.home_score,
                away_score = EXCLUDED.away_score,
                winner = EXCLUDED.winner,
                home_team = EXCLUDED.home_team,
                away_team = EXCLUDED.away_team,
                updated_at = NOW()
            "#,
        )
        .bind(&result.external_id)
        .bind(result.sport.as_str())
        .bind(result.status.as_str())
        .bind(result.home_score)
        .bind(result.away_score)
        .bind(result.winner.map(|side| side.as_str()))
        .bind(&result.home_team)
        .bind(&result.away_team)
        .execute(&self.pool)
        .await
        .context("Failed to upsert game cache row")?;
        Ok(())
    }
}
