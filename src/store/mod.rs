//! Durable state behind the grading run.
//!
//! `PickStore` owns the user_picks table; `GameCache` is the advisory
//! games table the feed adapter refreshes for display and debugging.
//! Grading never reads the cache, only the live fetch.

mod memory;
mod postgres;

pub use memory::{MemoryGameCache, MemoryPickStore};
pub use postgres::{connect_pool, PgGameCache, PgPickStore};

use crate::models::{GameResult, Grade, Prediction, Sport};
use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

#[async_trait]
pub trait PickStore: Send + Sync {
    /// Picks still eligible for grading: pending or in-progress
    async fn find_open_picks(&self, sport: Sport) -> Result<Vec<Prediction>>;

    /// Pending-only picks, the candidates for the live transition
    async fn find_pending_picks(&self, sport: Sport) -> Result<Vec<Prediction>>;

    async fn mark_in_progress(&self, pick_id: Uuid) -> Result<()>;

    /// Write the grade and the completed status as one atomic update.
    /// Idempotent: repeating the call with the same grade is a no-op.
    async fn mark_completed(&self, pick_id: Uuid, grade: &Grade) -> Result<()>;

    /// All of one user's picks, newest first
    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Prediction>>;
}

#[async_trait]
pub trait GameCache: Send + Sync {
    async fn upsert(&self, result: &GameResult) -> Result<()>;
}
