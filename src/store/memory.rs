//! In-memory store implementations for tests and local dry runs.

use super::{GameCache, PickStore};
use crate::models::{GameResult, GameStatus, Grade, Prediction, Sport};
use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Default)]
pub struct MemoryPickStore {
    picks: RwLock<Vec<Prediction>>,
}

impl MemoryPickStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, pick: Prediction) {
        self.picks.write().await.push(pick);
    }

    pub async fn get(&self, pick_id: Uuid) -> Option<Prediction> {
        self.picks
            .read()
            .await
            .iter()
            .find(|p| p.id == pick_id)
            .cloned()
    }
}

#[async_trait]
impl PickStore for MemoryPickStore {
    async fn find_open_picks(&self, sport: Sport) -> Result<Vec<Prediction>> {
        Ok(self
            .picks
            .read()
            .await
            .iter()
            .filter(|p| p.sport == sport && p.is_open())
            .cloned()
            .collect())
    }

    async fn find_pending_picks(&self, sport: Sport) -> Result<Vec<Prediction>> {
        Ok(self
            .picks
            .read()
            .await
            .iter()
            .filter(|p| p.sport == sport && p.game_status == GameStatus::Pending)
            .cloned()
            .collect())
    }

    async fn mark_in_progress(&self, pick_id: Uuid) -> Result<()> {
        let mut picks = self.picks.write().await;
        if let Some(pick) = picks.iter_mut().find(|p| p.id == pick_id) {
            pick.game_status = GameStatus::InProgress;
        }
        Ok(())
    }

    async fn mark_completed(&self, pick_id: Uuid, grade: &Grade) -> Result<()> {
        let mut picks = self.picks.write().await;
        if let Some(pick) = picks.iter_mut().find(|p| p.id == pick_id) {
            pick.game_status = GameStatus::Completed;
            pick.is_correct = Some(grade.is_correct);
            pick.actual_outcome = Some(grade.actual_outcome.clone());
            pick.game_final_score = Some(grade.game_final_score.clone());
        }
        Ok(())
    }

    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Prediction>> {
        let mut picks: Vec<Prediction> = self
            .picks
            .read()
            .await
            .iter()
            .filter(|p| p.user_id == user_id)
            .cloned()
            .collect();
        picks.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(picks)
    }
}

#[derive(Default)]
pub struct MemoryGameCache {
    games: RwLock<HashMap<String, GameResult>>,
}

impl MemoryGameCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, external_id: &str) -> Option<GameResult> {
        self.games.read().await.get(external_id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.games.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.games.read().await.is_empty()
    }
}

#[async_trait]
impl GameCache for MemoryGameCache {
    async fn upsert(&self, result: &GameResult) -> Result<()> {
        self.games
            .write()
            .await
            .insert(result.external_id.clone(), result.clone());
        Ok(())
    }
}
