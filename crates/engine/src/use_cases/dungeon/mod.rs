//! Dungeon views, derived entirely from Room documents.

use std::sync::Arc;

use jotunwiki_domain::{DungeonDetail, DungeonId, DungeonSummary};

use crate::infrastructure::ports::{RepoError, RoomRepo};

#[derive(Debug, thiserror::Error)]
pub enum DungeonError {
    #[error("Dungeon not found: {0}")]
    NotFound(DungeonId),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

pub struct DungeonViews {
    room_repo: Arc<dyn RoomRepo>,
}

impl DungeonViews {
    pub fn new(room_repo: Arc<dyn RoomRepo>) -> Self {
        Self { room_repo }
    }

    /// One entry per distinct dungeon id; first room seen wins name and lore.
    pub async fn list(&self) -> Result<Vec<DungeonSummary>, DungeonError> {
        let headers = self.room_repo.list_headers().await?;
        Ok(DungeonSummary::collect(&headers))
    }

    pub async fn get(&self, dungeon_id: DungeonId) -> Result<DungeonDetail, DungeonError> {
        let rooms = self.room_repo.list_in_dungeon(dungeon_id).await?;
        DungeonDetail::from_rooms(dungeon_id, &rooms).ok_or(DungeonError::NotFound(dungeon_id))
    }
}
