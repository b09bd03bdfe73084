//! Lookup use cases - list-all and get-by-key for each collection.

use std::sync::Arc;

use jotunwiki_domain::{Loot, LootId, Monster, MonsterId, Room, RoomHeader, RoomId, User, UserEmail};

use crate::infrastructure::ports::{LootRepo, MonsterRepo, RepoError, RoomRepo, UserRepo};

#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

impl LookupError {
    fn not_found(entity_type: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity_type,
            id: id.to_string(),
        }
    }
}

pub struct LookupUseCases {
    room_repo: Arc<dyn RoomRepo>,
    loot_repo: Arc<dyn LootRepo>,
    monster_repo: Arc<dyn MonsterRepo>,
    user_repo: Arc<dyn UserRepo>,
}

impl LookupUseCases {
    pub fn new(
        room_repo: Arc<dyn RoomRepo>,
        loot_repo: Arc<dyn LootRepo>,
        monster_repo: Arc<dyn MonsterRepo>,
        user_repo: Arc<dyn UserRepo>,
    ) -> Self {
        Self {
            room_repo,
            loot_repo,
            monster_repo,
            user_repo,
        }
    }

    pub async fn list_rooms(&self) -> Result<Vec<RoomHeader>, LookupError> {
        Ok(self.room_repo.list_headers().await?)
    }

    pub async fn get_room(&self, id: RoomId) -> Result<Room, LookupError> {
        self.room_repo
            .get(id)
            .await?
            .ok_or_else(|| LookupError::not_found("Room", id))
    }

    pub async fn list_loot(&self) -> Result<Vec<Loot>, LookupError> {
        Ok(self.loot_repo.list_all().await?)
    }

    pub async fn get_loot(&self, id: LootId) -> Result<Loot, LookupError> {
        self.loot_repo
            .get(id)
            .await?
            .ok_or_else(|| LookupError::not_found("Loot", id))
    }

    pub async fn list_monsters(&self) -> Result<Vec<Monster>, LookupError> {
        Ok(self.monster_repo.list_all().await?)
    }

    pub async fn get_monster(&self, id: MonsterId) -> Result<Monster, LookupError> {
        self.monster_repo
            .get(id)
            .await?
            .ok_or_else(|| LookupError::not_found("Monster", id))
    }

    pub async fn list_users(&self) -> Result<Vec<User>, LookupError> {
        Ok(self.user_repo.list_all().await?)
    }

    pub async fn get_user(&self, email: &UserEmail) -> Result<User, LookupError> {
        self.user_repo
            .get(email)
            .await?
            .ok_or_else(|| LookupError::not_found("User", email))
    }
}
