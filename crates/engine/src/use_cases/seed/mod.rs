//! Seed import.
//!
//! Documents are created out of band. At startup an optional seed file is
//! imported, but only into a store whose four collections are all empty.

use std::path::Path;
use std::sync::Arc;

use jotunwiki_domain::{Loot, Monster, Room, User};
use serde::Deserialize;

use crate::infrastructure::ports::{LootRepo, MonsterRepo, RepoError, RoomRepo, UserRepo};

/// Seed file contents, in stored document shapes.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub rooms: Vec<Room>,
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub loot: Vec<Loot>,
    #[serde(default)]
    pub monsters: Vec<Monster>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    Imported {
        rooms: usize,
        users: usize,
        loot: usize,
        monsters: usize,
    },
    /// The store already holds documents; nothing was written.
    SkippedNonEmpty,
}

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("Failed to read seed file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid seed file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

pub struct ImportSeed {
    room_repo: Arc<dyn RoomRepo>,
    loot_repo: Arc<dyn LootRepo>,
    monster_repo: Arc<dyn MonsterRepo>,
    user_repo: Arc<dyn UserRepo>,
}

impl ImportSeed {
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

    pub async fn import_file(&self, path: &Path) -> Result<SeedOutcome, SeedError> {
        let raw = tokio::fs::read_to_string(path).await?;
        let seed: SeedData = serde_json::from_str(&raw)?;
        self.execute(seed).await
    }

    pub async fn execute(&self, seed: SeedData) -> Result<SeedOutcome, SeedError> {
        let existing = self.room_repo.count().await?
            + self.user_repo.count().await?
            + self.loot_repo.count().await?
            + self.monster_repo.count().await?;
        if existing > 0 {
            tracing::info!(existing, "Store is not empty, skipping seed import");
            return Ok(SeedOutcome::SkippedNonEmpty);
        }

        for loot in &seed.loot {
            self.loot_repo.insert(loot).await?;
        }
        for monster in &seed.monsters {
            self.monster_repo.insert(monster).await?;
        }
        for user in &seed.users {
            self.user_repo.insert(user).await?;
        }
        for room in &seed.rooms {
            self.room_repo.insert(room).await?;
        }

        let outcome = SeedOutcome::Imported {
            rooms: seed.rooms.len(),
            users: seed.users.len(),
            loot: seed.loot.len(),
            monsters: seed.monsters.len(),
        };
        tracing::info!(?outcome, "Seed data imported");
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::sqlite::{test_pool, SqliteRepositories};

    const SEED: &str = r#"{
        "rooms": [{
            "room_id": 1, "room_name": "Frozen Hall",
            "dungeon_id": 10, "dungeon_name": "Jotun's Lair",
            "loot": [{"id": 5, "name": "Rune Axe", "weight": "3kg", "gold": 120}]
        }],
        "users": [{"email": "a@b.com", "user_name": "astrid", "creation_date": "2024-01-15"}],
        "loot": [{"id": 5, "name": "Rune Axe", "type1": "weapon", "weight": "3kg", "gold": 120}]
    }"#;

    fn importer(repos: &SqliteRepositories) -> ImportSeed {
        ImportSeed::new(
            repos.room.clone(),
            repos.loot.clone(),
            repos.monster.clone(),
            repos.user.clone(),
        )
    }

    #[tokio::test]
    async fn imports_into_empty_store_only_once() {
        let (_dir, pool) = test_pool().await;
        let repos = SqliteRepositories::new(pool);
        let seed: SeedData = serde_json::from_str(SEED).expect("seed json");

        let first = importer(&repos).execute(seed.clone()).await.expect("import");
        assert_eq!(
            first,
            SeedOutcome::Imported {
                rooms: 1,
                users: 1,
                loot: 1,
                monsters: 0
            }
        );

        let second = importer(&repos).execute(seed).await.expect("skip");
        assert_eq!(second, SeedOutcome::SkippedNonEmpty);
        assert_eq!(repos.room.count().await.expect("count"), 1);
    }

    #[tokio::test]
    async fn imports_hints_with_missing_author_snapshots() {
        let (_dir, pool) = test_pool().await;
        let repos = SqliteRepositories::new(pool);
        let seed: SeedData = serde_json::from_str(
            r#"{"rooms": [{
                "room_id": 2, "room_name": "Ice Bridge",
                "dungeon_id": 10, "dungeon_name": "Jotun's Lair",
                "hints": [{"text": "mind the gap", "category": "Hint"}]
            }]}"#,
        )
        .expect("seed json");

        importer(&repos).execute(seed).await.expect("import");

        let room = repos
            .room
            .get(jotunwiki_domain::RoomId::new(2))
            .await
            .expect("get")
            .expect("room");
        assert_eq!(room.hints.len(), 1);
        assert_eq!(room.hints[0].text, "mind the gap");
        assert_eq!(room.hints[0].creation_date, None);
    }

    #[tokio::test]
    async fn reads_seed_from_file() {
        let (dir, pool) = test_pool().await;
        let repos = SqliteRepositories::new(pool);
        let path = dir.path().join("seed.json");
        std::fs::write(&path, SEED).expect("write seed");

        let outcome = importer(&repos).import_file(&path).await.expect("import");

        assert!(matches!(outcome, SeedOutcome::Imported { rooms: 1, .. }));
        let user = repos
            .user
            .get(&"a@b.com".into())
            .await
            .expect("get")
            .expect("seeded user");
        assert_eq!(user.user_name, "astrid");
    }

    #[tokio::test]
    async fn malformed_seed_is_a_parse_error() {
        let (dir, pool) = test_pool().await;
        let repos = SqliteRepositories::new(pool);
        let path = dir.path().join("seed.json");
        std::fs::write(&path, "{\"rooms\": 3}").expect("write seed");

        let result = importer(&repos).import_file(&path).await;

        assert!(matches!(result, Err(SeedError::Parse(_))));
    }
}
