//! SQLite monster repository (canonical Monster collection).

use async_trait::async_trait;
use jotunwiki_domain::{Monster, MonsterId};
use sqlx::SqlitePool;

use super::helpers::{count_to_u64, decode, encode, insert_error};
use crate::infrastructure::ports::{MonsterRepo, RepoError};

pub struct SqliteMonsterRepo {
    pool: SqlitePool,
}

impl SqliteMonsterRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MonsterRepo for SqliteMonsterRepo {
    async fn list_all(&self) -> Result<Vec<Monster>, RepoError> {
        let docs: Vec<String> = sqlx::query_scalar("SELECT doc FROM monsters ORDER BY seq")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepoError::database("list_monsters", e))?;

        docs.iter().map(|doc| decode::<Monster>(doc)).collect()
    }

    async fn get(&self, id: MonsterId) -> Result<Option<Monster>, RepoError> {
        let doc: Option<String> = sqlx::query_scalar("SELECT doc FROM monsters WHERE id = ?")
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::database("get_monster", e))?;

        doc.as_deref().map(decode::<Monster>).transpose()
    }

    async fn count(&self) -> Result<u64, RepoError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM monsters")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| RepoError::database("count_monsters", e))?;
        Ok(count_to_u64(count))
    }

    async fn insert(&self, monster: &Monster) -> Result<(), RepoError> {
        let doc = encode(monster)?;

        sqlx::query("INSERT INTO monsters (id, doc) VALUES (?, ?)")
            .bind(monster.id.get())
            .bind(doc)
            .execute(&self.pool)
            .await
            .map_err(insert_error("Monster", monster.id))?;
        Ok(())
    }

    async fn list_deleted(&self) -> Result<Vec<MonsterId>, RepoError> {
        let ids: Vec<i64> = sqlx::query_scalar(
            "SELECT id FROM deleted_canonicals WHERE kind = 'monster' ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepoError::database("list_deleted_monster", e))?;

        Ok(ids.into_iter().map(MonsterId::new).collect())
    }

    async fn take(&self, id: MonsterId) -> Result<Option<Monster>, RepoError> {
        let doc: Option<String> = sqlx::query_scalar("DELETE FROM monsters WHERE id = ? RETURNING doc")
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::database("delete_monster", e))?;

        if doc.is_some() {
            tracing::debug!(monster_id = %id, "Deleted canonical monster");
        }
        doc.as_deref().map(decode::<Monster>).transpose()
    }
}
