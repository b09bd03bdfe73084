//! SQLite loot repository (canonical Loot collection).

use async_trait::async_trait;
use jotunwiki_domain::{Loot, LootId};
use sqlx::SqlitePool;

use super::helpers::{count_to_u64, decode, encode, insert_error};
use crate::infrastructure::ports::{LootRepo, RepoError};

pub struct SqliteLootRepo {
    pool: SqlitePool,
}

impl SqliteLootRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LootRepo for SqliteLootRepo {
    async fn list_all(&self) -> Result<Vec<Loot>, RepoError> {
        let docs: Vec<String> = sqlx::query_scalar("SELECT doc FROM loot ORDER BY seq")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepoError::database("list_loot", e))?;

        docs.iter().map(|doc| decode::<Loot>(doc)).collect()
    }

    async fn get(&self, id: LootId) -> Result<Option<Loot>, RepoError> {
        let doc: Option<String> = sqlx::query_scalar("SELECT doc FROM loot WHERE id = ?")
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::database("get_loot", e))?;

        doc.as_deref().map(decode::<Loot>).transpose()
    }

    async fn count(&self) -> Result<u64, RepoError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM loot")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| RepoError::database("count_loot", e))?;
        Ok(count_to_u64(count))
    }

    async fn insert(&self, loot: &Loot) -> Result<(), RepoError> {
        let doc = encode(loot)?;

        sqlx::query("INSERT INTO loot (id, doc) VALUES (?, ?)")
            .bind(loot.id.get())
            .bind(doc)
            .execute(&self.pool)
            .await
            .map_err(insert_error("Loot", loot.id))?;
        Ok(())
    }

    async fn list_deleted(&self) -> Result<Vec<LootId>, RepoError> {
        let ids: Vec<i64> = sqlx::query_scalar(
            "SELECT id FROM deleted_canonicals WHERE kind = 'loot' ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepoError::database("list_deleted_loot", e))?;

        Ok(ids.into_iter().map(LootId::new).collect())
    }

    async fn take(&self, id: LootId) -> Result<Option<Loot>, RepoError> {
        let doc: Option<String> = sqlx::query_scalar("DELETE FROM loot WHERE id = ? RETURNING doc")
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::database("delete_loot", e))?;

        if doc.is_some() {
            tracing::debug!(loot_id = %id, "Deleted canonical loot");
        }
        doc.as_deref().map(decode::<Loot>).transpose()
    }
}
