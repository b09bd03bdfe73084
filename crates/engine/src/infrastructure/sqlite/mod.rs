//! SQLite document store.
//!
//! One table per collection, whole documents kept as JSON. Every write is a
//! single statement against a single row.

mod helpers;
mod loot_repo;
mod monster_repo;
mod room_repo;
mod schema;
mod user_repo;

use std::path::Path;
use std::sync::Arc;

use sqlx::SqlitePool;

use crate::infrastructure::ports::RepoError;

pub use loot_repo::SqliteLootRepo;
pub use monster_repo::SqliteMonsterRepo;
pub use room_repo::SqliteRoomRepo;
pub use schema::ensure_schema;
pub use user_repo::SqliteUserRepo;

/// All four collection repositories over one shared pool.
#[derive(Clone)]
pub struct SqliteRepositories {
    pub room: Arc<SqliteRoomRepo>,
    pub loot: Arc<SqliteLootRepo>,
    pub monster: Arc<SqliteMonsterRepo>,
    pub user: Arc<SqliteUserRepo>,
}

impl SqliteRepositories {
    /// Open (creating if needed) the database file and ensure the schema.
    pub async fn connect(db_path: &Path) -> Result<Self, RepoError> {
        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| RepoError::database("connect", e))?;
        }

        let pool = SqlitePool::connect(&format!("sqlite:{}?mode=rwc", db_path.display()))
            .await
            .map_err(|e| RepoError::database("connect", e))?;

        ensure_schema(&pool)
            .await
            .map_err(|e| RepoError::database("ensure_schema", e))?;

        tracing::info!(path = %db_path.display(), "Connected to document store");
        Ok(Self::new(pool))
    }

    pub fn new(pool: SqlitePool) -> Self {
        Self {
            room: Arc::new(SqliteRoomRepo::new(pool.clone())),
            loot: Arc::new(SqliteLootRepo::new(pool.clone())),
            monster: Arc::new(SqliteMonsterRepo::new(pool.clone())),
            user: Arc::new(SqliteUserRepo::new(pool)),
        }
    }
}

/// Fresh database in a temp dir. Keep the `TempDir` alive for the test.
#[cfg(test)]
pub(crate) async fn test_pool() -> (tempfile::TempDir, SqlitePool) {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("wiki.db");
    let pool = SqlitePool::connect(&format!("sqlite:{}?mode=rwc", path.display()))
        .await
        .expect("connect");
    ensure_schema(&pool).await.expect("schema");
    (dir, pool)
}
