//! SQLite user repository.

use async_trait::async_trait;
use jotunwiki_domain::{User, UserEmail, UserHint};
use sqlx::SqlitePool;

use super::helpers::{count_to_u64, decode, encode, insert_error};
use crate::infrastructure::ports::{RepoError, UserRepo};

pub struct SqliteUserRepo {
    pool: SqlitePool,
}

impl SqliteUserRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepo for SqliteUserRepo {
    async fn list_all(&self) -> Result<Vec<User>, RepoError> {
        let docs: Vec<String> = sqlx::query_scalar("SELECT doc FROM users ORDER BY seq")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepoError::database("list_users", e))?;

        docs.iter().map(|doc| decode::<User>(doc)).collect()
    }

    async fn get(&self, email: &UserEmail) -> Result<Option<User>, RepoError> {
        let doc: Option<String> = sqlx::query_scalar("SELECT doc FROM users WHERE email = ?")
            .bind(email.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::database("get_user", e))?;

        doc.as_deref().map(decode::<User>).transpose()
    }

    async fn count(&self) -> Result<u64, RepoError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| RepoError::database("count_users", e))?;
        Ok(count_to_u64(count))
    }

    async fn insert(&self, user: &User) -> Result<(), RepoError> {
        let doc = encode(user)?;

        sqlx::query("INSERT INTO users (email, doc) VALUES (?, ?)")
            .bind(user.email.as_str())
            .bind(doc)
            .execute(&self.pool)
            .await
            .map_err(insert_error("User", &user.email))?;
        Ok(())
    }

    async fn append_hint(&self, email: &UserEmail, hint: &UserHint) -> Result<(), RepoError> {
        let hint_json = encode(hint)?;

        let result = sqlx::query(
            "UPDATE users SET doc = json_insert(doc, '$.hints[#]', json(?)) WHERE email = ?",
        )
        .bind(hint_json)
        .bind(email.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::database("append_user_hint", e))?;

        if result.rows_affected() == 0 {
            return Err(RepoError::not_found("User", email));
        }
        Ok(())
    }
}
