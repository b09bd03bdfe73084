//! Shared encode/decode and error mapping for the SQLite repositories.

use serde::{de::DeserializeOwned, Serialize};

use crate::infrastructure::ports::RepoError;

pub(super) fn encode<T: Serialize>(doc: &T) -> Result<String, RepoError> {
    serde_json::to_string(doc).map_err(RepoError::serialization)
}

pub(super) fn decode<T: DeserializeOwned>(json: &str) -> Result<T, RepoError> {
    serde_json::from_str(json).map_err(RepoError::serialization)
}

/// Map an insert failure, reporting duplicate keys as constraint violations.
pub(super) fn insert_error(
    entity_type: &'static str,
    key: impl ToString,
) -> impl FnOnce(sqlx::Error) -> RepoError {
    move |e| match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => RepoError::constraint(format!(
            "{entity_type} {} already exists",
            key.to_string()
        )),
        _ => RepoError::database("insert", &e),
    }
}

pub(super) fn count_to_u64(count: i64) -> u64 {
    u64::try_from(count).unwrap_or_default()
}
