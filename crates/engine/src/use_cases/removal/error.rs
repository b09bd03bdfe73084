//! Canonical removal errors.

use jotunwiki_domain::{CanonicalRef, LootId, MonsterId, RoomId};

use crate::infrastructure::ports::RepoError;

#[derive(Debug, thiserror::Error)]
pub enum RemovalError {
    #[error("Loot not found: {0}")]
    LootNotFound(LootId),
    #[error("Monster not found: {0}")]
    MonsterNotFound(MonsterId),
    /// The canonical record is gone but some rooms may still hold snapshots.
    /// Re-running the scrub converges them.
    #[error("{canonical} deleted but snapshot cleanup is incomplete: {detail}")]
    IncompleteCascade {
        canonical: CanonicalRef,
        failed_rooms: Vec<RoomId>,
        detail: String,
    },
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}
