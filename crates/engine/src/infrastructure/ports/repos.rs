//! Repository port traits, one per document collection.
//!
//! Every write touches exactly one document and is atomic for that document.
//! Nothing here spans documents; callers that must keep copies in several
//! documents consistent order the writes themselves.

use async_trait::async_trait;
use jotunwiki_domain::{
    CanonicalRef, DungeonId, Loot, LootId, Monster, MonsterId, Room, RoomHeader, RoomHint, RoomId,
    User, UserEmail, UserHint,
};

use super::error::RepoError;

// =============================================================================
// Rooms
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoomRepo: Send + Sync {
    /// Identifying and dungeon fields of every room, in store order.
    async fn list_headers(&self) -> Result<Vec<RoomHeader>, RepoError>;
    async fn list_all(&self) -> Result<Vec<Room>, RepoError>;
    async fn list_in_dungeon(&self, dungeon_id: DungeonId) -> Result<Vec<Room>, RepoError>;
    async fn get(&self, room_id: RoomId) -> Result<Option<Room>, RepoError>;
    async fn count(&self) -> Result<u64, RepoError>;

    /// Insert a new room. Fails with `ConstraintViolation` if the id is taken.
    async fn insert(&self, room: &Room) -> Result<(), RepoError>;

    /// Append one comment to the room's `hints`. The append is a single
    /// element-level update, so concurrent appends do not overwrite each other.
    async fn append_hint(&self, room_id: RoomId, hint: &RoomHint) -> Result<(), RepoError>;

    /// Rooms holding at least one snapshot of `canonical`.
    async fn list_holding(&self, canonical: CanonicalRef) -> Result<Vec<RoomId>, RepoError>;

    /// Remove every snapshot of `canonical` from one room. Returns the number
    /// of entries removed; a room that is already clean yields `Ok(0)`.
    async fn scrub_snapshot(
        &self,
        room_id: RoomId,
        canonical: CanonicalRef,
    ) -> Result<usize, RepoError>;
}

// =============================================================================
// Canonical collections
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LootRepo: Send + Sync {
    async fn list_all(&self) -> Result<Vec<Loot>, RepoError>;
    async fn get(&self, id: LootId) -> Result<Option<Loot>, RepoError>;
    async fn count(&self) -> Result<u64, RepoError>;
    async fn insert(&self, loot: &Loot) -> Result<(), RepoError>;

    /// Delete the canonical record and return it, or `None` if it was absent.
    /// The deletion leaves a tombstone for the id.
    async fn take(&self, id: LootId) -> Result<Option<Loot>, RepoError>;

    /// Ids removed through [`take`](Self::take) and not inserted again since.
    async fn list_deleted(&self) -> Result<Vec<LootId>, RepoError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MonsterRepo: Send + Sync {
    async fn list_all(&self) -> Result<Vec<Monster>, RepoError>;
    async fn get(&self, id: MonsterId) -> Result<Option<Monster>, RepoError>;
    async fn count(&self) -> Result<u64, RepoError>;
    async fn insert(&self, monster: &Monster) -> Result<(), RepoError>;

    /// Delete the canonical record and return it, or `None` if it was absent.
    /// The deletion leaves a tombstone for the id.
    async fn take(&self, id: MonsterId) -> Result<Option<Monster>, RepoError>;

    /// Ids removed through [`take`](Self::take) and not inserted again since.
    async fn list_deleted(&self) -> Result<Vec<MonsterId>, RepoError>;
}

// =============================================================================
// Users
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepo: Send + Sync {
    async fn list_all(&self) -> Result<Vec<User>, RepoError>;
    async fn get(&self, email: &UserEmail) -> Result<Option<User>, RepoError>;
    async fn count(&self) -> Result<u64, RepoError>;
    async fn insert(&self, user: &User) -> Result<(), RepoError>;

    /// Append one comment twin to the user's `hints`, element-level like
    /// [`RoomRepo::append_hint`].
    async fn append_hint(&self, email: &UserEmail, hint: &UserHint) -> Result<(), RepoError>;
}
