//! Jotun's Lair Wiki domain.
//!
//! Document types for the Room, Loot, Monster and User collections, the
//! comment twins embedded across them, and the pure rules that derive
//! dungeon views from Room copies. Nothing here performs I/O.

pub mod entities;
pub mod error;
pub mod ids;
pub mod value_objects;

pub use entities::{
    count_hints, AuthorSnapshot, CanonicalRef, CommentDraft, DungeonDetail, DungeonRoomSummary,
    DungeonSummary, EntryRef, HintCounts, Loot, Monster, Room, RoomHeader, RoomHint, RoomLink,
    RoomReference, User, UserHint,
};
pub use error::DomainError;
pub use ids::{DungeonId, LootId, MonsterId, RoomId, UserEmail};
pub use value_objects::HintCategory;
