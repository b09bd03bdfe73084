//! Documents and embedded records of the wiki.

mod comment;
mod dungeon;
mod loot;
mod monster;
mod room;
mod user;

pub use comment::{AuthorSnapshot, CommentDraft, RoomHint, RoomReference, UserHint};
pub use dungeon::{
    count_hints, DungeonDetail, DungeonRoomSummary, DungeonSummary, EntryRef, HintCounts,
};
pub use loot::Loot;
pub use monster::Monster;
pub use room::{CanonicalRef, Room, RoomHeader, RoomLink};
pub use user::User;
