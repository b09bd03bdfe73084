//! Room - the denormalized document at the center of the wiki.
//!
//! A Room embeds copies of everything that applies to it: links to the rooms
//! it connects to, snapshots of its monsters and loot, and the Room-side twin
//! of every comment posted about it. It also carries the name and lore of the
//! dungeon it belongs to; dungeons exist only through these copies.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::entities::comment::{RoomHint, RoomReference};
use crate::entities::{Loot, Monster};
use crate::ids::{DungeonId, LootId, MonsterId, RoomId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub room_id: RoomId,
    pub room_name: String,
    pub dungeon_id: DungeonId,
    pub dungeon_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dungeon_lore: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub in_waypoint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub out_waypoint: Option<String>,
    #[serde(default)]
    pub rooms_connected: Vec<RoomLink>,
    #[serde(default)]
    pub hints: Vec<RoomHint>,
    #[serde(default)]
    pub monsters: Vec<Monster>,
    #[serde(default)]
    pub loot: Vec<Loot>,
}

/// Lightweight link to a connected room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomLink {
    pub room_id: RoomId,
    #[serde(default)]
    pub room_name: String,
}

/// Projection of the identifying and dungeon fields of a Room.
///
/// Used by list views that must not load embedded arrays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomHeader {
    pub room_id: RoomId,
    pub room_name: String,
    pub dungeon_id: DungeonId,
    pub dungeon_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dungeon_lore: Option<String>,
}

/// A canonical Loot or Monster record that Rooms may hold snapshots of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CanonicalRef {
    Loot(LootId),
    Monster(MonsterId),
}

impl CanonicalRef {
    /// Name of the Room array that holds snapshots of this kind.
    pub fn room_field(self) -> &'static str {
        match self {
            Self::Loot(_) => "loot",
            Self::Monster(_) => "monsters",
        }
    }

    pub fn entity_type(self) -> &'static str {
        match self {
            Self::Loot(_) => "Loot",
            Self::Monster(_) => "Monster",
        }
    }

    pub fn raw_id(self) -> i64 {
        match self {
            Self::Loot(id) => id.get(),
            Self::Monster(id) => id.get(),
        }
    }
}

impl fmt::Display for CanonicalRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.entity_type(), self.raw_id())
    }
}

impl Room {
    pub fn new(
        room_id: RoomId,
        room_name: impl Into<String>,
        dungeon_id: DungeonId,
        dungeon_name: impl Into<String>,
    ) -> Self {
        Self {
            room_id,
            room_name: room_name.into(),
            dungeon_id,
            dungeon_name: dungeon_name.into(),
            dungeon_lore: None,
            in_waypoint: None,
            out_waypoint: None,
            rooms_connected: Vec::new(),
            hints: Vec::new(),
            monsters: Vec::new(),
            loot: Vec::new(),
        }
    }

    pub fn header(&self) -> RoomHeader {
        RoomHeader {
            room_id: self.room_id,
            room_name: self.room_name.clone(),
            dungeon_id: self.dungeon_id,
            dungeon_name: self.dungeon_name.clone(),
            dungeon_lore: self.dungeon_lore.clone(),
        }
    }

    /// Point-in-time copy of this room for the User-side twin of a comment.
    pub fn reference(&self) -> RoomReference {
        RoomReference {
            room_id: self.room_id,
            room_name: self.room_name.clone(),
            dungeon_id: self.dungeon_id,
            dungeon_name: self.dungeon_name.clone(),
        }
    }

    pub fn holds(&self, canonical: CanonicalRef) -> bool {
        match canonical {
            CanonicalRef::Loot(id) => self.loot.iter().any(|l| l.id == id),
            CanonicalRef::Monster(id) => self.monsters.iter().any(|m| m.id == id),
        }
    }

    /// Remove every embedded snapshot of `canonical`, leaving other entries in
    /// place. Returns how many entries were removed; zero means the room was
    /// already clean.
    pub fn scrub(&mut self, canonical: CanonicalRef) -> usize {
        match canonical {
            CanonicalRef::Loot(id) => {
                let before = self.loot.len();
                self.loot.retain(|l| l.id != id);
                before - self.loot.len()
            }
            CanonicalRef::Monster(id) => {
                let before = self.monsters.len();
                self.monsters.retain(|m| m.id != id);
                before - self.monsters.len()
            }
        }
    }

    /// Every canonical record this room holds a snapshot of.
    pub fn snapshot_refs(&self) -> impl Iterator<Item = CanonicalRef> + '_ {
        self.loot
            .iter()
            .map(|l| CanonicalRef::Loot(l.id))
            .chain(self.monsters.iter().map(|m| CanonicalRef::Monster(m.id)))
    }
}
