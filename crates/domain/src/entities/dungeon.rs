//! Dungeon - a virtual entity reconstructed from Room documents.
//!
//! There is no Dungeon collection. A dungeon is the set of Rooms sharing a
//! `dungeon_id`, and its name and lore are whatever the first of those Rooms
//! says. Rooms of one dungeon are assumed to agree on both; nothing checks it.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::entities::comment::RoomHint;
use crate::entities::room::{Room, RoomHeader, RoomLink};
use crate::ids::{DungeonId, LootId, MonsterId, RoomId};
use crate::value_objects::HintCategory;

/// Number of comments per category. Categories without comments are absent.
pub type HintCounts = BTreeMap<HintCategory, u32>;

pub fn count_hints(hints: &[RoomHint]) -> HintCounts {
    let mut counts = HintCounts::new();
    for hint in hints {
        *counts.entry(hint.category).or_insert(0) += 1;
    }
    counts
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DungeonSummary {
    pub id: DungeonId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lore: Option<String>,
}

impl DungeonSummary {
    /// One summary per distinct dungeon id, in order of first appearance.
    /// The first room seen for an id supplies its name and lore.
    pub fn collect<'a, I>(headers: I) -> Vec<DungeonSummary>
    where
        I: IntoIterator<Item = &'a RoomHeader>,
    {
        let mut seen = HashSet::new();
        headers
            .into_iter()
            .filter(|header| seen.insert(header.dungeon_id))
            .map(|header| DungeonSummary {
                id: header.dungeon_id,
                name: header.dungeon_name.clone(),
                lore: header.dungeon_lore.clone(),
            })
            .collect()
    }
}

/// `{id, name}` pair for an embedded snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryRef<K> {
    pub id: K,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DungeonRoomSummary {
    pub id: RoomId,
    pub name: String,
    pub connections: Vec<RoomLink>,
    pub monsters: Vec<EntryRef<MonsterId>>,
    pub loot: Vec<EntryRef<LootId>>,
    pub hint_counts: HintCounts,
}

impl From<&Room> for DungeonRoomSummary {
    fn from(room: &Room) -> Self {
        Self {
            id: room.room_id,
            name: room.room_name.clone(),
            connections: room.rooms_connected.clone(),
            monsters: room
                .monsters
                .iter()
                .map(|m| EntryRef {
                    id: m.id,
                    name: m.name.clone(),
                })
                .collect(),
            loot: room
                .loot
                .iter()
                .map(|l| EntryRef {
                    id: l.id,
                    name: l.name.clone(),
                })
                .collect(),
            hint_counts: count_hints(&room.hints),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DungeonDetail {
    pub id: DungeonId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lore: Option<String>,
    pub rooms: Vec<DungeonRoomSummary>,
}

impl DungeonDetail {
    /// Build the detail view from the rooms of one dungeon.
    ///
    /// Returns `None` when there are no rooms: the dungeon does not exist.
    pub fn from_rooms(id: DungeonId, rooms: &[Room]) -> Option<Self> {
        let first = rooms.first()?;
        Some(Self {
            id,
            name: first.dungeon_name.clone(),
            lore: first.dungeon_lore.clone(),
            rooms: rooms.iter().map(DungeonRoomSummary::from).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::entities::{CommentDraft, Loot, Monster, User};

    fn header(room: i64, dungeon: i64, name: &str) -> RoomHeader {
        RoomHeader {
            room_id: RoomId::new(room),
            room_name: format!("Room {room}"),
            dungeon_id: DungeonId::new(dungeon),
            dungeon_name: name.to_string(),
            dungeon_lore: Some(format!("lore of {name}")),
        }
    }

    fn hint(category: HintCategory) -> RoomHint {
        let date = NaiveDate::from_ymd_opt(2026, 1, 2).expect("valid date");
        CommentDraft::new(date, "text", category)
            .room_side(&User::new("a@b.com", "astrid", "2024-01-15"))
    }

    #[test]
    fn collect_keeps_one_entry_per_dungeon() {
        let headers = vec![
            header(1, 10, "Lair"),
            header(2, 20, "Crypt"),
            header(3, 10, "Lair"),
        ];

        let dungeons = DungeonSummary::collect(&headers);

        assert_eq!(dungeons.len(), 2);
        assert_eq!(dungeons[0].id, DungeonId::new(10));
        assert_eq!(dungeons[1].id, DungeonId::new(20));
    }

    #[test]
    fn collect_takes_attributes_from_the_first_room_seen() {
        let headers = vec![header(1, 10, "First"), header(2, 10, "Second")];

        let dungeons = DungeonSummary::collect(&headers);

        assert_eq!(dungeons.len(), 1);
        assert_eq!(dungeons[0].name, "First");
    }

    #[test]
    fn hint_counts_sum_to_the_number_of_hints_and_omit_zeroes() {
        let hints = vec![
            hint(HintCategory::Bug),
            hint(HintCategory::Lore),
            hint(HintCategory::Bug),
        ];

        let counts = count_hints(&hints);

        assert_eq!(counts.values().sum::<u32>(), 3);
        assert_eq!(counts.get(&HintCategory::Bug), Some(&2));
        assert!(!counts.contains_key(&HintCategory::Hint));
        assert!(!counts.contains_key(&HintCategory::Suggestion));

        let value = serde_json::to_value(&counts).expect("serialize");
        assert_eq!(value, serde_json::json!({"Lore": 1, "Bug": 2}));
    }

    #[test]
    fn detail_is_none_without_rooms() {
        assert!(DungeonDetail::from_rooms(DungeonId::new(99), &[]).is_none());
    }

    #[test]
    fn detail_summarizes_every_room() {
        let mut first = Room::new(RoomId::new(1), "Hall", DungeonId::new(10), "Lair");
        first.dungeon_lore = Some("cold".to_string());
        first.monsters = vec![Monster::new(MonsterId::new(4), "Troll")];
        first.loot = vec![Loot::new(LootId::new(5), "Axe")];
        first.hints = vec![hint(HintCategory::Hint)];
        let second = Room::new(RoomId::new(2), "Vault", DungeonId::new(10), "Lair");

        let detail =
            DungeonDetail::from_rooms(DungeonId::new(10), &[first, second]).expect("detail");

        assert_eq!(detail.name, "Lair");
        assert_eq!(detail.lore.as_deref(), Some("cold"));
        assert_eq!(detail.rooms.len(), 2);
        assert_eq!(detail.rooms[0].monsters[0].name, "Troll");
        assert_eq!(detail.rooms[0].loot[0].id, LootId::new(5));
        assert_eq!(detail.rooms[0].hint_counts.get(&HintCategory::Hint), Some(&1));
        assert!(detail.rooms[1].hint_counts.is_empty());
    }
}
