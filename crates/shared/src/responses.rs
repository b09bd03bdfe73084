//! Response shapes that differ from the stored documents.

use serde::{Deserialize, Serialize};

use jotunwiki_domain::{Loot, Monster, Room, RoomHeader, RoomHint};

/// `GET /room/{room_id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomDetailResponse {
    #[serde(rename = "idR")]
    pub id: i64,
    pub name: String,
    #[serde(rename = "inWP", default, skip_serializing_if = "Option::is_none")]
    pub in_waypoint: Option<String>,
    #[serde(rename = "outWP", default, skip_serializing_if = "Option::is_none")]
    pub out_waypoint: Option<String>,
    pub monsters: Vec<Monster>,
    pub loot: Vec<Loot>,
    pub hints: Vec<RoomHint>,
}

impl From<Room> for RoomDetailResponse {
    fn from(room: Room) -> Self {
        Self {
            id: room.room_id.get(),
            name: room.room_name,
            in_waypoint: room.in_waypoint,
            out_waypoint: room.out_waypoint,
            monsters: room.monsters,
            loot: room.loot,
            hints: room.hints,
        }
    }
}

/// One entry of `GET /room`: stored field names, reduced projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomListItem {
    pub room_id: i64,
    pub room_name: String,
    pub dungeon_id: i64,
    pub dungeon_name: String,
}

impl From<RoomHeader> for RoomListItem {
    fn from(header: RoomHeader) -> Self {
        Self {
            room_id: header.room_id.get(),
            room_name: header.room_name,
            dungeon_id: header.dungeon_id.get(),
            dungeon_name: header.dungeon_name,
        }
    }
}

/// `{"message": ...}` body used for confirmations and every error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
