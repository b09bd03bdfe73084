//! Comments ("hints").
//!
//! A comment is never stored on its own. Each one exists as two twins: a
//! [`RoomHint`] inside the target Room, carrying a copy of the author, and a
//! [`UserHint`] inside the author's User document, carrying a copy of the
//! room. Both twins are cut from the same [`CommentDraft`] so their date,
//! text and category are identical. The copies are snapshots and are never
//! refreshed when the source user or room changes.
//!
//! Seeded comments may lack the snapshot, its fields or the date; missing
//! parts deserialize as empty. Dates are read from `YYYY-MM-DD` or from a
//! full RFC 3339 timestamp.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};

use crate::entities::{Room, User};
use crate::ids::{DungeonId, RoomId, UserEmail};
use crate::value_objects::HintCategory;

/// Copy of the author embedded in a Room-side comment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthorSnapshot {
    pub email: UserEmail,
    pub user_name: String,
    /// The author's account creation date, not the comment date.
    pub creation_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

/// Copy of the commented room embedded in a User-side comment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomReference {
    pub room_id: RoomId,
    pub room_name: String,
    pub dungeon_id: DungeonId,
    pub dungeon_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomHint {
    #[serde(
        default,
        deserialize_with = "lenient_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub creation_date: Option<NaiveDate>,
    #[serde(default)]
    pub text: String,
    pub category: HintCategory,
    #[serde(default)]
    pub publish_by: AuthorSnapshot,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserHint {
    #[serde(
        default,
        deserialize_with = "lenient_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub creation_date: Option<NaiveDate>,
    #[serde(default)]
    pub text: String,
    pub category: HintCategory,
    #[serde(default)]
    pub references_room: RoomReference,
}

fn lenient_date<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<NaiveDate>, D::Error> {
    let Some(raw) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };
    if let Ok(date) = raw.parse::<NaiveDate>() {
        return Ok(Some(date));
    }
    DateTime::parse_from_rfc3339(&raw)
        .map(|timestamp| Some(timestamp.date_naive()))
        .map_err(|_| serde::de::Error::custom(format!("invalid comment date: {raw}")))
}

/// The logical comment both twins are built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentDraft {
    pub creation_date: NaiveDate,
    pub text: String,
    pub category: HintCategory,
}

impl CommentDraft {
    pub fn new(creation_date: NaiveDate, text: impl Into<String>, category: HintCategory) -> Self {
        Self {
            creation_date,
            text: text.into(),
            category,
        }
    }

    pub fn room_side(&self, author: &User) -> RoomHint {
        RoomHint {
            creation_date: Some(self.creation_date),
            text: self.text.clone(),
            category: self.category,
            publish_by: author.author_snapshot(),
        }
    }

    pub fn user_side(&self, room: &Room) -> UserHint {
        UserHint {
            creation_date: Some(self.creation_date),
            text: self.text.clone(),
            category: self.category,
            references_room: room.reference(),
        }
    }
}

impl RoomHint {
    /// Whether `other` is this comment's twin on the author's side.
    pub fn is_twin_of(&self, other: &UserHint) -> bool {
        self.creation_date == other.creation_date
            && self.text == other.text
            && self.category == other.category
    }
}
