//! Monster - canonical creature records, embedded into Rooms like Loot.

use serde::{Deserialize, Serialize};

use crate::ids::MonsterId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Monster {
    pub id: MonsterId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub man_page: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

impl Monster {
    pub fn new(id: MonsterId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            place: None,
            kind: None,
            man_page: None,
            level: None,
            exp: None,
        }
    }
}
