//! Loot - canonical treasure records.
//!
//! The Loot collection holds the canonical copy; Rooms embed snapshots of the
//! same shape in their `loot` array.

use serde::{Deserialize, Serialize};

use crate::ids::LootId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Loot {
    pub id: LootId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type2: Option<String>,
    /// Free-form weight text, e.g. "2.5 kg"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gold: Option<i64>,
}

impl Loot {
    pub fn new(id: LootId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            type1: None,
            type2: None,
            weight: None,
            gold: None,
        }
    }
}
