//! User - wiki accounts, keyed by email.

use serde::{Deserialize, Serialize};

use crate::entities::comment::{AuthorSnapshot, UserHint};
use crate::ids::UserEmail;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub email: UserEmail,
    pub user_name: String,
    /// Account creation date as stored by the seed data.
    pub creation_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// User-side twins of every comment this user authored.
    #[serde(default)]
    pub hints: Vec<UserHint>,
}

impl User {
    pub fn new(
        email: impl Into<UserEmail>,
        user_name: impl Into<String>,
        creation_date: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            user_name: user_name.into(),
            creation_date: creation_date.into(),
            country: None,
            hints: Vec::new(),
        }
    }

    /// Point-in-time copy of this user for the Room-side twin of a comment.
    pub fn author_snapshot(&self) -> AuthorSnapshot {
        AuthorSnapshot {
            email: self.email.clone(),
            user_name: self.user_name.clone(),
            creation_date: self.creation_date.clone(),
            country: self.country.clone(),
        }
    }
}
