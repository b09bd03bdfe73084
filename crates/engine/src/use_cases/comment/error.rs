//! Comment creation errors.

use jotunwiki_domain::{HintCategory, RoomId, UserEmail};

use crate::infrastructure::ports::RepoError;

#[derive(Debug, thiserror::Error)]
pub enum CommentError {
    #[error("Invalid category '{0}', expected one of Lore, Hint, Suggestion, Bug")]
    InvalidCategory(String),
    #[error("User not found: {0}")]
    UserNotFound(UserEmail),
    #[error("Room not found: {0}")]
    RoomNotFound(RoomId),
    /// The Room-side comment was stored but its User-side twin was not.
    #[error("Comment stored on room {room_id} but not on user {user_email}: {source}")]
    PartialWrite {
        room_id: RoomId,
        user_email: UserEmail,
        category: HintCategory,
        #[source]
        source: RepoError,
    },
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}
