//! Comment use cases.
//!
//! A comment is written twice: into the target Room, then into the author's
//! User document.

mod create_comment;
mod error;

pub use create_comment::{CreateComment, CreateCommentInput};
pub use error::CommentError;
