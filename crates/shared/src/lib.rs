//! Jotun's Lair Wiki - HTTP wire contract
//!
//! Request bodies and response shapes of the public HTTP API. Endpoints that
//! return a document unchanged serialize the domain type directly; the types
//! here exist where the wire shape differs from the stored document.
//!
//! # Compatibility
//!
//! The single-room detail renames fields (`idR`, `name`, `inWP`, `outWP`)
//! while the room list keeps the stored names. Clients depend on both shapes.

pub mod requests;
pub mod responses;

pub use requests::CreateCommentRequest;
pub use responses::{MessageResponse, RoomDetailResponse, RoomListItem};
