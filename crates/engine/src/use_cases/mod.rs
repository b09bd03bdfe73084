//! Use cases - User story orchestration.
//!
//! Each module contains use cases for a specific domain area.
//! Use cases orchestrate across repositories to fulfill one request.

pub mod comment;
pub mod dungeon;
pub mod lookup;
pub mod removal;
pub mod seed;

pub use comment::{CommentError, CreateComment, CreateCommentInput};
pub use dungeon::{DungeonError, DungeonViews};
pub use lookup::{LookupError, LookupUseCases};
pub use removal::{
    CascadeReport, ReconcileReport, ReconcileSnapshots, RemovalError, RemoveCanonical,
    ScrubSnapshots,
};
pub use seed::{ImportSeed, SeedData, SeedError, SeedOutcome};
