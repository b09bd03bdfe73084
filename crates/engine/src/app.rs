//! Application state and composition.

use std::sync::Arc;

use crate::infrastructure::{
    ports::{ClockPort, LootRepo, MonsterRepo, RoomRepo, UserRepo},
    sqlite::SqliteRepositories,
};
use crate::use_cases;

/// Main application state.
///
/// Holds all repositories and use cases.
/// Passed to HTTP handlers via Axum state.
pub struct App {
    pub repositories: Repositories,
    pub use_cases: UseCases,
}

/// One port per document collection.
pub struct Repositories {
    pub room: Arc<dyn RoomRepo>,
    pub loot: Arc<dyn LootRepo>,
    pub monster: Arc<dyn MonsterRepo>,
    pub user: Arc<dyn UserRepo>,
}

/// Container for all use cases.
pub struct UseCases {
    pub create_comment: use_cases::CreateComment,
    pub remove: use_cases::RemoveCanonical,
    pub scrub: Arc<use_cases::ScrubSnapshots>,
    pub reconcile: use_cases::ReconcileSnapshots,
    pub dungeons: use_cases::DungeonViews,
    pub lookup: use_cases::LookupUseCases,
    pub seed: use_cases::ImportSeed,
}

impl App {
    /// Create a new App with all dependencies wired up.
    pub fn new(repos: SqliteRepositories, clock: Arc<dyn ClockPort>) -> Self {
        let room_repo: Arc<dyn RoomRepo> = repos.room;
        let loot_repo: Arc<dyn LootRepo> = repos.loot;
        let monster_repo: Arc<dyn MonsterRepo> = repos.monster;
        let user_repo: Arc<dyn UserRepo> = repos.user;

        let scrub = Arc::new(use_cases::ScrubSnapshots::new(room_repo.clone()));

        let use_cases = UseCases {
            create_comment: use_cases::CreateComment::new(
                room_repo.clone(),
                user_repo.clone(),
                clock,
            ),
            remove: use_cases::RemoveCanonical::new(
                loot_repo.clone(),
                monster_repo.clone(),
                scrub.clone(),
            ),
            reconcile: use_cases::ReconcileSnapshots::new(
                room_repo.clone(),
                loot_repo.clone(),
                monster_repo.clone(),
                scrub.clone(),
            ),
            scrub,
            dungeons: use_cases::DungeonViews::new(room_repo.clone()),
            lookup: use_cases::LookupUseCases::new(
                room_repo.clone(),
                loot_repo.clone(),
                monster_repo.clone(),
                user_repo.clone(),
            ),
            seed: use_cases::ImportSeed::new(
                room_repo.clone(),
                loot_repo.clone(),
                monster_repo.clone(),
                user_repo.clone(),
            ),
        };

        Self {
            repositories: Repositories {
                room: room_repo,
                loot: loot_repo,
                monster: monster_repo,
                user: user_repo,
            },
            use_cases,
        }
    }
}
