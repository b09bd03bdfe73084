//! E2E test helpers for constructing the full application stack.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::{TimeZone, Utc};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use jotunwiki_domain::{DungeonId, Loot, LootId, Monster, MonsterId, Room, RoomId, User};

use crate::api;
use crate::app::App;
use crate::infrastructure::clock::FixedClock;
use crate::infrastructure::sqlite::{test_pool, SqliteRepositories};

/// Full wiki over a temporary store. Requests are served in-process.
pub struct TestWiki {
    _dir: TempDir,
    pub app: Arc<App>,
    router: Router,
}

impl TestWiki {
    /// Empty store, clock fixed at 2026-10-18T12:00:00Z.
    pub async fn new() -> Self {
        let (dir, pool) = test_pool().await;
        let clock = Arc::new(FixedClock(
            Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 0)
                .single()
                .expect("valid timestamp"),
        ));
        let app = Arc::new(App::new(SqliteRepositories::new(pool), clock));
        let router = api::http::routes().with_state(app.clone());

        Self {
            _dir: dir,
            app,
            router,
        }
    }

    pub async fn seed_room(&self, room: Room) {
        self.app.repositories.room.insert(&room).await.expect("seed room");
    }

    pub async fn seed_user(&self, user: User) {
        self.app.repositories.user.insert(&user).await.expect("seed user");
    }

    pub async fn seed_loot(&self, loot: Loot) {
        self.app.repositories.loot.insert(&loot).await.expect("seed loot");
    }

    pub async fn seed_monster(&self, monster: Monster) {
        self.app
            .repositories
            .monster
            .insert(&monster)
            .await
            .expect("seed monster");
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, None).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::DELETE, uri, None).await
    }

    pub async fn post_json(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, Some(body.to_string())).await
    }

    pub async fn post_raw(&self, uri: &str, body: &str) -> (StatusCode, Value) {
        self.send(Method::POST, uri, Some(body.to_string())).await
    }

    /// Returns the status and the body as JSON, or as a JSON string when the
    /// body is plain text.
    async fn send(&self, method: Method, uri: &str, body: Option<String>) -> (StatusCode, Value) {
        let mut request = Request::builder().method(method).uri(uri);
        if body.is_some() {
            request = request.header(header::CONTENT_TYPE, "application/json");
        }
        let request = request
            .body(body.map(Body::from).unwrap_or_else(Body::empty))
            .expect("request");

        let response = self.router.clone().oneshot(request).await.expect("response");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        let value = serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));

        (status, value)
    }
}

// =============================================================================
// Document builders
// =============================================================================

pub fn room(room_id: i64, dungeon_id: i64) -> Room {
    Room::new(
        RoomId::new(room_id),
        format!("Room {room_id}"),
        DungeonId::new(dungeon_id),
        format!("Dungeon {dungeon_id}"),
    )
}

pub fn user(email: &str) -> User {
    User::new(email, "astrid", "2024-01-15")
}

pub fn loot(id: i64, name: &str) -> Loot {
    Loot::new(LootId::new(id), name)
}

pub fn monster(id: i64, name: &str) -> Monster {
    Monster::new(MonsterId::new(id), name)
}
